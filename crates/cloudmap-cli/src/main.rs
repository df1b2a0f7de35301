mod output;
mod utils;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use cloudmap::{composite::composite_over, CloudLayer, FsLoader, ImageLoader, Synthesizer, Texture};
use output::FileOutput;
use utils::AvailableExecutionMode;

#[derive(Parser, Debug)]
pub struct Args {
    /// Image providing the color of the clouds
    color_map: PathBuf,

    /// Image whose red channel, inverted, gives the opacity of the clouds
    transparency_map: PathBuf,

    #[arg(long)]
    /// If provided, the cloud texture is also drawn over this map and saved as a preview
    base: Option<PathBuf>,

    #[arg(long)]
    /// Directory relative input paths are resolved against
    root: Option<PathBuf>,

    #[arg(short, long, default_value = "output/")]
    outdir: PathBuf,

    #[arg(long, default_value = "clouds")]
    /// Base name of the written files
    name: String,

    #[arg(short, long, value_enum, default_value_t)]
    execution_mode: AvailableExecutionMode,

    #[arg(long, default_value_t = 64)]
    /// Number of rows synthesized by a worker at once
    band_height: u32,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let loader = match &args.root {
        Some(root) => FsLoader::with_root(root),
        None => FsLoader::new(),
    };

    let synthesizer = Synthesizer::builder()
        .execution_mode(args.execution_mode.into())
        .band_height(args.band_height)
        .build();
    let layer =
        CloudLayer::new(&args.color_map, &args.transparency_map).with_synthesizer(synthesizer);

    let mut texture = Texture::with_label(args.name.clone());
    let clouds = layer
        .apply_to(&loader, &mut texture)
        .context("could not build the cloud texture")?;

    let preview = match &args.base {
        Some(base) => {
            let base = loader.load(base)?;
            let preview = composite_over(&base, &clouds).context("could not draw the preview")?;
            Some(preview)
        }
        None => None,
    };

    let output = FileOutput::new(args.outdir, args.name);
    output.commit(&mut texture, preview.as_ref())?;

    log::info!("Done");
    Ok(())
}
