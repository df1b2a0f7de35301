use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use cloudmap::Texture;
use image::RgbaImage;

/// Writes the cloud texture, and its preview if any, as PNG files.
pub struct FileOutput {
    pub outdir: PathBuf,
    pub name: String,
}

impl FileOutput {
    pub fn new(outdir: PathBuf, name: String) -> Self {
        Self { outdir, name }
    }

    pub fn texture_path(&self) -> PathBuf {
        self.outdir.join(format!("{}.png", self.name))
    }

    pub fn preview_path(&self) -> PathBuf {
        self.outdir.join(format!("{}_preview.png", self.name))
    }

    /// Acts as the upload of `texture`: its pending pixels are written and acknowledged.
    pub fn commit(&self, texture: &mut Texture, preview: Option<&RgbaImage>) -> Result<()> {
        if !texture.needs_update() {
            log::warn!("texture {} has no pending update", self.name);
            return Ok(());
        }
        let image = texture
            .image()
            .ok_or_else(|| anyhow!("texture {} has no pixels", self.name))?;

        std::fs::create_dir_all(&self.outdir)
            .with_context(|| format!("could not create {}", self.outdir.display()))?;

        log::info!("Saving cloud texture...");
        let path = self.texture_path();
        image
            .save(&path)
            .with_context(|| format!("could not save {}", path.display()))?;

        if let Some(preview) = preview {
            log::info!("Saving preview...");
            let path = self.preview_path();
            preview
                .save(&path)
                .with_context(|| format!("could not save {}", path.display()))?;
        }

        texture.acknowledge_upload();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use cloudmap::{Texture, TextureSurface};
    use image::{Rgba, RgbaImage};

    use super::FileOutput;

    #[test]
    fn writes_pending_texture() {
        let outdir = std::env::temp_dir().join(format!("cloudmap-cli-{}", std::process::id()));
        let output = FileOutput::new(outdir.clone(), "clouds".into());

        let pixels = RgbaImage::from_pixel(2, 2, Rgba([1, 2, 3, 4]));
        let mut texture = Texture::new();
        texture.set_image(Arc::new(pixels.clone()));
        texture.mark_needs_update();

        output.commit(&mut texture, Some(&pixels)).unwrap();
        assert!(!texture.needs_update());

        let written = image::open(output.texture_path()).unwrap().into_rgba8();
        assert!(written == pixels);
        assert!(output.preview_path().exists());

        std::fs::remove_dir_all(&outdir).unwrap();
    }

    #[test]
    fn nothing_pending() {
        let output = FileOutput::new(std::env::temp_dir().join("cloudmap-cli-unused"), "x".into());
        let mut texture = Texture::new();
        output.commit(&mut texture, None).unwrap();
        assert!(!output.texture_path().exists());
    }
}
