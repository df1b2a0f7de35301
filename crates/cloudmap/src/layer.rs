//! Loading and synthesis of a cloud layer texture.
//!
//! A [`CloudLayer`] names the two maps a cloud texture is built from. Both
//! maps are loaded independently, joined, then combined by a [`Synthesizer`]
//! and handed to a [`TextureSurface`].

use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use image::RgbaImage;

use crate::{
    error::Result,
    loader::{load_pair, ImageLoader},
    texture::TextureSurface,
    Dimensions, Synthesizer,
};

#[derive(Debug, Clone)]
pub struct CloudLayer {
    /// Provides the RGB channels.
    pub color: PathBuf,
    /// Provides the alpha channel, from its inverted red channel.
    pub transparency: PathBuf,
    pub synthesizer: Synthesizer,
}

impl CloudLayer {
    pub fn new<C: Into<PathBuf>, T: Into<PathBuf>>(color: C, transparency: T) -> Self {
        Self {
            color: color.into(),
            transparency: transparency.into(),
            synthesizer: Synthesizer::default(),
        }
    }

    pub fn with_synthesizer(mut self, synthesizer: Synthesizer) -> Self {
        self.synthesizer = synthesizer;
        self
    }

    pub fn color(&self) -> &Path {
        &self.color
    }

    pub fn transparency(&self) -> &Path {
        &self.transparency
    }

    /// Loads both maps and synthesizes the texture.
    pub fn build<L: ImageLoader + ?Sized>(&self, loader: &L) -> Result<RgbaImage> {
        log::info!(
            "loading cloud maps {} and {}",
            self.color.display(),
            self.transparency.display()
        );
        let (color, transparency) = load_pair(loader, &self.color, &self.transparency)?;

        let texture = self.synthesizer.synthesize(&color, &transparency)?;
        log::info!("cloud texture ready ({})", Dimensions::of(&texture));
        Ok(texture)
    }

    /// Builds the texture and hands it to `surface`, which is notified once.
    ///
    /// On error the surface is left untouched.
    pub fn apply_to<L, S>(&self, loader: &L, surface: &mut S) -> Result<Arc<RgbaImage>>
    where
        L: ImageLoader + ?Sized,
        S: TextureSurface + ?Sized,
    {
        let texture = Arc::new(self.build(loader)?);
        surface.set_image(texture.clone());
        surface.mark_needs_update();
        Ok(texture)
    }
}
