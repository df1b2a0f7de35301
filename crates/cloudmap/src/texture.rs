use std::sync::Arc;

use image::RgbaImage;

use crate::Dimensions;

/// Destination of a synthesized texture, typically backed by a GPU texture.
pub trait TextureSurface {
    /// Hands the pixel buffer over. It is never mutated afterwards.
    fn set_image(&mut self, image: Arc<RgbaImage>);

    /// Signals that the pixels changed and must be uploaded again.
    fn mark_needs_update(&mut self);
}

#[derive(Debug, Default, Clone)]
pub struct Texture {
    pub label: Option<String>,
    image: Option<Arc<RgbaImage>>,
    version: u64,
    uploaded_version: u64,
}

impl Texture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_label<S: Into<String>>(label: S) -> Self {
        Self {
            label: Some(label.into()),
            ..Default::default()
        }
    }

    pub fn image(&self) -> Option<&Arc<RgbaImage>> {
        self.image.as_ref()
    }

    pub fn dimensions(&self) -> Option<Dimensions> {
        self.image.as_deref().map(Dimensions::of)
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn needs_update(&self) -> bool {
        self.version > self.uploaded_version
    }

    /// Called by the renderer once the current pixels reached the GPU.
    pub fn acknowledge_upload(&mut self) {
        self.uploaded_version = self.version;
    }
}

impl TextureSurface for Texture {
    fn set_image(&mut self, image: Arc<RgbaImage>) {
        self.image = Some(image);
    }

    fn mark_needs_update(&mut self) {
        self.version += 1;
        log::debug!(
            "texture {} needs update (version {})",
            self.label.as_deref().unwrap_or("<unnamed>"),
            self.version
        );
    }
}
