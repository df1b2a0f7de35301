use std::{
    collections::HashMap,
    io,
    path::{Path, PathBuf},
};

use image::{ImageError, RgbaImage};

use crate::error::{Result, SynthesisError};

/// Source of decoded images.
///
/// Loaders are shared between the workers of [`load_pair`], hence the `Sync` bound.
pub trait ImageLoader: Sync {
    fn load(&self, path: &Path) -> Result<RgbaImage>;
}

/// Decodes an encoded image (JPEG, PNG, ...) into an RGBA buffer.
///
/// `name` only identifies the image in errors.
pub fn decode_image(name: &str, bytes: &[u8]) -> Result<RgbaImage> {
    image::load_from_memory(bytes)
        .map(image::DynamicImage::into_rgba8)
        .map_err(|err| SynthesisError::decode(name, err))
}

/// Loads both images as two independent tasks and waits for both of them.
///
/// When both loads fail, the color map error wins.
pub fn load_pair<L: ImageLoader + ?Sized>(
    loader: &L,
    color: &Path,
    transparency: &Path,
) -> Result<(RgbaImage, RgbaImage)> {
    let (color, transparency) = rayon::join(|| loader.load(color), || loader.load(transparency));
    Ok((color?, transparency?))
}

/// Reads images from the filesystem.
#[derive(Debug, Default, Clone)]
pub struct FsLoader {
    /// Relative paths are resolved against this directory when set.
    pub root: Option<PathBuf>,
}

impl FsLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_root<P: Into<PathBuf>>(root: P) -> Self {
        Self {
            root: Some(root.into()),
        }
    }

    pub fn resolve(&self, path: &Path) -> PathBuf {
        match &self.root {
            Some(root) if path.is_relative() => root.join(path),
            _ => path.to_path_buf(),
        }
    }
}

impl ImageLoader for FsLoader {
    fn load(&self, path: &Path) -> Result<RgbaImage> {
        let path = self.resolve(path);
        log::debug!("loading {}", path.display());

        let image = image::open(&path)
            .map_err(|err| SynthesisError::decode(path.display().to_string(), err))?;
        log::debug!(
            "loaded {} ({}x{}, {:?})",
            path.display(),
            image.width(),
            image.height(),
            image.color()
        );
        Ok(image.into_rgba8())
    }
}

/// Keeps encoded images in memory, keyed by path.
#[derive(Debug, Default, Clone)]
pub struct MemoryLoader {
    images: HashMap<PathBuf, Vec<u8>>,
}

impl MemoryLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert<P: Into<PathBuf>>(&mut self, path: P, bytes: Vec<u8>) -> &mut Self {
        self.images.insert(path.into(), bytes);
        self
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

impl ImageLoader for MemoryLoader {
    fn load(&self, path: &Path) -> Result<RgbaImage> {
        let name = path.display().to_string();
        let Some(bytes) = self.images.get(path) else {
            let err = io::Error::new(io::ErrorKind::NotFound, "no image registered at this path");
            return Err(SynthesisError::decode(name, ImageError::IoError(err)));
        };
        log::debug!("decoding {name} from memory ({} bytes)", bytes.len());
        decode_image(&name, bytes)
    }
}
