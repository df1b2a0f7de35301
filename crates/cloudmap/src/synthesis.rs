//! Cloud texture synthesis.
//!
//! The color map provides the RGB channels of the texture while the red
//! channel of the transparency map, inverted, provides its alpha: bright
//! areas of the transparency map become transparent, dark areas opaque.

use image::RgbaImage;
use itertools::izip;
use rayon::{
    iter::{IndexedParallelIterator, ParallelIterator},
    slice::{ParallelSlice, ParallelSliceMut},
};

use crate::{
    error::{Result, SynthesisError},
    utils::timer::timed_scope_log,
    Dimensions,
};

/// Combines one color pixel and one transparency pixel into a texture pixel.
#[inline]
pub fn cloud_pixel([r, g, b, _]: [u8; 4], [transparency, ..]: [u8; 4]) -> [u8; 4] {
    [r, g, b, 255 - transparency]
}

/// Synthesizes with the default [`Synthesizer`].
pub fn synthesize(color: &RgbaImage, transparency: &RgbaImage) -> Result<RgbaImage> {
    Synthesizer::default().synthesize(color, transparency)
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionMode {
    #[default]
    Multithreaded,
    Monothreaded,
}

#[derive(Debug, Clone, Copy)]
pub struct Synthesizer {
    pub execution_mode: ExecutionMode,
    /// Rows handed to a single worker.
    pub band_height: u32,
}

impl Default for Synthesizer {
    fn default() -> Self {
        SynthesizerBuilder::default().build()
    }
}

pub struct SynthesizerBuilder {
    pub execution_mode: ExecutionMode,
    pub band_height: u32,
}

impl Default for SynthesizerBuilder {
    fn default() -> Self {
        Self {
            execution_mode: ExecutionMode::Multithreaded,
            band_height: 64,
        }
    }
}

impl SynthesizerBuilder {
    pub fn execution_mode(mut self, execution_mode: ExecutionMode) -> Self {
        self.execution_mode = execution_mode;
        self
    }

    pub fn band_height(mut self, band_height: u32) -> Self {
        self.band_height = band_height;
        self
    }

    pub fn build(self) -> Synthesizer {
        Synthesizer {
            execution_mode: self.execution_mode,
            band_height: self.band_height.max(1),
        }
    }
}

impl Synthesizer {
    pub fn builder() -> SynthesizerBuilder {
        SynthesizerBuilder::default()
    }

    /// Builds the cloud texture out of `color` and `transparency`.
    ///
    /// Both images must have the same dimensions, otherwise
    /// [`SynthesisError::DimensionMismatch`] is returned and nothing is allocated.
    pub fn synthesize(&self, color: &RgbaImage, transparency: &RgbaImage) -> Result<RgbaImage> {
        let dimensions = Dimensions::of(color);
        SynthesisError::check_dimensions(dimensions, Dimensions::of(transparency))?;

        let mut output = RgbaImage::new(dimensions.width, dimensions.height);
        if dimensions.is_empty() {
            return Ok(output);
        }

        let band_len = 4 * dimensions.width as usize * self.band_height.max(1) as usize;
        timed_scope_log("synthesize cloud texture", || {
            let out: &mut [u8] = &mut output;
            let color: &[u8] = color;
            let transparency: &[u8] = transparency;

            match self.execution_mode {
                ExecutionMode::Multithreaded => out
                    .par_chunks_mut(band_len)
                    .zip(color.par_chunks(band_len))
                    .zip(transparency.par_chunks(band_len))
                    .enumerate()
                    .for_each(|(band, ((out, color), transparency))| {
                        log::trace!("working on band {band}");
                        synthesize_band(out, color, transparency)
                    }),
                ExecutionMode::Monothreaded => {
                    for (out, color, transparency) in izip!(
                        out.chunks_mut(band_len),
                        color.chunks(band_len),
                        transparency.chunks(band_len)
                    ) {
                        synthesize_band(out, color, transparency)
                    }
                }
            }
        });

        Ok(output)
    }
}

fn synthesize_band(out: &mut [u8], color: &[u8], transparency: &[u8]) {
    let out: &mut [[u8; 4]] = bytemuck::cast_slice_mut(out);
    let color: &[[u8; 4]] = bytemuck::cast_slice(color);
    let transparency: &[[u8; 4]] = bytemuck::cast_slice(transparency);

    for (out, color, transparency) in izip!(out, color, transparency) {
        *out = cloud_pixel(*color, *transparency);
    }
}

#[cfg(test)]
mod tests {
    use image::{Rgba, RgbaImage};
    use rand::{Rng, SeedableRng};
    use rand_xoshiro::Xoshiro256StarStar;

    use super::{cloud_pixel, synthesize, ExecutionMode, Synthesizer};
    use crate::{
        test_utils::{rgb_image, uniform},
        Dimensions, SynthesisError,
    };

    fn random_image(rng: &mut Xoshiro256StarStar, width: u32, height: u32) -> RgbaImage {
        let mut raw = vec![0u8; 4 * width as usize * height as usize];
        rng.fill(raw.as_mut_slice());
        RgbaImage::from_raw(width, height, raw).unwrap()
    }

    #[test]
    fn two_pixels() {
        let color = rgb_image(2, 1, &[[255, 0, 0], [0, 255, 0]]);
        let transparency = rgb_image(2, 1, &[[0, 0, 0], [255, 255, 255]]);

        let out = synthesize(&color, &transparency).unwrap();
        assert_eq!(out.dimensions(), (2, 1));
        assert_eq!(*out.get_pixel(0, 0), Rgba([255, 0, 0, 255]));
        assert_eq!(*out.get_pixel(1, 0), Rgba([0, 255, 0, 0]));
    }

    #[test]
    fn alpha_is_inverted_red() {
        let color = rgb_image(1, 1, &[[10, 20, 30]]);
        let transparency = rgb_image(1, 1, &[[100, 7, 7]]);

        let out = synthesize(&color, &transparency).unwrap();
        assert_eq!(*out.get_pixel(0, 0), Rgba([10, 20, 30, 155]));
    }

    #[test]
    fn boundary_values() {
        assert_eq!(cloud_pixel([1, 2, 3, 4], [0, 255, 255, 255]), [1, 2, 3, 255]);
        assert_eq!(cloud_pixel([1, 2, 3, 4], [255, 0, 0, 0]), [1, 2, 3, 0]);
    }

    #[test]
    fn only_red_channel_of_transparency_is_read() {
        let color = uniform(3, 3, [50, 60, 70, 0]);
        let a = uniform(3, 3, [40, 0, 0, 0]);
        let b = uniform(3, 3, [40, 200, 123, 9]);
        assert_eq!(synthesize(&color, &a).unwrap(), synthesize(&color, &b).unwrap());
    }

    #[test]
    fn mismatched_dimensions() {
        let color = uniform(2, 2, [0; 4]);
        let transparency = uniform(3, 3, [0; 4]);

        let err = synthesize(&color, &transparency).unwrap_err();
        assert_eq!(err.to_string(), "dimension mismatch: 2x2 against 3x3");
        match err {
            SynthesisError::DimensionMismatch { first, second } => {
                assert_eq!(first, Dimensions { width: 2, height: 2 });
                assert_eq!(second, Dimensions { width: 3, height: 3 });
            }
            err => panic!("expected a dimension mismatch, got {err:?}"),
        }

        // Same pixel count, different shape
        let wide = uniform(4, 1, [0; 4]);
        let tall = uniform(1, 4, [0; 4]);
        assert!(synthesize(&wide, &tall).is_err());
    }

    #[test]
    fn empty_image() {
        let out = synthesize(&RgbaImage::new(0, 4), &RgbaImage::new(0, 4)).unwrap();
        assert_eq!(out.dimensions(), (0, 4));
    }

    #[test]
    fn random_images() {
        let mut rng = Xoshiro256StarStar::seed_from_u64(0x5eed);
        let (width, height) = (37, 29);
        let color = random_image(&mut rng, width, height);
        let transparency = random_image(&mut rng, width, height);

        let out = synthesize(&color, &transparency).unwrap();
        assert_eq!(out.dimensions(), (width, height));
        for (x, y, px) in out.enumerate_pixels() {
            let c = color.get_pixel(x, y);
            let t = transparency.get_pixel(x, y);
            assert_eq!(px.0, [c[0], c[1], c[2], 255 - t[0]], "pixel ({x}, {y})");
        }
    }

    #[test]
    fn deterministic_across_execution() {
        let mut rng = Xoshiro256StarStar::seed_from_u64(42);
        let (width, height) = (64, 131);
        let color = random_image(&mut rng, width, height);
        let transparency = random_image(&mut rng, width, height);

        let reference = Synthesizer::builder()
            .execution_mode(ExecutionMode::Monothreaded)
            .band_height(height)
            .build()
            .synthesize(&color, &transparency)
            .unwrap();

        for execution_mode in [ExecutionMode::Monothreaded, ExecutionMode::Multithreaded] {
            // 0 is clamped to a single row, 7 does not divide the height
            for band_height in [0, 1, 7, 64, 1000] {
                let synthesizer = Synthesizer::builder()
                    .execution_mode(execution_mode)
                    .band_height(band_height)
                    .build();
                let out = synthesizer.synthesize(&color, &transparency).unwrap();
                assert!(
                    out == reference,
                    "{execution_mode:?} with bands of {band_height} rows differs"
                );
            }
        }
    }

    #[test]
    fn inputs_are_untouched() {
        let color = rgb_image(2, 1, &[[1, 2, 3], [4, 5, 6]]);
        let transparency = rgb_image(2, 1, &[[7, 8, 9], [10, 11, 12]]);
        let (color_before, transparency_before) = (color.clone(), transparency.clone());

        synthesize(&color, &transparency).unwrap();
        assert!(color == color_before);
        assert!(transparency == transparency_before);
    }
}
