use image::{Rgba, RgbaImage};
use itertools::izip;

use crate::{
    error::{Result, SynthesisError},
    Dimensions,
};

/// Source-over blend of one channel, `alpha` in `0..=255`.
#[inline]
fn blend_channel(src: u8, dst: u8, alpha: u8) -> u8 {
    let alpha = alpha as u32;
    ((src as u32 * alpha + dst as u32 * (255 - alpha) + 127) / 255) as u8
}

/// Draws `clouds` over `base` and returns an opaque image.
///
/// This is how the cloud layer looks once drawn over the color map of the
/// globe. The alpha channel of `base` is ignored.
pub fn composite_over(base: &RgbaImage, clouds: &RgbaImage) -> Result<RgbaImage> {
    let dimensions = Dimensions::of(base);
    SynthesisError::check_dimensions(dimensions, Dimensions::of(clouds))?;

    let mut output = RgbaImage::new(dimensions.width, dimensions.height);
    for (out, base, cloud) in izip!(output.pixels_mut(), base.pixels(), clouds.pixels()) {
        let Rgba([r, g, b, a]) = *cloud;
        *out = Rgba([
            blend_channel(r, base[0], a),
            blend_channel(g, base[1], a),
            blend_channel(b, base[2], a),
            255,
        ]);
    }

    Ok(output)
}
