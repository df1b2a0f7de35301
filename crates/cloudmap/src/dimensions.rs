use std::fmt::Display;

use image::GenericImageView;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub fn of<I: GenericImageView>(image: &I) -> Self {
        let (width, height) = image.dimensions();
        Self { width, height }
    }

    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    pub fn is_empty(&self) -> bool {
        self.pixel_count() == 0
    }
}

impl Display for Dimensions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("{}x{}", self.width, self.height))
    }
}

#[cfg(test)]
mod tests {
    use image::RgbaImage;

    use super::Dimensions;

    #[test]
    fn dimensions_of_image() {
        let dim = Dimensions::of(&RgbaImage::new(3, 2));
        assert_eq!(
            dim,
            Dimensions {
                width: 3,
                height: 2
            }
        );
        assert_eq!(dim.pixel_count(), 6);
        assert_eq!(dim.to_string(), "3x2");
        assert!(!dim.is_empty());
        assert!(Dimensions::of(&RgbaImage::new(0, 5)).is_empty());
    }
}
