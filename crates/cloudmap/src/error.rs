use crate::Dimensions;

pub type Result<T, E = SynthesisError> = std::result::Result<T, E>;

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum SynthesisError {
    /// An input image could not be read or decoded into pixels.
    #[display("failed to decode {name}: {source}")]
    Decode {
        name: String,
        source: image::ImageError,
    },

    /// The two inputs of a pixel-wise operation do not share their size.
    #[display("dimension mismatch: {first} against {second}")]
    DimensionMismatch { first: Dimensions, second: Dimensions },
}

impl SynthesisError {
    pub fn decode(name: impl Into<String>, source: image::ImageError) -> Self {
        Self::Decode {
            name: name.into(),
            source,
        }
    }

    pub(crate) fn check_dimensions(first: Dimensions, second: Dimensions) -> Result<()> {
        if first == second {
            Ok(())
        } else {
            Err(Self::DimensionMismatch { first, second })
        }
    }
}
