pub mod composite;
pub mod dimensions;
pub mod error;
pub mod layer;
pub mod loader;
pub mod synthesis;
pub mod texture;
pub mod utils;

pub use dimensions::Dimensions;
pub use error::SynthesisError;
pub use layer::CloudLayer;
pub use loader::{FsLoader, ImageLoader, MemoryLoader};
pub use synthesis::{synthesize, ExecutionMode, Synthesizer, SynthesizerBuilder};
pub use texture::{Texture, TextureSurface};
