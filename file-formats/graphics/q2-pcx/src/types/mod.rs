/// PCX file header structures
pub mod header;
/// Decoded image and decode result types
pub mod image;
/// Trailing palette and channel ordering
pub mod palette;

pub use self::image::*;
pub use header::*;
pub use palette::*;
