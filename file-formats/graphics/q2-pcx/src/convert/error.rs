use thiserror::Error;

/// Errors that can occur when exporting a decoded PCX image
#[derive(Debug, Error)]
pub enum Error {
    /// Pixel buffer does not match the image dimensions
    #[error("Image is {0}x{1} but the pixel buffer holds {2} bytes")]
    MismatchSizes(u32, u32, usize),
    /// Error raised by the `image` crate
    #[error("Image export failed: {0}")]
    Convert(#[from] ::image::ImageError),
}
