use thiserror::Error;

/// Errors that appear when loading from filesystem
#[derive(Debug, Error)]
pub enum LoadError {
    /// Decoding failed
    #[error("Failed to decode {0}: {1}")]
    Parsing(std::path::PathBuf, #[source] Error),
    /// File system error when reading the PCX file
    #[error("File system error with file {0}, due: {1}")]
    FileSystem(std::path::PathBuf, std::io::Error),
}

/// Errors that the PCX decoder can produce
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// Input cannot even hold the header and the trailing palette
    #[error("File is {len} bytes long, at least {required} bytes are required")]
    FileTooShort {
        /// Actual input length
        len: usize,
        /// Header plus palette size
        required: usize,
    },
    /// Manufacturer byte is not 0x0A
    #[error("Unexpected manufacturer byte {0:#04x}. The file format is not PCX.")]
    BadMagic(u8),
    /// Bounding box describes an empty image
    #[error("Invalid image window ({xmin}, {ymin})-({xmax}, {ymax})")]
    InvalidDimensions {
        /// Left edge
        xmin: u16,
        /// Top edge
        ymin: u16,
        /// Right edge
        xmax: u16,
        /// Bottom edge
        ymax: u16,
    },
    /// Pixel stream ended before every scanline was decoded
    #[error("Pixel data ends at offset {offset} before scanline {scanline} is complete")]
    TruncatedFile {
        /// Offset in the file where more data was needed
        offset: usize,
        /// Scanline (top first) being decoded
        scanline: usize,
    },
}
