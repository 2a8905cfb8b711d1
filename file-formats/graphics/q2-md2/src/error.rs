use std::io;
use thiserror::Error;

/// Error types for MD2 model parsing and animation
#[derive(Error, Debug)]
pub enum Md2Error {
    /// I/O Error during reading
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Invalid magic number in the file header
    #[error("Invalid magic number: expected '{expected}', got '{actual}'")]
    BadMagic { expected: String, actual: String },

    /// Unsupported file version
    #[error("Unsupported version: {0} (only version 8 is supported)")]
    UnsupportedVersion(i32),

    /// A header field holds a value no model can have
    #[error("Invalid header: {0}")]
    InvalidHeader(String),

    /// A section extends past the end of the buffer
    #[error("Truncated file: {section} needs {needed} bytes at offset {offset}, file is {len} bytes")]
    TruncatedFile {
        section: &'static str,
        offset: u64,
        needed: u64,
        len: u64,
    },

    /// Reference error: an index pointing outside its table
    #[error("Reference error: {0}")]
    InvalidReference(String),

    /// Frame index outside the frame table
    #[error("Frame {index} out of range: model has {count} frames")]
    FrameOutOfRange { index: usize, count: usize },
}

/// Result type using Md2Error
pub type Result<T> = std::result::Result<T, Md2Error>;
