pub use super::error::Error;

/// Result type for PCX parsing operations
pub type ParseResult<T> = Result<T, Error>;
