//! Decoder for 8-bit palettized PCX images.
//!
//! Quake II stores model skins as ZSoft PCX files: a fixed 128-byte header,
//! a run-length encoded stream of palette indices and a trailing 256-color
//! palette. This crate expands such files into flat RGB buffers whose rows
//! are ordered bottom first, the layout texture uploads expect.
//!
//! # Examples
//!
//! ```no_run
//! use q2_pcx::parser::load_pcx;
//!
//! let pcx = load_pcx("models/players/male/grunt.pcx")?;
//! println!(
//!     "{}x{} pixels, {} warning(s)",
//!     pcx.image.width(),
//!     pcx.image.height(),
//!     pcx.warnings.len()
//! );
//! # Ok::<(), q2_pcx::parser::LoadError>(())
//! ```
//!
//! Decoding from memory with swapped red and blue channels:
//!
//! ```
//! use q2_pcx::parser::{decode_pcx, Error};
//! use q2_pcx::types::{ComponentOrder, DecodeOptions};
//!
//! let options = DecodeOptions::with_component_order(ComponentOrder::BGR);
//! assert!(matches!(decode_pcx(&[0u8; 16], &options), Err(Error::FileTooShort { .. })));
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

/// Export of decoded images through the `image` crate
#[cfg(feature = "image")]
pub mod convert;
/// PCX decoding
pub mod parser;
/// Types describing PCX files and decoded images
pub mod types;

pub use parser::{Error, LoadError, decode_pcx, load_pcx, parse_pcx};
pub use types::{ComponentOrder, DecodeOptions, DecodedImage, PcxFile, PcxHeader, Warning};
