/// Error types for PCX parsing operations
pub mod error;
mod header;
/// Native byte reading utilities
mod reader;
/// Scanline run-length decoding
pub mod rle;
/// Type definitions used by the PCX parser
pub mod types;

use super::types::*;
pub use error::{Error, LoadError};
use header::parse_header;
use log::*;
use rle::{decode_scanlines, max_decoded_len};
use std::path::Path;
use types::ParseResult;

/// Read a PCX file from the file system and decode it with default options.
pub fn load_pcx<Q>(path: Q) -> Result<PcxFile, LoadError>
where
    Q: AsRef<Path>,
{
    let input =
        std::fs::read(&path).map_err(|e| LoadError::FileSystem(path.as_ref().to_owned(), e))?;
    parse_pcx(&input, &DecodeOptions::default())
        .map_err(|e| LoadError::Parsing(path.as_ref().to_owned(), e))
}

/// Decode a PCX file held in memory into an RGB buffer.
///
/// Warnings are logged and otherwise dropped; use [`parse_pcx`] to inspect
/// them.
pub fn decode_pcx(input: &[u8], options: &DecodeOptions) -> ParseResult<DecodedImage> {
    parse_pcx(input, options).map(|pcx| pcx.image)
}

/// Decode a PCX file held in memory, keeping header, palette and warnings.
pub fn parse_pcx(input: &[u8], options: &DecodeOptions) -> ParseResult<PcxFile> {
    let required = PCX_HEADER_SIZE + PALETTE_SIZE;
    if input.len() < required {
        return Err(Error::FileTooShort {
            len: input.len(),
            required,
        });
    }

    let header = parse_header(input)?;
    let mut warnings = Vec::new();

    let (width, height) = match (u32::try_from(header.width()), u32::try_from(header.height())) {
        (Ok(w), Ok(h)) if w > 0 && h > 0 => (w, h),
        _ => {
            return Err(Error::InvalidDimensions {
                xmin: header.xmin,
                ymin: header.ymin,
                xmax: header.xmax,
                ymax: header.ymax,
            });
        }
    };

    if !header.is_palettized() {
        warnings.push(Warning::UnexpectedLayout {
            bits_per_pixel: header.bits_per_pixel,
            color_planes: header.color_planes,
        });
    }
    if u32::from(header.bytes_per_scanline) < width {
        warnings.push(Warning::ShortScanline {
            bytes_per_scanline: header.bytes_per_scanline,
            width,
        });
    }

    // The palette is positional: always the last 768 bytes
    let palette_start = input.len() - PALETTE_SIZE;
    let palette = Palette::from_slice(&input[palette_start..]).ok_or(Error::FileTooShort {
        len: input.len(),
        required,
    })?;

    let marker = input[palette_start - 1];
    if marker != PCX_PALETTE_MARKER {
        warnings.push(Warning::PaletteMarkerMismatch { found: marker });
    }

    for warning in &warnings {
        warn!("PCX: {warning}");
    }

    // Reject windows the stream cannot possibly fill before allocating them
    let stream = &input[PCX_HEADER_SIZE..palette_start];
    let bytes_per_scanline = usize::from(header.bytes_per_scanline);
    let available = max_decoded_len(stream.len());
    let row_cost = bytes_per_scanline.max(1);
    if (height as usize).saturating_mul(row_cost) > available {
        return Err(Error::TruncatedFile {
            offset: palette_start,
            scanline: available / row_cost,
        });
    }

    let mut image = DecodedImage::black(width, height);
    decode_scanlines(
        stream,
        PCX_HEADER_SIZE,
        bytes_per_scanline,
        &palette,
        options.component_order,
        &mut image,
    )?;

    debug!(
        "Decoded {width}x{height} PCX image with {} warning(s)",
        warnings.len()
    );

    Ok(PcxFile {
        header,
        palette,
        image,
        warnings,
    })
}
