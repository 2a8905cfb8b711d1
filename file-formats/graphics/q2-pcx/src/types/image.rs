use super::header::PcxHeader;
use super::palette::{ComponentOrder, Palette};
use custom_debug::Debug;
use q2_utils::debug;
use std::fmt;

/// Options controlling how palette indices are expanded into pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Channel order applied to every palette lookup
    pub component_order: ComponentOrder,
}

impl DecodeOptions {
    /// Options with a specific component order
    pub fn with_component_order(component_order: ComponentOrder) -> Self {
        Self { component_order }
    }
}

/// A decoded image ready for texture upload.
///
/// The pixel buffer holds `width * height` RGB triples, row-major, with the
/// bottom row of the picture first.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DecodedImage {
    width: u32,
    height: u32,
    #[debug(with = debug::trimmed_collection_fmt)]
    pixels: Vec<u8>,
}

impl DecodedImage {
    /// Allocate a black image
    pub(crate) fn black(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width as usize * height as usize * 3],
        }
    }

    /// Image width in pixels
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Image height in pixels
    pub fn height(&self) -> u32 {
        self.height
    }

    /// RGB bytes, bottom row first
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Take ownership of the RGB bytes
    pub fn into_pixels(self) -> Vec<u8> {
        self.pixels
    }

    /// RGB triple at `(x, y)` where `y = 0` is the bottom row of the buffer
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 3]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let at = (y as usize * self.width as usize + x as usize) * 3;
        Some([self.pixels[at], self.pixels[at + 1], self.pixels[at + 2]])
    }

    /// Mutable bytes of one buffer row (`row = 0` is the bottom row)
    pub(crate) fn row_mut(&mut self, row: usize) -> &mut [u8] {
        let stride = self.width as usize * 3;
        &mut self.pixels[row * stride..(row + 1) * stride]
    }
}

/// Non-fatal anomalies found while decoding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Warning {
    /// The byte before the trailing palette is not 0x0C
    PaletteMarkerMismatch {
        /// Byte found in place of the marker
        found: u8,
    },
    /// Header does not describe a single-plane 8-bit image
    UnexpectedLayout {
        /// Bits per pixel from the header
        bits_per_pixel: u8,
        /// Color planes from the header
        color_planes: u8,
    },
    /// Scanlines hold fewer values than the image is wide
    ShortScanline {
        /// Bytes per scanline from the header
        bytes_per_scanline: u16,
        /// Image width
        width: u32,
    },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::PaletteMarkerMismatch { found } => write!(
                f,
                "palette should be preceded by 0x0c, found {found:#04x}"
            ),
            Warning::UnexpectedLayout {
                bits_per_pixel,
                color_planes,
            } => write!(
                f,
                "expected 8 bits per pixel in 1 plane, got {bits_per_pixel} bits in {color_planes} planes"
            ),
            Warning::ShortScanline {
                bytes_per_scanline,
                width,
            } => write!(
                f,
                "scanline holds {bytes_per_scanline} values but image is {width} pixels wide"
            ),
        }
    }
}

/// Everything recovered from a PCX file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PcxFile {
    /// File header
    pub header: PcxHeader,
    /// Trailing 256-color palette
    pub palette: Palette,
    /// Decoded pixels
    pub image: DecodedImage,
    /// Anomalies that did not prevent decoding
    pub warnings: Vec<Warning>,
}
