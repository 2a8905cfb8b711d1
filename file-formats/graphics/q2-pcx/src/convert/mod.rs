//! Conversion of decoded PCX images into `image` crate buffers.

/// Error types for conversion operations
pub mod error;

pub use error::Error;

use crate::types::DecodedImage;
use ::image::{RgbImage, imageops};
use std::path::Path;

/// Row order of the produced image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowOrder {
    /// Keep the decoder's bottom-first order (texture upload order)
    BottomUp,
    /// Restore the on-disk top-first order (viewing order)
    TopDown,
}

/// Convert a decoded image into an [`RgbImage`].
pub fn to_rgb_image(image: &DecodedImage, order: RowOrder) -> Result<RgbImage, Error> {
    let buffer = RgbImage::from_raw(image.width(), image.height(), image.pixels().to_vec())
        .ok_or_else(|| Error::MismatchSizes(image.width(), image.height(), image.pixels().len()))?;

    Ok(match order {
        RowOrder::BottomUp => buffer,
        RowOrder::TopDown => imageops::flip_vertical(&buffer),
    })
}

/// Save a decoded image in top-first order. The output format is chosen
/// from the file extension.
pub fn save_image<Q: AsRef<Path>>(image: &DecodedImage, path: Q) -> Result<(), Error> {
    to_rgb_image(image, RowOrder::TopDown)?.save(path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_pcx;
    use crate::types::DecodeOptions;

    /// 1x2 image: top pixel palette index 1, bottom pixel index 2
    fn two_row_pcx() -> Vec<u8> {
        let mut bytes = vec![0u8; 128];
        bytes[0] = 0x0A;
        bytes[2] = 1;
        bytes[3] = 8;
        bytes[10..12].copy_from_slice(&1u16.to_le_bytes());
        bytes[65] = 1;
        bytes[66..68].copy_from_slice(&1u16.to_le_bytes());
        bytes.extend([0x01, 0x02, 0x0C]);
        let mut palette = [0u8; 768];
        palette[3..6].copy_from_slice(&[255, 0, 0]);
        palette[6..9].copy_from_slice(&[0, 0, 255]);
        bytes.extend(palette);
        bytes
    }

    #[test]
    fn test_row_order() {
        let pcx = parse_pcx(&two_row_pcx(), &DecodeOptions::default()).unwrap();

        let bottom_up = to_rgb_image(&pcx.image, RowOrder::BottomUp).unwrap();
        assert_eq!(bottom_up.get_pixel(0, 0).0, [0, 0, 255]);
        assert_eq!(bottom_up.get_pixel(0, 1).0, [255, 0, 0]);

        let top_down = to_rgb_image(&pcx.image, RowOrder::TopDown).unwrap();
        assert_eq!(top_down.get_pixel(0, 0).0, [255, 0, 0]);
        assert_eq!(top_down.get_pixel(0, 1).0, [0, 0, 255]);
    }
}
