use super::error::Error;
use super::reader::{ByteReader, Cursor, ReadResult};
use super::types::ParseResult;
use crate::types::*;
use log::*;

/// Bytes at or above this value start a run
pub const RLE_RUN_FLAG: u8 = 0xC0;
/// Low bits of a run byte holding the repeat count
pub const RLE_COUNT_MASK: u8 = 0x3F;

/// Upper bound on the palette indices `stream_len` bytes can expand to.
///
/// A two byte run yields at most 63 indices, a literal byte yields one.
pub fn max_decoded_len(stream_len: usize) -> usize {
    stream_len.saturating_mul(usize::from(RLE_COUNT_MASK)) / 2
}

/// Expands the RLE byte stream into palette indices.
///
/// Run state survives between scanlines, so a run spilling over the end of
/// one scanline continues on the next.
pub struct RleStream<'a> {
    reader: Cursor<'a>,
    run_count: u8,
    run_value: u8,
}

impl<'a> RleStream<'a> {
    /// Start reading runs at the beginning of `data`
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            reader: Cursor::new(data),
            run_count: 0,
            run_value: 0,
        }
    }

    /// Bytes consumed so far
    pub fn position(&self) -> usize {
        self.reader.position()
    }

    /// Next decoded palette index
    pub fn next_index(&mut self) -> ReadResult<u8> {
        while self.run_count == 0 {
            let byte = self.reader.read_u8()?;
            if byte >= RLE_RUN_FLAG {
                self.run_count = byte & RLE_COUNT_MASK;
                self.run_value = self.reader.read_u8()?;
                if self.run_count == 0 {
                    debug!(
                        "Zero-length run at stream offset {}",
                        self.reader.position() - 2
                    );
                }
            } else {
                self.run_count = 1;
                self.run_value = byte;
            }
        }

        self.run_count -= 1;
        Ok(self.run_value)
    }
}

/// Decode every scanline of `stream` into `image`.
///
/// Scanlines are stored top first and written bottom first. Each one consumes
/// `bytes_per_scanline` indices; values past the image width are read and
/// dropped. `stream_offset` is the file offset of `stream[0]` and is only used
/// for error reporting.
pub fn decode_scanlines(
    stream: &[u8],
    stream_offset: usize,
    bytes_per_scanline: usize,
    palette: &Palette,
    order: ComponentOrder,
    image: &mut DecodedImage,
) -> ParseResult<()> {
    let width = image.width() as usize;
    let height = image.height() as usize;
    let mut runs = RleStream::new(stream);

    for scanline in 0..height {
        let row = image.row_mut(height - 1 - scanline);

        for x in 0..bytes_per_scanline {
            let index = runs.next_index().map_err(|eof| Error::TruncatedFile {
                offset: stream_offset + eof.position,
                scanline,
            })?;

            if x < width {
                row[x * 3..x * 3 + 3].copy_from_slice(&palette.color(index, order));
            }
        }
    }

    trace!(
        "Decoded {height} scanlines from {} of {} stream bytes",
        runs.position(),
        stream.len()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn indices(data: &[u8], n: usize) -> ReadResult<Vec<u8>> {
        let mut runs = RleStream::new(data);
        (0..n).map(|_| runs.next_index()).collect()
    }

    #[test]
    fn test_max_decoded_len_bounds_longest_runs() {
        assert_eq!(max_decoded_len(0), 0);
        assert_eq!(max_decoded_len(1), 31);
        assert_eq!(max_decoded_len(2), 63);

        let stream = [0xFF, 0x01].repeat(4);
        let decoded = indices(&stream, max_decoded_len(stream.len())).unwrap();
        assert_eq!(decoded.len(), 252);
    }

    #[test]
    fn test_run_repeats_value() {
        assert_eq!(indices(&[0xC3, 0x05], 3), Ok(vec![5, 5, 5]));
    }

    #[test]
    fn test_literal_byte() {
        assert_eq!(indices(&[0x07], 1), Ok(vec![7]));
        assert_eq!(indices(&[0xBF, 0x00], 2), Ok(vec![0xBF, 0x00]));
    }

    #[test]
    fn test_run_of_run_flag_values() {
        // A palette index >= 0xC0 can only be stored as a run of one
        assert_eq!(indices(&[0xC1, 0xC8, 0x01], 2), Ok(vec![0xC8, 0x01]));
    }

    #[test]
    fn test_zero_length_run_is_skipped() {
        assert_eq!(indices(&[0xC0, 0x09, 0x02], 1), Ok(vec![2]));
    }

    #[test]
    fn test_exhausted_stream() {
        let mut runs = RleStream::new(&[0xC2, 0x01]);
        assert_eq!(runs.next_index(), Ok(1));
        assert_eq!(runs.next_index(), Ok(1));
        assert!(runs.next_index().is_err());

        // Run byte without its value
        assert!(indices(&[0xC4], 1).is_err());
    }

    #[test]
    fn test_scanlines_are_mirrored_and_padding_dropped() {
        let mut entries = [0u8; PALETTE_SIZE];
        entries[3..6].copy_from_slice(&[1, 1, 1]);
        entries[6..9].copy_from_slice(&[2, 2, 2]);
        let palette = Palette::new(entries);

        // 2x2 image, 3 values per scanline: top row is index 1, bottom row index 2
        let stream = [0xC3, 0x01, 0xC2, 0x02, 0x09];
        let mut image = DecodedImage::black(2, 2);
        decode_scanlines(&stream, 128, 3, &palette, ComponentOrder::RGB, &mut image).unwrap();

        assert_eq!(image.pixels(), &[2, 2, 2, 2, 2, 2, 1, 1, 1, 1, 1, 1]);
    }

    #[test]
    fn test_truncated_stream_reports_offset() {
        let palette = Palette::new([0; PALETTE_SIZE]);
        let mut image = DecodedImage::black(4, 2);
        let err = decode_scanlines(&[0xC4, 0x00, 0x01], 128, 4, &palette, ComponentOrder::RGB, &mut image)
            .unwrap_err();
        assert_eq!(
            err,
            Error::TruncatedFile {
                offset: 131,
                scanline: 1
            }
        );
    }
}
