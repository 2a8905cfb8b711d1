use super::error::Error;
use super::reader::{ByteReader, Cursor, Eof};
use super::types::ParseResult;
use crate::types::*;
use log::*;

/// Parse the fixed 128-byte header and validate the manufacturer tag.
pub fn parse_header(input: &[u8]) -> ParseResult<PcxHeader> {
    let too_short = |_: Eof| Error::FileTooShort {
        len: input.len(),
        required: PCX_HEADER_SIZE,
    };
    let mut reader = Cursor::new(input);

    let manufacturer = reader.read_u8().map_err(too_short)?;
    if manufacturer != PCX_MAGIC {
        return Err(Error::BadMagic(manufacturer));
    }

    let version = reader.read_u8().map_err(too_short)?;
    let encoding = reader.read_u8().map_err(too_short)?;
    let bits_per_pixel = reader.read_u8().map_err(too_short)?;
    let xmin = reader.read_u16_le().map_err(too_short)?;
    let ymin = reader.read_u16_le().map_err(too_short)?;
    let xmax = reader.read_u16_le().map_err(too_short)?;
    let ymax = reader.read_u16_le().map_err(too_short)?;
    let horz_res = reader.read_u16_le().map_err(too_short)?;
    let vert_res = reader.read_u16_le().map_err(too_short)?;

    let mut ega_palette = [0u8; 48];
    reader.read_into(&mut ega_palette).map_err(too_short)?;

    let reserved = reader.read_u8().map_err(too_short)?;
    let color_planes = reader.read_u8().map_err(too_short)?;
    let bytes_per_scanline = reader.read_u16_le().map_err(too_short)?;
    let palette_type = reader.read_u16_le().map_err(too_short)?;
    let horz_size = reader.read_u16_le().map_err(too_short)?;
    let vert_size = reader.read_u16_le().map_err(too_short)?;

    // 54 bytes of filler close the block
    reader.skip(54).map_err(too_short)?;

    if encoding != 1 {
        debug!("PCX encoding field is {encoding}, decoding as RLE anyway");
    }
    trace!(
        "PCX header: version {version}, window ({xmin}, {ymin})-({xmax}, {ymax}), {bytes_per_scanline} bytes per scanline"
    );

    Ok(PcxHeader {
        manufacturer,
        version,
        encoding,
        bits_per_pixel,
        xmin,
        ymin,
        xmax,
        ymax,
        horz_res,
        vert_res,
        ega_palette,
        reserved,
        color_planes,
        bytes_per_scanline,
        palette_type,
        horz_size,
        vert_size,
    })
}
