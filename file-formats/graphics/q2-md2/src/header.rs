use byteorder::{LittleEndian, ReadBytesExt};
use log::warn;
use std::io::Read;

use crate::error::{Md2Error, Result};

/// Magic signature for MD2 files ("IDP2")
pub const MD2_MAGIC: [u8; 4] = *b"IDP2";

/// The only MD2 version in existence
pub const MD2_VERSION: i32 = 8;

/// Size of the header: 17 little-endian 32-bit integers
pub const MD2_HEADER_SIZE: usize = 68;

/// Fixed part of a frame record: scale, translate and name
pub const FRAME_HEADER_SIZE: usize = 40;

/// MD2 model header structure
///
/// Counts and offsets are validated to be non-negative while parsing, so they
/// are stored unsigned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Md2Header {
    /// Magic signature ("IDP2")
    pub magic: [u8; 4],
    /// Format version, always 8
    pub version: i32,
    /// Skin width in texels
    pub skin_width: u32,
    /// Skin height in texels
    pub skin_height: u32,
    /// Size in bytes of one frame record as declared by the file
    pub frame_size: i32,

    /// Number of skins
    pub num_skins: u32,
    /// Number of vertices per frame
    pub num_vertices: u32,
    /// Number of texture coordinates
    pub num_st: u32,
    /// Number of triangles
    pub num_tris: u32,
    /// Number of GL command words (not loaded)
    pub num_glcmds: u32,
    /// Number of frames
    pub num_frames: u32,

    /// Offset of the skin names
    pub offset_skins: u32,
    /// Offset of the texture coordinates
    pub offset_st: u32,
    /// Offset of the triangles
    pub offset_tris: u32,
    /// Offset of the first frame
    pub offset_frames: u32,
    /// Offset of the GL commands
    pub offset_glcmds: u32,
    /// Declared end of file
    pub offset_end: u32,
}

impl Md2Header {
    /// Parse the header from the start of a reader
    pub fn parse<R: Read>(reader: &mut R) -> Result<Self> {
        let mut magic = [0u8; 4];
        reader.read_exact(&mut magic)?;

        if magic != MD2_MAGIC {
            return Err(Md2Error::BadMagic {
                expected: String::from_utf8_lossy(&MD2_MAGIC).to_string(),
                actual: String::from_utf8_lossy(&magic).to_string(),
            });
        }

        let version = reader.read_i32::<LittleEndian>()?;
        if version != MD2_VERSION {
            return Err(Md2Error::UnsupportedVersion(version));
        }

        let skin_width = reader.read_i32::<LittleEndian>()?;
        let skin_height = reader.read_i32::<LittleEndian>()?;
        if skin_width <= 0 || skin_height <= 0 {
            return Err(Md2Error::InvalidHeader(format!(
                "skin dimensions must be positive, got {skin_width}x{skin_height}"
            )));
        }

        let frame_size = reader.read_i32::<LittleEndian>()?;

        let mut field = |name: &str| -> Result<u32> {
            let value = reader.read_i32::<LittleEndian>()?;
            u32::try_from(value)
                .map_err(|_| Md2Error::InvalidHeader(format!("{name} is negative ({value})")))
        };

        let num_skins = field("num_skins")?;
        let num_vertices = field("num_vertices")?;
        let num_st = field("num_st")?;
        let num_tris = field("num_tris")?;
        let num_glcmds = field("num_glcmds")?;
        let num_frames = field("num_frames")?;
        let offset_skins = field("offset_skins")?;
        let offset_st = field("offset_st")?;
        let offset_tris = field("offset_tris")?;
        let offset_frames = field("offset_frames")?;
        let offset_glcmds = field("offset_glcmds")?;
        let offset_end = field("offset_end")?;

        let header = Self {
            magic,
            version,
            skin_width: skin_width as u32,
            skin_height: skin_height as u32,
            frame_size,
            num_skins,
            num_vertices,
            num_st,
            num_tris,
            num_glcmds,
            num_frames,
            offset_skins,
            offset_st,
            offset_tris,
            offset_frames,
            offset_glcmds,
            offset_end,
        };

        let expected = header.frame_record_size();
        if i64::from(frame_size) != expected as i64 {
            warn!("MD2 framesize is {frame_size}, frames are read as {expected} bytes");
        }

        Ok(header)
    }

    /// Size of one frame record derived from the vertex count
    pub fn frame_record_size(&self) -> u64 {
        FRAME_HEADER_SIZE as u64 + 4 * u64::from(self.num_vertices)
    }
}
