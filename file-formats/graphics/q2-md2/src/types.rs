//! Records stored in the MD2 sections

use byteorder::{LittleEndian, ReadBytesExt};
use custom_debug::Debug;
use glam::{Vec2, Vec3};
use q2_utils::debug;
use std::io::Read;

use crate::error::Result;

/// Length of a skin name record
pub const SKIN_NAME_SIZE: usize = 64;
/// Length of a frame name
pub const FRAME_NAME_SIZE: usize = 16;
/// Size of a texture coordinate record
pub const TEX_COORD_SIZE: usize = 4;
/// Size of a triangle record
pub const TRIANGLE_SIZE: usize = 12;
/// Size of a compressed vertex record
pub const VERTEX_SIZE: usize = 4;

/// Decode a fixed-size, null-terminated name.
///
/// Every byte maps to exactly one `char` (Latin-1), so character counts match
/// the byte counts stored in the file.
fn fixed_name(bytes: &[u8]) -> String {
    let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
    bytes[..end].iter().copied().map(char::from).collect()
}

fn read_vec3<R: Read>(reader: &mut R) -> Result<Vec3> {
    Ok(Vec3::new(
        reader.read_f32::<LittleEndian>()?,
        reader.read_f32::<LittleEndian>()?,
        reader.read_f32::<LittleEndian>()?,
    ))
}

/// Name of an external skin image
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Skin {
    /// Path of the image, as stored in the model
    pub name: String,
}

impl Skin {
    /// Parse a 64-byte skin record
    pub fn parse<R: Read>(reader: &mut R) -> Result<Self> {
        let mut name = [0u8; SKIN_NAME_SIZE];
        reader.read_exact(&mut name)?;
        Ok(Self {
            name: fixed_name(&name),
        })
    }
}

/// Texture coordinate in raw texel units
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct TexCoord {
    pub s: i16,
    pub t: i16,
}

impl TexCoord {
    /// Parse a texture coordinate record
    pub fn parse<R: Read>(reader: &mut R) -> Result<Self> {
        Ok(Self {
            s: reader.read_i16::<LittleEndian>()?,
            t: reader.read_i16::<LittleEndian>()?,
        })
    }

    /// Normalize against the skin size. The t axis is flipped so that the
    /// bottom-first rows of a decoded skin line up.
    pub fn normalize(self, skin_width: u32, skin_height: u32) -> Vec2 {
        Vec2::new(
            f32::from(self.s) / skin_width as f32,
            1.0 - f32::from(self.t) / skin_height as f32,
        )
    }
}

/// Triangle referencing per-frame vertices and texture coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Triangle {
    /// Indices into each frame's vertex array
    pub vertex: [u16; 3],
    /// Indices into the texture coordinate table
    pub st: [u16; 3],
}

impl Triangle {
    /// Parse a triangle record
    pub fn parse<R: Read>(reader: &mut R) -> Result<Self> {
        let mut vertex = [0u16; 3];
        reader.read_u16_into::<LittleEndian>(&mut vertex)?;
        let mut st = [0u16; 3];
        reader.read_u16_into::<LittleEndian>(&mut st)?;
        Ok(Self { vertex, st })
    }
}

/// Compressed vertex position with its normal index
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct RawVertex {
    pub position: [u8; 3],
    /// Index into the precomputed normal table (unused)
    pub normal_index: u8,
}

impl RawVertex {
    /// Parse a compressed vertex record
    pub fn parse<R: Read>(reader: &mut R) -> Result<Self> {
        let mut record = [0u8; VERTEX_SIZE];
        reader.read_exact(&mut record)?;
        Ok(Self {
            position: [record[0], record[1], record[2]],
            normal_index: record[3],
        })
    }
}

/// One keyframe of the model
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub scale: Vec3,
    pub translate: Vec3,
    /// Frame name, such as `run3` or `pain204`
    pub name: String,
    #[debug(with = debug::trimmed_collection_fmt)]
    pub vertices: Vec<RawVertex>,
}

impl Frame {
    /// Parse a frame record holding `num_vertices` vertices
    pub fn parse<R: Read>(reader: &mut R, num_vertices: usize) -> Result<Self> {
        let scale = read_vec3(reader)?;
        let translate = read_vec3(reader)?;

        let mut name = [0u8; FRAME_NAME_SIZE];
        reader.read_exact(&mut name)?;

        let vertices = (0..num_vertices)
            .map(|_| RawVertex::parse(reader))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            scale,
            translate,
            name: fixed_name(&name),
            vertices,
        })
    }

    /// Decompress a raw vertex with this frame's scale and translation
    pub fn decompress_vertex(&self, vertex: &RawVertex) -> Vec3 {
        let [x, y, z] = vertex.position;
        self.scale * Vec3::new(f32::from(x), f32::from(y), f32::from(z)) + self.translate
    }

    /// Decompressed position of vertex `index`
    pub fn decompress(&self, index: usize) -> Option<Vec3> {
        self.vertices.get(index).map(|v| self.decompress_vertex(v))
    }

    /// All decompressed positions in vertex order
    pub fn positions(&self) -> Vec<Vec3> {
        self.vertices
            .iter()
            .map(|v| self.decompress_vertex(v))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_fixed_name() {
        assert_eq!(fixed_name(b"stand01\0garbage"), "stand01");
        assert_eq!(fixed_name(b"nonterminated"), "nonterminated");
        assert_eq!(fixed_name(b"\0"), "");
    }

    #[test]
    fn test_fixed_name_keeps_one_char_per_byte() {
        let name = fixed_name(b"run1\xFF2\0");
        assert_eq!(name, "run1\u{ff}2");
        assert_eq!(name.chars().count(), 6);
    }

    #[test]
    fn test_parse_skin() {
        let mut record = [0u8; SKIN_NAME_SIZE];
        record[..19].copy_from_slice(b"players/male/grunt.");
        let skin = Skin::parse(&mut Cursor::new(record)).unwrap();
        assert_eq!(skin.name, "players/male/grunt.");
    }

    #[test]
    fn test_parse_triangle() {
        let data: Vec<u8> = [0u16, 1, 2, 5, 4, 3]
            .iter()
            .flat_map(|v| v.to_le_bytes())
            .collect();
        let triangle = Triangle::parse(&mut Cursor::new(data)).unwrap();
        assert_eq!(triangle.vertex, [0, 1, 2]);
        assert_eq!(triangle.st, [5, 4, 3]);
    }

    #[test]
    fn test_tex_coord_normalize() {
        let uv = TexCoord { s: 64, t: 32 }.normalize(256, 128);
        assert_eq!(uv, Vec2::new(0.25, 0.75));

        let origin = TexCoord::default().normalize(256, 128);
        assert_eq!(origin, Vec2::new(0.0, 1.0));
    }

    #[test]
    fn test_parse_frame_and_decompress() {
        let mut data = Vec::new();
        for f in [2.0f32, 1.0, 0.5, 10.0, 0.0, -4.0] {
            data.extend_from_slice(&f.to_le_bytes());
        }
        let mut name = [0u8; FRAME_NAME_SIZE];
        name[..6].copy_from_slice(b"stand1");
        data.extend_from_slice(&name);
        data.extend_from_slice(&[1, 2, 4, 7, 0, 0, 0, 0]);

        let frame = Frame::parse(&mut Cursor::new(data), 2).unwrap();
        assert_eq!(frame.name, "stand1");
        assert_eq!(frame.vertices.len(), 2);
        assert_eq!(frame.vertices[0].normal_index, 7);

        assert_eq!(frame.decompress(0), Some(Vec3::new(12.0, 2.0, -2.0)));
        assert_eq!(frame.decompress(1), Some(Vec3::new(10.0, 0.0, -4.0)));
        assert_eq!(frame.decompress(2), None);
        assert_eq!(frame.positions().len(), 2);
    }
}
