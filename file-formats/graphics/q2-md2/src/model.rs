use log::{debug, trace};
use std::fs::File;
use std::io::{BufReader, Cursor, Read, Seek, SeekFrom};
use std::path::Path;

use crate::animation::{AnimClips, build_clips};
use crate::error::{Md2Error, Result};
use crate::header::{MD2_HEADER_SIZE, Md2Header};
use crate::types::{
    Frame, SKIN_NAME_SIZE, Skin, TEX_COORD_SIZE, TRIANGLE_SIZE, TexCoord, Triangle,
};

/// A parsed MD2 model.
///
/// Frames keep their compressed vertices; positions are decompressed on
/// demand. The clip table is derived from the frame names while parsing and
/// never changes afterwards.
#[derive(Debug, Clone)]
pub struct Md2Model {
    header: Md2Header,
    skins: Vec<Skin>,
    tex_coords: Vec<TexCoord>,
    triangles: Vec<Triangle>,
    frames: Vec<Frame>,
    clips: AnimClips,
}

/// Seek to a section after checking that it fits in the file
fn seek_section<R: Seek>(
    reader: &mut R,
    len: u64,
    section: &'static str,
    offset: u32,
    count: u32,
    record_size: u64,
) -> Result<()> {
    let offset = u64::from(offset);
    // Counts near i32::MAX can overflow the section size
    let needed = u64::from(count).saturating_mul(record_size);
    if offset.checked_add(needed).is_none_or(|end| end > len) {
        return Err(Md2Error::TruncatedFile {
            section,
            offset,
            needed,
            len,
        });
    }

    trace!("MD2 {section}: {count} records at offset {offset}");
    reader.seek(SeekFrom::Start(offset))?;
    Ok(())
}

fn read_records<R, T, F>(reader: &mut R, count: u32, mut parse: F) -> Result<Vec<T>>
where
    R: Read,
    F: FnMut(&mut R) -> Result<T>,
{
    (0..count).map(|_| parse(reader)).collect()
}

impl Md2Model {
    /// Parse a model from a seekable reader positioned anywhere
    pub fn parse<R: Read + Seek>(reader: &mut R) -> Result<Self> {
        let len = reader.seek(SeekFrom::End(0))?;
        if len < MD2_HEADER_SIZE as u64 {
            return Err(Md2Error::TruncatedFile {
                section: "header",
                offset: 0,
                needed: MD2_HEADER_SIZE as u64,
                len,
            });
        }

        reader.seek(SeekFrom::Start(0))?;
        let header = Md2Header::parse(reader)?;

        seek_section(
            reader,
            len,
            "skins",
            header.offset_skins,
            header.num_skins,
            SKIN_NAME_SIZE as u64,
        )?;
        let skins = read_records(reader, header.num_skins, Skin::parse)?;

        seek_section(
            reader,
            len,
            "texture coordinates",
            header.offset_st,
            header.num_st,
            TEX_COORD_SIZE as u64,
        )?;
        let tex_coords = read_records(reader, header.num_st, TexCoord::parse)?;

        seek_section(
            reader,
            len,
            "triangles",
            header.offset_tris,
            header.num_tris,
            TRIANGLE_SIZE as u64,
        )?;
        let triangles = read_records(reader, header.num_tris, Triangle::parse)?;

        seek_section(
            reader,
            len,
            "frames",
            header.offset_frames,
            header.num_frames,
            header.frame_record_size(),
        )?;
        let num_vertices = header.num_vertices as usize;
        let frames = read_records(reader, header.num_frames, |r| Frame::parse(r, num_vertices))?;

        validate_triangles(&triangles, header.num_vertices, header.num_st)?;

        let clips = build_clips(frames.iter().map(|frame| frame.name.as_str()));

        debug!(
            "Parsed MD2 model: {} skins, {} vertices, {} triangles, {} frames, {} clips",
            skins.len(),
            header.num_vertices,
            triangles.len(),
            frames.len(),
            clips.len()
        );

        Ok(Self {
            header,
            skins,
            tex_coords,
            triangles,
            frames,
            clips,
        })
    }

    /// Parse a model held in memory
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::parse(&mut Cursor::new(data))
    }

    /// Load a model from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Self::parse(&mut BufReader::new(file))
    }

    pub fn header(&self) -> &Md2Header {
        &self.header
    }

    pub fn skins(&self) -> &[Skin] {
        &self.skins
    }

    pub fn tex_coords(&self) -> &[TexCoord] {
        &self.tex_coords
    }

    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// Clip table derived from the frame names
    pub fn clips(&self) -> &AnimClips {
        &self.clips
    }

    /// Frame by index
    pub fn frame(&self, index: usize) -> Result<&Frame> {
        self.frames.get(index).ok_or(Md2Error::FrameOutOfRange {
            index,
            count: self.frames.len(),
        })
    }

    pub fn num_vertices(&self) -> usize {
        self.header.num_vertices as usize
    }

    /// Normalized texture coordinate `index`
    pub fn tex_coord_uv(&self, index: usize) -> Option<glam::Vec2> {
        self.tex_coords
            .get(index)
            .map(|st| st.normalize(self.header.skin_width, self.header.skin_height))
    }
}

fn validate_triangles(triangles: &[Triangle], num_vertices: u32, num_st: u32) -> Result<()> {
    for (index, triangle) in triangles.iter().enumerate() {
        if let Some(vertex) = triangle
            .vertex
            .iter()
            .find(|&&v| u32::from(v) >= num_vertices)
        {
            return Err(Md2Error::InvalidReference(format!(
                "triangle {index} uses vertex {vertex}, model has {num_vertices} vertices"
            )));
        }
        if let Some(st) = triangle.st.iter().find(|&&st| u32::from(st) >= num_st) {
            return Err(Md2Error::InvalidReference(format!(
                "triangle {index} uses texture coordinate {st}, model has {num_st}"
            )));
        }
    }
    Ok(())
}
