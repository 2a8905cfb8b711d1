//! In-memory MD2 fixtures

#![allow(dead_code)]

/// Header field positions, counted in 32-bit words after the magic
pub mod field {
    pub const VERSION: usize = 0;
    pub const SKIN_HEIGHT: usize = 2;
    pub const FRAME_SIZE: usize = 3;
    pub const NUM_VERTICES: usize = 5;
    pub const NUM_FRAMES: usize = 9;
    pub const OFFSET_SKINS: usize = 10;
    pub const OFFSET_FRAMES: usize = 13;
}

pub struct FrameSpec {
    pub name: String,
    pub scale: [f32; 3],
    pub translate: [f32; 3],
    pub vertices: Vec<[u8; 3]>,
}

/// Builds MD2 files with sections laid out back to back
pub struct Md2Builder {
    skin_width: i32,
    skin_height: i32,
    skins: Vec<String>,
    tex_coords: Vec<[i16; 2]>,
    triangles: Vec<([u16; 3], [u16; 3])>,
    num_vertices: usize,
    frames: Vec<FrameSpec>,
}

impl Md2Builder {
    pub fn new(num_vertices: usize) -> Self {
        Self {
            skin_width: 256,
            skin_height: 128,
            skins: Vec::new(),
            tex_coords: Vec::new(),
            triangles: Vec::new(),
            num_vertices,
            frames: Vec::new(),
        }
    }

    pub fn skin(mut self, name: &str) -> Self {
        self.skins.push(name.to_string());
        self
    }

    pub fn tex_coord(mut self, s: i16, t: i16) -> Self {
        self.tex_coords.push([s, t]);
        self
    }

    pub fn triangle(mut self, vertex: [u16; 3], st: [u16; 3]) -> Self {
        self.triangles.push((vertex, st));
        self
    }

    pub fn frame(
        mut self,
        name: &str,
        scale: [f32; 3],
        translate: [f32; 3],
        vertices: &[[u8; 3]],
    ) -> Self {
        assert_eq!(vertices.len(), self.num_vertices);
        self.frames.push(FrameSpec {
            name: name.to_string(),
            scale,
            translate,
            vertices: vertices.to_vec(),
        });
        self
    }

    /// Add frames with unit scale whose vertices all sit at `index`
    pub fn named_frames(mut self, names: &[&str]) -> Self {
        for (index, name) in names.iter().enumerate() {
            let vertices = vec![[index as u8; 3]; self.num_vertices];
            self = self.frame(name, [1.0; 3], [0.0; 3], &vertices);
        }
        self
    }

    pub fn build(&self) -> Vec<u8> {
        let frame_size = 40 + 4 * self.num_vertices;
        let offset_skins = 68;
        let offset_st = offset_skins + 64 * self.skins.len();
        let offset_tris = offset_st + 4 * self.tex_coords.len();
        let offset_frames = offset_tris + 12 * self.triangles.len();
        let offset_end = offset_frames + frame_size * self.frames.len();

        let mut data = b"IDP2".to_vec();
        for value in [
            8,
            self.skin_width,
            self.skin_height,
            frame_size as i32,
            self.skins.len() as i32,
            self.num_vertices as i32,
            self.tex_coords.len() as i32,
            self.triangles.len() as i32,
            0,
            self.frames.len() as i32,
            offset_skins as i32,
            offset_st as i32,
            offset_tris as i32,
            offset_frames as i32,
            offset_end as i32,
            offset_end as i32,
        ] {
            data.extend_from_slice(&value.to_le_bytes());
        }

        for skin in &self.skins {
            let mut record = [0u8; 64];
            record[..skin.len()].copy_from_slice(skin.as_bytes());
            data.extend_from_slice(&record);
        }
        for st in &self.tex_coords {
            data.extend_from_slice(&st[0].to_le_bytes());
            data.extend_from_slice(&st[1].to_le_bytes());
        }
        for (vertex, st) in &self.triangles {
            for index in vertex.iter().chain(st) {
                data.extend_from_slice(&index.to_le_bytes());
            }
        }
        for frame in &self.frames {
            for value in frame.scale.iter().chain(&frame.translate) {
                data.extend_from_slice(&value.to_le_bytes());
            }
            let mut name = [0u8; 16];
            name[..frame.name.len()].copy_from_slice(frame.name.as_bytes());
            data.extend_from_slice(&name);
            for position in &frame.vertices {
                data.extend_from_slice(position);
                data.push(0);
            }
        }

        assert_eq!(data.len(), offset_end);
        data
    }
}

/// Overwrite a header field of a built model
pub fn set_field(data: &mut [u8], field: usize, value: i32) {
    let at = 4 + field * 4;
    data[at..at + 4].copy_from_slice(&value.to_le_bytes());
}

/// One triangle over three vertices, frames named after the clip scenario
pub fn stand_run_model() -> Vec<u8> {
    Md2Builder::new(3)
        .skin("players/male/grunt.pcx")
        .tex_coord(0, 0)
        .tex_coord(128, 64)
        .tex_coord(256, 128)
        .triangle([0, 1, 2], [0, 1, 2])
        .named_frames(&["stand1", "stand2", "stand10", "run1", "run2"])
        .build()
}
