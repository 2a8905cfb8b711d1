//! Keyframe interpolation between two MD2 frames

use glam::{Vec2, Vec3};

use crate::error::Result;
use crate::model::Md2Model;

/// One triangle corner of an interpolated pose
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PoseVertex {
    pub position: Vec3,
    pub tex_coord: Vec2,
}

/// Interpolate between two frames
///
/// # Arguments
/// * `model` - Model owning the frames
/// * `frame_a` - Frame reproduced at `t = 0`
/// * `frame_b` - Frame reproduced at `t = 1`
/// * `t` - Blend factor, not clamped
/// * `scale` - Uniform scale applied to the blended positions
///
/// Returns one vertex per triangle corner, three per triangle, in triangle
/// order.
pub fn interpolate(
    model: &Md2Model,
    frame_a: usize,
    frame_b: usize,
    t: f32,
    scale: f32,
) -> Result<Vec<PoseVertex>> {
    let mut pose = Vec::with_capacity(model.triangles().len() * 3);
    interpolate_into(model, frame_a, frame_b, t, scale, &mut pose)?;
    Ok(pose)
}

/// Same as [`interpolate`], writing into a caller-owned buffer.
///
/// The buffer is cleared first; on error it is left empty.
pub fn interpolate_into(
    model: &Md2Model,
    frame_a: usize,
    frame_b: usize,
    t: f32,
    scale: f32,
    pose: &mut Vec<PoseVertex>,
) -> Result<()> {
    pose.clear();

    let a = model.frame(frame_a)?;
    let b = model.frame(frame_b)?;
    let header = model.header();
    let tex_coords = model.tex_coords();

    // Triangle indices are validated against the vertex and texture
    // coordinate counts when the model is parsed
    for triangle in model.triangles() {
        for (&vertex, &st) in triangle.vertex.iter().zip(&triangle.st) {
            let vertex = usize::from(vertex);
            let pos_a = a.decompress_vertex(&a.vertices[vertex]);
            let pos_b = b.decompress_vertex(&b.vertices[vertex]);

            pose.push(PoseVertex {
                position: pos_a.lerp(pos_b, t) * scale,
                tex_coord: tex_coords[usize::from(st)]
                    .normalize(header.skin_width, header.skin_height),
            });
        }
    }

    Ok(())
}
