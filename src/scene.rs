//! Reference meshes, all triangle lists.

use crate::{buffer::VertexBuffer, vertex::Vertex};

/// Half height of [`textured_quad`], which spans the full width of clip space.
pub const QUAD_HALF_HEIGHT: f32 = 0.67;

pub fn triangle() -> VertexBuffer {
    VertexBuffer::from_pairs([
        ([-0.5, -0.5, 0.0], [0.0, 0.0]),
        ([0.5, -0.5, 0.0], [1.0, 0.0]),
        ([-0.5, 0.5, 0.0], [0.0, 1.0]),
    ])
}

pub fn textured_quad() -> VertexBuffer {
    let h = QUAD_HALF_HEIGHT;
    VertexBuffer::from_pairs([
        ([-1.0, -h, 0.0], [0.0, 0.0]),
        ([1.0, -h, 0.0], [1.0, 0.0]),
        ([-1.0, h, 0.0], [0.0, 1.0]),
        ([1.0, -h, 0.0], [1.0, 0.0]),
        ([-1.0, h, 0.0], [0.0, 1.0]),
        ([1.0, h, 0.0], [1.0, 1.0]),
    ])
}

/// Unit cube centred on the origin. The back (-Z) face repeats its texture
/// four times in each direction.
pub fn textured_cube() -> VertexBuffer {
    let v = Vertex::new;
    VertexBuffer::from(vec![
        // +X
        v([0.5, -0.5, -0.5], [0.0, 0.0]),
        v([0.5, 0.5, -0.5], [1.0, 0.0]),
        v([0.5, -0.5, 0.5], [0.0, 1.0]),
        v([0.5, -0.5, 0.5], [0.0, 1.0]),
        v([0.5, 0.5, 0.5], [1.0, 1.0]),
        v([0.5, 0.5, -0.5], [1.0, 0.0]),
        // +Y
        v([0.5, 0.5, -0.5], [1.0, 0.0]),
        v([-0.5, 0.5, -0.5], [0.0, 0.0]),
        v([0.5, 0.5, 0.5], [1.0, 1.0]),
        v([0.5, 0.5, 0.5], [1.0, 1.0]),
        v([-0.5, 0.5, -0.5], [0.0, 0.0]),
        v([-0.5, 0.5, 0.5], [0.0, 1.0]),
        // -X
        v([-0.5, 0.5, -0.5], [1.0, 0.0]),
        v([-0.5, -0.5, -0.5], [0.0, 0.0]),
        v([-0.5, 0.5, 0.5], [1.0, 1.0]),
        v([-0.5, 0.5, 0.5], [1.0, 1.0]),
        v([-0.5, -0.5, -0.5], [0.0, 0.0]),
        v([-0.5, -0.5, 0.5], [0.0, 1.0]),
        // -Y
        v([-0.5, -0.5, -0.5], [0.0, 0.0]),
        v([0.5, -0.5, -0.5], [1.0, 0.0]),
        v([-0.5, -0.5, 0.5], [0.0, 1.0]),
        v([-0.5, -0.5, 0.5], [0.0, 1.0]),
        v([0.5, -0.5, -0.5], [1.0, 0.0]),
        v([0.5, -0.5, 0.5], [1.0, 1.0]),
        // +Z
        v([0.5, 0.5, 0.5], [1.0, 1.0]),
        v([-0.5, 0.5, 0.5], [0.0, 1.0]),
        v([0.5, -0.5, 0.5], [1.0, 0.0]),
        v([0.5, -0.5, 0.5], [1.0, 0.0]),
        v([-0.5, 0.5, 0.5], [0.0, 1.0]),
        v([-0.5, -0.5, 0.5], [0.0, 0.0]),
        // -Z
        v([0.5, -0.5, -0.5], [4.0, 0.0]),
        v([-0.5, -0.5, -0.5], [0.0, 0.0]),
        v([0.5, 0.5, -0.5], [4.0, 4.0]),
        v([0.5, 0.5, -0.5], [4.0, 4.0]),
        v([-0.5, -0.5, -0.5], [0.0, 0.0]),
        v([-0.5, 0.5, -0.5], [0.0, 4.0]),
    ])
}
