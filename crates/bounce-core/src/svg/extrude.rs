use bytemuck::{Pod, Zeroable};
use glam::{Vec2, Vec3};

use super::shape::Shape;
use super::triangulate::triangulate;

/// Interleaved vertex: 24 bytes, position then normal.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

impl MeshVertex {
    fn new(position: Vec3, normal: Vec3) -> Self {
        Self {
            position: position.to_array(),
            normal: normal.to_array(),
        }
    }
}

/// Indexed triangle mesh.
#[derive(Clone, Debug, Default)]
pub struct Mesh {
    pub vertices: Vec<MeshVertex>,
    pub indices: Vec<u32>,
}

impl Mesh {
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// Extrude shapes from z = 0 to z = `depth`.
///
/// Caps and side walls get their own vertices so every face has a flat
/// normal.
pub fn extrude_shapes(shapes: &[Shape], depth: f32) -> Mesh {
    let mut mesh = Mesh::default();
    for shape in shapes {
        extrude_shape(shape, depth, &mut mesh);
    }
    mesh
}

fn extrude_shape(shape: &Shape, depth: f32, mesh: &mut Mesh) {
    let (points, triangles) = triangulate(shape);

    // Front cap faces -Z, so its winding is reversed.
    let front = mesh.vertices.len() as u32;
    mesh.vertices
        .extend(points.iter().map(|p| MeshVertex::new(p.extend(0.0), Vec3::NEG_Z)));
    for tri in triangles.chunks_exact(3) {
        mesh.indices
            .extend_from_slice(&[front + tri[0], front + tri[2], front + tri[1]]);
    }

    let back = mesh.vertices.len() as u32;
    mesh.vertices
        .extend(points.iter().map(|p| MeshVertex::new(p.extend(depth), Vec3::Z)));
    mesh.indices.extend(triangles.iter().map(|&i| back + i));

    side_walls(&shape.outer, depth, mesh);
    for hole in &shape.holes {
        side_walls(hole, depth, mesh);
    }
}

/// One quad per contour edge. Outer contours are counter-clockwise and holes
/// clockwise, so `(dy, -dx)` always points away from the solid.
fn side_walls(contour: &[Vec2], depth: f32, mesh: &mut Mesh) {
    let n = contour.len();
    for i in 0..n {
        let p0 = contour[i];
        let p1 = contour[(i + 1) % n];
        let d = p1 - p0;
        let normal = Vec3::new(d.y, -d.x, 0.0).normalize_or_zero();

        let base = mesh.vertices.len() as u32;
        mesh.vertices.extend_from_slice(&[
            MeshVertex::new(p0.extend(0.0), normal),
            MeshVertex::new(p1.extend(0.0), normal),
            MeshVertex::new(p1.extend(depth), normal),
            MeshVertex::new(p0.extend(depth), normal),
        ]);
        mesh.indices
            .extend_from_slice(&[base, base + 1, base + 2, base + 2, base + 3, base]);
    }
}
