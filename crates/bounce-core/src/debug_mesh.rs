//! Wireframe prism outlining the bounce region, for visual debugging only.

use bytemuck::{Pod, Zeroable};

use crate::bounds::wall_distances;
use crate::camera::CameraParams;

/// Vertex position, laid out for direct upload as a `Float32Array`.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct DebugVertex {
    pub position: [f32; 3],
}

/// Two triangles per face: near, far, then the four sides.
pub const DEBUG_INDICES: [u32; 36] = [
    0, 1, 2, 2, 3, 0, // near
    4, 5, 6, 6, 7, 4, // far
    0, 1, 5, 5, 4, 0, //
    1, 2, 6, 6, 5, 1, //
    2, 3, 7, 7, 6, 2, //
    3, 0, 4, 4, 7, 3, //
];

#[derive(Clone, Debug)]
pub struct DebugMesh {
    pub vertices: [DebugVertex; 8],
    pub indices: [u32; 36],
}

/// Build the trapezoidal prism spanning the near and far walls.
///
/// Vertex order per face is bottom-left, bottom-right, top-right, top-left;
/// the near face comes first.
pub fn build_debug_wireframe(camera: &CameraParams, near_plane_offset: f32, box_depth: f32) -> DebugMesh {
    let (near_dist, far_dist) = wall_distances(camera, near_plane_offset, box_depth);

    let face = |dist: f32| {
        let hw = camera.half_width_at(dist);
        let hh = camera.half_height_at(dist);
        [
            DebugVertex { position: [-hw, -hh, -dist] },
            DebugVertex { position: [hw, -hh, -dist] },
            DebugVertex { position: [hw, hh, -dist] },
            DebugVertex { position: [-hw, hh, -dist] },
        ]
    };

    let near = face(near_dist);
    let far = face(far_dist);

    DebugMesh {
        vertices: [near[0], near[1], near[2], near[3], far[0], far[1], far[2], far[3]],
        indices: DEBUG_INDICES,
    }
}
