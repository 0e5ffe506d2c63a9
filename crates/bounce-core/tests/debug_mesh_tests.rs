use bounce_core::camera::CameraParams;
use bounce_core::debug_mesh::{build_debug_wireframe, DEBUG_INDICES};

#[test]
fn test_vertex_and_index_counts() {
    let mesh = build_debug_wireframe(&CameraParams::default(), 10.0, 200.0);
    assert_eq!(mesh.vertices.len(), 8);
    assert_eq!(mesh.indices.len(), 36);
    assert!(mesh.indices.iter().all(|&i| i < 8));
    assert_eq!(mesh.indices, DEBUG_INDICES);
}

#[test]
fn test_face_depths() {
    let mesh = build_debug_wireframe(&CameraParams::default(), 10.0, 200.0);
    for v in &mesh.vertices[..4] {
        assert!((v.position[2] + 10.01).abs() < 1e-4, "near face z = {}", v.position[2]);
    }
    for v in &mesh.vertices[4..] {
        assert!((v.position[2] + 210.01).abs() < 1e-3, "far face z = {}", v.position[2]);
    }
}

#[test]
fn test_near_face_extent_matches_camera() {
    let camera = CameraParams::new(50.0, 2.0, 0.01, 1000.0);
    let mesh = build_debug_wireframe(&camera, 10.0, 200.0);
    let hh = camera.half_height_at(10.01);
    let hw = camera.half_width_at(10.01);

    let [bl, br, tr, tl] = [0, 1, 2, 3].map(|i| mesh.vertices[i].position);
    assert!((bl[0] + hw).abs() < 1e-4 && (bl[1] + hh).abs() < 1e-4);
    assert!((br[0] - hw).abs() < 1e-4 && (br[1] + hh).abs() < 1e-4);
    assert!((tr[0] - hw).abs() < 1e-4 && (tr[1] - hh).abs() < 1e-4);
    assert!((tl[0] + hw).abs() < 1e-4 && (tl[1] - hh).abs() < 1e-4);
}

#[test]
fn test_far_face_is_larger() {
    let mesh = build_debug_wireframe(&CameraParams::default(), 10.0, 200.0);
    let near_w = mesh.vertices[1].position[0] - mesh.vertices[0].position[0];
    let far_w = mesh.vertices[5].position[0] - mesh.vertices[4].position[0];
    assert!(far_w > near_w * 10.0, "far {} near {}", far_w, near_w);
}

#[test]
fn test_no_degenerate_triangles() {
    let mesh = build_debug_wireframe(&CameraParams::default(), 10.0, 200.0);
    for tri in mesh.indices.chunks_exact(3) {
        assert!(tri[0] != tri[1] && tri[1] != tri[2] && tri[0] != tri[2], "{:?}", tri);
    }
}

#[test]
fn test_vertices_cast_to_float_buffer() {
    let mesh = build_debug_wireframe(&CameraParams::default(), 10.0, 200.0);
    let floats: &[f32] = bytemuck::cast_slice(&mesh.vertices[..]);
    assert_eq!(floats.len(), 24);
    assert_eq!(floats[2], mesh.vertices[0].position[2]);
}
