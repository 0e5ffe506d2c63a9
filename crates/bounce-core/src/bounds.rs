use crate::camera::CameraParams;
use crate::math::lerp;

/// Axis-aligned cross-section of the camera frustum at one depth.
///
/// `near` and `far` are z-coordinates: the region extends along -Z, so
/// `far < near`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrustumBounds {
    pub left: f32,
    pub right: f32,
    pub bottom: f32,
    pub top: f32,
    pub near: f32,
    pub far: f32,
}

/// Distances (positive, in front of the camera) of the containment region's
/// near and far walls.
#[inline]
pub fn wall_distances(camera: &CameraParams, near_plane_offset: f32, box_depth: f32) -> (f32, f32) {
    let near_dist = camera.near + near_plane_offset;
    (near_dist, near_dist + box_depth)
}

impl FrustumBounds {
    /// Cross-section at the object depth `z`.
    ///
    /// The interpolation parameter is `(z - nearDist) / (nearDist - farDist)`
    /// and is not clamped, so depths outside the walls extrapolate.
    pub fn at_depth(camera: &CameraParams, near_plane_offset: f32, box_depth: f32, z: f32) -> Self {
        let (near_dist, far_dist) = wall_distances(camera, near_plane_offset, box_depth);

        let near_height = 2.0 * camera.half_height_at(near_dist);
        let near_width = 2.0 * camera.half_width_at(near_dist);
        let far_height = 2.0 * camera.half_height_at(far_dist);
        let far_width = 2.0 * camera.half_width_at(far_dist);

        let span = near_dist - far_dist;
        let t = if span != 0.0 { (z - near_dist) / span } else { 0.0 };

        let height = lerp(near_height, far_height, t);
        let width = lerp(near_width, far_width, t);

        Self {
            left: -width * 0.5,
            right: width * 0.5,
            bottom: -height * 0.5,
            top: height * 0.5,
            near: -near_dist,
            far: -far_dist,
        }
    }

    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.top - self.bottom
    }
}
