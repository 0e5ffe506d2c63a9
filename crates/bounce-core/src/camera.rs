/// Perspective camera parameters as seen by the simulation.
///
/// The camera is assumed to sit at the origin looking down -Z; only the
/// projection matters here, the renderer owns the actual view transform.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraParams {
    /// Vertical field of view in degrees.
    pub fov_deg: f32,
    /// Width / height.
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for CameraParams {
    fn default() -> Self {
        Self {
            fov_deg: 50.0,
            aspect: 1.0,
            near: 0.01,
            far: 1000.0,
        }
    }
}

impl CameraParams {
    pub fn new(fov_deg: f32, aspect: f32, near: f32, far: f32) -> Self {
        Self { fov_deg, aspect, near, far }
    }

    /// Half of the visible height at distance `depth` in front of the camera.
    #[inline]
    pub fn half_height_at(&self, depth: f32) -> f32 {
        depth * (self.fov_deg.to_radians() * 0.5).tan()
    }

    /// Half of the visible width at distance `depth` in front of the camera.
    #[inline]
    pub fn half_width_at(&self, depth: f32) -> f32 {
        self.half_height_at(depth) * self.aspect
    }

    /// Update the aspect ratio from a viewport size. A zero-height viewport
    /// (minimised window) keeps the previous aspect.
    pub fn set_viewport(&mut self, width: f32, height: f32) {
        if height > 0.0 {
            self.aspect = width / height;
        }
    }
}
