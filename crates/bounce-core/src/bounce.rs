//! Frustum containment for a single moving object.
//!
//! The frustum slice at the object's depth is treated as an axis-aligned
//! box with reflecting walls. Each tick the object moves by its velocity,
//! then any face of its AABB that crossed a wall is clamped back onto the
//! wall and the matching velocity component is negated.
//!
//! There is no continuous collision detection. A velocity large compared to
//! the cross-section can overshoot for a tick or tunnel through entirely.

use glam::Vec3;

use crate::bounds::FrustumBounds;
use crate::camera::CameraParams;

/// Tuning for [`FrustumBounce`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BounceConfig {
    /// Initial velocity in scene units per tick.
    pub velocity: Vec3,
    /// Gap between the camera near plane and the containment region's near wall.
    pub near_plane_offset: f32,
    /// Distance from the near wall to the far wall.
    pub box_depth: f32,
}

impl Default for BounceConfig {
    fn default() -> Self {
        Self {
            velocity: Vec3::new(-0.5, -0.5, -1.0),
            near_plane_offset: 10.0,
            box_depth: 200.0,
        }
    }
}

/// Which walls were hit during one tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BounceHits {
    pub left: bool,
    pub right: bool,
    pub bottom: bool,
    pub top: bool,
    pub far: bool,
    pub near: bool,
}

impl BounceHits {
    /// Number of reflections applied on each axis (0, 1 or 2).
    pub fn per_axis(&self) -> [u32; 3] {
        [
            self.left as u32 + self.right as u32,
            self.bottom as u32 + self.top as u32,
            self.far as u32 + self.near as u32,
        ]
    }

    pub fn any(&self) -> bool {
        self.left || self.right || self.bottom || self.top || self.far || self.near
    }
}

/// Outcome of [`FrustumBounce::advance`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BounceStep {
    /// Bounds the object was tested against (computed from its pre-move depth).
    pub bounds: FrustumBounds,
    pub hits: BounceHits,
}

#[derive(Clone, Debug)]
pub struct FrustumBounce {
    velocity: Vec3,
    near_plane_offset: f32,
    box_depth: f32,
}

impl Default for FrustumBounce {
    fn default() -> Self {
        Self::new(BounceConfig::default())
    }
}

impl FrustumBounce {
    pub fn new(config: BounceConfig) -> Self {
        Self {
            velocity: config.velocity,
            near_plane_offset: config.near_plane_offset,
            box_depth: config.box_depth,
        }
    }

    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }

    pub fn set_velocity(&mut self, velocity: Vec3) {
        self.velocity = velocity;
    }

    pub fn near_plane_offset(&self) -> f32 {
        self.near_plane_offset
    }

    pub fn box_depth(&self) -> f32 {
        self.box_depth
    }

    /// Bounds for an object currently at depth `z`.
    pub fn bounds_at(&self, camera: &CameraParams, z: f32) -> FrustumBounds {
        FrustumBounds::at_depth(camera, self.near_plane_offset, self.box_depth, z)
    }

    /// Advance one tick.
    ///
    /// `size` is the full AABB size of the object, centred on `position`.
    /// The six wall tests are independent: opposite walls on the same axis
    /// can both fire when the object is larger than the cross-section, in
    /// which case the component is negated twice.
    pub fn advance(&mut self, camera: &CameraParams, position: &mut Vec3, size: Vec3) -> BounceStep {
        let bounds = self.bounds_at(camera, position.z);
        let half = size * 0.5;
        let mut hits = BounceHits::default();

        *position += self.velocity;

        if position.x - half.x <= bounds.left {
            position.x = bounds.left + half.x;
            self.velocity.x = -self.velocity.x;
            hits.left = true;
        }
        if position.x + half.x >= bounds.right {
            position.x = bounds.right - half.x;
            self.velocity.x = -self.velocity.x;
            hits.right = true;
        }
        if position.y - half.y <= bounds.bottom {
            position.y = bounds.bottom + half.y;
            self.velocity.y = -self.velocity.y;
            hits.bottom = true;
        }
        if position.y + half.y >= bounds.top {
            position.y = bounds.top - half.y;
            self.velocity.y = -self.velocity.y;
            hits.top = true;
        }
        if position.z - half.z <= bounds.far {
            position.z = bounds.far + half.z;
            self.velocity.z = -self.velocity.z;
            hits.far = true;
        }
        if position.z + half.z >= bounds.near {
            position.z = bounds.near - half.z;
            self.velocity.z = -self.velocity.z;
            hits.near = true;
        }

        BounceStep { bounds, hits }
    }
}
