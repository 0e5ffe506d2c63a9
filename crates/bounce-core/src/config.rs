use glam::Vec3;

use crate::bounce::BounceConfig;
use crate::camera::CameraParams;
use crate::logo::LogoConfig;
use crate::render::{Lighting, RenderConfig};
use crate::shape_field::ShapeFieldConfig;

/// Everything needed to build a [`crate::scene::SceneContext`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneConfig {
    pub camera: CameraParams,
    /// Where the renderer places the camera initially; the simulation
    /// itself works in camera space.
    pub camera_position: Vec3,
    pub lighting: Lighting,
    pub render: RenderConfig,
    pub shapes: ShapeFieldConfig,
    pub logo: LogoConfig,
    /// Used when a bounce is enabled without explicit parameters.
    pub bounce: BounceConfig,
    /// Pointer idle time before the fullscreen button hides.
    pub fullscreen_hide_ms: f64,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            camera: CameraParams::default(),
            camera_position: Vec3::new(0.0, 0.0, 50.0),
            lighting: Lighting::default(),
            render: RenderConfig::default(),
            shapes: ShapeFieldConfig::default(),
            logo: LogoConfig::default(),
            bounce: BounceConfig::default(),
            fullscreen_hide_ms: 2000.0,
        }
    }
}
