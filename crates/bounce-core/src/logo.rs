//! An SVG logo in the scene: its asset lifecycle, mesh and animation.

use glam::Vec3;

use crate::math::RandomStream;
use crate::scene::SceneError;
use crate::svg::{build_logo, ExtrudeSettings, LoadState, Mesh};

/// Position, Euler rotation (XYZ, radians) and scale.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LogoConfig {
    pub extrude: ExtrudeSettings,
    /// Rotation speeds are drawn from `[-max_rotation_speed, max_rotation_speed]`.
    pub max_rotation_speed: f32,
    /// Per-channel color oscillation frequencies are drawn from this range.
    pub color_frequency: (f32, f32),
    /// Mirror Y to turn SVG's y-down space into the scene's y-up space.
    pub flip_y: bool,
}

impl Default for LogoConfig {
    fn default() -> Self {
        Self {
            extrude: ExtrudeSettings::default(),
            max_rotation_speed: 0.8,
            color_frequency: (0.2, 0.8),
            flip_y: true,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Logo {
    path: String,
    state: LoadState,
    mesh: Mesh,
    extrude: ExtrudeSettings,
    pub transform: Transform,
    pub color: Vec3,
    rotation_speed: Vec3,
    color_frequency: Vec3,
}

impl Logo {
    pub fn new(path: impl Into<String>, config: &LogoConfig, rng: &mut RandomStream) -> Self {
        let speed = config.max_rotation_speed;
        let rotation_speed = Vec3::new(
            rng.next_range(-speed, speed),
            rng.next_range(-speed, speed),
            rng.next_range(-speed, speed),
        );
        let (lo, hi) = config.color_frequency;
        let color_frequency = Vec3::new(
            rng.next_range(lo, hi),
            rng.next_range(lo, hi),
            rng.next_range(lo, hi),
        );
        let color = Vec3::new(
            rng.next_f32() + 0.2,
            rng.next_f32() + 0.2,
            rng.next_f32() + 0.2,
        );

        let mut transform = Transform::default();
        if config.flip_y {
            transform.scale.y = -1.0;
        }

        Self {
            path: path.into(),
            state: LoadState::Unloaded,
            mesh: Mesh::default(),
            extrude: config.extrude,
            transform,
            color,
            rotation_speed,
            color_frequency,
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn is_ready(&self) -> bool {
        self.state.is_ready()
    }

    /// Normalized AABB size; zero until the logo is ready.
    pub fn size(&self) -> Vec3 {
        self.state.size()
    }

    /// The extruded mesh, only once the logo is ready.
    pub fn mesh(&self) -> Option<&Mesh> {
        self.is_ready().then_some(&self.mesh)
    }

    pub fn rotation_speed(&self) -> Vec3 {
        self.rotation_speed
    }

    pub fn color_frequency(&self) -> Vec3 {
        self.color_frequency
    }

    /// `Unloaded -> Loading`.
    pub fn begin_load(&mut self) -> Result<(), SceneError> {
        match self.state {
            LoadState::Unloaded => {
                log::debug!("loading logo '{}'", self.path);
                self.state = LoadState::Loading;
                Ok(())
            }
            _ => Err(self.invalid("Loading")),
        }
    }

    /// `Loading -> Ready | Failed`.
    ///
    /// A bad document is not an error for the caller: it is logged and the
    /// logo ends up `Failed` with an empty mesh. Returns whether the logo is
    /// now ready.
    pub fn finish_load(&mut self, svg_text: &str) -> Result<bool, SceneError> {
        if self.state != LoadState::Loading {
            return Err(self.invalid("Ready"));
        }
        match build_logo(svg_text, &self.extrude) {
            Ok(geometry) => {
                log::debug!("logo '{}' ready, size {:?}", self.path, geometry.size);
                self.mesh = geometry.mesh;
                self.state = LoadState::Ready(geometry.size);
                Ok(true)
            }
            Err(e) => {
                log::error!("Error loading SVG '{}': {}", self.path, e);
                self.state = LoadState::Failed(e.to_string());
                Ok(false)
            }
        }
    }

    /// `Loading -> Failed`, e.g. when the fetch itself failed.
    pub fn fail_load(&mut self, reason: &str) -> Result<(), SceneError> {
        if self.state != LoadState::Loading {
            return Err(self.invalid("Failed"));
        }
        log::error!("Error loading SVG '{}': {}", self.path, reason);
        self.state = LoadState::Failed(reason.to_string());
        Ok(())
    }

    /// Set rotation and color for elapsed time `time` (seconds).
    pub fn animate(&mut self, time: f32) {
        if !self.is_ready() {
            return;
        }
        self.transform.rotation = self.rotation_speed * time;
        let f = self.color_frequency * time;
        self.color = Vec3::new(f.x.sin(), f.y.sin(), f.z.sin()) * 0.5 + 0.5;
    }

    fn invalid(&self, to: &'static str) -> SceneError {
        SceneError::InvalidTransition {
            from: state_name(&self.state),
            to,
        }
    }
}

fn state_name(state: &LoadState) -> &'static str {
    match state {
        LoadState::Unloaded => "Unloaded",
        LoadState::Loading => "Loading",
        LoadState::Ready(_) => "Ready",
        LoadState::Failed(_) => "Failed",
    }
}
