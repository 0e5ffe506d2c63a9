//! The scene context: single owner of every piece of per-frame state.

use std::fmt;

use slotmap::{new_key_type, SecondaryMap, SlotMap};

use crate::bounce::{BounceConfig, BounceStep, FrustumBounce};
use crate::camera::CameraParams;
use crate::config::SceneConfig;
use crate::debug_mesh::{build_debug_wireframe, DebugMesh};
use crate::logo::{Logo, LogoConfig};
use crate::math::RandomStream;
use crate::render::{Lighting, RenderSettings};
use crate::shape_field::ShapeField;
use crate::ui::IdleTimer;

new_key_type! {
    /// Stable handle to a logo.
    pub struct LogoKey;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SceneError {
    UnknownLogo,
    InvalidTransition { from: &'static str, to: &'static str },
}

impl fmt::Display for SceneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SceneError::UnknownLogo => write!(f, "no logo with this handle"),
            SceneError::InvalidTransition { from, to } => {
                write!(f, "invalid logo state transition {from} -> {to}")
            }
        }
    }
}

impl std::error::Error for SceneError {}

pub struct SceneContext {
    pub camera: CameraParams,
    pub lighting: Lighting,
    pub render: RenderSettings,
    logos: SlotMap<LogoKey, Logo>,
    bounces: SecondaryMap<LogoKey, FrustumBounce>,
    shapes: ShapeField,
    idle: IdleTimer,
    rng: RandomStream,
    logo_config: LogoConfig,
    default_bounce: BounceConfig,
    frame: u64,
}

impl SceneContext {
    /// Build a scene for a `width` x `height` viewport. All randomness
    /// (shape placement, logo speeds and colors) derives from `seed`.
    pub fn new(config: SceneConfig, seed: u32, width: f32, height: f32, device_pixel_ratio: f32) -> Self {
        let mut rng = RandomStream::new(seed);
        let mut camera = config.camera;
        camera.set_viewport(width, height);

        let shapes = ShapeField::scatter(&config.shapes, &mut rng.fork());

        log::info!(
            "scene created: {}x{}, seed {}, {} shapes",
            width,
            height,
            seed,
            shapes.len()
        );

        Self {
            camera,
            lighting: config.lighting,
            render: RenderSettings::new(config.render, width, height, device_pixel_ratio),
            logos: SlotMap::with_key(),
            bounces: SecondaryMap::new(),
            shapes,
            idle: IdleTimer::new(config.fullscreen_hide_ms),
            rng,
            logo_config: config.logo,
            default_bounce: config.bounce,
            frame: 0,
        }
    }

    /// Register a logo. It starts `Unloaded`; drive it with
    /// [`begin_load`](Self::begin_load) and
    /// [`finish_load`](Self::finish_load) / [`fail_load`](Self::fail_load).
    pub fn add_logo(&mut self, path: &str) -> LogoKey {
        let logo = Logo::new(path, &self.logo_config, &mut self.rng.fork());
        self.logos.insert(logo)
    }

    pub fn remove_logo(&mut self, key: LogoKey) -> Option<Logo> {
        self.bounces.remove(key);
        self.logos.remove(key)
    }

    pub fn logo(&self, key: LogoKey) -> Option<&Logo> {
        self.logos.get(key)
    }

    pub fn logo_mut(&mut self, key: LogoKey) -> Option<&mut Logo> {
        self.logos.get_mut(key)
    }

    pub fn logos(&self) -> impl Iterator<Item = (LogoKey, &Logo)> {
        self.logos.iter()
    }

    pub fn begin_load(&mut self, key: LogoKey) -> Result<(), SceneError> {
        self.logos.get_mut(key).ok_or(SceneError::UnknownLogo)?.begin_load()
    }

    /// Returns whether the logo became ready.
    pub fn finish_load(&mut self, key: LogoKey, svg_text: &str) -> Result<bool, SceneError> {
        self.logos
            .get_mut(key)
            .ok_or(SceneError::UnknownLogo)?
            .finish_load(svg_text)
    }

    pub fn fail_load(&mut self, key: LogoKey, reason: &str) -> Result<(), SceneError> {
        self.logos.get_mut(key).ok_or(SceneError::UnknownLogo)?.fail_load(reason)
    }

    /// Attach a bounce simulation to a logo, replacing any existing one.
    /// It only runs while the logo is ready.
    pub fn enable_bounce(&mut self, key: LogoKey, config: BounceConfig) -> Result<(), SceneError> {
        if !self.logos.contains_key(key) {
            return Err(SceneError::UnknownLogo);
        }
        self.bounces.insert(key, FrustumBounce::new(config));
        Ok(())
    }

    /// [`enable_bounce`](Self::enable_bounce) with the scene's default parameters.
    pub fn enable_default_bounce(&mut self, key: LogoKey) -> Result<(), SceneError> {
        self.enable_bounce(key, self.default_bounce)
    }

    pub fn disable_bounce(&mut self, key: LogoKey) -> Option<FrustumBounce> {
        self.bounces.remove(key)
    }

    pub fn bounce(&self, key: LogoKey) -> Option<&FrustumBounce> {
        self.bounces.get(key)
    }

    pub fn shapes(&self) -> &ShapeField {
        &self.shapes
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Advance one animation frame. `elapsed` is seconds since start.
    ///
    /// Returns the bounce result for every simulated logo.
    pub fn tick(&mut self, elapsed: f32) -> Vec<(LogoKey, BounceStep)> {
        for logo in self.logos.values_mut() {
            logo.animate(elapsed);
        }

        self.shapes.rotate();

        let mut steps = Vec::with_capacity(self.bounces.len());
        for (key, bounce) in self.bounces.iter_mut() {
            let Some(logo) = self.logos.get_mut(key) else {
                continue;
            };
            if !logo.is_ready() {
                continue;
            }
            let size = logo.size();
            let step = bounce.advance(&self.camera, &mut logo.transform.position, size);
            steps.push((key, step));
        }

        self.frame += 1;
        steps
    }

    pub fn resize(&mut self, width: f32, height: f32, device_pixel_ratio: f32) {
        self.camera.set_viewport(width, height);
        self.render.resize(width, height, device_pixel_ratio);
        log::debug!("resized to {}x{} (aspect {})", width, height, self.camera.aspect);
    }

    pub fn pointer_moved(&mut self, now_ms: f64) {
        self.idle.pointer_moved(now_ms);
    }

    pub fn fullscreen_button_visible(&self, now_ms: f64) -> bool {
        self.idle.is_visible(now_ms)
    }

    /// Wireframe of the region a logo bounces in, or of the default
    /// region when the logo has no bounce attached.
    pub fn debug_wireframe(&self, key: Option<LogoKey>) -> DebugMesh {
        let (offset, depth) = match key.and_then(|k| self.bounces.get(k)) {
            Some(b) => (b.near_plane_offset(), b.box_depth()),
            None => (self.default_bounce.near_plane_offset, self.default_bounce.box_depth),
        };
        build_debug_wireframe(&self.camera, offset, depth)
    }
}
