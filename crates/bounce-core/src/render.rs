/// Light intensities for the scene's white ambient and directional lights.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Lighting {
    pub ambient: f32,
    pub directional: f32,
}

impl Default for Lighting {
    fn default() -> Self {
        Self {
            ambient: 0.7,
            directional: 5.0,
        }
    }
}

/// Pixelated post-process settings.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderConfig {
    /// Pixel size handed to the pixelation pass.
    pub pixel_size: f32,
    /// Device pixel ratio cap at startup.
    pub initial_max_pixel_ratio: f32,
    /// Device pixel ratio cap after a resize.
    pub resized_max_pixel_ratio: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            pixel_size: 0.3,
            initial_max_pixel_ratio: 1.0,
            resized_max_pixel_ratio: 2.0,
        }
    }
}

/// Current renderer state derived from [`RenderConfig`] and the viewport.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderSettings {
    pub pixel_size: f32,
    pub pixel_ratio: f32,
    pub width: f32,
    pub height: f32,
    config: RenderConfig,
}

impl RenderSettings {
    pub fn new(config: RenderConfig, width: f32, height: f32, device_pixel_ratio: f32) -> Self {
        Self {
            pixel_size: config.pixel_size,
            pixel_ratio: device_pixel_ratio.min(config.initial_max_pixel_ratio),
            width,
            height,
            config,
        }
    }

    pub fn resize(&mut self, width: f32, height: f32, device_pixel_ratio: f32) {
        self.width = width;
        self.height = height;
        self.pixel_ratio = device_pixel_ratio.min(self.config.resized_max_pixel_ratio);
    }
}
