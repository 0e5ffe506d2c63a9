use bounce_core::bounce::BounceConfig;
use bounce_core::config::SceneConfig;
use bounce_core::debug_mesh::DebugMesh;
use bounce_core::scene::{LogoKey, SceneContext, SceneError};
use bounce_core::shape_field::ShapeFieldConfig;
use slotmap::{Key, KeyData};
use wasm_bindgen::prelude::*;

mod logging;

/// GPU-compatible shape instance: 32 bytes.
#[repr(C)]
#[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
struct GpuShape {
    position: [f32; 3], // 12 bytes
    scale: f32,         //  4 bytes
    rotation: [f32; 3], // 12 bytes
    kind: u32,          //  4 bytes
}

/// Logo transform and color: 64 bytes, four vec4 rows.
#[repr(C)]
#[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
struct GpuLogo {
    position: [f32; 3],
    ready: f32, // 1.0 once the mesh can be drawn
    rotation: [f32; 3],
    _pad0: f32,
    scale: [f32; 3],
    _pad1: f32,
    color: [f32; 3],
    _pad2: f32,
}

fn to_key(handle: u64) -> LogoKey {
    KeyData::from_ffi(handle).into()
}

fn to_handle(key: LogoKey) -> u64 {
    key.data().as_ffi()
}

fn random_seed() -> u32 {
    let mut buf = [0u8; 4];
    match getrandom::getrandom(&mut buf) {
        Ok(()) => u32::from_le_bytes(buf),
        Err(e) => {
            log::warn!("getrandom failed ({e}), seeding from Math.random");
            (js_sys::Math::random() * u32::MAX as f64) as u32
        }
    }
}

#[wasm_bindgen]
pub struct SceneWorld {
    scene: SceneContext,
    config: SceneConfig,
    /// Logo handles in buffer order.
    logo_order: Vec<LogoKey>,
    shape_buffer: Vec<GpuShape>,
    logo_buffer: Vec<GpuLogo>,
    debug_mesh: DebugMesh,
}

#[wasm_bindgen]
impl SceneWorld {
    #[wasm_bindgen(constructor)]
    pub fn new(width: f32, height: f32, device_pixel_ratio: f32) -> SceneWorld {
        Self::with_seed(width, height, device_pixel_ratio, random_seed())
    }

    /// Deterministic construction, e.g. for reproducible screenshots.
    #[wasm_bindgen]
    pub fn with_seed(width: f32, height: f32, device_pixel_ratio: f32, seed: u32) -> SceneWorld {
        logging::init_logging(log::LevelFilter::Info);

        let config = SceneConfig::default();
        let scene = SceneContext::new(config, seed, width, height, device_pixel_ratio);
        let debug_mesh = scene.debug_wireframe(None);

        let mut world = SceneWorld {
            scene,
            config,
            logo_order: Vec::new(),
            shape_buffer: Vec::new(),
            logo_buffer: Vec::new(),
            debug_mesh,
        };
        world.write_gpu_output();
        world
    }

    /// Advance one animation frame; returns the time spent in milliseconds.
    #[wasm_bindgen]
    pub fn tick(&mut self, elapsed: f32) -> f32 {
        let start = js_sys::Date::now();
        self.scene.tick(elapsed);
        self.write_gpu_output();
        (js_sys::Date::now() - start) as f32
    }

    #[wasm_bindgen]
    pub fn resize(&mut self, width: f32, height: f32, device_pixel_ratio: f32) {
        self.scene.resize(width, height, device_pixel_ratio);
    }

    #[wasm_bindgen]
    pub fn set_camera(&mut self, fov_deg: f32, near: f32, far: f32) {
        self.scene.camera.fov_deg = fov_deg;
        self.scene.camera.near = near;
        self.scene.camera.far = far;
    }

    // ---- logos ----

    /// Register a logo; returns its handle.
    #[wasm_bindgen]
    pub fn add_logo(&mut self, path: &str) -> u64 {
        let key = self.scene.add_logo(path);
        self.logo_order.push(key);
        self.write_gpu_output();
        to_handle(key)
    }

    #[wasm_bindgen]
    pub fn begin_logo_load(&mut self, handle: u64) -> bool {
        report(self.scene.begin_load(to_key(handle))).is_some()
    }

    /// Feed fetched SVG text. Returns whether the logo is ready; parse
    /// failures are logged and leave the logo in the failed state.
    #[wasm_bindgen]
    pub fn finish_logo_load(&mut self, handle: u64, svg_text: &str) -> bool {
        let ready = report(self.scene.finish_load(to_key(handle), svg_text)).unwrap_or(false);
        self.write_gpu_output();
        ready
    }

    #[wasm_bindgen]
    pub fn fail_logo_load(&mut self, handle: u64, reason: &str) {
        report(self.scene.fail_load(to_key(handle), reason));
    }

    #[wasm_bindgen]
    pub fn logo_ready(&self, handle: u64) -> bool {
        self.scene.logo(to_key(handle)).is_some_and(|l| l.is_ready())
    }

    /// Index of the logo in the logo buffer, or -1.
    #[wasm_bindgen]
    pub fn logo_slot(&self, handle: u64) -> i32 {
        let key = to_key(handle);
        self.logo_order
            .iter()
            .position(|&k| k == key)
            .map_or(-1, |i| i as i32)
    }

    #[wasm_bindgen]
    pub fn logo_size(&self, handle: u64) -> Vec<f32> {
        self.scene
            .logo(to_key(handle))
            .map(|l| l.size().to_array().to_vec())
            .unwrap_or_default()
    }

    #[wasm_bindgen]
    pub fn logo_count(&self) -> usize {
        self.logo_order.len()
    }

    #[wasm_bindgen]
    pub fn get_logo_buffer_ptr(&self) -> *const f32 {
        self.logo_buffer.as_ptr() as *const f32
    }

    #[wasm_bindgen]
    pub fn get_logo_buffer_byte_length(&self) -> usize {
        self.logo_buffer.len() * std::mem::size_of::<GpuLogo>()
    }

    /// Interleaved position/normal vertices of a ready logo, else null.
    #[wasm_bindgen]
    pub fn get_logo_vertex_ptr(&self, handle: u64) -> *const f32 {
        match self.scene.logo(to_key(handle)).and_then(|l| l.mesh()) {
            Some(mesh) => bytemuck::cast_slice::<_, f32>(mesh.vertices.as_slice()).as_ptr(),
            None => std::ptr::null(),
        }
    }

    #[wasm_bindgen]
    pub fn get_logo_vertex_byte_length(&self, handle: u64) -> usize {
        self.scene
            .logo(to_key(handle))
            .and_then(|l| l.mesh())
            .map_or(0, |m| std::mem::size_of_val(m.vertices.as_slice()))
    }

    #[wasm_bindgen]
    pub fn get_logo_index_ptr(&self, handle: u64) -> *const u32 {
        match self.scene.logo(to_key(handle)).and_then(|l| l.mesh()) {
            Some(mesh) => mesh.indices.as_ptr(),
            None => std::ptr::null(),
        }
    }

    #[wasm_bindgen]
    pub fn get_logo_index_count(&self, handle: u64) -> usize {
        self.scene
            .logo(to_key(handle))
            .and_then(|l| l.mesh())
            .map_or(0, |m| m.indices.len())
    }

    // ---- bounce ----

    /// Attach the default bounce simulation to a logo.
    #[wasm_bindgen]
    pub fn enable_bounce(&mut self, handle: u64) -> bool {
        report(self.scene.enable_default_bounce(to_key(handle))).is_some()
    }

    #[wasm_bindgen]
    pub fn set_bounce_config(
        &mut self,
        handle: u64,
        vx: f32,
        vy: f32,
        vz: f32,
        near_plane_offset: f32,
        box_depth: f32,
    ) -> bool {
        let config = BounceConfig {
            velocity: glam::Vec3::new(vx, vy, vz),
            near_plane_offset,
            box_depth,
        };
        report(self.scene.enable_bounce(to_key(handle), config)).is_some()
    }

    #[wasm_bindgen]
    pub fn disable_bounce(&mut self, handle: u64) {
        self.scene.disable_bounce(to_key(handle));
    }

    /// Rebuild the debug prism for a logo's bounce region (or the default one).
    #[wasm_bindgen]
    pub fn build_debug_wireframe(&mut self, handle: Option<u64>) {
        self.debug_mesh = self.scene.debug_wireframe(handle.map(to_key));
    }

    #[wasm_bindgen]
    pub fn get_debug_vertex_ptr(&self) -> *const f32 {
        bytemuck::cast_slice::<_, f32>(&self.debug_mesh.vertices[..]).as_ptr()
    }

    #[wasm_bindgen]
    pub fn get_debug_index_ptr(&self) -> *const u32 {
        self.debug_mesh.indices.as_ptr()
    }

    #[wasm_bindgen]
    pub fn debug_index_count(&self) -> usize {
        self.debug_mesh.indices.len()
    }

    // ---- shape field ----

    #[wasm_bindgen]
    pub fn get_shape_buffer_ptr(&self) -> *const f32 {
        self.shape_buffer.as_ptr() as *const f32
    }

    #[wasm_bindgen]
    pub fn get_shape_buffer_byte_length(&self) -> usize {
        self.shape_buffer.len() * std::mem::size_of::<GpuShape>()
    }

    #[wasm_bindgen]
    pub fn shape_count(&self) -> usize {
        self.scene.shapes().len()
    }

    /// `[torus_radius, tube_radius, box_size]`
    #[wasm_bindgen]
    pub fn shape_geometry(&self) -> Vec<f32> {
        let ShapeFieldConfig { torus, box_size, .. } = self.config.shapes;
        vec![torus.0, torus.1, box_size]
    }

    // ---- render / ui ----

    #[wasm_bindgen]
    pub fn pixel_size(&self) -> f32 {
        self.scene.render.pixel_size
    }

    #[wasm_bindgen]
    pub fn pixel_ratio(&self) -> f32 {
        self.scene.render.pixel_ratio
    }

    /// `[ambient, directional]`
    #[wasm_bindgen]
    pub fn light_intensities(&self) -> Vec<f32> {
        vec![self.scene.lighting.ambient, self.scene.lighting.directional]
    }

    /// `[fov_deg, aspect, near, far]`
    #[wasm_bindgen]
    pub fn camera_params(&self) -> Vec<f32> {
        let c = self.scene.camera;
        vec![c.fov_deg, c.aspect, c.near, c.far]
    }

    #[wasm_bindgen]
    pub fn camera_position(&self) -> Vec<f32> {
        self.config.camera_position.to_array().to_vec()
    }

    #[wasm_bindgen]
    pub fn pointer_moved(&mut self, now_ms: f64) {
        self.scene.pointer_moved(now_ms);
    }

    #[wasm_bindgen]
    pub fn fullscreen_button_visible(&self, now_ms: f64) -> bool {
        self.scene.fullscreen_button_visible(now_ms)
    }
}

/// Log scene errors instead of throwing into JS.
fn report<T>(result: Result<T, SceneError>) -> Option<T> {
    match result {
        Ok(v) => Some(v),
        Err(e) => {
            log::warn!("{e}");
            None
        }
    }
}

impl SceneWorld {
    fn write_gpu_output(&mut self) {
        self.shape_buffer.clear();
        self.shape_buffer
            .extend(self.scene.shapes().iter().map(|(_, s)| GpuShape {
                position: s.position.to_array(),
                scale: s.scale,
                rotation: s.rotation.to_array(),
                kind: s.kind as u32,
            }));

        self.logo_buffer.clear();
        for &key in &self.logo_order {
            let logo = match self.scene.logo(key) {
                Some(l) => l,
                None => continue,
            };
            let t = logo.transform;
            self.logo_buffer.push(GpuLogo {
                position: t.position.to_array(),
                ready: if logo.is_ready() { 1.0 } else { 0.0 },
                rotation: t.rotation.to_array(),
                _pad0: 0.0,
                scale: t.scale.to_array(),
                _pad1: 0.0,
                color: logo.color.to_array(),
                _pad2: 0.0,
            });
        }
    }
}
