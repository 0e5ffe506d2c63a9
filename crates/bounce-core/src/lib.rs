//! Core geometry and simulation for the logo scene.
//!
//! Everything here is renderer-agnostic: the wasm layer copies the results
//! into flat buffers that the browser side draws.

pub mod bounce;
pub mod bounds;
pub mod camera;
pub mod config;
pub mod debug_mesh;
pub mod logo;
pub mod math;
pub mod render;
pub mod scene;
pub mod shape_field;
pub mod svg;
pub mod ui;
