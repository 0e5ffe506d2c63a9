//! SVG logo loading: parse, flatten, triangulate, extrude, normalize.
//!
//! The finished mesh is centred on its local origin and scaled so the
//! longer of its X/Y extents equals `target_size`. Z keeps the extrusion
//! depth unscaled.

mod extrude;
mod normalize;
mod outline;
mod shape;
mod triangulate;

use std::fmt;

use glam::Vec3;

pub use extrude::{extrude_shapes, Mesh, MeshVertex};
pub use normalize::{normalize_mesh, Aabb};
pub use outline::{parse_outlines, PathOutline};
pub use shape::{group_contours, point_in_polygon, signed_area, FillRule, Shape};
pub use triangulate::triangulate;

/// Extrusion and normalization parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ExtrudeSettings {
    /// Extrusion depth along +Z, before normalization (Z is never rescaled).
    pub depth: f32,
    /// Target length of the longer X/Y side after normalization.
    pub target_size: f32,
    /// Line segments per Bézier curve when flattening outlines.
    pub curve_segments: u32,
}

impl Default for ExtrudeSettings {
    fn default() -> Self {
        Self {
            depth: 2.0,
            target_size: 40.0,
            curve_segments: 12,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SvgError {
    /// The document could not be parsed.
    Parse(String),
    /// The document parsed but produced no closed outline.
    NoPaths,
    /// All outlines collapse to a line or point, so no scale can be derived.
    Degenerate,
}

impl fmt::Display for SvgError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SvgError::Parse(msg) => write!(f, "failed to parse SVG: {msg}"),
            SvgError::NoPaths => write!(f, "Loaded SVG contains no paths."),
            SvgError::Degenerate => write!(f, "SVG outlines have zero width and height"),
        }
    }
}

impl std::error::Error for SvgError {}

/// Lifecycle of a logo asset.
///
/// Only `Ready` logos are animated, simulated or handed to the renderer.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadState {
    Unloaded,
    Loading,
    /// Normalized AABB size of the finished mesh.
    Ready(Vec3),
    Failed(String),
}

impl LoadState {
    pub fn is_ready(&self) -> bool {
        matches!(self, LoadState::Ready(_))
    }

    /// Normalized size, zero unless `Ready`.
    pub fn size(&self) -> Vec3 {
        match self {
            LoadState::Ready(size) => *size,
            _ => Vec3::ZERO,
        }
    }
}

/// A normalized, extruded logo.
#[derive(Clone, Debug)]
pub struct LogoGeometry {
    pub mesh: Mesh,
    pub size: Vec3,
}

/// Run the whole pipeline on SVG source text.
pub fn build_logo(svg_text: &str, settings: &ExtrudeSettings) -> Result<LogoGeometry, SvgError> {
    let paths = parse_outlines(svg_text, settings.curve_segments)?;

    let shapes: Vec<Shape> = paths
        .into_iter()
        .flat_map(|path| group_contours(path.contours, path.fill_rule))
        .collect();
    if shapes.is_empty() {
        return Err(SvgError::NoPaths);
    }

    let mut mesh = extrude_shapes(&shapes, settings.depth);
    let size = normalize_mesh(&mut mesh, settings.target_size)?;

    log::debug!(
        "logo built: {} shapes, {} vertices, size {:?}",
        shapes.len(),
        mesh.vertices.len(),
        size
    );

    Ok(LogoGeometry { mesh, size })
}
