use glam::Vec3;

use super::extrude::Mesh;
use super::SvgError;

/// Axis-aligned bounding box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn from_points<I: IntoIterator<Item = Vec3>>(points: I) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        Some(iter.fold(Self { min: first, max: first }, |b, p| Self {
            min: b.min.min(p),
            max: b.max.max(p),
        }))
    }

    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }
}

/// Centre `mesh` on the origin and scale X/Y uniformly so the longer side
/// equals `target_size`. Z is only recentred.
///
/// Returns the normalized AABB size.
pub fn normalize_mesh(mesh: &mut Mesh, target_size: f32) -> Result<Vec3, SvgError> {
    let bounds = Aabb::from_points(mesh.vertices.iter().map(|v| Vec3::from(v.position)))
        .ok_or(SvgError::NoPaths)?;

    let extent = bounds.size();
    let longest = extent.x.max(extent.y);
    if !(longest.is_finite() && longest > 0.0) {
        return Err(SvgError::Degenerate);
    }

    let s = target_size / longest;
    let scale = Vec3::new(s, s, 1.0);
    let center = bounds.center();

    for v in &mut mesh.vertices {
        v.position = ((Vec3::from(v.position) - center) * scale).to_array();
        // Normals take the inverse scale so they stay perpendicular.
        v.normal = (Vec3::from(v.normal) / scale).normalize_or_zero().to_array();
    }

    Ok(extent * scale)
}
