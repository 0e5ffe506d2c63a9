use glam::Vec2;
use resvg::usvg;
use resvg::usvg::tiny_skia_path::{self, PathSegment};

use super::shape::FillRule;
use super::SvgError;

/// Closed contours of one path element and the fill rule that combines them.
#[derive(Clone, Debug, PartialEq)]
pub struct PathOutline {
    pub contours: Vec<Vec<Vec2>>,
    pub fill_rule: FillRule,
}

/// Parse SVG text into flattened outlines, one entry per path element.
///
/// Each path yields its closed contours in document space (absolute
/// transforms applied, y pointing down). Open or zero-area contours are
/// dropped. Paths without a fill use the nonzero rule.
pub fn parse_outlines(svg_text: &str, curve_segments: u32) -> Result<Vec<PathOutline>, SvgError> {
    let tree = usvg::Tree::from_str(svg_text, &usvg::Options::default())
        .map_err(|e| SvgError::Parse(e.to_string()))?;

    let mut paths = Vec::new();
    collect_group(tree.root(), curve_segments.max(1), &mut paths);

    if paths.is_empty() {
        return Err(SvgError::NoPaths);
    }
    Ok(paths)
}

fn collect_group(group: &usvg::Group, segments: u32, out: &mut Vec<PathOutline>) {
    for node in group.children() {
        match node {
            usvg::Node::Group(child) => collect_group(child, segments, out),
            usvg::Node::Path(path) => {
                let contours = flatten(path.data(), path.abs_transform(), segments);
                if contours.is_empty() {
                    log::warn!("skipping SVG path '{}': no closed contour", path.id());
                } else {
                    let fill_rule = match path.fill().map(|f| f.rule()) {
                        Some(usvg::FillRule::EvenOdd) => FillRule::EvenOdd,
                        _ => FillRule::NonZero,
                    };
                    out.push(PathOutline { contours, fill_rule });
                }
            }
            _ => {}
        }
    }
}

fn flatten(
    data: &tiny_skia_path::Path,
    ts: tiny_skia_path::Transform,
    segments: u32,
) -> Vec<Vec<Vec2>> {
    let map = |p: tiny_skia_path::Point| {
        Vec2::new(
            ts.sx * p.x + ts.kx * p.y + ts.tx,
            ts.ky * p.x + ts.sy * p.y + ts.ty,
        )
    };

    let mut contours = Vec::new();
    let mut current: Vec<Vec2> = Vec::new();
    let mut last = Vec2::ZERO;

    for segment in data.segments() {
        match segment {
            PathSegment::MoveTo(p) => {
                finish_contour(&mut current, &mut contours);
                last = map(p);
                current.push(last);
            }
            PathSegment::LineTo(p) => {
                last = map(p);
                current.push(last);
            }
            PathSegment::QuadTo(c, p) => {
                let (c, p) = (map(c), map(p));
                for i in 1..=segments {
                    let t = i as f32 / segments as f32;
                    let a = last.lerp(c, t);
                    let b = c.lerp(p, t);
                    current.push(a.lerp(b, t));
                }
                last = p;
            }
            PathSegment::CubicTo(c1, c2, p) => {
                let (c1, c2, p) = (map(c1), map(c2), map(p));
                for i in 1..=segments {
                    let t = i as f32 / segments as f32;
                    let a = last.lerp(c1, t);
                    let b = c1.lerp(c2, t);
                    let c = c2.lerp(p, t);
                    let ab = a.lerp(b, t);
                    let bc = b.lerp(c, t);
                    current.push(ab.lerp(bc, t));
                }
                last = p;
            }
            PathSegment::Close => {
                finish_contour(&mut current, &mut contours);
            }
        }
    }
    finish_contour(&mut current, &mut contours);

    contours
}

/// Move `current` into `contours` if it encloses some area.
fn finish_contour(current: &mut Vec<Vec2>, contours: &mut Vec<Vec<Vec2>>) {
    let mut points = std::mem::take(current);
    points.dedup_by(|a, b| a.distance_squared(*b) < 1e-12);
    while points.len() > 1 && points[0].distance_squared(points[points.len() - 1]) < 1e-12 {
        points.pop();
    }
    if points.len() >= 3 && super::signed_area(&points).abs() > 1e-9 {
        contours.push(points);
    }
}
