use glam::Vec2;

/// One fillable region: an outer contour (counter-clockwise) and any holes
/// (clockwise) cut out of it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Shape {
    pub outer: Vec<Vec2>,
    pub holes: Vec<Vec<Vec2>>,
}

/// Shoelace area; positive when the contour is counter-clockwise in a
/// y-up frame.
pub fn signed_area(points: &[Vec2]) -> f32 {
    let n = points.len();
    let mut sum = 0.0;
    for i in 0..n {
        let a = points[i];
        let b = points[(i + 1) % n];
        sum += a.x * b.y - b.x * a.y;
    }
    sum * 0.5
}

/// Even-odd crossing test.
pub fn point_in_polygon(p: Vec2, polygon: &[Vec2]) -> bool {
    let n = polygon.len();
    let mut inside = false;
    let mut j = n.wrapping_sub(1);
    for i in 0..n {
        let a = polygon[i];
        let b = polygon[j];
        if (a.y > p.y) != (b.y > p.y) {
            let x = a.x + (p.y - a.y) * (b.x - a.x) / (b.y - a.y);
            if p.x < x {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

/// How overlapping contours of one path decide what is filled.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FillRule {
    /// SVG's default.
    #[default]
    NonZero,
    EvenOdd,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Role {
    Outer,
    Hole,
    /// Filled on both sides; contributes no boundary.
    Interior,
}

/// Split the contours of one SVG path into shapes.
///
/// Under [`FillRule::EvenOdd`] a contour nested inside an odd number of the
/// other contours is a hole. Under [`FillRule::NonZero`] the winding just
/// outside and just inside each contour decides: filled inside only makes
/// an outer, filled outside only makes a hole, and a contour filled on both
/// sides is dropped.
///
/// Holes attach to the smallest outer that contains them. Windings are
/// normalised so outers are counter-clockwise and holes clockwise.
pub fn group_contours(contours: Vec<Vec<Vec2>>, rule: FillRule) -> Vec<Shape> {
    let n = contours.len();
    let containers: Vec<Vec<usize>> = (0..n)
        .map(|i| {
            (0..n)
                .filter(|&j| j != i && point_in_polygon(contours[i][0], &contours[j]))
                .collect()
        })
        .collect();
    let winding: Vec<i32> = contours
        .iter()
        .map(|c| if signed_area(c) > 0.0 { 1 } else { -1 })
        .collect();
    let areas: Vec<f32> = contours.iter().map(|c| signed_area(c).abs()).collect();

    let roles: Vec<Role> = (0..n)
        .map(|i| match rule {
            FillRule::EvenOdd if containers[i].len() % 2 == 0 => Role::Outer,
            FillRule::EvenOdd => Role::Hole,
            FillRule::NonZero => {
                let outside: i32 = containers[i].iter().map(|&j| winding[j]).sum();
                match (outside == 0, outside + winding[i] == 0) {
                    (true, _) => Role::Outer,
                    (false, true) => Role::Hole,
                    (false, false) => Role::Interior,
                }
            }
        })
        .collect();

    let mut shape_of = vec![None; n];
    let mut shapes = Vec::new();
    for i in (0..n).filter(|&i| roles[i] == Role::Outer) {
        shape_of[i] = Some(shapes.len());
        shapes.push(Shape {
            outer: with_winding(&contours[i], true),
            holes: Vec::new(),
        });
    }

    for i in (0..n).filter(|&i| roles[i] == Role::Hole) {
        let parent = containers[i]
            .iter()
            .copied()
            .filter(|&j| roles[j] == Role::Outer)
            .min_by(|&a, &b| areas[a].total_cmp(&areas[b]))
            .and_then(|j| shape_of[j]);

        match parent {
            Some(s) => shapes[s].holes.push(with_winding(&contours[i], false)),
            None => shapes.push(Shape {
                outer: with_winding(&contours[i], true),
                holes: Vec::new(),
            }),
        }
    }

    shapes
}

fn with_winding(points: &[Vec2], ccw: bool) -> Vec<Vec2> {
    let mut out = points.to_vec();
    if (signed_area(points) > 0.0) != ccw {
        out.reverse();
    }
    out
}
