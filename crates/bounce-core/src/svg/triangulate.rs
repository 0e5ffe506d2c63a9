//! Ear clipping over a doubly linked ring, after the earcut algorithm.
//!
//! Holes are bridged into the outer ring from their leftmost vertex, in
//! left-to-right order. Clipping runs in up to three passes: plain ears,
//! then ears after removing duplicate/collinear points and curing small
//! self-intersections, then splitting the ring along a valid diagonal and
//! starting over on both halves. Every clipped ear is a convex,
//! counter-clockwise triangle with no reflex vertex inside it.
//!
//! Coordinates are widened to `f64` for the orientation tests; flattened
//! curves produce long runs of nearly collinear points.

use glam::{DVec2, Vec2};

use super::shape::Shape;

/// Triangulate a shape.
///
/// Returns the shape's points (outer first, then each hole with at least
/// three points, in order) and counter-clockwise triangles indexing into
/// them.
pub fn triangulate(shape: &Shape) -> (Vec<Vec2>, Vec<u32>) {
    let mut points = shape.outer.clone();
    let mut triangles = Vec::new();
    let mut ring = Ring::default();

    let Some(mut outer) = ring.link(&points, 0, true) else {
        return (points, triangles);
    };
    if ring.next(outer) == ring.prev(outer) {
        return (points, triangles);
    }

    let mut holes = Vec::new();
    for hole in shape.holes.iter().filter(|h| h.len() >= 3) {
        let start = points.len();
        points.extend_from_slice(hole);
        if let Some(list) = ring.link(hole, start, false) {
            holes.push(ring.leftmost(list));
        }
    }
    holes.sort_by(|&a, &b| ring.pos(a).x.total_cmp(&ring.pos(b).x));
    for hole in holes {
        outer = ring.eliminate_hole(hole, outer);
    }

    triangles.reserve(points.len().saturating_sub(2) * 3);
    ring.clip(outer, &mut triangles, Pass::Ears);
    (points, triangles)
}

/// Twice the signed area of `p, q, r`, negated: negative for a
/// counter-clockwise (convex) turn.
#[inline]
fn area(p: DVec2, q: DVec2, r: DVec2) -> f64 {
    (q.y - p.y) * (r.x - q.x) - (q.x - p.x) * (r.y - q.y)
}

/// Inclusive test for a counter-clockwise triangle `a, b, c`.
fn point_in_triangle(a: DVec2, b: DVec2, c: DVec2, p: DVec2) -> bool {
    (c.x - p.x) * (a.y - p.y) >= (a.x - p.x) * (c.y - p.y)
        && (a.x - p.x) * (b.y - p.y) >= (b.x - p.x) * (a.y - p.y)
        && (b.x - p.x) * (c.y - p.y) >= (c.x - p.x) * (b.y - p.y)
}

/// `q` lies within the bounding box of segment `p r` (only meaningful when
/// the three are collinear).
fn on_segment(p: DVec2, q: DVec2, r: DVec2) -> bool {
    q.x <= p.x.max(r.x) && q.x >= p.x.min(r.x) && q.y <= p.y.max(r.y) && q.y >= p.y.min(r.y)
}

fn sign(v: f64) -> i8 {
    if v > 0.0 {
        1
    } else if v < 0.0 {
        -1
    } else {
        0
    }
}

/// Segments `p1 q1` and `p2 q2` intersect or touch.
fn intersects(p1: DVec2, q1: DVec2, p2: DVec2, q2: DVec2) -> bool {
    let o1 = sign(area(p1, q1, p2));
    let o2 = sign(area(p1, q1, q2));
    let o3 = sign(area(p2, q2, p1));
    let o4 = sign(area(p2, q2, q1));

    (o1 != o2 && o3 != o4)
        || (o1 == 0 && on_segment(p1, p2, q1))
        || (o2 == 0 && on_segment(p1, q2, q1))
        || (o3 == 0 && on_segment(p2, p1, q2))
        || (o4 == 0 && on_segment(p2, q1, q2))
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Pass {
    Ears,
    Filtered,
    Cured,
}

#[derive(Clone, Copy, Debug)]
struct Node {
    /// Index into the output points.
    i: usize,
    p: DVec2,
    prev: usize,
    next: usize,
}

/// Arena of ring nodes. Removed nodes stay in the arena but are unlinked.
#[derive(Default)]
struct Ring {
    nodes: Vec<Node>,
}

impl Ring {
    #[inline]
    fn pos(&self, n: usize) -> DVec2 {
        self.nodes[n].p
    }

    #[inline]
    fn idx(&self, n: usize) -> usize {
        self.nodes[n].i
    }

    #[inline]
    fn next(&self, n: usize) -> usize {
        self.nodes[n].next
    }

    #[inline]
    fn prev(&self, n: usize) -> usize {
        self.nodes[n].prev
    }

    #[inline]
    fn equals(&self, a: usize, b: usize) -> bool {
        self.pos(a) == self.pos(b)
    }

    fn turn(&self, a: usize, b: usize, c: usize) -> f64 {
        area(self.pos(a), self.pos(b), self.pos(c))
    }

    fn insert(&mut self, i: usize, p: Vec2, last: Option<usize>) -> usize {
        let id = self.nodes.len();
        let p = p.as_dvec2();
        match last {
            None => self.nodes.push(Node { i, p, prev: id, next: id }),
            Some(last) => {
                let next = self.next(last);
                self.nodes.push(Node { i, p, prev: last, next });
                self.nodes[next].prev = id;
                self.nodes[last].next = id;
            }
        }
        id
    }

    fn remove(&mut self, n: usize) {
        let Node { prev, next, .. } = self.nodes[n];
        self.nodes[next].prev = prev;
        self.nodes[prev].next = next;
    }

    /// Link `contour` (point indices starting at `offset`) into a new ring,
    /// counter-clockwise when `ccw`, clockwise otherwise.
    fn link(&mut self, contour: &[Vec2], offset: usize, ccw: bool) -> Option<usize> {
        let doubled_area: f64 = (0..contour.len())
            .map(|k| {
                let a = contour[k].as_dvec2();
                let b = contour[(k + 1) % contour.len()].as_dvec2();
                a.x * b.y - b.x * a.y
            })
            .sum();

        let mut last = None;
        if ccw == (doubled_area > 0.0) {
            for (k, &p) in contour.iter().enumerate() {
                last = Some(self.insert(offset + k, p, last));
            }
        } else {
            for (k, &p) in contour.iter().enumerate().rev() {
                last = Some(self.insert(offset + k, p, last));
            }
        }

        let last = last?;
        if self.equals(last, self.next(last)) {
            self.remove(last);
            return Some(self.next(last));
        }
        Some(last)
    }

    fn leftmost(&self, start: usize) -> usize {
        let mut best = start;
        let mut p = self.next(start);
        while p != start {
            let (a, b) = (self.pos(p), self.pos(best));
            if a.x < b.x || (a.x == b.x && a.y < b.y) {
                best = p;
            }
            p = self.next(p);
        }
        best
    }

    /// Drop duplicate and collinear points between `start` and `end`.
    fn filter_points(&mut self, start: usize, end: Option<usize>) -> usize {
        let mut end = end.unwrap_or(start);
        let mut p = start;
        loop {
            let (prev, next) = (self.prev(p), self.next(p));
            if self.equals(p, next) || self.turn(prev, p, next) == 0.0 {
                self.remove(p);
                p = prev;
                end = prev;
                if p == self.next(p) {
                    break;
                }
                continue;
            }
            p = next;
            if p == end {
                break;
            }
        }
        end
    }

    fn clip(&mut self, mut ear: usize, out: &mut Vec<u32>, pass: Pass) {
        let mut stop = ear;
        while self.prev(ear) != self.next(ear) {
            let (prev, next) = (self.prev(ear), self.next(ear));

            if self.is_ear(ear) {
                out.extend_from_slice(&[
                    self.idx(prev) as u32,
                    self.idx(ear) as u32,
                    self.idx(next) as u32,
                ]);
                self.remove(ear);
                ear = self.next(next);
                stop = ear;
                continue;
            }

            ear = next;
            if ear == stop {
                match pass {
                    Pass::Ears => {
                        let start = self.filter_points(ear, None);
                        self.clip(start, out, Pass::Filtered);
                    }
                    Pass::Filtered => {
                        let start = self.filter_points(ear, None);
                        let start = self.cure_local_intersections(start, out);
                        self.clip(start, out, Pass::Cured);
                    }
                    Pass::Cured => self.split(ear, out),
                }
                break;
            }
        }
    }

    fn is_ear(&self, ear: usize) -> bool {
        let (a, c) = (self.prev(ear), self.next(ear));
        let (pa, pb, pc) = (self.pos(a), self.pos(ear), self.pos(c));
        if area(pa, pb, pc) >= 0.0 {
            return false;
        }

        let min = pa.min(pb).min(pc);
        let max = pa.max(pb).max(pc);
        let mut p = self.next(c);
        while p != a {
            let pp = self.pos(p);
            if pp.cmpge(min).all()
                && pp.cmple(max).all()
                && point_in_triangle(pa, pb, pc, pp)
                && self.turn(self.prev(p), p, self.next(p)) >= 0.0
            {
                return false;
            }
            p = self.next(p);
        }
        true
    }

    /// Clip `a p p.next b` where `a p` and `p.next b` cross.
    fn cure_local_intersections(&mut self, start: usize, out: &mut Vec<u32>) -> usize {
        let mut start = start;
        let mut p = start;
        loop {
            let a = self.prev(p);
            let pn = self.next(p);
            let b = self.next(pn);

            if !self.equals(a, b)
                && intersects(self.pos(a), self.pos(p), self.pos(pn), self.pos(b))
                && self.locally_inside(a, b)
                && self.locally_inside(b, a)
            {
                out.extend_from_slice(&[
                    self.idx(a) as u32,
                    self.idx(p) as u32,
                    self.idx(b) as u32,
                ]);
                self.remove(p);
                self.remove(pn);
                p = b;
                start = b;
            }

            p = self.next(p);
            if p == start {
                break;
            }
        }
        self.filter_points(p, None)
    }

    /// Split the ring along the first valid diagonal and clip both halves.
    fn split(&mut self, start: usize, out: &mut Vec<u32>) {
        let mut a = start;
        loop {
            let mut b = self.next(self.next(a));
            while b != self.prev(a) {
                if self.idx(a) != self.idx(b) && self.is_valid_diagonal(a, b) {
                    let c = self.split_polygon(a, b);
                    let a_end = self.next(a);
                    let a = self.filter_points(a, Some(a_end));
                    let c_end = self.next(c);
                    let c = self.filter_points(c, Some(c_end));
                    self.clip(a, out, Pass::Ears);
                    self.clip(c, out, Pass::Ears);
                    return;
                }
                b = self.next(b);
            }
            a = self.next(a);
            if a == start {
                break;
            }
        }
        log::debug!("triangulation left an unsplittable ring");
    }

    fn eliminate_hole(&mut self, hole: usize, outer: usize) -> usize {
        let Some(bridge) = self.find_hole_bridge(hole, outer) else {
            return outer;
        };
        let reverse = self.split_polygon(bridge, hole);
        let reverse_end = self.next(reverse);
        self.filter_points(reverse, Some(reverse_end));
        let bridge_end = self.next(bridge);
        self.filter_points(bridge, Some(bridge_end))
    }

    /// Outer vertex visible from the hole's leftmost vertex.
    fn find_hole_bridge(&self, hole: usize, outer: usize) -> Option<usize> {
        let h = self.pos(hole);
        let mut qx = f64::NEG_INFINITY;
        let mut m = None;

        // Nearest edge to the left of the hole on its horizontal line.
        let mut p = outer;
        loop {
            let (a, b) = (self.pos(p), self.pos(self.next(p)));
            if h.y <= a.y && h.y >= b.y && b.y != a.y {
                let x = a.x + (h.y - a.y) * (b.x - a.x) / (b.y - a.y);
                if x <= h.x && x > qx {
                    qx = x;
                    let candidate = if a.x < b.x { p } else { self.next(p) };
                    if x == h.x {
                        return Some(candidate);
                    }
                    m = Some(candidate);
                }
            }
            p = self.next(p);
            if p == outer {
                break;
            }
        }

        let mut m = m?;

        // A reflex vertex inside the triangle (hole, hit, m) would block the
        // bridge; take the one with the smallest angle to the ray instead.
        let stop = m;
        let mp = self.pos(m);
        let (t0, t2) = if h.y < mp.y {
            (DVec2::new(h.x, h.y), DVec2::new(qx, h.y))
        } else {
            (DVec2::new(qx, h.y), DVec2::new(h.x, h.y))
        };
        let mut tan_min = f64::INFINITY;

        p = m;
        loop {
            let pp = self.pos(p);
            if h.x >= pp.x && pp.x >= mp.x && h.x != pp.x && point_in_triangle(t0, mp, t2, pp) {
                let tan = (h.y - pp.y).abs() / (h.x - pp.x);
                let cur = self.pos(m);
                let better = tan < tan_min
                    || (tan == tan_min
                        && (pp.x > cur.x
                            || (pp.x == cur.x && self.sector_contains_sector(m, p))));
                if better && self.locally_inside(p, hole) {
                    m = p;
                    tan_min = tan;
                }
            }
            p = self.next(p);
            if p == stop {
                break;
            }
        }

        Some(m)
    }

    fn sector_contains_sector(&self, m: usize, p: usize) -> bool {
        self.turn(self.prev(m), m, self.prev(p)) < 0.0
            && self.turn(self.next(p), m, self.next(m)) < 0.0
    }

    fn intersects_polygon(&self, a: usize, b: usize) -> bool {
        let (ai, bi) = (self.idx(a), self.idx(b));
        let mut p = a;
        loop {
            let pn = self.next(p);
            let (pi, pni) = (self.idx(p), self.idx(pn));
            if pi != ai
                && pni != ai
                && pi != bi
                && pni != bi
                && intersects(self.pos(p), self.pos(pn), self.pos(a), self.pos(b))
            {
                return true;
            }
            p = pn;
            if p == a {
                return false;
            }
        }
    }

    /// The diagonal `a b` leaves `a` into the polygon interior.
    fn locally_inside(&self, a: usize, b: usize) -> bool {
        let (prev, next) = (self.prev(a), self.next(a));
        if self.turn(prev, a, next) < 0.0 {
            self.turn(a, b, next) >= 0.0 && self.turn(a, prev, b) >= 0.0
        } else {
            self.turn(a, b, prev) < 0.0 || self.turn(a, next, b) < 0.0
        }
    }

    /// The midpoint of `a b` is inside the ring.
    fn middle_inside(&self, a: usize, b: usize) -> bool {
        let mid = (self.pos(a) + self.pos(b)) * 0.5;
        let mut inside = false;
        let mut p = a;
        loop {
            let (pp, pn) = (self.pos(p), self.pos(self.next(p)));
            if (pp.y > mid.y) != (pn.y > mid.y)
                && pn.y != pp.y
                && mid.x < (pn.x - pp.x) * (mid.y - pp.y) / (pn.y - pp.y) + pp.x
            {
                inside = !inside;
            }
            p = self.next(p);
            if p == a {
                return inside;
            }
        }
    }

    fn is_valid_diagonal(&self, a: usize, b: usize) -> bool {
        let bi = self.idx(b);
        if self.idx(self.next(a)) == bi
            || self.idx(self.prev(a)) == bi
            || self.intersects_polygon(a, b)
        {
            return false;
        }

        let visible = self.locally_inside(a, b)
            && self.locally_inside(b, a)
            && self.middle_inside(a, b)
            && (self.turn(self.prev(a), a, self.prev(b)) != 0.0
                || self.turn(a, self.prev(b), b) != 0.0);
        let coincident = self.equals(a, b)
            && self.turn(self.prev(a), a, self.next(a)) > 0.0
            && self.turn(self.prev(b), b, self.next(b)) > 0.0;

        visible || coincident
    }

    /// Link `a` to `b` with a bridge, duplicating both; returns the copy of
    /// `b`, which starts the second ring.
    fn split_polygon(&mut self, a: usize, b: usize) -> usize {
        let a2 = self.nodes.len();
        let b2 = a2 + 1;
        let (an, bp) = (self.next(a), self.prev(b));
        let (na, nb) = (self.nodes[a], self.nodes[b]);

        self.nodes.push(Node { i: na.i, p: na.p, prev: b2, next: an });
        self.nodes.push(Node { i: nb.i, p: nb.p, prev: bp, next: a2 });

        self.nodes[a].next = b;
        self.nodes[b].prev = a;
        self.nodes[an].prev = a2;
        self.nodes[bp].next = b2;
        b2
    }
}
