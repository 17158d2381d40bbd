//! Polygon rings and the boolean operations the clip algebra is built on.
//!
//! All rings are stored with positive signed area (consistent winding); the
//! constructors normalize orientation. Intersection is a Sutherland–Hodgman
//! fold against a convex clip ring, union of two overlapping rings is a
//! boundary trace that switches rings at each crossing, and frame-with-hole
//! shapes are built as a single keyhole-bridged ring so that even-odd
//! containment excludes the hole.

use super::{Circle, Rect, Vec2};

/// Number of segments used to approximate a quarter-circle corner arc.
const CORNER_SEGMENTS: usize = 8;
/// Number of segments used to approximate a full circle.
const CIRCLE_SEGMENTS: usize = 32;

const EPS: f32 = 1e-6;

/// A closed polygonal ring.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Polygon {
    points: Vec<Vec2>,
}

/// Outcome of attempting to merge two rings into one.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum UnionOutcome {
    /// Boundaries cross; the merged contour covers both rings.
    Merged(Polygon),
    /// The first ring already contains the second.
    FirstContainsSecond,
    /// The second ring already contains the first.
    SecondContainsFirst,
    /// The rings do not touch.
    Disjoint,
}

impl Polygon {
    /// Build a ring from a point list. Fewer than three points yields the
    /// empty polygon. Winding is normalized to positive signed area.
    pub fn new(mut points: Vec<Vec2>) -> Self {
        dedup_consecutive(&mut points);
        if points.len() < 3 {
            return Self { points: Vec::new() };
        }
        if signed_area(&points) < 0.0 {
            points.reverse();
        }
        Self { points }
    }

    pub fn from_rect(rect: Rect) -> Self {
        Self::new(vec![
            Vec2::new(rect.x, rect.y),
            Vec2::new(rect.right(), rect.y),
            Vec2::new(rect.right(), rect.bottom()),
            Vec2::new(rect.x, rect.bottom()),
        ])
    }

    /// Polygonal approximation of a rounded rectangle. The radius is clamped
    /// to half of the smaller dimension, matching hit-testing.
    pub fn from_rounded_rect(rect: Rect, radius: f32) -> Self {
        let r = radius.min((rect.width.min(rect.height) / 2.0).max(0.0));
        if r <= 0.0 {
            return Self::from_rect(rect);
        }

        // Corner centers paired with the start angle of each quarter arc,
        // walked in the same order as `from_rect`.
        let corners = [
            (Vec2::new(rect.right() - r, rect.y + r), -90.0_f32),
            (Vec2::new(rect.right() - r, rect.bottom() - r), 0.0),
            (Vec2::new(rect.x + r, rect.bottom() - r), 90.0),
            (Vec2::new(rect.x + r, rect.y + r), 180.0),
        ];

        let mut points = Vec::with_capacity(4 * (CORNER_SEGMENTS + 1));
        for (center, start_deg) in corners {
            for k in 0..=CORNER_SEGMENTS {
                let angle =
                    (start_deg + 90.0 * k as f32 / CORNER_SEGMENTS as f32).to_radians();
                points.push(center + Vec2::new(angle.cos(), angle.sin()) * r);
            }
        }
        Self::new(points)
    }

    pub fn from_circle(circle: Circle) -> Self {
        let mut points = Vec::with_capacity(CIRCLE_SEGMENTS);
        for k in 0..CIRCLE_SEGMENTS {
            let angle = std::f32::consts::TAU * k as f32 / CIRCLE_SEGMENTS as f32;
            points.push(circle.center + Vec2::new(angle.cos(), angle.sin()) * circle.radius);
        }
        Self::new(points)
    }

    /// Build a frame-with-hole as a single keyhole-bridged ring: the outer
    /// ring, the hole walked in reverse, and a doubled bridge edge joining
    /// them. Even-odd ray casting then excludes the hole.
    pub fn ring(outer: Polygon, inner: Polygon) -> Self {
        if inner.is_empty() {
            return outer;
        }
        if outer.is_empty() {
            return Polygon::default();
        }

        let hole: Vec<Vec2> = inner.points.iter().rev().copied().collect();

        // Bridge at the closest outer/hole vertex pair.
        let (mut oi, mut hj) = (0, 0);
        let mut best = f32::MAX;
        for (i, op) in outer.points.iter().enumerate() {
            for (j, hp) in hole.iter().enumerate() {
                let d = (*op - *hp).length_squared();
                if d < best {
                    best = d;
                    oi = i;
                    hj = j;
                }
            }
        }

        let mut points = Vec::with_capacity(outer.points.len() + hole.len() + 2);
        points.extend_from_slice(&outer.points[..=oi]);
        for k in 0..hole.len() {
            points.push(hole[(hj + k) % hole.len()]);
        }
        points.push(hole[hj]);
        points.extend_from_slice(&outer.points[oi..]);

        // Built directly: re-normalizing the winding would undo the
        // reversed hole.
        dedup_consecutive(&mut points);
        Self { points }
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    pub fn translated(&self, offset: Vec2) -> Self {
        Self {
            points: self.points.iter().map(|p| *p + offset).collect(),
        }
    }

    pub fn bounds(&self) -> Rect {
        if self.points.is_empty() {
            return Rect::default();
        }
        let (mut min_x, mut min_y) = (f32::MAX, f32::MAX);
        let (mut max_x, mut max_y) = (f32::MIN, f32::MIN);
        for p in &self.points {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }
        Rect::new(min_x, min_y, max_x - min_x, max_y - min_y)
    }

    /// Even-odd point containment. Works for simple rings and for
    /// keyhole-bridged rings (the doubled bridge edges cancel).
    pub fn contains(&self, p: Vec2) -> bool {
        if self.points.len() < 3 {
            return false;
        }
        let mut inside = false;
        let mut j = self.points.len() - 1;
        for i in 0..self.points.len() {
            let a = self.points[i];
            let b = self.points[j];
            if (a.y > p.y) != (b.y > p.y) {
                let x_cross = a.x + (p.y - a.y) * (b.x - a.x) / (b.y - a.y);
                if p.x < x_cross {
                    inside = !inside;
                }
            }
            j = i;
        }
        inside
    }

    /// True if every interior angle turns the same way.
    pub fn is_convex(&self) -> bool {
        let n = self.points.len();
        if n < 3 {
            return false;
        }
        let mut sign = 0.0_f32;
        for i in 0..n {
            let a = self.points[i];
            let b = self.points[(i + 1) % n];
            let c = self.points[(i + 2) % n];
            let cross = (b - a).cross(c - b);
            if cross.abs() <= EPS {
                continue;
            }
            if sign == 0.0 {
                sign = cross;
            } else if (cross > 0.0) != (sign > 0.0) {
                return false;
            }
        }
        true
    }

    /// Clip this ring against a convex ring (Sutherland–Hodgman). Returns
    /// `None` when nothing remains.
    pub fn clip_convex(&self, clip: &Polygon) -> Option<Polygon> {
        debug_assert!(clip.is_convex(), "clip ring must be convex");
        if self.is_empty() || clip.is_empty() {
            return None;
        }

        let mut output = self.points.clone();
        let n = clip.points.len();
        for i in 0..n {
            if output.len() < 3 {
                return None;
            }
            let edge_a = clip.points[i];
            let edge_b = clip.points[(i + 1) % n];

            let input = std::mem::take(&mut output);
            let m = input.len();
            for j in 0..m {
                let current = input[j];
                let previous = input[(j + m - 1) % m];
                let current_in = inside_edge(edge_a, edge_b, current);
                let previous_in = inside_edge(edge_a, edge_b, previous);

                if current_in {
                    if !previous_in {
                        if let Some(p) = line_edge_intersection(previous, current, edge_a, edge_b)
                        {
                            output.push(p);
                        }
                    }
                    output.push(current);
                } else if previous_in {
                    if let Some(p) = line_edge_intersection(previous, current, edge_a, edge_b) {
                        output.push(p);
                    }
                }
            }
        }

        let result = Polygon::new(output);
        if result.is_empty() {
            None
        } else {
            Some(result)
        }
    }

    /// Merge two rings whose boundaries may cross. Crossing boundaries are
    /// traced into a single contour; containment and disjointness are
    /// reported instead of traced.
    pub(crate) fn union_with(&self, other: &Polygon) -> UnionOutcome {
        if self.is_empty() || other.is_empty() {
            return UnionOutcome::Disjoint;
        }

        // Collect boundary crossings: for every pair of edges, record the
        // crossing position along each ring.
        let mut crossings: Vec<Vec2> = Vec::new();
        let mut self_hits: Vec<Vec<(f32, usize)>> = vec![Vec::new(); self.points.len()];
        let mut other_hits: Vec<Vec<(f32, usize)>> = vec![Vec::new(); other.points.len()];

        // Tolerance for treating two crossing candidates as the same point:
        // a transversal crossing through a shared vertex is reported by both
        // edges meeting at that vertex and must be recorded once.
        const MERGE_TOL: f32 = 1e-4;

        for i in 0..self.points.len() {
            let a0 = self.points[i];
            let a1 = self.points[(i + 1) % self.points.len()];
            for j in 0..other.points.len() {
                let b0 = other.points[j];
                let b1 = other.points[(j + 1) % other.points.len()];
                if let Some((t, u, p)) = segment_intersection(a0, a1, b0, b1) {
                    if crossings
                        .iter()
                        .any(|c| (*c - p).length_squared() < MERGE_TOL)
                    {
                        continue;
                    }
                    let id = crossings.len();
                    crossings.push(p);
                    self_hits[i].push((t, id));
                    other_hits[j].push((u, id));
                }
            }
        }

        if crossings.is_empty() {
            return if other.contains(self.points[0]) {
                UnionOutcome::SecondContainsFirst
            } else if self.contains(other.points[0]) {
                UnionOutcome::FirstContainsSecond
            } else {
                UnionOutcome::Disjoint
            };
        }

        // Augmented vertex lists with crossings spliced in edge order.
        let (self_list, self_at) = augment(&self.points, &mut self_hits, &crossings);
        let (other_list, other_at) = augment(&other.points, &mut other_hits, &crossings);

        // Start the trace from a plain vertex that lies outside the other
        // ring; walking forward from there follows the union boundary.
        let start = self_list
            .iter()
            .position(|v| v.crossing.is_none() && !other.contains(v.pos));
        let Some(start) = start else {
            // Every vertex of self sits inside other despite crossings;
            // treat as contained rather than tracing a degenerate contour.
            log::warn!("degenerate polygon union, falling back to containing ring");
            return UnionOutcome::SecondContainsFirst;
        };

        let mut merged = Vec::new();
        let mut on_self = true;
        let mut idx = start;
        let limit = self_list.len() + other_list.len() + 2;
        loop {
            let v = if on_self {
                self_list[idx]
            } else {
                other_list[idx]
            };
            merged.push(v.pos);

            if let Some(id) = v.crossing {
                on_self = !on_self;
                idx = if on_self { self_at[id] } else { other_at[id] };
            }
            let len = if on_self {
                self_list.len()
            } else {
                other_list.len()
            };
            idx = (idx + 1) % len;

            if on_self && idx == start {
                break;
            }
            if merged.len() > limit {
                log::warn!("polygon union trace did not close, keeping parts separate");
                return UnionOutcome::Disjoint;
            }
        }

        UnionOutcome::Merged(Polygon::new(merged))
    }
}

#[derive(Clone, Copy)]
struct TraceVertex {
    pos: Vec2,
    crossing: Option<usize>,
}

/// Splice crossings into a ring's vertex list, returning the augmented list
/// and, per crossing id, its index in that list.
fn augment(
    points: &[Vec2],
    hits: &mut [Vec<(f32, usize)>],
    crossings: &[Vec2],
) -> (Vec<TraceVertex>, Vec<usize>) {
    let mut list = Vec::with_capacity(points.len() + crossings.len());
    let mut at = vec![usize::MAX; crossings.len()];
    for (i, p) in points.iter().enumerate() {
        list.push(TraceVertex {
            pos: *p,
            crossing: None,
        });
        hits[i].sort_by(|a, b| a.0.total_cmp(&b.0));
        for (_, id) in &hits[i] {
            at[*id] = list.len();
            list.push(TraceVertex {
                pos: crossings[*id],
                crossing: Some(*id),
            });
        }
    }
    (list, at)
}

fn dedup_consecutive(points: &mut Vec<Vec2>) {
    points.dedup_by(|a, b| (*a - *b).length_squared() < EPS);
    while points.len() > 1 {
        let first = points[0];
        let last = points[points.len() - 1];
        if (first - last).length_squared() < EPS {
            points.pop();
        } else {
            break;
        }
    }
}

fn signed_area(points: &[Vec2]) -> f32 {
    let mut area = 0.0;
    let n = points.len();
    for i in 0..n {
        let a = points[i];
        let b = points[(i + 1) % n];
        area += a.cross(b);
    }
    area / 2.0
}

/// With positive-area winding, the interior is to the left of each edge.
fn inside_edge(a: Vec2, b: Vec2, p: Vec2) -> bool {
    (b - a).cross(p - a) >= 0.0
}

fn line_edge_intersection(p0: Vec2, p1: Vec2, a: Vec2, b: Vec2) -> Option<Vec2> {
    let d = p1 - p0;
    let e = b - a;
    let denom = d.cross(e);
    if denom.abs() < EPS {
        return None;
    }
    let t = (a - p0).cross(e) / denom;
    Some(p0 + d * t)
}

/// Crossing of two segments. Endpoint hits are accepted (a boundary may
/// cross exactly through a vertex); callers dedup coincident candidates.
fn segment_intersection(a0: Vec2, a1: Vec2, b0: Vec2, b1: Vec2) -> Option<(f32, f32, Vec2)> {
    let d = a1 - a0;
    let e = b1 - b0;
    let denom = d.cross(e);
    if denom.abs() < EPS {
        return None;
    }
    let t = (b0 - a0).cross(e) / denom;
    let u = (b0 - a0).cross(d) / denom;
    let range = -EPS..=1.0 + EPS;
    if !range.contains(&t) || !range.contains(&u) {
        return None;
    }
    Some((t, u, a0 + d * t))
}
