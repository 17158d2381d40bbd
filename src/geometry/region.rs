//! Boolean-combination shapes used for cutouts and fused control shapes.

use super::polygon::UnionOutcome;
use super::{Circle, Polygon, Rect, RoundedRect, Vec2};

/// Boolean operator for [`Region::combine`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CombineOp {
    Union,
    Intersection,
}

/// An immutable shape built from one or more polygonal rings.
///
/// A region may be empty; drawing or hit-testing an empty region is a no-op,
/// never an error. Expensive regions (fused handles, frame rings) are meant
/// to be built once at setup time and reused every tick.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Region {
    parts: Vec<Polygon>,
}

impl Region {
    /// The empty region.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_polygon(polygon: Polygon) -> Self {
        if polygon.is_empty() {
            Self::empty()
        } else {
            Self {
                parts: vec![polygon],
            }
        }
    }

    /// A frame-with-hole built as a single keyhole ring.
    pub fn ring(outer: Polygon, inner: Polygon) -> Self {
        Self::from_polygon(Polygon::ring(outer, inner))
    }

    /// Combine shapes with a boolean operator. A single input is returned
    /// unchanged for either operator; an empty input, or an intersection
    /// with no overlap, yields the empty region.
    pub fn combine<I>(shapes: I, op: CombineOp) -> Region
    where
        I: IntoIterator<Item = Region>,
    {
        let mut iter = shapes.into_iter();
        let Some(first) = iter.next() else {
            return Region::empty();
        };
        match op {
            CombineOp::Union => iter.fold(first, |acc, r| acc.union(r)),
            CombineOp::Intersection => iter.fold(first, |acc, r| acc.intersect(&r)),
        }
    }

    /// Union with another region, merging rings whose boundaries cross.
    pub fn union(mut self, other: Region) -> Region {
        for ring in other.parts {
            union_into(&mut self.parts, ring);
        }
        self
    }

    /// Intersection with another region. Every ring of `other` acts as a
    /// convex clip ring (all primitive shapes produce convex rings).
    pub fn intersect(&self, other: &Region) -> Region {
        let mut parts = Vec::new();
        for a in &self.parts {
            for b in &other.parts {
                if let Some(clipped) = a.clip_convex(b) {
                    parts.push(clipped);
                }
            }
        }
        Region { parts }
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    pub fn parts(&self) -> &[Polygon] {
        &self.parts
    }

    pub fn contains(&self, p: Vec2) -> bool {
        self.parts.iter().any(|part| part.contains(p))
    }

    pub fn translated(&self, offset: Vec2) -> Region {
        Region {
            parts: self.parts.iter().map(|p| p.translated(offset)).collect(),
        }
    }

    /// Bounding rectangle over all parts; the empty region has zero bounds.
    pub fn bounds(&self) -> Rect {
        let mut iter = self.parts.iter();
        let Some(first) = iter.next() else {
            return Rect::default();
        };
        let mut bounds = first.bounds();
        for part in iter {
            let b = part.bounds();
            let min_x = bounds.x.min(b.x);
            let min_y = bounds.y.min(b.y);
            let max_x = bounds.right().max(b.right());
            let max_y = bounds.bottom().max(b.bottom());
            bounds = Rect::new(min_x, min_y, max_x - min_x, max_y - min_y);
        }
        bounds
    }
}

fn union_into(parts: &mut Vec<Polygon>, mut ring: Polygon) {
    if ring.is_empty() {
        return;
    }
    let mut i = 0;
    while i < parts.len() {
        match parts[i].union_with(&ring) {
            UnionOutcome::Merged(merged) => {
                // The merged contour may now overlap rings we already
                // passed, so restart the scan with it.
                parts.swap_remove(i);
                ring = merged;
                i = 0;
            }
            UnionOutcome::FirstContainsSecond => return,
            UnionOutcome::SecondContainsFirst => {
                parts.swap_remove(i);
            }
            UnionOutcome::Disjoint => i += 1,
        }
    }
    parts.push(ring);
}

impl From<Polygon> for Region {
    fn from(polygon: Polygon) -> Self {
        Region::from_polygon(polygon)
    }
}

impl From<Rect> for Region {
    fn from(rect: Rect) -> Self {
        Region::from_polygon(Polygon::from_rect(rect))
    }
}

impl From<RoundedRect> for Region {
    fn from(rr: RoundedRect) -> Self {
        Region::from_polygon(rr.to_polygon())
    }
}

impl From<Circle> for Region {
    fn from(circle: Circle) -> Self {
        Region::from_polygon(circle.to_polygon())
    }
}
