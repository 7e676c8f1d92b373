//! 2D polygon predicates for room geometry.
//!
//! Drawings are authored in millimeters in the XY plane; all predicates here
//! work on [`glam::DVec2`] and ignore elevation. The set mirrors what room
//! validation needs: area, strict containment, simple-polygon validity, and
//! interior overlap.

use glam::DVec2;

/// Tolerance for orientation and degeneracy tests, in drawing units.
const EPS: f64 = 1e-9;

/// Why a polygon failed the simple-polygon validity predicate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PolygonIssue {
    /// Two non-adjacent edges cross each other.
    SelfIntersection {
        /// Approximate crossing point.
        at: DVec2,
    },
    /// The ring encloses no area (collinear or spike geometry).
    ZeroArea,
}

/// A closed 2D polygon with at least three distinct vertices.
///
/// The closing duplicate vertex and consecutive duplicates are dropped on
/// construction; the ring is implicitly closed.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon2 {
    vertices: Vec<DVec2>,
}

impl Polygon2 {
    /// Builds a polygon from an ordered vertex ring.
    ///
    /// Returns `None` when fewer than three distinct vertices remain after
    /// removing consecutive duplicates and the closing point.
    #[must_use]
    pub fn new(points: impl IntoIterator<Item = DVec2>) -> Option<Self> {
        let mut vertices: Vec<DVec2> = Vec::new();
        for p in points {
            if vertices
                .last()
                .is_some_and(|last| (*last - p).length_squared() < EPS)
            {
                continue;
            }
            vertices.push(p);
        }
        if vertices.len() > 1 {
            let first = vertices[0];
            if vertices
                .last()
                .is_some_and(|last| (*last - first).length_squared() < EPS)
            {
                vertices.pop();
            }
        }
        (vertices.len() >= 3).then_some(Self { vertices })
    }

    /// Returns the distinct vertices of the ring.
    #[must_use]
    pub fn vertices(&self) -> &[DVec2] {
        &self.vertices
    }

    /// Signed shoelace area; positive for counter-clockwise rings.
    #[must_use]
    pub fn signed_area(&self) -> f64 {
        let n = self.vertices.len();
        let mut sum = 0.0;
        for i in 0..n {
            let a = self.vertices[i];
            let b = self.vertices[(i + 1) % n];
            sum += a.x * b.y - b.x * a.y;
        }
        sum / 2.0
    }

    /// Absolute enclosed area.
    #[must_use]
    pub fn area(&self) -> f64 {
        self.signed_area().abs()
    }

    /// Area-weighted centroid; falls back to the vertex mean for degenerate
    /// rings.
    #[must_use]
    pub fn centroid(&self) -> DVec2 {
        let signed = self.signed_area();
        let n = self.vertices.len();
        if signed.abs() < EPS {
            let sum: DVec2 = self.vertices.iter().copied().sum();
            return sum / n as f64;
        }
        let mut cx = 0.0;
        let mut cy = 0.0;
        for i in 0..n {
            let a = self.vertices[i];
            let b = self.vertices[(i + 1) % n];
            let cross = a.x * b.y - b.x * a.y;
            cx += (a.x + b.x) * cross;
            cy += (a.y + b.y) * cross;
        }
        DVec2::new(cx, cy) / (6.0 * signed)
    }

    /// Checks the simple-polygon validity predicate.
    ///
    /// Reports the first pair of properly crossing non-adjacent edges, or a
    /// zero enclosed area.
    #[must_use]
    pub fn invalidity(&self) -> Option<PolygonIssue> {
        let n = self.vertices.len();
        for i in 0..n {
            for j in (i + 1)..n {
                // adjacent edges share a vertex and cannot properly cross
                if j == i + 1 || (i == 0 && j == n - 1) {
                    continue;
                }
                let (a1, a2) = self.edge(i);
                let (b1, b2) = self.edge(j);
                if segments_properly_cross(a1, a2, b1, b2) {
                    let at = crossing_point(a1, a2, b1, b2);
                    return Some(PolygonIssue::SelfIntersection { at });
                }
            }
        }
        if self.area() < EPS {
            return Some(PolygonIssue::ZeroArea);
        }
        None
    }

    /// Tests whether a point lies strictly inside the ring.
    ///
    /// Points on the boundary are not inside.
    #[must_use]
    pub fn contains(&self, p: DVec2) -> bool {
        let n = self.vertices.len();
        let mut inside = false;
        let mut j = n - 1;
        for i in 0..n {
            let a = self.vertices[i];
            let b = self.vertices[j];
            if point_on_segment(p, a, b) {
                return false;
            }
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

    /// Tests whether the interiors of two rings intersect.
    ///
    /// Boundary contact alone is not overlap; full containment is. Detection:
    /// a proper edge crossing, a vertex strictly inside the other ring, or a
    /// centroid strictly inside the other ring (which catches identical and
    /// fully nested rings whose vertices all sit on the other's boundary).
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        for i in 0..self.vertices.len() {
            let (a1, a2) = self.edge(i);
            for j in 0..other.vertices.len() {
                let (b1, b2) = other.edge(j);
                if segments_properly_cross(a1, a2, b1, b2) {
                    return true;
                }
            }
        }
        if self.vertices.iter().any(|v| other.contains(*v)) {
            return true;
        }
        if other.vertices.iter().any(|v| self.contains(*v)) {
            return true;
        }
        other.contains(self.centroid()) || self.contains(other.centroid())
    }

    fn edge(&self, i: usize) -> (DVec2, DVec2) {
        let n = self.vertices.len();
        (self.vertices[i], self.vertices[(i + 1) % n])
    }
}

/// Twice the signed area of the triangle `a`, `b`, `c`.
fn orient(a: DVec2, b: DVec2, c: DVec2) -> f64 {
    (b - a).perp_dot(c - a)
}

/// True when `p` lies on the closed segment `a`..`b`.
fn point_on_segment(p: DVec2, a: DVec2, b: DVec2) -> bool {
    if orient(a, b, p).abs() > EPS * (b - a).length().max(1.0) {
        return false;
    }
    let min = a.min(b) - DVec2::splat(EPS);
    let max = a.max(b) + DVec2::splat(EPS);
    p.x >= min.x && p.x <= max.x && p.y >= min.y && p.y <= max.y
}

/// True when the open segments cross at a single interior point.
fn segments_properly_cross(a1: DVec2, a2: DVec2, b1: DVec2, b2: DVec2) -> bool {
    let d1 = orient(b1, b2, a1);
    let d2 = orient(b1, b2, a2);
    let d3 = orient(a1, a2, b1);
    let d4 = orient(a1, a2, b2);
    ((d1 > EPS && d2 < -EPS) || (d1 < -EPS && d2 > EPS))
        && ((d3 > EPS && d4 < -EPS) || (d3 < -EPS && d4 > EPS))
}

/// Intersection point of two properly crossing segments.
fn crossing_point(a1: DVec2, a2: DVec2, b1: DVec2, b2: DVec2) -> DVec2 {
    let r = a2 - a1;
    let s = b2 - b1;
    let denom = r.perp_dot(s);
    if denom.abs() < EPS {
        // collinear contact; midpoint is close enough for a report location
        return (a1 + a2 + b1 + b2) / 4.0;
    }
    let t = (b1 - a1).perp_dot(s) / denom;
    a1 + r * t
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(x0: f64, y0: f64, x1: f64, y1: f64) -> Polygon2 {
        Polygon2::new([
            DVec2::new(x0, y0),
            DVec2::new(x1, y0),
            DVec2::new(x1, y1),
            DVec2::new(x0, y1),
        ])
        .expect("rectangle is a valid ring")
    }

    #[test]
    fn drops_closing_duplicate() {
        let poly = Polygon2::new([
            DVec2::new(0.0, 0.0),
            DVec2::new(10.0, 0.0),
            DVec2::new(10.0, 10.0),
            DVec2::new(0.0, 10.0),
            DVec2::new(0.0, 0.0),
        ])
        .expect("closed ring is valid");
        assert_eq!(poly.vertices().len(), 4);
    }

    #[test]
    fn rejects_too_few_distinct_vertices() {
        assert!(Polygon2::new([
            DVec2::new(0.0, 0.0),
            DVec2::new(10.0, 0.0),
            DVec2::new(0.0, 0.0),
        ])
        .is_none());
    }

    #[test]
    fn shoelace_area_of_rectangle() {
        let poly = rect(0.0, 0.0, 5000.0, 4000.0);
        assert!((poly.area() - 20_000_000.0).abs() < 1e-6);
    }

    #[test]
    fn contains_is_strict() {
        let poly = rect(0.0, 0.0, 10.0, 10.0);
        assert!(poly.contains(DVec2::new(5.0, 5.0)));
        assert!(!poly.contains(DVec2::new(10.0, 5.0))); // boundary
        assert!(!poly.contains(DVec2::new(0.0, 0.0))); // corner
        assert!(!poly.contains(DVec2::new(15.0, 5.0)));
    }

    #[test]
    fn bowtie_reports_self_intersection() {
        let poly = Polygon2::new([
            DVec2::new(0.0, 0.0),
            DVec2::new(10.0, 10.0),
            DVec2::new(10.0, 0.0),
            DVec2::new(0.0, 10.0),
        ])
        .expect("bowtie has four distinct vertices");
        match poly.invalidity() {
            Some(PolygonIssue::SelfIntersection { at }) => {
                assert!((at - DVec2::new(5.0, 5.0)).length() < 1e-6);
            }
            other => panic!("expected self-intersection, got {other:?}"),
        }
    }

    #[test]
    fn collinear_ring_reports_zero_area() {
        let poly = Polygon2::new([
            DVec2::new(0.0, 0.0),
            DVec2::new(5.0, 0.0),
            DVec2::new(10.0, 0.0),
        ])
        .expect("three distinct vertices");
        assert_eq!(poly.invalidity(), Some(PolygonIssue::ZeroArea));
    }

    #[test]
    fn rectangle_is_simple() {
        assert_eq!(rect(0.0, 0.0, 10.0, 10.0).invalidity(), None);
    }

    #[test]
    fn overlap_detects_crossing_rectangles() {
        let a = rect(0.0, 0.0, 10.0, 10.0);
        let b = rect(5.0, 5.0, 15.0, 15.0);
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
    }

    #[test]
    fn overlap_detects_containment() {
        let outer = rect(0.0, 0.0, 100.0, 100.0);
        let inner = rect(10.0, 10.0, 20.0, 20.0);
        assert!(outer.overlaps(&inner));
        assert!(inner.overlaps(&outer));
    }

    #[test]
    fn overlap_detects_identical_rings() {
        let a = rect(0.0, 0.0, 10.0, 10.0);
        let b = rect(0.0, 0.0, 10.0, 10.0);
        assert!(a.overlaps(&b));
    }

    #[test]
    fn disjoint_rectangles_do_not_overlap() {
        let a = rect(0.0, 0.0, 10.0, 10.0);
        let b = rect(20.0, 0.0, 30.0, 10.0);
        assert!(!a.overlaps(&b));
    }

    #[test]
    fn edge_touching_is_not_overlap() {
        let a = rect(0.0, 0.0, 10.0, 10.0);
        let b = rect(10.0, 0.0, 20.0, 10.0);
        assert!(!a.overlaps(&b));
    }
}
