//! Geographic bounding box produced by rectangle selection.

use std::fmt;

use super::types::GeoPoint;

/// An axis-aligned geographic rectangle in degrees.
///
/// Always normalized so `west <= east` and `south <= north`; build one from
/// two arbitrary corners with [`BoundingBox::from_corners`]. A zero-area box
/// (both corners equal) is legal and contains exactly the points on it.
///
/// Containment is evaluated in flat lat/lon space with inclusive edges.
/// There is no special handling for selections crossing the ±180° meridian:
/// the naive min/max normalization applies, which for such a drag produces a
/// box spanning the long way around and typically matches nothing. That is
/// the documented behavior, not a defect.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    /// Western edge (minimum longitude).
    pub west: f64,
    /// Southern edge (minimum latitude).
    pub south: f64,
    /// Eastern edge (maximum longitude).
    pub east: f64,
    /// Northern edge (maximum latitude).
    pub north: f64,
}

impl BoundingBox {
    /// Build a normalized box from two opposite corners, in any order.
    pub fn from_corners(a: GeoPoint, b: GeoPoint) -> Self {
        Self {
            west: a.lon.min(b.lon),
            south: a.lat.min(b.lat),
            east: a.lon.max(b.lon),
            north: a.lat.max(b.lat),
        }
    }

    /// Check whether a point lies inside the box.
    ///
    /// All four edges are inclusive: a point exactly on an edge or corner
    /// counts as inside.
    pub fn contains(&self, point: &GeoPoint) -> bool {
        self.west <= point.lon
            && point.lon <= self.east
            && self.south <= point.lat
            && point.lat <= self.north
    }

    /// True if the box has zero area (a point or a line).
    pub fn is_degenerate(&self) -> bool {
        self.west == self.east || self.south == self.north
    }
}

impl fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{:.4} W, {:.4} S, {:.4} E, {:.4} N]",
            self.west, self.south, self.east, self.north
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(lat: f64, lon: f64) -> GeoPoint {
        GeoPoint::new(lat, lon).unwrap()
    }

    #[test]
    fn test_from_corners_normalizes() {
        let b = BoundingBox::from_corners(point(5.0, 10.0), point(-3.0, -20.0));
        assert_eq!(b.west, -20.0);
        assert_eq!(b.south, -3.0);
        assert_eq!(b.east, 10.0);
        assert_eq!(b.north, 5.0);
    }

    #[test]
    fn test_from_corners_order_independent() {
        let a = BoundingBox::from_corners(point(0.0, 0.0), point(5.0, 5.0));
        let b = BoundingBox::from_corners(point(5.0, 5.0), point(0.0, 0.0));
        assert_eq!(a, b);
    }

    #[test]
    fn test_contains_interior_point() {
        let b = BoundingBox::from_corners(point(0.0, 0.0), point(10.0, 10.0));
        assert!(b.contains(&point(5.0, 5.0)));
    }

    #[test]
    fn test_contains_each_edge_inclusive() {
        let b = BoundingBox::from_corners(point(0.0, 0.0), point(10.0, 10.0));
        // One point exactly on each of the four edges.
        assert!(b.contains(&point(5.0, 0.0)), "west edge");
        assert!(b.contains(&point(5.0, 10.0)), "east edge");
        assert!(b.contains(&point(0.0, 5.0)), "south edge");
        assert!(b.contains(&point(10.0, 5.0)), "north edge");
        // Corners count too.
        assert!(b.contains(&point(0.0, 0.0)));
        assert!(b.contains(&point(10.0, 10.0)));
    }

    #[test]
    fn test_contains_just_outside_each_edge() {
        let b = BoundingBox::from_corners(point(0.0, 0.0), point(10.0, 10.0));
        assert!(!b.contains(&point(5.0, -0.0001)), "west of box");
        assert!(!b.contains(&point(5.0, 10.0001)), "east of box");
        assert!(!b.contains(&point(-0.0001, 5.0)), "south of box");
        assert!(!b.contains(&point(10.0001, 5.0)), "north of box");
    }

    #[test]
    fn test_degenerate_box_contains_exact_point_only() {
        let b = BoundingBox::from_corners(point(43.5, 7.25), point(43.5, 7.25));
        assert!(b.is_degenerate());
        assert!(b.contains(&point(43.5, 7.25)));
        assert!(!b.contains(&point(43.5, 7.2501)));
        assert!(!b.contains(&point(43.5001, 7.25)));
    }

    #[test]
    fn test_antimeridian_drag_is_not_wrapped() {
        // Corners at 170°E and -170°E (i.e. 170°W) normalize to a box
        // spanning [-170, 170] the long way around, so a point at 179°E
        // that the user visually selected is NOT matched.
        let b = BoundingBox::from_corners(point(0.0, 170.0), point(10.0, -170.0));
        assert_eq!(b.west, -170.0);
        assert_eq!(b.east, 170.0);
        assert!(!b.contains(&point(5.0, 179.0)));
        assert!(b.contains(&point(5.0, 0.0)));
    }

    #[test]
    fn test_display() {
        let b = BoundingBox::from_corners(point(0.0, 0.0), point(10.0, 10.0));
        let s = format!("{}", b);
        assert!(s.contains("0.0000 W"));
        assert!(s.contains("10.0000 N"));
    }
}
