//! Containment for closed primitives with straight or conic boundaries.

use super::Inclusion;
use crate::geometry::{Ellipse, Polygon, PolygonWithHoles, Rect, Triangle};
use crate::math::polygon_2d::crossing_number_2d;
use crate::math::{Point2, Tolerance};

/// Classifies `p` against a filled ellipse using its unit-frame level.
///
/// The level `|u|² − 1` is about twice the relative radial distance, so the
/// boundary band is scaled back to world units by the smaller radius.
#[must_use]
pub fn ellipse_inclusion(p: &Point2, e: &Ellipse, tol: &Tolerance) -> Inclusion {
    let level = e.level(p);
    let dist = 0.5 * level.abs() * e.rx.abs().min(e.ry.abs());
    let scale = p.coords.amax().max(e.center.coords.amax());
    if tol.is_negligible(dist, scale) {
        Inclusion::Boundary
    } else if level < 0.0 {
        Inclusion::Inside
    } else {
        Inclusion::Outside
    }
}

#[must_use]
pub fn triangle_inclusion(p: &Point2, t: &Triangle, tol: &Tolerance) -> Inclusion {
    crossing_number_2d(p, &t.vertices(), tol)
}

#[must_use]
pub fn rect_inclusion(p: &Point2, r: &Rect, tol: &Tolerance) -> Inclusion {
    crossing_number_2d(p, &r.vertices(), tol)
}

#[must_use]
pub fn polygon_inclusion(p: &Point2, poly: &Polygon, tol: &Tolerance) -> Inclusion {
    crossing_number_2d(p, &poly.points, tol)
}

/// Even-odd fill over every contour; a hit on any contour is a boundary
/// hit.
#[must_use]
pub fn polygon_with_holes_inclusion(p: &Point2, poly: &PolygonWithHoles, tol: &Tolerance) -> Inclusion {
    let mut acc = Inclusion::Outside;
    for contour in &poly.contours {
        acc = acc ^ polygon_inclusion(p, contour, tol);
        if acc == Inclusion::Boundary {
            break;
        }
    }
    acc
}

#[cfg(test)]
mod tests {
    use std::f64::consts::FRAC_PI_4;

    use super::*;

    fn square(min: f64, max: f64) -> Polygon {
        Polygon::new(Rect::new(Point2::new(min, min), Point2::new(max, max)).vertices().to_vec())
    }

    #[test]
    fn ellipse_regions() {
        let tol = Tolerance::default();
        let e = Ellipse::new(Point2::new(1.0, 1.0), 3.0, 1.0, FRAC_PI_4);
        assert_eq!(ellipse_inclusion(&e.center, &e, &tol), Inclusion::Inside);
        assert_eq!(ellipse_inclusion(&e.point_at(0.7), &e, &tol), Inclusion::Boundary);
        assert_eq!(ellipse_inclusion(&Point2::new(3.0, -1.0), &e, &tol), Inclusion::Outside);
    }

    #[test]
    fn rect_regions() {
        let tol = Tolerance::default();
        let r = Rect::new(Point2::new(-1.0, -1.0), Point2::new(1.0, 1.0));
        assert_eq!(rect_inclusion(&Point2::new(0.0, 0.0), &r, &tol), Inclusion::Inside);
        assert_eq!(rect_inclusion(&Point2::new(1.0, 0.0), &r, &tol), Inclusion::Boundary);
        assert_eq!(rect_inclusion(&Point2::new(-1.0, -1.0), &r, &tol), Inclusion::Boundary);
        assert_eq!(rect_inclusion(&Point2::new(1.0, 2.0), &r, &tol), Inclusion::Outside);
        assert_eq!(rect_inclusion(&Point2::new(3.0, 1.0), &r, &tol), Inclusion::Outside);
    }

    #[test]
    fn triangle_regions() {
        let tol = Tolerance::default();
        let t = Triangle::new(Point2::new(0.0, 0.0), Point2::new(4.0, 0.0), Point2::new(0.0, 4.0));
        assert_eq!(triangle_inclusion(&Point2::new(1.0, 1.0), &t, &tol), Inclusion::Inside);
        assert_eq!(triangle_inclusion(&Point2::new(2.0, 2.0), &t, &tol), Inclusion::Boundary);
        assert_eq!(triangle_inclusion(&Point2::new(3.0, 3.0), &t, &tol), Inclusion::Outside);
    }

    #[test]
    fn holes_are_outside() {
        let tol = Tolerance::default();
        let shape = PolygonWithHoles::new(vec![square(0.0, 10.0), square(4.0, 6.0)]);
        assert_eq!(polygon_with_holes_inclusion(&Point2::new(1.0, 1.0), &shape, &tol), Inclusion::Inside);
        assert_eq!(polygon_with_holes_inclusion(&Point2::new(5.0, 5.0), &shape, &tol), Inclusion::Outside);
        assert_eq!(polygon_with_holes_inclusion(&Point2::new(4.0, 5.0), &shape, &tol), Inclusion::Boundary);
        assert_eq!(polygon_with_holes_inclusion(&Point2::new(11.0, 5.0), &shape, &tol), Inclusion::Outside);
    }
}
