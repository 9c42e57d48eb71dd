use super::{cross_2d, Point2, Tolerance};
use crate::operations::contain::Inclusion;

/// Point-in-polygon by signed crossing number (Hormann & Agathos, "The
/// point in polygon problem for arbitrary polygons").
///
/// The contour closes implicitly from the last point to the first. Vertex
/// hits, hits on horizontal edges and vanishing crossing determinants are
/// reported as [`Inclusion::Boundary`].
#[must_use]
pub fn crossing_number_2d(p: &Point2, contour: &[Point2], tol: &Tolerance) -> Inclusion {
    let n = contour.len();
    if n == 0 {
        return Inclusion::Outside;
    }
    if tol.points_eq(&contour[0], p) {
        return Inclusion::Boundary;
    }
    let scale = p.coords.amax();
    let same_y = |a: f64| tol.is_negligible(a - p.y, scale.max(a.abs()));

    let mut inside = false;
    for i in 0..n {
        let pi = &contour[i];
        let pj = &contour[(i + 1) % n];

        if same_y(pj.y) {
            if tol.points_eq(pj, p) {
                return Inclusion::Boundary;
            }
            if same_y(pi.y) && ((pj.x > p.x) == (pi.x < p.x)) {
                return Inclusion::Boundary;
            }
        }

        if (pi.y < p.y) != (pj.y < p.y) {
            let det = || {
                let a = pi - p;
                let b = pj - p;
                let d = cross_2d(&a, &b);
                (d, a.norm() * b.norm())
            };
            if pi.x >= p.x {
                if pj.x > p.x {
                    inside = !inside;
                } else {
                    let (d, s) = det();
                    if tol.is_negligible(d, s) {
                        return Inclusion::Boundary;
                    }
                    if (d > 0.0) == (pj.y > pi.y) {
                        inside = !inside;
                    }
                }
            } else if pj.x > p.x {
                let (d, s) = det();
                if tol.is_negligible(d, s) {
                    return Inclusion::Boundary;
                }
                if (d > 0.0) == (pj.y > pi.y) {
                    inside = !inside;
                }
            }
        }
    }

    if inside {
        Inclusion::Inside
    } else {
        Inclusion::Outside
    }
}
