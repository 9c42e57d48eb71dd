use super::{Intersection, IntersectionState};
use crate::math::Tolerance;

/// Combines per-edge results of a composite shape.
///
/// The points are the union of all edge points. The state is
/// [`IntersectionState::INTERSECTION`] when any point was found and the
/// state of the last edge otherwise, so a disjoint composite and one that
/// contains the other are not told apart.
#[must_use]
pub fn aggregate(results: impl IntoIterator<Item = Intersection>, tol: &Tolerance) -> Intersection {
    let mut out = Intersection::new();
    let mut last = IntersectionState::NO_INTERSECTION;
    for r in results {
        for p in r.points() {
            out.push(*p, tol);
        }
        last = r.state;
    }
    if out.is_empty() {
        out.state = last;
    } else {
        out.state = IntersectionState::INTERSECTION;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Point2;

    fn hit(x: f64, y: f64, tol: &Tolerance) -> Intersection {
        let mut r = Intersection::with_state(IntersectionState::TANGENT);
        r.push(Point2::new(x, y), tol);
        r
    }

    #[test]
    fn points_are_merged() {
        let tol = Tolerance::default();
        let r = aggregate([hit(0.0, 0.0, &tol), Intersection::new(), hit(0.0, 0.0, &tol), hit(1.0, 0.0, &tol)], &tol);
        assert_eq!(r.len(), 2);
        assert_eq!(r.state, IntersectionState::INTERSECTION);
    }

    #[test]
    fn empty_union_keeps_last_state() {
        let tol = Tolerance::default();
        let r = aggregate(
            [
                Intersection::with_state(IntersectionState::PARALLEL),
                Intersection::with_state(IntersectionState::OUTSIDE),
            ],
            &tol,
        );
        assert!(r.is_empty());
        assert_eq!(r.state, IntersectionState::OUTSIDE);
    }

    #[test]
    fn nothing_to_aggregate() {
        let r = aggregate(std::iter::empty(), &Tolerance::default());
        assert_eq!(r.state, IntersectionState::NO_INTERSECTION);
    }
}
