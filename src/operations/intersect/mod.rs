//! Pairwise intersection of planar shapes.

mod aggregate;
pub mod conic;
pub mod curve;
mod dispatch;
pub mod linear;
mod self_intersect;

use bitflags::bitflags;
use smallvec::SmallVec;

use crate::math::{Point2, Tolerance};

pub use aggregate::aggregate;
pub use dispatch::{intersect, is_supported, ShapeIntersect, UNSUPPORTED_PAIRS};
pub use self_intersect::{self_intersection, SelfIntersect};

bitflags! {
    /// Classification flags of an [`Intersection`].
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct IntersectionState: u8 {
        const INTERSECTION = 0b0000_0001;
        const TANGENT      = 0b0000_0010;
        const COINCIDENT   = 0b0000_0100;
        const PARALLEL     = 0b0000_1000;
        const INSIDE       = 0b0001_0000;
        const OUTSIDE      = 0b0010_0000;
        const BOUNDARY     = 0b0100_0000;
    }
}

impl IntersectionState {
    /// No flag set.
    pub const NO_INTERSECTION: Self = Self::empty();
}

/// Result of intersecting two shapes: state flags plus the intersection
/// points, unique within tolerance.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Intersection {
    pub state: IntersectionState,
    points: SmallVec<[Point2; 4]>,
}

impl Intersection {
    /// An empty result with [`IntersectionState::NO_INTERSECTION`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty result carrying `state`.
    #[must_use]
    pub fn with_state(state: IntersectionState) -> Self {
        Self {
            state,
            points: SmallVec::new(),
        }
    }

    #[must_use]
    pub fn points(&self) -> &[Point2] {
        &self.points
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Whether any of `flags` is set.
    #[must_use]
    pub fn has(&self, flags: IntersectionState) -> bool {
        self.state.intersects(flags)
    }

    /// Adds `p` unless an equal point is already present, and marks the
    /// result as [`IntersectionState::INTERSECTION`].
    pub fn push(&mut self, p: Point2, tol: &Tolerance) {
        if !self.points.iter().any(|q| tol.points_eq(q, &p)) {
            self.points.push(p);
        }
        self.state.insert(IntersectionState::INTERSECTION);
    }

    /// Adds every point of `other` and merges its flags.
    pub fn extend(&mut self, other: &Self, tol: &Tolerance) {
        for p in &other.points {
            self.push(*p, tol);
        }
        self.state.insert(other.state);
    }

    /// Keeps the points accepted by `keep`. When none survive, the
    /// [`IntersectionState::INTERSECTION`] and [`IntersectionState::TANGENT`]
    /// flags are cleared.
    pub fn retain(&mut self, mut keep: impl FnMut(&Point2) -> bool) {
        self.points.retain(|p| keep(p));
        if self.points.is_empty() {
            self.state
                .remove(IntersectionState::INTERSECTION | IntersectionState::TANGENT);
        }
    }
}
