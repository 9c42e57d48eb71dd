//! Point containment.

mod dispatch;
pub mod polycurve;
pub mod polygon;

use std::ops::BitXor;

pub use dispatch::{classify_point, PointInShape};

/// Position of a point relative to a shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Inclusion {
    Outside,
    Inside,
    /// On the shape within tolerance.
    Boundary,
}

impl Inclusion {
    #[must_use]
    pub fn is_inside(self) -> bool {
        self == Self::Inside
    }

    #[must_use]
    pub fn from_parity(odd: bool) -> Self {
        if odd {
            Self::Inside
        } else {
            Self::Outside
        }
    }
}

/// Even-odd combination of two fills; [`Inclusion::Boundary`] absorbs.
impl BitXor for Inclusion {
    type Output = Self;

    fn bitxor(self, rhs: Self) -> Self {
        match (self, rhs) {
            (Self::Boundary, _) | (_, Self::Boundary) => Self::Boundary,
            (a, b) => Self::from_parity(a.is_inside() != b.is_inside()),
        }
    }
}
