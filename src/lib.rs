pub mod error;
pub mod geometry;
pub mod math;
pub mod operations;

pub use error::{PlinthError, Result};
pub use geometry::{Shape, ShapeKind};
pub use math::Tolerance;
pub use operations::contain::{classify_point, Inclusion};
pub use operations::intersect::{intersect, self_intersection, Intersection, IntersectionState};
