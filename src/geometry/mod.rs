pub mod bezier;
pub mod conic;
pub mod linear;
pub mod polycurve;
pub mod polygon;
pub mod shape;

pub use bezier::{BezierCurve, CubicBezier, QuadraticBezier};
pub use conic::{Circle, CircularArc, Conic, Ellipse, EllipticalArc};
pub use linear::{Extent, Linear};
pub use polycurve::{Polycurve, PolycurveEdge};
pub use polygon::{Polygon, PolygonWithHoles, Rect, Triangle};
pub use shape::{Shape, ShapeKind};
