use std::fmt;

use super::bezier::{CubicBezier, QuadraticBezier};
use super::conic::{Circle, CircularArc, Ellipse, EllipticalArc};
use super::linear::{Extent, Linear};
use super::polycurve::{Polycurve, PolycurveEdge};
use super::polygon::{contour_edges, Polygon, PolygonWithHoles, Rect, Triangle};
use crate::error::GeometryError;
use crate::math::{all_finite, Point2, Tolerance};

/// Kind tag of a [`Shape`].
///
/// The declaration order is the dispatch order: a pair is always solved
/// with the lower kind first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ShapeKind {
    Point,
    Line,
    Ray,
    Segment,
    Circle,
    Ellipse,
    CircularArc,
    EllipticalArc,
    QuadraticBezier,
    CubicBezier,
    Triangle,
    Rectangle,
    Polygon,
    PolygonWithHoles,
    Polycurve,
}

impl ShapeKind {
    /// Human-readable name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Point => "point",
            Self::Line => "line",
            Self::Ray => "ray",
            Self::Segment => "segment",
            Self::Circle => "circle",
            Self::Ellipse => "ellipse",
            Self::CircularArc => "circular arc",
            Self::EllipticalArc => "elliptical arc",
            Self::QuadraticBezier => "quadratic bezier",
            Self::CubicBezier => "cubic bezier",
            Self::Triangle => "triangle",
            Self::Rectangle => "rectangle",
            Self::Polygon => "polygon",
            Self::PolygonWithHoles => "polygon with holes",
            Self::Polycurve => "polycurve",
        }
    }

    /// Whether shapes of this kind enclose an area.
    #[must_use]
    pub fn is_closed(self) -> bool {
        matches!(
            self,
            Self::Circle
                | Self::Ellipse
                | Self::Triangle
                | Self::Rectangle
                | Self::Polygon
                | Self::PolygonWithHoles
                | Self::Polycurve
        )
    }

    /// Whether shapes of this kind are made of several edges.
    #[must_use]
    pub fn is_composite(self) -> bool {
        self >= Self::Triangle
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Closed set of planar primitives accepted by the dispatch layer.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Point(Point2),
    /// Line, ray or segment depending on the extent.
    Linear(Linear),
    Circle(Circle),
    Ellipse(Ellipse),
    CircularArc(CircularArc),
    EllipticalArc(EllipticalArc),
    QuadraticBezier(QuadraticBezier),
    CubicBezier(CubicBezier),
    Triangle(Triangle),
    Rectangle(Rect),
    Polygon(Polygon),
    PolygonWithHoles(PolygonWithHoles),
    Polycurve(Polycurve),
}

impl Shape {
    #[must_use]
    pub fn kind(&self) -> ShapeKind {
        match self {
            Self::Point(_) => ShapeKind::Point,
            Self::Linear(l) => match l.extent {
                Extent::Line => ShapeKind::Line,
                Extent::Ray => ShapeKind::Ray,
                Extent::Segment => ShapeKind::Segment,
            },
            Self::Circle(_) => ShapeKind::Circle,
            Self::Ellipse(_) => ShapeKind::Ellipse,
            Self::CircularArc(_) => ShapeKind::CircularArc,
            Self::EllipticalArc(_) => ShapeKind::EllipticalArc,
            Self::QuadraticBezier(_) => ShapeKind::QuadraticBezier,
            Self::CubicBezier(_) => ShapeKind::CubicBezier,
            Self::Triangle(_) => ShapeKind::Triangle,
            Self::Rectangle(_) => ShapeKind::Rectangle,
            Self::Polygon(_) => ShapeKind::Polygon,
            Self::PolygonWithHoles(_) => ShapeKind::PolygonWithHoles,
            Self::Polycurve(_) => ShapeKind::Polycurve,
        }
    }

    /// Rejects non-finite coordinates and contours too small to enclose
    /// anything.
    ///
    /// # Errors
    ///
    /// [`GeometryError::NonFinite`] for NaN or infinite input and
    /// [`GeometryError::Degenerate`] for polygons with fewer than three
    /// vertices or empty polycurves.
    pub fn validate(&self) -> Result<(), GeometryError> {
        let name = self.kind().name();
        let finite = match self {
            Self::Point(p) => all_finite([p]),
            Self::Linear(l) => all_finite([&l.origin]) && l.direction.iter().all(|v| v.is_finite()),
            Self::Circle(c) => all_finite([&c.center]) && c.radius.is_finite(),
            Self::Ellipse(e) => ellipse_finite(e),
            Self::CircularArc(a) => {
                all_finite([&a.center])
                    && [a.radius, a.start_angle, a.sweep_angle].iter().all(|v| v.is_finite())
            }
            Self::EllipticalArc(a) => {
                ellipse_finite(&a.ellipse) && a.start_angle.is_finite() && a.sweep_angle.is_finite()
            }
            Self::QuadraticBezier(q) => all_finite(&q.points()),
            Self::CubicBezier(c) => all_finite(&c.points()),
            Self::Triangle(t) => all_finite(&t.vertices()),
            Self::Rectangle(r) => all_finite(&r.vertices()),
            Self::Polygon(p) => {
                check_contour(p, name)?;
                true
            }
            Self::PolygonWithHoles(p) => {
                if p.contours.is_empty() {
                    return Err(GeometryError::Degenerate(format!("{name} without contours")));
                }
                for contour in &p.contours {
                    check_contour(contour, name)?;
                }
                true
            }
            Self::Polycurve(pc) => {
                if pc.edges.is_empty() {
                    return Err(GeometryError::Degenerate(format!("{name} without edges")));
                }
                pc.edges.iter().all(|e| match e {
                    PolycurveEdge::Point(p) => all_finite([p]),
                    PolycurveEdge::Segment(l) => {
                        all_finite([&l.origin]) && l.direction.iter().all(|v| v.is_finite())
                    }
                    PolycurveEdge::Quadratic(q) => all_finite(&q.points()),
                    PolycurveEdge::Cubic(c) => all_finite(&c.points()),
                    PolycurveEdge::Arc(a) => {
                        ellipse_finite(&a.ellipse)
                            && a.start_angle.is_finite()
                            && a.sweep_angle.is_finite()
                    }
                })
            }
        };
        if finite {
            Ok(())
        } else {
            Err(GeometryError::NonFinite(name))
        }
    }

    /// Edges of a composite shape as standalone shapes, `None` for
    /// primitives.
    #[must_use]
    pub fn edges(&self, tol: &Tolerance) -> Option<Vec<Shape>> {
        let edges = match self {
            Self::Triangle(t) => contour_edges(&t.vertices()).map(Shape::Linear).collect(),
            Self::Rectangle(r) => contour_edges(&r.vertices()).map(Shape::Linear).collect(),
            Self::Polygon(p) => p.edges().map(Shape::Linear).collect(),
            Self::PolygonWithHoles(p) => p.edges().map(Shape::Linear).collect(),
            Self::Polycurve(pc) => pc.closed_edges(tol).map(Shape::from).collect(),
            _ => return None,
        };
        Some(edges)
    }
}

fn ellipse_finite(e: &Ellipse) -> bool {
    all_finite([&e.center]) && [e.rx, e.ry, e.cos, e.sin].iter().all(|v| v.is_finite())
}

fn check_contour(p: &Polygon, name: &'static str) -> Result<(), GeometryError> {
    if p.points.len() < 3 {
        return Err(GeometryError::Degenerate(format!(
            "{name} contour with {} vertices",
            p.points.len()
        )));
    }
    if all_finite(&p.points) {
        Ok(())
    } else {
        Err(GeometryError::NonFinite(name))
    }
}

impl From<PolycurveEdge> for Shape {
    fn from(edge: PolycurveEdge) -> Self {
        match edge {
            PolycurveEdge::Point(p) => Self::Point(p),
            PolycurveEdge::Segment(l) => Self::Linear(l),
            PolycurveEdge::Quadratic(q) => Self::QuadraticBezier(q),
            PolycurveEdge::Cubic(c) => Self::CubicBezier(c),
            PolycurveEdge::Arc(a) => Self::EllipticalArc(a),
        }
    }
}

macro_rules! impl_from_primitive {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Shape {
                fn from(value: $ty) -> Self {
                    Self::$variant(value)
                }
            }
        )*
    };
}

impl_from_primitive! {
    Point2 => Point,
    Linear => Linear,
    Circle => Circle,
    Ellipse => Ellipse,
    CircularArc => CircularArc,
    EllipticalArc => EllipticalArc,
    QuadraticBezier => QuadraticBezier,
    CubicBezier => CubicBezier,
    Triangle => Triangle,
    Rect => Rectangle,
    Polygon => Polygon,
    PolygonWithHoles => PolygonWithHoles,
    Polycurve => Polycurve,
}
