//! # Shapes
//!
//! [`Shape`] is the uniform view over the concrete value types. Every shape exposes an
//! identity, a kind, a human-readable rendering, and a representative point used by
//! spatial predicates:
//!
//! | kind     | representative point |
//! |----------|----------------------|
//! | point    | the point itself     |
//! | triangle | vertex A             |
//! | sphere   | the center           |

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{GeometryError, Point, ShapeId, Sphere, Triangle};

///////////////////////////////////////////// ShapeKind ////////////////////////////////////////////////

/// The kinds of shape the pipeline understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    /// A single point.
    Point,
    /// A triangle of three points.
    Triangle,
    /// A sphere with center and radius.
    Sphere,
}

impl ShapeKind {
    /// Lowercase name, as used in messages and on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeKind::Point => "point",
            ShapeKind::Triangle => "triangle",
            ShapeKind::Sphere => "sphere",
        }
    }
}

impl Display for ShapeKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ShapeKind {
    type Err = GeometryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "point" => Ok(ShapeKind::Point),
            "triangle" => Ok(ShapeKind::Triangle),
            "sphere" => Ok(ShapeKind::Sphere),
            _ => Err(GeometryError::UnknownKind(s.to_string())),
        }
    }
}

/////////////////////////////////////////////// Shape //////////////////////////////////////////////////

/// Any shape the pipeline can build.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Shape {
    /// A point.
    Point(Point),
    /// A triangle.
    Triangle(Triangle),
    /// A sphere.
    Sphere(Sphere),
}

impl Shape {
    /// The shape's identity.
    pub fn id(&self) -> &ShapeId {
        match self {
            Shape::Point(p) => p.id(),
            Shape::Triangle(t) => t.id(),
            Shape::Sphere(s) => s.id(),
        }
    }

    /// The shape's kind.
    pub fn kind(&self) -> ShapeKind {
        match self {
            Shape::Point(_) => ShapeKind::Point,
            Shape::Triangle(_) => ShapeKind::Triangle,
            Shape::Sphere(_) => ShapeKind::Sphere,
        }
    }

    /// The point standing in for this shape's location.
    pub fn representative_point(&self) -> &Point {
        match self {
            Shape::Point(p) => p,
            Shape::Triangle(t) => t.point_a(),
            Shape::Sphere(s) => s.center(),
        }
    }

    /// Returns the triangle if this shape is one.
    pub fn as_triangle(&self) -> Option<&Triangle> {
        match self {
            Shape::Triangle(t) => Some(t),
            _ => None,
        }
    }

    /// Returns the sphere if this shape is one.
    pub fn as_sphere(&self) -> Option<&Sphere> {
        match self {
            Shape::Sphere(s) => Some(s),
            _ => None,
        }
    }
}

impl Display for Shape {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Shape::Point(p) => write!(f, "Point({}): {}", p.id(), p),
            Shape::Triangle(t) => write!(f, "{}", t),
            Shape::Sphere(s) => write!(f, "{}", s),
        }
    }
}

impl From<Point> for Shape {
    fn from(point: Point) -> Self {
        Shape::Point(point)
    }
}

impl From<Triangle> for Shape {
    fn from(triangle: Triangle) -> Self {
        Shape::Triangle(triangle)
    }
}

impl From<Sphere> for Shape {
    fn from(sphere: Sphere) -> Self {
        Shape::Sphere(sphere)
    }
}
