//! # Shape Factories
//!
//! A factory turns one record of text into a validated shape. It runs the parse step and
//! then the invariant step from [`crate::validators`], and reports any failure from
//! either step as a single [`GeometryError::Construction`] for its shape kind, so callers
//! never need to know which sub-step failed.
//!
//! ```rust
//! use shapeyard::{GeometryError, ShapeFactory, ShapeId, SphereFactory};
//!
//! let factory = SphereFactory;
//! let id = ShapeId::new("s1").unwrap();
//! assert!(factory.create_shape("0 0 5 5", &id).is_ok());
//!
//! let err = factory.create_shape("0 0 5 -5", &id).unwrap_err();
//! assert!(matches!(err, GeometryError::Construction { .. }));
//! assert_eq!(err.to_string(), "Failed to create sphere: Sphere radius must be positive");
//! ```

use crate::validators;
use crate::{GeometryError, Point, Shape, ShapeId, ShapeKind, Sphere, Triangle};

/// Builds validated shapes from text records.
pub trait ShapeFactory {
    /// The kind of shape this factory builds.
    fn kind(&self) -> ShapeKind;

    /// How many consecutive non-empty input lines make up one record.
    fn lines_per_record(&self) -> usize {
        1
    }

    /// Parses and validates `data`, wrapping every failure as a construction error.
    fn create_shape(&self, data: &str, id: &ShapeId) -> Result<Shape, GeometryError>;
}

/// Wraps a validator failure as a construction error for `kind`.
fn wrap<T>(kind: ShapeKind, result: Result<T, GeometryError>) -> Result<T, GeometryError> {
    result.map_err(|e| GeometryError::construction(kind, e))
}

////////////////////////////////////////////// Point ///////////////////////////////////////////////////

/// Builds points from `x y [z]` records.
#[derive(Debug, Clone, Copy, Default)]
pub struct PointFactory;

impl PointFactory {
    /// Creates a validated point.
    pub fn create(&self, data: &str, id: &ShapeId) -> Result<Point, GeometryError> {
        wrap(
            ShapeKind::Point,
            validators::parse_point_data(data, id).and_then(|point| {
                validators::validate_point(&point)?;
                Ok(point)
            }),
        )
    }
}

impl ShapeFactory for PointFactory {
    fn kind(&self) -> ShapeKind {
        ShapeKind::Point
    }

    fn create_shape(&self, data: &str, id: &ShapeId) -> Result<Shape, GeometryError> {
        self.create(data, id).map(Shape::from)
    }
}

///////////////////////////////////////////// Triangle /////////////////////////////////////////////////

/// Builds triangles from three point lines.
#[derive(Debug, Clone, Copy, Default)]
pub struct TriangleFactory;

impl TriangleFactory {
    /// Creates a validated triangle.
    pub fn create(&self, data: &str, id: &ShapeId) -> Result<Triangle, GeometryError> {
        wrap(
            ShapeKind::Triangle,
            validators::parse_triangle_data(data, id).and_then(|triangle| {
                validators::validate_triangle(&triangle)?;
                Ok(triangle)
            }),
        )
    }
}

impl ShapeFactory for TriangleFactory {
    fn kind(&self) -> ShapeKind {
        ShapeKind::Triangle
    }

    fn lines_per_record(&self) -> usize {
        3
    }

    fn create_shape(&self, data: &str, id: &ShapeId) -> Result<Shape, GeometryError> {
        self.create(data, id).map(Shape::from)
    }
}

////////////////////////////////////////////// Sphere //////////////////////////////////////////////////

/// Builds spheres from `x y z [radius]` records.
#[derive(Debug, Clone, Copy, Default)]
pub struct SphereFactory;

impl SphereFactory {
    /// Creates a validated sphere.
    pub fn create(&self, data: &str, id: &ShapeId) -> Result<Sphere, GeometryError> {
        wrap(
            ShapeKind::Sphere,
            validators::parse_sphere_data(data, id).and_then(|sphere| {
                validators::validate_sphere(&sphere)?;
                Ok(sphere)
            }),
        )
    }
}

impl ShapeFactory for SphereFactory {
    fn kind(&self) -> ShapeKind {
        ShapeKind::Sphere
    }

    fn create_shape(&self, data: &str, id: &ShapeId) -> Result<Shape, GeometryError> {
        self.create(data, id).map(Shape::from)
    }
}

/// Returns the factory for `kind`.
pub fn factory_for(kind: ShapeKind) -> Box<dyn ShapeFactory> {
    match kind {
        ShapeKind::Point => Box::new(PointFactory),
        ShapeKind::Triangle => Box::new(TriangleFactory),
        ShapeKind::Sphere => Box::new(SphereFactory),
    }
}
