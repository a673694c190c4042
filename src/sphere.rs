use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::{Deserialize, Serialize};

use crate::{Point, ShapeId};

/// A sphere given by its center and radius.
///
/// The radius is not checked at construction; see [`crate::validators::validate_sphere`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sphere {
    id: ShapeId,
    center: Point,
    radius: f64,
}

impl Sphere {
    /// Creates a sphere.
    pub fn new(id: ShapeId, center: Point, radius: f64) -> Self {
        Sphere { id, center, radius }
    }

    /// The sphere's identity.
    pub fn id(&self) -> &ShapeId {
        &self.id
    }

    /// The center point.
    pub fn center(&self) -> &Point {
        &self.center
    }

    /// The radius.
    pub fn radius(&self) -> f64 {
        self.radius
    }
}

impl Display for Sphere {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(
            f,
            "Sphere({}): center={}, radius={}",
            self.id, self.center, self.radius
        )
    }
}
