use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::{Deserialize, Serialize};

use crate::ShapeId;

/////////////////////////////////////////////// Point //////////////////////////////////////////////////

/// An identified point in 3D space.
///
/// Construction performs no validation; see [`crate::validators::validate_point`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Point {
    id: ShapeId,
    x: f64,
    y: f64,
    z: f64,
}

impl Point {
    /// Creates a point from three coordinates.
    pub fn new(id: ShapeId, x: f64, y: f64, z: f64) -> Self {
        Point { id, x, y, z }
    }

    /// Creates a point in the xy plane (z = 0).
    pub fn new_2d(id: ShapeId, x: f64, y: f64) -> Self {
        Point::new(id, x, y, 0.0)
    }

    /// The point's identity.
    pub fn id(&self) -> &ShapeId {
        &self.id
    }

    /// The x coordinate.
    pub fn x(&self) -> f64 {
        self.x
    }

    /// The y coordinate.
    pub fn y(&self) -> f64 {
        self.y
    }

    /// The z coordinate.
    pub fn z(&self) -> f64 {
        self.z
    }

    /// Whether all three coordinates are finite.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    /// Exact coordinate equality; identities are ignored.
    pub fn coordinates_equal(&self, other: &Point) -> bool {
        self.x == other.x && self.y == other.y && self.z == other.z
    }

    /// Euclidean distance to `other` in 3D.
    pub fn distance_to(&self, other: &Point) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        let dz = other.z - self.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }

    /// Euclidean distance to the origin.
    pub fn distance_from_origin(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }
}

impl Display for Point {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "Point({}, {}, {})", self.x, self.y, self.z)
    }
}
