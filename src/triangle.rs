use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::{Deserialize, Serialize};

use crate::{Point, ShapeId};

/// A triangle owning its three vertices.
///
/// Any three points can be assembled into a `Triangle`; distinctness and
/// non-collinearity are checked by [`crate::validators::validate_triangle`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Triangle {
    id: ShapeId,
    point_a: Point,
    point_b: Point,
    point_c: Point,
}

impl Triangle {
    /// Assembles a triangle from three vertices.
    pub fn new(id: ShapeId, point_a: Point, point_b: Point, point_c: Point) -> Self {
        Triangle {
            id,
            point_a,
            point_b,
            point_c,
        }
    }

    /// The triangle's identity.
    pub fn id(&self) -> &ShapeId {
        &self.id
    }

    /// Vertex A.
    pub fn point_a(&self) -> &Point {
        &self.point_a
    }

    /// Vertex B.
    pub fn point_b(&self) -> &Point {
        &self.point_b
    }

    /// Vertex C.
    pub fn point_c(&self) -> &Point {
        &self.point_c
    }

    /// Side lengths opposite A, B and C respectively: |BC|, |AC|, |AB|.
    pub fn sides(&self) -> [f64; 3] {
        [
            self.point_b.distance_to(&self.point_c),
            self.point_a.distance_to(&self.point_c),
            self.point_a.distance_to(&self.point_b),
        ]
    }
}

impl Display for Triangle {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(
            f,
            "Triangle({}): {}, {}, {}",
            self.id, self.point_a, self.point_b, self.point_c
        )
    }
}
