use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::{Deserialize, Serialize};

use crate::validators::{self, validate_triangle};
use crate::{EPSILON, GeometryError, Triangle};

/// Classification of a triangle by its side lengths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TriangleType {
    /// All three sides equal.
    Equilateral,
    /// Exactly two sides equal.
    Isosceles,
    /// No sides equal.
    Scalene,
}

impl Display for TriangleType {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            TriangleType::Equilateral => write!(f, "equilateral"),
            TriangleType::Isosceles => write!(f, "isosceles"),
            TriangleType::Scalene => write!(f, "scalene"),
        }
    }
}

/// Classification of a triangle by its largest angle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AngleType {
    /// One right angle.
    Right,
    /// All angles below 90 degrees.
    Acute,
    /// One angle above 90 degrees.
    Obtuse,
}

impl Display for AngleType {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            AngleType::Right => write!(f, "right"),
            AngleType::Acute => write!(f, "acute"),
            AngleType::Obtuse => write!(f, "obtuse"),
        }
    }
}

fn nearly_equal(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

/// Squared side lengths in ascending order.
fn sorted_squared_sides(triangle: &Triangle) -> [f64; 3] {
    let mut squares = triangle.sides().map(|side| side * side);
    squares.sort_by(f64::total_cmp);
    squares
}

/// Half the norm of the 3D cross product of (B - A) and (C - A).
///
/// Works from the coordinates rather than the side lengths, so long thin triangles
/// keep their area instead of cancelling to zero.
pub fn calculate_area(triangle: &Triangle) -> Result<f64, GeometryError> {
    validate_triangle(triangle)?;
    let (a, b, c) = (triangle.point_a(), triangle.point_b(), triangle.point_c());
    let ab = [b.x() - a.x(), b.y() - a.y(), b.z() - a.z()];
    let ac = [c.x() - a.x(), c.y() - a.y(), c.z() - a.z()];
    let cross = [
        ab[1] * ac[2] - ab[2] * ac[1],
        ab[2] * ac[0] - ab[0] * ac[2],
        ab[0] * ac[1] - ab[1] * ac[0],
    ];
    Ok(cross.iter().map(|v| v * v).sum::<f64>().sqrt() / 2.0)
}

/// Sum of the three side lengths.
pub fn calculate_perimeter(triangle: &Triangle) -> Result<f64, GeometryError> {
    validate_triangle(triangle)?;
    Ok(triangle.sides().iter().sum())
}

/// Whether the vertices are collinear in the xy projection.
///
/// Does not validate; this is the predicate validation itself relies on.
pub fn are_points_collinear(triangle: &Triangle) -> bool {
    validators::are_points_collinear(triangle.point_a(), triangle.point_b(), triangle.point_c())
}

/// Whether a² + b² = c² within [`EPSILON`] for sorted sides.
pub fn is_right_triangle(triangle: &Triangle) -> Result<bool, GeometryError> {
    validate_triangle(triangle)?;
    let [a2, b2, c2] = sorted_squared_sides(triangle);
    Ok(nearly_equal(a2 + b2, c2))
}

/// Whether any two sides are equal within [`EPSILON`].
pub fn is_isosceles_triangle(triangle: &Triangle) -> Result<bool, GeometryError> {
    validate_triangle(triangle)?;
    let [a, b, c] = triangle.sides();
    Ok(nearly_equal(a, b) || nearly_equal(b, c) || nearly_equal(a, c))
}

/// Whether all three sides are equal within [`EPSILON`].
pub fn is_equilateral_triangle(triangle: &Triangle) -> Result<bool, GeometryError> {
    validate_triangle(triangle)?;
    let [a, b, c] = triangle.sides();
    Ok(nearly_equal(a, b) && nearly_equal(b, c))
}

/// Whether a² + b² > c² for sorted sides.
pub fn is_acute_triangle(triangle: &Triangle) -> Result<bool, GeometryError> {
    validate_triangle(triangle)?;
    let [a2, b2, c2] = sorted_squared_sides(triangle);
    Ok(a2 + b2 > c2)
}

/// Whether a² + b² < c² for sorted sides.
pub fn is_obtuse_triangle(triangle: &Triangle) -> Result<bool, GeometryError> {
    validate_triangle(triangle)?;
    let [a2, b2, c2] = sorted_squared_sides(triangle);
    Ok(a2 + b2 < c2)
}

/// Classifies by sides, checking equilateral before isosceles.
pub fn triangle_type(triangle: &Triangle) -> Result<TriangleType, GeometryError> {
    if is_equilateral_triangle(triangle)? {
        Ok(TriangleType::Equilateral)
    } else if is_isosceles_triangle(triangle)? {
        Ok(TriangleType::Isosceles)
    } else {
        Ok(TriangleType::Scalene)
    }
}

/// Classifies by angles: right first, then acute, otherwise obtuse.
pub fn angle_type(triangle: &Triangle) -> Result<AngleType, GeometryError> {
    if is_right_triangle(triangle)? {
        Ok(AngleType::Right)
    } else if is_acute_triangle(triangle)? {
        Ok(AngleType::Acute)
    } else {
        Ok(AngleType::Obtuse)
    }
}
