//! # Record Validation
//!
//! Validation happens in three steps per shape kind:
//!
//! 1. `validate_<kind>_data` checks raw text against the record grammar and answers
//!    with a plain `bool`.
//! 2. `parse_<kind>_data` re-runs the grammar check and builds the value type, failing
//!    with [`GeometryError::Format`] when the text is malformed.
//! 3. `validate_<kind>` checks the domain invariants of an already-built value and fails
//!    with [`GeometryError::Invariant`] on the first violated rule.
//!
//! ## Grammars
//!
//! ```text
//! coordinate := -?\d+(\.\d+)?
//! point      := coordinate coordinate [coordinate]
//! sphere     := coordinate coordinate coordinate [radius]
//! triangle   := point NEWLINE point NEWLINE point {NEWLINE point}
//! ```
//!
//! Tokens are whitespace separated. Blank lines inside triangle text are ignored.
//!
//! ## Usage Examples
//!
//! ```rust
//! use shapeyard::ShapeId;
//! use shapeyard::validators::{parse_sphere_data, validate_sphere};
//!
//! let sphere = parse_sphere_data("0 0 0 -1", &ShapeId::new("s1").unwrap()).unwrap();
//! assert_eq!(sphere.radius(), -1.0);
//! assert!(validate_sphere(&sphere).is_err());
//! ```

use std::sync::LazyLock;

use regex::Regex;

use crate::{DEFAULT_RADIUS, EPSILON, GeometryError, Point, ShapeId, ShapeKind, Sphere, Triangle};

////////////////////////////////////////////// Grammar /////////////////////////////////////////////////

static COORDINATE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-?\d+(\.\d+)?$").expect("coordinate regex compiles"));

/// Whether `token` is a signed decimal literal.
pub fn is_coordinate(token: &str) -> bool {
    COORDINATE_REGEX.is_match(token)
}

fn tokens(data: &str) -> Vec<&str> {
    data.split_whitespace().collect()
}

fn tokens_match(tokens: &[&str], min: usize, max: usize) -> bool {
    (min..=max).contains(&tokens.len()) && tokens.iter().all(|t| is_coordinate(t))
}

fn parse_tokens(kind: ShapeKind, data: &str, tokens: &[&str]) -> Result<Vec<f64>, GeometryError> {
    tokens
        .iter()
        .map(|t| t.parse::<f64>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|_| GeometryError::format(kind, data))
}

fn non_empty_lines(data: &str) -> impl Iterator<Item = &str> {
    data.lines().map(str::trim).filter(|line| !line.is_empty())
}

/////////////////////////////////////////////// Point //////////////////////////////////////////////////

/// Checks that `data` is two or three coordinate tokens.
pub fn validate_point_data(data: &str) -> bool {
    tokens_match(&tokens(data), 2, 3)
}

/// Parses a point record; z defaults to 0 for two tokens.
///
/// The coordinates are checked for finiteness before the point is returned.
pub fn parse_point_data(data: &str, id: &ShapeId) -> Result<Point, GeometryError> {
    if !validate_point_data(data) {
        return Err(GeometryError::format(ShapeKind::Point, data));
    }
    let values = parse_tokens(ShapeKind::Point, data, &tokens(data))?;
    let z = values.get(2).copied().unwrap_or(0.0);
    validate_coordinates(values[0], values[1], z)?;
    Ok(Point::new(id.clone(), values[0], values[1], z))
}

/// Fails unless all three coordinates are finite.
pub fn validate_coordinates(x: f64, y: f64, z: f64) -> Result<(), GeometryError> {
    if !(x.is_finite() && y.is_finite() && z.is_finite()) {
        return Err(GeometryError::invariant(
            ShapeKind::Point,
            "Coordinates must be finite numbers",
        ));
    }
    Ok(())
}

/// Checks the invariants of a constructed point.
pub fn validate_point(point: &Point) -> Result<(), GeometryError> {
    validate_coordinates(point.x(), point.y(), point.z())
}

////////////////////////////////////////////// Sphere //////////////////////////////////////////////////

/// Checks that `data` is three or four coordinate tokens.
///
/// A negative radius is grammatical; it is rejected by [`validate_sphere`].
pub fn validate_sphere_data(data: &str) -> bool {
    tokens_match(&tokens(data), 3, 4)
}

/// Parses a sphere record; the radius defaults to [`DEFAULT_RADIUS`].
///
/// The center is identified as `<id>_center`.
pub fn parse_sphere_data(data: &str, id: &ShapeId) -> Result<Sphere, GeometryError> {
    if !validate_sphere_data(data) {
        return Err(GeometryError::format(ShapeKind::Sphere, data));
    }
    let values = parse_tokens(ShapeKind::Sphere, data, &tokens(data))?;
    let radius = values.get(3).copied().unwrap_or(DEFAULT_RADIUS);
    let center = Point::new(id.child("center"), values[0], values[1], values[2]);
    Ok(Sphere::new(id.clone(), center, radius))
}

/// Checks the invariants of a constructed sphere.
pub fn validate_sphere(sphere: &Sphere) -> Result<(), GeometryError> {
    // NaN fails both comparisons, so finiteness is checked first.
    if !sphere.radius().is_finite() {
        return Err(GeometryError::invariant(
            ShapeKind::Sphere,
            "Sphere radius must be a finite number",
        ));
    }
    if sphere.radius() <= 0.0 {
        return Err(GeometryError::invariant(
            ShapeKind::Sphere,
            "Sphere radius must be positive",
        ));
    }
    let center = sphere.center();
    validate_coordinates(center.x(), center.y(), center.z()).map_err(|_| {
        GeometryError::invariant(
            ShapeKind::Sphere,
            "Sphere center coordinates must be finite numbers",
        )
    })
}

///////////////////////////////////////////// Triangle /////////////////////////////////////////////////

/// Checks that `data` holds at least three non-empty lines, each a point record.
pub fn validate_triangle_data(data: &str) -> bool {
    let mut count = 0;
    for line in non_empty_lines(data) {
        if !validate_point_data(line) {
            return false;
        }
        count += 1;
    }
    count >= 3
}

/// Parses the first three non-empty lines as vertices `<id>_A`, `<id>_B`, `<id>_C`.
pub fn parse_triangle_data(data: &str, id: &ShapeId) -> Result<Triangle, GeometryError> {
    if !validate_triangle_data(data) {
        return Err(GeometryError::format(ShapeKind::Triangle, data));
    }
    let lines: Vec<&str> = non_empty_lines(data).take(3).collect();
    let point_a = parse_point_data(lines[0], &id.child("A"))?;
    let point_b = parse_point_data(lines[1], &id.child("B"))?;
    let point_c = parse_point_data(lines[2], &id.child("C"))?;
    Ok(Triangle::new(id.clone(), point_a, point_b, point_c))
}

/// Checks the invariants of a constructed triangle.
///
/// Vertices must be finite, pairwise distinct, and not collinear in the xy projection.
pub fn validate_triangle(triangle: &Triangle) -> Result<(), GeometryError> {
    let (a, b, c) = (triangle.point_a(), triangle.point_b(), triangle.point_c());

    if !(a.is_finite() && b.is_finite() && c.is_finite()) {
        return Err(GeometryError::invariant(
            ShapeKind::Triangle,
            "Triangle points must have finite coordinates",
        ));
    }

    if a.coordinates_equal(b) || b.coordinates_equal(c) || a.coordinates_equal(c) {
        return Err(GeometryError::invariant(
            ShapeKind::Triangle,
            "Triangle points must be distinct",
        ));
    }

    if are_points_collinear(a, b, c) {
        return Err(GeometryError::invariant(
            ShapeKind::Triangle,
            "Triangle points must not be collinear",
        ));
    }

    Ok(())
}

/// Twice the signed area of ABC from the 2D cross product of (B - A) and (C - A).
///
/// Only x and y take part; z is ignored even for 3D triangles.
pub fn doubled_signed_area_xy(a: &Point, b: &Point, c: &Point) -> f64 {
    (b.x() - a.x()) * (c.y() - a.y()) - (c.x() - a.x()) * (b.y() - a.y())
}

/// Collinear iff the projected area is below [`EPSILON`].
pub fn are_points_collinear(a: &Point, b: &Point, c: &Point) -> bool {
    doubled_signed_area_xy(a, b, c).abs() / 2.0 < EPSILON
}
