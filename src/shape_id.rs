use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

////////////////////////////////////////////// ShapeId /////////////////////////////////////////////////

/// Identity of a shape: a non-empty string without whitespace.
///
/// Identifiers order lexicographically, which is the default repository ordering.
///
/// ```
/// # use shapeyard::ShapeId;
/// let id: ShapeId = "triangle1".parse().unwrap();
/// assert_eq!(id.child("A").to_string(), "triangle1_A");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ShapeId(String);

impl ShapeId {
    /// Creates an identifier, rejecting empty or whitespace-bearing strings.
    pub fn new(id: impl Into<String>) -> Result<Self, ShapeIdParseError> {
        let id = id.into();
        if id.is_empty() {
            return Err(ShapeIdParseError::Empty);
        }
        if id.chars().any(char::is_whitespace) {
            return Err(ShapeIdParseError::ContainsWhitespace);
        }
        Ok(ShapeId(id))
    }

    /// Derives the identifier of a sub-shape, e.g. `t1` → `t1_A`.
    pub fn child(&self, suffix: &str) -> ShapeId {
        ShapeId(format!("{}_{}", self.0, suffix))
    }

    /// Synthesized identifier for the record starting at 1-based `line`.
    pub fn for_line(line: usize) -> ShapeId {
        ShapeId(format!("shape_{}", line))
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/////////////////////////////////////////// Display and FromStr ///////////////////////////////////////

impl Display for ShapeId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.0)
    }
}

/// Reasons a string is not a valid [`ShapeId`].
#[derive(Debug, PartialEq, Eq)]
pub enum ShapeIdParseError {
    /// The string is empty.
    Empty,
    /// The string contains whitespace.
    ContainsWhitespace,
}

impl Display for ShapeIdParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            ShapeIdParseError::Empty => write!(f, "Shape id must not be empty"),
            ShapeIdParseError::ContainsWhitespace => {
                write!(f, "Shape id must not contain whitespace")
            }
        }
    }
}

impl std::error::Error for ShapeIdParseError {}

impl FromStr for ShapeId {
    type Err = ShapeIdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ShapeId::new(s)
    }
}

impl TryFrom<String> for ShapeId {
    type Error = ShapeIdParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        ShapeId::new(value)
    }
}

impl From<ShapeId> for String {
    fn from(id: ShapeId) -> Self {
        id.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shape_id_from_str_valid() {
        let id = ShapeId::from_str("sphere_7").unwrap();
        assert_eq!(id.as_str(), "sphere_7");
        assert_eq!(id.to_string(), "sphere_7");
    }

    #[test]
    fn shape_id_rejects_empty() {
        assert_eq!(ShapeId::from_str(""), Err(ShapeIdParseError::Empty));
    }

    #[test]
    fn shape_id_rejects_whitespace() {
        assert_eq!(
            ShapeId::from_str("my shape"),
            Err(ShapeIdParseError::ContainsWhitespace)
        );
    }

    #[test]
    fn child_ids_use_underscore_suffix() {
        let id = ShapeId::new("t1").unwrap();
        assert_eq!(id.child("A").as_str(), "t1_A");
        assert_eq!(id.child("center").as_str(), "t1_center");
    }

    #[test]
    fn line_ids_are_one_based_names() {
        assert_eq!(ShapeId::for_line(4).as_str(), "shape_4");
    }

    #[test]
    fn ids_order_lexicographically() {
        let mut ids = vec![
            ShapeId::for_line(2),
            ShapeId::for_line(10),
            ShapeId::for_line(1),
        ];
        ids.sort();
        let names: Vec<&str> = ids.iter().map(ShapeId::as_str).collect();
        assert_eq!(names, vec!["shape_1", "shape_10", "shape_2"]);
    }

    #[test]
    fn serde_round_trip_as_plain_string() {
        let id = ShapeId::new("t1").unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"t1\"");
        let back: ShapeId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
        assert!(serde_json::from_str::<ShapeId>("\"\"").is_err());
    }
}
