//! # Geometric Calculators
//!
//! Stateless functions computing derived metrics from value types. Every public metric
//! re-validates the shape's invariants before computing, so a calculator never returns a
//! number for invalid geometry; invariant failures propagate undecorated.
//!
//! - [`triangle`]: area, perimeter, and side/angle classification.
//! - [`sphere`]: surface area, volume, and relations to the coordinate planes.

/// Sphere metrics and coordinate-plane relations.
pub mod sphere;
/// Triangle metrics and classification.
pub mod triangle;

pub use sphere::CoordinatePlane;
pub use triangle::{AngleType, TriangleType};
