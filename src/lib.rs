//! # Shapeyard: Validated Geometry from Text Records
//!
//! Shapeyard turns plain-text records into points, triangles, and spheres, checks them
//! against their geometric invariants, and computes metrics over them. Shapes that
//! survive validation can be stored, searched, and measured, with derived metrics cached
//! per shape id and refreshed when the owner of a shape announces a change.
//!
//! This crate provides:
//!
//! - **Value Types**: [`Point`], [`Triangle`], and [`Sphere`], each carrying a
//!   [`ShapeId`], plus the [`Shape`] sum over all three
//! - **Validation**: grammar checks over raw text and invariant checks over built shapes
//!   in [`validators`]
//! - **Factories**: [`ShapeFactory`] implementations that parse and validate in one step
//! - **Calculators**: area, perimeter, classification, volume, and plane tests in
//!   [`calculator`]
//! - **Metrics Warehouse**: a keyed cache of [`ShapeMetrics`] fed by a [`ShapeEventBus`]
//! - **Repository**: an in-memory [`ShapeRepository`] with predicate search and sorting
//! - **Ingestion**: a [`ShapeReader`] that reads record files and reports rejected records
//!
//! ## Core Concepts
//!
//! ### Records
//! A point is two or three whitespace-separated decimal tokens (`x y [z]`, z defaults to
//! 0). A sphere is three or four tokens (`x y z [radius]`, radius defaults to
//! [`DEFAULT_RADIUS`]). A triangle is three point lines. Tokens must match
//! `-?digits(.digits)?`; exponents, `+` signs, and bare dots are rejected.
//!
//! ### Invariants
//! Coordinates are finite. A sphere's radius is finite and positive. A triangle's vertices
//! are pairwise distinct and not collinear in the xy projection, within [`EPSILON`].
//!
//! ### Metrics
//! Triangles have an area and a perimeter; spheres have a surface area and a volume;
//! points have none. The [`MetricsWarehouse`] holds the last computed record per id and
//! changes only when asked to recalculate.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │ Binaries (shapeyard, validate-shapes)   │
//! ├─────────────────────────────────────────┤
//! │ Ingestion (ShapeReader)                 │
//! ├─────────────────────────────────────────┤
//! │ Repository / Warehouse / Event bus      │
//! ├─────────────────────────────────────────┤
//! │ Factories and Calculators               │
//! ├─────────────────────────────────────────┤
//! │ Validators and Value types              │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage Examples
//!
//! ### Building and Measuring a Triangle
//!
//! ```rust
//! # use shapeyard::{ShapeId, TriangleFactory};
//! # use shapeyard::calculator::{triangle, AngleType};
//! let id = ShapeId::new("triangle1").unwrap();
//! let t = TriangleFactory.create("0 0 0\n3 0 0\n0 4 0", &id).unwrap();
//!
//! assert_eq!(triangle::calculate_area(&t).unwrap(), 6.0);
//! assert_eq!(triangle::calculate_perimeter(&t).unwrap(), 12.0);
//! assert_eq!(triangle::angle_type(&t).unwrap(), AngleType::Right);
//! ```
//!
//! ### Rejecting Bad Input
//!
//! ```rust
//! # use shapeyard::{ShapeId, SphereFactory, TriangleFactory};
//! let id = ShapeId::new("bad").unwrap();
//! let err = SphereFactory.create("1e3 0 0", &id).unwrap_err();
//! assert_eq!(err.to_string(), "Failed to create sphere: Invalid sphere data format: 1e3 0 0");
//!
//! let err = TriangleFactory.create("0 0\n1 1\n2 2", &id).unwrap_err();
//! assert_eq!(err.to_string(), "Failed to create triangle: Triangle points must not be collinear");
//! ```
//!
//! ### Caching Metrics Through Events
//!
//! ```rust
//! # use std::sync::Arc;
//! # use shapeyard::{MetricsWarehouse, Shape, ShapeEventBus, ShapeId, ShapeRepository, SphereFactory};
//! # use shapeyard::repository::specifications;
//! let warehouse = Arc::new(MetricsWarehouse::new());
//! let bus = ShapeEventBus::new();
//! warehouse.observe(&bus);
//!
//! let repository = ShapeRepository::new();
//! let id = ShapeId::new("sphere1").unwrap();
//! let sphere: Shape = SphereFactory.create("2 3 1 5", &id).unwrap().into();
//! repository.add(sphere.clone());
//! bus.notify(&sphere);
//!
//! let big = repository.find_by_coordinates(specifications::volume_in_range(500.0, 600.0, &warehouse));
//! assert_eq!(big.len(), 1);
//! ```

#![deny(missing_docs)]
mod errors;
mod events;
mod factory;
mod ingest;
mod point;
mod shape;
mod shape_id;
mod sphere;
mod triangle;
mod warehouse;

/// Tolerance for geometric comparisons: collinearity, side equality, right angles, and
/// plane tangency.
pub const EPSILON: f64 = 1e-10;

/// Radius given to a sphere record that omits one.
pub const DEFAULT_RADIUS: f64 = 1.0;

pub mod calculator;
/// Command-line helpers for program termination and formatted output.
pub mod cli_utils;
pub mod config;
pub mod repository;
pub mod validators;

pub use config::Config;
pub use errors::{ConfigError, GeometryError};
pub use events::{ShapeEvent, ShapeEventBus, SubscriptionId};
pub use factory::{PointFactory, ShapeFactory, SphereFactory, TriangleFactory, factory_for};
pub use ingest::{IngestReport, ShapeReader, SkippedRecord};
pub use point::Point;
pub use repository::{Metric, ShapeRepository};
pub use shape::{Shape, ShapeKind};
pub use shape_id::{ShapeId, ShapeIdParseError};
pub use sphere::Sphere;
pub use triangle::Triangle;
pub use warehouse::{MetricsWarehouse, ShapeMetrics};
