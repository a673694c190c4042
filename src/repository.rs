//! # Shape Repository
//!
//! An in-memory collection of shapes keyed by id. Adding a shape whose id is already
//! present replaces the earlier one.
//!
//! Searches take arbitrary predicates; the [`specifications`] module builds the common
//! ones (first quadrant, metric ranges, distance from the origin). All spatial
//! predicates look at a shape's representative point.
//!
//! ```rust
//! use shapeyard::{ShapeId, ShapeRepository, SphereFactory};
//! use shapeyard::repository::specifications;
//!
//! let repository = ShapeRepository::new();
//! for (name, data) in [("b", "1 1 1 1"), ("a", "-4 2 0 1")] {
//!     let id = ShapeId::new(name).unwrap();
//!     repository.add(SphereFactory.create(data, &id).unwrap().into());
//! }
//!
//! let found = repository.find_by_coordinates(specifications::in_first_quadrant);
//! assert_eq!(found.len(), 1);
//!
//! let sorted = repository.sort_by_id();
//! assert_eq!(sorted[0].id().as_str(), "a");
//! ```

use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;
use std::sync::Mutex;

use serde::{Deserialize, Serialize};

use crate::{GeometryError, MetricsWarehouse, Shape, ShapeId, ShapeMetrics};

/// A cached metric that shapes can be filtered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    /// Area, or surface area for spheres.
    Area,
    /// Triangle perimeter.
    Perimeter,
    /// Sphere volume.
    Volume,
}

impl Metric {
    /// Reads this metric from a record.
    pub fn select(&self, metrics: &ShapeMetrics) -> Option<f64> {
        match self {
            Metric::Area => metrics.area,
            Metric::Perimeter => metrics.perimeter,
            Metric::Volume => metrics.volume,
        }
    }
}

impl Display for Metric {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Metric::Area => write!(f, "area"),
            Metric::Perimeter => write!(f, "perimeter"),
            Metric::Volume => write!(f, "volume"),
        }
    }
}

impl FromStr for Metric {
    type Err = GeometryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "area" => Ok(Metric::Area),
            "perimeter" => Ok(Metric::Perimeter),
            "volume" => Ok(Metric::Volume),
            _ => Err(GeometryError::UnknownMetric(s.to_string())),
        }
    }
}

/// In-memory shape collection.
#[derive(Debug, Default)]
pub struct ShapeRepository {
    shapes: Mutex<HashMap<ShapeId, Shape>>,
}

impl ShapeRepository {
    /// Creates an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `shape`, replacing any shape with the same id.
    pub fn add(&self, shape: Shape) {
        self.shapes.lock().unwrap().insert(shape.id().clone(), shape);
    }

    /// Removes and returns the shape with `id`.
    pub fn remove(&self, id: &ShapeId) -> Option<Shape> {
        self.shapes.lock().unwrap().remove(id)
    }

    /// Looks up a shape by id.
    pub fn find_by_id(&self, id: &ShapeId) -> Option<Shape> {
        self.shapes.lock().unwrap().get(id).cloned()
    }

    /// All shapes satisfying `predicate`, in no particular order.
    pub fn find_by_coordinates<P>(&self, predicate: P) -> Vec<Shape>
    where
        P: Fn(&Shape) -> bool,
    {
        self.shapes
            .lock()
            .unwrap()
            .values()
            .filter(|shape| predicate(shape))
            .cloned()
            .collect()
    }

    /// Shapes whose cached `metric` lies in `[min, max]`.
    ///
    /// Shapes without a cached record are excluded.
    pub fn find_by_metrics_range(
        &self,
        metric: Metric,
        min: f64,
        max: f64,
        warehouse: &MetricsWarehouse,
    ) -> Vec<Shape> {
        self.find_by_coordinates(specifications::metric_in_range(metric, min, max, warehouse))
    }

    /// Shapes whose representative point lies at a distance in `[min, max]` from the origin.
    pub fn find_by_distance_from_origin(&self, min: f64, max: f64) -> Vec<Shape> {
        self.find_by_coordinates(specifications::distance_from_origin_in_range(min, max))
    }

    /// All shapes ordered by `comparator`.
    pub fn sort<C>(&self, comparator: C) -> Vec<Shape>
    where
        C: Fn(&Shape, &Shape) -> Ordering,
    {
        let mut shapes = self.list();
        shapes.sort_by(|a, b| comparator(a, b));
        shapes
    }

    /// All shapes ordered lexicographically by id.
    pub fn sort_by_id(&self) -> Vec<Shape> {
        self.sort(comparators::compare_by_id)
    }

    /// All shapes, in no particular order.
    pub fn list(&self) -> Vec<Shape> {
        self.shapes.lock().unwrap().values().cloned().collect()
    }

    /// Number of stored shapes.
    pub fn len(&self) -> usize {
        self.shapes.lock().unwrap().len()
    }

    /// Whether the repository is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Predicate builders for [`ShapeRepository::find_by_coordinates`].
pub mod specifications {
    use super::*;

    /// Representative point strictly inside the first quadrant (x > 0, y > 0).
    pub fn in_first_quadrant(shape: &Shape) -> bool {
        let point = shape.representative_point();
        point.x() > 0.0 && point.y() > 0.0
    }

    /// Cached `metric` within `[min, max]`.
    pub fn metric_in_range(
        metric: Metric,
        min: f64,
        max: f64,
        warehouse: &MetricsWarehouse,
    ) -> impl Fn(&Shape) -> bool + '_ {
        move |shape| {
            warehouse
                .get_metrics(shape.id())
                .and_then(|metrics| metric.select(&metrics))
                .is_some_and(|value| value >= min && value <= max)
        }
    }

    /// Cached area within `[min, max]`.
    pub fn area_in_range(
        min: f64,
        max: f64,
        warehouse: &MetricsWarehouse,
    ) -> impl Fn(&Shape) -> bool + '_ {
        metric_in_range(Metric::Area, min, max, warehouse)
    }

    /// Cached perimeter within `[min, max]`.
    pub fn perimeter_in_range(
        min: f64,
        max: f64,
        warehouse: &MetricsWarehouse,
    ) -> impl Fn(&Shape) -> bool + '_ {
        metric_in_range(Metric::Perimeter, min, max, warehouse)
    }

    /// Cached volume within `[min, max]`.
    pub fn volume_in_range(
        min: f64,
        max: f64,
        warehouse: &MetricsWarehouse,
    ) -> impl Fn(&Shape) -> bool + '_ {
        metric_in_range(Metric::Volume, min, max, warehouse)
    }

    /// Representative point at a distance in `[min, max]` from the origin.
    pub fn distance_from_origin_in_range(min: f64, max: f64) -> impl Fn(&Shape) -> bool {
        move |shape| {
            let distance = shape.representative_point().distance_from_origin();
            distance >= min && distance <= max
        }
    }
}

/// Comparators for [`ShapeRepository::sort`].
pub mod comparators {
    use super::*;

    /// Lexicographic by id.
    pub fn compare_by_id(a: &Shape, b: &Shape) -> Ordering {
        a.id().cmp(b.id())
    }

    /// Nearest representative point first; ties broken by id.
    pub fn compare_by_distance_from_origin(a: &Shape, b: &Shape) -> Ordering {
        let da = a.representative_point().distance_from_origin();
        let db = b.representative_point().distance_from_origin();
        da.total_cmp(&db).then_with(|| compare_by_id(a, b))
    }
}
