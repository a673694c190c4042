//! # Metrics Warehouse
//!
//! The warehouse keeps the last computed [`ShapeMetrics`] for each shape id. It never
//! recomputes on its own and never expires entries: a record changes only when a caller
//! asks for [`MetricsWarehouse::recalculate`], sets it directly, or when the warehouse
//! has been attached to a [`ShapeEventBus`] and an event arrives.
//!
//! Records are keyed by id alone. A warehouse holds no reference to the shapes it has
//! measured, so a record goes stale if the shape changes and nobody refreshes it.
//!
//! ```rust
//! use std::sync::Arc;
//! use shapeyard::{MetricsWarehouse, Shape, ShapeEventBus, ShapeId, SphereFactory};
//!
//! let warehouse = Arc::new(MetricsWarehouse::new());
//! let bus = ShapeEventBus::new();
//! warehouse.observe(&bus);
//!
//! let id = ShapeId::new("s1").unwrap();
//! let sphere: Shape = SphereFactory.create("0 0 0 1", &id).unwrap().into();
//! assert!(warehouse.get_metrics(&id).is_none());
//! bus.notify(&sphere);
//! assert!(warehouse.get_metrics(&id).unwrap().volume.is_some());
//! ```

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};

use crate::calculator::{sphere, triangle};
use crate::{GeometryError, Shape, ShapeEventBus, ShapeId, SubscriptionId};

/// Derived metrics for one shape. Area is surface area for spheres.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ShapeMetrics {
    /// Area, or surface area for spheres.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub area: Option<f64>,
    /// Perimeter of a triangle.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub perimeter: Option<f64>,
    /// Volume of a sphere.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume: Option<f64>,
}

impl ShapeMetrics {
    /// Computes the metrics of `shape`. Points have none.
    pub fn compute(shape: &Shape) -> Result<Option<ShapeMetrics>, GeometryError> {
        match shape {
            Shape::Triangle(t) => Ok(Some(ShapeMetrics {
                area: Some(triangle::calculate_area(t)?),
                perimeter: Some(triangle::calculate_perimeter(t)?),
                volume: None,
            })),
            Shape::Sphere(s) => Ok(Some(ShapeMetrics {
                area: Some(sphere::calculate_surface_area(s)?),
                perimeter: None,
                volume: Some(sphere::calculate_volume(s)?),
            })),
            Shape::Point(_) => Ok(None),
        }
    }
}

/// Keyed store of last computed metrics.
#[derive(Debug, Default)]
pub struct MetricsWarehouse {
    metrics: Mutex<HashMap<ShapeId, ShapeMetrics>>,
}

impl MetricsWarehouse {
    /// Creates an empty warehouse.
    pub fn new() -> Self {
        Self::default()
    }

    /// Recomputes and overwrites the record for `shape`.
    ///
    /// Returns the new record, or `None` for shapes without metrics. On failure the
    /// previous record is left in place.
    pub fn recalculate(&self, shape: &Shape) -> Result<Option<ShapeMetrics>, GeometryError> {
        let computed = ShapeMetrics::compute(shape)?;
        if let Some(metrics) = computed {
            self.metrics
                .lock()
                .unwrap()
                .insert(shape.id().clone(), metrics);
        }
        Ok(computed)
    }

    /// The current record for `id`, if one was ever computed or set.
    pub fn get_metrics(&self, id: &ShapeId) -> Option<ShapeMetrics> {
        self.metrics.lock().unwrap().get(id).copied()
    }

    /// Overwrites the record for `id`.
    pub fn set_metrics(&self, id: ShapeId, metrics: ShapeMetrics) {
        self.metrics.lock().unwrap().insert(id, metrics);
    }

    /// Evicts the record for `id`. Returns true if one existed.
    pub fn remove(&self, id: &ShapeId) -> bool {
        self.metrics.lock().unwrap().remove(id).is_some()
    }

    /// Number of records held.
    pub fn len(&self) -> usize {
        self.metrics.lock().unwrap().len()
    }

    /// Whether no records are held.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All ids with a record, sorted.
    pub fn ids(&self) -> Vec<ShapeId> {
        let mut ids: Vec<ShapeId> = self.metrics.lock().unwrap().keys().cloned().collect();
        ids.sort();
        ids
    }

    /// Snapshot of all records ordered by id.
    pub fn snapshot(&self) -> Vec<(ShapeId, ShapeMetrics)> {
        let mut records: Vec<(ShapeId, ShapeMetrics)> = self
            .metrics
            .lock()
            .unwrap()
            .iter()
            .map(|(id, metrics)| (id.clone(), *metrics))
            .collect();
        records.sort_by(|a, b| a.0.cmp(&b.0));
        records
    }

    /// Recalculates on every event published to `bus`.
    ///
    /// The subscription holds a weak handle and is removed from `bus` once the
    /// warehouse is dropped. Failures are logged and do not reach the publisher.
    pub fn observe(self: &Arc<Self>, bus: &ShapeEventBus) -> SubscriptionId {
        bus.subscribe_while(self, |warehouse: &MetricsWarehouse, event| {
            match warehouse.recalculate(&event.snapshot) {
                Ok(Some(metrics)) => {
                    tracing::debug!(shape = %event.id, ?metrics, "recalculated metrics");
                }
                Ok(None) => {}
                Err(e) => {
                    tracing::warn!(shape = %event.id, error = %e, "failed to recalculate metrics");
                }
            }
        })
    }
}
