use std::f64::consts::PI;
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::validators::validate_sphere;
use crate::{EPSILON, GeometryError, Sphere};

////////////////////////////////////////// CoordinatePlane /////////////////////////////////////////////

/// One of the three coordinate planes through the origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoordinatePlane {
    /// The plane z = 0.
    Xy,
    /// The plane y = 0.
    Xz,
    /// The plane x = 0.
    Yz,
}

impl CoordinatePlane {
    /// All planes in reporting order.
    pub const ALL: [CoordinatePlane; 3] = [CoordinatePlane::Xy, CoordinatePlane::Xz, CoordinatePlane::Yz];

    /// The plane's two-letter name.
    pub fn as_str(&self) -> &'static str {
        match self {
            CoordinatePlane::Xy => "xy",
            CoordinatePlane::Xz => "xz",
            CoordinatePlane::Yz => "yz",
        }
    }
}

impl Display for CoordinatePlane {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for CoordinatePlane {
    type Err = GeometryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "xy" => Ok(CoordinatePlane::Xy),
            "xz" => Ok(CoordinatePlane::Xz),
            "yz" => Ok(CoordinatePlane::Yz),
            _ => Err(GeometryError::InvalidPlane(s.to_string())),
        }
    }
}

///////////////////////////////////////////// Metrics //////////////////////////////////////////////////

/// Surface area, 4πr².
pub fn calculate_surface_area(sphere: &Sphere) -> Result<f64, GeometryError> {
    validate_sphere(sphere)?;
    let r = sphere.radius();
    Ok(4.0 * PI * r * r)
}

/// Volume, (4/3)πr³.
pub fn calculate_volume(sphere: &Sphere) -> Result<f64, GeometryError> {
    validate_sphere(sphere)?;
    let r = sphere.radius();
    Ok((4.0 / 3.0) * PI * r * r * r)
}

/// Distance from the center to `plane`: the magnitude of the orthogonal coordinate.
pub fn distance_to_plane(sphere: &Sphere, plane: CoordinatePlane) -> Result<f64, GeometryError> {
    validate_sphere(sphere)?;
    let center = sphere.center();
    let coordinate = match plane {
        CoordinatePlane::Xy => center.z(),
        CoordinatePlane::Xz => center.y(),
        CoordinatePlane::Yz => center.x(),
    };
    Ok(coordinate.abs())
}

/// Fraction of the volume on the smaller side of `plane`, in [0, 0.5].
///
/// Zero when the plane does not cut the sphere.
pub fn calculate_volume_ratio(sphere: &Sphere, plane: CoordinatePlane) -> Result<f64, GeometryError> {
    let distance = distance_to_plane(sphere, plane)?;
    let radius = sphere.radius();
    if distance >= radius {
        return Ok(0.0);
    }

    let height = radius - distance;
    let cap = PI * height * height * (3.0 * radius - height) / 3.0;
    let total = calculate_volume(sphere)?;
    Ok(cap.min(total - cap) / total)
}

/// Whether the sphere is tangent to `plane` within [`EPSILON`].
pub fn touches_coordinate_plane(sphere: &Sphere, plane: CoordinatePlane) -> Result<bool, GeometryError> {
    let distance = distance_to_plane(sphere, plane)?;
    Ok((distance - sphere.radius()).abs() < EPSILON)
}

/// Whether the sphere is tangent to at least one coordinate plane.
pub fn touches_any_coordinate_plane(sphere: &Sphere) -> Result<bool, GeometryError> {
    Ok(!intersection_planes(sphere)?.is_empty())
}

/// The planes the sphere touches, always ordered xy, xz, yz.
pub fn intersection_planes(sphere: &Sphere) -> Result<Vec<CoordinatePlane>, GeometryError> {
    let mut planes = Vec::new();
    for plane in CoordinatePlane::ALL {
        if touches_coordinate_plane(sphere, plane)? {
            planes.push(plane);
        }
    }
    Ok(planes)
}

/// Whether the sphere satisfies its invariants.
pub fn is_sphere(sphere: &Sphere) -> bool {
    validate_sphere(sphere).is_ok()
}
