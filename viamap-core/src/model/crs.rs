use std::fmt;

use serde::{Deserialize, Serialize};

/// Coordinate reference system tag carried by points, networks and routes.
///
/// Any operation that compares two geometries requires both to carry the
/// same tag; mixing tags is an input error, not a silent conversion.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Crs {
    /// Geographic longitude/latitude degrees (EPSG:4326).
    Wgs84,
    /// Planar meters in an equirectangular frame centered on `(lon0, lat0)`.
    LocalMetric { lon0: f64, lat0: f64 },
}

impl Crs {
    /// True for reference systems in which Euclidean distance is meaningful.
    pub fn is_planar(self) -> bool {
        matches!(self, Crs::LocalMetric { .. })
    }
}

impl fmt::Display for Crs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Crs::Wgs84 => write!(f, "EPSG:4326"),
            Crs::LocalMetric { lon0, lat0 } => {
                write!(f, "local-metric({lon0:.4}, {lat0:.4})")
            }
        }
    }
}
