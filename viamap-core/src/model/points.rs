use geo::Point;

use crate::{Error, model::Crs};

/// A named geographic coordinate tagged with its reference system.
#[derive(Debug, Clone, PartialEq)]
pub struct GeoPoint {
    /// Human-readable label, carried through to the produced routes.
    pub name: String,
    pub geometry: Point<f64>,
    pub crs: Crs,
}

impl GeoPoint {
    pub fn new(name: impl Into<String>, geometry: Point<f64>, crs: Crs) -> Self {
        Self {
            name: name.into(),
            geometry,
            crs,
        }
    }

    /// A point given as longitude/latitude degrees.
    pub fn wgs84(name: impl Into<String>, lon: f64, lat: f64) -> Self {
        Self::new(name, Point::new(lon, lat), Crs::Wgs84)
    }
}

/// Ordered collection of origin or destination points.
///
/// Names need not be unique, but distinct names keep the skip diagnostics
/// of a route batch traceable.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointSet(Vec<GeoPoint>);

impl PointSet {
    pub fn new(points: Vec<GeoPoint>) -> Self {
        Self(points)
    }

    /// Builds a WGS-84 set from `(name, lon, lat)` records.
    pub fn wgs84<S: Into<String>>(points: impl IntoIterator<Item = (S, f64, f64)>) -> Self {
        Self(
            points
                .into_iter()
                .map(|(name, lon, lat)| GeoPoint::wgs84(name, lon, lat))
                .collect(),
        )
    }

    pub fn push(&mut self, point: GeoPoint) {
        self.0.push(point);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, GeoPoint> {
        self.0.iter()
    }

    /// Returns the reference system shared by every point in the set.
    ///
    /// # Errors
    ///
    /// The set is empty, or its points carry mixed reference systems.
    pub fn crs(&self) -> Result<Crs, Error> {
        let first = self
            .0
            .first()
            .ok_or_else(|| Error::InvalidInput("point set is empty".to_string()))?;
        for point in &self.0[1..] {
            if point.crs != first.crs {
                return Err(Error::InvalidInput(format!(
                    "mixed reference systems in point set: {} vs {}",
                    first.crs, point.crs
                )));
            }
        }
        Ok(first.crs)
    }
}

impl From<Vec<GeoPoint>> for PointSet {
    fn from(points: Vec<GeoPoint>) -> Self {
        Self(points)
    }
}

impl<'a> IntoIterator for &'a PointSet {
    type Item = &'a GeoPoint;
    type IntoIter = std::slice::Iter<'a, GeoPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
