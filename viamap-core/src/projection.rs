//! Planar reprojection of geographic inputs.
//!
//! Nearest-neighbor matching and distance comparisons are only meaningful
//! in a planar frame; raw longitude/latitude degrees stretch with latitude.

use geo::Point;

use crate::{
    Error,
    extent::Region,
    model::{Crs, GeoPoint, PointSet},
};

/// Mean Earth radius in meters (IUGG).
const EARTH_RADIUS_M: f64 = 6_371_008.8;

/// Deterministic mapping between WGS-84 degrees and a planar metric frame.
pub trait PlanarProjection {
    /// Reference system of the planar frame this projection produces.
    fn crs(&self) -> Crs;

    /// WGS-84 degrees to planar meters.
    fn forward(&self, point: Point<f64>) -> Point<f64>;

    /// Planar meters back to WGS-84 degrees.
    fn inverse(&self, point: Point<f64>) -> Point<f64>;

    /// Projects a point after checking its source reference system.
    ///
    /// Points already in the target frame pass through unchanged.
    ///
    /// # Errors
    ///
    /// The source reference system is not supported by this projection.
    fn project(&self, point: Point<f64>, source: Crs) -> Result<Point<f64>, Error> {
        match source {
            Crs::Wgs84 => Ok(self.forward(point)),
            other if other == self.crs() => Ok(point),
            other => Err(Error::Projection(format!(
                "cannot project from {other} into {}",
                self.crs()
            ))),
        }
    }
}

/// Equirectangular projection centered on a reference origin.
///
/// Accurate to well under a percent over the few-kilometer extents this
/// library works with, without dragging in a projection database.
/// Behavior is undefined close to the poles or across the antimeridian.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocalMetricProjection {
    lon0: f64,
    lat0: f64,
    /// Meters per degree of longitude at the reference latitude.
    meters_per_lon: f64,
    /// Meters per degree of latitude.
    meters_per_lat: f64,
}

impl LocalMetricProjection {
    pub fn new(lon0: f64, lat0: f64) -> Self {
        let meters_per_degree = EARTH_RADIUS_M * std::f64::consts::PI / 180.0;
        Self {
            lon0,
            lat0,
            meters_per_lon: meters_per_degree * lat0.to_radians().cos(),
            meters_per_lat: meters_per_degree,
        }
    }

    /// Projection centered on the region's hull centroid.
    pub fn centered_on(region: &Region) -> Self {
        let center = region.center();
        Self::new(center.x(), center.y())
    }
}

impl PlanarProjection for LocalMetricProjection {
    fn crs(&self) -> Crs {
        Crs::LocalMetric {
            lon0: self.lon0,
            lat0: self.lat0,
        }
    }

    fn forward(&self, point: Point<f64>) -> Point<f64> {
        Point::new(
            (point.x() - self.lon0) * self.meters_per_lon,
            (point.y() - self.lat0) * self.meters_per_lat,
        )
    }

    fn inverse(&self, point: Point<f64>) -> Point<f64> {
        Point::new(
            point.x() / self.meters_per_lon + self.lon0,
            point.y() / self.meters_per_lat + self.lat0,
        )
    }
}

/// Projects every point of a set into the projection's planar frame.
///
/// # Errors
///
/// The set is empty, carries mixed reference systems, or its reference
/// system is not supported by the projection.
pub fn project_points(
    set: &PointSet,
    projection: &impl PlanarProjection,
) -> Result<PointSet, Error> {
    let source = set.crs()?;
    let target = projection.crs();
    set.iter()
        .map(|point| {
            Ok(GeoPoint::new(
                point.name.clone(),
                projection.project(point.geometry, source)?,
                target,
            ))
        })
        .collect::<Result<Vec<_>, Error>>()
        .map(PointSet::new)
}
