//! Bounded query region derived from the request points.
//!
//! The region is the convex hull of every origin and destination, padded
//! outward by a uniform margin so the fetched network keeps enough lateral
//! context for realistic route detours.

use geo::{BoundingRect, Centroid, ConvexHull, Coord, Distance, Euclidean, MultiPoint, Point, Polygon, Rect};

use crate::{
    Error,
    model::{Crs, PointSet},
};

/// Convex hull of the request points plus a uniform outward margin.
#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    hull: Polygon<f64>,
    margin: f64,
    crs: Crs,
}

impl Region {
    pub fn hull(&self) -> &Polygon<f64> {
        &self.hull
    }

    /// Padding distance around the hull, in CRS units.
    pub fn margin(&self) -> f64 {
        self.margin
    }

    pub fn crs(&self) -> Crs {
        self.crs
    }

    /// True when the point lies inside the hull or within `margin` of it.
    pub fn covers(&self, point: &Point<f64>) -> bool {
        Euclidean.distance(&self.hull, point) <= self.margin
    }

    /// Axis-aligned bounds of the padded region, for bbox-oriented
    /// providers. `None` only for a hull without coordinates.
    pub fn bounding_rect(&self) -> Option<Rect<f64>> {
        let rect = self.hull.bounding_rect()?;
        Some(Rect::new(
            Coord {
                x: rect.min().x - self.margin,
                y: rect.min().y - self.margin,
            },
            Coord {
                x: rect.max().x + self.margin,
                y: rect.max().y + self.margin,
            },
        ))
    }

    /// Centroid of the hull.
    pub fn center(&self) -> Point<f64> {
        self.hull.centroid().unwrap_or_else(|| Point::new(0.0, 0.0))
    }
}

/// Computes the query region enclosing both point sets.
///
/// Pure: no side effects, deterministic for identical inputs.
///
/// # Errors
///
/// Either set is empty, the sets carry different reference systems, or the
/// margin is negative or not finite.
pub fn build_extent(
    origins: &PointSet,
    destinations: &PointSet,
    margin: f64,
) -> Result<Region, Error> {
    let crs = origins.crs()?;
    let destination_crs = destinations.crs()?;
    if crs != destination_crs {
        return Err(Error::InvalidInput(format!(
            "origins are {crs} but destinations are {destination_crs}"
        )));
    }
    if !margin.is_finite() || margin < 0.0 {
        return Err(Error::InvalidInput(format!(
            "extent margin must be non-negative, got {margin}"
        )));
    }

    let points: MultiPoint<f64> = origins
        .iter()
        .chain(destinations.iter())
        .map(|p| p.geometry)
        .collect();
    let hull = points.convex_hull();

    Ok(Region { hull, margin, crs })
}
