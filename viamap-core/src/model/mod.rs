//! Data model for road network routing
//!
//! Contains the point, graph and route types shared across the pipeline.

pub mod crs;
pub mod network;
pub mod points;
pub mod route;

pub use crs::Crs;
pub use network::{IndexedPoint, RoadNetwork, RoadNode, RoadSegment};
pub use points::{GeoPoint, PointSet};
pub use route::{Route, RouteCollection, SkipReason, SkippedPair};
