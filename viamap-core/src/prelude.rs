//! Convenient re-exports of the crate's main surface.

pub use crate::NodeId;
pub use crate::collection::{build_routes, build_routes_parallel};
pub use crate::error::Error;
pub use crate::extent::{Region, build_extent};
pub use crate::loading::CsvNetworkProvider;
pub use crate::map::{DEFAULT_EXTENT_MARGIN, RouteMap, RoutingOptions, plan_route_map};
pub use crate::matching::{MatchedNode, nearest_node, nearest_node_checked};
pub use crate::model::{
    Crs, GeoPoint, PointSet, RoadNetwork, RoadNode, RoadSegment, Route, RouteCollection,
    SkipReason, SkippedPair,
};
pub use crate::projection::{LocalMetricProjection, PlanarProjection, project_points};
pub use crate::provider::{NetworkProvider, TravelMode};
pub use crate::routing::{PathOutcome, shortest_path};
