//! Shortest-route maps over real-world road networks.
//!
//! Given named origin and destination points, this crate derives a bounded
//! query region, obtains a weighted road graph covering it, snaps every
//! point to its nearest graph node, computes length-weighted shortest paths
//! for every origin-destination pair and reconstructs each path as a
//! continuous route geometry in a shared planar reference system. The
//! result is a renderer-ready bundle of network, endpoints and routes.
//!
//! Graph acquisition sits behind the [`NetworkProvider`](provider::NetworkProvider)
//! trait; a CSV-backed reference implementation ships in [`loading`].
//! Drawing the map is left to the caller, with [`map::RouteMap::to_geojson`]
//! as the hand-off point.
//!
//! # Example
//!
//! ```no_run
//! use viamap_core::prelude::*;
//!
//! # fn main() -> Result<(), Error> {
//! let origins = PointSet::wgs84([("Nanyang Polytechnic", 103.8491, 1.3801)]);
//! let destinations = PointSet::wgs84([("Republic Polytechnic", 103.7856, 1.4429)]);
//!
//! let provider = CsvNetworkProvider::new("data/nodes.csv", "data/edges.csv");
//! let map = plan_route_map(&provider, &origins, &destinations, &RoutingOptions::default())?;
//!
//! for route in &map.routes.routes {
//!     println!("{} -> {}: {:.0} m", route.origin, route.destination, route.length);
//! }
//! # Ok(())
//! # }
//! ```

pub mod collection;
pub mod error;
pub mod extent;
pub mod loading;
pub mod map;
pub mod matching;
pub mod model;
pub mod prelude;
pub mod projection;
pub mod provider;
pub mod routing;

pub use error::Error;

/// Stable external identifier of a road network node.
pub type NodeId = u64;
