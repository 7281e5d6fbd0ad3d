//! Snapping arbitrary points to their nearest graph node.

use geo::Point;
use petgraph::graph::NodeIndex;

use crate::{
    Error, NodeId,
    model::{GeoPoint, RoadNetwork},
};

/// A geographic point snapped to its nearest graph node.
///
/// Transient: produced here, consumed by the route planner, not persisted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchedNode {
    pub node: NodeIndex,
    /// External id of the matched node.
    pub id: NodeId,
    /// Planar distance from the query point to the node.
    pub distance: f64,
}

/// Matches a point to the nearest network node under Euclidean distance.
///
/// The query point must be expressed in the network's reference system.
/// Ties are broken by the lowest node id, so repeated calls against the
/// same graph return the same node.
///
/// # Errors
///
/// [`Error::EmptyGraph`] when the network has no nodes.
pub fn nearest_node(network: &RoadNetwork, point: &Point<f64>) -> Result<MatchedNode, Error> {
    let (node, id, distance) = network.nearest_node(point).ok_or(Error::EmptyGraph)?;
    Ok(MatchedNode { node, id, distance })
}

/// Like [`nearest_node`], but first verifies the point's reference system
/// tag against the network's.
///
/// # Errors
///
/// [`Error::Projection`] on a tag mismatch, [`Error::EmptyGraph`] on an
/// empty network.
pub fn nearest_node_checked(network: &RoadNetwork, point: &GeoPoint) -> Result<MatchedNode, Error> {
    if point.crs != network.crs() {
        return Err(Error::Projection(format!(
            "point '{}' is in {} but the network is in {}",
            point.name,
            point.crs,
            network.crs()
        )));
    }
    nearest_node(network, &point.geometry)
}
