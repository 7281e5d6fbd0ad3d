//! Weighted shortest-path search and route reconstruction.

mod dijkstra;

use geo::Coord;
use log::trace;
use petgraph::graph::NodeIndex;

use crate::{
    Error,
    model::{RoadNetwork, Route},
};

/// Result of planning a single origin-destination pair.
#[derive(Debug, Clone, PartialEq)]
pub enum PathOutcome {
    /// A route tracing the optimal path.
    Found(Route),
    /// Origin and destination snapped to the same node; nothing to compute.
    /// A recognized degenerate, distinct from an unreachable target.
    SameNode,
}

/// Computes the minimum-length path between two matched nodes and
/// reconstructs it as an ordered coordinate sequence.
///
/// The choice among equal-length competing paths follows the deterministic
/// exploration order of the search, so a given graph and node pair always
/// produce the same route.
///
/// # Errors
///
/// [`Error::NoPath`] when the target is unreachable from the source,
/// [`Error::InvalidData`] when either index is not a node of this network.
pub fn shortest_path(
    network: &RoadNetwork,
    source: NodeIndex,
    target: NodeIndex,
    origin: &str,
    destination: &str,
) -> Result<PathOutcome, Error> {
    if source == target {
        return Ok(PathOutcome::SameNode);
    }

    let (source_id, target_id) = match (network.node(source), network.node(target)) {
        (Some(s), Some(t)) => (s.id, t.id),
        _ => {
            return Err(Error::InvalidData(
                "path endpoints are not nodes of this network".to_string(),
            ));
        }
    };

    let (nodes, length) = dijkstra::search(network, source, target).ok_or(Error::NoPath {
        from: source_id,
        to: target_id,
    })?;
    trace!(
        "Path {source_id} -> {target_id}: {} nodes, {length:.1} m",
        nodes.len()
    );

    let coords: Vec<Coord<f64>> = nodes
        .iter()
        .filter_map(|&ix| network.node(ix))
        .map(|node| Coord {
            x: node.geometry.x(),
            y: node.geometry.y(),
        })
        .collect();

    Ok(PathOutcome::Found(Route::new(
        origin,
        destination,
        coords,
        length,
        network.crs(),
    )?))
}
