//! Batched route construction over the origin-destination cross product.

use itertools::Itertools;
use log::{debug, warn};
use rayon::prelude::*;

use crate::{
    Error,
    matching::nearest_node_checked,
    model::{GeoPoint, PointSet, RoadNetwork, Route, RouteCollection, SkipReason, SkippedPair},
    routing::{PathOutcome, shortest_path},
};

enum PairResult {
    Route(Route),
    Skipped(SkippedPair),
}

fn route_pair(
    network: &RoadNetwork,
    origin: &GeoPoint,
    destination: &GeoPoint,
) -> Result<PairResult, Error> {
    let from = nearest_node_checked(network, origin)?;
    let to = nearest_node_checked(network, destination)?;

    match shortest_path(network, from.node, to.node, &origin.name, &destination.name) {
        Ok(PathOutcome::Found(route)) => Ok(PairResult::Route(route)),
        Ok(PathOutcome::SameNode) => {
            debug!(
                "'{}' and '{}' snap to the same node {}; skipping pair",
                origin.name, destination.name, from.id
            );
            Ok(PairResult::Skipped(SkippedPair {
                origin: origin.name.clone(),
                destination: destination.name.clone(),
                reason: SkipReason::SameNode { node: from.id },
            }))
        }
        Err(Error::NoPath { from, to }) => {
            warn!(
                "No path from '{}' (node {from}) to '{}' (node {to}); skipping pair",
                origin.name, destination.name
            );
            Ok(PairResult::Skipped(SkippedPair {
                origin: origin.name.clone(),
                destination: destination.name.clone(),
                reason: SkipReason::Unreachable,
            }))
        }
        Err(e) => Err(e),
    }
}

fn collect(
    network: &RoadNetwork,
    results: Vec<PairResult>,
) -> Result<RouteCollection, Error> {
    let mut routes = Vec::new();
    let mut skipped = Vec::new();
    for result in results {
        match result {
            PairResult::Route(route) => routes.push(route),
            PairResult::Skipped(pair) => skipped.push(pair),
        }
    }

    if routes.is_empty() {
        return Err(Error::NoRoutes);
    }
    debug!("Built {} routes ({} pairs skipped)", routes.len(), skipped.len());

    Ok(RouteCollection {
        routes,
        skipped,
        crs: network.crs(),
    })
}

/// Computes a route for every ordered origin-destination pair.
///
/// Degenerate pairs (both endpoints on one node) and unreachable pairs are
/// recorded as skipped without failing the batch. Output order follows the
/// iteration order of origins, then destinations.
///
/// # Errors
///
/// Structural failures propagate immediately: empty or mixed-CRS point
/// sets ([`Error::InvalidInput`]/[`Error::Projection`]), an empty network
/// ([`Error::EmptyGraph`]). [`Error::NoRoutes`] when every pair was
/// skipped.
pub fn build_routes(
    network: &RoadNetwork,
    origins: &PointSet,
    destinations: &PointSet,
) -> Result<RouteCollection, Error> {
    origins.crs()?;
    destinations.crs()?;

    let results = origins
        .iter()
        .cartesian_product(destinations.iter())
        .map(|(origin, destination)| route_pair(network, origin, destination))
        .collect::<Result<Vec<_>, Error>>()?;

    collect(network, results)
}

/// [`build_routes`] spread across the rayon thread pool.
///
/// Pairs are independent and the graph is read-only, so the batch
/// parallelizes cleanly; results keep the sequential output order.
///
/// # Errors
///
/// Same contract as [`build_routes`].
pub fn build_routes_parallel(
    network: &RoadNetwork,
    origins: &PointSet,
    destinations: &PointSet,
) -> Result<RouteCollection, Error> {
    origins.crs()?;
    destinations.crs()?;

    let pairs: Vec<(&GeoPoint, &GeoPoint)> = origins
        .iter()
        .cartesian_product(destinations.iter())
        .collect();
    let results = pairs
        .par_iter()
        .map(|(origin, destination)| route_pair(network, origin, destination))
        .collect::<Vec<Result<PairResult, Error>>>()
        .into_iter()
        .collect::<Result<Vec<_>, Error>>()?;

    collect(network, results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Crs, RoadNode, RoadSegment};
    use geo::Point;

    fn planar() -> Crs {
        Crs::LocalMetric {
            lon0: 0.0,
            lat0: 0.0,
        }
    }

    fn point(name: &str, x: f64, y: f64) -> GeoPoint {
        GeoPoint::new(name, Point::new(x, y), planar())
    }

    fn node(id: u64, x: f64, y: f64) -> RoadNode {
        RoadNode {
            id,
            geometry: Point::new(x, y),
        }
    }

    fn two_way(from: u64, to: u64, length: f64) -> Vec<(u64, u64, RoadSegment)> {
        vec![
            (from, to, RoadSegment::new(length)),
            (to, from, RoadSegment::new(length)),
        ]
    }

    /// A 3-node line plus a disconnected island node.
    fn line_with_island() -> RoadNetwork {
        let mut segments = Vec::new();
        segments.extend(two_way(1, 2, 100.0));
        segments.extend(two_way(2, 3, 100.0));
        RoadNetwork::from_parts(
            vec![
                node(1, 0.0, 0.0),
                node(2, 100.0, 0.0),
                node(3, 200.0, 0.0),
                node(4, 10_000.0, 10_000.0),
            ],
            segments,
            planar(),
        )
        .unwrap()
    }

    #[test]
    fn routes_follow_cross_product_order() {
        let network = line_with_island();
        let origins = PointSet::new(vec![point("o1", 0.0, 1.0), point("o2", 100.0, 1.0)]);
        let destinations =
            PointSet::new(vec![point("d1", 200.0, 1.0), point("d2", 100.0, -1.0)]);

        let collection = build_routes(&network, &origins, &destinations).unwrap();
        let pairs: Vec<(&str, &str)> = collection
            .iter()
            .map(|r| (r.origin.as_str(), r.destination.as_str()))
            .collect();
        // (o2, d2) snaps to the same node on both ends and is skipped.
        assert_eq!(pairs, vec![("o1", "d1"), ("o1", "d2"), ("o2", "d1")]);
        assert_eq!(collection.skipped.len(), 1);
        assert_eq!(
            collection.skipped[0].reason,
            SkipReason::SameNode { node: 2 }
        );
    }

    #[test]
    fn same_node_pair_shrinks_the_collection_by_one() {
        let network = line_with_island();
        let origins = PointSet::new(vec![point("o1", 0.0, 1.0), point("o2", 100.0, 1.0)]);
        let destinations =
            PointSet::new(vec![point("d1", 200.0, 1.0), point("d2", 100.0, -1.0)]);

        let collection = build_routes(&network, &origins, &destinations).unwrap();
        assert_eq!(
            collection.len(),
            origins.len() * destinations.len() - 1
        );
    }

    #[test]
    fn unreachable_pair_is_skipped_while_others_succeed() {
        let network = line_with_island();
        let origins = PointSet::new(vec![point("o1", 0.0, 1.0)]);
        let destinations = PointSet::new(vec![
            point("reachable", 200.0, 1.0),
            point("island", 10_000.0, 10_001.0),
        ]);

        let collection = build_routes(&network, &origins, &destinations).unwrap();
        assert_eq!(collection.len(), 1);
        assert_eq!(collection.skipped.len(), 1);
        assert_eq!(collection.skipped[0].destination, "island");
        assert_eq!(collection.skipped[0].reason, SkipReason::Unreachable);
    }

    #[test]
    fn all_pairs_skipped_fails_the_batch() {
        let network = line_with_island();
        let origins = PointSet::new(vec![point("o", 100.0, 1.0)]);
        let destinations = PointSet::new(vec![point("d", 100.0, -1.0)]);

        assert!(matches!(
            build_routes(&network, &origins, &destinations),
            Err(Error::NoRoutes)
        ));
    }

    #[test]
    fn empty_origin_set_is_structural() {
        let network = line_with_island();
        let origins = PointSet::default();
        let destinations = PointSet::new(vec![point("d", 200.0, 1.0)]);

        assert!(matches!(
            build_routes(&network, &origins, &destinations),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn empty_network_is_structural() {
        let network = RoadNetwork::from_parts(vec![], vec![], planar()).unwrap();
        let origins = PointSet::new(vec![point("o", 0.0, 0.0)]);
        let destinations = PointSet::new(vec![point("d", 1.0, 1.0)]);

        assert!(matches!(
            build_routes(&network, &origins, &destinations),
            Err(Error::EmptyGraph)
        ));
    }

    #[test]
    fn parallel_build_matches_sequential() {
        let network = line_with_island();
        let origins = PointSet::new(vec![point("o1", 0.0, 1.0), point("o2", 100.0, 1.0)]);
        let destinations = PointSet::new(vec![
            point("d1", 200.0, 1.0),
            point("d2", 100.0, -1.0),
            point("island", 10_000.0, 10_001.0),
        ]);

        let sequential = build_routes(&network, &origins, &destinations).unwrap();
        let parallel = build_routes_parallel(&network, &origins, &destinations).unwrap();
        assert_eq!(sequential, parallel);
    }
}
