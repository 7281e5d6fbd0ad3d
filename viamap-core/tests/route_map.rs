//! End-to-end tests over a synthetic street grid around Ang Mo Kio.

use geo::{Distance, Euclidean, Point};
use viamap_core::prelude::*;

/// Equirectangular ground distance between two lon/lat positions.
fn meters(a: (f64, f64), b: (f64, f64)) -> f64 {
    let k = 6_371_008.8 * std::f64::consts::PI / 180.0;
    let mid_lat = (a.1 + b.1) / 2.0;
    let dx = (b.0 - a.0) * k * mid_lat.to_radians().cos();
    let dy = (b.1 - a.1) * k;
    (dx * dx + dy * dy).sqrt()
}

/// Provider serving a 9x9 grid of two-way streets spaced 0.01 degrees,
/// clipped to the query region like a real data source would.
struct GridProvider;

impl GridProvider {
    const COLS: u64 = 9;
    const ROWS: u64 = 9;
    const ORIGIN: (f64, f64) = (103.78, 1.37);
    const STEP: f64 = 0.01;

    fn position(row: u64, col: u64) -> (f64, f64) {
        (
            Self::ORIGIN.0 + col as f64 * Self::STEP,
            Self::ORIGIN.1 + row as f64 * Self::STEP,
        )
    }

    fn id(row: u64, col: u64) -> u64 {
        row * Self::COLS + col + 1
    }
}

impl NetworkProvider for GridProvider {
    fn fetch_graph(&self, region: &Region, _mode: TravelMode) -> Result<RoadNetwork, Error> {
        let mut nodes = Vec::new();
        for row in 0..Self::ROWS {
            for col in 0..Self::COLS {
                let (lon, lat) = Self::position(row, col);
                if region.covers(&Point::new(lon, lat)) {
                    nodes.push(RoadNode {
                        id: Self::id(row, col),
                        geometry: Point::new(lon, lat),
                    });
                }
            }
        }
        let ids: std::collections::HashSet<u64> = nodes.iter().map(|n| n.id).collect();

        let mut segments = Vec::new();
        let mut link = |a: u64, b: u64, from: (f64, f64), to: (f64, f64)| {
            if ids.contains(&a) && ids.contains(&b) {
                let length = meters(from, to);
                segments.push((a, b, RoadSegment::new(length)));
                segments.push((b, a, RoadSegment::new(length)));
            }
        };
        for row in 0..Self::ROWS {
            for col in 0..Self::COLS {
                let here = Self::position(row, col);
                if col + 1 < Self::COLS {
                    link(
                        Self::id(row, col),
                        Self::id(row, col + 1),
                        here,
                        Self::position(row, col + 1),
                    );
                }
                if row + 1 < Self::ROWS {
                    link(
                        Self::id(row, col),
                        Self::id(row + 1, col),
                        here,
                        Self::position(row + 1, col),
                    );
                }
            }
        }

        RoadNetwork::from_parts(nodes, segments, region.crs())
    }
}

fn polytechnics() -> (PointSet, PointSet) {
    (
        PointSet::wgs84([("Nanyang Polytechnic", 103.849, 1.380)]),
        PointSet::wgs84([("Republic Polytechnic", 103.786, 1.443)]),
    )
}

#[test]
fn end_to_end_drive_request_yields_one_route() {
    let (origins, destinations) = polytechnics();
    let map = plan_route_map(
        &GridProvider,
        &origins,
        &destinations,
        &RoutingOptions::default(),
    )
    .unwrap();

    assert_eq!(map.routes.len(), 1);
    assert!(map.routes.skipped.is_empty());

    let route = &map.routes.routes[0];
    assert_eq!(route.origin, "Nanyang Polytechnic");
    assert_eq!(route.destination, "Republic Polytechnic");
    // The path crosses the grid, so it carries intermediate nodes.
    assert!(route.coord_count() > 2);

    // Total length can never beat the straight line between the endpoints.
    let projection = map.projection();
    let a = projection.forward(Point::new(103.849, 1.380));
    let b = projection.forward(Point::new(103.786, 1.443));
    assert!(route.length >= Euclidean.distance(a, b));

    // Everything the renderer receives shares the planar frame.
    assert_eq!(map.routes.crs, map.network.crs());
    assert!(map.routes.crs.is_planar());
}

#[test]
fn repeated_requests_are_deterministic() {
    let (origins, destinations) = polytechnics();
    let options = RoutingOptions::default();

    let first = plan_route_map(&GridProvider, &origins, &destinations, &options).unwrap();
    let second = plan_route_map(&GridProvider, &origins, &destinations, &options).unwrap();
    assert_eq!(first.routes, second.routes);
}

#[test]
fn parallel_batch_matches_sequential() {
    let origins = PointSet::wgs84([("a", 103.80, 1.38), ("b", 103.84, 1.44)]);
    let destinations = PointSet::wgs84([("c", 103.786, 1.443), ("d", 103.849, 1.380)]);

    let sequential = plan_route_map(
        &GridProvider,
        &origins,
        &destinations,
        &RoutingOptions::default(),
    )
    .unwrap();
    let parallel = plan_route_map(
        &GridProvider,
        &origins,
        &destinations,
        &RoutingOptions {
            parallel: true,
            ..RoutingOptions::default()
        },
    )
    .unwrap();
    assert_eq!(sequential.routes, parallel.routes);
}

#[test]
fn same_node_pair_is_skipped_with_a_reason() {
    let origins = PointSet::wgs84([("here", 103.801, 1.401)]);
    // First destination snaps to the same grid node as the origin.
    let destinations = PointSet::wgs84([
        ("also here", 103.799, 1.399),
        ("across town", 103.849, 1.380),
    ]);

    let map = plan_route_map(
        &GridProvider,
        &origins,
        &destinations,
        &RoutingOptions::default(),
    )
    .unwrap();

    assert_eq!(map.routes.len(), 1);
    assert_eq!(map.routes.skipped.len(), 1);
    assert!(matches!(
        map.routes.skipped[0].reason,
        SkipReason::SameNode { .. }
    ));

    let collection = map.to_geojson();
    let members = collection.foreign_members.unwrap();
    let skipped = members["skipped_pairs"].as_array().unwrap();
    assert_eq!(skipped.len(), 1);
    assert_eq!(skipped[0]["destination"], "also here");
}

#[test]
fn all_pairs_degenerate_fails_outright() {
    let origins = PointSet::wgs84([("here", 103.801, 1.401)]);
    let destinations = PointSet::wgs84([("also here", 103.799, 1.399)]);

    let result = plan_route_map(
        &GridProvider,
        &origins,
        &destinations,
        &RoutingOptions::default(),
    );
    assert!(matches!(result, Err(Error::NoRoutes)));
}

#[test]
fn request_outside_the_network_is_an_empty_graph() {
    let origins = PointSet::wgs84([("nowhere", 10.0, 50.0)]);
    let destinations = PointSet::wgs84([("nowhere else", 10.1, 50.1)]);

    let result = plan_route_map(
        &GridProvider,
        &origins,
        &destinations,
        &RoutingOptions::default(),
    );
    assert!(matches!(result, Err(Error::EmptyGraph)));
}

#[test]
fn non_wgs84_input_is_rejected() {
    let crs = Crs::LocalMetric {
        lon0: 103.8,
        lat0: 1.4,
    };
    let origins = PointSet::new(vec![GeoPoint::new("a", Point::new(0.0, 0.0), crs)]);
    let destinations = PointSet::wgs84([("b", 103.786, 1.443)]);

    let result = plan_route_map(
        &GridProvider,
        &origins,
        &destinations,
        &RoutingOptions::default(),
    );
    assert!(matches!(result, Err(Error::InvalidInput(_))));
}

#[test]
fn geojson_export_carries_routes_and_endpoints() {
    let (origins, destinations) = polytechnics();
    let map = plan_route_map(
        &GridProvider,
        &origins,
        &destinations,
        &RoutingOptions::default(),
    )
    .unwrap();

    let collection = map.to_geojson();
    assert_eq!(collection.features.len(), 1 + 1 + 1);

    let route_feature = &collection.features[0];
    let geometry = route_feature.geometry.as_ref().unwrap();
    assert!(matches!(geometry.value, geojson::Value::LineString { .. }));
    let properties = route_feature.properties.as_ref().unwrap();
    assert_eq!(properties["origin"], "Nanyang Polytechnic");

    // Route coordinates are back in longitude/latitude range.
    if let geojson::Value::LineString { coordinates: coords } = &geometry.value {
        for position in coords {
            assert!((103.0..104.5).contains(&position[0]));
            assert!((1.0..2.0).contains(&position[1]));
        }
    }

    let base_layer = map.network_to_geojson();
    assert_eq!(base_layer.features.len(), map.network.edge_count());
}

#[test]
fn csv_backed_provider_end_to_end() {
    use std::fmt::Write as _;

    let dir = std::env::temp_dir();
    let nodes_path = dir.join(format!("viamap-nodes-{}.csv", std::process::id()));
    let edges_path = dir.join(format!("viamap-edges-{}.csv", std::process::id()));

    let mut nodes = String::from("id,lon,lat\n");
    let mut edges = String::from("from,to,length,oneway,car,bike,foot\n");
    for row in 0..GridProvider::ROWS {
        for col in 0..GridProvider::COLS {
            let (lon, lat) = GridProvider::position(row, col);
            writeln!(nodes, "{},{lon},{lat}", GridProvider::id(row, col)).unwrap();
            let here = GridProvider::position(row, col);
            if col + 1 < GridProvider::COLS {
                let length = meters(here, GridProvider::position(row, col + 1));
                writeln!(
                    edges,
                    "{},{},{length},0,1,1,1",
                    GridProvider::id(row, col),
                    GridProvider::id(row, col + 1)
                )
                .unwrap();
            }
            if row + 1 < GridProvider::ROWS {
                let length = meters(here, GridProvider::position(row + 1, col));
                writeln!(
                    edges,
                    "{},{},{length},0,1,1,1",
                    GridProvider::id(row, col),
                    GridProvider::id(row + 1, col)
                )
                .unwrap();
            }
        }
    }
    std::fs::write(&nodes_path, nodes).unwrap();
    std::fs::write(&edges_path, edges).unwrap();

    let provider = CsvNetworkProvider::new(&nodes_path, &edges_path);
    let (origins, destinations) = polytechnics();
    let map = plan_route_map(
        &provider,
        &origins,
        &destinations,
        &RoutingOptions::default(),
    )
    .unwrap();
    assert_eq!(map.routes.len(), 1);
    assert!(map.routes.routes[0].coord_count() > 2);

    std::fs::remove_file(&nodes_path).ok();
    std::fs::remove_file(&edges_path).ok();
}
