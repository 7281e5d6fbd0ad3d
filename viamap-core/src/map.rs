//! End-to-end orchestration: extent, fetch, reprojection and route batch.

use geo::{LineString, line_string};
use geojson::{Feature, FeatureCollection, Geometry};
use log::info;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue, json};

use crate::{
    Error,
    collection::{build_routes, build_routes_parallel},
    extent::build_extent,
    model::{Crs, PointSet, RoadNetwork, Route, RouteCollection},
    projection::{LocalMetricProjection, PlanarProjection, project_points},
    provider::{NetworkProvider, TravelMode},
};

/// Default hull padding in degrees, roughly two kilometers.
pub const DEFAULT_EXTENT_MARGIN: f64 = 0.02;

/// Tunable options for one routing request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoutingOptions {
    pub mode: TravelMode,
    /// Padding around the convex hull of the request points, in degrees.
    pub extent_margin: f64,
    /// Spread the pair batch across the rayon thread pool. Output is
    /// identical either way.
    pub parallel: bool,
}

impl Default for RoutingOptions {
    fn default() -> Self {
        Self {
            mode: TravelMode::Drive,
            extent_margin: DEFAULT_EXTENT_MARGIN,
            parallel: false,
        }
    }
}

/// Everything a renderer needs to draw one request: the planar network,
/// the projected endpoints and the computed routes.
///
/// Rendering reads this bundle; it never mutates it.
#[derive(Debug, Clone)]
pub struct RouteMap {
    pub network: RoadNetwork,
    pub origins: PointSet,
    pub destinations: PointSet,
    pub routes: RouteCollection,
    projection: LocalMetricProjection,
}

/// Computes shortest routes between every origin and destination and
/// assembles the renderer hand-off.
///
/// Inputs must be WGS-84; the network is fetched for the padded convex
/// hull of all points and everything is worked on in a local planar frame.
///
/// # Errors
///
/// Empty or mixed-CRS point sets and non-WGS-84 inputs are
/// [`Error::InvalidInput`]; provider failures surface unchanged; a fetched
/// network without nodes is [`Error::EmptyGraph`]; [`Error::NoRoutes`]
/// when no pair produced a route.
pub fn plan_route_map(
    provider: &impl NetworkProvider,
    origins: &PointSet,
    destinations: &PointSet,
    options: &RoutingOptions,
) -> Result<RouteMap, Error> {
    for (label, set) in [("origins", origins), ("destinations", destinations)] {
        let crs = set.crs()?;
        if crs != Crs::Wgs84 {
            return Err(Error::InvalidInput(format!(
                "{label} must be WGS-84, got {crs}"
            )));
        }
    }

    let region = build_extent(origins, destinations, options.extent_margin)?;
    let center = region.center();
    info!(
        "Fetching {} network around ({:.4}, {:.4})",
        options.mode,
        center.x(),
        center.y()
    );

    let network = provider.fetch_graph(&region, options.mode)?;
    if network.is_empty() {
        return Err(Error::EmptyGraph);
    }
    info!(
        "Fetched network: {} nodes, {} segments",
        network.node_count(),
        network.edge_count()
    );

    let projection = LocalMetricProjection::centered_on(&region);
    let network = network.reproject(&projection)?;
    let origins = project_points(origins, &projection)?;
    let destinations = project_points(destinations, &projection)?;

    let routes = if options.parallel {
        build_routes_parallel(&network, &origins, &destinations)?
    } else {
        build_routes(&network, &origins, &destinations)?
    };

    Ok(RouteMap {
        network,
        origins,
        destinations,
        routes,
        projection,
    })
}

impl RouteMap {
    /// The projection used to move between the planar frame and WGS-84.
    pub fn projection(&self) -> &LocalMetricProjection {
        &self.projection
    }

    /// Routes and endpoints as WGS-84 GeoJSON for rendering.
    ///
    /// Skipped pairs are annotated under the `skipped_pairs` foreign
    /// member so callers can tell same-node degenerates from unreachable
    /// pairs.
    pub fn to_geojson(&self) -> FeatureCollection {
        let mut features =
            Vec::with_capacity(self.routes.len() + self.origins.len() + self.destinations.len());

        for route in self.routes.iter() {
            features.push(self.route_feature(route));
        }
        for (role, set) in [("origin", &self.origins), ("destination", &self.destinations)] {
            for point in set.iter() {
                let position = self.projection.inverse(point.geometry);
                let mut properties = Map::new();
                properties.insert("name".to_string(), json!(point.name));
                properties.insert("role".to_string(), json!(role));
                features.push(Feature {
                    bbox: None,
                    geometry: Some(Geometry::new((&position).into())),
                    id: None,
                    properties: Some(properties),
                    foreign_members: None,
                });
            }
        }

        let foreign_members = if self.routes.skipped.is_empty() {
            None
        } else {
            let skipped: Vec<JsonValue> = self
                .routes
                .skipped
                .iter()
                .map(|pair| {
                    json!({
                        "origin": pair.origin,
                        "destination": pair.destination,
                        "reason": pair.reason.to_string(),
                    })
                })
                .collect();
            let mut members = Map::new();
            members.insert("skipped_pairs".to_string(), JsonValue::Array(skipped));
            Some(members)
        };

        FeatureCollection {
            bbox: None,
            features,
            foreign_members,
        }
    }

    /// One LineString feature per directed segment, for the base network
    /// layer of the map.
    pub fn network_to_geojson(&self) -> FeatureCollection {
        use petgraph::visit::EdgeRef;

        let features = self
            .network
            .graph
            .edge_references()
            .filter_map(|edge| {
                let from = self.network.node(edge.source())?;
                let to = self.network.node(edge.target())?;
                let a = self.projection.inverse(from.geometry);
                let b = self.projection.inverse(to.geometry);
                let line = line_string![
                    (x: a.x(), y: a.y()),
                    (x: b.x(), y: b.y()),
                ];
                let mut properties = Map::new();
                properties.insert("length_m".to_string(), json!(edge.weight().length));
                Some(Feature {
                    bbox: None,
                    geometry: Some(Geometry::new((&line).into())),
                    id: None,
                    properties: Some(properties),
                    foreign_members: None,
                })
            })
            .collect();

        FeatureCollection {
            bbox: None,
            features,
            foreign_members: None,
        }
    }

    fn route_feature(&self, route: &Route) -> Feature {
        let line: LineString<f64> = route
            .geometry
            .points()
            .map(|p| self.projection.inverse(p))
            .collect();

        let mut properties = Map::new();
        properties.insert("origin".to_string(), json!(route.origin));
        properties.insert("destination".to_string(), json!(route.destination));
        properties.insert("length_m".to_string(), json!(route.length));
        properties.insert("points".to_string(), json!(route.coord_count()));

        Feature {
            bbox: None,
            geometry: Some(Geometry::new((&line).into())),
            id: None,
            properties: Some(properties),
            foreign_members: None,
        }
    }
}
