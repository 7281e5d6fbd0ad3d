use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use geo::Point;
use hashbrown::HashSet;
use log::info;

use super::raw_types::{RawEdge, RawNode};
use crate::{
    Error,
    extent::Region,
    model::{RoadNetwork, RoadNode, RoadSegment},
    provider::{NetworkProvider, TravelMode},
};

/// Road network provider backed by `nodes.csv` and `edges.csv` files.
///
/// Files are re-read on every fetch; nothing is cached across requests.
/// Two-way edges are expanded into a directed pair, one-way edges keep
/// their stated direction only.
#[derive(Debug, Clone)]
pub struct CsvNetworkProvider {
    nodes_path: PathBuf,
    edges_path: PathBuf,
    keep_largest_component: bool,
}

impl CsvNetworkProvider {
    pub fn new(nodes_path: impl Into<PathBuf>, edges_path: impl Into<PathBuf>) -> Self {
        Self {
            nodes_path: nodes_path.into(),
            edges_path: edges_path.into(),
            keep_largest_component: false,
        }
    }

    /// Drop stray disconnected islands left over after clipping to the
    /// query region.
    pub fn keep_largest_component(mut self, keep: bool) -> Self {
        self.keep_largest_component = keep;
        self
    }
}

impl NetworkProvider for CsvNetworkProvider {
    fn fetch_graph(&self, region: &Region, mode: TravelMode) -> Result<RoadNetwork, Error> {
        let nodes: Vec<RawNode> = read_records(open(&self.nodes_path)?)?;
        let edges: Vec<RawEdge> = read_records(open(&self.edges_path)?)?;
        let mut network = assemble(nodes, edges, region, mode)?;

        if self.keep_largest_component {
            network.retain_largest_component();
        }
        Ok(network)
    }
}

fn open(path: &Path) -> Result<File, Error> {
    File::open(path)
        .map_err(|e| {
            std::io::Error::new(e.kind(), format!("failed to open '{}': {e}", path.display()))
        })
        .map_err(Error::from)
}

fn read_records<T, R>(reader: R) -> Result<Vec<T>, Error>
where
    T: for<'de> serde::Deserialize<'de>,
    R: Read,
{
    csv::Reader::from_reader(reader)
        .deserialize()
        .collect::<Result<Vec<T>, _>>()
        .map_err(Error::from)
}

fn assemble(
    nodes: Vec<RawNode>,
    edges: Vec<RawEdge>,
    region: &Region,
    mode: TravelMode,
) -> Result<RoadNetwork, Error> {
    let kept: Vec<RoadNode> = nodes
        .into_iter()
        .filter(|n| region.covers(&Point::new(n.lon, n.lat)))
        .map(|n| RoadNode {
            id: n.id,
            geometry: Point::new(n.lon, n.lat),
        })
        .collect();
    let ids: HashSet<u64> = kept.iter().map(|n| n.id).collect();

    let mut segments = Vec::new();
    for edge in edges {
        if !edge.allows(mode) {
            continue;
        }
        if !ids.contains(&edge.from) || !ids.contains(&edge.to) {
            continue;
        }
        segments.push((edge.from, edge.to, RoadSegment::new(edge.length)));
        if !edge.oneway {
            segments.push((edge.to, edge.from, RoadSegment::new(edge.length)));
        }
    }

    info!(
        "Loaded {} nodes and {} directed segments for {mode} within the query region",
        kept.len(),
        segments.len()
    );

    RoadNetwork::from_parts(kept, segments, region.crs())
}
