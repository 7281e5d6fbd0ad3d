use geo::Point;
use hashbrown::{HashMap, HashSet};
use log::debug;
use petgraph::graph::{DiGraph, NodeIndex};
use rstar::{RTree, primitives::GeomWithData};
use rustworkx_core::connectivity::connected_components;

use crate::{
    Error, NodeId,
    model::{Crs, RoadNode, RoadSegment},
    projection::PlanarProjection,
};

/// R-tree entry pairing a node position with its graph index.
pub type IndexedPoint = GeomWithData<[f64; 2], NodeIndex>;

/// Weighted directed road graph with a spatial index over its nodes.
///
/// The graph is immutable once assembled; a routing request reads it,
/// never mutates it.
#[derive(Debug, Clone)]
pub struct RoadNetwork {
    pub graph: DiGraph<RoadNode, RoadSegment>,
    index: RTree<IndexedPoint>,
    ids: HashMap<NodeId, NodeIndex>,
    crs: Crs,
}

impl RoadNetwork {
    /// Assembles a network from raw nodes and directed segments.
    ///
    /// # Errors
    ///
    /// A node id appears twice, a segment references an unknown node, or a
    /// segment length is negative or not finite.
    pub fn from_parts(
        nodes: Vec<RoadNode>,
        segments: Vec<(NodeId, NodeId, RoadSegment)>,
        crs: Crs,
    ) -> Result<Self, Error> {
        let mut graph = DiGraph::with_capacity(nodes.len(), segments.len());
        let mut ids = HashMap::with_capacity(nodes.len());

        for node in nodes {
            let id = node.id;
            let ix = graph.add_node(node);
            if ids.insert(id, ix).is_some() {
                return Err(Error::InvalidData(format!("duplicate node id {id}")));
            }
        }

        for (from, to, segment) in segments {
            if !segment.length.is_finite() || segment.length < 0.0 {
                return Err(Error::InvalidData(format!(
                    "segment {from} -> {to} has invalid length {}",
                    segment.length
                )));
            }
            let a = *ids.get(&from).ok_or_else(|| {
                Error::InvalidData(format!("segment references unknown node {from}"))
            })?;
            let b = *ids
                .get(&to)
                .ok_or_else(|| Error::InvalidData(format!("segment references unknown node {to}")))?;
            graph.add_edge(a, b, segment);
        }

        let index = build_index(&graph);
        Ok(Self {
            graph,
            index,
            ids,
            crs,
        })
    }

    pub fn crs(&self) -> Crs {
        self.crs
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    pub fn node(&self, ix: NodeIndex) -> Option<&RoadNode> {
        self.graph.node_weight(ix)
    }

    /// Graph index of the node with the given external id.
    pub fn index_of(&self, id: NodeId) -> Option<NodeIndex> {
        self.ids.get(&id).copied()
    }

    pub fn nodes(&self) -> impl Iterator<Item = &RoadNode> {
        self.graph.node_weights()
    }

    /// Closest node to the given position under Euclidean distance.
    ///
    /// Returns the graph index, external id and distance to the node.
    /// When several nodes are exactly equidistant, the one with the lowest
    /// external id wins, so repeated queries are reproducible.
    pub fn nearest_node(&self, point: &Point<f64>) -> Option<(NodeIndex, NodeId, f64)> {
        let query = [point.x(), point.y()];
        let mut candidates = self.index.nearest_neighbor_iter_with_distance_2(&query);

        let (first, best_d2) = candidates.next()?;
        let mut best_ix = first.data;
        let mut best_id = self.graph[first.data].id;

        for (entry, d2) in candidates {
            if d2 > best_d2 {
                break;
            }
            let id = self.graph[entry.data].id;
            if id < best_id {
                best_ix = entry.data;
                best_id = id;
            }
        }

        Some((best_ix, best_id, best_d2.sqrt()))
    }

    /// Number of weakly connected components in the graph.
    pub fn connected_component_count(&self) -> usize {
        connected_components(&self.graph).len()
    }

    /// Drops every node outside the largest weakly connected component.
    ///
    /// Opt-in cleanup for datasets with stray disconnected islands; a
    /// network is usable without it, unreachable pairs are simply skipped
    /// at routing time.
    pub fn retain_largest_component(&mut self) {
        let components = connected_components(&self.graph);
        if components.len() <= 1 {
            return;
        }
        let Some(largest) = components.iter().max_by_key(|component| component.len()) else {
            return;
        };

        let keep: HashSet<NodeIndex> = largest.iter().copied().collect();
        let dropped = self.graph.node_count() - keep.len();
        self.graph.retain_nodes(|_, ix| keep.contains(&ix));
        self.rebuild_lookup();
        debug!("Dropped {dropped} nodes outside the largest connected component");
    }

    /// Maps every node position into the projection's planar frame.
    ///
    /// Edge lengths are physical distances and stay untouched.
    ///
    /// # Errors
    ///
    /// The network's reference system is not accepted by the projection.
    pub fn reproject(mut self, projection: &impl PlanarProjection) -> Result<Self, Error> {
        let source = self.crs;
        for node in self.graph.node_weights_mut() {
            node.geometry = projection.project(node.geometry, source)?;
        }
        self.crs = projection.crs();
        self.rebuild_lookup();
        Ok(self)
    }

    fn rebuild_lookup(&mut self) {
        self.ids = self
            .graph
            .node_indices()
            .map(|ix| (self.graph[ix].id, ix))
            .collect();
        self.index = build_index(&self.graph);
    }
}

fn build_index(graph: &DiGraph<RoadNode, RoadSegment>) -> RTree<IndexedPoint> {
    let entries = graph
        .node_indices()
        .map(|ix| {
            let position = graph[ix].geometry;
            IndexedPoint::new([position.x(), position.y()], ix)
        })
        .collect();
    RTree::bulk_load(entries)
}
