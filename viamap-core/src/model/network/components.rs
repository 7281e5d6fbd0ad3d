//! Road network components - nodes and directed segments

use geo::Point;

use crate::NodeId;

/// Road graph node
#[derive(Debug, Clone)]
pub struct RoadNode {
    /// Stable id of the node in the source dataset
    pub id: NodeId,
    /// Node coordinates in the network reference system
    pub geometry: Point<f64>,
}

/// Directed road segment between two nodes
#[derive(Debug, Clone)]
pub struct RoadSegment {
    /// Traversal cost in meters; must be finite and non-negative
    pub length: f64,
}

impl RoadSegment {
    pub fn new(length: f64) -> Self {
        Self { length }
    }
}
