//! Road network model with a spatial index over its nodes

mod components;
mod graph;

pub use components::{RoadNode, RoadSegment};
pub use graph::{IndexedPoint, RoadNetwork};
