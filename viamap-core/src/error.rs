use thiserror::Error;

use crate::NodeId;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Network fetch failed: {0}")]
    GraphFetch(String),
    #[error("Projection error: {0}")]
    Projection(String),
    #[error("Road network has no nodes")]
    EmptyGraph,
    #[error("No path from node {from} to node {to}")]
    NoPath { from: NodeId, to: NodeId },
    #[error("No route could be computed for any origin-destination pair")]
    NoRoutes,
    #[error("Invalid data: {0}")]
    InvalidData(String),
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
}
