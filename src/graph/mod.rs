mod adjacency;
mod snapshot;

pub use adjacency::AdjacencyIndex;
pub use snapshot::{DocumentId, GraphEdge, GraphNode, GraphSnapshot};
