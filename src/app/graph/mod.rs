mod build;
mod interaction;
mod view;

use eframe::egui::Vec2;

use crate::graph::{AdjacencyIndex, DocumentId, GraphSnapshot};

use super::declutter::LabelDeclutterer;
use super::physics::{LayoutConfig, LayoutEngine};

pub(in crate::app) use interaction::{
    InteractionController, InteractionOutcome, PointerEvent, ViewTransform,
};

/// Requests the graph view sends to whoever hosts it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GraphEvent {
    Navigate(DocumentId),
    Close,
}

/// A live graph view over one non-empty snapshot.
pub(in crate::app) struct GraphView {
    snapshot: GraphSnapshot,
    adjacency: AdjacencyIndex,
    labels: Vec<String>,
    config: LayoutConfig,
    engine: LayoutEngine,
    controller: InteractionController,
    declutter: LabelDeclutterer,
    canvas_size: Vec2,
    revision: u64,
}
