use eframe::egui::Vec2;
use log::debug;

use crate::graph::{AdjacencyIndex, GraphSnapshot};
use crate::util::truncate_label;

use super::super::declutter::LabelDeclutterer;
use super::super::physics::{LayoutConfig, LayoutEngine};
use super::super::render::Scene;
use super::{GraphView, InteractionController, InteractionOutcome, PointerEvent};

impl GraphView {
    pub(in crate::app) fn new(snapshot: GraphSnapshot, config: LayoutConfig) -> Self {
        let adjacency = AdjacencyIndex::build(snapshot.node_count(), snapshot.edges());
        let labels = snapshot
            .nodes()
            .iter()
            .map(|node| truncate_label(&node.title).into_owned())
            .collect();
        let engine = LayoutEngine::for_snapshot(&snapshot, Vec2::ZERO, config);

        Self {
            snapshot,
            adjacency,
            labels,
            config,
            engine,
            controller: InteractionController::new(),
            declutter: LabelDeclutterer::default(),
            canvas_size: Vec2::ZERO,
            revision: 0,
        }
    }

    pub(in crate::app) fn needs_rebuild(&self, canvas_size: Vec2) -> bool {
        self.controller.is_alive() && (canvas_size - self.canvas_size).length() > 0.5
    }

    /// Throws away the current layout and interaction state and re-seeds the
    /// simulation centred on a canvas of `canvas_size`.
    pub(in crate::app) fn rebuild(&mut self, canvas_size: Vec2) {
        self.engine.stop();
        self.controller.teardown();

        self.canvas_size = canvas_size;
        self.engine = LayoutEngine::for_snapshot(&self.snapshot, canvas_size * 0.5, self.config);
        self.controller = InteractionController::new();
        self.declutter.reset();
        self.revision = self.revision.wrapping_add(1);

        debug!(
            "rebuilt graph layout #{} for {:.0}x{:.0} canvas",
            self.revision, canvas_size.x, canvas_size.y
        );
    }

    pub(in crate::app) fn teardown(&mut self) {
        if self.controller.is_alive() {
            debug!("tearing down graph view");
        }
        self.engine.stop();
        self.controller.teardown();
    }

    pub(in crate::app) fn reset_view(&mut self) {
        if self.controller.reset_transform() {
            debug!("view transform reset");
        }
    }

    pub(in crate::app) fn handle_pointer(&mut self, event: PointerEvent) -> InteractionOutcome {
        self.controller.handle(event, &mut self.engine)
    }

    /// Runs one animation frame of layout work. Returns whether the
    /// simulation is still hot.
    pub(in crate::app) fn advance(&mut self) -> bool {
        if !self.engine.is_hot() {
            return false;
        }

        self.engine.tick();
        self.declutter.update(self.engine.nodes());
        true
    }

    pub(in crate::app) fn scene(&self) -> Scene<'_> {
        Scene {
            nodes: self.engine.nodes(),
            edges: self.snapshot.edges(),
            labels: &self.labels,
            adjacency: &self.adjacency,
            declutter: &self.declutter,
            focus: self.controller.focus(),
            transform: self.controller.transform(),
        }
    }

    pub(in crate::app) fn node_count(&self) -> usize {
        self.snapshot.node_count()
    }

    pub(in crate::app) fn edge_count(&self) -> usize {
        self.snapshot.edge_count()
    }
}
