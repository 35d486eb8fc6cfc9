use eframe::egui::{self, Align, Context, Layout};

use super::super::graph::{GraphEvent, GraphView};

const HEADLINE_SPACE: f32 = 120.0;

/// What the user asked for from the top bar this frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(in crate::app) struct TopBarActions {
    pub(in crate::app) reload: bool,
    pub(in crate::app) close: bool,
}

impl GraphView {
    pub(in crate::app) fn show(
        &mut self,
        ctx: &Context,
        is_reloading: bool,
    ) -> (TopBarActions, Option<GraphEvent>) {
        let mut actions = TopBarActions::default();

        egui::TopBottomPanel::top("top_bar")
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.heading("Document graph");
                    ui.separator();
                    ui.label(format!("{} nodes · {} edges", self.node_count(), self.edge_count()));
                    if ui.button("Reset view").clicked() {
                        self.reset_view();
                    }
                    let reload_button = ui.add_enabled(!is_reloading, egui::Button::new("Reload"));
                    if reload_button.clicked() {
                        actions.reload = true;
                    }
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        if ui.button("✕").on_hover_text("Close graph view").clicked() {
                            actions.close = true;
                        }
                        if is_reloading {
                            ui.spinner();
                        }
                    });
                });
            });

        let event = egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| self.draw(ui))
            .inner;

        (actions, event)
    }
}

pub(in crate::app) fn show_loading(ctx: &Context) {
    egui::CentralPanel::default().show(ctx, |ui| {
        ui.vertical_centered(|ui| {
            ui.add_space(HEADLINE_SPACE);
            ui.heading("Loading document graph...");
            ui.add_space(8.0);
            ui.spinner();
        });
    });
}

/// Returns true when the user asked to retry.
pub(in crate::app) fn show_error(ctx: &Context, error: &str) -> bool {
    let mut retry = false;
    egui::CentralPanel::default().show(ctx, |ui| {
        ui.vertical_centered(|ui| {
            ui.add_space(HEADLINE_SPACE);
            ui.heading("Failed to load graph data.");
            ui.add_space(6.0);
            ui.label(error);
            ui.add_space(10.0);
            retry = ui.button("Retry").clicked();
        });
    });
    retry
}

/// Returns true when the user asked to leave the view.
pub(in crate::app) fn show_empty(ctx: &Context) -> bool {
    let mut back = false;
    egui::CentralPanel::default().show(ctx, |ui| {
        ui.vertical_centered(|ui| {
            ui.add_space(HEADLINE_SPACE);
            ui.heading("No documents to visualize.");
            ui.add_space(6.0);
            ui.label("Create some documents to see your knowledge graph.");
            ui.add_space(10.0);
            back = ui.button("Back").clicked();
        });
    });
    back
}
