use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use eframe::egui::{self, Context};
use log::{error, info};

use crate::graph::GraphSnapshot;
use crate::source::{GraphSource, LoadError, fetch_graph_data};

mod declutter;
mod graph;
mod physics;
mod render;
mod render_utils;
mod ui;

use graph::{GraphEvent, GraphView};

pub use physics::LayoutConfig;

type LoadResult = Result<GraphSnapshot, LoadError>;

pub struct GraphViewApp {
    source: GraphSource,
    config: LayoutConfig,
    stay_open: bool,
    state: AppState,
    reload_rx: Option<Receiver<LoadResult>>,
}

enum AppState {
    Loading { rx: Receiver<LoadResult> },
    Ready(Box<GraphView>),
    Empty,
    Error(String),
    Closed,
}

impl AppState {
    fn from_result(result: LoadResult, config: LayoutConfig) -> Self {
        match result {
            Ok(snapshot) if snapshot.is_empty() => {
                info!("graph data contains no documents");
                Self::Empty
            }
            Ok(snapshot) => Self::Ready(Box::new(GraphView::new(snapshot, config))),
            Err(error) => {
                error!("failed to load graph data: {error}");
                Self::Error(error.to_string())
            }
        }
    }
}

impl GraphViewApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        source: GraphSource,
        config: LayoutConfig,
        stay_open: bool,
    ) -> Self {
        let state = Self::start_load(source.clone());
        Self {
            source,
            config,
            stay_open,
            state,
            reload_rx: None,
        }
    }

    fn spawn_load(source: GraphSource) -> Receiver<LoadResult> {
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            let _ = tx.send(fetch_graph_data(&source));
        });

        rx
    }

    fn start_load(source: GraphSource) -> AppState {
        info!("loading graph data from {}", source.describe());
        AppState::Loading {
            rx: Self::spawn_load(source),
        }
    }

    fn dispatch(&mut self, ctx: &Context, event: GraphEvent) {
        match event {
            GraphEvent::Navigate(id) => {
                info!("navigating to document {id}");
                println!("{id}");
                if !self.stay_open {
                    self.close(ctx);
                }
            }
            GraphEvent::Close => self.close(ctx),
        }
    }

    fn close(&mut self, ctx: &Context) {
        if let AppState::Ready(view) = &mut self.state {
            view.teardown();
        }
        info!("closing graph view");
        self.reload_rx = None;
        self.state = AppState::Closed;
        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
    }
}

impl eframe::App for GraphViewApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        let mut transition = None;
        let mut event = None;

        match &mut self.state {
            AppState::Loading { rx } => {
                match rx.try_recv() {
                    Ok(result) => transition = Some(AppState::from_result(result, self.config)),
                    Err(TryRecvError::Empty) => ctx.request_repaint(),
                    Err(TryRecvError::Disconnected) => {
                        transition = Some(AppState::Error(
                            "Background load worker disconnected".to_owned(),
                        ));
                    }
                }

                ui::show_loading(ctx);
            }
            AppState::Error(error) => {
                if ui::show_error(ctx, error) {
                    transition = Some(Self::start_load(self.source.clone()));
                }
            }
            AppState::Empty => {
                if ui::show_empty(ctx) {
                    event = Some(GraphEvent::Close);
                }
            }
            AppState::Ready(view) => {
                let is_reloading = self.reload_rx.is_some();
                let (actions, view_event) = view.show(ctx, is_reloading);
                event = view_event;
                if actions.close {
                    event = Some(GraphEvent::Close);
                }

                if actions.reload && self.reload_rx.is_none() {
                    info!("reloading graph data from {}", self.source.describe());
                    self.reload_rx = Some(Self::spawn_load(self.source.clone()));
                }

                if let Some(rx) = self.reload_rx.take() {
                    match rx.try_recv() {
                        Ok(result) => {
                            view.teardown();
                            transition = Some(AppState::from_result(result, self.config));
                        }
                        Err(TryRecvError::Empty) => {
                            self.reload_rx = Some(rx);
                            ctx.request_repaint();
                        }
                        Err(TryRecvError::Disconnected) => {
                            view.teardown();
                            transition = Some(AppState::Error(
                                "Background load worker disconnected".to_owned(),
                            ));
                        }
                    }
                }
            }
            AppState::Closed => {}
        }

        if let Some(next_state) = transition {
            self.reload_rx = None;
            self.state = next_state;
        }

        if let Some(event) = event {
            self.dispatch(ctx, event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{DocumentId, GraphNode};

    #[test]
    fn empty_snapshot_shows_empty_state() {
        let state = AppState::from_result(Ok(GraphSnapshot::empty()), LayoutConfig::default());
        assert!(matches!(state, AppState::Empty));
    }

    #[test]
    fn load_failure_shows_error_state() {
        let result = Err(LoadError::Command("exit status: 1".to_owned()));
        let state = AppState::from_result(result, LayoutConfig::default());
        assert!(matches!(state, AppState::Error(message) if message.contains("exit status: 1")));
    }

    #[test]
    fn populated_snapshot_becomes_ready() {
        let snapshot = GraphSnapshot::new(
            vec![GraphNode {
                id: DocumentId::from("1"),
                title: "Only".to_owned(),
            }],
            Vec::new(),
        );
        let state = AppState::from_result(Ok(snapshot), LayoutConfig::default());
        assert!(matches!(state, AppState::Ready(view) if view.node_count() == 1));
    }
}
