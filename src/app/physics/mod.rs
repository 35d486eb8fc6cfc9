mod forces;
mod quadtree;

use eframe::egui::Vec2;
use log::debug;

use crate::graph::{DocumentId, GraphSnapshot};
use crate::util::phyllotaxis_offset;

pub use forces::{CenterForce, CollideForce, Force, LinkForce, ManyBodyForce};

/// Tuning for the layout simulation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutConfig {
    pub link_distance: f32,
    pub link_iterations: usize,
    pub charge_strength: f32,
    pub barnes_hut_theta: f32,
    pub center_strength: f32,
    pub collide_radius: f32,
    pub collide_strength: f32,
    pub velocity_decay: f32,
    pub alpha_min: f32,
    pub alpha_decay: f32,
    pub drag_alpha_target: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        let alpha_min = 0.001_f32;
        Self {
            link_distance: 130.0,
            link_iterations: 1,
            charge_strength: -300.0,
            barnes_hut_theta: 0.9,
            center_strength: 0.05,
            collide_radius: 60.0,
            collide_strength: 1.0,
            velocity_decay: 0.4,
            alpha_min,
            alpha_decay: 1.0 - alpha_min.powf(1.0 / 300.0),
            drag_alpha_target: 0.3,
        }
    }
}

/// A graph node plus its live physics state. `pin` holds the fixed position
/// of a node that is excluded from integration (while dragged).
#[derive(Clone, Debug, PartialEq)]
pub struct SimNode {
    pub id: DocumentId,
    pub title: String,
    pub pos: Vec2,
    pub velocity: Vec2,
    pub pin: Option<Vec2>,
}

impl SimNode {
    pub fn new(id: DocumentId, title: String, pos: Vec2) -> Self {
        Self {
            id,
            title,
            pos,
            velocity: Vec2::ZERO,
            pin: None,
        }
    }

    pub fn is_pinned(&self) -> bool {
        self.pin.is_some()
    }
}

/// Simulation temperature. `alpha` moves a fixed fraction toward
/// `alpha_target` every tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SimulationState {
    pub alpha: f32,
    pub alpha_target: f32,
}

impl Default for SimulationState {
    fn default() -> Self {
        Self {
            alpha: 1.0,
            alpha_target: 0.0,
        }
    }
}

/// Seeds simulation nodes on a spiral around `center`, in snapshot order.
pub fn seed_nodes(snapshot: &GraphSnapshot, center: Vec2) -> Vec<SimNode> {
    snapshot
        .nodes()
        .iter()
        .enumerate()
        .map(|(index, node)| {
            SimNode::new(
                node.id.clone(),
                node.title.clone(),
                center + phyllotaxis_offset(index),
            )
        })
        .collect()
}

pub struct LayoutEngine {
    nodes: Vec<SimNode>,
    forces: Vec<Box<dyn Force>>,
    state: SimulationState,
    config: LayoutConfig,
    stopped: bool,
}

impl LayoutEngine {
    /// An engine with no forces registered.
    pub fn new(nodes: Vec<SimNode>, config: LayoutConfig) -> Self {
        Self {
            nodes,
            forces: Vec::new(),
            state: SimulationState::default(),
            config,
            stopped: false,
        }
    }

    /// Link, charge, centering and collision forces for `snapshot`, centred
    /// on `center`.
    pub fn for_snapshot(snapshot: &GraphSnapshot, center: Vec2, config: LayoutConfig) -> Self {
        let mut engine = Self::new(seed_nodes(snapshot, center), config);
        engine.register_force(Box::new(LinkForce::new(
            snapshot.node_count(),
            snapshot.edges(),
            config.link_distance,
            config.link_iterations,
        )));
        engine.register_force(Box::new(ManyBodyForce::new(
            config.charge_strength,
            config.barnes_hut_theta,
        )));
        engine.register_force(Box::new(CenterForce::new(center, config.center_strength)));
        engine.register_force(Box::new(CollideForce::new(
            config.collide_radius,
            config.collide_strength,
            1,
        )));
        engine
    }

    /// Adds a force, replacing any registered force with the same name.
    pub fn register_force(&mut self, force: Box<dyn Force>) {
        match self
            .forces
            .iter_mut()
            .find(|existing| existing.name() == force.name())
        {
            Some(existing) => *existing = force,
            None => self.forces.push(force),
        }
    }

    pub fn force_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.forces.iter().map(|force| force.name())
    }

    pub fn tick(&mut self) {
        if self.stopped || self.nodes.is_empty() {
            return;
        }

        self.state.alpha += (self.state.alpha_target - self.state.alpha) * self.config.alpha_decay;
        let alpha = self.state.alpha;

        for force in &mut self.forces {
            force.apply(&mut self.nodes, alpha);
        }

        let retained = 1.0 - self.config.velocity_decay;
        for node in &mut self.nodes {
            match node.pin {
                Some(pin) => {
                    node.pos = pin;
                    node.velocity = Vec2::ZERO;
                }
                None => {
                    node.velocity *= retained;
                    node.pos += node.velocity;
                }
            }
        }
    }

    pub fn nodes(&self) -> &[SimNode] {
        &self.nodes
    }

    pub fn node(&self, index: usize) -> Option<&SimNode> {
        self.nodes.get(index)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn state(&self) -> SimulationState {
        self.state
    }

    pub fn alpha(&self) -> f32 {
        self.state.alpha
    }

    pub fn set_alpha_target(&mut self, alpha_target: f32) {
        self.state.alpha_target = alpha_target;
    }

    /// Still moving enough to be worth redrawing every frame. A raised
    /// target keeps a settled engine ticking so it can warm back up.
    pub fn is_hot(&self) -> bool {
        let alpha_min = self.config.alpha_min;
        !self.stopped
            && !self.nodes.is_empty()
            && (self.state.alpha >= alpha_min || self.state.alpha_target >= alpha_min)
    }

    pub fn config(&self) -> LayoutConfig {
        self.config
    }

    pub fn pin(&mut self, index: usize, pos: Vec2) {
        if let Some(node) = self.nodes.get_mut(index) {
            node.pin = Some(pos);
        }
    }

    pub fn unpin(&mut self, index: usize) {
        if let Some(node) = self.nodes.get_mut(index) {
            node.pin = None;
        }
    }

    pub fn restart(&mut self) {
        self.stopped = false;
    }

    pub fn stop(&mut self) {
        if !self.stopped {
            debug!("layout engine stopped at alpha {:.4}", self.state.alpha);
        }
        self.stopped = true;
    }
}
