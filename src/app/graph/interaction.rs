use eframe::egui::{Pos2, Vec2};
use log::debug;

use super::super::physics::LayoutEngine;
use super::super::render::HIT_RADIUS;
use super::GraphEvent;

/// Pointer travel (screen points) beyond which a press is a drag, not a click.
const CLICK_DISTANCE: f32 = 3.0;
const WHEEL_ZOOM_RATE: f32 = 0.002;

/// Pan/zoom mapping from graph space to canvas-local screen space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(in crate::app) struct ViewTransform {
    pub(in crate::app) scale: f32,
    pub(in crate::app) translate: Vec2,
}

impl ViewTransform {
    pub(in crate::app) const MIN_SCALE: f32 = 0.2;
    pub(in crate::app) const MAX_SCALE: f32 = 5.0;
    pub(in crate::app) const IDENTITY: Self = Self {
        scale: 1.0,
        translate: Vec2::ZERO,
    };

    pub(in crate::app) fn to_screen(self, world: Vec2) -> Pos2 {
        (self.translate + world * self.scale).to_pos2()
    }

    pub(in crate::app) fn to_world(self, screen: Pos2) -> Vec2 {
        (screen.to_vec2() - self.translate) / self.scale
    }

    /// Scales around `anchor`, keeping the graph point under it in place.
    pub(in crate::app) fn zoom_about(&mut self, anchor: Pos2, factor: f32) {
        if !factor.is_finite() || factor <= 0.0 {
            return;
        }

        let world = self.to_world(anchor);
        self.scale = (self.scale * factor).clamp(Self::MIN_SCALE, Self::MAX_SCALE);
        self.translate = anchor.to_vec2() - world * self.scale;
    }

    pub(in crate::app) fn pan_by(&mut self, delta: Vec2) {
        self.translate += delta;
    }
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Pointer input in canvas-local screen coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(in crate::app) enum PointerEvent {
    Moved(Pos2),
    Left,
    Pressed(Pos2),
    Released(Pos2),
    Scrolled { at: Pos2, delta: f32 },
    Zoomed { at: Pos2, factor: f32 },
}

#[derive(Debug, Default, PartialEq)]
pub(in crate::app) struct InteractionOutcome {
    pub(in crate::app) redraw: bool,
    pub(in crate::app) event: Option<GraphEvent>,
}

impl InteractionOutcome {
    fn redraw(redraw: bool) -> Self {
        Self {
            redraw,
            event: None,
        }
    }
}

#[derive(Clone, Copy, Debug)]
enum Gesture {
    Idle,
    Node {
        index: usize,
        origin: Pos2,
        grab: Vec2,
        moved: bool,
    },
    Canvas {
        last: Pos2,
    },
}

pub(in crate::app) struct InteractionController {
    transform: ViewTransform,
    focus: Option<usize>,
    gesture: Gesture,
    alive: bool,
}

impl InteractionController {
    pub(in crate::app) fn new() -> Self {
        Self {
            transform: ViewTransform::IDENTITY,
            focus: None,
            gesture: Gesture::Idle,
            alive: true,
        }
    }

    pub(in crate::app) fn transform(&self) -> ViewTransform {
        self.transform
    }

    pub(in crate::app) fn focus(&self) -> Option<usize> {
        self.focus
    }

    pub(in crate::app) fn gesture_active(&self) -> bool {
        !matches!(self.gesture, Gesture::Idle)
    }

    pub(in crate::app) fn is_alive(&self) -> bool {
        self.alive
    }

    pub(in crate::app) fn reset_transform(&mut self) -> bool {
        let changed = self.transform != ViewTransform::IDENTITY;
        self.transform = ViewTransform::IDENTITY;
        changed
    }

    /// Stops reacting to input. Events arriving afterwards are ignored.
    pub(in crate::app) fn teardown(&mut self) {
        self.alive = false;
        self.focus = None;
        self.gesture = Gesture::Idle;
    }

    pub(in crate::app) fn handle(
        &mut self,
        event: PointerEvent,
        engine: &mut LayoutEngine,
    ) -> InteractionOutcome {
        if !self.alive {
            debug!("ignoring {event:?} after teardown");
            return InteractionOutcome::default();
        }

        match event {
            PointerEvent::Moved(pos) => self.pointer_moved(pos, engine),
            PointerEvent::Left => {
                if matches!(self.gesture, Gesture::Idle) {
                    InteractionOutcome::redraw(self.set_focus(None))
                } else {
                    InteractionOutcome::default()
                }
            }
            PointerEvent::Pressed(pos) => self.pointer_pressed(pos, engine),
            PointerEvent::Released(pos) => self.pointer_released(pos, engine),
            PointerEvent::Scrolled { at, delta } => {
                self.transform
                    .zoom_about(at, 2.0_f32.powf(delta * WHEEL_ZOOM_RATE));
                InteractionOutcome::redraw(true)
            }
            PointerEvent::Zoomed { at, factor } => {
                self.transform.zoom_about(at, factor);
                InteractionOutcome::redraw(true)
            }
        }
    }

    fn pointer_moved(&mut self, pos: Pos2, engine: &mut LayoutEngine) -> InteractionOutcome {
        if !self.gesture_active() {
            let hovered = self.hit_test(engine, pos);
            return InteractionOutcome::redraw(self.set_focus(hovered));
        }

        match &mut self.gesture {
            Gesture::Idle => InteractionOutcome::default(),
            Gesture::Node {
                index,
                origin,
                grab,
                moved,
            } => {
                if (pos - *origin).length() > CLICK_DISTANCE {
                    *moved = true;
                }
                engine.pin(*index, self.transform.to_world(pos) + *grab);
                InteractionOutcome::redraw(true)
            }
            Gesture::Canvas { last } => {
                let delta = pos - *last;
                *last = pos;
                self.transform.pan_by(delta);
                InteractionOutcome::redraw(true)
            }
        }
    }

    fn pointer_pressed(&mut self, pos: Pos2, engine: &mut LayoutEngine) -> InteractionOutcome {
        if self.gesture_active() {
            return InteractionOutcome::default();
        }

        let Some(index) = self.hit_test(engine, pos) else {
            self.gesture = Gesture::Canvas { last: pos };
            return InteractionOutcome::default();
        };
        let Some(node_pos) = engine.node(index).map(|node| node.pos) else {
            return InteractionOutcome::default();
        };

        engine.set_alpha_target(engine.config().drag_alpha_target);
        engine.restart();
        engine.pin(index, node_pos);
        self.gesture = Gesture::Node {
            index,
            origin: pos,
            grab: node_pos - self.transform.to_world(pos),
            moved: false,
        };
        self.set_focus(Some(index));
        InteractionOutcome::redraw(true)
    }

    fn pointer_released(&mut self, pos: Pos2, engine: &mut LayoutEngine) -> InteractionOutcome {
        let gesture = std::mem::replace(&mut self.gesture, Gesture::Idle);
        let hovered = self.hit_test(engine, pos);

        match gesture {
            Gesture::Idle => InteractionOutcome::default(),
            Gesture::Canvas { .. } => InteractionOutcome::redraw(self.set_focus(hovered)),
            Gesture::Node {
                index,
                origin,
                moved,
                ..
            } => {
                engine.unpin(index);
                engine.set_alpha_target(0.0);
                self.set_focus(hovered);

                let clicked = !moved && (pos - origin).length() <= CLICK_DISTANCE;
                InteractionOutcome {
                    redraw: true,
                    event: clicked
                        .then(|| engine.node(index))
                        .flatten()
                        .map(|node| GraphEvent::Navigate(node.id.clone())),
                }
            }
        }
    }

    fn hit_test(&self, engine: &LayoutEngine, screen: Pos2) -> Option<usize> {
        let world = self.transform.to_world(screen);
        engine
            .nodes()
            .iter()
            .enumerate()
            .filter_map(|(index, node)| {
                let distance = (node.pos - world).length();
                (distance <= HIT_RADIUS).then_some((index, distance))
            })
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(index, _)| index)
    }

    /// Returns whether the focus changed; re-entering the same node is a no-op.
    fn set_focus(&mut self, focus: Option<usize>) -> bool {
        if self.focus == focus {
            return false;
        }
        self.focus = focus;
        true
    }
}
