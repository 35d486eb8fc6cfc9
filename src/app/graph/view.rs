use eframe::egui::{self, Pos2, Rect, Response, Sense, Ui, Vec2};

use super::super::render::{EguiSurface, render_frame};
use super::{GraphEvent, GraphView, PointerEvent};

impl GraphView {
    pub(in crate::app) fn draw(&mut self, ui: &mut Ui) -> Option<GraphEvent> {
        let (rect, response) = ui.allocate_exact_size(ui.available_size(), Sense::click_and_drag());
        if self.needs_rebuild(rect.size()) {
            self.rebuild(rect.size());
        }

        let pointer_events = Self::collect_pointer_events(
            ui,
            rect,
            &response,
            self.controller.gesture_active(),
            self.controller.focus().is_some(),
        );

        let mut redraw = false;
        let mut event = None;
        for pointer_event in pointer_events {
            let outcome = self.handle_pointer(pointer_event);
            redraw |= outcome.redraw;
            if outcome.event.is_some() {
                event = outcome.event;
            }
        }

        let hot = self.advance();

        let painter = ui.painter_at(rect);
        let mut surface = EguiSurface::new(&painter, rect);
        render_frame(&mut surface, &self.scene());

        if self.controller.gesture_active() && self.controller.focus().is_some() {
            ui.output_mut(|output| output.cursor_icon = egui::CursorIcon::Grabbing);
        } else if self.controller.focus().is_some() {
            ui.output_mut(|output| output.cursor_icon = egui::CursorIcon::PointingHand);
        }

        if hot || redraw {
            ui.ctx().request_repaint();
        }

        event
    }

    /// Translates this frame's raw egui input into canvas-local pointer
    /// events, in the order the controller expects them.
    fn collect_pointer_events(
        ui: &Ui,
        rect: Rect,
        response: &Response,
        gesture_active: bool,
        has_focus: bool,
    ) -> Vec<PointerEvent> {
        let local = |pos: Pos2| (pos - rect.min).to_pos2();
        let inside = response.contains_pointer();
        let mut events = Vec::new();

        ui.input(|input| {
            let pointer = input.pointer.latest_pos();

            if let Some(pos) = pointer {
                let moved = input.pointer.delta() != Vec2::ZERO;
                if moved && (inside || gesture_active) {
                    events.push(PointerEvent::Moved(local(pos)));
                }

                let pressed = inside && input.pointer.primary_pressed();
                if pressed {
                    events.push(PointerEvent::Pressed(local(pos)));
                }

                if input.pointer.primary_released() && (gesture_active || pressed) {
                    events.push(PointerEvent::Released(local(pos)));
                }
            }

            if !inside && !gesture_active && has_focus {
                events.push(PointerEvent::Left);
            }

            if !inside {
                return;
            }

            let at = local(pointer.unwrap_or_else(|| rect.center()));
            let zoom = input.zoom_delta();
            if (zoom - 1.0).abs() > f32::EPSILON {
                events.push(PointerEvent::Zoomed { at, factor: zoom });
            } else if input.raw_scroll_delta.y.abs() > f32::EPSILON {
                events.push(PointerEvent::Scrolled {
                    at,
                    delta: input.raw_scroll_delta.y,
                });
            }
        });

        events
    }
}
