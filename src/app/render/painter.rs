use eframe::egui::{Align2, Color32, FontId, Painter, Pos2, Rect, Stroke, Vec2};

use super::super::graph::ViewTransform;
use super::super::render_utils::{circle_visible, draw_background, edge_visible, faded};
use super::{EdgeStyle, LabelStyle, NODE_STROKE, NodeStyle, RenderSurface};

const NODE_FILL: Color32 = Color32::from_rgb(122, 162, 247);
const EDGE_COLOR: Color32 = Color32::from_rgb(96, 106, 122);
const LABEL_COLOR: Color32 = Color32::from_gray(232);
const BACKGROUND: Color32 = Color32::from_rgb(19, 23, 29);

/// Immediate-mode surface drawing onto an egui painter clipped to the canvas.
pub(in crate::app) struct EguiSurface<'p> {
    painter: &'p Painter,
    rect: Rect,
    transform: ViewTransform,
}

impl<'p> EguiSurface<'p> {
    pub(in crate::app) fn new(painter: &'p Painter, rect: Rect) -> Self {
        Self {
            painter,
            rect,
            transform: ViewTransform::IDENTITY,
        }
    }

    fn to_screen(&self, world: Vec2) -> Pos2 {
        self.transform.to_screen(world) + self.rect.min.to_vec2()
    }
}

impl RenderSurface for EguiSurface<'_> {
    fn clear(&mut self) {
        draw_background(self.painter, self.rect, BACKGROUND, self.transform);
    }

    fn set_transform(&mut self, transform: ViewTransform) {
        self.transform = transform;
    }

    fn draw_edge(&mut self, from: Vec2, to: Vec2, style: EdgeStyle) {
        let start = self.to_screen(from);
        let end = self.to_screen(to);
        if !edge_visible(self.rect, start, end, 2.0) {
            return;
        }

        self.painter.line_segment(
            [start, end],
            Stroke::new(style.width * self.transform.scale, faded(EDGE_COLOR, style.opacity)),
        );
    }

    fn draw_node(&mut self, center: Vec2, style: NodeStyle) {
        let center = self.to_screen(center);
        let radius = style.radius * self.transform.scale;
        let stroke_width = NODE_STROKE * self.transform.scale;
        if !circle_visible(self.rect, center, radius + stroke_width) {
            return;
        }

        self.painter
            .circle_filled(center, radius, faded(NODE_FILL, style.opacity));
        self.painter.circle_stroke(
            center,
            radius,
            Stroke::new(stroke_width, faded(BACKGROUND, style.opacity)),
        );
    }

    fn draw_label(&mut self, anchor: Vec2, text: &str, style: LabelStyle) {
        let anchor = self.to_screen(anchor);
        let size = style.size * self.transform.scale;
        // Rough upper bound on label extent; only used for culling.
        let reach = size * text.chars().count() as f32;
        if !circle_visible(self.rect, anchor, reach) {
            return;
        }

        self.painter.text(
            anchor,
            Align2::LEFT_BOTTOM,
            text,
            FontId::proportional(size),
            faded(LABEL_COLOR, style.opacity),
        );
    }
}
