mod painter;

use eframe::egui::Vec2;

use crate::graph::AdjacencyIndex;

use super::declutter::LabelDeclutterer;
use super::graph::ViewTransform;
use super::physics::SimNode;

pub(in crate::app) use painter::EguiSurface;

pub(in crate::app) const NODE_RADIUS: f32 = 7.0;
pub(in crate::app) const FOCUS_RADIUS: f32 = 9.0;
pub(in crate::app) const HIT_RADIUS: f32 = FOCUS_RADIUS;
pub(in crate::app) const NODE_STROKE: f32 = 2.0;
pub(in crate::app) const DIM_OPACITY: f32 = 0.15;
pub(in crate::app) const EDGE_WIDTH: f32 = 1.5;
pub(in crate::app) const EDGE_OPACITY: f32 = 0.5;
pub(in crate::app) const FOCUS_EDGE_WIDTH: f32 = 2.0;
pub(in crate::app) const FOCUS_EDGE_OPACITY: f32 = 0.8;
pub(in crate::app) const FADED_EDGE_OPACITY: f32 = 0.05;
pub(in crate::app) const LABEL_SIZE: f32 = 11.0;
const LABEL_OFFSET: Vec2 = Vec2::new(12.0, 4.0);

#[derive(Clone, Copy, Debug, PartialEq)]
pub(in crate::app) struct EdgeStyle {
    pub(in crate::app) width: f32,
    pub(in crate::app) opacity: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub(in crate::app) struct NodeStyle {
    pub(in crate::app) radius: f32,
    pub(in crate::app) opacity: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub(in crate::app) struct LabelStyle {
    pub(in crate::app) size: f32,
    pub(in crate::app) opacity: f32,
}

/// Drawing backend. Coordinates are in graph space; the surface applies the
/// current view transform itself.
pub(in crate::app) trait RenderSurface {
    fn clear(&mut self);
    fn set_transform(&mut self, transform: ViewTransform);
    fn draw_edge(&mut self, from: Vec2, to: Vec2, style: EdgeStyle);
    fn draw_node(&mut self, center: Vec2, style: NodeStyle);
    fn draw_label(&mut self, anchor: Vec2, text: &str, style: LabelStyle);
}

/// Everything one frame is drawn from.
pub(in crate::app) struct Scene<'a> {
    pub(in crate::app) nodes: &'a [SimNode],
    pub(in crate::app) edges: &'a [(usize, usize)],
    pub(in crate::app) labels: &'a [String],
    pub(in crate::app) adjacency: &'a AdjacencyIndex,
    pub(in crate::app) declutter: &'a LabelDeclutterer,
    pub(in crate::app) focus: Option<usize>,
    pub(in crate::app) transform: ViewTransform,
}

impl Scene<'_> {
    fn edge_style(&self, source: usize, target: usize) -> EdgeStyle {
        match self.focus {
            None => EdgeStyle {
                width: EDGE_WIDTH,
                opacity: EDGE_OPACITY,
            },
            Some(focus) if focus == source || focus == target => EdgeStyle {
                width: FOCUS_EDGE_WIDTH,
                opacity: FOCUS_EDGE_OPACITY,
            },
            Some(_) => EdgeStyle {
                width: EDGE_WIDTH,
                opacity: FADED_EDGE_OPACITY,
            },
        }
    }

    fn node_opacity(&self, index: usize) -> f32 {
        match self.focus {
            Some(focus) if !self.adjacency.is_connected(focus, index) => DIM_OPACITY,
            _ => 1.0,
        }
    }
}

pub(in crate::app) fn render_frame(surface: &mut impl RenderSurface, scene: &Scene<'_>) {
    surface.clear();
    surface.set_transform(scene.transform);

    for &(source, target) in scene.edges {
        let (Some(from), Some(to)) = (scene.nodes.get(source), scene.nodes.get(target)) else {
            continue;
        };
        surface.draw_edge(from.pos, to.pos, scene.edge_style(source, target));
    }

    for (index, node) in scene.nodes.iter().enumerate() {
        let opacity = scene.node_opacity(index);
        let radius = if scene.focus == Some(index) {
            FOCUS_RADIUS
        } else {
            NODE_RADIUS
        };
        surface.draw_node(node.pos, NodeStyle { radius, opacity });

        if scene.declutter.is_hidden(index) {
            continue;
        }
        if let Some(label) = scene.labels.get(index) {
            surface.draw_label(
                node.pos + LABEL_OFFSET,
                label,
                LabelStyle {
                    size: LABEL_SIZE,
                    opacity,
                },
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use eframe::egui::vec2;

    use super::*;
    use crate::graph::DocumentId;

    #[derive(Debug, PartialEq)]
    enum DrawOp {
        Clear,
        Transform(ViewTransform),
        Edge(Vec2, Vec2, EdgeStyle),
        Node(Vec2, NodeStyle),
        Label(String, LabelStyle),
    }

    #[derive(Default)]
    struct Recorder {
        ops: Vec<DrawOp>,
    }

    impl RenderSurface for Recorder {
        fn clear(&mut self) {
            self.ops.clear();
            self.ops.push(DrawOp::Clear);
        }

        fn set_transform(&mut self, transform: ViewTransform) {
            self.ops.push(DrawOp::Transform(transform));
        }

        fn draw_edge(&mut self, from: Vec2, to: Vec2, style: EdgeStyle) {
            self.ops.push(DrawOp::Edge(from, to, style));
        }

        fn draw_node(&mut self, center: Vec2, style: NodeStyle) {
            self.ops.push(DrawOp::Node(center, style));
        }

        fn draw_label(&mut self, _anchor: Vec2, text: &str, style: LabelStyle) {
            self.ops.push(DrawOp::Label(text.to_owned(), style));
        }
    }

    impl Recorder {
        fn nodes(&self) -> Vec<NodeStyle> {
            self.ops
                .iter()
                .filter_map(|op| match op {
                    DrawOp::Node(_, style) => Some(*style),
                    _ => None,
                })
                .collect()
        }

        fn edges(&self) -> Vec<EdgeStyle> {
            self.ops
                .iter()
                .filter_map(|op| match op {
                    DrawOp::Edge(_, _, style) => Some(*style),
                    _ => None,
                })
                .collect()
        }

        fn labels(&self) -> Vec<(String, f32)> {
            self.ops
                .iter()
                .filter_map(|op| match op {
                    DrawOp::Label(text, style) => Some((text.clone(), style.opacity)),
                    _ => None,
                })
                .collect()
        }
    }

    struct Fixture {
        nodes: Vec<SimNode>,
        edges: Vec<(usize, usize)>,
        labels: Vec<String>,
        adjacency: AdjacencyIndex,
        declutter: LabelDeclutterer,
    }

    impl Fixture {
        /// A-B-C chain laid out far enough apart that no label is hidden.
        fn chain() -> Self {
            let nodes = ["A", "B", "C"]
                .iter()
                .enumerate()
                .map(|(index, id)| {
                    SimNode::new(
                        DocumentId::from(*id),
                        id.to_string(),
                        vec2(index as f32 * 200.0, 0.0),
                    )
                })
                .collect::<Vec<_>>();
            let edges = vec![(0, 1), (1, 2)];
            let mut declutter = LabelDeclutterer::default();
            declutter.update(&nodes);
            Self {
                labels: nodes.iter().map(|node| node.title.clone()).collect(),
                adjacency: AdjacencyIndex::build(nodes.len(), &edges),
                nodes,
                edges,
                declutter,
            }
        }

        fn scene(&self, focus: Option<usize>) -> Scene<'_> {
            Scene {
                nodes: &self.nodes,
                edges: &self.edges,
                labels: &self.labels,
                adjacency: &self.adjacency,
                declutter: &self.declutter,
                focus,
                transform: ViewTransform::IDENTITY,
            }
        }
    }

    #[test]
    fn unfocused_frame_draws_everything_at_full_opacity() {
        let fixture = Fixture::chain();
        let mut recorder = Recorder::default();
        render_frame(&mut recorder, &fixture.scene(None));

        assert_eq!(recorder.ops.first(), Some(&DrawOp::Clear));
        assert!(recorder.nodes().iter().all(|style| style.opacity == 1.0 && style.radius == NODE_RADIUS));
        assert!(recorder.edges().iter().all(|style| style.opacity == EDGE_OPACITY));
        assert_eq!(recorder.labels().len(), 3);
    }

    #[test]
    fn hovering_end_of_chain_dims_unconnected_node() {
        let fixture = Fixture::chain();
        let mut recorder = Recorder::default();
        render_frame(&mut recorder, &fixture.scene(Some(0)));

        let nodes = recorder.nodes();
        assert_eq!(nodes[0], NodeStyle { radius: FOCUS_RADIUS, opacity: 1.0 });
        assert_eq!(nodes[1], NodeStyle { radius: NODE_RADIUS, opacity: 1.0 });
        assert_eq!(nodes[2], NodeStyle { radius: NODE_RADIUS, opacity: DIM_OPACITY });

        let edges = recorder.edges();
        assert_eq!(edges[0].opacity, FOCUS_EDGE_OPACITY);
        assert_eq!(edges[1].opacity, FADED_EDGE_OPACITY);

        let labels = recorder.labels();
        assert_eq!(labels[2], ("C".to_owned(), DIM_OPACITY));
        assert!(!fixture.adjacency.is_connected(0, 2));
    }

    #[test]
    fn hidden_labels_are_not_drawn() {
        let mut fixture = Fixture::chain();
        fixture.nodes[1].pos = vec2(40.0, 5.0);
        fixture.declutter.update(&fixture.nodes);

        let mut recorder = Recorder::default();
        render_frame(&mut recorder, &fixture.scene(None));
        let labels = recorder
            .labels()
            .into_iter()
            .map(|(text, _)| text)
            .collect::<Vec<_>>();
        assert_eq!(labels, ["B", "C"]);
    }

    #[test]
    fn redraw_resets_previous_frame() {
        let fixture = Fixture::chain();
        let mut recorder = Recorder::default();
        render_frame(&mut recorder, &fixture.scene(None));
        let first = recorder.ops.len();
        render_frame(&mut recorder, &fixture.scene(Some(1)));

        assert_eq!(recorder.ops.len(), first);
        assert_eq!(recorder.ops[1], DrawOp::Transform(ViewTransform::IDENTITY));
    }
}
