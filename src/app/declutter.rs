use super::physics::SimNode;

/// Width of the band to the right of a node that its label occupies.
pub(super) const LABEL_BAND_WIDTH: f32 = 100.0;
/// How far above or below a node another node may sit and still collide with its label.
pub(super) const LABEL_VERTICAL_TOLERANCE: f32 = 16.0;

/// Per-frame label visibility. A node's label is hidden when any other node
/// sits inside the band its label would cover. Only the left node of a close
/// pair loses its label, and the scan stops at the first hit.
#[derive(Default)]
pub(super) struct LabelDeclutterer {
    hidden: Vec<bool>,
}

impl LabelDeclutterer {
    pub(super) fn update(&mut self, nodes: &[SimNode]) {
        self.hidden.clear();
        self.hidden.extend(nodes.iter().enumerate().map(|(index, node)| {
            nodes.iter().enumerate().any(|(other_index, other)| {
                if other_index == index {
                    return false;
                }
                let delta = other.pos - node.pos;
                delta.x > 0.0 && delta.x < LABEL_BAND_WIDTH && delta.y.abs() < LABEL_VERTICAL_TOLERANCE
            })
        }));
    }

    pub(super) fn is_hidden(&self, index: usize) -> bool {
        self.hidden.get(index).copied().unwrap_or(false)
    }

    pub(super) fn reset(&mut self) {
        self.hidden.clear();
    }
}
