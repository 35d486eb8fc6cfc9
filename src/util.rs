use std::borrow::Cow;
use std::f32::consts::{PI, TAU};

use eframe::egui::{Vec2, vec2};

const LABEL_CHAR_BUDGET: usize = 14;
const LABEL_KEPT_CHARS: usize = 12;

/// Shortens long titles to a fixed character budget, ending in "...".
pub fn truncate_label(title: &str) -> Cow<'_, str> {
    if title.chars().count() <= LABEL_CHAR_BUDGET {
        return Cow::Borrowed(title);
    }

    let mut label = title.chars().take(LABEL_KEPT_CHARS).collect::<String>();
    label.push_str("...");
    Cow::Owned(label)
}

/// Offset of the `index`-th node on a phyllotaxis spiral.
pub fn phyllotaxis_offset(index: usize) -> Vec2 {
    const INITIAL_RADIUS: f32 = 10.0;
    let initial_angle = PI * (3.0 - 5.0_f32.sqrt());

    let radius = INITIAL_RADIUS * (0.5 + index as f32).sqrt();
    let angle = index as f32 * initial_angle;
    vec2(angle.cos(), angle.sin()) * radius
}

/// Deterministic unit direction for separating coincident points.
pub fn golden_direction(a: usize, b: usize) -> Vec2 {
    let angle = ((a as f32) * 0.618_034 + (b as f32) * 0.414_214 + 0.37) * TAU;
    vec2(angle.cos(), angle.sin())
}
