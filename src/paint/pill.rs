use crate::{
    foundation::math::round_half_up,
    layout::model::Align,
    paint::text_fit::TextMetrics,
};

pub const PILL_PAD_X: f64 = 20.0;
pub const PILL_PAD_Y: f64 = 10.0;
/// Inset kept between the capsule and the box edges.
pub const PILL_INSET: f64 = 4.0;
const PILL_MAX_PREFERRED_W: f64 = 280.0;
const PILL_MAX_PREFERRED_H: f64 = 64.0;

/// Capsule placement inside a box, in box-local pixels.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct PillGeometry {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub font_size: f64,
    pub text_width: f64,
}

impl PillGeometry {
    pub fn radius(&self) -> f64 {
        self.height / 2.0
    }
}

/// Size a capsule for `text` inside a `box_w` x `box_h` box.
///
/// The font shrinks one pixel at a time (never below `min_size`, never above `start_size`) while
/// the padded text is wider than the box allows. The capsule never exceeds the box width.
pub fn pill_geometry(
    box_w: f64,
    box_h: f64,
    text: &str,
    start_size: f64,
    min_size: f64,
    align: Align,
    metrics: &TextMetrics,
) -> PillGeometry {
    let box_w = box_w.max(0.0);
    let box_h = box_h.max(0.0);
    let avail_w = (box_w - 2.0 * PILL_INSET).max(1.0).min(box_w.max(1.0));
    let avail_h = (box_h - 2.0 * PILL_INSET).max(1.0).min(box_h.max(1.0));

    let start = if start_size.is_finite() && start_size > 0.0 {
        start_size
    } else {
        min_size.max(1.0)
    };
    let floor = min_size.max(1.0).min(start);

    let mut font_size = start;
    let mut text_width = metrics.width(text, font_size);
    while text_width + 2.0 * PILL_PAD_X > avail_w && font_size - 1.0 >= floor {
        font_size -= 1.0;
        text_width = metrics.width(text, font_size);
    }

    let preferred_w = PILL_MAX_PREFERRED_W.min(round_half_up(box_w * 0.7));
    let width = (text_width + 2.0 * PILL_PAD_X).max(preferred_w).min(avail_w);
    let preferred_h = PILL_MAX_PREFERRED_H.min(round_half_up(box_h * 0.8));
    let height = (font_size + 2.0 * PILL_PAD_Y).max(preferred_h).min(avail_h);

    let x = match align {
        Align::Left => PILL_INSET.min(box_w - width).max(0.0),
        Align::Center => ((box_w - width) / 2.0).max(0.0),
        Align::Right => (box_w - width - PILL_INSET).max(0.0),
    };
    let y = ((box_h - height) / 2.0).max(0.0);

    PillGeometry {
        x,
        y,
        width,
        height,
        font_size,
        text_width,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/paint/pill.rs"]
mod tests;
