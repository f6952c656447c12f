use crate::{
    foundation::core::{CanvasTarget, PixelRect},
    foundation::math::pct_to_px,
    layout::model::{LayoutBox, ProductMask},
};

fn sanitize_pct(v: f64) -> f64 {
    if v.is_finite() { v.clamp(0.0, 100.0) } else { 0.0 }
}

/// Convert a percentage box to an absolute pixel rectangle on `canvas`.
///
/// Malformed input is clamped, never rejected: non-finite values become 0, the origin is kept
/// inside 0..=100 and the extent is trimmed so the box ends at or before 100.
pub fn normalize_rect(x: f64, y: f64, w: f64, h: f64, canvas: &CanvasTarget) -> PixelRect {
    let x = sanitize_pct(x);
    let y = sanitize_pct(y);
    let w = sanitize_pct(w).min(100.0 - x);
    let h = sanitize_pct(h).min(100.0 - y);

    let px = pct_to_px(canvas.width, x);
    let py = pct_to_px(canvas.height, y);
    let pw = pct_to_px(canvas.width, w).min(canvas.width_i32() - px);
    let ph = pct_to_px(canvas.height, h).min(canvas.height_i32() - py);
    PixelRect::new(px, py, pw, ph)
}

pub fn normalize_box(b: &LayoutBox, canvas: &CanvasTarget) -> PixelRect {
    normalize_rect(b.x, b.y, b.w, b.h, canvas)
}

/// Pixel rectangle of the product mask on `canvas`, if the mask covers any area.
pub fn mask_rect(mask: &ProductMask, canvas: &CanvasTarget) -> Option<PixelRect> {
    let (x, y, w, h) = mask.effective_bbox()?;
    let r = normalize_rect(x, y, w, h, canvas);
    (!r.is_empty()).then_some(r)
}

/// Vertical spacing in pixels for `gap_pct` percent of the canvas height (at least 1 px).
pub fn gap_px(canvas: &CanvasTarget, gap_pct: f64) -> i32 {
    pct_to_px(canvas.height, gap_pct.max(0.0)).max(1)
}

#[cfg(test)]
#[path = "../../tests/unit/layout/geometry.rs"]
mod tests;
