use crate::{foundation::core::CanvasTarget, layout::resolve::ResolvedBox};

/// Indices of text-carrying boxes, sorted by priority (stable on original order).
pub(crate) fn priority_order(boxes: &[ResolvedBox]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..boxes.len())
        .filter(|&i| boxes[i].id.carries_text())
        .collect();
    order.sort_by_key(|&i| (boxes[i].id.priority(), boxes[i].index));
    order
}

/// Separate overlapping text boxes in one pass over all pairs in priority order.
///
/// For an overlapping pair `(a, b)` with `a` of higher priority: when `a` sits in the upper half
/// (its bottom edge at or above the middle) `b` is pushed down below `a`, otherwise `a` is lifted
/// above `b`. Displacement is at least `gap` and results are clamped inside the canvas. The pass
/// is not iterated, so a later move can re-introduce an overlap with an already processed pair;
/// see [`crate::layout::settle`].
pub fn resolve_collisions(boxes: &mut [ResolvedBox], canvas: &CanvasTarget, gap: i32) {
    let order = priority_order(boxes);
    let h = canvas.height_i32();

    for (pos, &ia) in order.iter().enumerate() {
        for &ib in &order[pos + 1..] {
            let a = boxes[ia].rect;
            let b = boxes[ib].rect;
            if !a.intersects(b) {
                continue;
            }

            let delta = (a.bottom() + gap - b.y).max(gap);
            if 2 * a.bottom() <= h {
                let y = (b.y + delta).min(h - b.h).max(0);
                boxes[ib].rect = b.with_y(y);
            } else {
                let y = (a.y - delta).max(0);
                boxes[ia].rect = a.with_y(y);
            }
            tracing::debug!(
                higher = boxes[ia].id.as_str(),
                lower = boxes[ib].id.as_str(),
                delta,
                "separated overlapping boxes"
            );
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/collision.rs"]
mod tests;
