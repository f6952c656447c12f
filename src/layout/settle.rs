//! Post-pass validation and priority-ordered greedy placement.
//!
//! The single-pass resolvers have no fixed-point guarantee: a box pushed off one obstacle can
//! land on another. When that happens every text box is placed again in priority order, each
//! taking the clear vertical position nearest to where the layout wanted it.

use crate::{
    foundation::core::{CanvasTarget, PixelRect},
    layout::{collision::priority_order, resolve::ResolvedBox},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Violation {
    /// Box at this index shares vertical space with the product mask.
    Mask(usize),
    /// Two text boxes intersect.
    Overlap(usize, usize),
}

pub fn find_violations(boxes: &[ResolvedBox], mask: Option<PixelRect>) -> Vec<Violation> {
    let text: Vec<usize> = (0..boxes.len())
        .filter(|&i| boxes[i].id.carries_text() && !boxes[i].rect.is_empty())
        .collect();

    let mut out = Vec::new();
    if let Some(m) = mask {
        out.extend(
            text.iter()
                .copied()
                .filter(|&i| boxes[i].rect.overlaps_vertically(m))
                .map(Violation::Mask),
        );
    }
    for (pos, &i) in text.iter().enumerate() {
        for &j in &text[pos + 1..] {
            if boxes[i].rect.intersects(boxes[j].rect) {
                out.push(Violation::Overlap(i, j));
            }
        }
    }
    out
}

fn is_clear(rect: PixelRect, mask: Option<PixelRect>, placed: &[PixelRect]) -> bool {
    if mask.is_some_and(|m| rect.overlaps_vertically(m)) {
        return false;
    }
    placed.iter().all(|p| !rect.intersects(*p))
}

pub fn settle_greedy(
    boxes: &mut [ResolvedBox],
    mask: Option<PixelRect>,
    canvas: &CanvasTarget,
    gap: i32,
) {
    let mut placed = Vec::<PixelRect>::new();

    for i in priority_order(boxes) {
        let current = boxes[i].rect;
        if current.is_empty() {
            continue;
        }
        if is_clear(current, mask, &placed) {
            placed.push(current);
            continue;
        }

        let max_y = (canvas.height_i32() - current.h).max(0);
        let desired_y = boxes[i].desired.y;
        let mut candidates = vec![desired_y];
        for o in mask.iter().chain(placed.iter()) {
            candidates.push(o.y - current.h - gap);
            candidates.push(o.bottom() + gap);
            candidates.push(o.y - current.h);
            candidates.push(o.bottom());
        }

        let best = candidates
            .into_iter()
            .map(|y| y.clamp(0, max_y))
            .filter(|&y| is_clear(current.with_y(y), mask, &placed))
            .min_by_key(|&y| ((y - desired_y).abs(), y));

        match best {
            Some(y) => {
                tracing::debug!(
                    id = boxes[i].id.as_str(),
                    from_y = current.y,
                    to_y = y,
                    "greedy placement"
                );
                boxes[i].rect = current.with_y(y);
            }
            None => {
                tracing::warn!(
                    id = boxes[i].id.as_str(),
                    canvas = %canvas.name,
                    "no clear position for box; keeping single-pass placement"
                );
            }
        }
        placed.push(boxes[i].rect);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/settle.rs"]
mod tests;
