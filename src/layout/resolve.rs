use crate::{
    foundation::core::{CanvasTarget, PixelRect},
    layout::{
        collision::resolve_collisions,
        geometry::{gap_px, mask_rect, normalize_box},
        mask::{avoid_mask, clip_to_mask},
        model::{BoxId, LayoutBox, LayoutProposal},
        settings::LayoutSettings,
        settle::{find_violations, settle_greedy},
    },
};

/// A symbolic box instantiated in pixels for one canvas size.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct ResolvedBox {
    pub id: BoxId,
    /// Position in the proposal's box list.
    pub index: usize,
    /// Per-size clone of the symbolic box.
    pub source: LayoutBox,
    /// Rectangle straight out of normalization, before any relocation.
    pub desired: PixelRect,
    /// Final rectangle.
    pub rect: PixelRect,
}

/// Geometry for every box of a proposal on one canvas.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct ResolvedLayout {
    pub canvas: CanvasTarget,
    pub mask: Option<PixelRect>,
    pub gap: i32,
    pub boxes: Vec<ResolvedBox>,
    /// `true` when the single-pass resolvers left overlaps and greedy placement ran.
    pub settled_greedily: bool,
}

impl ResolvedLayout {
    pub fn get(&self, id: BoxId) -> Option<&ResolvedBox> {
        self.boxes.iter().find(|b| b.id == id)
    }
}

/// Normalize, clear the mask, then separate text boxes for one canvas size.
///
/// Text boxes are moved off the mask band; bands keep their place and are clipped to the part
/// outside the mask. The proposal is never mutated; each call works on per-size clones.
#[tracing::instrument(skip(proposal, canvas, settings), fields(canvas = %canvas.name))]
pub fn resolve_layout_geometry(
    proposal: &LayoutProposal,
    canvas: &CanvasTarget,
    settings: &LayoutSettings,
) -> ResolvedLayout {
    let gap = gap_px(canvas, settings.gap_pct);
    let mask = mask_rect(&proposal.mask, canvas);

    let mut boxes: Vec<ResolvedBox> = proposal
        .boxes
        .iter()
        .enumerate()
        .map(|(index, b)| {
            let desired = normalize_box(b, canvas);
            ResolvedBox {
                id: b.id,
                index,
                source: b.clone(),
                desired,
                rect: desired,
            }
        })
        .collect();

    if let Some(m) = mask {
        for b in &mut boxes {
            b.rect = if b.id.carries_text() {
                avoid_mask(b.rect, m, canvas, gap)
            } else {
                clip_to_mask(b.rect, m)
            };
        }
    }
    resolve_collisions(&mut boxes, canvas, gap);

    let mut settled_greedily = false;
    let violations = find_violations(&boxes, mask);
    if !violations.is_empty() {
        tracing::debug!(
            count = violations.len(),
            "single-pass resolution left overlaps, settling greedily"
        );
        settle_greedy(&mut boxes, mask, canvas, gap);
        settled_greedily = true;
    }

    ResolvedLayout {
        canvas: canvas.clone(),
        mask,
        gap,
        boxes,
        settled_greedily,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/resolve.rs"]
mod tests;
