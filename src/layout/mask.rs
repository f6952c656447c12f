use crate::foundation::core::{CanvasTarget, PixelRect};

/// Push `rect` vertically out of the product mask's band.
///
/// Only the vertical interval is considered; the horizontal position is untouched. Boxes whose
/// top lies in the upper half of the canvas go above the mask, the rest go below. When the
/// preferred side cannot hold the box clear of the mask but the other side can, the other side
/// is used.
pub fn avoid_mask(rect: PixelRect, mask: PixelRect, canvas: &CanvasTarget, gap: i32) -> PixelRect {
    if rect.is_empty() || mask.is_empty() || !rect.overlaps_vertically(mask) {
        return rect;
    }

    let max_y = (canvas.height_i32() - rect.h).max(0);
    let above = rect.with_y((mask.y - rect.h - gap).clamp(0, max_y));
    let below = rect.with_y((mask.bottom() + gap).clamp(0, max_y));
    let above_clear = !above.overlaps_vertically(mask);
    let below_clear = !below.overlaps_vertically(mask);

    let prefer_above = 2 * rect.y < canvas.height_i32();
    let moved = if prefer_above {
        if above_clear || !below_clear { above } else { below }
    } else if below_clear || !above_clear {
        below
    } else {
        above
    };

    tracing::debug!(
        from_y = rect.y,
        to_y = moved.y,
        mask_top = mask.y,
        mask_bottom = mask.bottom(),
        "moved box out of product mask"
    );
    moved
}

/// Largest piece of `rect` left after cutting the product mask out of it.
///
/// Used for decorative fills, which keep their place and shrink instead of moving. Returns an
/// empty rectangle at the original origin when the mask swallows the whole box.
pub fn clip_to_mask(rect: PixelRect, mask: PixelRect) -> PixelRect {
    if !rect.intersects(mask) {
        return rect;
    }

    let pieces = [
        PixelRect::new(rect.x, rect.y, mask.x - rect.x, rect.h),
        PixelRect::new(mask.right(), rect.y, rect.right() - mask.right(), rect.h),
        PixelRect::new(rect.x, rect.y, rect.w, mask.y - rect.y),
        PixelRect::new(rect.x, mask.bottom(), rect.w, rect.bottom() - mask.bottom()),
    ];
    let clipped = pieces
        .into_iter()
        .filter(|p| !p.is_empty())
        .fold(PixelRect::new(rect.x, rect.y, 0, 0), |best, p| {
            let area = |r: PixelRect| i64::from(r.w) * i64::from(r.h);
            if area(p) > area(best) { p } else { best }
        });

    tracing::debug!(
        from_w = rect.w,
        from_h = rect.h,
        to_w = clipped.w,
        to_h = clipped.h,
        "clipped fill against product mask"
    );
    clipped
}

#[cfg(test)]
#[path = "../../tests/unit/layout/mask.rs"]
mod tests;
