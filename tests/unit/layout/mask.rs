use super::*;
use crate::layout::geometry::{gap_px, normalize_rect};

fn square() -> CanvasTarget {
    CanvasTarget::new("square", 1080, 1080).unwrap()
}

fn mask(canvas: &CanvasTarget) -> PixelRect {
    normalize_rect(20.0, 28.0, 60.0, 44.0, canvas)
}

#[test]
fn headline_clear_of_mask_is_unchanged() {
    let canvas = square();
    let headline = normalize_rect(6.0, 6.0, 88.0, 16.0, &canvas);
    let gap = gap_px(&canvas, 2.0);
    assert_eq!(avoid_mask(headline, mask(&canvas), &canvas, gap), headline);
}

#[test]
fn upper_half_box_moves_above_mask() {
    let canvas = square();
    let m = mask(&canvas);
    let headline = normalize_rect(6.0, 40.0, 88.0, 20.0, &canvas);
    let gap = gap_px(&canvas, 2.0);

    let moved = avoid_mask(headline, m, &canvas, gap);
    assert_eq!(moved.y, (m.y - headline.h - gap).max(0));
    assert_eq!(moved.x, headline.x);
    assert_eq!((moved.w, moved.h), (headline.w, headline.h));
    assert!(!moved.intersects(m));
}

#[test]
fn lower_half_box_moves_below_mask() {
    let canvas = square();
    let m = mask(&canvas);
    let gap = gap_px(&canvas, 2.0);
    let cta = normalize_rect(6.0, 60.0, 44.0, 10.0, &canvas);

    let moved = avoid_mask(cta, m, &canvas, gap);
    assert_eq!(moved.y, m.bottom() + gap);
    assert!(moved.bottom() <= 1080);
    assert!(!moved.intersects(m));
}

#[test]
fn falls_back_to_other_side_when_preferred_side_is_too_small() {
    let canvas = square();
    let gap = gap_px(&canvas, 2.0);
    // Mask hugs the top edge: nothing fits above it.
    let m = normalize_rect(10.0, 2.0, 80.0, 40.0, &canvas);
    let b = normalize_rect(6.0, 10.0, 88.0, 16.0, &canvas);

    let moved = avoid_mask(b, m, &canvas, gap);
    assert_eq!(moved.y, m.bottom() + gap);
    assert!(!moved.overlaps_vertically(m));
}

#[test]
fn bottom_is_clamped_to_canvas() {
    let canvas = square();
    let gap = gap_px(&canvas, 2.0);
    let m = normalize_rect(0.0, 50.0, 100.0, 45.0, &canvas);
    let b = normalize_rect(0.0, 70.0, 50.0, 10.0, &canvas);

    let moved = avoid_mask(b, m, &canvas, gap);
    assert!(moved.bottom() <= 1080);
    assert!(moved.y >= 0);
}

#[test]
fn clip_keeps_fill_clear_of_mask_untouched() {
    let m = PixelRect::new(40, 40, 20, 20);
    let band = PixelRect::new(0, 0, 20, 100);
    assert_eq!(clip_to_mask(band, m), band);
}

#[test]
fn clip_picks_the_largest_remaining_piece() {
    let m = PixelRect::new(40, 40, 20, 20);
    // Left strip 30x100 beats the 40x40 piece above and below.
    assert_eq!(
        clip_to_mask(PixelRect::new(10, 0, 40, 100), m),
        PixelRect::new(10, 0, 30, 100)
    );
    // Wide bar: the piece under the mask is the biggest.
    assert_eq!(
        clip_to_mask(PixelRect::new(0, 30, 100, 60), m),
        PixelRect::new(0, 60, 100, 30)
    );
}

#[test]
fn clip_empties_a_fill_inside_the_mask() {
    let m = PixelRect::new(40, 40, 20, 20);
    let clipped = clip_to_mask(PixelRect::new(45, 45, 10, 10), m);
    assert!(clipped.is_empty());
    assert!(!clipped.intersects(m));
}
