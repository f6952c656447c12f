use super::*;
use crate::foundation::core::PixelRect;
use crate::layout::model::{BoxId, LayoutBox, TextStyle};

fn rb(id: BoxId, index: usize, rect: PixelRect) -> ResolvedBox {
    ResolvedBox {
        id,
        index,
        source: LayoutBox {
            id,
            x: 0.0,
            y: 0.0,
            w: 0.0,
            h: 0.0,
            align: None,
            font_size: None,
            style: TextStyle::default(),
            rotate: 0.0,
        },
        desired: rect,
        rect,
    }
}

fn square() -> CanvasTarget {
    CanvasTarget::new("square", 1080, 1080).unwrap()
}

#[test]
fn upper_half_pushes_lower_priority_down() {
    let mut boxes = vec![
        rb(BoxId::Subhead, 0, PixelRect::new(65, 200, 950, 108)),
        rb(BoxId::Headline, 1, PixelRect::new(65, 65, 950, 173)),
    ];
    resolve_collisions(&mut boxes, &square(), 22);

    assert_eq!(boxes[1].rect.y, 65);
    assert_eq!(boxes[0].rect.y, 260);
    assert!(!boxes[0].rect.intersects(boxes[1].rect));
}

#[test]
fn lower_half_lifts_higher_priority_box() {
    let mut boxes = vec![
        rb(BoxId::Headline, 0, PixelRect::new(65, 700, 950, 173)),
        rb(BoxId::Cta, 1, PixelRect::new(65, 800, 475, 108)),
    ];
    resolve_collisions(&mut boxes, &square(), 22);

    assert_eq!(boxes[1].rect.y, 800);
    assert_eq!(boxes[0].rect.y, 605);
    assert!(!boxes[0].rect.intersects(boxes[1].rect));
}

#[test]
fn displacement_is_clamped_inside_canvas() {
    let mut boxes = vec![
        rb(BoxId::Headline, 0, PixelRect::new(0, 300, 500, 200)),
        rb(BoxId::Price, 1, PixelRect::new(0, 400, 500, 1000)),
    ];
    resolve_collisions(&mut boxes, &square(), 22);
    assert!(boxes[1].rect.y >= 0);
    assert!(boxes[0].rect.y >= 0);
}

#[test]
fn band_is_ignored_and_disjoint_boxes_are_untouched() {
    let mut boxes = vec![
        rb(BoxId::Band, 0, PixelRect::new(0, 0, 200, 1080)),
        rb(BoxId::Headline, 1, PixelRect::new(65, 65, 950, 173)),
        rb(BoxId::Cta, 2, PixelRect::new(65, 886, 475, 108)),
    ];
    let before = boxes.clone();
    resolve_collisions(&mut boxes, &square(), 22);
    assert_eq!(boxes, before);
}

#[test]
fn ties_keep_original_order() {
    let boxes = vec![
        rb(BoxId::Price, 0, PixelRect::new(0, 0, 1, 1)),
        rb(BoxId::Cta, 1, PixelRect::new(0, 0, 1, 1)),
        rb(BoxId::Subhead, 2, PixelRect::new(0, 0, 1, 1)),
        rb(BoxId::Band, 3, PixelRect::new(0, 0, 1, 1)),
    ];
    assert_eq!(priority_order(&boxes), vec![2, 0, 1]);
}
