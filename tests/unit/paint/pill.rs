use super::*;

fn cta_metrics() -> TextMetrics {
    TextMetrics {
        font_weight: 600,
        letter_spacing: 0.0,
    }
}

#[test]
fn grab_the_deal_fits_a_400px_box() {
    let g = pill_geometry(400.0, 60.0, "Grab the Deal", 22.0, 10.0, Align::Center, &cta_metrics());
    assert!(g.width <= 400.0);
    assert_eq!(g.font_size, 22.0);
    // Preferred width min(280, 0.7 * 400) wins over the padded text width.
    assert_eq!(g.width, 280.0);
    assert_eq!(g.height, 48.0);
    assert_eq!(g.x, 60.0);
    assert_eq!(g.y, 6.0);
}

#[test]
fn long_copy_shrinks_to_the_floor_and_stays_inside() {
    let g = pill_geometry(
        200.0,
        50.0,
        "Limited Time Mega Clearance Event",
        22.0,
        10.0,
        Align::Left,
        &cta_metrics(),
    );
    assert_eq!(g.font_size, 10.0);
    assert!(g.width <= 192.0);
    assert_eq!(g.x, 4.0);
}

#[test]
fn right_alignment_hugs_the_inset() {
    let g = pill_geometry(500.0, 80.0, "Buy", 20.0, 10.0, Align::Right, &cta_metrics());
    assert_eq!(g.x + g.width, 496.0);
}

#[test]
fn width_never_exceeds_box_for_any_size() {
    for w in [1.0, 20.0, 50.0, 120.0, 400.0, 1080.0] {
        for text in ["Go", "Shop Now", "Grab the Deal before it is gone"] {
            let g = pill_geometry(w, 40.0, text, 28.0, 10.0, Align::Center, &cta_metrics());
            assert!(g.width <= w.max(1.0), "w={w} text={text} got {}", g.width);
            assert!(g.font_size <= 28.0);
            assert!(g.height <= 40.0);
        }
    }
}

#[test]
fn font_is_never_raised_above_the_suggestion() {
    let g = pill_geometry(600.0, 80.0, "Shop", 8.0, 10.0, Align::Center, &cta_metrics());
    assert_eq!(g.font_size, 8.0);
    assert_eq!(g.radius(), g.height / 2.0);
}
