use super::*;
use crate::{
    foundation::core::{PixelRect, Rgb8},
    paint::{finish::DEFAULT_FONT_FAMILY, text_fit::FittedText},
};

fn style(color: Rgb8, fill: Option<Rgb8>) -> FinishedStyle {
    FinishedStyle {
        font_family: DEFAULT_FONT_FAMILY.to_owned(),
        font_weight: 800,
        letter_spacing: 0.0,
        color,
        fill,
        stroke: None,
    }
}

fn text_box(lines: &[&str], align: Align, rotate: f64) -> FinishedBox {
    FinishedBox {
        id: BoxId::Headline,
        rect: PixelRect::new(10, 20, 300, 100),
        align,
        rotate,
        sampled: Rgb8::WHITE,
        style: style(Rgb8::NEAR_BLACK, None),
        body: BoxBody::Text(FittedText {
            lines: lines.iter().map(|s| (*s).to_owned()).collect(),
            font_size: 30.0,
            overflowed: false,
        }),
    }
}

#[test]
fn escapes_markup_specials() {
    assert_eq!(
        escape_markup(r#"Tom & Jerry's <"best">"#),
        "Tom &amp; Jerry&apos;s &lt;&quot;best&quot;&gt;"
    );
    assert_eq!(escape_markup("plain"), "plain");
}

#[test]
fn body_layer_is_positioned_and_sized_to_the_box() {
    let layer = build_layer(&text_box(&["Big <Sale>", "Today"], Align::Left, 0.0), 16.0)
        .expect("layer");
    assert_eq!((layer.left, layer.top, layer.width, layer.height), (10, 20, 300, 100));
    assert!(layer.svg.contains(r#"text-anchor="start""#));
    assert!(layer.svg.contains("Big &lt;Sale&gt;"));
    assert!(!layer.svg.contains("<Sale>"));
    assert_eq!(layer.svg.matches("<tspan").count(), 2);
    // line height 36, block start max(36, (100 - 36 * 1.8) / 2) = 36
    assert!(layer.svg.contains(r#"<tspan x="16" y="36">"#));
    assert!(layer.svg.contains(r#"<tspan x="16" y="72">"#));
    assert!(layer.svg.contains("#0B0B0B"));
}

#[test]
fn alignment_moves_the_anchor() {
    let c = build_layer(&text_box(&["x"], Align::Center, 0.0), 16.0).expect("layer");
    assert!(c.svg.contains(r#"text-anchor="middle""#));
    assert!(c.svg.contains(r#"x="150""#));
    let r = build_layer(&text_box(&["x"], Align::Right, 0.0), 16.0).expect("layer");
    assert!(r.svg.contains(r#"text-anchor="end""#));
    assert!(r.svg.contains(r#"x="284""#));
}

#[test]
fn rotation_wraps_content_around_the_centre() {
    let layer = build_layer(&text_box(&["Tilt"], Align::Left, -8.0), 16.0).expect("layer");
    assert!(layer.svg.contains(r#"<g transform="rotate(-8 150 50)">"#));
}

#[test]
fn stroke_is_painted_under_the_fill() {
    let mut fin = text_box(&["Outline"], Align::Left, 0.0);
    fin.style.stroke = Some(crate::layout::model::Stroke {
        color: Rgb8::WHITE,
        width: 2.0,
    });
    let layer = build_layer(&fin, 16.0).expect("layer");
    assert!(layer.svg.contains(r##"stroke="#FFFFFF" stroke-width="2" paint-order="stroke""##));
}

#[test]
fn empty_text_or_rect_produces_no_layer() {
    assert!(build_layer(&text_box(&[], Align::Left, 0.0), 16.0).is_none());
    let mut fin = text_box(&["x"], Align::Left, 0.0);
    fin.rect = PixelRect::new(0, 0, 0, 10);
    assert!(build_layer(&fin, 16.0).is_none());
}

#[test]
fn band_layer_rasterizes_to_its_fill() {
    let fill = Rgb8::new(0x11, 0x22, 0x33);
    let fin = FinishedBox {
        id: BoxId::Band,
        rect: PixelRect::new(0, 0, 8, 6),
        align: Align::Left,
        rotate: 0.0,
        sampled: Rgb8::WHITE,
        style: style(Rgb8::WHITE, Some(fill)),
        body: BoxBody::Band,
    };
    let layer = build_layer(&fin, 16.0).expect("layer");
    let pixmap = layer.rasterize(&FontLibrary::system()).expect("raster");
    assert_eq!((pixmap.width(), pixmap.height()), (8, 6));
    let px = pixmap.pixel(4, 3).expect("pixel");
    assert_eq!((px.red(), px.green(), px.blue(), px.alpha()), (0x11, 0x22, 0x33, 255));
}

#[test]
fn malformed_markup_is_a_render_error() {
    let layer = VectorLayer {
        id: BoxId::Headline,
        left: 0,
        top: 0,
        width: 4,
        height: 4,
        svg: "<svg".to_owned(),
    };
    let err = layer.rasterize(&FontLibrary::system()).err().expect("error");
    assert!(matches!(err, ComposeError::Render(_)));
}
