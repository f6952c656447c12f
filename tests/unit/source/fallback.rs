use super::*;
use crate::layout::model::CopyText;
use image::Rgba;

fn copy(subhead: bool, cta: bool) -> CopyText {
    CopyText {
        headline: "Summer Sale".to_owned(),
        subhead: subhead.then(|| "Fresh styles".to_owned()),
        cta: cta.then(|| "Shop Now".to_owned()),
        ..CopyText::default()
    }
}

#[test]
fn dominant_color_reports_the_bin_centre() {
    let mut img = RgbaImage::from_pixel(10, 10, Rgba([250, 10, 130, 255]));
    for x in 0..3 {
        img.put_pixel(x, 0, Rgba([0, 0, 0, 255]));
    }
    // 250 -> bin 15 -> 248, 10 -> bin 0 -> 8, 130 -> bin 8 -> 136
    assert_eq!(dominant_color(&img), Some(Rgb8::new(248, 8, 136)));
}

#[test]
fn transparent_pixels_do_not_vote() {
    let mut img = RgbaImage::from_pixel(4, 4, Rgba([255, 255, 255, 0]));
    img.put_pixel(0, 0, Rgba([0, 0, 0, 255]));
    assert_eq!(dominant_color(&img), Some(Rgb8::new(8, 8, 8)));
    assert_eq!(dominant_color(&RgbaImage::new(3, 3)), None);
}

#[test]
fn full_copy_yields_three_boxes_scaled_from_width() {
    let img = RgbaImage::from_pixel(2000, 10, Rgba([0, 64, 255, 255]));
    let c = copy(true, true);
    let p = FallbackLayout.layout(&LayoutRequest {
        image: &img,
        copy: &c,
    });
    let ids: Vec<BoxId> = p.boxes.iter().map(|b| b.id).collect();
    assert_eq!(ids, vec![BoxId::Headline, BoxId::Subhead, BoxId::Cta]);
    assert_eq!(p.boxes[0].font_size, Some(76.0));
    assert_eq!(p.boxes[1].font_size, Some(44.0));
    assert_eq!(p.boxes[2].font_size, Some(40.0));
    assert_eq!(p.boxes[2].style.bg, Some(Rgb8::new(8, 72, 248)));
    assert_eq!(p.palette.primary, Rgb8::new(8, 72, 248));
    assert_eq!(p.mask, ProductMask::default());
}

#[test]
fn small_images_use_font_floors_and_optional_boxes_are_skipped() {
    let img = RgbaImage::from_pixel(100, 100, Rgba([240, 240, 240, 255]));
    let c = copy(false, false);
    let p = FallbackLayout.layout(&LayoutRequest {
        image: &img,
        copy: &c,
    });
    assert_eq!(p.boxes.len(), 1);
    assert_eq!(p.boxes[0].font_size, Some(32.0));
}

#[test]
fn fallback_is_deterministic() {
    let img = RgbaImage::from_fn(37, 23, |x, y| Rgba([(x * 7) as u8, (y * 11) as u8, 90, 255]));
    let c = copy(true, true);
    let req = LayoutRequest {
        image: &img,
        copy: &c,
    };
    assert_eq!(FallbackLayout.layout(&req), FallbackLayout.layout(&req));
}
