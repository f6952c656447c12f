use super::*;
use crate::layout::model::BoxId;
use image::Rgba;

fn band(left: i32, top: i32, w: u32, h: u32, fill: &str) -> VectorLayer {
    VectorLayer {
        id: BoxId::Band,
        left,
        top,
        width: w,
        height: h,
        svg: format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}"><rect x="0" y="0" width="{w}" height="{h}" fill="{fill}"/></svg>"#
        ),
    }
}

#[test]
fn layers_land_at_their_origin_only() {
    let base = RgbaImage::from_pixel(20, 20, Rgba([255, 255, 255, 255]));
    let out = composite_layers(base, &[band(5, 6, 4, 3, "#FF0000")], &FontLibrary::system())
        .expect("composite");
    assert_eq!(*out.get_pixel(5, 6), Rgba([255, 0, 0, 255]));
    assert_eq!(*out.get_pixel(8, 8), Rgba([255, 0, 0, 255]));
    assert_eq!(*out.get_pixel(9, 8), Rgba([255, 255, 255, 255]));
    assert_eq!(*out.get_pixel(4, 6), Rgba([255, 255, 255, 255]));
}

#[test]
fn later_layers_draw_on_top_and_offcanvas_parts_are_clipped() {
    let base = RgbaImage::from_pixel(10, 10, Rgba([0, 0, 0, 255]));
    let layers = [band(0, 0, 10, 10, "#0000FF"), band(-5, -5, 8, 8, "#00FF00")];
    let out = composite_layers(base, &layers, &FontLibrary::system()).expect("composite");
    assert_eq!(*out.get_pixel(1, 1), Rgba([0, 255, 0, 255]));
    assert_eq!(*out.get_pixel(5, 5), Rgba([0, 0, 255, 255]));
}

#[test]
fn no_layers_returns_the_base_unchanged() {
    let base = RgbaImage::from_fn(7, 5, |x, y| Rgba([x as u8 * 30, y as u8 * 40, 200, 255]));
    let out = composite_layers(base.clone(), &[], &FontLibrary::system()).expect("composite");
    assert_eq!(out, base);
}
