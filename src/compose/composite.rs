use image::RgbaImage;
use resvg::tiny_skia;

use crate::{
    foundation::{
        error::{ComposeError, ComposeResult},
        math::{demultiply_rgba8_in_place, premultiply_rgba8_in_place},
    },
    paint::{fonts::FontLibrary, layer::VectorLayer},
};

/// Draw `layers` over `base` in order (source-over, premultiplied).
pub fn composite_layers(
    base: RgbaImage,
    layers: &[VectorLayer],
    fonts: &FontLibrary,
) -> ComposeResult<RgbaImage> {
    let (w, h) = base.dimensions();
    let size = tiny_skia::IntSize::from_wh(w, h)
        .ok_or_else(|| ComposeError::render(format!("invalid canvas size {w}x{h}")))?;

    let mut data = base.into_raw();
    premultiply_rgba8_in_place(&mut data);
    let mut canvas = tiny_skia::Pixmap::from_vec(data, size)
        .ok_or_else(|| ComposeError::render("base pixel buffer does not match canvas size"))?;

    let paint = tiny_skia::PixmapPaint::default();
    for layer in layers {
        let pixmap = layer.rasterize(fonts)?;
        canvas.draw_pixmap(
            layer.left,
            layer.top,
            pixmap.as_ref(),
            &paint,
            tiny_skia::Transform::identity(),
            None,
        );
    }

    let mut data = canvas.take();
    demultiply_rgba8_in_place(&mut data);
    RgbaImage::from_raw(w, h, data)
        .ok_or_else(|| ComposeError::render("composited buffer has the wrong length"))
}

#[cfg(test)]
#[path = "../../tests/unit/compose/composite.rs"]
mod tests;
