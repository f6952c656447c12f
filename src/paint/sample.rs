use image::{RgbaImage, imageops};

use crate::foundation::core::{PixelRect, Rgb8};

/// Returned when there is nothing under a box to sample.
pub const DEFAULT_SAMPLE: Rgb8 = Rgb8::BLACK;

/// Side of the grid a sampled region is reduced to before averaging.
pub const SAMPLE_GRID: u32 = 8;

/// Mean colour of `base` under `rect`.
///
/// The rectangle is clamped to the image; geometry that leaves nothing to sample yields
/// [`DEFAULT_SAMPLE`] instead of an error. Alpha is ignored.
pub fn sample_background(base: &RgbaImage, rect: PixelRect) -> Rgb8 {
    let (w, h) = base.dimensions();
    let bounds = PixelRect::new(0, 0, w.min(i32::MAX as u32) as i32, h.min(i32::MAX as u32) as i32);

    let Some(region) = rect.intersection(bounds) else {
        tracing::warn!(
            x = rect.x,
            y = rect.y,
            w = rect.w,
            h = rect.h,
            "sample region outside canvas, using default colour"
        );
        return DEFAULT_SAMPLE;
    };

    let cropped = imageops::crop_imm(
        base,
        region.x as u32,
        region.y as u32,
        region.w as u32,
        region.h as u32,
    )
    .to_image();
    let grid = imageops::resize(
        &cropped,
        SAMPLE_GRID,
        SAMPLE_GRID,
        imageops::FilterType::Triangle,
    );

    let mut sum = [0u64; 3];
    for px in grid.pixels() {
        sum[0] += u64::from(px[0]);
        sum[1] += u64::from(px[1]);
        sum[2] += u64::from(px[2]);
    }
    let n = u64::from(SAMPLE_GRID * SAMPLE_GRID);
    let avg = |s: u64| ((s + n / 2) / n).min(255) as u8;
    Rgb8::new(avg(sum[0]), avg(sum[1]), avg(sum[2]))
}

#[cfg(test)]
#[path = "../../tests/unit/paint/sample.rs"]
mod tests;
