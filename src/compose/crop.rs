//! Cover-fit a photo onto a canvas, choosing which part of the overflow to keep.

use image::{RgbaImage, imageops};

use crate::foundation::error::{ComposeError, ComposeResult};

/// How the overflowing axis of a cover resize is cropped.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CropStrategy {
    /// Keep the window with the most visual detail.
    #[default]
    Attention,
    #[serde(alias = "center")]
    Centre,
    /// Keep the top edge; horizontal overflow is centred.
    Top,
}

/// Longest side of the downscaled copy used to score crop windows.
const PROXY_MAX: u32 = 128;
const SATURATION_WEIGHT: f64 = 0.5;
const SKIN_WEIGHT: f64 = 0.5;

/// Resize `src` so it covers `width` x `height`, then crop the overflow.
pub fn cover_crop(
    src: &RgbaImage,
    width: u32,
    height: u32,
    strategy: CropStrategy,
) -> ComposeResult<RgbaImage> {
    let (sw, sh) = src.dimensions();
    if sw == 0 || sh == 0 {
        return Err(ComposeError::decode("base image has no pixels"));
    }
    if width == 0 || height == 0 {
        return Err(ComposeError::validation("crop target must be non-empty"));
    }

    let scale = (f64::from(width) / f64::from(sw)).max(f64::from(height) / f64::from(sh));
    let rw = ((f64::from(sw) * scale).round() as u32).max(width);
    let rh = ((f64::from(sh) * scale).round() as u32).max(height);

    let resized = if (rw, rh) == (sw, sh) {
        src.clone()
    } else {
        imageops::resize(src, rw, rh, imageops::FilterType::Lanczos3)
    };
    if (rw, rh) == (width, height) {
        return Ok(resized);
    }

    let horizontal = rw > width;
    let (over, window) = if horizontal {
        (rw - width, width)
    } else {
        (rh - height, height)
    };
    let offset = match strategy {
        CropStrategy::Centre => over / 2,
        CropStrategy::Top if !horizontal => 0,
        CropStrategy::Top => over / 2,
        CropStrategy::Attention => attention_offset(&resized, horizontal, window),
    };
    tracing::debug!(?strategy, horizontal, offset, over, "cover crop");

    let (x, y) = if horizontal { (offset, 0) } else { (0, offset) };
    Ok(imageops::crop_imm(&resized, x, y, width, height).to_image())
}

fn luma(px: &image::Rgba<u8>) -> f64 {
    0.299 * f64::from(px[0]) + 0.587 * f64::from(px[1]) + 0.114 * f64::from(px[2])
}

fn looks_like_skin(r: u8, g: u8, b: u8) -> bool {
    let lo = g.min(b);
    r > 95 && g > 40 && b > 20 && r > g && r > b && r - lo > 15
}

/// Per-pixel interest: luma gradient, chroma and a skin-tone bonus, each roughly in 0..=1.
fn saliency_map(img: &RgbaImage) -> Vec<f64> {
    let (w, h) = img.dimensions();
    let y_of = |x: u32, y: u32| luma(img.get_pixel(x, y));
    let mut out = Vec::with_capacity((w * h) as usize);
    for y in 0..h {
        for x in 0..w {
            let gx = y_of((x + 1).min(w - 1), y) - y_of(x.saturating_sub(1), y);
            let gy = y_of(x, (y + 1).min(h - 1)) - y_of(x, y.saturating_sub(1));
            let grad = (gx.abs() + gy.abs()) / 255.0;

            let px = img.get_pixel(x, y);
            let (r, g, b) = (px[0], px[1], px[2]);
            let chroma = f64::from(r.max(g).max(b) - r.min(g).min(b)) / 255.0;
            let skin = if looks_like_skin(r, g, b) { SKIN_WEIGHT } else { 0.0 };

            let alpha = f64::from(px[3]) / 255.0;
            out.push((grad + SATURATION_WEIGHT * chroma + skin) * alpha);
        }
    }
    out
}

/// Offset along the overflow axis of the `window`-pixel span with the most saliency.
///
/// Scoring happens on a proxy no larger than 128 px; ties go to the window nearest the centre.
pub(crate) fn attention_offset(img: &RgbaImage, horizontal: bool, window: u32) -> u32 {
    let (w, h) = img.dimensions();
    let full = if horizontal { w } else { h };
    if window >= full || w == 0 || h == 0 {
        return 0;
    }
    let over = full - window;

    let s = (f64::from(PROXY_MAX) / f64::from(w.max(h))).min(1.0);
    let pw = ((f64::from(w) * s).round() as u32).max(1);
    let ph = ((f64::from(h) * s).round() as u32).max(1);
    let proxy = if (pw, ph) == (w, h) {
        img.clone()
    } else {
        imageops::resize(img, pw, ph, imageops::FilterType::Triangle)
    };
    let map = saliency_map(&proxy);

    let proxy_len = if horizontal { pw } else { ph };
    let mut profile = vec![0.0f64; proxy_len as usize];
    for y in 0..ph {
        for x in 0..pw {
            let v = map[(y * pw + x) as usize];
            let i = if horizontal { x } else { y };
            profile[i as usize] += v;
        }
    }

    let win = ((f64::from(window) * f64::from(proxy_len) / f64::from(full)).round() as usize)
        .clamp(1, proxy_len as usize);
    let mut prefix = vec![0.0f64; profile.len() + 1];
    for (i, v) in profile.iter().enumerate() {
        prefix[i + 1] = prefix[i] + v;
    }

    let last = profile.len() - win;
    let centre = last as f64 / 2.0;
    let mut best = (f64::NEG_INFINITY, f64::INFINITY, 0usize);
    for start in 0..=last {
        let score = prefix[start + win] - prefix[start];
        let dist = (start as f64 - centre).abs();
        if score > best.0 || (score == best.0 && dist < best.1) {
            best = (score, dist, start);
        }
    }

    let offset = (best.2 as f64 * f64::from(full) / f64::from(proxy_len)).round() as u32;
    offset.min(over)
}

#[cfg(test)]
#[path = "../../tests/unit/compose/crop.rs"]
mod tests;
