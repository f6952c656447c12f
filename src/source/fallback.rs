use image::RgbaImage;

use crate::{
    foundation::{core::Rgb8, error::ComposeResult, math::round_half_up},
    layout::model::{
        Align, BoxId, LayoutBox, LayoutProposal, Palette, ProductMask, Suggestions, TextStyle,
    },
    source::{LayoutRequest, LayoutSource},
};

pub const FALLBACK_NOTE: &str = "local fallback layout used";

/// Pixels with alpha below this are ignored when looking for the dominant colour.
const MIN_ALPHA: u8 = 128;
/// Levels per channel in the dominant-colour histogram.
const LEVELS: usize = 16;
const LEVEL_SHIFT: u32 = 4;

/// Most common colour after quantizing each channel to 16 levels, reported as the bin centre.
///
/// Ties resolve to the lowest bin. `None` when no pixel is opaque enough to count.
pub fn dominant_color(image: &RgbaImage) -> Option<Rgb8> {
    let mut bins = vec![0u32; LEVELS * LEVELS * LEVELS];
    for px in image.pixels() {
        if px[3] < MIN_ALPHA {
            continue;
        }
        let r = usize::from(px[0] >> LEVEL_SHIFT);
        let g = usize::from(px[1] >> LEVEL_SHIFT);
        let b = usize::from(px[2] >> LEVEL_SHIFT);
        bins[(r * LEVELS + g) * LEVELS + b] += 1;
    }

    let (best, count) = bins
        .iter()
        .enumerate()
        .fold((0usize, 0u32), |acc, (i, &c)| if c > acc.1 { (i, c) } else { acc });
    if count == 0 {
        return None;
    }

    let centre = |level: usize| ((level << LEVEL_SHIFT) + (1 << (LEVEL_SHIFT - 1))) as u8;
    Some(Rgb8::new(
        centre(best / (LEVELS * LEVELS)),
        centre((best / LEVELS) % LEVELS),
        centre(best % LEVELS),
    ))
}

/// Deterministic layout derived from basic image statistics. Never fails.
#[derive(Clone, Debug, Default)]
pub struct FallbackLayout;

impl FallbackLayout {
    pub fn layout(&self, req: &LayoutRequest<'_>) -> LayoutProposal {
        let primary = dominant_color(req.image).unwrap_or(Palette::default().primary);
        let base_w = match req.image.width() {
            0 => 1080.0,
            w => f64::from(w),
        };
        let scaled = |min: f64, factor: f64| min.max(round_half_up(base_w * factor));

        let mut boxes = vec![LayoutBox {
            id: BoxId::Headline,
            x: 6.0,
            y: 6.0,
            w: 88.0,
            h: 16.0,
            align: Some(Align::Left),
            font_size: Some(scaled(32.0, 0.038)),
            style: TextStyle {
                font_weight: Some(800),
                color: Some(Rgb8::NEAR_BLACK),
                max_lines: Some(2),
                ..TextStyle::default()
            },
            rotate: 0.0,
        }];

        if req.copy.for_box(BoxId::Subhead).is_some() {
            boxes.push(LayoutBox {
                id: BoxId::Subhead,
                x: 6.0,
                y: 22.0,
                w: 88.0,
                h: 10.0,
                align: Some(Align::Left),
                font_size: Some(scaled(18.0, 0.022)),
                style: TextStyle {
                    font_weight: Some(500),
                    color: Some(Rgb8::new(0x1F, 0x29, 0x37)),
                    max_lines: Some(2),
                    ..TextStyle::default()
                },
                rotate: 0.0,
            });
        }

        if req.copy.for_box(BoxId::Cta).is_some() {
            boxes.push(LayoutBox {
                id: BoxId::Cta,
                x: 6.0,
                y: 82.0,
                w: 44.0,
                h: 10.0,
                align: Some(Align::Center),
                font_size: Some(scaled(16.0, 0.02)),
                style: TextStyle {
                    font_weight: Some(600),
                    bg: Some(primary),
                    color: Some(Rgb8::WHITE),
                    ..TextStyle::default()
                },
                rotate: 0.0,
            });
        }

        LayoutProposal {
            mask: ProductMask::default(),
            boxes,
            palette: Palette {
                primary,
                secondary: Rgb8::new(0xE5, 0xE7, 0xEB),
                on_primary: Rgb8::WHITE,
                on_secondary: Rgb8::new(0x11, 0x11, 0x11),
            },
            suggestions: Suggestions {
                notes: vec![FALLBACK_NOTE.to_owned()],
                ..Suggestions::default()
            },
        }
    }
}

impl LayoutSource for FallbackLayout {
    fn name(&self) -> &str {
        "fallback"
    }

    fn propose(&self, req: &LayoutRequest<'_>) -> ComposeResult<LayoutProposal> {
        Ok(self.layout(req))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/source/fallback.rs"]
mod tests;
