use image::RgbaImage;

use crate::{
    foundation::core::{PixelRect, Rgb8},
    layout::{
        model::{Align, BoxId, CopyText, Stroke},
        resolve::ResolvedBox,
        settings::LayoutSettings,
    },
    paint::{
        contrast::{pick_foreground, readable_or_pick},
        pill::{PillGeometry, pill_geometry},
        sample::sample_background,
        text_fit::{FitRequest, FittedText, TextMetrics, fit_text},
    },
};

pub const DEFAULT_FONT_FAMILY: &str = "Inter, system-ui, Arial, sans-serif";
pub const DEFAULT_BAND_FILL: Rgb8 = Rgb8::new(0x11, 0x11, 0x11);

/// Pill fill used when the style sets none and white text would be picked.
const DARK_PILL_FILL: Rgb8 = Rgb8::new(0x11, 0x11, 0x11);

fn default_weight(id: BoxId) -> u16 {
    match id {
        BoxId::Headline => 800,
        BoxId::Cta | BoxId::Badge => 600,
        _ => 500,
    }
}

fn default_font_size(id: BoxId) -> f64 {
    match id {
        BoxId::Headline => 40.0,
        _ => 22.0,
    }
}

/// Concrete typography after sampling and contrast selection.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct FinishedStyle {
    pub font_family: String,
    pub font_weight: u16,
    pub letter_spacing: f64,
    pub color: Rgb8,
    pub fill: Option<Rgb8>,
    pub stroke: Option<Stroke>,
}

impl FinishedStyle {
    pub fn metrics(&self) -> TextMetrics {
        TextMetrics {
            font_weight: self.font_weight,
            letter_spacing: self.letter_spacing,
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum BoxBody {
    Text(FittedText),
    Pill { text: String, geometry: PillGeometry },
    Band,
}

/// A resolved box with every style decision made; ready for the layer renderer.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct FinishedBox {
    pub id: BoxId,
    pub rect: PixelRect,
    pub align: Align,
    pub rotate: f64,
    /// Mean colour of the base image under `rect`.
    pub sampled: Rgb8,
    pub style: FinishedStyle,
    pub body: BoxBody,
}

/// Sample, pick colours and fit copy for one resolved box.
///
/// Returns `None` for empty rectangles and for text boxes without copy.
pub fn finish_box(
    resolved: &ResolvedBox,
    copy: &CopyText,
    base: &RgbaImage,
    settings: &LayoutSettings,
) -> Option<FinishedBox> {
    if resolved.rect.is_empty() {
        return None;
    }
    let id = resolved.id;
    let src = &resolved.source;
    let rect = resolved.rect;
    let align = src
        .align
        .unwrap_or(if id.is_pill() { Align::Center } else { Align::Left });
    let rotate = if src.rotate.is_finite() { src.rotate } else { 0.0 };

    let text = if id.carries_text() {
        Some(copy.for_box(id)?)
    } else {
        None
    };

    let sampled = sample_background(base, rect);
    let font_family = src
        .style
        .font_family
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(DEFAULT_FONT_FAMILY)
        .to_owned();
    let font_weight = src
        .style
        .font_weight
        .filter(|w| (1..=1000).contains(w))
        .unwrap_or_else(|| default_weight(id));
    let letter_spacing = src
        .style
        .letter_spacing
        .filter(|v| v.is_finite())
        .unwrap_or(0.0);
    let start_size = src
        .font_size
        .filter(|v| v.is_finite() && *v > 0.0)
        .unwrap_or_else(|| default_font_size(id));

    let (style, body) = match text {
        None => {
            let fill = src.style.bg.unwrap_or(DEFAULT_BAND_FILL);
            let style = FinishedStyle {
                font_family,
                font_weight,
                letter_spacing,
                color: pick_foreground(fill),
                fill: Some(fill),
                stroke: None,
            };
            (style, BoxBody::Band)
        }
        Some(text) if id.is_pill() => {
            let fill = src.style.bg.unwrap_or(if pick_foreground(sampled) == Rgb8::WHITE {
                DARK_PILL_FILL
            } else {
                Rgb8::WHITE
            });
            let style = FinishedStyle {
                font_family,
                font_weight,
                letter_spacing,
                color: pick_foreground(fill),
                fill: Some(fill),
                stroke: src.style.stroke.clone(),
            };
            let geometry = pill_geometry(
                f64::from(rect.w),
                f64::from(rect.h),
                text,
                start_size,
                settings.min_font_px,
                align,
                &style.metrics(),
            );
            let body = BoxBody::Pill {
                text: text.to_owned(),
                geometry,
            };
            (style, body)
        }
        Some(text) => {
            let style = FinishedStyle {
                font_family,
                font_weight,
                letter_spacing,
                color: readable_or_pick(src.style.color, sampled),
                fill: None,
                stroke: src.style.stroke.clone(),
            };
            let max_width = (f64::from(rect.w) - 2.0 * settings.text_padding_px).max(1.0);
            let fitted = fit_text(FitRequest {
                text,
                max_width,
                start_size,
                min_size: settings.min_font_px,
                max_lines: src.style.max_lines.unwrap_or(settings.default_max_lines),
                metrics: style.metrics(),
            });
            (style, BoxBody::Text(fitted))
        }
    };

    Some(FinishedBox {
        id,
        rect,
        align,
        rotate,
        sampled,
        style,
        body,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/paint/finish.rs"]
mod tests;
