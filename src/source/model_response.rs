//! Layout proposals from free-form model output.
//!
//! The client is whatever talks to the model; this module only turns its text into a
//! [`LayoutProposal`], filling every gap with per-region defaults.

use anyhow::Context as _;
use serde_json::Value;

use crate::{
    foundation::{
        core::Rgb8,
        error::{ComposeError, ComposeResult},
    },
    layout::model::{
        Align, BoxId, LayoutBox, LayoutProposal, Palette, PctPoint, ProductMask, Stroke,
        Suggestions, TextStyle,
    },
    paint::{contrast::pick_foreground, finish::DEFAULT_FONT_FAMILY},
    source::{LayoutRequest, LayoutSource},
};

/// Raw text access to a layout model.
pub trait LayoutClient: Send + Sync {
    /// Model output describing mask, boxes, palette and notes.
    fn layout_text(&self, req: &LayoutRequest<'_>) -> anyhow::Result<String>;

    /// Optional alternative copy (`altHeadlines`, `altSubheads`, `altCTAs`).
    fn copy_ideas_text(&self, _req: &LayoutRequest<'_>) -> anyhow::Result<Option<String>> {
        Ok(None)
    }
}

/// Parse plain JSON, or failing that the first fenced `json` block in the text.
pub fn parse_loose_json(text: &str) -> ComposeResult<Value> {
    if let Ok(v) = serde_json::from_str::<Value>(text.trim()) {
        return Ok(v);
    }

    const FENCE: &str = "```json";
    let lower = text.to_ascii_lowercase();
    let start = lower
        .find(FENCE)
        .ok_or_else(|| ComposeError::layout("model output is neither JSON nor a fenced json block"))?
        + FENCE.len();
    let body = &text[start..];
    let end = body
        .find("```")
        .ok_or_else(|| ComposeError::layout("unterminated fenced json block"))?;
    let v = serde_json::from_str::<Value>(body[..end].trim())
        .context("fenced json block does not parse")?;
    Ok(v)
}

fn num(v: Option<&Value>) -> Option<f64> {
    let n = match v? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    n.filter(|f| f.is_finite())
}

fn color(v: Option<&Value>) -> Option<Rgb8> {
    v?.as_str()?.parse().ok()
}

fn strings(v: Option<&Value>) -> Vec<String> {
    v.and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_owned)
                .collect()
        })
        .unwrap_or_default()
}

struct BoxDefaults {
    y: f64,
    w: f64,
    h: f64,
    align: Align,
    font_size: f64,
    style: TextStyle,
}

fn box_defaults(id: BoxId) -> BoxDefaults {
    let slate = Rgb8::new(0x1F, 0x29, 0x37);
    let ink = Rgb8::new(0x11, 0x11, 0x11);
    let body_style = TextStyle {
        font_weight: Some(500),
        color: Some(slate),
        max_lines: Some(2),
        ..TextStyle::default()
    };
    match id {
        BoxId::Headline => BoxDefaults {
            y: 6.0,
            w: 88.0,
            h: 16.0,
            align: Align::Left,
            font_size: 40.0,
            style: TextStyle {
                font_weight: Some(800),
                color: Some(ink),
                max_lines: Some(2),
                ..TextStyle::default()
            },
        },
        BoxId::Subhead => BoxDefaults {
            y: 20.0,
            w: 88.0,
            h: 10.0,
            align: Align::Left,
            font_size: 22.0,
            style: body_style,
        },
        BoxId::Cta => BoxDefaults {
            y: 82.0,
            w: 44.0,
            h: 10.0,
            align: Align::Center,
            font_size: 20.0,
            style: TextStyle {
                font_weight: Some(600),
                bg: Some(ink),
                color: Some(Rgb8::WHITE),
                ..TextStyle::default()
            },
        },
        BoxId::Band => BoxDefaults {
            y: 6.0,
            w: 22.0,
            h: 100.0,
            align: Align::Left,
            font_size: 20.0,
            style: TextStyle {
                bg: Some(ink),
                ..TextStyle::default()
            },
        },
        BoxId::Price | BoxId::Badge => BoxDefaults {
            y: 6.0,
            w: 88.0,
            h: 16.0,
            align: Align::Left,
            font_size: 20.0,
            style: body_style,
        },
    }
}

const FALLBACK_WEIGHT: u16 = 700;

fn normalize_style(raw: Option<&Value>, fb: TextStyle) -> TextStyle {
    let get = |k: &str| raw.and_then(|s| s.get(k));
    let stroke = get("stroke").and_then(|s| {
        Some(Stroke {
            color: color(s.get("color"))?,
            width: num(s.get("width"))?,
        })
    });
    TextStyle {
        font_family: get("fontFamily")
            .and_then(Value::as_str)
            .map(str::to_owned)
            .or(fb.font_family)
            .or_else(|| Some(DEFAULT_FONT_FAMILY.to_owned())),
        font_weight: num(get("fontWeight"))
            .filter(|w| (1.0..=1000.0).contains(w))
            .map(|w| w.round() as u16)
            .or(fb.font_weight)
            .or(Some(FALLBACK_WEIGHT)),
        letter_spacing: num(get("letterSpacing")).or(fb.letter_spacing).or(Some(0.0)),
        color: color(get("color")).or(fb.color),
        bg: color(get("bg")).or(fb.bg),
        stroke,
        max_lines: num(get("maxLines"))
            .filter(|n| *n >= 1.0)
            .map(|n| n as usize)
            .or(fb.max_lines),
    }
}

fn normalize_box(raw: &Value) -> Option<LayoutBox> {
    let id = BoxId::parse(raw.get("id")?.as_str()?.trim())?;
    let d = box_defaults(id);
    let align = raw
        .get("align")
        .and_then(|a| serde_json::from_value::<Align>(a.clone()).ok())
        .unwrap_or(d.align);
    Some(LayoutBox {
        id,
        x: num(raw.get("x")).unwrap_or(6.0),
        y: num(raw.get("y")).unwrap_or(d.y),
        w: num(raw.get("w")).unwrap_or(d.w),
        h: num(raw.get("h")).unwrap_or(d.h),
        align: Some(align),
        font_size: Some(num(raw.get("fontSize")).unwrap_or(d.font_size)),
        style: normalize_style(raw.get("style"), d.style),
        rotate: num(raw.get("rotate")).unwrap_or(0.0),
    })
}

fn normalize_mask(raw: Option<&Value>) -> ProductMask {
    let Some(m) = raw else {
        return ProductMask::default();
    };
    if m.get("type").and_then(Value::as_str) == Some("polygon") {
        let points = m
            .get("points")
            .and_then(Value::as_array)
            .map(|pts| {
                pts.iter()
                    .filter_map(|p| {
                        Some(PctPoint {
                            x: num(p.get("x"))?,
                            y: num(p.get("y"))?,
                        })
                    })
                    .collect()
            })
            .unwrap_or_default();
        return ProductMask::Polygon { points };
    }
    ProductMask::Bbox {
        x: num(m.get("x")).unwrap_or(20.0),
        y: num(m.get("y")).unwrap_or(28.0),
        w: num(m.get("w")).unwrap_or(60.0),
        h: num(m.get("h")).unwrap_or(44.0),
    }
}

fn normalize_palette(raw: Option<&Value>) -> Palette {
    let d = Palette::default();
    let Some(p) = raw else {
        return d;
    };
    Palette {
        primary: color(p.get("primary")).unwrap_or(d.primary),
        secondary: color(p.get("secondary")).unwrap_or(d.secondary),
        on_primary: color(p.get("onPrimary")).unwrap_or(d.on_primary),
        on_secondary: color(p.get("onSecondary")).unwrap_or(d.on_secondary),
    }
}

fn normalize_suggestions(raw: Option<&Value>) -> Suggestions {
    Suggestions {
        alt_headlines: strings(raw.and_then(|s| s.get("altHeadlines"))),
        alt_subheads: strings(raw.and_then(|s| s.get("altSubheads"))),
        alt_ctas: strings(raw.and_then(|s| s.get("altCTAs"))),
        notes: strings(raw.and_then(|s| s.get("notes"))),
    }
}

/// Turn a parsed model response into a proposal, applying per-region defaults.
///
/// Unknown region ids are dropped. The CTA pill gets the palette's primary colour when it has no
/// fill of its own, and its text colour is always the contrast pick for that fill.
pub fn normalize_layout(raw: &Value) -> ComposeResult<LayoutProposal> {
    if !raw.is_object() {
        return Err(ComposeError::layout("model layout is not a JSON object"));
    }

    let palette = normalize_palette(raw.get("palette"));
    let mut boxes: Vec<LayoutBox> = raw
        .get("boxes")
        .and_then(Value::as_array)
        .map(|items| items.iter().filter_map(normalize_box).collect())
        .unwrap_or_default();

    if !boxes.iter().any(|b| b.id.carries_text()) {
        return Err(ComposeError::layout("model layout has no usable text regions"));
    }

    for b in boxes.iter_mut().filter(|b| b.id == BoxId::Cta) {
        let bg = *b.style.bg.get_or_insert(palette.primary);
        b.style.color = Some(pick_foreground(bg));
    }

    Ok(LayoutProposal {
        mask: normalize_mask(raw.get("mask")),
        boxes,
        palette,
        suggestions: normalize_suggestions(raw.get("suggestions")),
    })
}

/// Replace alternative copy with model ideas, keeping the layout's notes.
pub fn merge_copy_ideas(suggestions: &mut Suggestions, ideas: &Value) {
    suggestions.alt_headlines = strings(ideas.get("altHeadlines"));
    suggestions.alt_subheads = strings(ideas.get("altSubheads"));
    suggestions.alt_ctas = strings(ideas.get("altCTAs"));
}

/// Primary layout source: asks a [`LayoutClient`] and normalizes whatever comes back.
#[derive(Clone, Debug)]
pub struct ModelLayoutSource<C> {
    client: C,
}

impl<C: LayoutClient> ModelLayoutSource<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &C {
        &self.client
    }
}

impl<C: LayoutClient> LayoutSource for ModelLayoutSource<C> {
    fn name(&self) -> &str {
        "model"
    }

    fn propose(&self, req: &LayoutRequest<'_>) -> ComposeResult<LayoutProposal> {
        let text = self
            .client
            .layout_text(req)
            .context("layout model request failed")?;
        let mut proposal = normalize_layout(&parse_loose_json(&text)?)?;

        match self.client.copy_ideas_text(req) {
            Ok(Some(ideas)) => match parse_loose_json(&ideas) {
                Ok(v) => merge_copy_ideas(&mut proposal.suggestions, &v),
                Err(e) => tracing::warn!(error = %e, "ignoring unparseable copy ideas"),
            },
            Ok(None) => {}
            Err(e) => tracing::warn!(error = %e, "copy ideas request failed"),
        }

        Ok(proposal)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/source/model_response.rs"]
mod tests;
