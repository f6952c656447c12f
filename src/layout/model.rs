//! Symbolic layout: percentage-space boxes and masks, independent of any canvas size.

use kurbo::{BezPath, Shape};
use serde::{Deserialize, Serialize};

use crate::foundation::core::Rgb8;

/// Identity of a layout region. The set is closed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoxId {
    Headline,
    Subhead,
    Cta,
    Price,
    Badge,
    Band,
}

impl BoxId {
    pub const ALL: [BoxId; 6] = [
        BoxId::Headline,
        BoxId::Subhead,
        BoxId::Cta,
        BoxId::Price,
        BoxId::Badge,
        BoxId::Band,
    ];

    /// Lower value wins: headline, then subhead, then everything else.
    pub fn priority(self) -> u8 {
        match self {
            BoxId::Headline => 0,
            BoxId::Subhead => 1,
            BoxId::Cta | BoxId::Price | BoxId::Badge | BoxId::Band => 2,
        }
    }

    /// Bands are decorative fills; every other region renders copy.
    pub fn carries_text(self) -> bool {
        !matches!(self, BoxId::Band)
    }

    /// Regions drawn as a filled capsule around their copy.
    pub fn is_pill(self) -> bool {
        matches!(self, BoxId::Cta | BoxId::Badge)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BoxId::Headline => "headline",
            BoxId::Subhead => "subhead",
            BoxId::Cta => "cta",
            BoxId::Price => "price",
            BoxId::Badge => "badge",
            BoxId::Band => "band",
        }
    }

    pub fn parse(s: &str) -> Option<BoxId> {
        BoxId::ALL.into_iter().find(|id| id.as_str() == s)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    pub color: Rgb8,
    pub width: f64,
}

/// Optional typography and fill hints attached to a symbolic box.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextStyle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub letter_spacing: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Rgb8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bg: Option<Rgb8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke: Option<Stroke>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_lines: Option<usize>,
}

/// One region of the symbolic layout. All geometry is in percent (0..100) of the canvas.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutBox {
    pub id: BoxId,
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub align: Option<Align>,
    /// Suggested font size in pixels; only ever reduced downstream.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    #[serde(default)]
    pub style: TextStyle,
    /// Rotation in degrees around the box centre.
    #[serde(default)]
    pub rotate: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PctPoint {
    pub x: f64,
    pub y: f64,
}

/// Region of the frame occupied by the product.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ProductMask {
    Bbox { x: f64, y: f64, w: f64, h: f64 },
    Polygon { points: Vec<PctPoint> },
}

impl Default for ProductMask {
    fn default() -> Self {
        ProductMask::Bbox {
            x: 20.0,
            y: 28.0,
            w: 60.0,
            h: 44.0,
        }
    }
}

impl ProductMask {
    /// Effective `(x, y, w, h)` in percent. Polygons resolve to their bounding box; an empty or
    /// degenerate polygon yields `None` and keeps nothing clear.
    pub fn effective_bbox(&self) -> Option<(f64, f64, f64, f64)> {
        match self {
            ProductMask::Bbox { x, y, w, h } => Some((*x, *y, *w, *h)),
            ProductMask::Polygon { points } => {
                let mut finite = points.iter().filter(|p| p.x.is_finite() && p.y.is_finite());
                let first = finite.next()?;
                let mut path = BezPath::new();
                path.move_to((first.x, first.y));
                for p in finite {
                    path.line_to((p.x, p.y));
                }
                path.close_path();
                let bb = path.bounding_box();
                if bb.width() <= 0.0 || bb.height() <= 0.0 {
                    return None;
                }
                Some((bb.x0, bb.y0, bb.width(), bb.height()))
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Palette {
    pub primary: Rgb8,
    pub secondary: Rgb8,
    pub on_primary: Rgb8,
    pub on_secondary: Rgb8,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            primary: Rgb8::new(0x0B, 0x0B, 0x12),
            secondary: Rgb8::new(0xE5, 0xE7, 0xEB),
            on_primary: Rgb8::WHITE,
            on_secondary: Rgb8::new(0x11, 0x11, 0x11),
        }
    }
}

/// Free-form suggestions from the layout source, passed through untouched.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestions {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub alt_headlines: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub alt_subheads: Vec<String>,
    #[serde(default, rename = "altCTAs", skip_serializing_if = "Vec::is_empty")]
    pub alt_ctas: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub notes: Vec<String>,
}

/// A complete layout candidate: produced once per request, shared read-only across sizes.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LayoutProposal {
    pub mask: ProductMask,
    pub boxes: Vec<LayoutBox>,
    #[serde(default)]
    pub palette: Palette,
    #[serde(default)]
    pub suggestions: Suggestions,
}

/// Copy text for each text-carrying region.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CopyText {
    pub headline: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subhead: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cta: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub badge: Option<String>,
}

impl CopyText {
    /// Trimmed, non-empty copy for a region, if any.
    pub fn for_box(&self, id: BoxId) -> Option<&str> {
        let raw = match id {
            BoxId::Headline => Some(self.headline.as_str()),
            BoxId::Subhead => self.subhead.as_deref(),
            BoxId::Cta => self.cta.as_deref(),
            BoxId::Price => self.price.as_deref(),
            BoxId::Badge => self.badge.as_deref(),
            BoxId::Band => None,
        }?;
        let t = raw.trim();
        (!t.is_empty()).then_some(t)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/model.rs"]
mod tests;
