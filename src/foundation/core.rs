use std::fmt;
use std::str::FromStr;

use crate::foundation::error::{ComposeError, ComposeResult};

/// Largest canvas edge accepted for one output size.
pub const MAX_CANVAS_DIM: u32 = 16_384;

/// One requested output size.
#[derive(Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct CanvasTarget {
    /// Artifact base name (`"{name}.{ext}"`).
    pub name: String,
    /// Width in pixels.
    #[serde(alias = "w")]
    pub width: u32,
    /// Height in pixels.
    #[serde(alias = "h")]
    pub height: u32,
}

impl CanvasTarget {
    pub fn new(name: impl Into<String>, width: u32, height: u32) -> ComposeResult<Self> {
        let target = Self {
            name: name.into(),
            width,
            height,
        };
        target.validate()?;
        Ok(target)
    }

    /// Named social presets: `square` 1:1, `portrait` 4:5, `story` 9:16.
    pub fn preset(name: &str) -> Option<Self> {
        let (w, h) = match name {
            "square" => (1080, 1080),
            "portrait" => (1080, 1350),
            "story" => (1080, 1920),
            _ => return None,
        };
        Some(Self {
            name: name.to_owned(),
            width: w,
            height: h,
        })
    }

    pub fn validate(&self) -> ComposeResult<()> {
        if self.name.trim().is_empty() {
            return Err(ComposeError::validation("canvas name must be non-empty"));
        }
        if self.name.contains(['/', '\\']) {
            return Err(ComposeError::validation(format!(
                "canvas name \"{}\" must not contain path separators",
                self.name
            )));
        }
        if self.width == 0 || self.height == 0 {
            return Err(ComposeError::validation(format!(
                "canvas \"{}\" must have non-zero dimensions",
                self.name
            )));
        }
        if self.width > MAX_CANVAS_DIM || self.height > MAX_CANVAS_DIM {
            return Err(ComposeError::validation(format!(
                "canvas \"{}\" is too large: {}x{} (max {MAX_CANVAS_DIM}x{MAX_CANVAS_DIM})",
                self.name, self.width, self.height
            )));
        }
        Ok(())
    }

    pub fn width_i32(&self) -> i32 {
        self.width as i32
    }

    pub fn height_i32(&self) -> i32 {
        self.height as i32
    }
}

/// Axis-aligned pixel rectangle, half-open on the right and bottom edges.
///
/// Origins may be negative or beyond the canvas; consumers clamp rather than reject.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize)]
pub struct PixelRect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl PixelRect {
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self {
            x,
            y,
            w: w.max(0),
            h: h.max(0),
        }
    }

    /// Exclusive right edge, saturating at `i32::MAX`.
    pub fn right(self) -> i32 {
        self.x.saturating_add(self.w)
    }

    /// Exclusive bottom edge, saturating at `i32::MAX`.
    pub fn bottom(self) -> i32 {
        self.y.saturating_add(self.h)
    }

    pub fn is_empty(self) -> bool {
        self.w <= 0 || self.h <= 0
    }

    pub fn with_y(self, y: i32) -> Self {
        Self { y, ..self }
    }

    /// `true` when the open vertical intervals overlap (touching edges do not count).
    pub fn overlaps_vertically(self, other: PixelRect) -> bool {
        self.y < other.bottom() && other.y < self.bottom()
    }

    /// `true` when the interiors intersect (touching edges do not count).
    pub fn intersects(self, other: PixelRect) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && self.x < other.right()
            && other.x < self.right()
            && self.overlaps_vertically(other)
    }

    pub fn intersection(self, other: PixelRect) -> Option<PixelRect> {
        let x0 = self.x.max(other.x);
        let y0 = self.y.max(other.y);
        let x1 = self.right().min(other.right());
        let y1 = self.bottom().min(other.bottom());
        if x1 <= x0 || y1 <= y0 {
            return None;
        }
        let extent = |lo: i32, hi: i32| {
            (i64::from(hi) - i64::from(lo)).min(i64::from(i32::MAX)) as i32
        };
        Some(PixelRect::new(x0, y0, extent(x0, x1), extent(y0, y1)))
    }
}

/// Opaque sRGB colour, 8 bits per channel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb8 {
    pub const WHITE: Rgb8 = Rgb8::new(0xFF, 0xFF, 0xFF);
    pub const NEAR_BLACK: Rgb8 = Rgb8::new(0x0B, 0x0B, 0x0B);
    pub const BLACK: Rgb8 = Rgb8::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Rgb8 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Rgb8 {
    type Err = ComposeError;

    /// Accepts `#RGB`, `#RRGGBB` and `#RRGGBBAA` (alpha must be valid hex but is discarded), `#` optional.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let hex = s.strip_prefix('#').unwrap_or(s);
        if !hex.is_ascii() {
            return Err(ComposeError::validation(format!("invalid hex colour \"{s}\"")));
        }

        fn byte(pair: &str, src: &str) -> ComposeResult<u8> {
            u8::from_str_radix(pair, 16)
                .map_err(|_| ComposeError::validation(format!("invalid hex colour \"{src}\"")))
        }

        match hex.len() {
            3 => {
                let expand = |i: usize| -> ComposeResult<u8> {
                    let v = byte(&hex[i..i + 1], s)?;
                    Ok(v * 17)
                };
                Ok(Rgb8::new(expand(0)?, expand(1)?, expand(2)?))
            }
            6 | 8 => {
                if hex.len() == 8 {
                    byte(&hex[6..8], s)?;
                }
                Ok(Rgb8::new(
                    byte(&hex[0..2], s)?,
                    byte(&hex[2..4], s)?,
                    byte(&hex[4..6], s)?,
                ))
            }
            _ => Err(ComposeError::validation(format!(
                "hex colour \"{s}\" must be #RGB, #RRGGBB or #RRGGBBAA"
            ))),
        }
    }
}

impl TryFrom<String> for Rgb8 {
    type Error = ComposeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Rgb8> for String {
    fn from(value: Rgb8) -> Self {
        value.to_hex()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
