use crate::foundation::error::{ComposeError, ComposeResult};

/// Tunables shared by geometry resolution and text fitting.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct LayoutSettings {
    /// Separation between resolved boxes and from the mask, in percent of canvas height.
    pub gap_pct: f64,
    /// Smallest font size the fitter may shrink to.
    pub min_font_px: f64,
    /// Line budget for boxes whose style does not set `maxLines`.
    pub default_max_lines: usize,
    /// Horizontal inset applied on each side of body text.
    pub text_padding_px: f64,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            gap_pct: 2.0,
            min_font_px: 10.0,
            default_max_lines: 2,
            text_padding_px: 16.0,
        }
    }
}

impl LayoutSettings {
    pub fn validate(&self) -> ComposeResult<()> {
        if !self.gap_pct.is_finite() || !(0.0..=25.0).contains(&self.gap_pct) {
            return Err(ComposeError::validation("layout gap_pct must be in 0..=25"));
        }
        if !self.min_font_px.is_finite() || self.min_font_px < 1.0 {
            return Err(ComposeError::validation("layout min_font_px must be >= 1"));
        }
        if self.default_max_lines == 0 {
            return Err(ComposeError::validation(
                "layout default_max_lines must be >= 1",
            ));
        }
        if !self.text_padding_px.is_finite() || self.text_padding_px < 0.0 {
            return Err(ComposeError::validation(
                "layout text_padding_px must be finite and >= 0",
            ));
        }
        Ok(())
    }
}
