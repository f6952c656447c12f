use std::collections::BTreeSet;
use std::path::Path;

use anyhow::Context as _;

use crate::{
    compose::crop::CropStrategy,
    foundation::{
        core::CanvasTarget,
        error::{ComposeError, ComposeResult},
    },
    layout::{model::CopyText, settings::LayoutSettings},
};

pub const DEFAULT_CTA: &str = "Shop Now";
pub const DEFAULT_QUALITY: u8 = 85;
pub const DEFAULT_AVIF_SPEED: u8 = 8;
const MIN_HEADLINE_CHARS: usize = 2;
const MAX_CTA_CHARS: usize = 28;

/// Raster encodings an artifact can be written in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Png,
    Webp,
    Avif,
    #[serde(alias = "jpg")]
    Jpeg,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::Webp => "webp",
            OutputFormat::Avif => "avif",
            OutputFormat::Jpeg => "jpeg",
        }
    }

    pub fn mime(self) -> &'static str {
        match self {
            OutputFormat::Png => "image/png",
            OutputFormat::Webp => "image/webp",
            OutputFormat::Avif => "image/avif",
            OutputFormat::Jpeg => "image/jpeg",
        }
    }

    pub fn is_lossless(self) -> bool {
        matches!(self, OutputFormat::Png)
    }
}

/// A requested output size: a preset name or explicit dimensions.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum SizeSpec {
    Preset(String),
    Explicit(CanvasTarget),
}

impl SizeSpec {
    pub fn resolve(&self) -> ComposeResult<CanvasTarget> {
        match self {
            SizeSpec::Preset(name) => CanvasTarget::preset(name.trim()).ok_or_else(|| {
                ComposeError::validation(format!(
                    "unknown size preset \"{name}\" (expected square, portrait or story)"
                ))
            }),
            SizeSpec::Explicit(c) => {
                c.validate()?;
                Ok(c.clone())
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ThreadingOpts {
    /// Encode size x format units on a worker pool.
    pub parallel: bool,
    /// Worker count; `None` lets the pool decide.
    pub threads: Option<usize>,
}

impl Default for ThreadingOpts {
    fn default() -> Self {
        Self {
            parallel: true,
            threads: None,
        }
    }
}

fn default_formats() -> Vec<OutputFormat> {
    vec![OutputFormat::Png]
}

fn default_quality() -> u8 {
    DEFAULT_QUALITY
}

fn default_avif_speed() -> u8 {
    DEFAULT_AVIF_SPEED
}

/// One composition job: copy, output sizes and encodings, plus tunables.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ComposeRequest {
    #[serde(flatten)]
    pub copy: CopyText,
    pub sizes: Vec<SizeSpec>,
    #[serde(default = "default_formats")]
    pub formats: Vec<OutputFormat>,
    /// Shared by every lossy format, 50..=100.
    #[serde(default = "default_quality")]
    pub quality: u8,
    #[serde(default)]
    pub crop: CropStrategy,
    /// AVIF encoder effort, 1 (slowest) ..= 10 (fastest).
    #[serde(default = "default_avif_speed")]
    pub avif_speed: u8,
    #[serde(default)]
    pub layout: LayoutSettings,
    #[serde(default)]
    pub threading: ThreadingOpts,
}

impl ComposeRequest {
    pub fn new(copy: CopyText, sizes: Vec<SizeSpec>, formats: Vec<OutputFormat>) -> Self {
        Self {
            copy,
            sizes,
            formats,
            quality: DEFAULT_QUALITY,
            crop: CropStrategy::default(),
            avif_speed: DEFAULT_AVIF_SPEED,
            layout: LayoutSettings::default(),
            threading: ThreadingOpts::default(),
        }
    }

    pub fn from_json_str(s: &str) -> ComposeResult<Self> {
        serde_json::from_str(s)
            .map_err(|e| ComposeError::validation(format!("invalid compose request: {e}")))
    }

    pub fn from_path(path: &Path) -> ComposeResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read compose request {}", path.display()))?;
        Self::from_json_str(&text)
    }

    /// Copy with the CTA defaulted when it is absent or blank.
    pub fn copy_text(&self) -> CopyText {
        let mut copy = self.copy.clone();
        if copy.for_box(crate::layout::model::BoxId::Cta).is_none() {
            copy.cta = Some(DEFAULT_CTA.to_owned());
        }
        copy
    }

    /// Resolve every size spec into a validated canvas, in request order.
    pub fn canvases(&self) -> ComposeResult<Vec<CanvasTarget>> {
        self.sizes.iter().map(SizeSpec::resolve).collect()
    }

    pub fn validate(&self) -> ComposeResult<()> {
        let headline = self.copy.headline.trim();
        if headline.chars().count() < MIN_HEADLINE_CHARS {
            return Err(ComposeError::validation(format!(
                "headline must be at least {MIN_HEADLINE_CHARS} characters"
            )));
        }
        if let Some(cta) = &self.copy.cta
            && cta.trim().chars().count() > MAX_CTA_CHARS
        {
            return Err(ComposeError::validation(format!(
                "cta must be at most {MAX_CTA_CHARS} characters"
            )));
        }

        if self.sizes.is_empty() {
            return Err(ComposeError::validation("at least one size is required"));
        }
        let mut names = BTreeSet::new();
        for canvas in self.canvases()? {
            if !names.insert(canvas.name.clone()) {
                return Err(ComposeError::validation(format!(
                    "duplicate size name \"{}\"",
                    canvas.name
                )));
            }
        }

        if self.formats.is_empty() {
            return Err(ComposeError::validation("at least one format is required"));
        }
        let mut seen = BTreeSet::new();
        for f in &self.formats {
            if !seen.insert(*f) {
                return Err(ComposeError::validation(format!(
                    "duplicate format \"{}\"",
                    f.extension()
                )));
            }
        }

        if !(50..=100).contains(&self.quality) {
            return Err(ComposeError::validation("quality must be in 50..=100"));
        }
        if !(1..=10).contains(&self.avif_speed) {
            return Err(ComposeError::validation("avif_speed must be in 1..=10"));
        }
        if let Some(n) = self.threading.threads
            && n == 0
        {
            return Err(ComposeError::validation(
                "threading 'threads' must be >= 1 when set",
            ));
        }
        self.layout.validate()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compose/request.rs"]
mod tests;
