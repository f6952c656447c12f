//! Greedy word wrap with font-size reduction against an approximate width model.
//!
//! Glyph advances are not measured; width is estimated from character count, font size,
//! weight and letter spacing. The estimate is coarse but fully deterministic.

/// Average advance of one character as a fraction of the font size at weight 600.
const ADVANCE_EM: f64 = 0.55;
const REFERENCE_WEIGHT: f64 = 600.0;

/// Parameters of the width model.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextMetrics {
    pub font_weight: u16,
    pub letter_spacing: f64,
}

impl Default for TextMetrics {
    fn default() -> Self {
        Self {
            font_weight: 600,
            letter_spacing: 0.0,
        }
    }
}

impl TextMetrics {
    /// Estimated rendered width of `text` at `font_size`; never below 1.
    pub fn width(&self, text: &str, font_size: f64) -> f64 {
        let n = text.chars().count() as f64;
        let weight_factor = f64::from(self.font_weight) / REFERENCE_WEIGHT;
        let spacing = self.letter_spacing * (n - 1.0).max(0.0);
        (n * font_size * ADVANCE_EM * weight_factor + spacing).max(1.0)
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct FittedText {
    pub lines: Vec<String>,
    pub font_size: f64,
    /// `true` when even the floor size did not fit and the text was left unwrapped.
    pub overflowed: bool,
}

/// Inputs for [`fit_text`].
#[derive(Clone, Copy, Debug)]
pub struct FitRequest<'a> {
    pub text: &'a str,
    pub max_width: f64,
    pub start_size: f64,
    pub min_size: f64,
    pub max_lines: usize,
    pub metrics: TextMetrics,
}

/// Largest font size (stepping down by 1 from `start_size`) whose greedy wrap fits `max_lines`.
///
/// Font size is never increased. When the floor is reached without fitting, the text comes back
/// as a single unwrapped line at the floor size.
pub fn fit_text(req: FitRequest<'_>) -> FittedText {
    let floor = req.min_size.max(1.0);
    let mut size = if req.start_size.is_finite() && req.start_size > 0.0 {
        req.start_size
    } else {
        floor
    };
    // A suggestion below the floor is honoured as its own floor.
    let min_size = floor.min(size);
    let max_lines = req.max_lines.max(1);
    let words: Vec<&str> = req.text.split_whitespace().collect();

    while size >= min_size {
        let lines = wrap_words(&words, req.max_width, size, &req.metrics);
        if lines.len() <= max_lines {
            return FittedText {
                lines,
                font_size: size,
                overflowed: false,
            };
        }
        size -= 1.0;
    }

    tracing::debug!(
        chars = req.text.chars().count(),
        max_width = req.max_width,
        "text does not fit at floor size"
    );
    FittedText {
        lines: vec![req.text.trim().to_owned()],
        font_size: min_size,
        overflowed: true,
    }
}

/// Greedy wrap at a fixed size. Words wider than `max_width` are broken between characters;
/// every character is kept.
pub fn wrap_words(words: &[&str], max_width: f64, size: f64, metrics: &TextMetrics) -> Vec<String> {
    let fits = |s: &str| metrics.width(s, size) <= max_width;
    let mut lines = Vec::new();
    let mut line = String::new();

    for &word in words {
        if !line.is_empty() {
            let candidate = format!("{line} {word}");
            if fits(&candidate) {
                line = candidate;
                continue;
            }
            lines.push(std::mem::take(&mut line));
        }

        if fits(word) {
            line.push_str(word);
            continue;
        }

        let mut chunk = String::new();
        for ch in word.chars() {
            chunk.push(ch);
            if chunk.chars().count() > 1 && !fits(&chunk) {
                chunk.pop();
                lines.push(std::mem::take(&mut chunk));
                chunk.push(ch);
            }
        }
        line = chunk;
    }

    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

#[cfg(test)]
#[path = "../../tests/unit/paint/text_fit.rs"]
mod tests;
