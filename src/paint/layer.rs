use std::fmt::Write as _;

use resvg::tiny_skia;

use crate::{
    foundation::error::{ComposeError, ComposeResult},
    layout::model::{Align, BoxId},
    paint::{
        finish::{BoxBody, FinishedBox, FinishedStyle},
        fonts::FontLibrary,
        pill::PillGeometry,
    },
};

/// Vector overlay for one box, positioned at the box origin on the canvas.
#[derive(Clone, Debug, PartialEq)]
pub struct VectorLayer {
    pub id: BoxId,
    pub left: i32,
    pub top: i32,
    pub width: u32,
    pub height: u32,
    pub svg: String,
}

impl VectorLayer {
    /// Render the markup into a premultiplied pixmap of the layer's size.
    pub fn rasterize(&self, fonts: &FontLibrary) -> ComposeResult<tiny_skia::Pixmap> {
        let opts = fonts.svg_options();
        let tree = usvg::Tree::from_str(&self.svg, &opts).map_err(|e| {
            ComposeError::render(format!("{} layer markup rejected: {e}", self.id.as_str()))
        })?;
        let mut pixmap = tiny_skia::Pixmap::new(self.width, self.height).ok_or_else(|| {
            ComposeError::render(format!(
                "failed to allocate {}x{} pixmap for {} layer",
                self.width,
                self.height,
                self.id.as_str()
            ))
        })?;
        resvg::render(&tree, tiny_skia::Transform::identity(), &mut pixmap.as_mut());
        Ok(pixmap)
    }
}

/// Escape the five markup-special characters.
pub fn escape_markup(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    out
}

/// Compact, locale-independent number formatting for markup attributes.
fn num(v: f64) -> String {
    let r = (v * 100.0).round() / 100.0;
    if r == 0.0 { "0".to_owned() } else { format!("{r}") }
}

fn font_attrs(style: &FinishedStyle, font_size: f64) -> String {
    let mut s = format!(
        r#"font-family="{}" font-weight="{}" font-size="{}" fill="{}""#,
        escape_markup(&style.font_family),
        style.font_weight,
        num(font_size),
        style.color.to_hex(),
    );
    if style.letter_spacing != 0.0 {
        let _ = write!(s, r#" letter-spacing="{}""#, num(style.letter_spacing));
    }
    if let Some(stroke) = style.stroke.as_ref().filter(|s| s.width.is_finite() && s.width > 0.0) {
        let _ = write!(
            s,
            r#" stroke="{}" stroke-width="{}" paint-order="stroke" stroke-linejoin="round""#,
            stroke.color.to_hex(),
            num(stroke.width),
        );
    }
    s
}

fn body_markup(fin: &FinishedBox, lines: &[String], font_size: f64, padding: f64) -> String {
    let w = f64::from(fin.rect.w);
    let h = f64::from(fin.rect.h);
    let line_height = (font_size * 1.2).round();
    let n = lines.len() as f64;
    let start_y = line_height.max((h - line_height * (n - 0.2)) / 2.0);

    let (anchor, x) = match fin.align {
        Align::Left => ("start", padding),
        Align::Center => ("middle", w / 2.0),
        Align::Right => ("end", w - padding),
    };

    let mut out = format!(
        r#"<text text-anchor="{anchor}" {}>"#,
        font_attrs(&fin.style, font_size)
    );
    for (i, line) in lines.iter().enumerate() {
        let _ = write!(
            out,
            r#"<tspan x="{}" y="{}">{}</tspan>"#,
            num(x),
            num(start_y + line_height * i as f64),
            escape_markup(line),
        );
    }
    out.push_str("</text>");
    out
}

fn pill_markup(fin: &FinishedBox, text: &str, g: &PillGeometry) -> String {
    let fill = fin.style.fill.map(|c| c.to_hex()).unwrap_or_else(|| "none".to_owned());
    let text_y = g.y + g.height / 2.0 + g.font_size / 3.0;
    format!(
        r#"<rect x="{}" y="{}" width="{}" height="{}" rx="{r}" ry="{r}" fill="{fill}"/><text text-anchor="middle" x="{}" y="{}" {}>{}</text>"#,
        num(g.x),
        num(g.y),
        num(g.width),
        num(g.height),
        num(g.x + g.width / 2.0),
        num(text_y),
        font_attrs(&fin.style, g.font_size),
        escape_markup(text),
        r = num(g.radius()),
    )
}

fn band_markup(fin: &FinishedBox) -> String {
    let fill = fin.style.fill.map(|c| c.to_hex()).unwrap_or_else(|| "none".to_owned());
    format!(
        r#"<rect x="0" y="0" width="{}" height="{}" fill="{fill}"/>"#,
        fin.rect.w, fin.rect.h
    )
}

/// Build the overlay for a finished box. `padding` is the horizontal inset for body text.
pub fn build_layer(fin: &FinishedBox, padding: f64) -> Option<VectorLayer> {
    if fin.rect.is_empty() {
        return None;
    }
    let w = fin.rect.w as u32;
    let h = fin.rect.h as u32;

    let content = match &fin.body {
        BoxBody::Text(fitted) if fitted.lines.is_empty() => return None,
        BoxBody::Text(fitted) => body_markup(fin, &fitted.lines, fitted.font_size, padding),
        BoxBody::Pill { text, geometry } => pill_markup(fin, text, geometry),
        BoxBody::Band => band_markup(fin),
    };

    let mut svg = format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#
    );
    if fin.rotate != 0.0 {
        let _ = write!(
            svg,
            r#"<g transform="rotate({} {} {})">{content}</g>"#,
            num(fin.rotate),
            num(f64::from(w) / 2.0),
            num(f64::from(h) / 2.0),
        );
    } else {
        svg.push_str(&content);
    }
    svg.push_str("</svg>");

    Some(VectorLayer {
        id: fin.id,
        left: fin.rect.x,
        top: fin.rect.y,
        width: w,
        height: h,
        svg,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/paint/layer.rs"]
mod tests;
