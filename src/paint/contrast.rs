use crate::foundation::core::Rgb8;

/// Minimum ratio for an explicit style colour to be kept over the automatic pick.
pub const READABLE_RATIO: f64 = 4.5;

fn linearize(c: u8) -> f64 {
    let v = f64::from(c) / 255.0;
    if v <= 0.03928 {
        v / 12.92
    } else {
        ((v + 0.055) / 1.055).powf(2.4)
    }
}

/// WCAG relative luminance in 0..=1.
pub fn relative_luminance(c: Rgb8) -> f64 {
    0.2126 * linearize(c.r) + 0.7152 * linearize(c.g) + 0.0722 * linearize(c.b)
}

/// `(L_hi + 0.05) / (L_lo + 0.05)`; symmetric, in 1..=21.
pub fn contrast_ratio(a: Rgb8, b: Rgb8) -> f64 {
    let la = relative_luminance(a);
    let lb = relative_luminance(b);
    let (hi, lo) = if la > lb { (la, lb) } else { (lb, la) };
    (hi + 0.05) / (lo + 0.05)
}

/// Pure white or near-black, whichever reads better on `bg`. Ties go to white.
pub fn pick_foreground(bg: Rgb8) -> Rgb8 {
    let white = contrast_ratio(bg, Rgb8::WHITE);
    let black = contrast_ratio(bg, Rgb8::NEAR_BLACK);
    if white >= black {
        Rgb8::WHITE
    } else {
        Rgb8::NEAR_BLACK
    }
}

/// Keep `preferred` when it is readable on `bg`, otherwise fall back to [`pick_foreground`].
pub fn readable_or_pick(preferred: Option<Rgb8>, bg: Rgb8) -> Rgb8 {
    match preferred {
        Some(c) if contrast_ratio(c, bg) >= READABLE_RATIO => c,
        _ => pick_foreground(bg),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/paint/contrast.rs"]
mod tests;
