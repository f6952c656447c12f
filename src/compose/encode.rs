use image::{ExtendedColorType, ImageEncoder, RgbaImage};

use crate::{
    compose::request::OutputFormat,
    foundation::error::{ComposeError, ComposeResult},
};

/// Knobs shared by the lossy encoders.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EncodeSettings {
    /// 50..=100, used by WebP, AVIF and JPEG alike.
    pub quality: u8,
    /// 1..=10.
    pub avif_speed: u8,
}

/// Encode a composited canvas. PNG keeps alpha; JPEG drops it.
pub fn encode_image(
    img: &RgbaImage,
    format: OutputFormat,
    settings: EncodeSettings,
) -> ComposeResult<Vec<u8>> {
    let (w, h) = img.dimensions();
    if w == 0 || h == 0 {
        return Err(ComposeError::encode(format!(
            "cannot encode an empty {} image",
            format.extension()
        )));
    }
    let quality = settings.quality.clamp(1, 100);
    let mut out = Vec::new();

    match format {
        OutputFormat::Png => {
            image::codecs::png::PngEncoder::new(&mut out)
                .write_image(img.as_raw(), w, h, ExtendedColorType::Rgba8)
                .map_err(|e| ComposeError::encode(format!("png: {e}")))?;
        }
        OutputFormat::Jpeg => {
            let rgb = image::DynamicImage::ImageRgba8(img.clone()).into_rgb8();
            image::codecs::jpeg::JpegEncoder::new_with_quality(&mut out, quality)
                .write_image(rgb.as_raw(), w, h, ExtendedColorType::Rgb8)
                .map_err(|e| ComposeError::encode(format!("jpeg: {e}")))?;
        }
        OutputFormat::Avif => {
            image::codecs::avif::AvifEncoder::new_with_speed_quality(
                &mut out,
                settings.avif_speed.clamp(1, 10),
                quality,
            )
            .write_image(img.as_raw(), w, h, ExtendedColorType::Rgba8)
            .map_err(|e| ComposeError::encode(format!("avif: {e}")))?;
        }
        OutputFormat::Webp => {
            let mem = webp::Encoder::from_rgba(img.as_raw(), w, h)
                .encode_simple(false, f32::from(quality))
                .map_err(|e| ComposeError::encode(format!("webp: {e:?}")))?;
            out.extend_from_slice(&mem);
        }
    }

    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/compose/encode.rs"]
mod tests;
