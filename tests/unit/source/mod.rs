use super::*;
use crate::{
    foundation::error::ComposeError,
    layout::model::{BoxId, Suggestions},
    source::fallback::{FALLBACK_NOTE, FallbackLayout},
};
use image::Rgba;

struct Failing;

impl LayoutSource for Failing {
    fn name(&self) -> &str {
        "failing"
    }

    fn propose(&self, _req: &LayoutRequest<'_>) -> ComposeResult<LayoutProposal> {
        Err(ComposeError::layout("model unavailable"))
    }
}

struct Fixed(LayoutProposal);

impl LayoutSource for Fixed {
    fn name(&self) -> &str {
        "fixed"
    }

    fn propose(&self, _req: &LayoutRequest<'_>) -> ComposeResult<LayoutProposal> {
        Ok(self.0.clone())
    }
}

fn inputs() -> (RgbaImage, CopyText) {
    let img = RgbaImage::from_pixel(16, 16, Rgba([200, 30, 30, 255]));
    let copy = CopyText {
        headline: "Summer Sale".to_owned(),
        cta: Some("Shop Now".to_owned()),
        ..CopyText::default()
    };
    (img, copy)
}

#[test]
fn failing_primary_is_replaced_by_fallback() {
    let (image, copy) = inputs();
    let req = LayoutRequest {
        image: &image,
        copy: &copy,
    };
    let (proposal, origin) = resolve_layout(Some(&Failing), &FallbackLayout, &req);
    assert_eq!(origin, LayoutOrigin::Fallback);
    assert_eq!(proposal.suggestions.notes, vec![FALLBACK_NOTE.to_owned()]);
    assert!(proposal.boxes.iter().any(|b| b.id == BoxId::Headline));
}

#[test]
fn missing_primary_uses_fallback() {
    let (image, copy) = inputs();
    let req = LayoutRequest {
        image: &image,
        copy: &copy,
    };
    let (_, origin) = resolve_layout(None, &FallbackLayout, &req);
    assert_eq!(origin, LayoutOrigin::Fallback);
}

#[test]
fn successful_primary_is_passed_through_untouched() {
    let (image, copy) = inputs();
    let req = LayoutRequest {
        image: &image,
        copy: &copy,
    };
    let proposal = LayoutProposal {
        suggestions: Suggestions {
            notes: vec!["keep me".to_owned()],
            ..Suggestions::default()
        },
        ..LayoutProposal::default()
    };
    let (got, origin) = resolve_layout(Some(&Fixed(proposal.clone())), &FallbackLayout, &req);
    assert_eq!(origin, LayoutOrigin::Primary);
    assert_eq!(got, proposal);
}
