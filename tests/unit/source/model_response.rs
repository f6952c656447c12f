use super::*;
use crate::layout::model::CopyText;
use image::RgbaImage;

const LAYOUT: &str = r##"{
  "mask": {"type": "bbox", "x": 25, "y": 30, "w": 50, "h": 40},
  "palette": {"primary": "#2244AA", "secondary": "#EEEEEE", "onPrimary": "#FFFFFF", "onSecondary": "#111111"},
  "boxes": [
    {"id": "headline", "x": 8, "y": 5, "w": 84, "h": 14, "fontSize": 48,
     "style": {"fontFamily": "Roboto", "fontWeight": 900, "color": "#FAFAFA",
               "stroke": {"color": "#000000", "width": 2}}},
    {"id": "sticker", "x": 1, "y": 1, "w": 5, "h": 5},
    {"id": "cta", "align": "right", "style": {"color": "#000000"}},
    {"id": "band", "rotate": "3"}
  ],
  "suggestions": {"notes": ["keep the left side calm"]}
}"##;

#[test]
fn plain_json_is_normalized_with_defaults() {
    let p = normalize_layout(&parse_loose_json(LAYOUT).expect("json")).expect("layout");
    assert_eq!(
        p.mask,
        ProductMask::Bbox {
            x: 25.0,
            y: 30.0,
            w: 50.0,
            h: 40.0
        }
    );
    let ids: Vec<BoxId> = p.boxes.iter().map(|b| b.id).collect();
    assert_eq!(ids, vec![BoxId::Headline, BoxId::Cta, BoxId::Band]);

    let h = &p.boxes[0];
    assert_eq!(h.font_size, Some(48.0));
    assert_eq!(h.style.font_family.as_deref(), Some("Roboto"));
    assert_eq!(h.style.font_weight, Some(900));
    assert_eq!(h.style.max_lines, Some(2));
    assert_eq!(
        h.style.stroke,
        Some(Stroke {
            color: Rgb8::BLACK,
            width: 2.0
        })
    );

    let cta = &p.boxes[1];
    assert_eq!((cta.x, cta.y, cta.w, cta.h), (6.0, 82.0, 44.0, 10.0));
    assert_eq!(cta.align, Some(Align::Right));
    assert_eq!(cta.font_size, Some(20.0));
    assert_eq!(cta.style.font_weight, Some(600));
    // Default pill fill is kept, and the text colour follows it rather than the model's choice.
    assert_eq!(cta.style.bg, Some(Rgb8::new(0x11, 0x11, 0x11)));
    assert_eq!(cta.style.color, Some(Rgb8::WHITE));

    let band = &p.boxes[2];
    assert_eq!((band.w, band.h), (22.0, 100.0));
    assert_eq!(band.rotate, 3.0);
    assert_eq!(band.style.font_weight, Some(700));

    assert_eq!(p.palette.primary, Rgb8::new(0x22, 0x44, 0xAA));
    assert_eq!(p.suggestions.notes, vec!["keep the left side calm".to_owned()]);
}

#[test]
fn cta_fill_defaults_to_dark_ink_and_text_follows_it() {
    let raw = r##"{"palette": {"primary": "#F5F5F5"}, "boxes": [{"id": "headline"}, {"id": "cta", "style": {}}]}"##;
    let p = normalize_layout(&parse_loose_json(raw).expect("json")).expect("layout");
    let cta = p.boxes.iter().find(|b| b.id == BoxId::Cta).expect("cta");
    assert_eq!(cta.style.bg, Some(Rgb8::new(0x11, 0x11, 0x11)));
    assert_eq!(cta.style.color, Some(Rgb8::WHITE));

    let raw = r##"{"boxes": [{"id": "headline"}, {"id": "cta", "style": {"bg": "#FFE066"}}]}"##;
    let p = normalize_layout(&parse_loose_json(raw).expect("json")).expect("layout");
    let cta = p.boxes.iter().find(|b| b.id == BoxId::Cta).expect("cta");
    assert_eq!(cta.style.color, Some(Rgb8::NEAR_BLACK));
}

#[test]
fn fenced_block_is_extracted() {
    let text = "Here you go:\n```JSON\n{\"boxes\": [{\"id\": \"headline\"}]}\n```\nEnjoy.";
    let v = parse_loose_json(text).expect("json");
    assert!(v.get("boxes").is_some());
}

#[test]
fn garbage_is_a_layout_error() {
    assert!(matches!(
        parse_loose_json("I cannot help with that."),
        Err(ComposeError::Layout(_))
    ));
    assert!(parse_loose_json("```json\n{ nope\n```").is_err());
    assert!(normalize_layout(&serde_json::json!([1, 2])).is_err());
    assert!(normalize_layout(&serde_json::json!({"boxes": [{"id": "band"}]})).is_err());
}

#[test]
fn polygon_mask_points_are_kept() {
    let raw = serde_json::json!({
        "mask": {"type": "polygon", "points": [{"x": 10, "y": 10}, {"x": 90, "y": "15"}, {"x": 50}]},
        "boxes": [{"id": "headline"}]
    });
    let p = normalize_layout(&raw).expect("layout");
    match p.mask {
        ProductMask::Polygon { points } => assert_eq!(points.len(), 2),
        other => panic!("unexpected mask {other:?}"),
    }
}

struct Canned {
    layout: anyhow::Result<String>,
    ideas: Option<String>,
}

impl LayoutClient for Canned {
    fn layout_text(&self, _req: &LayoutRequest<'_>) -> anyhow::Result<String> {
        match &self.layout {
            Ok(s) => Ok(s.clone()),
            Err(e) => Err(anyhow::anyhow!("{e}")),
        }
    }

    fn copy_ideas_text(&self, _req: &LayoutRequest<'_>) -> anyhow::Result<Option<String>> {
        Ok(self.ideas.clone())
    }
}

fn propose(client: Canned) -> ComposeResult<LayoutProposal> {
    let image = RgbaImage::new(4, 4);
    let copy = CopyText {
        headline: "Hello".to_owned(),
        ..CopyText::default()
    };
    ModelLayoutSource::new(client).propose(&LayoutRequest {
        image: &image,
        copy: &copy,
    })
}

#[test]
fn copy_ideas_merge_into_suggestions_keeping_notes() {
    let p = propose(Canned {
        layout: Ok(LAYOUT.to_owned()),
        ideas: Some(r#"{"altHeadlines": ["A", "B"], "altCTAs": ["Go"]}"#.to_owned()),
    })
    .expect("proposal");
    assert_eq!(p.suggestions.alt_headlines, vec!["A".to_owned(), "B".to_owned()]);
    assert_eq!(p.suggestions.alt_ctas, vec!["Go".to_owned()]);
    assert!(p.suggestions.alt_subheads.is_empty());
    assert_eq!(p.suggestions.notes, vec!["keep the left side calm".to_owned()]);
}

#[test]
fn unparseable_copy_ideas_are_ignored() {
    let p = propose(Canned {
        layout: Ok(LAYOUT.to_owned()),
        ideas: Some("no ideas today".to_owned()),
    })
    .expect("proposal");
    assert!(p.suggestions.alt_headlines.is_empty());
}

#[test]
fn client_failure_surfaces_as_error() {
    let err = propose(Canned {
        layout: Err(anyhow::anyhow!("timeout")),
        ideas: None,
    })
    .unwrap_err();
    assert!(err.to_string().contains("layout model request failed"));
}
