//! adcomposer turns one product photo, one symbolic layout and a few lines of copy into
//! finished ad creatives at several sizes and encodings.
//!
//! - A layout proposal (percent-space boxes plus a product mask) comes from a
//!   [`LayoutSource`], with a deterministic [`FallbackLayout`] when the primary source fails.
//! - For each [`CanvasTarget`] the proposal is resolved to pixels, kept clear of the product
//!   and of other text, styled against the pixels underneath and fitted.
//! - [`Composer::compose`] composites, encodes every size x format unit in isolation and
//!   bundles the results.
#![forbid(unsafe_code)]

mod foundation;

pub(crate) mod compose;
pub(crate) mod layout;
pub(crate) mod paint;
pub(crate) mod source;

pub use crate::foundation::core::{CanvasTarget, MAX_CANVAS_DIM, PixelRect, Rgb8};
pub use crate::foundation::error::{ComposeError, ComposeResult};

pub use crate::layout::collision::resolve_collisions;
pub use crate::layout::geometry::{gap_px, mask_rect, normalize_box, normalize_rect};
pub use crate::layout::mask::{avoid_mask, clip_to_mask};
pub use crate::layout::model::{
    Align, BoxId, CopyText, LayoutBox, LayoutProposal, Palette, PctPoint, ProductMask, Stroke,
    Suggestions, TextStyle,
};
pub use crate::layout::resolve::{ResolvedBox, ResolvedLayout, resolve_layout_geometry};
pub use crate::layout::settings::LayoutSettings;
pub use crate::layout::settle::{Violation, find_violations, settle_greedy};

pub use crate::paint::contrast::{
    READABLE_RATIO, contrast_ratio, pick_foreground, readable_or_pick, relative_luminance,
};
pub use crate::paint::finish::{BoxBody, FinishedBox, FinishedStyle, finish_box};
pub use crate::paint::fonts::FontLibrary;
pub use crate::paint::layer::{VectorLayer, build_layer, escape_markup};
pub use crate::paint::pill::{PillGeometry, pill_geometry};
pub use crate::paint::sample::{DEFAULT_SAMPLE, sample_background};
pub use crate::paint::text_fit::{FitRequest, FittedText, TextMetrics, fit_text};

pub use crate::source::fallback::{FallbackLayout, dominant_color};
pub use crate::source::model_response::{
    LayoutClient, ModelLayoutSource, normalize_layout, parse_loose_json,
};
pub use crate::source::{LayoutOrigin, LayoutRequest, LayoutSource, resolve_layout};

pub use crate::compose::archive::{ARCHIVE_MIME, ARCHIVE_NAME, build_archive};
pub use crate::compose::crop::{CropStrategy, cover_crop};
pub use crate::compose::encode::{EncodeSettings, encode_image};
pub use crate::compose::pipeline::{
    Artifact, Composer, CompositionOutput, PlanOutput, SizePlan, UnitFailure,
};
pub use crate::compose::request::{ComposeRequest, OutputFormat, SizeSpec, ThreadingOpts};
