//! Where layout proposals come from.
//!
//! A primary source (typically backed by a vision model) may fail for any reason; the local
//! fallback never does. [`resolve_layout`] tries the former and substitutes the latter, so the
//! rest of the pipeline always has a usable proposal.

use image::RgbaImage;

use crate::{
    foundation::error::ComposeResult,
    layout::model::{CopyText, LayoutProposal},
};

pub(crate) mod fallback;
pub(crate) mod model_response;

/// Everything a layout source may look at.
#[derive(Clone, Copy, Debug)]
pub struct LayoutRequest<'a> {
    pub image: &'a RgbaImage,
    pub copy: &'a CopyText,
}

/// A capability that proposes a symbolic layout for one request.
pub trait LayoutSource: Send + Sync {
    fn name(&self) -> &str;

    fn propose(&self, req: &LayoutRequest<'_>) -> ComposeResult<LayoutProposal>;
}

/// Which path produced the proposal in use.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutOrigin {
    Primary,
    Fallback,
}

/// Try `primary`, substituting `fallback` on any failure. Primary errors are logged, never
/// returned.
pub fn resolve_layout(
    primary: Option<&dyn LayoutSource>,
    fallback: &fallback::FallbackLayout,
    req: &LayoutRequest<'_>,
) -> (LayoutProposal, LayoutOrigin) {
    if let Some(source) = primary {
        match source.propose(req) {
            Ok(proposal) => {
                tracing::debug!(
                    source = source.name(),
                    boxes = proposal.boxes.len(),
                    "layout proposal accepted"
                );
                return (proposal, LayoutOrigin::Primary);
            }
            Err(e) => {
                tracing::warn!(
                    source = source.name(),
                    error = %e,
                    "layout source failed, using local fallback"
                );
            }
        }
    }
    (fallback.layout(req), LayoutOrigin::Fallback)
}

#[cfg(test)]
#[path = "../../tests/unit/source/mod.rs"]
mod tests;
