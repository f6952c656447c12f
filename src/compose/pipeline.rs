//! Per-request orchestration: one layout, many sizes, many encodings.

use image::RgbaImage;
use rayon::prelude::*;

use crate::{
    compose::{
        archive::build_archive,
        composite::composite_layers,
        crop::cover_crop,
        encode::{EncodeSettings, encode_image},
        request::{ComposeRequest, OutputFormat},
    },
    foundation::{
        core::CanvasTarget,
        error::{ComposeError, ComposeResult},
    },
    layout::{
        model::{CopyText, LayoutProposal, Suggestions},
        resolve::{ResolvedLayout, resolve_layout_geometry},
        settings::LayoutSettings,
    },
    paint::{
        finish::{BoxBody, FinishedBox, finish_box},
        fonts::FontLibrary,
        layer::build_layer,
    },
    source::{LayoutOrigin, LayoutRequest, LayoutSource, fallback::FallbackLayout, resolve_layout},
};

/// One named encoded output.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct Artifact {
    pub name: String,
    pub mime: String,
    #[serde(skip)]
    pub bytes: Vec<u8>,
}

/// A size x format unit (or the archive) that could not be produced.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct UnitFailure {
    pub name: String,
    pub reason: String,
}

/// Resolved geometry and finished styling for one canvas.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct SizePlan {
    pub layout: ResolvedLayout,
    /// Drawn boxes in paint order: bands first, then text in proposal order.
    pub finished: Vec<FinishedBox>,
}

#[derive(Clone, Debug, serde::Serialize)]
pub struct CompositionOutput {
    /// Size-major, then format order; the archive comes last.
    pub artifacts: Vec<Artifact>,
    pub failures: Vec<UnitFailure>,
    /// Passed through from the layout source untouched.
    pub suggestions: Suggestions,
    pub layout_origin: LayoutOrigin,
    pub plans: Vec<SizePlan>,
}

/// Geometry-only result used for inspection.
#[derive(Clone, Debug, serde::Serialize)]
pub struct PlanOutput {
    pub layout_origin: LayoutOrigin,
    pub proposal: LayoutProposal,
    pub plans: Vec<SizePlan>,
}

/// Composition entry point. Holds the fonts and the optional primary layout source.
pub struct Composer {
    fonts: FontLibrary,
    primary: Option<Box<dyn LayoutSource>>,
    fallback: FallbackLayout,
}

impl Default for Composer {
    fn default() -> Self {
        Self::new(FontLibrary::system())
    }
}

impl Composer {
    pub fn new(fonts: FontLibrary) -> Self {
        Self {
            fonts,
            primary: None,
            fallback: FallbackLayout,
        }
    }

    pub fn with_primary(mut self, source: impl LayoutSource + 'static) -> Self {
        self.primary = Some(Box::new(source));
        self
    }

    pub fn fonts(&self) -> &FontLibrary {
        &self.fonts
    }

    /// Produce every size x format artifact plus the archive.
    ///
    /// Only invalid input and a run that produced nothing at all are errors; individual unit
    /// failures are reported in [`CompositionOutput::failures`].
    #[tracing::instrument(skip_all, fields(sizes = request.sizes.len(), formats = request.formats.len()))]
    pub fn compose(
        &self,
        image_bytes: &[u8],
        request: &ComposeRequest,
    ) -> ComposeResult<CompositionOutput> {
        let prepared = self.prepare(image_bytes, request)?;
        let pool = if request.threading.parallel {
            Some(build_thread_pool(request.threading.threads)?)
        } else {
            None
        };

        let render = |canvas: &CanvasTarget| {
            render_size(
                &prepared.image,
                canvas,
                &prepared.proposal,
                &prepared.copy,
                request,
                &self.fonts,
            )
        };
        let rendered: Vec<ComposeResult<(RgbaImage, SizePlan)>> = match &pool {
            Some(pool) => pool.install(|| prepared.canvases.par_iter().map(render).collect()),
            None => prepared.canvases.iter().map(render).collect(),
        };

        let mut units = Vec::new();
        let mut failures = Vec::new();
        let mut plans = Vec::new();
        for (canvas, result) in prepared.canvases.iter().zip(&rendered) {
            match result {
                Ok((image, plan)) => {
                    plans.push(plan.clone());
                    for &format in &request.formats {
                        units.push(EncodeUnit {
                            canvas,
                            image,
                            format,
                        });
                    }
                }
                Err(e) => {
                    tracing::warn!(canvas = %canvas.name, error = %e, "size failed to render");
                    for &format in &request.formats {
                        failures.push(UnitFailure {
                            name: unit_name(canvas, format),
                            reason: e.to_string(),
                        });
                    }
                }
            }
        }

        let settings = EncodeSettings {
            quality: request.quality,
            avif_speed: request.avif_speed,
        };
        let (mut artifacts, unit_failures) = encode_units(&units, pool.as_ref(), |img, format| {
            encode_image(img, format, settings)
        });
        failures.extend(unit_failures);

        if artifacts.is_empty() {
            tracing::warn!(failed = failures.len(), "no artifacts produced");
            return Err(ComposeError::NothingProduced);
        }

        match build_archive(&artifacts) {
            Ok(archive) => artifacts.push(archive),
            Err(e) => {
                tracing::warn!(error = %e, "archive packaging failed");
                failures.push(UnitFailure {
                    name: crate::compose::archive::ARCHIVE_NAME.to_owned(),
                    reason: e.to_string(),
                });
            }
        }

        tracing::info!(
            artifacts = artifacts.len(),
            failures = failures.len(),
            origin = ?prepared.origin,
            "composition finished"
        );

        Ok(CompositionOutput {
            artifacts,
            failures,
            suggestions: prepared.proposal.suggestions.clone(),
            layout_origin: prepared.origin,
            plans,
        })
    }

    /// Resolve geometry and styling for every size without compositing or encoding.
    pub fn plan(&self, image_bytes: &[u8], request: &ComposeRequest) -> ComposeResult<PlanOutput> {
        let prepared = self.prepare(image_bytes, request)?;
        let mut plans = Vec::with_capacity(prepared.canvases.len());
        for canvas in &prepared.canvases {
            let base = cover_crop(&prepared.image, canvas.width, canvas.height, request.crop)?;
            plans.push(plan_size(
                &base,
                canvas,
                &prepared.proposal,
                &prepared.copy,
                &request.layout,
            ));
        }
        Ok(PlanOutput {
            layout_origin: prepared.origin,
            proposal: prepared.proposal,
            plans,
        })
    }

    fn prepare(&self, image_bytes: &[u8], request: &ComposeRequest) -> ComposeResult<Prepared> {
        if image_bytes.is_empty() {
            return Err(ComposeError::validation("image payload is empty"));
        }
        request.validate()?;
        let canvases = request.canvases()?;

        let image = image::load_from_memory(image_bytes)
            .map_err(|e| ComposeError::decode(format!("base image: {e}")))?
            .to_rgba8();
        let copy = request.copy_text();

        let (proposal, origin) = resolve_layout(
            self.primary.as_deref(),
            &self.fallback,
            &LayoutRequest {
                image: &image,
                copy: &copy,
            },
        );
        tracing::debug!(
            ?origin,
            boxes = proposal.boxes.len(),
            width = image.width(),
            height = image.height(),
            "request prepared"
        );

        Ok(Prepared {
            image,
            copy,
            canvases,
            proposal,
            origin,
        })
    }
}

struct Prepared {
    image: RgbaImage,
    copy: CopyText,
    canvases: Vec<CanvasTarget>,
    proposal: LayoutProposal,
    origin: LayoutOrigin,
}

fn unit_name(canvas: &CanvasTarget, format: OutputFormat) -> String {
    format!("{}.{}", canvas.name, format.extension())
}

/// Resolve, sample and fit every box for one already-cropped base.
fn plan_size(
    base: &RgbaImage,
    canvas: &CanvasTarget,
    proposal: &LayoutProposal,
    copy: &CopyText,
    settings: &LayoutSettings,
) -> SizePlan {
    let layout = resolve_layout_geometry(proposal, canvas, settings);
    let mut finished: Vec<FinishedBox> = layout
        .boxes
        .iter()
        .filter_map(|b| finish_box(b, copy, base, settings))
        .collect();
    finished.sort_by_key(|f| !matches!(f.body, BoxBody::Band));
    SizePlan { layout, finished }
}

#[tracing::instrument(skip_all, fields(canvas = %canvas.name))]
fn render_size(
    source: &RgbaImage,
    canvas: &CanvasTarget,
    proposal: &LayoutProposal,
    copy: &CopyText,
    request: &ComposeRequest,
    fonts: &FontLibrary,
) -> ComposeResult<(RgbaImage, SizePlan)> {
    let base = cover_crop(source, canvas.width, canvas.height, request.crop)?;
    let plan = plan_size(&base, canvas, proposal, copy, &request.layout);

    let layers: Vec<_> = plan
        .finished
        .iter()
        .filter_map(|f| build_layer(f, request.layout.text_padding_px))
        .collect();
    tracing::debug!(
        layers = layers.len(),
        settled = plan.layout.settled_greedily,
        "compositing"
    );
    let image = composite_layers(base, &layers, fonts)?;
    Ok((image, plan))
}

struct EncodeUnit<'a> {
    canvas: &'a CanvasTarget,
    image: &'a RgbaImage,
    format: OutputFormat,
}

/// Encode every unit, isolating failures. Results keep unit order.
fn encode_units<E>(
    units: &[EncodeUnit<'_>],
    pool: Option<&rayon::ThreadPool>,
    encode: E,
) -> (Vec<Artifact>, Vec<UnitFailure>)
where
    E: Fn(&RgbaImage, OutputFormat) -> ComposeResult<Vec<u8>> + Sync,
{
    let run = |unit: &EncodeUnit<'_>| -> Result<Artifact, UnitFailure> {
        let name = unit_name(unit.canvas, unit.format);
        match encode(unit.image, unit.format) {
            Ok(bytes) => {
                tracing::debug!(name = %name, bytes = bytes.len(), "encoded");
                Ok(Artifact {
                    name,
                    mime: unit.format.mime().to_owned(),
                    bytes,
                })
            }
            Err(e) => {
                tracing::warn!(name = %name, error = %e, "encode failed");
                Err(UnitFailure {
                    name,
                    reason: e.to_string(),
                })
            }
        }
    };

    let results: Vec<Result<Artifact, UnitFailure>> = match pool {
        Some(pool) => pool.install(|| units.par_iter().map(run).collect()),
        None => units.iter().map(run).collect(),
    };

    let mut artifacts = Vec::with_capacity(results.len());
    let mut failures = Vec::new();
    for r in results {
        match r {
            Ok(a) => artifacts.push(a),
            Err(f) => failures.push(f),
        }
    }
    (artifacts, failures)
}

fn build_thread_pool(threads: Option<usize>) -> ComposeResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(ComposeError::validation(
            "threading 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| ComposeError::render(format!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/compose/pipeline.rs"]
mod tests;
