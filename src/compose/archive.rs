use std::io::{Cursor, Write as _};

use anyhow::Context as _;
use zip::{CompressionMethod, ZipWriter, write::SimpleFileOptions};

use crate::{compose::pipeline::Artifact, foundation::error::ComposeResult};

pub const ARCHIVE_NAME: &str = "bundle.zip";
pub const ARCHIVE_MIME: &str = "application/zip";
const DEFLATE_LEVEL: i64 = 6;

/// Pack artifacts into one DEFLATE zip, in the given order.
///
/// Entry timestamps are pinned to the zip epoch so identical inputs give identical bytes.
pub fn build_archive(artifacts: &[Artifact]) -> ComposeResult<Artifact> {
    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .compression_level(Some(DEFLATE_LEVEL))
        .last_modified_time(zip::DateTime::default())
        .unix_permissions(0o644);

    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    for a in artifacts {
        zip.start_file(a.name.as_str(), options)
            .with_context(|| format!("start archive entry {}", a.name))?;
        zip.write_all(&a.bytes)
            .with_context(|| format!("write archive entry {}", a.name))?;
    }
    let bytes = zip.finish().context("finish archive")?.into_inner();

    Ok(Artifact {
        name: ARCHIVE_NAME.to_owned(),
        mime: ARCHIVE_MIME.to_owned(),
        bytes,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/compose/archive.rs"]
mod tests;
