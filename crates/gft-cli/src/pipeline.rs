//! Conversion run: validate the request, build the tree, convert, emit.

use std::fs;
use std::time::Instant;

use anyhow::{Context, Result, bail};
use tracing::{info, info_span};

use gft_convert::convert_tree;
use gft_output::emit;
use gft_source::{ArchiveNodeSource, NodeSource, is_zip_archive};

use crate::types::{ConversionRequest, ConversionResult};

/// Check the input archive and prepare the output directory.
pub fn prepare(request: &ConversionRequest) -> Result<()> {
    request
        .kind
        .classification()
        .with_context(|| format!("resource type {}", request.kind))?;

    let input = &request.input;
    if !input.exists() {
        bail!("input {} does not exist", input.display());
    }
    if !input.is_file() {
        bail!("input {} is not a file", input.display());
    }
    if !is_zip_archive(input) {
        bail!("input {} is not a zip archive", input.display());
    }

    let output_dir = &request.output_dir;
    if output_dir.is_file() {
        bail!("output {} is a file, not a directory", output_dir.display());
    }
    fs::create_dir_all(output_dir)
        .with_context(|| format!("create {}", output_dir.display()))?;
    Ok(())
}

/// Run one conversion with the default archive source.
pub fn run_conversion(request: &ConversionRequest) -> Result<ConversionResult> {
    run_conversion_with(&ArchiveNodeSource::new(), request)
}

/// Run one conversion reading the tree from `source`.
pub fn run_conversion_with<S: NodeSource>(
    source: &S,
    request: &ConversionRequest,
) -> Result<ConversionResult> {
    let span = info_span!(
        "conversion",
        resource_kind = %request.kind,
        version = %request.version
    );
    let _guard = span.enter();
    let start = Instant::now();

    prepare(request)?;

    let tree = source
        .build(&request.input, request.kind, &request.version)
        .with_context(|| format!("read {}", request.input.display()))?;
    let outcome = convert_tree(&tree).context("convert classification tree")?;
    let report = emit(
        &outcome.model,
        request.kind,
        &request.version,
        request.selector,
        &request.output_dir,
    )
    .context("emit code systems")?;

    let has_errors = !report.is_success();
    info!(
        concept_count = outcome.model.count,
        written = report.written.len(),
        failed = report.failures.len(),
        duration_ms = start.elapsed().as_millis(),
        "conversion finished"
    );
    Ok(ConversionResult {
        kind: request.kind,
        version: request.version.clone(),
        title: outcome.model.title.clone(),
        output_dir: request.output_dir.clone(),
        concept_count: outcome.model.count,
        written: report.written,
        duplicates: outcome.duplicates,
        failures: report.failures,
        has_errors,
    })
}
