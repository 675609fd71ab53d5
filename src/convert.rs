//! Single-document conversion entry points.
//!
//! One run is one pass: load, filter, convert, report. The document tree is
//! owned by this driver for the duration of the run and discarded once the
//! converter has been invoked.

use crate::config::ConversionConfig;
use crate::error::Wiki2MdError;
use crate::output::{ConversionReport, ConversionStats, DocumentSummary};
use crate::pipeline::{filter, input, pandoc};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::info;

/// Convert one exported wiki page (HTML) to a Markdown file.
///
/// This is the primary entry point for the library.
///
/// # Arguments
/// * `input` — path to the exported HTML document
/// * `output` — path the Markdown is written to
/// * `config` — conversion configuration
///
/// # Returns
/// `Ok(ConversionReport)` on success, even if some images were skipped
/// (check `report.skipped_images`).
///
/// # Errors
/// Returns `Err(Wiki2MdError)` for fatal conditions:
/// - input file missing or unreadable
/// - an unresolved image under [`crate::MissingImagePolicy::Fail`]
/// - a resolved image that could not be copied
/// - converter missing, failing, or unreachable over its pipes
pub fn convert(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    config: &ConversionConfig,
) -> Result<ConversionReport, Wiki2MdError> {
    let total_start = Instant::now();
    let input = input.as_ref();
    let output = output.as_ref();
    info!("Starting conversion: {}", input.display());

    let html_path = input::resolve_input(input)?;
    let resource_dir = config
        .resource_dir
        .clone()
        .unwrap_or_else(|| input::default_resource_dir(&html_path));
    let image_dir = config
        .image_dir
        .clone()
        .unwrap_or_else(|| PathBuf::from("."));

    let doc = input::load_document(&html_path)?;

    let filter_start = Instant::now();
    let outcome = filter::filter_document(&doc, &resource_dir, &image_dir, config.missing_images)?;
    let filter_duration_ms = filter_start.elapsed().as_millis() as u64;

    let convert_start = Instant::now();
    pandoc::write_markdown(&doc, output, config)?;
    let convert_duration_ms = convert_start.elapsed().as_millis() as u64;

    let stats = ConversionStats {
        blocks_removed: outcome.blocks_removed,
        images_copied: outcome.images_copied,
        images_skipped: outcome.skipped.len(),
        filter_duration_ms,
        convert_duration_ms,
        total_duration_ms: total_start.elapsed().as_millis() as u64,
    };

    info!(
        "Conversion complete: {} blocks removed, {} images copied ({} skipped), {}ms total → {}",
        stats.blocks_removed,
        stats.images_copied,
        stats.images_skipped,
        stats.total_duration_ms,
        output.display()
    );

    Ok(ConversionReport {
        stats,
        skipped_images: outcome.skipped,
    })
}

/// Summarise a document's structure without converting it.
///
/// Reads and parses the input, then reports title, heading outline, image
/// count, and chrome-block count. No files are copied, nothing is spawned,
/// and the tree is not mutated.
pub fn inspect(input: impl AsRef<Path>) -> Result<DocumentSummary, Wiki2MdError> {
    let html_path = input::resolve_input(input.as_ref())?;
    let doc = input::load_document(&html_path)?;
    filter::summarize(&doc)
}
