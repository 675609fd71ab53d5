//! Result types returned by [`crate::convert`] and [`crate::inspect`].

use serde::{Deserialize, Serialize};

/// Summary of one completed conversion run.
///
/// Returned by [`crate::convert`] after the Markdown file has been written.
/// Serialises to JSON for the CLI's `--json` mode.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionReport {
    /// Aggregate counters and timings.
    pub stats: ConversionStats,
    /// Images whose locator resolved to no local file and were left untouched.
    pub skipped_images: Vec<SkippedImage>,
}

/// Aggregate statistics for one conversion run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConversionStats {
    /// Site-chrome blocks removed from the document.
    pub blocks_removed: usize,
    /// Images resolved, copied, and rewritten.
    pub images_copied: usize,
    /// Images skipped because their locator resolved to no local file.
    pub images_skipped: usize,
    /// Time spent filtering the document tree.
    pub filter_duration_ms: u64,
    /// Time spent in the external converter.
    pub convert_duration_ms: u64,
    /// End-to-end wall-clock time.
    pub total_duration_ms: u64,
}

/// An image reference that could not be resolved to a local file.
///
/// The element keeps its original `src`, so the final Markdown still points
/// wherever the export pointed — commonly an absolute web URL.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkippedImage {
    /// The original `src` attribute value.
    pub src: String,
    /// The element's `alt` attribute, if any.
    pub alt: Option<String>,
}

/// Structural overview of a document, produced by [`crate::inspect`] without
/// filtering, copying, or converting anything.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentSummary {
    /// The `<title>` text, if present.
    pub title: Option<String>,
    /// Headings `h1`–`h6` in document order.
    pub headings: Vec<Heading>,
    /// Count of `img` elements (before any chrome removal).
    pub image_count: usize,
    /// Count of elements matching the site-chrome selectors.
    pub chrome_blocks: usize,
}

/// One heading in the document outline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Heading {
    /// Heading level, 1–6.
    pub level: u8,
    /// Flattened text content.
    pub text: String,
}
