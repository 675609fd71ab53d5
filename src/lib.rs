//! # wiki2md
//!
//! Convert exported Confluence wiki pages (HTML) to GitHub-flavored Markdown.
//!
//! ## Why this crate?
//!
//! Feeding a raw Confluence export straight to pandoc produces Markdown
//! cluttered with breadcrumbs, footers, and metadata banners, and full of
//! image references into the export's `attachments/` maze. This crate filters
//! the document tree first: chrome blocks are removed, and local images are
//! copied next to the output under readable names derived from their `alt`
//! labels. Only then is the cleaned HTML handed to pandoc.
//!
//! ## Pipeline Overview
//!
//! ```text
//! HTML export
//!  │
//!  ├─ 1. Input   validate the path, parse into a DOM
//!  ├─ 2. Filter  remove site chrome, resolve/copy/rename images
//!  └─ 3. Pandoc  serialize, pipe to the converter, redirect stdout to file
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use wiki2md::{convert, ConversionConfig};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ConversionConfig::default();
//!     let report = convert("SEW/page.html", "page.md", &config)?;
//!     eprintln!(
//!         "{} blocks removed, {} images copied",
//!         report.stats.blocks_removed, report.stats.images_copied
//!     );
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `wiki2md` binary (clap + anyhow + tracing-subscriber) |
//!
//! Disable `cli` when using only the library:
//! ```toml
//! wiki2md = { version = "0.3", default-features = false }
//! ```
//!
//! The external converter (`pandoc`) must be installed separately; see
//! <https://pandoc.org/installing.html>.

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod convert;
pub mod error;
pub mod output;
pub mod pipeline;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{ConversionConfig, ConversionConfigBuilder, MissingImagePolicy};
pub use convert::{convert, inspect};
pub use error::Wiki2MdError;
pub use output::{ConversionReport, ConversionStats, DocumentSummary, Heading, SkippedImage};
