//! Error types for the wiki2md library.
//!
//! Everything in [`Wiki2MdError`] is **fatal**: the conversion cannot
//! proceed (missing input, unwritable output, pandoc missing or failing).
//!
//! An unresolved image reference is *not* an error under the default
//! [`crate::MissingImagePolicy::Skip`] — the element is left untouched, a
//! warning is logged, and the skip is recorded in
//! [`crate::ConversionReport::skipped_images`]. Only
//! [`crate::MissingImagePolicy::Fail`] promotes it to
//! [`Wiki2MdError::ImageNotFound`].
//!
//! A failed *copy* of a resolved image is always fatal: a Markdown file
//! referencing an image that was never copied is worse than no output at all.

use std::path::PathBuf;
use std::process::ExitStatus;
use thiserror::Error;

/// All fatal errors returned by the wiki2md library.
#[derive(Debug, Error)]
pub enum Wiki2MdError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// Input file was not found at the given path.
    #[error("HTML file not found: '{path}'\nCheck the path exists and is readable.")]
    InputNotFound { path: PathBuf },

    /// Process does not have read permission on the input file.
    #[error("Permission denied reading '{path}'\nTry: chmod +r {path:?}")]
    InputPermissionDenied { path: PathBuf },

    /// The input file exists but could not be read.
    #[error("Failed to read '{path}': {source}")]
    InputRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Image errors ──────────────────────────────────────────────────────
    /// An image locator resolved to no local file and the run is configured
    /// to treat that as fatal.
    #[error("Image '{src}' not found locally (also tried '{fallback}')\nUse the default skip policy to leave unresolved images in place.")]
    ImageNotFound { src: String, fallback: PathBuf },

    /// A resolved image existed at resolution time but could not be copied.
    #[error("Failed to copy image '{src}' to '{dst}': {source}")]
    ImageCopyFailed {
        src: PathBuf,
        dst: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Converter errors ──────────────────────────────────────────────────
    /// The external converter executable could not be spawned.
    #[error("Converter '{program}' was not found on PATH.\nInstall pandoc (https://pandoc.org/installing.html) or point --pandoc at the executable.")]
    ConverterNotFound { program: PathBuf },

    /// The converter ran but exited with a non-zero status.
    #[error("Converter exited with {status}\n{stderr}")]
    ConverterFailed { status: ExitStatus, stderr: String },

    /// Piping the document to the converter (or waiting on it) failed.
    #[error("Failed to stream document through the converter: {source}")]
    ConverterIo {
        #[source]
        source: std::io::Error,
    },

    // ── I/O errors ────────────────────────────────────────────────────────
    /// Could not create or write the output Markdown file.
    #[error("Failed to write output file '{path}': {source}")]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}
