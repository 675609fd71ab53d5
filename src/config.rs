//! Configuration types for HTML-to-Markdown conversion.
//!
//! All conversion behaviour is controlled through [`ConversionConfig`], built
//! via its [`ConversionConfigBuilder`]. Keeping every knob in one struct makes
//! it trivial to log a run's configuration and diff two runs to understand why
//! their outputs differ.

use crate::error::Wiki2MdError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for one HTML-to-Markdown conversion run.
///
/// Built via [`ConversionConfig::builder()`] or using
/// [`ConversionConfig::default()`].
///
/// # Example
/// ```rust
/// use wiki2md::ConversionConfig;
///
/// let config = ConversionConfig::builder()
///     .toc_depth(3)
///     .pandoc_program("/usr/local/bin/pandoc")
///     .build()
///     .unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct ConversionConfig {
    /// Table-of-contents depth passed to pandoc as `--toc-depth`. Range: 1–6. Default: 2.
    ///
    /// Confluence pages rarely nest meaningfully below two heading levels, so
    /// depth 2 keeps the generated TOC short without losing section structure.
    pub toc_depth: u32,

    /// Base directory for the image-locator fallback. Default: the input
    /// document's parent directory.
    ///
    /// Exported pages embed attachment paths relative to the export root
    /// rather than the process working directory, so a locator that does not
    /// exist as given is retried joined onto this directory.
    pub resource_dir: Option<PathBuf>,

    /// Directory that resolved images are copied into (and that the rewritten
    /// `src` attributes are relative to). Default: the process working
    /// directory.
    pub image_dir: Option<PathBuf>,

    /// External converter executable. Default: `pandoc` (resolved via PATH).
    pub pandoc_program: PathBuf,

    /// What to do when an image locator resolves to no local file.
    /// Default: [`MissingImagePolicy::Skip`].
    pub missing_images: MissingImagePolicy,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            toc_depth: 2,
            resource_dir: None,
            image_dir: None,
            pandoc_program: PathBuf::from("pandoc"),
            missing_images: MissingImagePolicy::default(),
        }
    }
}

impl ConversionConfig {
    /// Create a new builder for `ConversionConfig`.
    pub fn builder() -> ConversionConfigBuilder {
        ConversionConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`ConversionConfig`].
#[derive(Debug)]
pub struct ConversionConfigBuilder {
    config: ConversionConfig,
}

impl ConversionConfigBuilder {
    pub fn toc_depth(mut self, depth: u32) -> Self {
        self.config.toc_depth = depth;
        self
    }

    pub fn resource_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.resource_dir = Some(dir.into());
        self
    }

    pub fn image_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.image_dir = Some(dir.into());
        self
    }

    pub fn pandoc_program(mut self, program: impl Into<PathBuf>) -> Self {
        self.config.pandoc_program = program.into();
        self
    }

    pub fn missing_images(mut self, policy: MissingImagePolicy) -> Self {
        self.config.missing_images = policy;
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<ConversionConfig, Wiki2MdError> {
        let c = &self.config;
        if c.toc_depth < 1 || c.toc_depth > 6 {
            return Err(Wiki2MdError::InvalidConfig(format!(
                "TOC depth must be 1–6, got {}",
                c.toc_depth
            )));
        }
        if c.pandoc_program.as_os_str().is_empty() {
            return Err(Wiki2MdError::InvalidConfig(
                "Converter program must not be empty".into(),
            ));
        }
        Ok(self.config)
    }
}

/// What to do when an image locator resolves to no local file.
///
/// Both behaviours have been observed in the wild: skipping keeps the
/// conversion going and leaves the original (possibly remote) `src` in the
/// Markdown, while failing guarantees the output never references an image
/// the run did not vouch for. Skip is the default: an exported page commonly
/// mixes attachments with absolute web URLs that are valid as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingImagePolicy {
    /// Leave the element untouched, log a warning, record the skip. (default)
    #[default]
    Skip,
    /// Abort the run with [`Wiki2MdError::ImageNotFound`].
    Fail,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = ConversionConfig::default();
        assert_eq!(config.toc_depth, 2);
        assert_eq!(config.pandoc_program, PathBuf::from("pandoc"));
        assert_eq!(config.missing_images, MissingImagePolicy::Skip);
        assert!(config.resource_dir.is_none());
        assert!(config.image_dir.is_none());
    }

    #[test]
    fn builder_accepts_valid_depth() {
        let config = ConversionConfig::builder()
            .toc_depth(4)
            .build()
            .expect("valid config");
        assert_eq!(config.toc_depth, 4);
    }

    #[test]
    fn builder_rejects_zero_depth() {
        let err = ConversionConfig::builder().toc_depth(0).build().unwrap_err();
        assert!(err.to_string().contains("1–6"), "got: {err}");
    }

    #[test]
    fn builder_rejects_depth_above_six() {
        assert!(ConversionConfig::builder().toc_depth(7).build().is_err());
    }

    #[test]
    fn builder_rejects_empty_program() {
        let err = ConversionConfig::builder()
            .pandoc_program("")
            .build()
            .unwrap_err();
        assert!(matches!(err, Wiki2MdError::InvalidConfig(_)));
    }
}
