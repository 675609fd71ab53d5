//! Image path resolution and destination naming.
//!
//! Exported pages reference attachments with paths relative to the export
//! root, while the conversion usually runs from somewhere else entirely.
//! [`resolve_image`] tries the locator as given first, then joined onto the
//! resource directory. [`rename_image`] turns the element's free-text `alt`
//! label into a flat, human-readable destination file name that keeps the
//! source file's extension.

use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Return a path where `src` exists locally, else `None`.
///
/// The two-step fallback exists because exported documents sometimes embed
/// paths relative to the document's own directory rather than the process's
/// working directory. An empty locator is treated the same as an absent one.
pub fn resolve_image(src: Option<&str>, resource_dir: &Path) -> Option<PathBuf> {
    let src = src?;
    if src.is_empty() {
        return None;
    }

    let literal = PathBuf::from(src);
    if literal.is_file() {
        debug!("image '{}' found as given", src);
        return Some(literal);
    }

    let joined = resource_dir.join(&literal);
    if joined.is_file() {
        debug!("image '{}' found at {}", src, joined.display());
        return Some(joined);
    }

    info!("image '{}' not found locally", src);
    None
}

/// Compute a destination file name (a bare name, not a path) for a resolved
/// image.
///
/// Without a label the source base name is kept unchanged. With a label,
/// spaces become underscores and forward slashes are removed (a slash in a
/// free-text label must not create directories), then the source extension is
/// appended unless the label already ends with it. A label that reduces to
/// the empty string falls back to the source base name.
pub fn rename_image(src: &Path, alt: Option<&str>) -> PathBuf {
    let base = src
        .file_name()
        .map(PathBuf::from)
        .unwrap_or_else(|| src.to_path_buf());

    let Some(alt) = alt.filter(|a| !a.is_empty()) else {
        return base;
    };

    let cleaned = alt.replace(' ', "_").replace('/', "");
    if cleaned.is_empty() {
        return base;
    }

    let mut dst = PathBuf::from(cleaned);
    if dst.extension() != base.extension() {
        if let Some(ext) = base.extension() {
            let mut name = dst.into_os_string();
            name.push(".");
            name.push(ext);
            dst = PathBuf::from(name);
        }
    }
    dst
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_alt_keeps_base_name() {
        let dst = rename_image(Path::new("SEW/attachments/1234.jpg"), None);
        assert_eq!(dst, PathBuf::from("1234.jpg"));
    }

    #[test]
    fn alt_becomes_name_with_extension() {
        let dst = rename_image(Path::new("SEW/attachments/1234.jpg"), Some("Big Blue World"));
        assert_eq!(dst, PathBuf::from("Big_Blue_World.jpg"));
    }

    #[test]
    fn alt_slashes_are_removed() {
        let dst = rename_image(Path::new("a/b.png"), Some("x/y z"));
        assert_eq!(dst, PathBuf::from("xy_z.png"));
    }

    #[test]
    fn rename_is_idempotent() {
        let src = Path::new("SEW/attachments/1234.jpg");
        let once = rename_image(src, Some("Big Blue World"));
        let twice = rename_image(src, once.to_str());
        assert_eq!(once, twice, "feeding the output back must not double the extension");
    }

    #[test]
    fn alt_of_only_slashes_falls_back_to_base_name() {
        let dst = rename_image(Path::new("a/1234.jpg"), Some("///"));
        assert_eq!(dst, PathBuf::from("1234.jpg"));
    }

    #[test]
    fn empty_alt_is_treated_as_absent() {
        let dst = rename_image(Path::new("a/1234.jpg"), Some(""));
        assert_eq!(dst, PathBuf::from("1234.jpg"));
    }

    #[test]
    fn source_without_extension_keeps_label_as_is() {
        let dst = rename_image(Path::new("attachments/thumbnail"), Some("Front Page"));
        assert_eq!(dst, PathBuf::from("Front_Page"));
    }

    #[test]
    fn dotted_label_still_gets_real_extension() {
        let dst = rename_image(Path::new("a/chart.png"), Some("Release v1.2"));
        assert_eq!(dst, PathBuf::from("Release_v1.2.png"));
    }

    #[test]
    fn resolve_absent_and_empty_locators() {
        let dir = tempfile::tempdir().expect("tempdir");
        assert_eq!(resolve_image(None, dir.path()), None);
        assert_eq!(resolve_image(Some(""), dir.path()), None);
    }

    #[test]
    fn resolve_prefers_literal_path() {
        let dir = tempfile::tempdir().expect("tempdir");
        let literal = dir.path().join("pic.png");
        std::fs::write(&literal, b"png").expect("write fixture");

        let resolved = resolve_image(literal.to_str(), Path::new("/nonexistent"));
        assert_eq!(resolved, Some(literal));
    }

    #[test]
    fn resolve_falls_back_to_resource_dir() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::create_dir(dir.path().join("attachments")).expect("mkdir");
        let actual = dir.path().join("attachments/pic.png");
        std::fs::write(&actual, b"png").expect("write fixture");

        let resolved = resolve_image(Some("attachments/pic.png"), dir.path());
        assert_eq!(resolved, Some(actual));
    }

    #[test]
    fn resolve_returns_none_when_neither_exists() {
        let dir = tempfile::tempdir().expect("tempdir");
        assert_eq!(resolve_image(Some("attachments/pic.png"), dir.path()), None);
    }
}
