//! Input resolution: validate the user-supplied path and parse the document.
//!
//! The HTML5 parsing algorithm recovers from any byte sequence, so "parse
//! failure" in practice means the file could not be opened or read. Those
//! cases are surfaced here with distinct errors before any processing starts.

use crate::error::Wiki2MdError;
use kuchiki::traits::TendrilSink;
use kuchiki::NodeRef;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Resolve a local input path, validating existence and readability.
pub fn resolve_input(path_str: impl AsRef<Path>) -> Result<PathBuf, Wiki2MdError> {
    let path = path_str.as_ref().to_path_buf();

    if !path.exists() {
        return Err(Wiki2MdError::InputNotFound { path });
    }

    // Check read permission by attempting to open.
    match std::fs::File::open(&path) {
        Ok(_) => {}
        Err(e) if e.kind() == std::io::ErrorKind::PermissionDenied => {
            return Err(Wiki2MdError::InputPermissionDenied { path });
        }
        Err(_) => {
            return Err(Wiki2MdError::InputNotFound { path });
        }
    }

    debug!("Resolved input document: {}", path.display());
    Ok(path)
}

/// Read the file at `path` and parse it into a document tree.
///
/// An implicit `<html>`, `<head>`, and `<body>` are synthesised when missing,
/// per the HTML5 specification.
pub fn load_document(path: &Path) -> Result<NodeRef, Wiki2MdError> {
    let html = std::fs::read_to_string(path).map_err(|e| Wiki2MdError::InputRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    debug!("Read {} bytes from {}", html.len(), path.display());
    Ok(kuchiki::parse_html().one(html.as_str()))
}

/// The directory image locators are resolved against when they do not exist
/// as given: the document's own directory.
pub fn default_resource_dir(html_path: &Path) -> PathBuf {
    html_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_input_is_not_found() {
        let err = resolve_input("/definitely/not/a/real/page.html").unwrap_err();
        assert!(matches!(err, Wiki2MdError::InputNotFound { .. }));
    }

    #[test]
    fn existing_input_resolves() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("page.html");
        std::fs::File::create(&path)
            .and_then(|mut f| f.write_all(b"<html></html>"))
            .expect("write fixture");

        let resolved = resolve_input(&path).expect("should resolve");
        assert_eq!(resolved, path);
    }

    #[test]
    fn load_parses_fragment_into_full_document() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("page.html");
        std::fs::write(&path, "<p>hello</p>").expect("write fixture");

        let doc = load_document(&path).expect("should parse");
        // html5 parsing synthesises the document skeleton
        assert!(doc.select_first("body").is_ok());
        assert_eq!(
            doc.select_first("p").expect("p").text_contents(),
            "hello"
        );
    }

    #[test]
    fn resource_dir_is_document_parent() {
        assert_eq!(
            default_resource_dir(Path::new("SEW/page.html")),
            PathBuf::from("SEW")
        );
        // A bare file name has no parent directory; fall back to cwd.
        assert_eq!(
            default_resource_dir(Path::new("page.html")),
            PathBuf::from(".")
        );
    }
}
