//! Converter invocation: stream the filtered document through pandoc.
//!
//! The document is serialized to bytes and piped into the converter's stdin;
//! stdout is redirected straight to the destination file, byte-for-byte —
//! no post-processing. Invariant for the pipe protocol: stdin is fully
//! written **and closed** before waiting on the child, otherwise both sides
//! can block on a full pipe buffer.
//!
//! `--no-highlight` drops the export's `syntaxhighlighter-pre` language
//! annotations, which are neither useful nor portable. `--extract-media` is
//! deliberately not used because it would download images whose `src` is a
//! URL; only locally existing attachments are copied, by the filter stage.

use crate::config::ConversionConfig;
use crate::error::Wiki2MdError;
use kuchiki::NodeRef;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};
use tracing::{debug, info};

/// The fixed converter argument set: suppress embedded comments, produce a
/// standalone document, disable syntax-highlighting annotations, emit a table
/// of contents at the configured depth, read HTML with native div/span
/// handling disabled, and write GitHub-flavored Markdown.
pub fn pandoc_args(toc_depth: u32) -> Vec<String> {
    vec![
        "--strip-comments".into(),
        "--standalone".into(),
        "--no-highlight".into(),
        "--toc".into(),
        format!("--toc-depth={toc_depth}"),
        "--from".into(),
        "html-native_divs-native_spans".into(),
        "--to".into(),
        "gfm".into(),
    ]
}

/// Run the document through the converter, writing Markdown to `output`.
///
/// A missing converter executable or a non-zero exit is fatal; on failure the
/// partially written output file is removed so a broken run never leaves a
/// plausible-looking Markdown file behind.
pub fn write_markdown(
    doc: &NodeRef,
    output: &Path,
    config: &ConversionConfig,
) -> Result<(), Wiki2MdError> {
    let mut html = Vec::new();
    doc.serialize(&mut html)
        .map_err(|e| Wiki2MdError::Internal(format!("document serialization failed: {e}")))?;
    debug!("serialized document: {} bytes", html.len());

    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| Wiki2MdError::OutputWriteFailed {
                path: output.to_path_buf(),
                source: e,
            })?;
        }
    }
    let out_file = File::create(output).map_err(|e| Wiki2MdError::OutputWriteFailed {
        path: output.to_path_buf(),
        source: e,
    })?;

    let result = run_converter(&html, out_file, config);
    if result.is_err() {
        // Whatever the converter managed to write is at best a fragment.
        let _ = std::fs::remove_file(output);
    }
    result
}

fn run_converter(html: &[u8], out_file: File, config: &ConversionConfig) -> Result<(), Wiki2MdError> {
    let args = pandoc_args(config.toc_depth);
    info!(
        "running converter: {} {}",
        config.pandoc_program.display(),
        args.join(" ")
    );

    let mut child = Command::new(&config.pandoc_program)
        .args(&args)
        .stdin(Stdio::piped())
        .stdout(Stdio::from(out_file))
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Wiki2MdError::ConverterNotFound {
                    program: config.pandoc_program.clone(),
                }
            } else {
                Wiki2MdError::ConverterIo { source: e }
            }
        })?;

    // Write the whole document, then drop the handle to close the pipe.
    // A broken pipe means the child already exited; fall through so the
    // exit status (and its stderr) is what gets reported.
    if let Some(mut stdin) = child.stdin.take() {
        match stdin.write_all(html) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::BrokenPipe => {}
            Err(e) => return Err(Wiki2MdError::ConverterIo { source: e }),
        }
    }

    let out = child
        .wait_with_output()
        .map_err(|e| Wiki2MdError::ConverterIo { source: e })?;

    if !out.status.success() {
        return Err(Wiki2MdError::ConverterFailed {
            status: out.status,
            stderr: String::from_utf8_lossy(&out.stderr).into_owned(),
        });
    }

    debug!("converter finished: {}", out.status);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use kuchiki::traits::TendrilSink;

    #[test]
    fn args_carry_configured_toc_depth() {
        let args = pandoc_args(3);
        assert!(args.contains(&"--toc-depth=3".to_string()));
        assert!(args.contains(&"--toc".to_string()));
    }

    #[test]
    fn args_declare_formats() {
        let args = pandoc_args(2);
        let joined = args.join(" ");
        assert!(joined.contains("--from html-native_divs-native_spans"));
        assert!(joined.contains("--to gfm"));
        assert!(joined.contains("--strip-comments"));
        assert!(joined.contains("--standalone"));
        assert!(joined.contains("--no-highlight"));
    }

    #[test]
    fn missing_program_surfaces_as_converter_not_found() {
        let dir = tempfile::tempdir().expect("tempdir");
        let doc = kuchiki::parse_html().one("<p>hi</p>");
        let config = ConversionConfig::builder()
            .pandoc_program("wiki2md-no-such-converter")
            .build()
            .expect("valid config");

        let err = write_markdown(&doc, &dir.path().join("out.md"), &config).unwrap_err();
        assert!(matches!(err, Wiki2MdError::ConverterNotFound { .. }), "got: {err}");
    }

    #[cfg(unix)]
    #[test]
    fn failing_program_surfaces_status_and_removes_output() {
        let dir = tempfile::tempdir().expect("tempdir");
        let out = dir.path().join("out.md");
        let doc = kuchiki::parse_html().one("<p>hi</p>");
        // `false` consumes nothing and exits 1 — a stand-in for a converter
        // rejecting its input.
        let config = ConversionConfig::builder()
            .pandoc_program("false")
            .build()
            .expect("valid config");

        let err = write_markdown(&doc, &out, &config).unwrap_err();
        assert!(matches!(err, Wiki2MdError::ConverterFailed { .. }), "got: {err}");
        assert!(!out.exists(), "failed run must not leave an output file");
    }

    #[cfg(unix)]
    #[test]
    fn passthrough_program_receives_serialized_document() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().expect("tempdir");
        let out = dir.path().join("out.md");
        let doc = kuchiki::parse_html().one("<p>round trip</p>");

        // A converter stand-in that ignores its flags and copies stdin to
        // stdout — the output file then holds exactly the piped bytes.
        let fake = dir.path().join("fake-converter.sh");
        std::fs::write(&fake, "#!/bin/sh\ncat\n").expect("write script");
        std::fs::set_permissions(&fake, std::fs::Permissions::from_mode(0o755))
            .expect("chmod script");

        let config = ConversionConfig::builder()
            .pandoc_program(&fake)
            .build()
            .expect("valid config");

        write_markdown(&doc, &out, &config).expect("pass-through must succeed");
        let written = std::fs::read_to_string(&out).expect("output exists");
        assert!(written.contains("<p>round trip</p>"), "got: {written}");
    }
}
