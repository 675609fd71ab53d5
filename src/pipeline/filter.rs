//! Document filtering: site-chrome removal and image localisation.
//!
//! Confluence's HTML export wraps the article body in navigation and metadata
//! markup that pandoc would faithfully render into the Markdown. Removing
//! those blocks before conversion is what makes the output clean. This is the
//! only stage that mutates the tree; everything it detaches is gone from the
//! serialized bytes the converter sees.

use crate::config::MissingImagePolicy;
use crate::error::Wiki2MdError;
use crate::output::{DocumentSummary, Heading, SkippedImage};
use crate::pipeline::images;
use kuchiki::{ElementData, NodeDataRef, NodeRef};
use std::path::Path;
use tracing::{debug, info, warn};

/// Selectors for the export's site-chrome blocks: the page-metadata banner,
/// the footer, the breadcrumb navigation, and the grouped attachment section.
pub const CHROME_SELECTORS: [&str; 4] = [
    "div.page-metadata",
    "div#footer",
    "div#breadcrumb-section",
    "div.pageSection.group",
];

const HEADING_SELECTOR: &str = "h1,h2,h3,h4,h5,h6";

/// What [`filter_document`] did to the tree.
#[derive(Debug, Default)]
pub struct FilterOutcome {
    pub blocks_removed: usize,
    pub images_copied: usize,
    pub skipped: Vec<SkippedImage>,
}

/// Modify the document in place to make it suitable for the converter.
///
/// Removes every element matching [`CHROME_SELECTORS`], then localises each
/// remaining `img`: resolve its `src` against `resource_dir`, copy the file
/// into `image_dir` under a name derived from the `alt` label, and rewrite
/// `src` to that bare name. Unresolved images are handled per `policy`; a
/// failed copy of a *resolved* image is always fatal.
pub fn filter_document(
    doc: &NodeRef,
    resource_dir: &Path,
    image_dir: &Path,
    policy: MissingImagePolicy,
) -> Result<FilterOutcome, Wiki2MdError> {
    for h in collect_headings(doc)? {
        debug!("heading h{}: {}", h.level, h.text);
    }

    let mut outcome = FilterOutcome::default();

    for selector in CHROME_SELECTORS {
        for el in select_all(doc, selector)? {
            {
                let attrs = el.attributes.borrow();
                debug!(
                    "deleting <{}> id={:?} class={:?}",
                    el.name.local,
                    attrs.get("id"),
                    attrs.get("class")
                );
            }
            el.as_node().detach();
            outcome.blocks_removed += 1;
        }
    }

    for img in select_all(doc, "img")? {
        // Clone the attribute values out so the borrow is released before
        // the rewrite below.
        let (src, alt) = {
            let attrs = img.attributes.borrow();
            (
                attrs.get("src").map(str::to_owned),
                attrs.get("alt").map(str::to_owned),
            )
        };
        debug!("found img: alt={:?}, src={:?}", alt, src);

        let Some(resolved) = images::resolve_image(src.as_deref(), resource_dir) else {
            let src = src.unwrap_or_default();
            match policy {
                MissingImagePolicy::Skip => {
                    warn!("skipping unresolved image '{}'", src);
                    outcome.skipped.push(SkippedImage { src, alt });
                    continue;
                }
                MissingImagePolicy::Fail => {
                    let fallback = resource_dir.join(&src);
                    return Err(Wiki2MdError::ImageNotFound { src, fallback });
                }
            }
        };

        let dst_name = images::rename_image(&resolved, alt.as_deref());
        let dst_path = image_dir.join(&dst_name);
        info!("copying {} to {}", resolved.display(), dst_path.display());
        std::fs::copy(&resolved, &dst_path).map_err(|e| Wiki2MdError::ImageCopyFailed {
            src: resolved.clone(),
            dst: dst_path.clone(),
            source: e,
        })?;

        img.attributes
            .borrow_mut()
            .insert("src", dst_name.to_string_lossy().into_owned());
        outcome.images_copied += 1;
    }

    Ok(outcome)
}

/// Structural overview of an unfiltered document.
pub fn summarize(doc: &NodeRef) -> Result<DocumentSummary, Wiki2MdError> {
    let title = doc
        .select_first("title")
        .ok()
        .map(|t| t.text_contents().trim().to_owned())
        .filter(|t| !t.is_empty());

    let mut chrome_blocks = 0;
    for selector in CHROME_SELECTORS {
        chrome_blocks += select_all(doc, selector)?.len();
    }

    Ok(DocumentSummary {
        title,
        headings: collect_headings(doc)?,
        image_count: select_all(doc, "img")?.len(),
        chrome_blocks,
    })
}

/// Headings `h1`–`h6` in document order, with whitespace collapsed.
pub fn collect_headings(doc: &NodeRef) -> Result<Vec<Heading>, Wiki2MdError> {
    Ok(select_all(doc, HEADING_SELECTOR)?
        .iter()
        .map(|h| {
            let local: &str = &h.name.local;
            let level = local.get(1..).and_then(|s| s.parse().ok()).unwrap_or(6);
            let text = h
                .text_contents()
                .split_whitespace()
                .collect::<Vec<_>>()
                .join(" ");
            Heading { level, text }
        })
        .collect())
}

/// Collect all matches eagerly so callers can detach or rewrite nodes without
/// holding a live traversal over the tree.
fn select_all(
    doc: &NodeRef,
    selector: &str,
) -> Result<Vec<NodeDataRef<ElementData>>, Wiki2MdError> {
    Ok(doc
        .select(selector)
        .map_err(|()| Wiki2MdError::Internal(format!("invalid CSS selector: {selector}")))?
        .collect())
}
