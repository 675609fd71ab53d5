//! CLI binary for wiki2md.
//!
//! A thin shim over the library crate that maps CLI flags
//! to `ConversionConfig` and prints results.

use anyhow::{Context, Result};
use clap::Parser;
use std::io;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use wiki2md::{convert, inspect, ConversionConfig, MissingImagePolicy};

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn yellow(s: &str) -> String {
    format!("\x1b[33m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Basic conversion
  wiki2md SEW/page.html page.md

  # Deeper table of contents
  wiki2md --toc-depth 3 SEW/page.html page.md

  # Copy images somewhere other than the working directory
  wiki2md --image-dir docs/images SEW/page.html docs/page.md

  # Abort if an attachment referenced by the page is missing
  wiki2md --fail-on-missing-image SEW/page.html page.md

  # Look at the document structure without converting
  wiki2md --inspect-only SEW/page.html

  # Machine-readable run report
  wiki2md --json SEW/page.html page.md

REQUIREMENTS:
  pandoc must be installed and on PATH (https://pandoc.org/installing.html),
  or pointed at with --pandoc / WIKI2MD_PANDOC.

ENVIRONMENT VARIABLES:
  WIKI2MD_TOC_DEPTH     Table-of-contents depth (1-6)
  WIKI2MD_RESOURCE_DIR  Base directory for attachment lookup
  WIKI2MD_IMAGE_DIR     Destination directory for copied images
  WIKI2MD_PANDOC        Converter executable
"#;

/// Convert an exported Confluence wiki page (HTML) to GitHub-flavored Markdown.
#[derive(Parser, Debug)]
#[command(
    name = "wiki2md",
    version,
    about = "Convert an exported Confluence wiki page (HTML) to GitHub-flavored Markdown",
    long_about = "Convert one exported Confluence wiki page to clean GitHub-flavored Markdown. \
Site chrome (breadcrumbs, footer, metadata banners, attachment sections) is stripped and local \
attachment images are copied and renamed before the page is piped through pandoc.",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Exported HTML input file.
    html: PathBuf,

    /// Write output to this Markdown path.
    #[arg(required_unless_present = "inspect_only")]
    markdown: Option<PathBuf>,

    /// Table-of-contents depth (1-6).
    #[arg(long, env = "WIKI2MD_TOC_DEPTH", default_value_t = 2,
          value_parser = clap::value_parser!(u32).range(1..=6))]
    toc_depth: u32,

    /// Base directory for attachment lookup (default: the input's directory).
    #[arg(long, env = "WIKI2MD_RESOURCE_DIR")]
    resource_dir: Option<PathBuf>,

    /// Directory copied images are written to (default: the working directory).
    #[arg(long, env = "WIKI2MD_IMAGE_DIR")]
    image_dir: Option<PathBuf>,

    /// Converter executable.
    #[arg(long, env = "WIKI2MD_PANDOC", default_value = "pandoc")]
    pandoc: PathBuf,

    /// Treat an image that cannot be resolved locally as a fatal error
    /// instead of leaving the reference untouched.
    #[arg(long, env = "WIKI2MD_FAIL_ON_MISSING_IMAGE")]
    fail_on_missing_image: bool,

    /// Print the document structure (title, headings, images), convert nothing.
    #[arg(long)]
    inspect_only: bool,

    /// Output the run report (or inspection summary) as JSON.
    #[arg(long, env = "WIKI2MD_JSON")]
    json: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "WIKI2MD_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, env = "WIKI2MD_QUIET")]
    quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    let filter = if cli.quiet {
        "error"
    } else if cli.verbose {
        "debug"
    } else {
        "info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    // ── Inspect-only mode ────────────────────────────────────────────────
    if cli.inspect_only {
        let summary = inspect(&cli.html).context("Failed to inspect document")?;

        if cli.json {
            println!(
                "{}",
                serde_json::to_string_pretty(&summary).context("Failed to serialize summary")?
            );
        } else {
            println!("File:          {}", cli.html.display());
            if let Some(ref t) = summary.title {
                println!("Title:         {}", t);
            }
            println!("Images:        {}", summary.image_count);
            println!("Chrome blocks: {}", summary.chrome_blocks);
            println!("Outline:");
            for h in &summary.headings {
                println!("  {}{}", "  ".repeat(h.level.saturating_sub(1) as usize), h.text);
            }
        }
        return Ok(());
    }

    // ── Build config ─────────────────────────────────────────────────────
    let mut builder = ConversionConfig::builder()
        .toc_depth(cli.toc_depth)
        .pandoc_program(&cli.pandoc)
        .missing_images(if cli.fail_on_missing_image {
            MissingImagePolicy::Fail
        } else {
            MissingImagePolicy::Skip
        });
    if let Some(ref dir) = cli.resource_dir {
        builder = builder.resource_dir(dir);
    }
    if let Some(ref dir) = cli.image_dir {
        builder = builder.image_dir(dir);
    }
    let config = builder.build().context("Invalid configuration")?;

    // ── Run conversion ───────────────────────────────────────────────────
    let markdown_path = cli
        .markdown
        .as_ref()
        .context("Missing MARKDOWN output path")?;

    let report = convert(&cli.html, markdown_path, &config).context("Conversion failed")?;

    if cli.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&report).context("Failed to serialize report")?
        );
    } else if !cli.quiet {
        eprintln!(
            "{}  {} blocks removed, {} images copied  {}  →  {}",
            if report.stats.images_skipped == 0 {
                green("✔")
            } else {
                yellow("⚠")
            },
            report.stats.blocks_removed,
            report.stats.images_copied,
            dim(&format!("{}ms", report.stats.total_duration_ms)),
            bold(&markdown_path.display().to_string()),
        );
        for skipped in &report.skipped_images {
            eprintln!("   {} unresolved image: {}", yellow("⚠"), skipped.src);
        }
    }

    Ok(())
}
