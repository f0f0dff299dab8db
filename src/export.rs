//! Paginated HTML snapshot of a rendered report.
//!
//! The exported artifact is a standalone, print-oriented HTML document: the
//! report markdown is cut into fixed-height pages, each converted with
//! pulldown-cmark and wrapped in a `<section class="page">`. The filename
//! derives from a sanitized prefix of the query text.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use pulldown_cmark::{Options, Parser, html};
use tracing::debug;

use crate::models::AnalysisResult;
use crate::render;

/// Lines of markdown per exported page.
const PAGE_LINES: usize = 48;

/// Maximum length of the sanitized filename stem.
const MAX_STEM_LEN: usize = 40;

/// Render `result` and write the paginated document into `out_dir`.
/// Returns the path of the written file.
pub fn export_report(result: &AnalysisResult, out_dir: &Path) -> Result<PathBuf> {
    let markdown = render::report_markdown(result);
    export_document(&markdown, &result.query, out_dir)
}

/// Write an already-assembled markdown report. Split out so callers that
/// keep the rendered document around do not pay for a second assembly.
pub fn export_document(markdown: &str, query: &str, out_dir: &Path) -> Result<PathBuf> {
    if markdown.trim().is_empty() {
        bail!("Report is empty, nothing to export");
    }

    let pages = paginate(markdown);
    let page_count = pages.len();
    let document = build_document(query, &pages);

    fs::create_dir_all(out_dir)
        .with_context(|| format!("Failed to create export directory: {}", out_dir.display()))?;
    let path = out_dir.join(format!("{}-report.html", filename_stem(query)));
    fs::write(&path, document)
        .with_context(|| format!("Failed to write export file: {}", path.display()))?;

    debug!(pages = page_count, path = %path.display(), "Report exported");
    Ok(path)
}

/// Sanitize the query into a filename stem: lowercase, alphanumerics kept,
/// everything else collapsed into single dashes, bounded length. Queries
/// with no usable characters fall back to `analysis`.
pub fn filename_stem(query: &str) -> String {
    let mut stem = String::new();
    let mut pending_dash = false;

    for c in query.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !stem.is_empty() {
                stem.push('-');
            }
            stem.push(c.to_ascii_lowercase());
            pending_dash = false;
        } else {
            pending_dash = true;
        }
        if stem.len() >= MAX_STEM_LEN {
            break;
        }
    }

    if stem.is_empty() { "analysis".to_string() } else { stem }
}

/// Cut the markdown into fixed-height page chunks and convert each to HTML.
fn paginate(markdown: &str) -> Vec<String> {
    let lines: Vec<&str> = markdown.lines().collect();
    lines.chunks(PAGE_LINES).map(|chunk| to_html(&chunk.join("\n"))).collect()
}

fn to_html(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    let parser = Parser::new_ext(markdown, options);
    let mut out = String::new();
    html::push_html(&mut out, parser);
    out
}

fn build_document(query: &str, pages: &[String]) -> String {
    let mut body = String::new();
    for page in pages {
        body.push_str("<section class=\"page\">\n");
        body.push_str(page);
        body.push_str("</section>\n");
    }

    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>Market analysis: {}</title>\n<style>\n{}\n</style>\n</head>\n<body>\n{}</body>\n</html>\n",
        html_escape(query),
        PAGE_STYLE,
        body
    )
}

/// Fixed page geometry for print; one `.page` section per page.
const PAGE_STYLE: &str = "\
@page { size: A4; margin: 20mm; }
body { font-family: sans-serif; line-height: 1.5; color: #18181b; }
.page { page-break-after: always; min-height: 240mm; padding: 8mm 0; }
.page:last-child { page-break-after: auto; }
table { border-collapse: collapse; }
th, td { border: 1px solid #a1a1aa; padding: 4px 10px; text-align: left; }";

fn html_escape(text: &str) -> String {
    text.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}
