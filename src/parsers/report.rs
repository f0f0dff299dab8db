//! Converts terminal-style analysis reports into markdown.
//!
//! Backend agents decorate their reports with box-drawing banners and
//! tree-style key/value listings. This module rewrites those diagrams as
//! markdown so a single renderer can display decorated and plain responses
//! uniformly.
//!
//! # Recognized structures
//!
//! ```text
//! ╔══════════════════════╗
//! ║   STOCK ANALYSIS     ║      ->  ## STOCK ANALYSIS
//! ╚══════════════════════╝
//!
//! 📊 REAL-TIME DATA:           ->  ### REAL-TIME DATA
//!
//! ┌──────────────────────┐
//! │  Tesla Inc (TSLA)    │      ->  **Tesla Inc (TSLA)**
//! ├─ Price: $248.50              ->  | Metric | Value |
//! └──────────────────────┘           | Price  | $248.50 |
//! ```
//!
//! Inputs without any diagram markers are returned unchanged. The pass is a
//! single left-to-right scan with one line of lookahead, driven by a
//! two-state classifier (`Idle` / `InTable`) so the precedence between line
//! kinds stays testable in isolation. Malformed lines degrade to plain
//! passthrough or are dropped; the conversion never fails.

/// Glyphs that mark a subsection header when they lead a line.
const SECTION_GLYPHS: [char; 4] = ['📋', '📊', '💰', '📈'];

/// Corner and branch glyphs whose presence anywhere in the input triggers
/// diagram conversion.
const DIAGRAM_MARKERS: [char; 9] = ['╔', '╗', '╚', '╝', '┌', '┐', '└', '┘', '├'];

/// Every border-drawing glyph the backend agents emit, including the rounded
/// corners used by older demo banners.
const BORDER_CHARS: [char; 20] = [
    '═', '─', '│', '║', '╔', '╗', '╚', '╝', '┌', '┐', '└', '┘', '├', '┤', '┬', '┴', '╭', '╮',
    '╰', '╯',
];

/// Classification of a single input line.
#[derive(Debug, Clone, PartialEq, Eq)]
enum LineKind {
    /// Top border of a double-line header box (`╔ … ╗`)
    BoxTop,
    /// Glyph-prefixed subsection header, carrying the stripped title
    Section(String),
    /// Top border of a single-line table block (`┌ …`)
    TableOpen,
    /// `├─ key: value` / `└─ key: value` row candidate that split cleanly
    TreeEntry(String, String),
    /// Bottom border of a table block (`└ …` that is not a row)
    TableClose,
    /// Line made only of border glyphs and whitespace
    BorderOnly,
    /// Anything else: passes through
    Plain,
}

/// Classify one line. Order matters: tree rows are recognized before table
/// borders so that `└─ Volume: 500` counts as a row while `└──┘` closes the
/// block.
fn classify(line: &str) -> LineKind {
    let trimmed = line.trim();

    if trimmed.contains('╔') && trimmed.contains('╗') {
        return LineKind::BoxTop;
    }
    if let Some(title) = section_title(trimmed) {
        return LineKind::Section(title);
    }
    if let Some((key, value)) = tree_entry(trimmed) {
        return LineKind::TreeEntry(key, value);
    }
    if trimmed.contains('└') {
        return LineKind::TableClose;
    }
    if trimmed.contains('┌') {
        return LineKind::TableOpen;
    }
    if is_border_only(trimmed) {
        return LineKind::BorderOnly;
    }
    LineKind::Plain
}

/// Extract a subsection title from a glyph-prefixed line, dropping one
/// trailing colon. Returns None when the line does not start with a section
/// glyph or nothing remains after stripping.
fn section_title(trimmed: &str) -> Option<String> {
    let glyph = SECTION_GLYPHS.iter().find(|g| trimmed.starts_with(**g))?;
    let rest = trimmed[glyph.len_utf8()..].trim();
    let rest = rest.strip_suffix(':').unwrap_or(rest).trim_end();
    if rest.is_empty() { None } else { Some(rest.to_string()) }
}

/// Try to read a `├─ key: value` / `└─ key: value` row. Both halves must be
/// non-empty after trimming; anything else is not a row.
fn tree_entry(trimmed: &str) -> Option<(String, String)> {
    let rest =
        trimmed.strip_prefix("├─").or_else(|| trimmed.strip_prefix("└─"))?;
    let rest = rest.trim_start_matches('─');
    let (key, value) = rest.split_once(':')?;
    let (key, value) = (key.trim(), value.trim());
    if key.is_empty() || value.is_empty() {
        return None;
    }
    Some((key.to_string(), value.to_string()))
}

fn is_border_only(trimmed: &str) -> bool {
    !trimmed.is_empty()
        && trimmed.chars().all(|c| c.is_whitespace() || BORDER_CHARS.contains(&c))
}

/// Strip the `║` bars from a header-box title line. Returns None when the
/// line carries no bar or nothing but bars.
fn box_title(line: &str) -> Option<String> {
    if !line.contains('║') {
        return None;
    }
    let title = line.replace('║', "");
    let title = title.trim();
    if title.is_empty() { None } else { Some(title.to_string()) }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Idle,
    InTable,
}

/// Accumulates output while tracking whether a table block is open.
struct ReportWriter {
    state: State,
    rows: Vec<(String, String)>,
    out: String,
}

impl ReportWriter {
    fn new() -> Self {
        Self { state: State::Idle, rows: Vec::new(), out: String::new() }
    }

    fn heading(&mut self, title: &str) {
        self.out.push_str("## ");
        self.out.push_str(title);
        self.out.push_str("\n\n");
    }

    fn section(&mut self, title: &str) {
        self.out.push_str("### ");
        self.out.push_str(title);
        self.out.push('\n');
    }

    fn open_table(&mut self) {
        // A second opening border without a close flushes the pending block
        if self.state == State::InTable {
            self.flush_rows();
        }
        self.state = State::InTable;
    }

    fn caption(&mut self, text: &str) {
        self.out.push_str("**");
        self.out.push_str(text);
        self.out.push_str("**\n\n");
    }

    fn row(&mut self, key: String, value: String) {
        self.rows.push((key, value));
    }

    fn close_table(&mut self) {
        self.flush_rows();
        self.state = State::Idle;
    }

    fn plain(&mut self, line: &str) {
        self.out.push_str(line.trim());
        self.out.push('\n');
    }

    fn flush_rows(&mut self) {
        if self.rows.is_empty() {
            return;
        }
        self.out.push_str("| Metric | Value |\n");
        self.out.push_str("|--------|-------|\n");
        for (key, value) in self.rows.drain(..) {
            self.out.push_str(&format!("| {} | {} |\n", key, value));
        }
        self.out.push('\n');
    }

    /// Rows without a closing border are flushed rather than dropped
    fn finish(mut self) -> String {
        self.flush_rows();
        self.out
    }
}

/// Rewrite box/tree diagrams in `content` as markdown.
///
/// Pure and infallible: identical input yields identical output, and inputs
/// without diagram markers come back unchanged.
pub fn to_markdown(content: &str) -> String {
    if !content.chars().any(|c| DIAGRAM_MARKERS.contains(&c)) {
        return content.to_string();
    }

    let lines: Vec<&str> = content.lines().collect();
    let mut writer = ReportWriter::new();
    let mut i = 0;

    while i < lines.len() {
        match classify(lines[i]) {
            LineKind::BoxTop => {
                // 3-line header box collapses to one level-2 heading
                if let Some(title) = lines.get(i + 1).and_then(|l| box_title(l)) {
                    writer.heading(&title);
                    i += 2;
                    if lines.get(i).is_some_and(|l| l.contains('╚')) {
                        i += 1;
                    }
                } else {
                    i += 1;
                }
            }
            LineKind::Section(title) => {
                writer.section(&title);
                i += 1;
            }
            LineKind::TableOpen => {
                writer.open_table();
                i += 1;
                // Lookahead: a plain line right after the border is the caption
                if let Some(next) = lines.get(i)
                    && classify(next) == LineKind::Plain
                {
                    let caption = next.replace('│', "");
                    let caption = caption.trim();
                    if !caption.is_empty() {
                        writer.caption(caption);
                        i += 1;
                    }
                }
            }
            LineKind::TreeEntry(key, value) => {
                writer.row(key, value);
                i += 1;
            }
            LineKind::TableClose => {
                writer.close_table();
                i += 1;
            }
            LineKind::BorderOnly => {
                i += 1;
            }
            LineKind::Plain => {
                writer.plain(lines[i]);
                i += 1;
            }
        }
    }

    writer.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_unchanged() {
        assert_eq!(to_markdown("plain text only"), "plain text only");
    }

    #[test]
    fn test_identity_preserves_whitespace_and_newlines() {
        let input = "line one\n\n  indented line\ntrailing spaces   \n";
        assert_eq!(to_markdown(input), input);
    }

    #[test]
    fn test_identity_for_markdown_input() {
        let input = "## Heading\n\n- bullet\n- another\n\n**bold** text";
        assert_eq!(to_markdown(input), input);
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(to_markdown(""), "");
    }

    #[test]
    fn test_header_box_collapses_to_heading() {
        let input = "╔══╗\n║ Title Here ║\n╚══╝";
        let output = to_markdown(input);
        assert!(output.contains("## Title Here\n\n"), "got: {output:?}");
        assert!(!output.contains('╔'));
        assert!(!output.contains('║'));
        assert!(!output.contains('╚'));
    }

    #[test]
    fn test_header_box_emits_exactly_one_heading() {
        let input = "╔══════╗\n║  COMPREHENSIVE STOCK ANALYSIS  ║\n╚══════╝\n\nprose";
        let output = to_markdown(input);
        assert_eq!(output.matches("##").count(), 1);
        assert!(output.contains("## COMPREHENSIVE STOCK ANALYSIS"));
        assert!(output.contains("prose"));
    }

    #[test]
    fn test_header_box_without_title_line_is_dropped() {
        let input = "╔══╗\nplain follows\n╚══╝";
        let output = to_markdown(input);
        assert!(!output.contains("##"));
        assert!(output.contains("plain follows"));
        assert!(!output.contains('╚'));
    }

    #[test]
    fn test_section_glyphs_become_level_three_headings() {
        let input = "╔╗\n📊 REAL-TIME STOCK DATA:\n💰 CURRENT TRADING SESSION:\n📈 OUTLOOK:\n📋 QUERY: Tesla stock";
        let output = to_markdown(input);
        assert!(output.contains("### REAL-TIME STOCK DATA\n"));
        assert!(output.contains("### CURRENT TRADING SESSION\n"));
        assert!(output.contains("### OUTLOOK\n"));
        // Only a trailing colon is stripped, not interior ones
        assert!(output.contains("### QUERY: Tesla stock\n"));
    }

    #[test]
    fn test_unlisted_glyph_passes_through() {
        let input = "├┤\n🏷️  CATEGORY: PRODUCT";
        let output = to_markdown(input);
        assert!(output.contains("🏷️  CATEGORY: PRODUCT"));
        assert!(!output.contains("###"));
    }

    #[test]
    fn test_table_block_with_caption_and_rows() {
        let input = "┌──┐\nCaption\n├─ Price: $10\n├─ Volume: 500\n└──┘";
        let output = to_markdown(input);
        assert!(output.contains("**Caption**"), "got: {output:?}");
        let table_pos = output.find("| Metric | Value |").expect("table header");
        assert!(output.find("**Caption**").unwrap() < table_pos);
        assert!(output.contains("|--------|-------|"));
        assert!(output.contains("| Price | $10 |"));
        assert!(output.contains("| Volume | 500 |"));
        assert!(!output.contains('┌'));
        assert!(!output.contains('└'));
    }

    #[test]
    fn test_rows_keep_original_order() {
        let input = "┌┐\n├─ Third: c\n├─ First: a\n├─ Second: b\n└┘";
        let output = to_markdown(input);
        let third = output.find("| Third | c |").unwrap();
        let first = output.find("| First | a |").unwrap();
        let second = output.find("| Second | b |").unwrap();
        assert!(third < first && first < second);
    }

    #[test]
    fn test_last_branch_row_is_captured_not_treated_as_close() {
        let input = "┌┐\n├─ Price: $248.50\n└─ Volume: 45,230,000\n└──┘";
        let output = to_markdown(input);
        assert!(output.contains("| Price | $248.50 |"));
        assert!(output.contains("| Volume | 45,230,000 |"));
    }

    #[test]
    fn test_value_splits_on_first_colon_only() {
        let input = "┌┐\n├─ Window: 09:30 - 16:00\n└┘";
        let output = to_markdown(input);
        assert!(output.contains("| Window | 09:30 - 16:00 |"));
    }

    #[test]
    fn test_tree_line_without_colon_contributes_no_row() {
        let input = "┌┐\n├─ no separator here\n├─ Price: $10\n└┘";
        let output = to_markdown(input);
        assert!(!output.contains("no separator"));
        assert!(output.contains("| Price | $10 |"));
        assert_eq!(output.matches("| Metric | Value |").count(), 1);
    }

    #[test]
    fn test_tree_line_with_empty_key_or_value_is_dropped() {
        let input = "┌┐\n├─ : orphan value\n├─ orphan key:\n├─ Kept: yes\n└┘";
        let output = to_markdown(input);
        assert!(!output.contains("orphan"));
        assert!(output.contains("| Kept | yes |"));
    }

    #[test]
    fn test_unterminated_table_flushes_at_end_of_input() {
        let input = "┌──┐\n├─ Price: $10\n├─ Volume: 500";
        let output = to_markdown(input);
        assert!(output.contains("| Metric | Value |"));
        assert!(output.contains("| Price | $10 |"));
        assert!(output.contains("| Volume | 500 |"));
    }

    #[test]
    fn test_empty_table_block_emits_nothing() {
        let input = "┌──┐\n└──┘\nafter";
        let output = to_markdown(input);
        assert!(!output.contains("| Metric | Value |"));
        assert!(output.contains("after"));
    }

    #[test]
    fn test_separator_rules_are_dropped() {
        let input = "├┤\nbefore\n═══════════════\n───────────────\nafter";
        let output = to_markdown(input);
        assert!(!output.contains('═'));
        assert!(!output.contains('─'));
        assert!(output.contains("before"));
        assert!(output.contains("after"));
    }

    #[test]
    fn test_rounded_border_lines_are_dropped() {
        let input = "╔╗\n╭────╮\n╰────╯";
        let output = to_markdown(input);
        assert!(!output.contains('╭'));
        assert!(!output.contains('╰'));
    }

    #[test]
    fn test_plain_lines_trimmed_but_internal_spacing_kept() {
        let input = "╔╗\n   1. **Current Performance**:  +5.20% gain   ";
        let output = to_markdown(input);
        assert!(output.contains("1. **Current Performance**:  +5.20% gain\n"));
    }

    #[test]
    fn test_blank_lines_preserved_between_prose() {
        let input = "╔╗\nfirst paragraph\n\nsecond paragraph";
        let output = to_markdown(input);
        assert!(output.contains("first paragraph\n\nsecond paragraph"));
    }

    #[test]
    fn test_full_stock_report_conversion() {
        let input = "\
╔══════════════════════════════════════╗
║     COMPREHENSIVE STOCK ANALYSIS     ║
╚══════════════════════════════════════╝

📋 QUERY: Tesla stock price

📊 REAL-TIME STOCK DATA:
┌──────────────────────────────────────┐
│  Tesla Inc (TSLA)                    │
└──────────────────────────────────────┘

💰 CURRENT TRADING SESSION:
┌┐
   ├─ Current Price: $248.50
   ├─ Change: $+12.30 (+5.20%)
   └─ Volume: 45,230,000
└┘

📈 COMPREHENSIVE ANALYSIS:
Based on the data, momentum is strong.

═══════════════════════════════════════
Real-time Stock Data | Yahoo Finance
═══════════════════════════════════════";
        let output = to_markdown(input);
        assert!(output.contains("## COMPREHENSIVE STOCK ANALYSIS"));
        assert!(output.contains("### QUERY: Tesla stock price"));
        assert!(output.contains("### REAL-TIME STOCK DATA"));
        assert!(output.contains("**Tesla Inc (TSLA)**"));
        assert!(output.contains("| Current Price | $248.50 |"));
        assert!(output.contains("| Change | $+12.30 (+5.20%) |"));
        assert!(output.contains("| Volume | 45,230,000 |"));
        assert!(output.contains("Based on the data, momentum is strong."));
        assert!(output.contains("Real-time Stock Data | Yahoo Finance"));
        for c in DIAGRAM_MARKERS {
            assert!(!output.contains(c), "marker {c} survived: {output}");
        }
    }

    #[test]
    fn test_idempotent_on_own_output() {
        let input = "╔╗\n║ Title ║\n╚╝\n┌┐\n├─ A: 1\n└┘";
        let once = to_markdown(input);
        assert_eq!(to_markdown(&once), once);
    }

    // classifier precedence, checked in isolation
    #[test]
    fn test_classify_box_top() {
        assert_eq!(classify("╔══════╗"), LineKind::BoxTop);
    }

    #[test]
    fn test_classify_section_before_plain() {
        assert_eq!(
            classify("📊 MARKET ANALYSIS:"),
            LineKind::Section("MARKET ANALYSIS".to_string())
        );
    }

    #[test]
    fn test_classify_tree_entry_beats_table_close() {
        assert_eq!(
            classify("└─ Volume: 500"),
            LineKind::TreeEntry("Volume".to_string(), "500".to_string())
        );
        assert_eq!(classify("└──┘"), LineKind::TableClose);
    }

    #[test]
    fn test_classify_bare_glyph_line_is_not_a_section() {
        assert_eq!(classify("📊"), LineKind::Plain);
    }

    #[test]
    fn test_classify_border_only() {
        assert_eq!(classify("═══════"), LineKind::BorderOnly);
        assert_eq!(classify("║      ║"), LineKind::BorderOnly);
        assert_eq!(classify("│  text  │"), LineKind::Plain);
    }

    #[test]
    fn test_classify_indented_tree_entry() {
        assert_eq!(
            classify("   ├─ Today's Open: $236.20"),
            LineKind::TreeEntry("Today's Open".to_string(), "$236.20".to_string())
        );
    }
}
