//! Report assembly and terminal styling.
//!
//! `report_markdown` builds the complete markdown document for a result:
//! header, converted summary, trends, purchase likelihood, sources.
//! Sections without data are omitted entirely, with no placeholders.
//! `markdown_lines` gives that document line-oriented styling for the TUI.

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::models::AnalysisResult;
use crate::parsers::report;

/// Assemble the full markdown report for a normalized result. The summary
/// field runs through the diagram converter; every other section renders
/// from structured data.
pub fn report_markdown(result: &AnalysisResult) -> String {
    let mut out = String::new();

    out.push_str("# Analysis Results\n\n");
    out.push_str(&format!("**Query**: {}\n\n", result.query));
    out.push_str(&format!(
        "{} Agent | {}{}\n\n",
        result.agent.label(),
        result.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
        if result.demo { " | demonstration data" } else { "" }
    ));

    let summary = report::to_markdown(&result.market.summary);
    let summary = summary.trim_end();
    if !summary.is_empty() {
        out.push_str(summary);
        out.push_str("\n\n");
    }

    if !result.market.trends.is_empty() {
        out.push_str("### Key Trends\n\n");
        for trend in &result.market.trends {
            out.push_str(&format!("- {}\n", trend));
        }
        out.push('\n');
    }

    if !result.market.competition.is_empty() {
        out.push_str(&format!("**Competition**: {}\n\n", result.market.competition));
    }
    if !result.market.market_size.is_empty() {
        out.push_str(&format!("**Market Size**: {}\n\n", result.market.market_size));
    }

    if let Some(likelihood) = &result.likelihood {
        out.push_str("## Purchase Likelihood\n\n");
        out.push_str(&format!("Score: **{}/100**\n\n", likelihood.score));
        for factor in &likelihood.factors {
            out.push_str(&format!("- {}\n", factor));
        }
        if !likelihood.factors.is_empty() {
            out.push('\n');
        }
        if !likelihood.recommendation.is_empty() {
            out.push_str(&format!("{}\n\n", likelihood.recommendation));
        }
    }

    if !result.sources.is_empty() {
        out.push_str("## Sources\n\n");
        for (idx, source) in result.sources.iter().enumerate() {
            out.push_str(&format!(
                "{}. [{}]({}) ({})\n",
                idx + 1,
                source.title,
                source.url,
                source.kind
            ));
        }
    }

    out.trim_end().to_string() + "\n"
}

/// Style one markdown document for the TUI, line by line. Only headings,
/// bullets, and table rows get styling; the documents are our own
/// `report_markdown` output.
pub fn markdown_lines(markdown: &str) -> Vec<Line<'static>> {
    markdown.lines().map(style_line).collect()
}

fn style_line(line: &str) -> Line<'static> {
    let bright = Style::default().fg(Color::Rgb(250, 250, 250));
    let accent = Style::default().fg(Color::Rgb(16, 185, 129));
    let muted = Style::default().fg(Color::Rgb(113, 113, 122));

    if let Some(title) = line.strip_prefix("# ") {
        Line::from(Span::styled(
            title.to_string(),
            accent.add_modifier(Modifier::BOLD),
        ))
    } else if let Some(title) = line.strip_prefix("## ") {
        Line::from(Span::styled(
            title.to_string(),
            bright.add_modifier(Modifier::BOLD),
        ))
    } else if let Some(title) = line.strip_prefix("### ") {
        Line::from(Span::styled(title.to_string(), bright.add_modifier(Modifier::BOLD)))
    } else if line.starts_with('|') {
        Line::from(Span::styled(line.to_string(), muted))
    } else if let Some(item) = line.strip_prefix("- ") {
        Line::from(vec![Span::styled("• ".to_string(), accent), Span::raw(item.to_string())])
    } else if line.len() > 4 && line.starts_with("**") && line.ends_with("**") {
        Line::from(Span::styled(
            line.trim_matches('*').to_string(),
            bright.add_modifier(Modifier::BOLD),
        ))
    } else {
        Line::from(line.to_string())
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::models::{
        AgentKind, MarketAnalysis, PurchaseLikelihood, SessionInfo, Source,
    };

    fn full_result() -> AnalysisResult {
        AnalysisResult {
            query: "Pixel 9 Pro review".to_string(),
            agent: AgentKind::Product,
            timestamp: Utc.with_ymd_and_hms(2025, 7, 1, 12, 0, 0).unwrap(),
            market: MarketAnalysis {
                summary: "╔╗\n║ PRODUCT MARKET ANALYSIS ║\n╚╝\nStrong potential.".to_string(),
                trends: vec!["High demand".to_string(), "Growing segment".to_string()],
                competition: "Moderate competition".to_string(),
                market_size: "$2.5B globally".to_string(),
            },
            likelihood: Some(PurchaseLikelihood {
                score: 78,
                factors: vec!["Competitive pricing".to_string()],
                recommendation: "High likelihood of purchase success".to_string(),
            }),
            sources: vec![Source {
                title: "Market Research Report".to_string(),
                url: "https://example.com/report".to_string(),
                kind: "report".to_string(),
            }],
            session: Some(SessionInfo { active: true, product: "Pixel 9".to_string() }),
            demo: false,
        }
    }

    #[test]
    fn test_report_includes_every_populated_section() {
        let markdown = report_markdown(&full_result());

        assert!(markdown.contains("# Analysis Results"));
        assert!(markdown.contains("**Query**: Pixel 9 Pro review"));
        assert!(markdown.contains("PRODUCT Agent | 2025-07-01 12:00:00 UTC"));
        assert!(markdown.contains("## PRODUCT MARKET ANALYSIS"));
        assert!(markdown.contains("Strong potential."));
        assert!(markdown.contains("### Key Trends"));
        assert!(markdown.contains("- High demand"));
        assert!(markdown.contains("**Competition**: Moderate competition"));
        assert!(markdown.contains("**Market Size**: $2.5B globally"));
        assert!(markdown.contains("## Purchase Likelihood"));
        assert!(markdown.contains("Score: **78/100**"));
        assert!(markdown.contains("High likelihood of purchase success"));
        assert!(markdown.contains("## Sources"));
        assert!(
            markdown.contains("1. [Market Research Report](https://example.com/report) (report)")
        );
    }

    #[test]
    fn test_summary_diagrams_are_converted() {
        let markdown = report_markdown(&full_result());
        assert!(!markdown.contains('╔'));
        assert!(!markdown.contains('║'));
    }

    #[test]
    fn test_missing_sources_section_is_omitted() {
        let mut result = full_result();
        result.sources.clear();

        let markdown = report_markdown(&result);
        assert!(!markdown.contains("## Sources"));
        // Every other section is intact
        assert!(markdown.contains("## Purchase Likelihood"));
        assert!(markdown.contains("### Key Trends"));
    }

    #[test]
    fn test_missing_likelihood_section_is_omitted() {
        let mut result = full_result();
        result.likelihood = None;

        let markdown = report_markdown(&result);
        assert!(!markdown.contains("## Purchase Likelihood"));
        assert!(markdown.contains("## Sources"));
    }

    #[test]
    fn test_empty_trends_and_figures_are_omitted() {
        let mut result = full_result();
        result.market.trends.clear();
        result.market.competition.clear();
        result.market.market_size.clear();

        let markdown = report_markdown(&result);
        assert!(!markdown.contains("### Key Trends"));
        assert!(!markdown.contains("**Competition**"));
        assert!(!markdown.contains("**Market Size**"));
    }

    #[test]
    fn test_demo_results_are_labeled() {
        let mut result = full_result();
        result.demo = true;
        assert!(report_markdown(&result).contains("demonstration data"));
    }

    #[test]
    fn test_markdown_lines_counts_match() {
        let markdown = "# Title\nplain\n- bullet\n| a | b |";
        let lines = markdown_lines(markdown);
        assert_eq!(lines.len(), 4);
    }

    #[test]
    fn test_heading_line_is_bold() {
        let lines = markdown_lines("## Heading");
        let span = &lines[0].spans[0];
        assert_eq!(span.content, "Heading");
        assert!(span.style.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn test_bullet_line_is_split_into_marker_and_text() {
        let lines = markdown_lines("- item text");
        assert_eq!(lines[0].spans.len(), 2);
        assert_eq!(lines[0].spans[1].content, "item text");
    }
}
