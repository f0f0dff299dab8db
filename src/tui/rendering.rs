use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph, Wrap};

use super::app::{MessageType, StatusMessage, ViewMode};
use super::layout::AppLayout;
use super::timestamps::format_timestamp;
use crate::models::{SessionInfo, StatusReport};
use crate::session::Exchange;

const BRIGHT: Color = Color::Rgb(250, 250, 250);
const MUTED: Color = Color::Rgb(113, 113, 122);
const ACCENT: Color = Color::Rgb(16, 185, 129);
const ERROR: Color = Color::Rgb(239, 68, 68);
const BAR_BG: Color = Color::Rgb(24, 24, 27);

/// Everything the renderer needs about the current frame
pub struct RenderState<'a> {
    pub input: &'a str,
    pub busy: bool,
    pub view: ViewMode,
    pub report: &'a [Line<'static>],
    pub scroll: u16,
    pub session: Option<&'a SessionInfo>,
    pub history: &'a [Exchange],
    pub connectivity: Option<&'a StatusReport>,
    pub status_message: Option<&'a StatusMessage>,
}

/// Render the entire UI
pub fn render_ui(frame: &mut Frame, state: &RenderState) {
    let layout = AppLayout::new(frame.area());

    render_input(frame, layout.input_area, state);
    render_report(frame, layout.report_area, state);
    render_history(frame, layout.history_area, state);
    render_status_bar(frame, layout.status_area, state);
}

fn render_input(frame: &mut Frame, area: Rect, state: &RenderState) {
    let (title, border_style) = if state.busy {
        (" Analyzing… ", Style::default().fg(ACCENT))
    } else {
        (" Product query ", Style::default().fg(MUTED))
    };

    let content = if state.busy {
        Line::from(Span::styled(state.input.to_string(), Style::default().fg(MUTED)))
    } else {
        Line::from(vec![
            Span::styled(state.input.to_string(), Style::default().fg(BRIGHT)),
            Span::styled("▏", Style::default().fg(ACCENT)),
        ])
    };

    let paragraph = Paragraph::new(content)
        .block(Block::default().borders(Borders::ALL).border_style(border_style).title(title));

    frame.render_widget(paragraph, area);
}

fn render_report(frame: &mut Frame, area: Rect, state: &RenderState) {
    let title = match state.view {
        ViewMode::Report => " Report ",
        ViewMode::Terminal => " Raw output ",
    };

    let content = if state.report.is_empty() {
        Text::from(vec![
            Line::from(""),
            Line::from(Span::styled(
                "  Enter a product or market query above and press Enter.",
                Style::default().fg(MUTED),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "  Ctrl+T raw/report · Ctrl+Y copy · Ctrl+E export · Ctrl+L clear memory",
                Style::default().fg(MUTED),
            )),
        ])
    } else {
        Text::from(state.report.to_vec())
    };

    let paragraph = Paragraph::new(content)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(MUTED))
                .title(title),
        )
        .scroll((state.scroll, 0))
        .wrap(Wrap { trim: false });

    frame.render_widget(paragraph, area);
}

fn render_history(frame: &mut Frame, area: Rect, state: &RenderState) {
    // The pane title doubles as the memory banner
    let title = match state.session {
        Some(session) if session.active => format!(" Session: {} ", session.product),
        _ => " Conversation ".to_string(),
    };

    let items: Vec<ListItem> = if state.history.is_empty() {
        vec![ListItem::new("No follow-ups yet").style(Style::default().fg(MUTED))]
    } else {
        state
            .history
            .iter()
            .map(|exchange| {
                let query: String = exchange.query.chars().take(30).collect();
                let content =
                    format!("{} | {}", format_timestamp(&exchange.timestamp), query);
                ListItem::new(content).style(Style::default().fg(BRIGHT))
            })
            .collect()
    };

    let border_style = if state.session.is_some() {
        Style::default().fg(ACCENT)
    } else {
        Style::default().fg(MUTED)
    };

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).border_style(border_style).title(title));

    frame.render_widget(list, area);
}

fn render_status_bar(frame: &mut Frame, area: Rect, state: &RenderState) {
    let (text, style) = if let Some(msg) = state.status_message {
        let color = match msg.message_type {
            MessageType::Success => ACCENT,
            MessageType::Error => ERROR,
        };
        (format!(" {} ", msg.text), Style::default().fg(color).bg(BAR_BG))
    } else {
        (
            format!(
                " {} | Enter: analyze | Esc: clear | Ctrl+C: quit ",
                connectivity_summary(state.connectivity)
            ),
            Style::default().fg(BRIGHT).bg(BAR_BG),
        )
    };

    frame.render_widget(Paragraph::new(text).style(style), area);
}

fn connectivity_summary(status: Option<&StatusReport>) -> String {
    match status {
        Some(status) => format!(
            "Backend 🟢 | AWS {} | Google {} | News {}",
            indicator(status.aws, "🟢", "🔴"),
            indicator(status.google, "🟢", "🔴"),
            indicator(status.news, "🟢", "🟡"),
        ),
        None => "Backend 🔴 (offline)".to_string(),
    }
}

fn indicator(up: bool, on: &'static str, off: &'static str) -> &'static str {
    if up { on } else { off }
}
