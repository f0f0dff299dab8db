use ratatui::layout::{Constraint, Layout, Rect};

/// Screen regions of the research form
pub struct AppLayout {
    pub input_area: Rect,
    pub report_area: Rect,
    pub history_area: Rect,
    pub status_area: Rect,
}

impl AppLayout {
    /// Three-row vertical split (query input, main area, status bar), with
    /// the main area divided 70/30 between the report pane and the
    /// conversation pane.
    pub fn new(area: Rect) -> Self {
        let [input_area, main_area, status_area] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .areas(area);

        let [report_area, history_area] =
            Layout::horizontal([Constraint::Percentage(70), Constraint::Percentage(30)])
                .areas(main_area);

        Self { input_area, report_area, history_area, status_area }
    }
}
