// src/ui/layout.rs

use ratatui::layout::{Constraint, Layout, Rect};

/// Screen areas for every widget, computed once per frame.
pub struct AppLayout {
    pub input: Rect,
    pub report: Rect,
    pub summary: Rect,
    pub footer: Rect,
    /// Zero-sized while the log panel is hidden.
    pub log_panel: Rect,
}

pub fn create_layout(area: Rect, show_logs: bool) -> AppLayout {
    let [input, content, footer] =
        Layout::vertical([Constraint::Length(3), Constraint::Min(0), Constraint::Length(1)]).areas(area);

    if show_logs {
        let [report, summary, log_panel] = Layout::horizontal([
            Constraint::Percentage(45),
            Constraint::Percentage(20),
            Constraint::Percentage(35),
        ])
        .areas(content);
        AppLayout { input, report, summary, footer, log_panel }
    } else {
        let [report, summary] =
            Layout::horizontal([Constraint::Percentage(70), Constraint::Percentage(30)]).areas(content);
        AppLayout { input, report, summary, footer, log_panel: Rect::default() }
    }
}
