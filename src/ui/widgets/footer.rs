// src/ui/widgets/footer.rs

use crate::app::{App, AppState, ExportStatus};
use ratatui::{
    prelude::*,
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::Paragraph,
};

fn key(label: &str) -> Span<'_> {
    Span::styled(label, Style::new().bold().fg(Color::Yellow))
}

/// Available actions for the current state, or the outcome of the last export.
pub fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let line = match (&app.state, &app.export_status) {
        (AppState::Finished, ExportStatus::Success(paths)) => {
            Line::from(format!("Exported {paths}")).style(Style::default().fg(Color::Green))
        }
        (AppState::Finished, ExportStatus::Error(e)) => {
            Line::from(format!("Export failed: {e}")).style(Style::default().fg(Color::Red))
        }
        (AppState::Idle, _) => Line::from(vec![
            Span::raw("Press "),
            key("Enter"),
            Span::raw(" to scan, "),
            key("Esc"),
            Span::raw(" to quit. Only scan targets you are authorized to test."),
        ]),
        (AppState::Finished, ExportStatus::Idle) => Line::from(vec![
            key("[N]"),
            Span::raw("ew Scan, "),
            key("[E]"),
            Span::raw("xport, "),
            key("[L]"),
            Span::raw("ogs, "),
            key("[Q]"),
            Span::raw("uit"),
        ]),
        (AppState::Scanning, _) => Line::from(vec![
            Span::raw("Scanning... "),
            key("L"),
            Span::raw(" toggles logs, "),
            key("Q"),
            Span::raw(" quits."),
        ]),
    };

    frame.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
}
