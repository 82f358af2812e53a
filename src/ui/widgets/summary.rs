// src/ui/widgets/summary.rs

use crate::app::{App, AppState};
use ratatui::{
    prelude::*,
    text::Line,
    widgets::{Block, Borders, Gauge, Paragraph},
};

/// Score, issue counts and recon results of a finished scan.
pub fn render_summary(frame: &mut Frame, app: &App, area: Rect) {
    let summary_container = Block::default().borders(Borders::ALL).title("Summary");
    frame.render_widget(summary_container, area);

    let summary_chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3), // Score & Rating
            Constraint::Length(1), // Gauge
            Constraint::Length(1),
            Constraint::Length(4), // Issues
            Constraint::Length(1),
            Constraint::Min(0), // Recon
        ])
        .split(area);

    if !matches!(app.state, AppState::Finished) {
        return;
    }
    let Some(result) = &app.scan_result else {
        return;
    };

    let (rating_text, rating_style) = match app.summary.score {
        90..=100 => ("Excellent", Style::default().fg(Color::Green)),
        75..=89 => ("Good", Style::default().fg(Color::Cyan)),
        50..=74 => ("Needs Improvement", Style::default().fg(Color::Yellow)),
        _ => ("Poor", Style::default().fg(Color::Red)),
    };
    let score_line = Line::from(format!("{}/100 ({})", app.summary.score, rating_text)).style(rating_style);
    let score_text = Text::from(vec![Line::from("Overall Score".bold()), score_line]);
    frame.render_widget(Paragraph::new(score_text).alignment(Alignment::Center), summary_chunks[0]);

    let score_gauge = Gauge::default()
        .percent(app.displayed_score as u16)
        .label("")
        .style(Style::default().fg(if app.displayed_score >= 80 {
            Color::Green
        } else if app.displayed_score >= 50 {
            Color::Yellow
        } else {
            Color::Red
        }));
    frame.render_widget(score_gauge, summary_chunks[1]);

    let issues_block = Block::default().title("ISSUES FOUND".bold());
    let issues_text = Text::from(vec![
        Line::from(vec![
            Span::raw("Critical: "),
            Span::styled(app.summary.critical_issues.to_string(), Style::default().fg(Color::Red)),
        ]),
        Line::from(vec![
            Span::raw("Warnings: "),
            Span::styled(app.summary.warning_issues.to_string(), Style::default().fg(Color::Yellow)),
        ]),
        Line::from(vec![
            Span::raw("Info:     "),
            Span::styled(app.summary.info_issues.to_string(), Style::default().fg(Color::Cyan)),
        ]),
    ]);
    frame.render_widget(Paragraph::new(issues_text).block(issues_block), summary_chunks[3]);

    let recon_block = Block::default().title("RECON".bold());
    let mut recon_lines = vec![
        Line::from(format!("Endpoints probed: {}", result.endpoints.len())),
        Line::from(format!(
            "Open ports: {}",
            if result.ports.is_empty() {
                "none".to_string()
            } else {
                result.ports.keys().map(u16::to_string).collect::<Vec<_>>().join(", ")
            }
        )),
        Line::from(format!("Subdomains: {}", result.subdomains.len())),
    ];
    for subdomain in &result.subdomains {
        recon_lines.push(Line::from(vec![
            Span::raw("- "),
            Span::styled(subdomain.as_str(), Style::default().fg(Color::Cyan)),
        ]));
    }
    if result.timed_out {
        recon_lines.push(Line::from(""));
        recon_lines.push(Line::from("Deadline reached, results are partial.".yellow()));
    }
    frame.render_widget(Paragraph::new(recon_lines).block(recon_block), summary_chunks[5]);
}
