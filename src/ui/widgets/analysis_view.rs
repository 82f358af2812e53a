// src/ui/widgets/analysis_view.rs

use crate::app::{App, AppState, SPINNER_CHARS};
use bounty_rs_scanner::core::knowledge_base::{self, FindingCategory};
use bounty_rs_scanner::core::models::Severity;
use ratatui::{
    prelude::*,
    text::Line,
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
};

fn severity_style(severity: Severity) -> Style {
    match severity {
        Severity::Critical => Style::default().fg(Color::Red),
        Severity::Warning => Style::default().fg(Color::Yellow),
        Severity::Info => Style::default().fg(Color::Cyan),
    }
}

pub fn render_analysis_view(frame: &mut Frame, app: &mut App, area: Rect) {
    let main_block = Block::default().borders(Borders::ALL).title("Findings (Navigate with ↑ ↓)");

    if let Some(error) = &app.error {
        let text = Text::from(vec![
            Line::from(""),
            Line::from("SCAN FAILED".bold().fg(Color::Red)),
            Line::from(""),
            Line::from(error.as_str()),
        ]);
        let p = Paragraph::new(text)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(main_block);
        frame.render_widget(p, area);
        return;
    }

    if !matches!(app.state, AppState::Finished) {
        let content = match app.state {
            AppState::Scanning => Paragraph::new(Line::from(vec![
                Span::styled(format!("{} ", SPINNER_CHARS[app.spinner_frame]), Style::default().fg(Color::Cyan)),
                Span::raw("Scanning... recon and probes are running."),
            ])),
            _ => Paragraph::new("Scan results will appear here..."),
        };
        frame.render_widget(content.alignment(Alignment::Center).block(main_block), area);
        return;
    }

    let inner_area = main_block.inner(area);
    frame.render_widget(main_block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(40), Constraint::Min(0)])
        .split(inner_area);

    let items: Vec<ListItem> = app
        .findings()
        .iter()
        .map(|f| {
            let detail = knowledge_base::get_finding_detail(f.class);
            let category_prefix = match detail.category {
                FindingCategory::Injection => "[INJ] ",
                FindingCategory::AccessControl => "[ACL] ",
                FindingCategory::Configuration => "[CFG] ",
            };
            ListItem::new(Line::from(vec![
                Span::styled(category_prefix, Style::default().fg(Color::DarkGray)),
                Span::styled(detail.title, severity_style(detail.severity)),
                Span::styled(format!("  {}", f.url), Style::default().fg(Color::DarkGray)),
            ]))
        })
        .collect();

    let findings_list = List::new(items)
        .block(Block::default())
        .highlight_style(Style::new().bg(Color::DarkGray).add_modifier(Modifier::BOLD));
    frame.render_stateful_widget(findings_list, chunks[0], &mut app.analysis_list_state);

    let detail_block = Block::default().borders(Borders::TOP).title("Details");
    match app.selected_finding() {
        Some(finding) => {
            let detail = knowledge_base::get_finding_detail(finding.class);
            let text = vec![
                Line::from(vec![
                    Span::styled(detail.title, severity_style(detail.severity).add_modifier(Modifier::BOLD)),
                    Span::raw(format!("  ({}, {:?})", detail.category, detail.severity)),
                ]),
                Line::from(""),
                Line::from("URL:".yellow().bold()),
                Line::from(finding.url.as_str()),
                Line::from("EVIDENCE:".yellow().bold()),
                Line::from(finding.evidence.as_str()),
                Line::from(""),
                Line::from("WHAT IT IS:".yellow().bold()),
                Line::from(detail.description),
                Line::from(""),
                Line::from("HOW TO FIX:".yellow().bold()),
                Line::from(detail.remediation),
            ];
            let p = Paragraph::new(text).wrap(Wrap { trim: true }).block(detail_block);
            frame.render_widget(p, chunks[1]);
        }
        None => render_placeholder_details(frame, app, detail_block, chunks[1]),
    }
}

fn render_placeholder_details(frame: &mut Frame, app: &App, block: Block, area: Rect) {
    let placeholder_text = if app.summary.total() == 0 {
        Text::from(vec![
            Line::from(""),
            Line::from("✓ NO FINDINGS".bold().fg(Color::Green)),
            Line::from(""),
            Line::from("None of the enabled probes reported a vulnerability."),
        ])
    } else {
        Text::from("Select an item above to see details.")
    };

    let p = Paragraph::new(placeholder_text).alignment(Alignment::Center).block(block);
    frame.render_widget(p, area);
}
