// src/ui/widgets/disclaimer_popup.rs

use ratatui::{
    layout::Flex,
    prelude::*,
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

/// Modal authorization notice shown before the first scan.
pub fn render_disclaimer_popup(frame: &mut Frame, area: Rect) {
    let disclaimer_text = Text::from(vec![
        Line::from("AUTHORIZED TESTING ONLY".bold().yellow()),
        Line::from(""),
        Line::from("This scanner sends active attack payloads (script injection, file inclusion, server-side request forgery, SQL injection via sqlmap) and runs a full port scan against the target."),
        Line::from(""),
        Line::from("Only scan assets that are in scope of a bug bounty program or that you have written permission to test. Unauthorized scanning is illegal in many jurisdictions."),
        Line::from(""),
        Line::from("Restrict targets with allowed_domains in the configuration file to stay in scope."),
        Line::from(""),
        Line::from("Press ".bold() + "Enter".bold().yellow() + " to acknowledge and continue".bold()),
    ]);

    let block = Block::default()
        .title("Disclaimer")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red));

    let popup_area = centered_rect(70, 60, area);
    let popup = Paragraph::new(disclaimer_text)
        .block(block)
        .wrap(Wrap { trim: true })
        .alignment(Alignment::Center);

    frame.render_widget(Clear, popup_area);
    frame.render_widget(popup, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let [middle] = Layout::vertical([Constraint::Percentage(percent_y)])
        .flex(Flex::Center)
        .areas(area);
    let [popup] = Layout::horizontal([Constraint::Percentage(percent_x)])
        .flex(Flex::Center)
        .areas(middle);
    popup
}
