// src/ui/mod.rs

use crate::app::App;
use ratatui::prelude::*;

mod layout;
mod widgets;

pub fn render(app: &mut App, frame: &mut Frame) {
    let layout = layout::create_layout(frame.area(), app.show_logs);

    widgets::input::render_input(frame, app, layout.input);
    widgets::analysis_view::render_analysis_view(frame, app, layout.report);
    widgets::summary::render_summary(frame, app, layout.summary);
    if app.show_logs {
        widgets::log_view::render_log_view(frame, app, layout.log_panel);
    }
    widgets::footer::render_footer(frame, app, layout.footer);

    if app.show_disclaimer {
        let area = frame.area();
        widgets::disclaimer_popup::render_disclaimer_popup(frame, area);
    }
}
