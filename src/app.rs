// src/app.rs

use std::fs;

use bounty_rs_scanner::core::knowledge_base;
use bounty_rs_scanner::core::models::{Finding, ScanResult, Severity};
use bounty_rs_scanner::{logging, report};
use ratatui::widgets::{ListState, ScrollbarState};

pub const SPINNER_CHARS: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

/// Lines of the log file kept in the log panel.
const LOG_TAIL: usize = 200;

pub enum ExportStatus {
    Idle,
    Success(String),
    Error(String),
}

pub enum AppState {
    Idle,
    Scanning,
    Finished,
}

#[derive(Debug, Default)]
pub struct ScanSummary {
    pub score: u8,
    pub critical_issues: usize,
    pub warning_issues: usize,
    pub info_issues: usize,
}

impl ScanSummary {
    /// Starts from 100 and subtracts 15 per critical, 5 per warning and 1 per info finding.
    pub fn from_findings(findings: &[Finding]) -> Self {
        let count = |severity: Severity| {
            findings
                .iter()
                .filter(|f| knowledge_base::get_finding_detail(f.class).severity == severity)
                .count()
        };
        let critical_issues = count(Severity::Critical);
        let warning_issues = count(Severity::Warning);
        let info_issues = count(Severity::Info);

        let penalty = critical_issues * 15 + warning_issues * 5 + info_issues;
        Self {
            score: 100usize.saturating_sub(penalty) as u8,
            critical_issues,
            warning_issues,
            info_issues,
        }
    }

    pub fn total(&self) -> usize {
        self.critical_issues + self.warning_issues + self.info_issues
    }
}

pub struct App {
    pub should_quit: bool,
    pub show_disclaimer: bool,
    pub state: AppState,
    pub input: String,
    pub scan_result: Option<ScanResult>,
    pub error: Option<String>,
    pub summary: ScanSummary,
    pub displayed_score: u8,
    pub spinner_frame: usize,
    pub analysis_list_state: ListState,
    pub show_logs: bool,
    pub log_content: Vec<String>,
    pub log_horizontal_scroll: usize,
    pub log_horizontal_scroll_state: ScrollbarState,
    pub export_status: ExportStatus,
}

impl App {
    pub fn new() -> Self {
        Self {
            should_quit: false,
            show_disclaimer: true,
            state: AppState::Idle,
            input: String::new(),
            scan_result: None,
            error: None,
            summary: ScanSummary::default(),
            displayed_score: 0,
            spinner_frame: 0,
            analysis_list_state: ListState::default(),
            show_logs: false,
            log_content: Vec::new(),
            log_horizontal_scroll: 0,
            log_horizontal_scroll_state: ScrollbarState::default(),
            export_status: ExportStatus::Idle,
        }
    }

    pub fn findings(&self) -> &[Finding] {
        self.scan_result.as_ref().map(|r| r.findings.as_slice()).unwrap_or(&[])
    }

    pub fn selected_finding(&self) -> Option<&Finding> {
        self.analysis_list_state.selected().and_then(|i| self.findings().get(i))
    }

    pub fn start_scan(&mut self) {
        self.state = AppState::Scanning;
        self.error = None;
        self.spinner_frame = 0;
    }

    pub fn finish_scan(&mut self, outcome: Result<ScanResult, String>) {
        self.state = AppState::Finished;
        match outcome {
            Ok(result) => {
                self.summary = ScanSummary::from_findings(&result.findings);
                self.analysis_list_state
                    .select(if result.findings.is_empty() { None } else { Some(0) });
                self.scan_result = Some(result);
            }
            Err(message) => {
                self.error = Some(message);
            }
        }
    }

    pub fn scroll_up(&mut self) {
        let Some(selected) = self.analysis_list_state.selected() else {
            return;
        };
        self.analysis_list_state.select(Some(selected.saturating_sub(1)));
    }

    pub fn scroll_down(&mut self) {
        let len = self.findings().len();
        if len == 0 {
            return;
        }
        let next = self.analysis_list_state.selected().map_or(0, |i| (i + 1).min(len - 1));
        self.analysis_list_state.select(Some(next));
    }

    pub fn scroll_log_left(&mut self) {
        self.log_horizontal_scroll = self.log_horizontal_scroll.saturating_sub(4);
        self.log_horizontal_scroll_state = self.log_horizontal_scroll_state.position(self.log_horizontal_scroll);
    }

    pub fn scroll_log_right(&mut self) {
        self.log_horizontal_scroll = self.log_horizontal_scroll.saturating_add(4);
        self.log_horizontal_scroll_state = self.log_horizontal_scroll_state.position(self.log_horizontal_scroll);
    }

    pub fn toggle_logs(&mut self) {
        self.show_logs = !self.show_logs;
        if self.show_logs {
            self.refresh_logs();
        }
    }

    pub fn refresh_logs(&mut self) {
        let Ok(content) = fs::read_to_string(logging::log_file_path()) else {
            return;
        };
        let lines: Vec<&str> = content.lines().collect();
        let start = lines.len().saturating_sub(LOG_TAIL);
        self.log_content = lines[start..].iter().map(|l| l.to_string()).collect();
    }

    pub fn export(&mut self) {
        let Some(result) = &self.scan_result else {
            self.export_status = ExportStatus::Error("Nothing to export".to_string());
            return;
        };
        self.export_status = match report::export(result, &logging::get_data_dir()) {
            Ok((json, html)) => ExportStatus::Success(format!("{} and {}", json.display(), html.display())),
            Err(e) => ExportStatus::Error(e.to_string()),
        };
    }

    /// Advances the spinner and eases the score gauge towards the final score.
    pub fn on_tick(&mut self) {
        match self.state {
            AppState::Scanning => {
                self.spinner_frame = (self.spinner_frame + 1) % SPINNER_CHARS.len();
            }
            AppState::Finished if self.displayed_score < self.summary.score => {
                self.displayed_score += 1;
            }
            _ => {}
        }
        if self.show_logs {
            self.refresh_logs();
        }
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn reset(&mut self) {
        self.state = AppState::Idle;
        self.input = String::new();
        self.scan_result = None;
        self.error = None;
        self.summary = ScanSummary::default();
        self.displayed_score = 0;
        self.analysis_list_state = ListState::default();
        self.export_status = ExportStatus::Idle;
    }
}
