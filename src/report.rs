// src/report.rs

//! JSON and HTML renderings of a finished scan.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::info;

use crate::core::models::{Finding, ScanResult};

#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    timestamp: String,
    count: usize,
    vulnerabilities: Vec<JsonVulnerability<'a>>,
}

#[derive(Debug, Serialize)]
struct JsonVulnerability<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    url: &'a str,
    payload: &'a str,
}

impl<'a> From<&'a Finding> for JsonVulnerability<'a> {
    fn from(finding: &'a Finding) -> Self {
        Self {
            kind: finding.class.label(),
            url: &finding.url,
            payload: &finding.evidence,
        }
    }
}

/// `{timestamp, count, vulnerabilities: [{type, url, payload}]}`, pretty printed.
pub fn to_json(result: &ScanResult) -> serde_json::Result<String> {
    let vulnerabilities: Vec<JsonVulnerability> = result.findings.iter().map(JsonVulnerability::from).collect();
    let report = JsonReport {
        timestamp: result.finished_at.to_rfc3339(),
        count: vulnerabilities.len(),
        vulnerabilities,
    };
    serde_json::to_string_pretty(&report)
}

pub fn to_html(result: &ScanResult) -> String {
    let rows: String = result
        .findings
        .iter()
        .map(|f| {
            format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td></tr>",
                escape_html(f.class.label()),
                escape_html(&f.url),
                escape_html(&f.evidence)
            )
        })
        .collect();

    format!(
        r#"<html>
<head>
    <meta charset="utf-8">
    <title>Bug Bounty Report - {target}</title>
</head>
<body>
    <h1>Bug Bounty Report</h1>
    <p>Target: {target}</p>
    <p>Generated: {timestamp}</p>
    <table>
        <tr><th>Type</th><th>URL</th><th>Payload</th></tr>
        {rows}
    </table>
</body>
</html>
"#,
        target = escape_html(&result.target),
        timestamp = result.finished_at.to_rfc3339(),
        rows = rows,
    )
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Writes `<stem>.json` and `<stem>.html` into `dir` and returns both paths.
pub fn export(result: &ScanResult, dir: &Path) -> io::Result<(PathBuf, PathBuf)> {
    fs::create_dir_all(dir)?;
    let stem = file_stem(result);

    let json_path = dir.join(format!("{stem}.json"));
    let json = to_json(result).map_err(io::Error::other)?;
    fs::write(&json_path, json)?;

    let html_path = dir.join(format!("{stem}.html"));
    fs::write(&html_path, to_html(result))?;

    info!(json = %json_path.display(), html = %html_path.display(), "Exported scan report.");
    Ok((json_path, html_path))
}

fn file_stem(result: &ScanResult) -> String {
    let target: String = result
        .target
        .trim_start_matches("https://")
        .trim_start_matches("http://")
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '.' || c == '-' { c } else { '_' })
        .collect();
    format!("report-{}-{}", target.trim_matches('_'), result.finished_at.format("%Y%m%dT%H%M%SZ"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::VulnerabilityClass;

    fn sample() -> ScanResult {
        let mut result = ScanResult::new("http://shop.example.com/");
        result.findings.push(Finding::new(
            VulnerabilityClass::Xss,
            "http://shop.example.com/?q=<script>alert('xss')</script>",
            "<script>alert('xss')</script>",
        ));
        result.findings.push(Finding::new(
            VulnerabilityClass::Csrf,
            "http://shop.example.com/",
            "Missing CSRF token",
        ));
        result
    }

    #[test]
    fn json_count_matches_vulnerabilities() {
        let json: serde_json::Value = serde_json::from_str(&to_json(&sample()).unwrap()).unwrap();
        assert_eq!(json["count"], 2);
        assert_eq!(json["vulnerabilities"].as_array().unwrap().len(), 2);
        assert_eq!(json["vulnerabilities"][0]["type"], "XSS");
        assert_eq!(json["vulnerabilities"][1]["payload"], "Missing CSRF token");
        assert!(json["timestamp"].is_string());
    }

    #[test]
    fn html_escapes_payloads() {
        let html = to_html(&sample());
        assert!(html.contains("<h1>Bug Bounty Report</h1>"));
        assert!(html.contains("&lt;script&gt;alert(&#x27;xss&#x27;)&lt;/script&gt;"));
        assert!(!html.contains("<script>alert"));
    }

    #[test]
    fn export_writes_both_files() {
        let dir = tempfile::tempdir().unwrap();
        let (json, html) = export(&sample(), dir.path()).unwrap();
        assert!(json.exists() && html.exists());
        assert!(json.file_name().unwrap().to_string_lossy().starts_with("report-shop.example.com"));
    }
}
