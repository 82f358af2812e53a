// src/core/models.rs

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

// --- Core Data Models ---

/// Severity level attached to a vulnerability class by the knowledge base.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Critical,
    Warning,
    Info,
}

/// The closed set of weaknesses the probe registry knows how to detect.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord,
    Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum VulnerabilityClass {
    Xss,
    Sqli,
    Lfi,
    Rfi,
    Idor,
    Csrf,
    Ssrf,
    OpenRedirect,
    Misconfig,
    InsecureDeserialization,
}

impl VulnerabilityClass {
    /// Every class, in registry order.
    pub fn all() -> Vec<VulnerabilityClass> {
        Self::iter().collect()
    }

    /// Human-readable label used in reports ("type" column).
    pub fn label(&self) -> &'static str {
        match self {
            VulnerabilityClass::Xss => "XSS",
            VulnerabilityClass::Sqli => "SQLi",
            VulnerabilityClass::Lfi => "LFI",
            VulnerabilityClass::Rfi => "RFI",
            VulnerabilityClass::Idor => "IDOR",
            VulnerabilityClass::Csrf => "CSRF",
            VulnerabilityClass::Ssrf => "SSRF",
            VulnerabilityClass::OpenRedirect => "Open Redirect",
            VulnerabilityClass::Misconfig => "Misconfiguration",
            VulnerabilityClass::InsecureDeserialization => "Insecure Deserialization",
        }
    }
}

/// A detected weakness. `url` is the exact URL that was probed, payload included.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Finding {
    pub class: VulnerabilityClass,
    pub url: String,
    pub evidence: String,
    pub timestamp: DateTime<Utc>,
}

impl Finding {
    pub fn new(class: VulnerabilityClass, url: impl Into<String>, evidence: impl Into<String>) -> Self {
        Self {
            class,
            url: url.into(),
            evidence: evidence.into(),
            timestamp: Utc::now(),
        }
    }
}

// --- Recon Models ---

/// State of a scanned port. Only open ports are ever recorded.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PortStatus {
    Open,
}

/// Port number to state, for every port the scan reported open.
pub type PortState = BTreeMap<u16, PortStatus>;

// --- Main Report ---

/// The aggregate output of one scan, handed by value to the UI and reporters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanResult {
    pub target: String,
    pub subdomains: Vec<String>,
    pub ports: PortState,
    pub endpoints: Vec<String>,
    pub findings: Vec<Finding>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    /// Set when the overall deadline cut the scan short.
    pub timed_out: bool,
}

impl ScanResult {
    pub fn new(target: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            target: target.into(),
            subdomains: Vec::new(),
            ports: PortState::new(),
            endpoints: Vec::new(),
            findings: Vec::new(),
            started_at: now,
            finished_at: now,
            timed_out: false,
        }
    }

    pub fn findings_of(&self, class: VulnerabilityClass) -> impl Iterator<Item = &Finding> {
        self.findings.iter().filter(move |f| f.class == class)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn class_tags_are_snake_case() {
        assert_eq!(VulnerabilityClass::OpenRedirect.to_string(), "open_redirect");
        assert_eq!(
            VulnerabilityClass::from_str("insecure_deserialization").unwrap(),
            VulnerabilityClass::InsecureDeserialization
        );
        assert_eq!(
            serde_json::to_string(&VulnerabilityClass::Sqli).unwrap(),
            "\"sqli\""
        );
        assert_eq!(VulnerabilityClass::all().len(), 10);
    }

    #[test]
    fn port_status_serializes_as_open() {
        let mut ports = PortState::new();
        ports.insert(443, PortStatus::Open);
        ports.insert(80, PortStatus::Open);
        assert_eq!(serde_json::to_string(&ports).unwrap(), r#"{"80":"open","443":"open"}"#);
    }
}
