// src/config.rs

//! Scan configuration.
//!
//! A single immutable [`ScanConfig`] value is built before a scan starts and
//! handed to the orchestrator. It is read from `config.toml` in the project
//! config directory when that file exists:
//!
//! ```toml
//! scan_timeout_secs = 1800
//! probe_timeout_secs = 5
//! enabled_checks = ["xss", "csrf", "open_redirect"]
//! subdomain_wordlist = ["www", "api", "dev", "staging", "test"]
//! allowed_domains = ["example.com"]
//! port_scanner = "connect"
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::core::error::ConfigError;
use crate::core::models::VulnerabilityClass;
use crate::logging::get_config_dir;

const CONFIG_FILE: &str = "config.toml";

/// Longest accepted scan deadline (30 days).
pub const MAX_SCAN_TIMEOUT_SECS: u64 = 30 * 24 * 3600;

/// Default candidate words tried in front of the target domain.
pub const DEFAULT_WORDLIST: &[&str] = &["www", "api", "dev", "staging", "test"];

/// Which backend recon uses to find open ports.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PortScannerKind {
    /// `nmap -sS`; needs the binary and raw-socket privileges.
    #[default]
    Nmap,
    /// Plain TCP connect() sweep, no privileges needed.
    Connect,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ScanConfig {
    /// Overall scan deadline.
    pub scan_timeout_secs: u64,
    /// Timeout applied to every single HTTP request.
    pub probe_timeout_secs: u64,
    pub enabled_checks: Vec<VulnerabilityClass>,
    pub subdomain_wordlist: Vec<String>,
    /// Program scope. Empty means any target is accepted.
    pub allowed_domains: Vec<String>,
    /// Number of probes in flight at once.
    pub concurrency: usize,
    pub user_agent: String,
    pub port_scanner: PortScannerKind,
    pub port_connect_timeout_ms: u64,
    pub port_scan_concurrency: usize,
    pub nmap_path: String,
    pub sqlmap_path: String,
    pub sqli_timeout_secs: u64,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            scan_timeout_secs: 3600,
            probe_timeout_secs: 5,
            enabled_checks: VulnerabilityClass::all(),
            subdomain_wordlist: DEFAULT_WORDLIST.iter().map(|w| w.to_string()).collect(),
            allowed_domains: Vec::new(),
            concurrency: 16,
            user_agent: "BountyHunter/1.0".to_string(),
            port_scanner: PortScannerKind::default(),
            port_connect_timeout_ms: 300,
            port_scan_concurrency: 512,
            nmap_path: "nmap".to_string(),
            sqlmap_path: "sqlmap".to_string(),
            sqli_timeout_secs: 60,
        }
    }
}

impl ScanConfig {
    /// Loads `config.toml` from the project config directory, or defaults if it is absent.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::config_path();
        if !path.exists() {
            debug!(path = %path.display(), "No config file, using defaults.");
            return Ok(Self::default());
        }
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: ScanConfig = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        info!(path = %path.display(), checks = config.enabled_checks.len(), "Loaded scan configuration.");
        Ok(config)
    }

    pub fn config_path() -> PathBuf {
        get_config_dir().join(CONFIG_FILE)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.scan_timeout_secs == 0 {
            return Err(ConfigError::Invalid("scan_timeout_secs must be greater than zero".into()));
        }
        if self.scan_timeout_secs > MAX_SCAN_TIMEOUT_SECS {
            return Err(ConfigError::Invalid(format!(
                "scan_timeout_secs must not exceed {MAX_SCAN_TIMEOUT_SECS}"
            )));
        }
        if self.probe_timeout_secs == 0 {
            return Err(ConfigError::Invalid("probe_timeout_secs must be greater than zero".into()));
        }
        if self.sqli_timeout_secs == 0 {
            return Err(ConfigError::Invalid("sqli_timeout_secs must be greater than zero".into()));
        }
        if self.concurrency == 0 || self.port_scan_concurrency == 0 {
            return Err(ConfigError::Invalid("concurrency settings must be greater than zero".into()));
        }
        if self.enabled_checks.is_empty() {
            return Err(ConfigError::Invalid("enabled_checks must name at least one check".into()));
        }
        if self.subdomain_wordlist.iter().any(|w| w.trim().is_empty() || w.contains('.')) {
            return Err(ConfigError::Invalid(
                "subdomain_wordlist entries must be single non-empty labels".into(),
            ));
        }
        Ok(())
    }

    pub fn scan_timeout(&self) -> Duration {
        Duration::from_secs(self.scan_timeout_secs)
    }

    pub fn probe_timeout(&self) -> Duration {
        Duration::from_secs(self.probe_timeout_secs)
    }

    pub fn sqli_timeout(&self) -> Duration {
        Duration::from_secs(self.sqli_timeout_secs)
    }

    pub fn port_connect_timeout(&self) -> Duration {
        Duration::from_millis(self.port_connect_timeout_ms)
    }

    /// True when `host` equals, or is a subdomain of, one of the allowed domains.
    pub fn is_in_scope(&self, host: &str) -> bool {
        if self.allowed_domains.is_empty() {
            return true;
        }
        let host = host.trim_end_matches('.').to_ascii_lowercase();
        self.allowed_domains.iter().any(|allowed| {
            let allowed = allowed.trim().trim_end_matches('.').to_ascii_lowercase();
            host == allowed || host.ends_with(&format!(".{allowed}"))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_enable_everything() {
        let config = ScanConfig::default();
        assert_eq!(config.enabled_checks.len(), 10);
        assert_eq!(config.scan_timeout(), Duration::from_secs(3600));
        assert_eq!(config.probe_timeout(), Duration::from_secs(5));
        assert_eq!(config.subdomain_wordlist, vec!["www", "api", "dev", "staging", "test"]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "scan_timeout_secs = 60").unwrap();
        writeln!(file, "enabled_checks = [\"xss\", \"open_redirect\"]").unwrap();
        writeln!(file, "port_scanner = \"connect\"").unwrap();

        let config = ScanConfig::load_from(file.path()).unwrap();
        assert_eq!(config.scan_timeout_secs, 60);
        assert_eq!(
            config.enabled_checks,
            vec![VulnerabilityClass::Xss, VulnerabilityClass::OpenRedirect]
        );
        assert_eq!(config.port_scanner, PortScannerKind::Connect);
        assert_eq!(config.probe_timeout_secs, 5);
    }

    #[test]
    fn unknown_check_is_a_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "enabled_checks = [\"rce\"]").unwrap();
        assert!(matches!(
            ScanConfig::load_from(file.path()),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn rejects_empty_checks_and_zero_timeouts() {
        let config = ScanConfig { enabled_checks: vec![], ..Default::default() };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let config = ScanConfig { probe_timeout_secs: 0, ..Default::default() };
        assert!(config.validate().is_err());

        let config = ScanConfig { subdomain_wordlist: vec!["a.b".into()], ..Default::default() };
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_deadlines_beyond_the_cap() {
        let config = ScanConfig { scan_timeout_secs: u64::MAX, ..Default::default() };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let config = ScanConfig { scan_timeout_secs: MAX_SCAN_TIMEOUT_SECS, ..Default::default() };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn scope_matches_domain_and_subdomains() {
        let config = ScanConfig {
            allowed_domains: vec!["example.com".into()],
            ..Default::default()
        };
        assert!(config.is_in_scope("example.com"));
        assert!(config.is_in_scope("API.example.com"));
        assert!(!config.is_in_scope("badexample.com"));
        assert!(!config.is_in_scope("example.org"));
        assert!(ScanConfig::default().is_in_scope("anything.test"));
    }
}
