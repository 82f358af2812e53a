// src/core/scanner/external.rs

use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;
use tokio::time::timeout;
use tracing::{debug, info};

use crate::core::error::ProbeError;

/// A one-shot external scanner run against a single URL.
///
/// Implementations only launch the tool and hand back its textual output;
/// deciding whether that output means "vulnerable" is part of the contract
/// so the probe never depends on a specific tool's CLI.
#[async_trait]
pub trait ExternalScanner: Send + Sync {
    fn name(&self) -> &str;

    async fn run(&self, url: &str, timeout: Duration) -> Result<String, ProbeError>;

    fn is_vulnerable(&self, output: &str) -> bool {
        output.to_lowercase().contains("vulnerable")
    }
}

/// sqlmap in batch mode at the lowest risk and level.
pub struct SqlmapAdapter {
    binary: String,
}

impl SqlmapAdapter {
    pub fn new(binary: impl Into<String>) -> Self {
        Self { binary: binary.into() }
    }

    fn arguments(url: &str) -> [&str; 5] {
        ["-u", url, "--batch", "--level=1", "--risk=1"]
    }
}

#[async_trait]
impl ExternalScanner for SqlmapAdapter {
    fn name(&self) -> &str {
        "sqlmap"
    }

    async fn run(&self, url: &str, limit: Duration) -> Result<String, ProbeError> {
        info!(tool = %self.binary, url, "Running external SQL injection scan.");
        let mut command = Command::new(&self.binary);
        command.args(Self::arguments(url)).kill_on_drop(true);

        let output = timeout(limit, command.output())
            .await
            .map_err(|_| ProbeError::Timeout { tool: self.binary.clone(), after: limit })?
            .map_err(|e| ProbeError::ExternalTool {
                tool: self.binary.clone(),
                reason: e.to_string(),
            })?;

        debug!(status = %output.status, bytes = output.stdout.len(), "External scan finished.");
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sqlmap_runs_in_batch_mode_at_low_risk() {
        assert_eq!(
            SqlmapAdapter::arguments("http://example.com/?id=1"),
            ["-u", "http://example.com/?id=1", "--batch", "--level=1", "--risk=1"]
        );
    }

    #[test]
    fn vulnerable_match_ignores_case() {
        let adapter = SqlmapAdapter::new("sqlmap");
        assert!(adapter.is_vulnerable("Parameter 'id' is VULNERABLE."));
        assert!(!adapter.is_vulnerable("all tested parameters do not appear to be injectable"));
    }

    #[tokio::test]
    async fn missing_binary_is_a_tool_error() {
        let adapter = SqlmapAdapter::new("/nonexistent/sqlmap-binary");
        let result = adapter.run("http://example.com/", Duration::from_secs(5)).await;
        assert!(matches!(result, Err(ProbeError::ExternalTool { .. })));
    }
}
