// src/core/scanner/probes/sqli.rs

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::core::models::{Finding, VulnerabilityClass};
use crate::core::scanner::external::ExternalScanner;
use crate::core::scanner::registry::{Probe, ProbeOutcome};

/// SQL injection, delegated entirely to an external scanner.
pub struct SqliProbe {
    scanner: Arc<dyn ExternalScanner>,
    timeout: Duration,
}

impl SqliProbe {
    pub fn new(scanner: Arc<dyn ExternalScanner>, timeout: Duration) -> Self {
        Self { scanner, timeout }
    }
}

#[async_trait]
impl Probe for SqliProbe {
    fn class(&self) -> VulnerabilityClass {
        VulnerabilityClass::Sqli
    }

    async fn check(&self, endpoint: &str) -> ProbeOutcome {
        let output = self.scanner.run(endpoint, self.timeout).await?;
        if self.scanner.is_vulnerable(&output) {
            return Ok(Some(Finding::new(
                self.class(),
                endpoint,
                format!("{} detected vulnerability", self.scanner.name()),
            )));
        }
        Ok(None)
    }
}
