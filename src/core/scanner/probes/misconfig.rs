// src/core/scanner/probes/misconfig.rs

use async_trait::async_trait;
use tracing::debug;

use crate::core::http::HttpClient;
use crate::core::models::{Finding, VulnerabilityClass};
use crate::core::scanner::registry::{Probe, ProbeOutcome};

/// Headers that disclose server software, checked in this order.
pub const EXPOSED_HEADERS: &[&str] = &["Server", "X-Powered-By", "X-AspNet-Version"];

pub struct MisconfigProbe {
    http: HttpClient,
}

impl MisconfigProbe {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }
}

#[async_trait]
impl Probe for MisconfigProbe {
    fn class(&self) -> VulnerabilityClass {
        VulnerabilityClass::Misconfig
    }

    async fn check(&self, endpoint: &str) -> ProbeOutcome {
        let response = self.http.get(endpoint).await?;

        for header in EXPOSED_HEADERS {
            if let Some(value) = response.headers.get(*header) {
                let value = String::from_utf8_lossy(value.as_bytes());
                debug!(header, value = %value, "Disclosing header present.");
                return Ok(Some(Finding::new(
                    self.class(),
                    endpoint,
                    format!("Exposed header: {header} = {value}"),
                )));
            }
        }
        Ok(None)
    }
}
