// src/core/scanner/probes/rfi.rs

use async_trait::async_trait;
use tracing::debug;

use crate::core::http::HttpClient;
use crate::core::models::{Finding, VulnerabilityClass};
use crate::core::scanner::registry::{Probe, ProbeOutcome};

use super::with_param;

pub const RFI_INCLUDE: &str = "https://example.com/malicious.php";

pub struct RfiProbe {
    http: HttpClient,
}

impl RfiProbe {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }
}

#[async_trait]
impl Probe for RfiProbe {
    fn class(&self) -> VulnerabilityClass {
        VulnerabilityClass::Rfi
    }

    async fn check(&self, endpoint: &str) -> ProbeOutcome {
        let url = with_param(endpoint, "include", RFI_INCLUDE);
        let response = self.http.get(&url).await?;
        if response.body.contains("example.com") {
            debug!(url = %url, "Included host echoed in response.");
            return Ok(Some(Finding::new(self.class(), url, RFI_INCLUDE)));
        }
        Ok(None)
    }
}
