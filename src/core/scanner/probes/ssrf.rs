// src/core/scanner/probes/ssrf.rs

use async_trait::async_trait;

use crate::core::http::HttpClient;
use crate::core::models::{Finding, VulnerabilityClass};
use crate::core::scanner::registry::{Probe, ProbeOutcome};

use super::with_param;

/// AWS instance metadata endpoint.
pub const SSRF_METADATA_URL: &str = "http://169.254.169.254/latest/meta-data/";

pub struct SsrfProbe {
    http: HttpClient,
}

impl SsrfProbe {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }
}

#[async_trait]
impl Probe for SsrfProbe {
    fn class(&self) -> VulnerabilityClass {
        VulnerabilityClass::Ssrf
    }

    async fn check(&self, endpoint: &str) -> ProbeOutcome {
        let url = with_param(endpoint, "url", SSRF_METADATA_URL);
        let response = self.http.get(&url).await?;
        let leaked = response.body.contains("ami-id") || response.body.contains("instance-id");
        Ok(leaked.then(|| Finding::new(self.class(), url, SSRF_METADATA_URL)))
    }
}
