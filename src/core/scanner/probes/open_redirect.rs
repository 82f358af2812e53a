// src/core/scanner/probes/open_redirect.rs

use async_trait::async_trait;
use reqwest::StatusCode;
use reqwest::header::LOCATION;

use crate::core::http::HttpClient;
use crate::core::models::{Finding, VulnerabilityClass};
use crate::core::scanner::registry::{Probe, ProbeOutcome};

use super::with_param;

pub const REDIRECT_TARGET: &str = "http://evil.com";

pub struct OpenRedirectProbe {
    http: HttpClient,
}

impl OpenRedirectProbe {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }
}

#[async_trait]
impl Probe for OpenRedirectProbe {
    fn class(&self) -> VulnerabilityClass {
        VulnerabilityClass::OpenRedirect
    }

    async fn check(&self, endpoint: &str) -> ProbeOutcome {
        let url = with_param(endpoint, "redirect", REDIRECT_TARGET);
        // The 3xx itself is the evidence, so it must not be followed.
        let response = self.http.get_no_redirect(&url).await?;

        let redirected = matches!(response.status, StatusCode::MOVED_PERMANENTLY | StatusCode::FOUND);
        let to_target = response
            .header(LOCATION.as_str())
            .is_some_and(|location| location.contains(REDIRECT_TARGET));

        Ok((redirected && to_target).then(|| Finding::new(self.class(), url, REDIRECT_TARGET)))
    }
}
