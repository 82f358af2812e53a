// src/core/scanner/probes/csrf.rs

use async_trait::async_trait;
use tracing::debug;

use crate::core::http::HttpClient;
use crate::core::models::{Finding, VulnerabilityClass};
use crate::core::parser::parse_page;
use crate::core::scanner::registry::{Probe, ProbeOutcome};

/// Flags pages with a form that carries no anti-CSRF token input.
pub struct CsrfProbe {
    http: HttpClient,
}

impl CsrfProbe {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }
}

#[async_trait]
impl Probe for CsrfProbe {
    fn class(&self) -> VulnerabilityClass {
        VulnerabilityClass::Csrf
    }

    async fn check(&self, endpoint: &str) -> ProbeOutcome {
        let response = self.http.get(endpoint).await?;
        let page = parse_page(&response.body);

        if let Some(form) = page.forms.iter().find(|form| !form.has_csrf_token()) {
            debug!(endpoint, action = ?form.action, "Form without CSRF token.");
            return Ok(Some(Finding::new(self.class(), endpoint, "Missing CSRF token")));
        }
        Ok(None)
    }
}
