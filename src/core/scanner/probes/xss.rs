// src/core/scanner/probes/xss.rs

use async_trait::async_trait;

use crate::core::http::HttpClient;
use crate::core::models::VulnerabilityClass;
use crate::core::scanner::registry::{Probe, ProbeOutcome};

use super::first_matching_payload;

/// Reflected payloads, tried in order.
pub const XSS_PAYLOADS: &[&str] = &[
    "<script>alert('xss')</script>",
    "'><img src=x onerror=alert('xss')>",
    "<svg onload=alert('xss')>",
];

/// Reflected XSS: the payload comes back unescaped in the body.
pub struct XssProbe {
    http: HttpClient,
}

impl XssProbe {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }
}

#[async_trait]
impl Probe for XssProbe {
    fn class(&self) -> VulnerabilityClass {
        VulnerabilityClass::Xss
    }

    async fn check(&self, endpoint: &str) -> ProbeOutcome {
        first_matching_payload(&self.http, self.class(), endpoint, "q", XSS_PAYLOADS, |payload, response| {
            response.body.contains(payload)
        })
        .await
    }
}
