// src/core/scanner/probes/lfi.rs

use async_trait::async_trait;

use crate::core::http::HttpClient;
use crate::core::models::VulnerabilityClass;
use crate::core::scanner::registry::{Probe, ProbeOutcome};

use super::first_matching_payload;

pub const LFI_PAYLOADS: &[&str] = &["../../etc/passwd", "/proc/self/environ"];

/// Markers of `/etc/passwd` and of a process environment dump.
const LFI_MARKERS: &[&str] = &["root:x", "HOME="];

pub struct LfiProbe {
    http: HttpClient,
}

impl LfiProbe {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }
}

#[async_trait]
impl Probe for LfiProbe {
    fn class(&self) -> VulnerabilityClass {
        VulnerabilityClass::Lfi
    }

    async fn check(&self, endpoint: &str) -> ProbeOutcome {
        first_matching_payload(&self.http, self.class(), endpoint, "file", LFI_PAYLOADS, |_, response| {
            LFI_MARKERS.iter().any(|marker| response.body.contains(marker))
        })
        .await
    }
}
