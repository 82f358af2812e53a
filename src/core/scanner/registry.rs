// src/core/scanner/registry.rs

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::core::error::ProbeError;
use crate::core::http::HttpClient;
use crate::core::models::{Finding, VulnerabilityClass};

use super::external::ExternalScanner;
use super::probes::{
    CsrfProbe, DeserializationProbe, IdorProbe, LfiProbe, MisconfigProbe, OpenRedirectProbe,
    RfiProbe, SqliProbe, SsrfProbe, XssProbe,
};

/// `Ok(None)` means the endpoint looked clean; `Err` means no verdict.
pub type ProbeOutcome = Result<Option<Finding>, ProbeError>;

/// A stateless check for one vulnerability class against one endpoint.
#[async_trait]
pub trait Probe: Send + Sync {
    fn class(&self) -> VulnerabilityClass;

    async fn check(&self, endpoint: &str) -> ProbeOutcome;
}

/// The enabled probes of one scan, one per class.
#[derive(Clone)]
pub struct ProbeRegistry {
    probes: Vec<Arc<dyn Probe>>,
}

impl ProbeRegistry {
    pub fn new(
        enabled: &[VulnerabilityClass],
        http: &HttpClient,
        sqli: Arc<dyn ExternalScanner>,
        sqli_timeout: Duration,
    ) -> Self {
        let mut classes: Vec<VulnerabilityClass> = Vec::with_capacity(enabled.len());
        for class in enabled {
            if !classes.contains(class) {
                classes.push(*class);
            }
        }

        let probes = classes
            .into_iter()
            .map(|class| probe_for(class, http, Arc::clone(&sqli), sqli_timeout))
            .collect();
        Self { probes }
    }

    pub fn probes(&self) -> &[Arc<dyn Probe>] {
        &self.probes
    }

    pub fn classes(&self) -> Vec<VulnerabilityClass> {
        self.probes.iter().map(|p| p.class()).collect()
    }
}

/// Builds the probe implementing `class`.
pub fn probe_for(
    class: VulnerabilityClass,
    http: &HttpClient,
    sqli: Arc<dyn ExternalScanner>,
    sqli_timeout: Duration,
) -> Arc<dyn Probe> {
    let http = http.clone();
    match class {
        VulnerabilityClass::Xss => Arc::new(XssProbe::new(http)),
        VulnerabilityClass::Sqli => Arc::new(SqliProbe::new(sqli, sqli_timeout)),
        VulnerabilityClass::Lfi => Arc::new(LfiProbe::new(http)),
        VulnerabilityClass::Rfi => Arc::new(RfiProbe::new(http)),
        VulnerabilityClass::Idor => Arc::new(IdorProbe::new(http)),
        VulnerabilityClass::Csrf => Arc::new(CsrfProbe::new(http)),
        VulnerabilityClass::Ssrf => Arc::new(SsrfProbe::new(http)),
        VulnerabilityClass::OpenRedirect => Arc::new(OpenRedirectProbe::new(http)),
        VulnerabilityClass::Misconfig => Arc::new(MisconfigProbe::new(http)),
        VulnerabilityClass::InsecureDeserialization => Arc::new(DeserializationProbe::new(http)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::scanner::external::SqlmapAdapter;

    fn http() -> HttpClient {
        HttpClient::new("test", Duration::from_secs(1)).unwrap()
    }

    #[test]
    fn every_class_maps_to_its_own_probe() {
        let registry = ProbeRegistry::new(
            &VulnerabilityClass::all(),
            &http(),
            Arc::new(SqlmapAdapter::new("sqlmap")),
            Duration::from_secs(60),
        );
        assert_eq!(registry.classes(), VulnerabilityClass::all());
    }

    #[test]
    fn duplicate_classes_are_registered_once() {
        let registry = ProbeRegistry::new(
            &[VulnerabilityClass::Csrf, VulnerabilityClass::Xss, VulnerabilityClass::Csrf],
            &http(),
            Arc::new(SqlmapAdapter::new("sqlmap")),
            Duration::from_secs(60),
        );
        assert_eq!(registry.classes(), vec![VulnerabilityClass::Csrf, VulnerabilityClass::Xss]);
    }
}
