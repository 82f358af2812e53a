// src/core/scanner/mod.rs

// Scan orchestration: recon and endpoint probing run side by side under a
// single deadline, and every enabled probe is applied to every endpoint.
pub mod external;
pub mod probes;
pub mod registry;

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use futures::future;
use futures::stream::{self, StreamExt};
use tokio::time::{Instant, timeout_at};
use tracing::{debug, info, warn};

use crate::config::ScanConfig;
use crate::core::discovery::EndpointDiscovery;
use crate::core::error::ScanError;
use crate::core::http::HttpClient;
use crate::core::models::{Finding, PortState, ScanResult};
use crate::core::recon::Recon;
use crate::core::target::Target;

use self::external::{ExternalScanner, SqlmapAdapter};
use self::registry::{Probe, ProbeRegistry};

/// Stand-in deadline for timeouts too large to add to the clock.
const FAR_FUTURE: Duration = Duration::from_secs(86400 * 365 * 30);

/// Drives one complete scan of a target.
#[derive(Clone)]
pub struct ScanOrchestrator {
    config: Arc<ScanConfig>,
    recon: Recon,
    discovery: EndpointDiscovery,
    registry: ProbeRegistry,
}

/// What the probing half of a scan produced before it finished or ran out of time.
struct ProbeRun {
    endpoints: Vec<String>,
    findings: Vec<Finding>,
    timed_out: bool,
}

impl ScanOrchestrator {
    /// Orchestrator wired to the real network collaborators.
    pub fn new(config: ScanConfig) -> Result<Self, ScanError> {
        config.validate()?;
        let http = HttpClient::new(&config.user_agent, config.probe_timeout()).map_err(ScanError::HttpClient)?;
        let recon = Recon::from_config(&config);
        let sqli = Arc::new(SqlmapAdapter::new(config.sqlmap_path.clone()));
        Ok(Self::with_components(config, recon, http, sqli))
    }

    /// Orchestrator with caller-supplied recon and SQL injection backends.
    pub fn with_components(
        config: ScanConfig,
        recon: Recon,
        http: HttpClient,
        sqli: Arc<dyn ExternalScanner>,
    ) -> Self {
        let registry = ProbeRegistry::new(&config.enabled_checks, &http, sqli, config.sqli_timeout());
        Self {
            config: Arc::new(config),
            recon,
            discovery: EndpointDiscovery::new(http),
            registry,
        }
    }

    /// Runs a full scan of `input`.
    ///
    /// Only a malformed or out-of-scope target is an error. Everything that
    /// goes wrong later is logged and degrades the result instead; when the
    /// deadline passes, the work done so far is returned with `timed_out` set.
    pub async fn run(&self, input: &str) -> Result<ScanResult, ScanError> {
        let target = Target::parse(input)?;
        if !self.config.is_in_scope(target.host()) {
            return Err(ScanError::OutOfScope { host: target.host().to_string() });
        }

        let now = Instant::now();
        let deadline = now.checked_add(self.config.scan_timeout()).unwrap_or(now + FAR_FUTURE);
        let mut result = ScanResult::new(target.raw());
        info!(
            target = %target.raw(),
            checks = ?self.registry.classes(),
            timeout_secs = self.config.scan_timeout_secs,
            "Starting scan."
        );

        let (subdomains, ports, probing) = tokio::join!(
            timeout_at(deadline, self.discover_subdomains(&target)),
            timeout_at(deadline, self.recon.scan_ports(target.host())),
            self.probe_endpoints(&target, deadline),
        );

        let mut timed_out = probing.timed_out;
        match subdomains {
            Ok(subdomains) => result.subdomains = subdomains,
            Err(_) => {
                warn!("Deadline reached during subdomain discovery, results omitted.");
                timed_out = true;
            }
        }
        match ports {
            Ok(ports) => result.ports = ports,
            Err(_) => {
                warn!("Deadline reached during port scan, results omitted.");
                result.ports = PortState::new();
                timed_out = true;
            }
        }

        result.endpoints = probing.endpoints;
        result.findings = probing.findings;
        result.timed_out = timed_out;
        result.finished_at = Utc::now();

        info!(
            subdomains = result.subdomains.len(),
            open_ports = result.ports.len(),
            endpoints = result.endpoints.len(),
            findings = result.findings.len(),
            timed_out = result.timed_out,
            "Scan finished."
        );
        Ok(result)
    }

    async fn discover_subdomains(&self, target: &Target) -> Vec<String> {
        match target.base_url().domain() {
            Some(domain) => self.recon.discover_subdomains(domain).await,
            None => {
                debug!(host = %target.host(), "Target is an IP address, skipping subdomain discovery.");
                Vec::new()
            }
        }
    }

    async fn probe_endpoints(&self, target: &Target, deadline: Instant) -> ProbeRun {
        let endpoints = match timeout_at(deadline, self.discovery.discover(target)).await {
            Ok(endpoints) => endpoints,
            Err(_) => {
                warn!("Deadline reached during endpoint discovery.");
                return ProbeRun {
                    endpoints: vec![target.url_string()],
                    findings: Vec::new(),
                    timed_out: true,
                };
            }
        };

        let jobs: Vec<(String, Arc<dyn Probe>)> = endpoints
            .iter()
            .flat_map(|endpoint| {
                self.registry
                    .probes()
                    .iter()
                    .map(move |probe| (endpoint.clone(), Arc::clone(probe)))
            })
            .collect();
        info!(endpoints = endpoints.len(), jobs = jobs.len(), "Probing endpoints.");

        // Single collector; dropping the pool on timeout cancels in-flight and queued probes.
        let mut findings = Vec::new();
        let checks: Vec<_> = jobs.into_iter().map(|(endpoint, probe)| run_probe(probe, endpoint)).collect();
        let pool = stream::iter(checks)
            .buffer_unordered(self.config.concurrency)
            .for_each(|found| {
                if let Some(finding) = found {
                    findings.push(finding);
                }
                future::ready(())
            });
        let timed_out = timeout_at(deadline, pool).await.is_err();
        if timed_out {
            warn!(collected = findings.len(), "Deadline reached, remaining probes cancelled.");
        }

        ProbeRun { endpoints, findings, timed_out }
    }
}

async fn run_probe(probe: Arc<dyn Probe>, endpoint: String) -> Option<Finding> {
    match probe.check(&endpoint).await {
        Ok(Some(finding)) => {
            info!(class = %finding.class, url = %finding.url, "Potential vulnerability found.");
            Some(finding)
        }
        Ok(None) => None,
        Err(e) => {
            warn!(class = %probe.class(), endpoint = %endpoint, error = %e, "Probe failed, no finding recorded.");
            None
        }
    }
}
