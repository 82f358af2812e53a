// src/core/recon/mod.rs

//! Reconnaissance: subdomains that resolve and ports that are open.

pub mod port_scanner;
pub mod resolver;

use std::sync::Arc;

use hickory_resolver::proto::rr::RecordType;
use tracing::{debug, info, warn};

use crate::config::{PortScannerKind, ScanConfig};
use crate::core::error::LookupError;
use crate::core::models::{PortState, PortStatus};

use self::port_scanner::{NmapPortScanner, PortScanner, TcpConnectScanner};
use self::resolver::{HickoryNameResolver, NameResolver};

/// Ports covered by every scan.
pub const FULL_PORT_RANGE: std::ops::RangeInclusive<u16> = 1..=65535;

#[derive(Clone)]
pub struct Recon {
    resolver: Arc<dyn NameResolver>,
    port_scanner: Arc<dyn PortScanner>,
    wordlist: Vec<String>,
}

impl Recon {
    pub fn new(
        resolver: Arc<dyn NameResolver>,
        port_scanner: Arc<dyn PortScanner>,
        wordlist: Vec<String>,
    ) -> Self {
        Self { resolver, port_scanner, wordlist }
    }

    /// Recon wired to the real collaborators selected by `config`.
    pub fn from_config(config: &ScanConfig) -> Self {
        let port_scanner: Arc<dyn PortScanner> = match config.port_scanner {
            PortScannerKind::Nmap => Arc::new(NmapPortScanner::new(config.nmap_path.clone())),
            PortScannerKind::Connect => Arc::new(TcpConnectScanner::new(
                config.port_connect_timeout(),
                config.port_scan_concurrency,
            )),
        };
        Self::new(
            Arc::new(HickoryNameResolver::new()),
            port_scanner,
            config.subdomain_wordlist.clone(),
        )
    }

    /// Returns `{word}.{domain}` for every wordlist entry with an A record, in
    /// wordlist order.
    ///
    /// The domain's NS records are checked first; if that lookup fails in any
    /// way, no candidate is tried and the result is empty.
    pub async fn discover_subdomains(&self, domain: &str) -> Vec<String> {
        info!(domain, "Starting subdomain discovery.");

        match self.resolver.resolve(domain, RecordType::NS).await {
            Ok(ns) => debug!(domain, nameservers = ?ns, "Domain has name servers."),
            Err(e) => {
                warn!(domain, error = %e, "NS lookup failed, skipping subdomain discovery.");
                return Vec::new();
            }
        }

        let mut subdomains: Vec<String> = Vec::new();
        for word in &self.wordlist {
            let candidate = format!("{word}.{domain}");
            if subdomains.contains(&candidate) {
                continue;
            }
            match self.resolver.resolve(&candidate, RecordType::A).await {
                Ok(_) => {
                    debug!(subdomain = %candidate, "Subdomain resolves.");
                    subdomains.push(candidate);
                }
                Err(LookupError::NotFound) => {}
                Err(e) => warn!(subdomain = %candidate, error = %e, "Candidate lookup failed, skipping."),
            }
        }

        info!(count = subdomains.len(), "Subdomain discovery finished.");
        subdomains
    }

    /// Open TCP ports of `host` across the full port range. Scanner failures
    /// yield an empty map.
    pub async fn scan_ports(&self, host: &str) -> PortState {
        info!(host, "Starting port scan.");
        let reports = match self.port_scanner.scan(host, FULL_PORT_RANGE).await {
            Ok(reports) => reports,
            Err(e) => {
                warn!(host, error = %e, "Port scan failed.");
                return PortState::new();
            }
        };

        let ports: PortState = reports
            .into_iter()
            .filter(|r| r.state.eq_ignore_ascii_case("open"))
            .map(|r| (r.port, PortStatus::Open))
            .collect();

        info!(open = ports.len(), "Port scan finished.");
        ports
    }
}
