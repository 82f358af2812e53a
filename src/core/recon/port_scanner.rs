// src/core/recon/port_scanner.rs

use std::net::SocketAddr;
use std::ops::RangeInclusive;
use std::time::Duration;

use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use once_cell::sync::Lazy;
use regex::Regex;
use tokio::net::TcpStream;
use tokio::process::Command;
use tokio::time::timeout;
use tracing::{debug, info};

use crate::core::error::PortScanError;

/// One `(host, protocol, port) -> state` entry reported by a scanner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortReport {
    pub host: String,
    pub protocol: String,
    pub port: u16,
    pub state: String,
}

impl PortReport {
    pub fn open(host: &str, protocol: &str, port: u16) -> Self {
        Self {
            host: host.to_string(),
            protocol: protocol.to_string(),
            port,
            state: "open".to_string(),
        }
    }
}

/// TCP-level scan of a host, reporting open ports only.
#[async_trait]
pub trait PortScanner: Send + Sync {
    async fn scan(&self, host: &str, ports: RangeInclusive<u16>) -> Result<Vec<PortReport>, PortScanError>;
}

// --- nmap ---

static PORTS_FIELD: Lazy<Regex> = Lazy::new(|| Regex::new(r"Ports: ([^\t]+)").unwrap());
static PORT_ENTRY: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d+)/([a-z|]+)/([a-z]+)/").unwrap());

/// SYN scan through the `nmap` binary, parsed from its greppable output.
pub struct NmapPortScanner {
    binary: String,
}

impl NmapPortScanner {
    pub fn new(binary: impl Into<String>) -> Self {
        Self { binary: binary.into() }
    }

    fn arguments(host: &str, ports: &RangeInclusive<u16>) -> Vec<String> {
        vec![
            "-sS".to_string(),
            "-p".to_string(),
            format!("{}-{}", ports.start(), ports.end()),
            "--open".to_string(),
            "-oG".to_string(),
            "-".to_string(),
            host.to_string(),
        ]
    }
}

#[async_trait]
impl PortScanner for NmapPortScanner {
    async fn scan(&self, host: &str, ports: RangeInclusive<u16>) -> Result<Vec<PortReport>, PortScanError> {
        let args = Self::arguments(host, &ports);
        info!(tool = %self.binary, ?args, "Launching port scan.");

        let output = Command::new(&self.binary)
            .args(&args)
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|source| PortScanError::Spawn { tool: self.binary.clone(), source })?;

        if !output.status.success() {
            return Err(PortScanError::Exit {
                tool: self.binary.clone(),
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let reports = parse_greppable(&String::from_utf8_lossy(&output.stdout));
        debug!(count = reports.len(), "Parsed nmap output.");
        Ok(reports)
    }
}

/// Parses `nmap -oG` output into port reports.
pub fn parse_greppable(output: &str) -> Vec<PortReport> {
    let mut reports = Vec::new();
    for line in output.lines().filter(|l| l.starts_with("Host: ")) {
        let Some(host) = line.split_whitespace().nth(1) else { continue };
        let Some(ports) = PORTS_FIELD.captures(line).and_then(|c| c.get(1)) else { continue };

        for entry in ports.as_str().split(',').map(str::trim) {
            let Some(caps) = PORT_ENTRY.captures(entry) else { continue };
            let Ok(port) = caps[1].parse::<u16>() else { continue };
            reports.push(PortReport {
                host: host.to_string(),
                protocol: caps[3].to_string(),
                port,
                state: caps[2].to_string(),
            });
        }
    }
    reports
}

// --- TCP connect ---

/// Unprivileged full-handshake sweep over a bounded pool of connections.
pub struct TcpConnectScanner {
    connect_timeout: Duration,
    concurrency: usize,
}

impl TcpConnectScanner {
    pub fn new(connect_timeout: Duration, concurrency: usize) -> Self {
        Self { connect_timeout, concurrency: concurrency.max(1) }
    }
}

#[async_trait]
impl PortScanner for TcpConnectScanner {
    async fn scan(&self, host: &str, ports: RangeInclusive<u16>) -> Result<Vec<PortReport>, PortScanError> {
        let addr = tokio::net::lookup_host((host, 0))
            .await
            .ok()
            .and_then(|mut addrs| addrs.next())
            .ok_or_else(|| PortScanError::Resolve(host.to_string()))?;
        let ip = addr.ip();
        info!(host, %ip, first = ports.start(), last = ports.end(), "Starting TCP connect scan.");

        let connect_timeout = self.connect_timeout;
        let reports: Vec<PortReport> = stream::iter(ports)
            .map(|port| async move {
                match timeout(connect_timeout, TcpStream::connect(SocketAddr::new(ip, port))).await {
                    Ok(Ok(_)) => Some(port),
                    _ => None,
                }
            })
            .buffer_unordered(self.concurrency)
            .filter_map(|open| async move { open })
            .map(|port| PortReport::open(host, "tcp", port))
            .collect()
            .await;

        debug!(open = reports.len(), "TCP connect scan finished.");
        Ok(reports)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GREPPABLE: &str = "# Nmap 7.94 scan initiated as: nmap -sS -p 1-65535 --open -oG - example.com\n\
Host: 93.184.216.34 (example.com)\tStatus: Up\n\
Host: 93.184.216.34 (example.com)\tPorts: 80/open/tcp//http///, 443/open/tcp//https///\tIgnored State: filtered (65533)\n\
# Nmap done at Sat Oct 17 10:00:00 2026 -- 1 IP address (1 host up) scanned in 42.00 seconds\n";

    #[test]
    fn parses_open_ports_from_greppable_output() {
        let reports = parse_greppable(GREPPABLE);
        assert_eq!(
            reports,
            vec![
                PortReport::open("93.184.216.34", "tcp", 80),
                PortReport::open("93.184.216.34", "tcp", 443),
            ]
        );
    }

    #[test]
    fn host_without_ports_yields_nothing() {
        assert!(parse_greppable("Host: 10.0.0.1 ()\tStatus: Up\n").is_empty());
        assert!(parse_greppable("").is_empty());
    }

    #[test]
    fn nmap_arguments_cover_the_requested_range() {
        let args = NmapPortScanner::arguments("example.com", &(1..=65535));
        assert_eq!(args, vec!["-sS", "-p", "1-65535", "--open", "-oG", "-", "example.com"]);
    }

    #[tokio::test]
    async fn connect_scanner_finds_a_listening_port() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        tokio::spawn(async move {
            loop {
                let _ = listener.accept().await;
            }
        });

        let scanner = TcpConnectScanner::new(Duration::from_millis(500), 4);
        let reports = scanner.scan("127.0.0.1", port..=port).await.unwrap();
        assert_eq!(reports, vec![PortReport::open("127.0.0.1", "tcp", port)]);
    }
}
