// src/core/mod.rs

// The reconnaissance and vulnerability probing engine. Nothing in here knows
// about the terminal UI or report formats; they only consume `ScanResult`.

/// Data structures shared across the engine: `ScanResult`, `Finding`,
/// `VulnerabilityClass` and the port map.
pub mod models;

pub mod error;
pub mod target;

/// HTTP access used by endpoint discovery and every probe.
pub mod http;
pub mod parser;
pub mod discovery;

/// Subdomain and open-port discovery.
pub mod recon;

/// Probe registry, the individual probes and the scan orchestrator.
pub mod scanner;

/// Static descriptions and remediation advice for each vulnerability class.
pub mod knowledge_base;

pub use scanner::ScanOrchestrator;
