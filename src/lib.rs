// src/lib.rs

//! Single-target web reconnaissance and vulnerability probing.
//!
//! [`ScanOrchestrator`] takes a domain or base URL, discovers its
//! subdomains, open ports and endpoints, runs the enabled probes against
//! every endpoint and returns a [`ScanResult`].

pub mod config;
pub mod core;
pub mod logging;
pub mod report;

pub use config::ScanConfig;
pub use crate::core::models::{Finding, ScanResult, VulnerabilityClass};
pub use crate::core::ScanOrchestrator;
