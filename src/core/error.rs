// src/core/error.rs

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Errors that abort a scan before any network work starts.
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("invalid target '{input}': {reason}")]
    InvalidTarget { input: String, reason: String },

    #[error("target host '{host}' is outside the allowed domains")]
    OutOfScope { host: String },

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("failed to build HTTP client: {0}")]
    HttpClient(reqwest::Error),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("{0}")]
    Invalid(String),
}

/// A probe that could not reach a verdict. Always recovered by the orchestrator.
#[derive(Error, Debug)]
pub enum ProbeError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("{tool} failed: {reason}")]
    ExternalTool { tool: String, reason: String },

    #[error("{tool} timed out after {after:?}")]
    Timeout { tool: String, after: Duration },
}

/// Outcome of a failed DNS query, as seen by recon.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    #[error("no records found")]
    NotFound,

    #[error("resolver error: {0}")]
    Failed(String),
}

#[derive(Error, Debug)]
pub enum PortScanError {
    #[error("failed to launch {tool}: {source}")]
    Spawn {
        tool: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{tool} exited with {status}: {stderr}")]
    Exit {
        tool: String,
        status: std::process::ExitStatus,
        stderr: String,
    },

    #[error("could not resolve host '{0}'")]
    Resolve(String),
}
