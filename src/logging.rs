// src/logging.rs

use std::fs::{self, File};
use std::path::PathBuf;

use color_eyre::eyre::Result;
use directories::ProjectDirs;
use lazy_static::lazy_static;
use time::{UtcOffset, format_description::well_known::Rfc3339};
use tracing_error::ErrorLayer;
use tracing_subscriber::{EnvFilter, Layer, fmt::time::OffsetTime, layer::SubscriberExt, util::SubscriberInitExt};

lazy_static! {
    pub static ref PROJECT_NAME: String = env!("CARGO_CRATE_NAME").to_uppercase();
    /// `BOUNTY_RS_SCANNER_LOGLEVEL`, consulted when `RUST_LOG` is unset.
    pub static ref LOG_ENV: String = format!("{}_LOGLEVEL", *PROJECT_NAME);
    pub static ref LOG_FILE: String = format!("{}.log", env!("CARGO_PKG_NAME"));
}

fn project_directory() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "bounty-rs", env!("CARGO_PKG_NAME"))
}

/// Where logs and exported reports go. Falls back to `./.data`.
pub fn get_data_dir() -> PathBuf {
    project_directory()
        .map(|dirs| dirs.data_local_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from(".").join(".data"))
}

/// Where `config.toml` is looked up. Falls back to `./.config`.
pub fn get_config_dir() -> PathBuf {
    project_directory()
        .map(|dirs| dirs.config_local_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from(".").join(".config"))
}

pub fn log_file_path() -> PathBuf {
    get_data_dir().join(LOG_FILE.as_str())
}

fn env_filter() -> EnvFilter {
    let directives = std::env::var("RUST_LOG")
        .or_else(|_| std::env::var(LOG_ENV.as_str()))
        .unwrap_or_else(|_| format!("{}=info", env!("CARGO_CRATE_NAME")));
    EnvFilter::new(directives)
}

/// Sends all tracing output to a truncated log file in the data dir.
///
/// The terminal belongs to the UI, so nothing is written to stdout or stderr.
pub fn initialize_logging() -> Result<()> {
    fs::create_dir_all(get_data_dir())?;
    let log_file = File::create(log_file_path())?;

    // Local offset lookup fails once other threads exist; fall back to UTC.
    let timer = OffsetTime::local_rfc_3339().unwrap_or_else(|_| OffsetTime::new(UtcOffset::UTC, Rfc3339));

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(log_file)
        .with_timer(timer)
        .with_target(false)
        .with_ansi(false)
        .with_filter(env_filter());

    tracing_subscriber::registry()
        .with(file_layer)
        .with(ErrorLayer::default())
        .init();
    Ok(())
}
