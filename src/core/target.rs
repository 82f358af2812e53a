// src/core/target.rs

use url::Url;

use crate::core::error::ScanError;

/// A parsed scan target.
///
/// The operator may type either a bare domain (`example.com`) or a base URL
/// (`http://example.com:8080/app`). Recon works on the host, probing works on
/// the base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    raw: String,
    base_url: Url,
    host: String,
}

impl Target {
    pub fn parse(input: &str) -> Result<Self, ScanError> {
        let raw = input.trim();
        let invalid = |reason: &str| ScanError::InvalidTarget {
            input: input.to_string(),
            reason: reason.to_string(),
        };

        if raw.is_empty() {
            return Err(invalid("target is empty"));
        }
        if raw.chars().any(char::is_whitespace) {
            return Err(invalid("target contains whitespace"));
        }

        let lowered = raw.to_ascii_lowercase();
        let with_scheme = if lowered.starts_with("http://") || lowered.starts_with("https://") {
            raw.to_string()
        } else if raw.contains("://") {
            return Err(invalid("only http and https targets are supported"));
        } else {
            format!("https://{}", raw)
        };

        let base_url = Url::parse(&with_scheme).map_err(|e| invalid(&e.to_string()))?;
        let host = base_url
            .host_str()
            .filter(|h| !h.is_empty())
            .ok_or_else(|| invalid("target has no host"))?
            .trim_end_matches('.')
            .to_string();

        // A bare word is not a domain; IP literals are accepted as-is.
        if base_url.domain().is_some() && !host.contains('.') && host != "localhost" {
            return Err(invalid("host is not a fully qualified domain"));
        }

        Ok(Self {
            raw: raw.to_string(),
            base_url,
            host,
        })
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Host name (or IP literal) used for DNS and port recon.
    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The normalized base URL that probes append payloads to.
    pub fn url_string(&self) -> String {
        self.base_url.to_string()
    }
}
