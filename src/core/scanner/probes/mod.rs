// src/core/scanner/probes/mod.rs

//! One module per vulnerability class. Every probe appends its payload to
//! the endpoint literally (`{endpoint}?{param}={payload}`), so the URL kept
//! in a finding is exactly the one that was requested.

mod csrf;
mod deserialization;
mod idor;
mod lfi;
mod misconfig;
mod open_redirect;
mod rfi;
mod sqli;
mod ssrf;
mod xss;

pub use csrf::CsrfProbe;
pub use deserialization::{DeserializationProbe, deserialization_payload, pickle_str_entry};
pub use idor::{IdorProbe, next_id_url};
pub use lfi::{LFI_PAYLOADS, LfiProbe};
pub use misconfig::{EXPOSED_HEADERS, MisconfigProbe};
pub use open_redirect::{OpenRedirectProbe, REDIRECT_TARGET};
pub use rfi::{RFI_INCLUDE, RfiProbe};
pub use sqli::SqliProbe;
pub use ssrf::{SSRF_METADATA_URL, SsrfProbe};
pub use xss::{XSS_PAYLOADS, XssProbe};

use tracing::debug;

use crate::core::http::{HttpClient, HttpResponse};
use crate::core::models::{Finding, VulnerabilityClass};

use super::registry::ProbeOutcome;

/// `{endpoint}?{param}={value}`, with no encoding or merging of existing queries.
pub fn with_param(endpoint: &str, param: &str, value: &str) -> String {
    format!("{endpoint}?{param}={value}")
}

/// Sends each payload in turn and reports the first one whose response
/// satisfies `matches`.
///
/// A transport failure moves on to the next payload; the probe only errors
/// when no payload got a response at all.
async fn first_matching_payload<F>(
    http: &HttpClient,
    class: VulnerabilityClass,
    endpoint: &str,
    param: &str,
    payloads: &[&str],
    matches: F,
) -> ProbeOutcome
where
    F: Fn(&str, &HttpResponse) -> bool + Send + Sync,
{
    let mut last_error = None;
    let mut answered = false;

    for payload in payloads {
        let url = with_param(endpoint, param, payload);
        match http.get(&url).await {
            Ok(response) => {
                answered = true;
                if matches(payload, &response) {
                    return Ok(Some(Finding::new(class, url, *payload)));
                }
            }
            Err(e) => {
                debug!(class = %class, url = %url, error = %e, "Payload request failed, trying next.");
                last_error = Some(e);
            }
        }
    }

    match last_error {
        Some(e) if !answered => Err(e.into()),
        _ => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn params_are_appended_verbatim() {
        assert_eq!(
            with_param("http://example.com/search", "q", "<svg onload=alert('xss')>"),
            "http://example.com/search?q=<svg onload=alert('xss')>"
        );
        // An existing query is not merged, matching how payloads are delivered.
        assert_eq!(
            with_param("http://example.com/?a=1", "file", "../../etc/passwd"),
            "http://example.com/?a=1?file=../../etc/passwd"
        );
    }
}
