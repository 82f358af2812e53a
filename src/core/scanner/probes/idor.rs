// src/core/scanner/probes/idor.rs

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::StatusCode;
use url::Url;

use crate::core::http::HttpClient;
use crate::core::models::{Finding, VulnerabilityClass};
use crate::core::scanner::registry::{Probe, ProbeOutcome};

static ID_PARAM: Lazy<Regex> = Lazy::new(|| Regex::new(r"id=(\d+)").unwrap());

/// Rewrites the first numeric `id=` parameter of `endpoint` to the next id.
///
/// Returns the rewritten URL and the new id, or `None` when the query has no
/// `id=`, the id is not numeric, or incrementing it would overflow.
pub fn next_id_url(endpoint: &str) -> Option<(String, String)> {
    let parsed = Url::parse(endpoint).ok()?;
    if !parsed.query().is_some_and(|q| q.contains("id=")) {
        return None;
    }

    let caps = ID_PARAM.captures(endpoint)?;
    let next_id = caps[1].parse::<u64>().ok()?.checked_add(1)?.to_string();
    let rewritten = endpoint.replace(&caps[0], &format!("id={next_id}"));
    Some((rewritten, next_id))
}

/// Insecure direct object reference: the neighbouring object is served
/// without an authorization complaint.
pub struct IdorProbe {
    http: HttpClient,
}

impl IdorProbe {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }
}

#[async_trait]
impl Probe for IdorProbe {
    fn class(&self) -> VulnerabilityClass {
        VulnerabilityClass::Idor
    }

    async fn check(&self, endpoint: &str) -> ProbeOutcome {
        let Some((url, next_id)) = next_id_url(endpoint) else {
            return Ok(None);
        };

        let response = self.http.get(&url).await?;
        let served = response.status == StatusCode::OK
            && !response.body.to_lowercase().contains("unauthorized");
        Ok(served.then(|| Finding::new(self.class(), url, next_id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn increments_the_numeric_id() {
        assert_eq!(
            next_id_url("http://example.com/item?id=5"),
            Some(("http://example.com/item?id=6".to_string(), "6".to_string()))
        );
    }

    #[test]
    fn only_the_first_numeric_id_is_used() {
        let (url, id) = next_id_url("http://example.com/a?id=9&page=2&user_id=40").unwrap();
        assert_eq!(url, "http://example.com/a?id=10&page=2&user_id=40");
        assert_eq!(id, "10");
    }

    #[test]
    fn non_numeric_or_missing_ids_are_ignored() {
        assert_eq!(next_id_url("http://example.com/item?id=abc"), None);
        assert_eq!(next_id_url("http://example.com/item?page=1"), None);
        assert_eq!(next_id_url("http://example.com/id=5/item"), None);
        assert_eq!(next_id_url("http://example.com/item?id=18446744073709551615"), None);
    }
}
