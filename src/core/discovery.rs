// src/core/discovery.rs

use std::collections::HashSet;

use tracing::{debug, info, warn};
use url::Url;

use crate::core::http::HttpClient;
use crate::core::parser::parse_page;
use crate::core::target::Target;

/// Crawls the target's root page for probe-able endpoints.
#[derive(Debug, Clone)]
pub struct EndpointDiscovery {
    http: HttpClient,
}

impl EndpointDiscovery {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    /// Returns the target URL followed by every in-scope form action and link
    /// found on its root page, deduplicated, in discovery order.
    ///
    /// A failed fetch degrades to the target URL alone.
    pub async fn discover(&self, target: &Target) -> Vec<String> {
        let root = target.url_string();
        let mut endpoints = Endpoints::new(root.clone());

        info!(target = %root, "Starting endpoint discovery.");
        let response = match self.http.get(&root).await {
            Ok(response) => response,
            Err(e) => {
                warn!(target = %root, error = %e, "Root page fetch failed, probing target only.");
                return endpoints.into_vec();
            }
        };

        let page = parse_page(&response.body);
        debug!(forms = page.forms.len(), links = page.links.len(), "Parsed root page.");

        let base = target.base_url();
        for form in &page.forms {
            match form.action.as_deref() {
                Some(action) => endpoints.push_resolved(base, action),
                None => endpoints.push(root.clone()),
            }
        }
        for href in &page.links {
            endpoints.push_resolved(base, href);
        }

        info!(count = endpoints.len(), "Endpoint discovery finished.");
        endpoints.into_vec()
    }
}

/// Insertion-ordered, exact-string-deduplicated endpoint list.
struct Endpoints {
    seen: HashSet<String>,
    ordered: Vec<String>,
}

impl Endpoints {
    fn new(root: String) -> Self {
        let mut endpoints = Self { seen: HashSet::new(), ordered: Vec::new() };
        endpoints.push(root);
        endpoints
    }

    fn push(&mut self, url: String) {
        if self.seen.insert(url.clone()) {
            self.ordered.push(url);
        }
    }

    fn push_resolved(&mut self, base: &Url, reference: &str) {
        match resolve_in_scope(base, reference) {
            Some(url) => self.push(url),
            None => debug!(reference, "Skipping out-of-scope or unparsable URL."),
        }
    }

    fn len(&self) -> usize {
        self.ordered.len()
    }

    fn into_vec(self) -> Vec<String> {
        self.ordered
    }
}

/// Resolves `reference` against `base` and keeps it only if it stays on the
/// same scheme, host and port.
pub fn resolve_in_scope(base: &Url, reference: &str) -> Option<String> {
    let mut resolved = base.join(reference).ok()?;
    resolved.set_fragment(None);

    let same_origin = resolved.scheme() == base.scheme()
        && resolved.host_str() == base.host_str()
        && resolved.port_or_known_default() == base.port_or_known_default();

    same_origin.then(|| resolved.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("http://example.com/shop/").unwrap()
    }

    #[test]
    fn relative_references_resolve_against_target() {
        assert_eq!(resolve_in_scope(&base(), "cart").as_deref(), Some("http://example.com/shop/cart"));
        assert_eq!(resolve_in_scope(&base(), "/login?next=1").as_deref(), Some("http://example.com/login?next=1"));
        assert_eq!(resolve_in_scope(&base(), "#top").as_deref(), Some("http://example.com/shop/"));
    }

    #[test]
    fn foreign_origins_are_dropped() {
        assert_eq!(resolve_in_scope(&base(), "https://example.com/shop/"), None);
        assert_eq!(resolve_in_scope(&base(), "http://evil.com/"), None);
        assert_eq!(resolve_in_scope(&base(), "http://example.com:8080/"), None);
        assert_eq!(resolve_in_scope(&base(), "mailto:admin@example.com"), None);
        assert_eq!(resolve_in_scope(&base(), "javascript:void(0)"), None);
    }

    #[test]
    fn explicit_default_port_is_same_origin() {
        assert_eq!(
            resolve_in_scope(&base(), "http://example.com:80/a").as_deref(),
            Some("http://example.com/a")
        );
    }
}
