// src/core/http.rs

use std::time::Duration;

use reqwest::header::HeaderMap;
use reqwest::{Client, StatusCode, redirect::Policy};
use tracing::debug;

const MAX_REDIRECTS: usize = 5;

/// A fully read HTTP response.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl HttpResponse {
    /// Returns a header value as text, if present and valid UTF-8.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

/// Thin wrapper around two reqwest clients sharing one configuration,
/// one following redirects and one returning 3xx responses as-is.
#[derive(Debug, Clone)]
pub struct HttpClient {
    follow: Client,
    no_follow: Client,
    timeout: Duration,
}

impl HttpClient {
    pub fn new(user_agent: &str, timeout: Duration) -> Result<Self, reqwest::Error> {
        let follow = Client::builder()
            .user_agent(user_agent)
            .redirect(Policy::limited(MAX_REDIRECTS))
            .build()?;
        let no_follow = Client::builder()
            .user_agent(user_agent)
            .redirect(Policy::none())
            .build()?;
        Ok(Self { follow, no_follow, timeout })
    }

    /// GET `url`, following redirects.
    pub async fn get(&self, url: &str) -> Result<HttpResponse, reqwest::Error> {
        Self::send(&self.follow, url, self.timeout).await
    }

    /// GET `url` without following redirects.
    pub async fn get_no_redirect(&self, url: &str) -> Result<HttpResponse, reqwest::Error> {
        Self::send(&self.no_follow, url, self.timeout).await
    }

    async fn send(client: &Client, url: &str, timeout: Duration) -> Result<HttpResponse, reqwest::Error> {
        debug!(url, "Sending request.");
        let response = client.get(url).timeout(timeout).send().await?;
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.text().await?;
        debug!(url, status = %status, bytes = body.len(), "Received response.");
        Ok(HttpResponse { status, headers, body })
    }
}
