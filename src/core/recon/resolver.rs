// src/core/recon/resolver.rs

use async_trait::async_trait;
use hickory_resolver::TokioAsyncResolver;
use hickory_resolver::config::{ResolverConfig, ResolverOpts};
use hickory_resolver::error::{ResolveError, ResolveErrorKind};
use hickory_resolver::proto::rr::RecordType;
use tracing::debug;

use crate::core::error::LookupError;

/// DNS lookups as recon needs them: records rendered as text, with
/// "does not exist" kept apart from every other failure.
#[async_trait]
pub trait NameResolver: Send + Sync {
    async fn resolve(&self, host: &str, record_type: RecordType) -> Result<Vec<String>, LookupError>;
}

/// Resolver backed by hickory using the system-independent default upstreams.
pub struct HickoryNameResolver {
    resolver: TokioAsyncResolver,
}

impl HickoryNameResolver {
    pub fn new() -> Self {
        Self {
            resolver: TokioAsyncResolver::tokio(ResolverConfig::default(), ResolverOpts::default()),
        }
    }
}

impl Default for HickoryNameResolver {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl NameResolver for HickoryNameResolver {
    async fn resolve(&self, host: &str, record_type: RecordType) -> Result<Vec<String>, LookupError> {
        debug!(host, record_type = %record_type, "Resolving.");
        let lookup = self.resolver.lookup(host, record_type).await.map_err(classify)?;
        let records: Vec<String> = lookup.iter().map(|r| r.to_string()).collect();
        if records.is_empty() {
            return Err(LookupError::NotFound);
        }
        Ok(records)
    }
}

fn classify(error: ResolveError) -> LookupError {
    match error.kind() {
        ResolveErrorKind::NoRecordsFound { .. } => LookupError::NotFound,
        _ => LookupError::Failed(error.to_string()),
    }
}
