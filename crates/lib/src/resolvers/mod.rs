//! # Source Resolvers
//!
//! One resolver per platform that knows how to turn a verification URL into
//! enrichment data. Only Coursera is implemented today; Credly, AWS and
//! Google verification pages render their data client-side or behind an API
//! and are skipped by the orchestrator without a resolver call.
//!
//! TODO: Credly resolver — their badge metadata is available from the public
//! `api.credly.com/v1/obi/badge_assertions` endpoint rather than the page.

mod coursera;

pub use coursera::CourseraResolver;

use crate::types::EnrichedCertificateData;
use async_trait::async_trait;

/// The contract every platform resolver implements.
///
/// Resolution is deliberately infallible at this boundary: fetch and parse
/// failures are logged inside the resolver and surface as `None`, so a
/// single flaky page never aborts a batch. Unresolved certificates stay out
/// of the cache and are naturally retried on the next run.
#[async_trait]
pub trait SourceResolver: Send + Sync {
    /// Fetches the verification page and extracts whatever metadata it
    /// carries, or `None` if the page yields nothing usable.
    async fn resolve(&self, verify_url: &str) -> Option<EnrichedCertificateData>;
}
