//! # Enrichment Orchestrator
//!
//! Drives a batch of certificates through classification and resolution.
//! Certificates are processed in fixed-size chunks: within a chunk the
//! fetches run concurrently, and between chunks the orchestrator pauses to
//! stay polite toward the upstream verification servers.

use crate::platform::{detect_platform, CertificatePlatform};
use crate::resolvers::{CourseraResolver, SourceResolver};
use crate::types::{BaseCertificate, EnrichedCertificateData, EnrichedCertificates};
use std::collections::BTreeMap;
use std::time::Duration;
use tracing::{debug, info};

/// Rate-limit policy for a batch run.
///
/// The defaults match the behavior the site's cache was built with: chunks
/// of three, one second between chunks. Injectable so tests (and future
/// tuning) can vary them without touching call sites.
#[derive(Debug, Clone, Copy)]
pub struct BatchPolicy {
    pub chunk_size: usize,
    pub delay: Duration,
}

impl Default for BatchPolicy {
    fn default() -> Self {
        Self {
            chunk_size: 3,
            delay: Duration::from_millis(1000),
        }
    }
}

/// Classifies certificates and dispatches them to platform resolvers.
pub struct Enricher {
    resolvers: BTreeMap<CertificatePlatform, Box<dyn SourceResolver>>,
    policy: BatchPolicy,
}

impl Enricher {
    /// The production registry: Coursera only. Credly, AWS and Google have
    /// no resolver and classify-then-skip without a network call.
    pub fn new() -> Self {
        let mut resolvers: BTreeMap<CertificatePlatform, Box<dyn SourceResolver>> =
            BTreeMap::new();
        resolvers.insert(
            CertificatePlatform::Coursera,
            Box::new(CourseraResolver::new()),
        );
        Self {
            resolvers,
            policy: BatchPolicy::default(),
        }
    }

    /// Builds an enricher with an explicit resolver registry and policy.
    pub fn with_resolvers(
        resolvers: BTreeMap<CertificatePlatform, Box<dyn SourceResolver>>,
        policy: BatchPolicy,
    ) -> Self {
        Self { resolvers, policy }
    }

    pub fn with_policy(mut self, policy: BatchPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Enriches a single certificate, or `None` when its platform has no
    /// resolver or the resolver came up empty.
    pub async fn enrich_certificate(
        &self,
        cert: &BaseCertificate,
    ) -> Option<EnrichedCertificateData> {
        let platform = detect_platform(&cert.verify_url);
        match self.resolvers.get(&platform) {
            Some(resolver) => resolver.resolve(&cert.verify_url).await,
            None => {
                debug!(
                    "No resolver for platform '{platform}', skipping certificate '{}'",
                    cert.id
                );
                None
            }
        }
    }

    /// Enriches a batch, returning a map of certificate id to data for every
    /// certificate that yielded something.
    ///
    /// Chunks run strictly in input order; calls within a chunk run
    /// concurrently, and results are keyed by id so completion order is
    /// irrelevant. Failed or unsupported certificates are simply absent from
    /// the map. The batch always completes; there are no retries and no
    /// abort-on-failure path.
    pub async fn enrich_certificates(
        &self,
        certs: &[BaseCertificate],
    ) -> EnrichedCertificates {
        let mut enriched = EnrichedCertificates::new();
        let chunk_size = self.policy.chunk_size.max(1);
        let chunk_count = certs.len().div_ceil(chunk_size);

        for (index, chunk) in certs.chunks(chunk_size).enumerate() {
            info!(
                "Enriching chunk {}/{chunk_count} ({} certificates)",
                index + 1,
                chunk.len()
            );

            let results = futures::future::join_all(
                chunk
                    .iter()
                    .map(|cert| async { (cert.id.clone(), self.enrich_certificate(cert).await) }),
            )
            .await;

            for (id, data) in results {
                if let Some(data) = data {
                    enriched.insert(id, data);
                }
            }

            // Pause between chunks, never after the last one.
            if index + 1 < chunk_count {
                tokio::time::sleep(self.policy.delay).await;
            }
        }

        enriched
    }
}

impl Default for Enricher {
    fn default() -> Self {
        Self::new()
    }
}
