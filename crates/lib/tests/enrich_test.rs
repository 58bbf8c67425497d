//! # Orchestrator Tests
//!
//! Covers batch chunking and delay accounting (under paused tokio time),
//! platform dispatch, and partial-failure completion.

use async_trait::async_trait;
use certscout::enrich::{BatchPolicy, Enricher};
use certscout::platform::CertificatePlatform;
use certscout::resolvers::{CourseraResolver, SourceResolver};
use certscout::types::{BaseCertificate, EnrichedCertificateData};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn cert(id: &str, verify_url: &str) -> BaseCertificate {
    BaseCertificate {
        id: id.to_string(),
        title: format!("Course {id}"),
        issuer: "Test Issuer".to_string(),
        platform: "Coursera".to_string(),
        year: "2024".to_string(),
        image: format!("/certificates/{id}.webp"),
        verify_url: verify_url.to_string(),
    }
}

/// A resolver that answers instantly and counts its invocations.
struct StubResolver {
    calls: Arc<AtomicUsize>,
}

#[async_trait]
impl SourceResolver for StubResolver {
    async fn resolve(&self, _verify_url: &str) -> Option<EnrichedCertificateData> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Some(EnrichedCertificateData {
            level: Some("Beginner".to_string()),
            ..Default::default()
        })
    }
}

fn stub_enricher(calls: Arc<AtomicUsize>, policy: BatchPolicy) -> Enricher {
    let mut resolvers: BTreeMap<CertificatePlatform, Box<dyn SourceResolver>> = BTreeMap::new();
    resolvers.insert(CertificatePlatform::Coursera, Box::new(StubResolver { calls }));
    Enricher::with_resolvers(resolvers, policy)
}

#[tokio::test(start_paused = true)]
async fn test_seven_certificates_pause_exactly_twice() {
    // --- Arrange ---
    // 7 certificates at chunk size 3 means chunks of 3/3/1 and a delay after
    // the first two chunks only. With the stub answering instantly, the only
    // time that passes is the inter-chunk sleeps.
    let calls = Arc::new(AtomicUsize::new(0));
    let enricher = stub_enricher(
        calls.clone(),
        BatchPolicy {
            chunk_size: 3,
            delay: Duration::from_millis(1000),
        },
    );
    let certs: Vec<BaseCertificate> = (0..7)
        .map(|i| cert(&format!("c{i}"), &format!("https://coursera.org/verify/c{i}")))
        .collect();

    // --- Act ---
    let start = tokio::time::Instant::now();
    let enriched = enricher.enrich_certificates(&certs).await;
    let elapsed = start.elapsed();

    // --- Assert ---
    assert_eq!(enriched.len(), 7);
    assert_eq!(calls.load(Ordering::SeqCst), 7);
    assert_eq!(elapsed, Duration::from_millis(2000));
}

#[tokio::test(start_paused = true)]
async fn test_single_chunk_never_pauses() {
    // --- Arrange ---
    let calls = Arc::new(AtomicUsize::new(0));
    let enricher = stub_enricher(
        calls.clone(),
        BatchPolicy {
            chunk_size: 3,
            delay: Duration::from_millis(1000),
        },
    );
    let certs: Vec<BaseCertificate> = (0..3)
        .map(|i| cert(&format!("c{i}"), &format!("https://coursera.org/verify/c{i}")))
        .collect();

    // --- Act ---
    let start = tokio::time::Instant::now();
    let enriched = enricher.enrich_certificates(&certs).await;
    let elapsed = start.elapsed();

    // --- Assert ---
    assert_eq!(enriched.len(), 3);
    assert_eq!(elapsed, Duration::ZERO);
}

#[tokio::test]
async fn test_unsupported_platforms_skip_without_resolver_calls() {
    // --- Arrange ---
    let calls = Arc::new(AtomicUsize::new(0));
    let enricher = stub_enricher(
        calls.clone(),
        BatchPolicy {
            chunk_size: 3,
            delay: Duration::ZERO,
        },
    );
    let certs = vec![
        cert("credly-1", "https://www.credly.com/badges/abc"),
        cert("aws-1", "https://aws.amazon.com/verification/xyz"),
        cert("google-1", "https://skillshop.exceedlms.com/student/award/42"),
        cert("unknown-1", "https://example.com/cert/123"),
        cert("coursera-1", "https://coursera.org/verify/ok"),
    ];

    // --- Act ---
    let enriched = enricher.enrich_certificates(&certs).await;

    // --- Assert ---
    // Only the Coursera certificate reaches a resolver.
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(enriched.len(), 1);
    assert!(enriched.contains_key("coursera-1"));
}

#[tokio::test]
async fn test_partial_failure_keeps_successes() {
    // --- Arrange ---
    // The mock server lives at 127.0.0.1, so the verify URLs carry the
    // coursera.org fragment in their path to classify as Coursera.
    let server = MockServer::start().await;
    let ok_page = r#"
        <script type="application/ld+json">{"teaches": [{"name": "Skill A"}]}</script>
    "#;
    Mock::given(method("GET"))
        .and(path("/coursera.org/verify/ok1"))
        .respond_with(ResponseTemplate::new(200).set_body_string(ok_page))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/coursera.org/verify/ok2"))
        .respond_with(ResponseTemplate::new(200).set_body_string(ok_page))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/coursera.org/verify/boom"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let mut resolvers: BTreeMap<CertificatePlatform, Box<dyn SourceResolver>> = BTreeMap::new();
    resolvers.insert(
        CertificatePlatform::Coursera,
        Box::new(CourseraResolver::new()),
    );
    let enricher = Enricher::with_resolvers(
        resolvers,
        BatchPolicy {
            chunk_size: 3,
            delay: Duration::ZERO,
        },
    );
    let certs = vec![
        cert("ok1", &format!("{}/coursera.org/verify/ok1", server.uri())),
        cert("boom", &format!("{}/coursera.org/verify/boom", server.uri())),
        cert("ok2", &format!("{}/coursera.org/verify/ok2", server.uri())),
    ];

    // --- Act ---
    let enriched = enricher.enrich_certificates(&certs).await;

    // --- Assert ---
    assert_eq!(enriched.len(), 2);
    assert!(enriched.contains_key("ok1"));
    assert!(enriched.contains_key("ok2"));
    assert!(!enriched.contains_key("boom"));
}
