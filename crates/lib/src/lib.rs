//! # certscout: Certificate Enrichment
//!
//! This crate provides the pipeline for enriching a static certificate
//! manifest with metadata scraped from each certificate's public
//! verification page. The flow is: classify the verification URL into a
//! source platform, dispatch to the platform's resolver, fetch and parse the
//! page (JSON-LD first, OpenGraph fallback), and collect the results keyed
//! by certificate id.

pub mod enrich;
pub mod errors;
pub mod extract;
pub mod platform;
pub mod resolvers;
pub mod types;

pub use enrich::{BatchPolicy, Enricher};
pub use errors::{CacheError, ResolveError};
pub use platform::{detect_platform, CertificatePlatform};
pub use types::{BaseCertificate, CertificateManifest, EnrichedCertificateData, EnrichedCertificates};
