//! # Core Data Structures
//!
//! The manifest and cache shapes shared by the library and the batch CLI.
//! Field names are camelCase on the wire to match the JSON files the site
//! already consumes.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The on-disk cache: a flat map from certificate id to enriched data.
///
/// A `BTreeMap` keeps the serialized key order deterministic, so repeated
/// runs that produce the same data produce byte-identical files.
pub type EnrichedCertificates = BTreeMap<String, EnrichedCertificateData>;

/// One credential as declared in the static manifest.
///
/// This is the ground-truth record: the pipeline never mutates it, only
/// reads `verify_url` to locate the public verification page.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BaseCertificate {
    /// Unique key; also the key of the enrichment cache.
    pub id: String,
    pub title: String,
    pub issuer: String,
    /// Display label shown on the site. Not the detected platform, which is
    /// derived from `verify_url` at enrichment time.
    pub platform: String,
    pub year: String,
    /// Local asset path for the certificate image.
    pub image: String,
    /// External verification page, used for both platform detection and
    /// metadata extraction.
    pub verify_url: String,
}

/// The manifest file shape: `{ "certificates": [...] }`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CertificateManifest {
    pub certificates: Vec<BaseCertificate>,
}

/// Metadata recovered from a verification page. All fields are optional;
/// a value with nothing set is treated as "no data" and never cached.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedCertificateData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub outcomes: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skills: Vec<String>,
}

impl EnrichedCertificateData {
    /// True when no field carries data, in which case the resolver reports
    /// the certificate as unenriched rather than caching an empty object.
    pub fn is_empty(&self) -> bool {
        self.level.is_none()
            && self.duration.is_none()
            && self.outcomes.is_empty()
            && self.skills.is_empty()
    }
}
