//! # Batch Run Logic
//!
//! Loads the manifest and cache, computes the work list, invokes the
//! enricher, merges, and persists. Kept separate from `main` so the whole
//! run can be driven against a temporary data directory in tests.

use certscout::errors::CacheError;
use certscout::types::{BaseCertificate, CertificateManifest, EnrichedCertificates};
use certscout::Enricher;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

pub const MANIFEST_FILE: &str = "certificates.json";
pub const CACHE_FILE: &str = "certificates.enriched.json";

#[derive(Error, Debug)]
pub enum RunError {
    /// A missing or unreadable manifest makes the whole run meaningless, so
    /// this is the one fatal path (exit code 1).
    #[error("Certificate manifest not found at {0}")]
    ManifestMissing(PathBuf),

    #[error("Failed to load certificate manifest: {0}")]
    ManifestInvalid(#[source] CacheError),

    #[error("Failed to write enrichment cache: {0}")]
    CacheWrite(#[source] CacheError),
}

#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Directory holding the manifest and the enrichment cache.
    pub data_dir: PathBuf,
    /// Re-enrich everything, discarding the existing cache.
    pub force: bool,
}

/// Counts reported after a run, mirrored on stdout.
#[derive(Debug, Clone, Copy)]
pub struct RunSummary {
    pub total: usize,
    pub newly_enriched: usize,
    pub total_enriched: usize,
    pub wrote_cache: bool,
}

fn load_manifest(path: &Path) -> Result<CertificateManifest, RunError> {
    if !path.exists() {
        return Err(RunError::ManifestMissing(path.to_path_buf()));
    }
    let raw = fs::read_to_string(path)
        .map_err(|e| RunError::ManifestInvalid(CacheError::Io(e)))?;
    serde_json::from_str(&raw).map_err(|e| RunError::ManifestInvalid(CacheError::Json(e)))
}

/// Loads the existing cache, or an empty one when forced, absent, or
/// unreadable. A corrupt cache is not fatal: the run simply regenerates it.
fn load_cache(path: &Path, force: bool) -> EnrichedCertificates {
    if force || !path.exists() {
        return EnrichedCertificates::new();
    }
    match fs::read_to_string(path).map_err(CacheError::Io).and_then(|raw| {
        serde_json::from_str::<EnrichedCertificates>(&raw).map_err(CacheError::Json)
    }) {
        Ok(cache) => cache,
        Err(e) => {
            warn!("Ignoring unreadable enrichment cache at {}: {e}", path.display());
            EnrichedCertificates::new()
        }
    }
}

fn write_cache(path: &Path, cache: &EnrichedCertificates) -> Result<(), RunError> {
    let json = serde_json::to_string_pretty(cache)
        .map_err(|e| RunError::CacheWrite(CacheError::Json(e)))?;
    fs::write(path, json + "\n").map_err(|e| RunError::CacheWrite(CacheError::Io(e)))
}

/// Executes one enrichment run and returns the counts it printed.
pub async fn run(enricher: &Enricher, options: &RunOptions) -> Result<RunSummary, RunError> {
    let manifest_path = options.data_dir.join(MANIFEST_FILE);
    let cache_path = options.data_dir.join(CACHE_FILE);

    let manifest = load_manifest(&manifest_path)?;
    let cache = load_cache(&cache_path, options.force);

    let work_list: Vec<BaseCertificate> = manifest
        .certificates
        .iter()
        .filter(|cert| options.force || !cache.contains_key(&cert.id))
        .cloned()
        .collect();

    let total = manifest.certificates.len();
    if work_list.is_empty() {
        println!("All {total} certificates already enriched, nothing to do.");
        return Ok(RunSummary {
            total,
            newly_enriched: 0,
            total_enriched: cache.len(),
            wrote_cache: false,
        });
    }

    info!(
        "Enriching {} of {total} certificates (force: {})",
        work_list.len(),
        options.force
    );
    let fresh = enricher.enrich_certificates(&work_list).await;

    // Shallow merge: fresh entries win, untouched cached entries survive.
    // Under --force the cache started empty, so entries that failed
    // re-enrichment drop out here.
    let mut merged = cache;
    let newly_enriched = fresh.len();
    merged.extend(fresh);

    write_cache(&cache_path, &merged)?;

    println!("Certificates in manifest: {total}");
    println!("Newly enriched: {newly_enriched}");
    println!("Total enriched: {}", merged.len());

    Ok(RunSummary {
        total,
        newly_enriched,
        total_enriched: merged.len(),
        wrote_cache: true,
    })
}
