//! # Coursera Resolver
//!
//! Coursera verification pages embed a schema.org Course block as JSON-LD,
//! which carries skills, duration and level. Pages that predate the JSON-LD
//! rollout still expose a usable `og:description`.

use super::SourceResolver;
use crate::errors::ResolveError;
use crate::extract::extract_metadata;
use crate::types::EnrichedCertificateData;
use async_trait::async_trait;
use tracing::{debug, info, warn};

/// Static identity for outbound requests; Coursera serves the full page to
/// anything that looks like a browser.
const USER_AGENT: &str = "Mozilla/5.0 (compatible; certscout/0.1; +https://github.com/certscout)";

/// Resolver for `coursera.org` verification pages.
pub struct CourseraResolver {
    client: reqwest::Client,
}

impl CourseraResolver {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    /// The fallible inner path: fetch the page and run the extraction tiers.
    ///
    /// `Ok(None)` means the page was fetched but carried no usable metadata.
    async fn fetch_and_extract(
        &self,
        verify_url: &str,
    ) -> Result<Option<EnrichedCertificateData>, ResolveError> {
        info!("Fetching verification page: {verify_url}");
        let response = self
            .client
            .get(verify_url)
            .header("User-Agent", USER_AGENT)
            .header("Accept", "text/html")
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ResolveError::Status(response.status().as_u16()));
        }

        let body = response.text().await?;
        Ok(extract_metadata(&body))
    }
}

impl Default for CourseraResolver {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SourceResolver for CourseraResolver {
    async fn resolve(&self, verify_url: &str) -> Option<EnrichedCertificateData> {
        match self.fetch_and_extract(verify_url).await {
            Ok(Some(data)) => Some(data),
            Ok(None) => {
                debug!("No extractable metadata at {verify_url}");
                None
            }
            Err(e) => {
                warn!("Enrichment failed for {verify_url}: {e}");
                None
            }
        }
    }
}
