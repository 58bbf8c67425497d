use thiserror::Error;

/// Errors raised while fetching or parsing a single verification page.
///
/// These never escape a resolver's public `resolve` method: the resolver
/// boundary converts them into a logged warning and a `None` result, so one
/// bad certificate cannot abort a batch.
#[derive(Error, Debug)]
pub enum ResolveError {
    #[error("Failed to fetch verification page: {0}")]
    Fetch(#[from] reqwest::Error),

    #[error("Verification page returned status {0}")]
    Status(u16),

    #[error("Failed to parse embedded metadata: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Errors raised by manifest and cache file handling in the batch driver.
#[derive(Error, Debug)]
pub enum CacheError {
    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),
}
