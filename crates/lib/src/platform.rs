//! # Platform Classification
//!
//! Maps a verification URL to the platform that hosts it, by substring
//! matching against known domain fragments in a fixed priority order.

use std::fmt;

/// The closed set of platforms a verification URL can resolve to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CertificatePlatform {
    Coursera,
    Credly,
    Aws,
    Google,
    Unknown,
}

impl fmt::Display for CertificatePlatform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CertificatePlatform::Coursera => "coursera",
            CertificatePlatform::Credly => "credly",
            CertificatePlatform::Aws => "aws",
            CertificatePlatform::Google => "google",
            CertificatePlatform::Unknown => "unknown",
        };
        f.write_str(name)
    }
}

/// Classifies a verification URL by its hosting platform.
///
/// The input is not required to be a well-formed URL; any string is accepted
/// and unrecognized input classifies as `Unknown`. Checks run in a fixed
/// order and the first match wins.
///
/// NOTE: the order matters. `credly.com/badges` also appears in the AWS
/// check, but Credly is evaluated first, so AWS badges hosted on Credly
/// classify as `Credly`. This looks like a latent misclassification, but
/// reordering would silently reclassify already-cached certificates on a
/// forced re-run, so the existing precedence is kept.
pub fn detect_platform(verify_url: &str) -> CertificatePlatform {
    let url = verify_url.to_ascii_lowercase();

    if url.contains("coursera.org") {
        CertificatePlatform::Coursera
    } else if url.contains("credly.com") {
        CertificatePlatform::Credly
    } else if url.contains("aws.amazon.com") || url.contains("credly.com/badges") {
        CertificatePlatform::Aws
    } else if url.contains("google.com") || url.contains("skillshop.exceedlms.com") {
        CertificatePlatform::Google
    } else {
        CertificatePlatform::Unknown
    }
}
