//! # Metadata Extraction
//!
//! Pulls structured certificate metadata out of a fetched verification page.
//! Extraction runs in two tiers, tried in order: embedded JSON-LD (the rich
//! path), then the OpenGraph description meta tag (a one-line fallback).
//! The first tier that yields any data wins.

use crate::types::EnrichedCertificateData;
use scraper::{Html, Selector};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

/// One extraction tier. Implementations must be infallible: a page the tier
/// cannot handle yields `None`, never an error.
pub trait MetadataExtractor: Send + Sync {
    fn extract(&self, html: &str) -> Option<EnrichedCertificateData>;
}

/// Runs the standard tiers over a page body and returns the first non-empty
/// result.
pub fn extract_metadata(html: &str) -> Option<EnrichedCertificateData> {
    let tiers: [&dyn MetadataExtractor; 2] = [&JsonLdExtractor, &OpenGraphExtractor];
    tiers.iter().find_map(|tier| tier.extract(html))
}

// --- Tier 1: JSON-LD ---

/// The subset of schema.org Course fields the site cares about. Everything
/// is defaulted so partially-populated blocks still deserialize.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct JsonLdCourse {
    teaches: Vec<JsonLdTeaches>,
    time_required: Option<String>,
    educational_level: Option<String>,
}

/// `teaches` entries appear both as bare strings and as `{ "name": ... }`
/// objects in the wild.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum JsonLdTeaches {
    Named { name: String },
    Plain(String),
}

impl JsonLdTeaches {
    fn name(&self) -> &str {
        match self {
            JsonLdTeaches::Named { name } => name,
            JsonLdTeaches::Plain(name) => name,
        }
    }
}

/// Extracts from the first `<script type="application/ld+json">` block.
pub struct JsonLdExtractor;

impl JsonLdExtractor {
    fn map_course(value: Value) -> Option<EnrichedCertificateData> {
        let course: JsonLdCourse = serde_json::from_value(value).ok()?;
        let skills: Vec<String> = course
            .teaches
            .iter()
            .map(|t| t.name().to_string())
            .filter(|name| !name.is_empty())
            .collect();
        // The site shows at most four learning outcomes, so the outcome list
        // is the leading slice of the skills.
        let outcomes: Vec<String> = skills.iter().take(4).cloned().collect();

        let data = EnrichedCertificateData {
            level: course.educational_level,
            duration: course.time_required,
            outcomes,
            skills,
        };
        (!data.is_empty()).then_some(data)
    }
}

impl MetadataExtractor for JsonLdExtractor {
    fn extract(&self, html: &str) -> Option<EnrichedCertificateData> {
        let selector = Selector::parse(r#"script[type="application/ld+json"]"#).ok()?;
        let document = Html::parse_document(html);
        let script = document.select(&selector).next()?;
        let raw = script.text().collect::<String>();

        let value: Value = match serde_json::from_str(raw.trim()) {
            Ok(value) => value,
            Err(e) => {
                debug!("JSON-LD block did not parse, falling through: {e}");
                return None;
            }
        };

        // Some pages wrap the course in a top-level array or @graph list;
        // take the first element that yields data.
        match value {
            Value::Array(items) => items.into_iter().find_map(Self::map_course),
            other => Self::map_course(other),
        }
    }
}

// --- Tier 2: OpenGraph fallback ---

/// Wraps the `og:description` meta tag as a single learning outcome. Much
/// weaker than JSON-LD, but better than an empty card.
pub struct OpenGraphExtractor;

impl MetadataExtractor for OpenGraphExtractor {
    fn extract(&self, html: &str) -> Option<EnrichedCertificateData> {
        let selector = Selector::parse(r#"meta[property="og:description"]"#).ok()?;
        let document = Html::parse_document(html);
        let description = document
            .select(&selector)
            .next()?
            .value()
            .attr("content")?
            .trim();

        if description.is_empty() {
            return None;
        }
        Some(EnrichedCertificateData {
            outcomes: vec![description.to_string()],
            ..Default::default()
        })
    }
}
