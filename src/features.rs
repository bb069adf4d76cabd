use crate::distance::levenshtein;
use crate::lists;
use crate::urls::HostResolver;
use serde::{Deserialize, Serialize};

/// Body-length threshold above which `long_body` triggers.
const LONG_BODY_CHARS: usize = 5000;

/// Minimum distance between hosts and a mentioned brand before the mention
/// counts as a mismatch. Distance 0-1 means the host plausibly belongs to
/// the brand.
const MISMATCH_THRESHOLD: usize = 2;

/// Distance assumed when a brand is mentioned but no hosts exist at all.
/// Intentional default preserved from the reference logic; changing it
/// would alter scoring outcomes.
const NO_HOST_DISTANCE: usize = 3;

/// Cap applied to the reported brand distance.
const BRAND_DISTANCE_CAP: usize = 6;

/// Fixed-shape record of non-negative phishing signals extracted from one
/// email. All counts are per-request; nothing is cached across requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureVector {
    pub links: u32,
    pub suspicious_tld_links: u32,
    pub shortener_links: u32,
    pub anchor_mismatch: u32,
    pub idn_in_links: u8,
    pub urgency_hits: u32,
    pub risky_attachment_links: u32,
    pub brand_distance: u32,
    pub long_body: u8,
}

impl FeatureVector {
    pub fn zeroed() -> Self {
        Self {
            links: 0,
            suspicious_tld_links: 0,
            shortener_links: 0,
            anchor_mismatch: 0,
            idn_in_links: 0,
            urgency_hits: 0,
            risky_attachment_links: 0,
            brand_distance: 0,
            long_body: 0,
        }
    }
}

/// Build the feature vector from the extracted URLs, their resolved hosts
/// (already filtered of empty parse failures) and the normalized text.
pub fn build_features(urls: &[String], hosts: &[String], text: &str) -> FeatureVector {
    let lower = text.to_lowercase();

    let suspicious_tld_links = hosts
        .iter()
        .filter(|h| {
            let tld = HostResolver::top_level_label(h);
            lists::SUSPICIOUS_TLDS.contains(&tld.as_str())
        })
        .count() as u32;

    let shortener_links = hosts
        .iter()
        .filter(|h| lists::SHORTENER_DOMAINS.contains(&h.as_str()))
        .count() as u32;

    let idn_in_links = hosts.iter().any(|h| HostResolver::is_idn(h));

    let risky_attachment_links = urls
        .iter()
        .filter(|u| {
            let u = u.to_lowercase();
            lists::RISKY_EXTENSIONS.iter().any(|ext| u.ends_with(ext))
        })
        .count() as u32;

    let urgency_hits = lists::URGENCY_KEYWORDS
        .iter()
        .filter(|kw| lower.contains(*kw))
        .count() as u32;

    let mut anchor_mismatch = 0u32;
    for brand in lists::KNOWN_BRANDS.iter().copied() {
        if lower.contains(brand) && min_brand_distance(hosts, brand) >= MISMATCH_THRESHOLD {
            anchor_mismatch += 1;
        }
    }

    let brand_distance = lists::KNOWN_BRANDS
        .iter()
        .copied()
        .map(|brand| min_brand_distance(hosts, brand))
        .min()
        .unwrap_or(NO_HOST_DISTANCE)
        .min(BRAND_DISTANCE_CAP) as u32;

    FeatureVector {
        links: urls.len() as u32,
        suspicious_tld_links,
        shortener_links,
        anchor_mismatch,
        idn_in_links: u8::from(idn_in_links),
        urgency_hits,
        risky_attachment_links,
        brand_distance,
        long_body: u8::from(lower.chars().count() > LONG_BODY_CHARS),
    }
}

/// Minimum edit distance between a brand and the first label of any host.
/// With no hosts the distance defaults to "mismatched" rather than zero.
fn min_brand_distance(hosts: &[String], brand: &str) -> usize {
    hosts
        .iter()
        .map(|h| levenshtein(HostResolver::first_label(h), brand))
        .min()
        .unwrap_or(NO_HOST_DISTANCE)
}
