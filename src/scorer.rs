use crate::features::FeatureVector;

// Fixed evidence weights. TLD abuse and shorteners weigh heaviest; body
// length is a weak tiebreaker.
const W_LINKS: f64 = 0.10;
const W_SUSPICIOUS_TLD_LINKS: f64 = 0.25;
const W_SHORTENER_LINKS: f64 = 0.20;
const W_ANCHOR_MISMATCH: f64 = 0.15;
const W_IDN_IN_LINKS: f64 = 0.10;
const W_URGENCY_HITS: f64 = 0.18;
const W_RISKY_ATTACHMENT_LINKS: f64 = 0.18;
const W_BRAND_DISTANCE: f64 = 0.08;
const W_LONG_BODY: f64 = 0.05;

/// Steepness of the saturating exponential transform.
const DECAY: f64 = 0.45;

/// Map a feature vector to a base probability in [0, 1].
///
/// The weighted evidence sum goes through `1 - e^(-0.45 * s)`: zero evidence
/// maps to exactly zero, the result grows monotonically with every feature,
/// and it saturates below 1 no matter how large the counts get.
pub fn base_probability(features: &FeatureVector) -> f64 {
    let s = weighted_sum(features);
    (1.0 - (-DECAY * s).exp()).clamp(0.0, 1.0)
}

fn weighted_sum(features: &FeatureVector) -> f64 {
    f64::from(features.links) * W_LINKS
        + f64::from(features.suspicious_tld_links) * W_SUSPICIOUS_TLD_LINKS
        + f64::from(features.shortener_links) * W_SHORTENER_LINKS
        + f64::from(features.anchor_mismatch) * W_ANCHOR_MISMATCH
        + f64::from(features.idn_in_links) * W_IDN_IN_LINKS
        + f64::from(features.urgency_hits) * W_URGENCY_HITS
        + f64::from(features.risky_attachment_links) * W_RISKY_ATTACHMENT_LINKS
        + f64::from(features.brand_distance) * W_BRAND_DISTANCE
        + f64::from(features.long_body) * W_LONG_BODY
}
