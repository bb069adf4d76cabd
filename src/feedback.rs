use crate::features::FeatureVector;

/// Emitted when nothing else triggers; the feedback list is never empty.
pub const NO_INDICATORS: &str = "No strong phishing indicators in content";

/// Derive the human-readable indicator list from a feature vector.
///
/// Messages appear in a fixed priority order so callers can rely on a
/// stable sequence.
pub fn build_feedback(features: &FeatureVector) -> Vec<String> {
    let mut feedback = Vec::new();

    if features.suspicious_tld_links > 0 {
        feedback.push("Links use high-risk TLDs".to_string());
    }
    if features.shortener_links > 0 {
        feedback.push("Links use URL shorteners".to_string());
    }
    if features.anchor_mismatch > 0 {
        feedback.push("Brand names do not match link hosts".to_string());
    }
    if features.idn_in_links > 0 {
        feedback.push("Links include non-ASCII domains".to_string());
    }
    if features.urgency_hits > 0 {
        feedback.push("Urgent or coercive language detected".to_string());
    }
    if features.risky_attachment_links > 0 {
        feedback.push("Links to risky attachment types".to_string());
    }
    if features.brand_distance >= 2 {
        feedback.push("Sender/links resemble brands but do not match".to_string());
    }
    if features.long_body > 0 {
        feedback.push("Unusually long body content".to_string());
    }

    if feedback.is_empty() {
        feedback.push(NO_INDICATORS.to_string());
    }
    feedback
}
