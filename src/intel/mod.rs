//! External threat-intelligence capabilities.
//!
//! Both providers are optional and credential-gated. Every failure mode
//! (network error, timeout, non-success status, unparseable response)
//! degrades to `None` so the scorer always produces a result; absent
//! credentials are the common case, not an anomaly.

pub mod gemini;
pub mod virustotal;

use crate::features::FeatureVector;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub use gemini::GeminiClient;
pub use virustotal::VirusTotalClient;

/// Summary of external URL-reputation lookups for one analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReputationSignal {
    /// URLs with at least one malicious or suspicious engine verdict.
    pub flagged: u32,
    /// URLs actually looked up (submission errors included).
    pub total: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassifierLabel {
    Phishing,
    Legit,
    #[serde(other)]
    Uncertain,
}

/// Parsed opinion of the generative classifier. `confidence` stays optional;
/// the fusion rules supply label-specific defaults when the model omits it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifierSignal {
    pub label: ClassifierLabel,
    #[serde(default)]
    pub confidence: Option<f64>,
    #[serde(default)]
    pub reasons: Vec<String>,
}

/// Submit-and-await URL reputation capability.
#[async_trait]
pub trait UrlReputation: Send + Sync {
    /// Assess the given scheme-qualified URLs. `None` means no signal.
    async fn assess(&self, urls: &[String]) -> Option<ReputationSignal>;
}

/// Generative text-classification capability.
#[async_trait]
pub trait Classifier: Send + Sync {
    /// Classify an email from its feature summary, host list and optional
    /// body excerpt (empty when the caller did not consent to sharing).
    /// `None` means no signal.
    async fn classify(
        &self,
        features: &FeatureVector,
        hosts: &[String],
        body: &str,
    ) -> Option<ClassifierSignal>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classifier_signal_parses_strict_json() {
        let signal: ClassifierSignal = serde_json::from_str(
            r#"{"label":"phishing","confidence":0.9,"reasons":["lookalike domain"]}"#,
        )
        .unwrap();
        assert_eq!(signal.label, ClassifierLabel::Phishing);
        assert_eq!(signal.confidence, Some(0.9));
        assert_eq!(signal.reasons, vec!["lookalike domain".to_string()]);
    }

    #[test]
    fn test_unknown_label_maps_to_uncertain() {
        let signal: ClassifierSignal =
            serde_json::from_str(r#"{"label":"spam","confidence":0.4}"#).unwrap();
        assert_eq!(signal.label, ClassifierLabel::Uncertain);
    }

    #[test]
    fn test_missing_fields_default() {
        let signal: ClassifierSignal = serde_json::from_str(r#"{"label":"legit"}"#).unwrap();
        assert_eq!(signal.confidence, None);
        assert!(signal.reasons.is_empty());
    }

    #[test]
    fn test_garbage_is_not_a_signal() {
        assert!(serde_json::from_str::<ClassifierSignal>("not json").is_err());
        assert!(serde_json::from_str::<ClassifierSignal>(r#"{"verdict":"bad"}"#).is_err());
    }
}
