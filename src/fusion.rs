use crate::intel::{ClassifierLabel, ClassifierSignal, ReputationSignal};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Flat boost applied once when any URL is flagged by the reputation
/// provider. Binary trigger, not proportional to the flagged count.
const REPUTATION_BOOST: f64 = 0.35;

/// Fixed bias toward "phishing" when the classifier agrees.
const PHISHING_BIAS: f64 = 0.15;
const PHISHING_FLOOR_WEIGHT: f64 = 0.85;
const LEGIT_DISCOUNT: f64 = 0.2;

/// Confidence assumed when the classifier omits it.
const DEFAULT_PHISHING_CONFIDENCE: f64 = 0.8;
const DEFAULT_LEGIT_CONFIDENCE: f64 = 0.7;

const HIGH_THRESHOLD: f64 = 0.75;
const MEDIUM_THRESHOLD: f64 = 0.45;

/// Three-level risk bucket derived from the final probability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Low,
    Medium,
    High,
}

impl Verdict {
    /// Step function of the fused score; bucket lower bounds are inclusive.
    pub fn from_score(score: f64) -> Self {
        if score >= HIGH_THRESHOLD {
            Verdict::High
        } else if score >= MEDIUM_THRESHOLD {
            Verdict::Medium
        } else {
            Verdict::Low
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Low => write!(f, "low"),
            Verdict::Medium => write!(f, "medium"),
            Verdict::High => write!(f, "high"),
        }
    }
}

/// Blend the base probability with whatever external signals are available.
///
/// The rules form a fixed-order pipeline of pure updates; the reputation
/// rule always applies when its signal is present, and the two classifier
/// rules are mutually exclusive by label. With no signals the base
/// probability passes through unmodified.
pub fn fuse(
    base: f64,
    reputation: Option<&ReputationSignal>,
    classifier: Option<&ClassifierSignal>,
) -> f64 {
    let mut p = base;
    if let Some(signal) = reputation {
        p = apply_reputation(p, signal);
    }
    if let Some(signal) = classifier {
        p = apply_classifier(p, signal);
    }
    p
}

/// Any flagged URL triggers a flat boost, capped at 1.
pub fn apply_reputation(p: f64, signal: &ReputationSignal) -> f64 {
    if signal.flagged > 0 {
        (p + REPUTATION_BOOST).min(1.0)
    } else {
        p
    }
}

/// Asymmetric classifier update: a "phishing" opinion raises the score to a
/// confidence-weighted floor and never lowers it; a "legit" opinion applies
/// a confidence-proportional discount bounded at 0; "uncertain" is a no-op.
pub fn apply_classifier(p: f64, signal: &ClassifierSignal) -> f64 {
    match signal.label {
        ClassifierLabel::Phishing => {
            let confidence = signal.confidence.unwrap_or(DEFAULT_PHISHING_CONFIDENCE);
            let floor = PHISHING_FLOOR_WEIGHT * p.max(confidence) + PHISHING_BIAS;
            p.max(floor).min(1.0)
        }
        ClassifierLabel::Legit => {
            let confidence = signal.confidence.unwrap_or(DEFAULT_LEGIT_CONFIDENCE);
            (p - LEGIT_DISCOUNT * confidence).max(0.0)
        }
        ClassifierLabel::Uncertain => p,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn phishing(confidence: f64) -> ClassifierSignal {
        ClassifierSignal {
            label: ClassifierLabel::Phishing,
            confidence: Some(confidence),
            reasons: Vec::new(),
        }
    }

    fn legit(confidence: f64) -> ClassifierSignal {
        ClassifierSignal {
            label: ClassifierLabel::Legit,
            confidence: Some(confidence),
            reasons: Vec::new(),
        }
    }

    #[test]
    fn test_no_signals_pass_base_through() {
        assert_eq!(fuse(0.42, None, None), 0.42);
    }

    #[test]
    fn test_flagged_reputation_adds_flat_boost() {
        let signal = ReputationSignal { flagged: 1, total: 3 };
        let fused = fuse(0.5, Some(&signal), None);
        assert!((fused - 0.85).abs() < 1e-9);
    }

    #[test]
    fn test_boost_is_binary_not_proportional() {
        let one = ReputationSignal { flagged: 1, total: 8 };
        let many = ReputationSignal { flagged: 8, total: 8 };
        assert_eq!(fuse(0.3, Some(&one), None), fuse(0.3, Some(&many), None));
    }

    #[test]
    fn test_unflagged_reputation_is_a_noop() {
        let signal = ReputationSignal { flagged: 0, total: 5 };
        assert_eq!(fuse(0.5, Some(&signal), None), 0.5);
    }

    #[test]
    fn test_reputation_boost_caps_at_one() {
        let signal = ReputationSignal { flagged: 2, total: 2 };
        assert_eq!(fuse(0.9, Some(&signal), None), 1.0);
    }

    #[test]
    fn test_rules_apply_in_order() {
        // base 0.5, flagged reputation -> 0.85, then phishing @ 0.9:
        // min(1, max(0.85, 0.85 * max(0.85, 0.9) + 0.15)) = 0.915
        let vt = ReputationSignal { flagged: 1, total: 1 };
        let fused = fuse(0.5, Some(&vt), Some(&phishing(0.9)));
        assert!((fused - 0.915).abs() < 1e-9);
    }

    #[test]
    fn test_phishing_opinion_never_lowers_score() {
        let fused = apply_classifier(0.95, &phishing(0.1));
        assert!(fused >= 0.95);
    }

    #[test]
    fn test_legit_opinion_discounts_by_confidence() {
        let fused = apply_classifier(0.5, &legit(0.5));
        assert!((fused - 0.4).abs() < 1e-9);
    }

    #[test]
    fn test_legit_discount_bounded_at_zero() {
        assert_eq!(apply_classifier(0.05, &legit(1.0)), 0.0);
    }

    #[test]
    fn test_uncertain_is_a_noop() {
        let signal = ClassifierSignal {
            label: ClassifierLabel::Uncertain,
            confidence: Some(0.99),
            reasons: Vec::new(),
        };
        assert_eq!(apply_classifier(0.6, &signal), 0.6);
    }

    #[test]
    fn test_missing_confidence_defaults() {
        let phishing_default = ClassifierSignal {
            label: ClassifierLabel::Phishing,
            confidence: None,
            reasons: Vec::new(),
        };
        // floor = 0.85 * max(0.2, 0.8) + 0.15 = 0.83
        let fused = apply_classifier(0.2, &phishing_default);
        assert!((fused - 0.83).abs() < 1e-9);

        let legit_default = ClassifierSignal {
            label: ClassifierLabel::Legit,
            confidence: None,
            reasons: Vec::new(),
        };
        // 0.5 - 0.2 * 0.7 = 0.36
        let fused = apply_classifier(0.5, &legit_default);
        assert!((fused - 0.36).abs() < 1e-9);
    }

    #[test]
    fn test_verdict_bucket_boundaries() {
        assert_eq!(Verdict::from_score(0.75), Verdict::High);
        assert_eq!(Verdict::from_score(0.749999), Verdict::Medium);
        assert_eq!(Verdict::from_score(0.45), Verdict::Medium);
        assert_eq!(Verdict::from_score(0.4499), Verdict::Low);
        assert_eq!(Verdict::from_score(0.0), Verdict::Low);
        assert_eq!(Verdict::from_score(1.0), Verdict::High);
    }
}
