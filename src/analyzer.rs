use crate::config::Config;
use crate::features::{self, FeatureVector};
use crate::feedback;
use crate::fusion::{self, Verdict};
use crate::intel::{Classifier, GeminiClient, UrlReputation, VirusTotalClient};
use crate::normalize::TextNormalizer;
use crate::scorer;
use crate::urls::{HostResolver, UrlExtractor};
use serde::Serialize;

/// Result of one analysis: fused score, verdict bucket, indicator list and
/// the raw evidence it was derived from.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub score: f64,
    pub verdict: Verdict,
    pub feedback: Vec<String>,
    pub features: FeatureVector,
    /// Scheme-qualified URLs found in the message.
    pub urls: Vec<String>,
    pub hosts: Vec<String>,
}

/// Stateless analysis pipeline. The heuristic stages are synchronous and
/// side-effect-free; only the optional intelligence providers perform I/O,
/// so any number of analyses may run in parallel.
pub struct Analyzer {
    normalizer: TextNormalizer,
    extractor: UrlExtractor,
    reputation: Option<Box<dyn UrlReputation>>,
    classifier: Option<Box<dyn Classifier>>,
}

impl Analyzer {
    pub fn new(
        reputation: Option<Box<dyn UrlReputation>>,
        classifier: Option<Box<dyn Classifier>>,
    ) -> Self {
        Self {
            normalizer: TextNormalizer::new(),
            extractor: UrlExtractor::new(),
            reputation,
            classifier,
        }
    }

    /// Wire up providers from configuration; a missing key leaves the
    /// corresponding capability absent.
    pub fn from_config(config: &Config) -> Self {
        let reputation: Option<Box<dyn UrlReputation>> = config
            .vt_api_key
            .clone()
            .map(|key| Box::new(VirusTotalClient::new(key)) as Box<dyn UrlReputation>);
        let classifier: Option<Box<dyn Classifier>> = config
            .gemini_api_key
            .clone()
            .map(|key| Box::new(GeminiClient::new(key)) as Box<dyn Classifier>);

        if reputation.is_none() {
            log::info!("no reputation API key configured, URL reputation disabled");
        }
        if classifier.is_none() {
            log::info!("no classifier API key configured, generative opinion disabled");
        }

        Self::new(reputation, classifier)
    }

    /// Offline analyzer with both external capabilities absent.
    pub fn heuristic_only() -> Self {
        Self::new(None, None)
    }

    /// Score one raw email. `share_body` gates whether the message text may
    /// be sent to the generative classifier.
    pub async fn analyze(&self, raw_email: &str, share_body: bool) -> AnalysisReport {
        let text = self.normalizer.normalize(raw_email);
        let urls = self.extractor.extract(raw_email, &text);
        let hosts: Vec<String> = urls
            .iter()
            .map(|u| HostResolver::host_of(u))
            .filter(|h| !h.is_empty())
            .collect();

        let features = features::build_features(&urls, &hosts, &text);
        let base = scorer::base_probability(&features);
        log::debug!("features {:?} -> base probability {:.3}", features, base);

        // Only scheme-qualified URLs are eligible for reputation lookup.
        let public_urls: Vec<String> = self
            .extractor
            .scheme_qualified(&urls)
            .into_iter()
            .cloned()
            .collect();

        let reputation = match &self.reputation {
            Some(provider) if !public_urls.is_empty() => provider.assess(&public_urls).await,
            _ => None,
        };

        let classifier = match &self.classifier {
            Some(provider) => {
                let body = if share_body { text.as_str() } else { "" };
                provider.classify(&features, &hosts, body).await
            }
            None => None,
        };

        let score = fusion::fuse(base, reputation.as_ref(), classifier.as_ref());
        let verdict = Verdict::from_score(score);
        log::info!(
            "analysis complete: base {:.3}, fused {:.3}, verdict {}",
            base,
            score,
            verdict
        );

        AnalysisReport {
            score,
            verdict,
            feedback: feedback::build_feedback(&features),
            features,
            urls: public_urls,
            hosts,
        }
    }
}
