use super::{ReputationSignal, UrlReputation};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

const SUBMIT_ENDPOINT: &str = "https://www.virustotal.com/api/v3/urls";
const ANALYSIS_ENDPOINT: &str = "https://www.virustotal.com/api/v3/analyses";

/// Per-analysis cap on URL submissions; anything beyond it is skipped.
const MAX_URLS: usize = 8;
/// Poll attempts per submitted URL before giving up on the analysis.
const POLL_ATTEMPTS: u32 = 5;

/// VirusTotal v3 URL-reputation client. Submits URLs one at a time and
/// polls each analysis until completion or the attempt budget runs out;
/// exhaustion and transport errors count as "no verdict" for that URL.
pub struct VirusTotalClient {
    client: Client,
    api_key: String,
}

impl VirusTotalClient {
    pub fn new(api_key: String) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(20))
            .user_agent(concat!("phishguard/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_default();

        Self { client, api_key }
    }

    /// Submit one URL and return the (malicious, suspicious) counts of its
    /// completed analysis. `None` covers every failure mode.
    async fn scan_url(&self, url: &str) -> Option<(u64, u64)> {
        let response = self
            .client
            .post(SUBMIT_ENDPOINT)
            .header("x-apikey", &self.api_key)
            .form(&[("url", url)])
            .send()
            .await
            .ok()?;

        if !response.status().is_success() {
            log::debug!("reputation submit failed for {}: {}", url, response.status());
            return None;
        }

        let submitted: Value = response.json().await.ok()?;
        let analysis_id = submitted_id(&submitted)?;

        for attempt in 0..POLL_ATTEMPTS {
            let response = self
                .client
                .get(format!("{ANALYSIS_ENDPOINT}/{analysis_id}"))
                .header("x-apikey", &self.api_key)
                .send()
                .await
                .ok()?;

            if !response.status().is_success() {
                return None;
            }

            let analysis: Value = response.json().await.ok()?;
            if let Some(counts) = completed_stats(&analysis) {
                return Some(counts);
            }

            // increasing backoff while the analysis is still queued
            tokio::time::sleep(poll_delay(attempt)).await;
        }

        log::debug!("reputation analysis for {} not ready after {} polls", url, POLL_ATTEMPTS);
        None
    }
}

#[async_trait]
impl UrlReputation for VirusTotalClient {
    async fn assess(&self, urls: &[String]) -> Option<ReputationSignal> {
        if urls.is_empty() {
            return None;
        }

        let mut outcomes = Vec::new();
        for url in submission_batch(urls) {
            outcomes.push(self.scan_url(url).await);
        }

        let signal = summarize(&outcomes);
        log::debug!(
            "reputation signal: {}/{} urls flagged",
            signal.flagged,
            signal.total
        );
        Some(signal)
    }
}

/// The URLs actually submitted in one analysis; anything past the cap is
/// skipped.
fn submission_batch(urls: &[String]) -> &[String] {
    &urls[..urls.len().min(MAX_URLS)]
}

/// Fold per-URL scan outcomes into a signal. A URL is flagged when any
/// engine called it malicious or suspicious; errored lookups still count
/// toward the total.
fn summarize(outcomes: &[Option<(u64, u64)>]) -> ReputationSignal {
    let flagged = outcomes
        .iter()
        .filter(|o| matches!(o, Some((malicious, suspicious)) if malicious + suspicious > 0))
        .count() as u32;

    ReputationSignal {
        flagged,
        total: outcomes.len() as u32,
    }
}

/// Backoff before the next poll of a still-queued analysis.
fn poll_delay(attempt: u32) -> Duration {
    Duration::from_millis(1000 + u64::from(attempt) * 400)
}

fn submitted_id(response: &Value) -> Option<String> {
    response["data"]["id"].as_str().map(|s| s.to_string())
}

/// Extract engine stats from an analysis response, or `None` while the
/// analysis is still pending.
fn completed_stats(analysis: &Value) -> Option<(u64, u64)> {
    let attributes = &analysis["data"]["attributes"];
    if attributes["status"].as_str()? != "completed" {
        return None;
    }
    let stats = &attributes["stats"];
    Some((
        stats["malicious"].as_u64().unwrap_or(0),
        stats["suspicious"].as_u64().unwrap_or(0),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_submitted_id_from_submit_response() {
        let response = json!({"data": {"id": "u-abc123", "type": "analysis"}});
        assert_eq!(submitted_id(&response), Some("u-abc123".to_string()));
        assert_eq!(submitted_id(&json!({"error": "bad key"})), None);
    }

    #[test]
    fn test_completed_stats_requires_completed_status() {
        let pending = json!({"data": {"attributes": {"status": "queued"}}});
        assert_eq!(completed_stats(&pending), None);

        let completed = json!({
            "data": {"attributes": {
                "status": "completed",
                "stats": {"malicious": 3, "suspicious": 1, "harmless": 60}
            }}
        });
        assert_eq!(completed_stats(&completed), Some((3, 1)));
    }

    #[test]
    fn test_completed_stats_tolerates_missing_counts() {
        let sparse = json!({"data": {"attributes": {"status": "completed"}}});
        assert_eq!(completed_stats(&sparse), Some((0, 0)));
    }

    #[test]
    fn test_submission_batch_caps_at_eight_urls() {
        let urls: Vec<String> = (0..9).map(|i| format!("http://example{i}.com")).collect();
        let batch = submission_batch(&urls);
        assert_eq!(batch.len(), MAX_URLS);
        assert_eq!(summarize(&vec![None; batch.len()]).total, 8);

        let few: Vec<String> = urls[..3].to_vec();
        assert_eq!(submission_batch(&few).len(), 3);
    }

    #[test]
    fn test_summarize_counts_flagged_and_errored_urls() {
        let outcomes = vec![
            Some((2, 0)), // malicious
            Some((0, 1)), // suspicious
            Some((0, 0)), // clean
            None,         // submit/poll failure
        ];
        let signal = summarize(&outcomes);
        assert_eq!(signal.flagged, 2);
        assert_eq!(signal.total, 4);
    }

    #[test]
    fn test_poll_schedule_is_bounded_and_increasing() {
        assert_eq!(POLL_ATTEMPTS, 5);
        assert_eq!(poll_delay(0), Duration::from_millis(1000));
        assert_eq!(poll_delay(4), Duration::from_millis(2600));
        for attempt in 1..POLL_ATTEMPTS {
            assert!(poll_delay(attempt) > poll_delay(attempt - 1));
        }
    }
}
