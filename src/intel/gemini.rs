use super::{Classifier, ClassifierSignal};
use crate::features::FeatureVector;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use std::time::Duration;

const ENDPOINT: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-1.5-flash:generateContent";

/// Body excerpt limit sent to the model.
const BODY_EXCERPT_CHARS: usize = 6000;

const INSTRUCTION: &str =
    r#"Return strict JSON: {"label":"phishing|legit|uncertain","confidence":0..1,"reasons":["..."]}."#;

/// Generative classifier backed by Gemini. The model is asked for strict
/// JSON; anything that does not parse back into a signal is discarded.
pub struct GeminiClient {
    client: Client,
    api_key: String,
}

impl GeminiClient {
    pub fn new(api_key: String) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(25))
            .user_agent(concat!("phishguard/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_default();

        Self { client, api_key }
    }

    fn request_body(features: &FeatureVector, hosts: &[String], body: &str) -> Value {
        let signals = json!({"features": features, "hosts": hosts});
        let excerpt: String = body.chars().take(BODY_EXCERPT_CHARS).collect();

        json!({
            "contents": [{
                "role": "user",
                "parts": [
                    {"text": INSTRUCTION},
                    {"text": format!("Signals: {signals}")},
                    {"text": format!("Body: {excerpt}")}
                ]
            }],
            "generationConfig": {
                "temperature": 0.2,
                "responseMimeType": "application/json"
            }
        })
    }
}

#[async_trait]
impl Classifier for GeminiClient {
    async fn classify(
        &self,
        features: &FeatureVector,
        hosts: &[String],
        body: &str,
    ) -> Option<ClassifierSignal> {
        let request = Self::request_body(features, hosts, body);

        let response = self
            .client
            .post(format!("{ENDPOINT}?key={}", self.api_key))
            .json(&request)
            .send()
            .await
            .ok()?;

        if !response.status().is_success() {
            log::debug!("classifier request failed: {}", response.status());
            return None;
        }

        let payload: Value = response.json().await.ok()?;
        let text = candidate_text(&payload)?;
        match serde_json::from_str::<ClassifierSignal>(&text) {
            Ok(signal) => Some(signal),
            Err(e) => {
                log::debug!("classifier returned unparseable opinion: {}", e);
                None
            }
        }
    }
}

/// Pull the first candidate's text part out of a generateContent response.
fn candidate_text(payload: &Value) -> Option<String> {
    payload["candidates"][0]["content"]["parts"][0]["text"]
        .as_str()
        .map(|s| s.to_string())
}
