use crate::analyzer::{AnalysisReport, Analyzer};
use crate::features::FeatureVector;
use crate::fusion::Verdict;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;

/// Minimum length of an analyzable email body; shorter requests are
/// rejected here so the core can assume a non-trivial input string.
const MIN_EMAIL_LENGTH: usize = 5;

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub email: String,
    #[serde(default)]
    pub share_body: bool,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub score: f64,
    pub verdict: Verdict,
    pub feedback: Vec<String>,
    pub details: AnalysisDetails,
}

#[derive(Debug, Serialize)]
pub struct AnalysisDetails {
    pub features: FeatureVector,
    pub urls: Vec<String>,
    pub hosts: Vec<String>,
}

impl From<AnalysisReport> for AnalyzeResponse {
    fn from(report: AnalysisReport) -> Self {
        AnalyzeResponse {
            score: report.score,
            verdict: report.verdict,
            feedback: report.feedback,
            details: AnalysisDetails {
                features: report.features,
                urls: report.urls,
                hosts: report.hosts,
            },
        }
    }
}

pub fn router(analyzer: Arc<Analyzer>) -> Router {
    Router::new()
        .route("/analyze", post(analyze))
        .with_state(analyzer)
}

async fn analyze(
    State(analyzer): State<Arc<Analyzer>>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<AnalyzeResponse>, (StatusCode, Json<serde_json::Value>)> {
    if request.email.chars().count() < MIN_EMAIL_LENGTH {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "email required"})),
        ));
    }

    let report = analyzer.analyze(&request.email, request.share_body).await;
    Ok(Json(report.into()))
}

/// Bind and serve the analysis API until the process is stopped.
pub async fn serve(listen: &str, analyzer: Arc<Analyzer>) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(listen).await?;
    log::info!("phishguard API listening on {}", listen);
    axum::serve(listener, router(analyzer)).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_too_short_email_is_rejected() {
        let analyzer = Arc::new(Analyzer::heuristic_only());
        let request = AnalyzeRequest {
            email: "hey".to_string(),
            share_body: false,
        };

        let result = analyze(State(analyzer), Json(request)).await;
        let (status, _) = result.err().expect("short email should be rejected");
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_minimum_length_counts_characters_not_bytes() {
        let analyzer = Arc::new(Analyzer::heuristic_only());
        // 3 characters but 6 bytes: still too short
        let request = AnalyzeRequest {
            email: "ééé".to_string(),
            share_body: false,
        };

        let result = analyze(State(analyzer), Json(request)).await;
        let (status, _) = result.err().expect("3-character email should be rejected");
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_analyze_returns_report_shape() {
        let analyzer = Arc::new(Analyzer::heuristic_only());
        let request = AnalyzeRequest {
            email: "URGENT: verify your password at http://paypa1-secure.tk/login now"
                .to_string(),
            share_body: false,
        };

        let Json(response) = analyze(State(analyzer), Json(request)).await.unwrap();
        assert!(response.score > 0.0);
        assert!(!response.feedback.is_empty());
        assert_eq!(response.details.urls.len(), 1);
        assert_eq!(response.details.hosts, vec!["paypa1-secure.tk".to_string()]);

        let body = serde_json::to_value(&response).unwrap();
        assert!(body["details"]["features"]["suspicious_tld_links"].is_u64());
        assert_eq!(body["verdict"], json!(response.verdict));
    }
}
