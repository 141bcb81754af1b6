//! HTTP client for the emotion analysis endpoint.

use qingxu_core::{AnalyzeRequest, EmotionAnalysis, HealthStatus};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("server returned {status}: {body}")]
    Server { status: u16, body: String },
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ClientError {
    /// True for 4xx responses: retrying the same request will not help.
    pub fn is_client_error(&self) -> bool {
        matches!(self, ClientError::Server { status, .. } if (400..500).contains(status))
    }
}

/// Client for a running qingxu service.
pub struct AnalyzeClient {
    client: reqwest::Client,
    base_url: String,
}

impl AnalyzeClient {
    /// `base_url` should be like `http://localhost:5000`; a trailing slash is trimmed.
    pub fn new(base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Classify one text via `POST /emotion/analyze`.
    pub async fn analyze(&self, text: &str) -> Result<EmotionAnalysis, ClientError> {
        let url = format!("{}/emotion/analyze", self.base_url);
        debug!(url = %url, chars = text.chars().count(), "requesting analysis");
        let resp = self
            .client
            .post(&url)
            .json(&AnalyzeRequest::new(text))
            .send()
            .await?;
        read_json(resp).await
    }

    /// Fetch `GET /health`.
    pub async fn health(&self) -> Result<HealthStatus, ClientError> {
        let url = format!("{}/health", self.base_url);
        let resp = self.client.get(&url).send().await?;
        read_json(resp).await
    }
}

async fn read_json<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, ClientError> {
    let status = resp.status();
    let body = resp.text().await?;
    if !status.is_success() {
        return Err(ClientError::Server {
            status: status.as_u16(),
            body,
        });
    }
    Ok(serde_json::from_str(&body)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use qingxu_core::Emotion;

    #[test]
    fn client_trims_trailing_slash() {
        let client = AnalyzeClient::new("http://localhost:5000/".into());
        assert_eq!(client.base_url(), "http://localhost:5000");
    }

    #[test]
    fn parses_service_response() {
        let json = r#"{
            "emotion": 1,
            "intensity": 0.8731,
            "probabilities": { "0": 0.0412, "1": 0.9588 }
        }"#;
        let parsed: EmotionAnalysis = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.emotion, Emotion::Positive);
        assert!((parsed.probabilities[&Emotion::Negative] - 0.0412).abs() < 1e-12);
    }

    #[test]
    fn request_body_shape() {
        let body = serde_json::to_string(&AnalyzeRequest::new("你好")).unwrap();
        assert_eq!(body, r#"{"text":"你好"}"#);
    }

    #[test]
    fn server_error_classes() {
        let bad = ClientError::Server {
            status: 400,
            body: String::new(),
        };
        assert!(bad.is_client_error());
        let internal = ClientError::Server {
            status: 500,
            body: String::new(),
        };
        assert!(!internal.is_client_error());
    }
}
