//! Google Natural Language sentiment provider.
//!
//! Uses the `documents:analyzeSentiment` REST endpoint with API key
//! authentication. Documents are submitted as inline plain text.

use {
    anyhow::{Context, Result, anyhow},
    async_trait::async_trait,
    reqwest::Client,
    secrecy::{ExposeSecret, Secret},
    serde::{Deserialize, Serialize},
};

use crate::{Sentiment, SentimentProvider, config::SentimentConfig};

/// Google Natural Language API base URL.
const API_BASE: &str = "https://language.googleapis.com";

/// Google Natural Language sentiment provider.
#[derive(Clone)]
pub struct GoogleSentiment {
    client: Client,
    api_key: Option<Secret<String>>,
    base_url: String,
}

impl std::fmt::Debug for GoogleSentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoogleSentiment")
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

impl GoogleSentiment {
    /// Create a new Google sentiment provider from config.
    #[must_use]
    pub fn new(config: &SentimentConfig) -> Self {
        let api_key = config
            .api_key
            .clone()
            .or_else(|| std::env::var("GOOGLE_API_KEY").ok().map(Secret::new));

        Self {
            client: Client::new(),
            api_key,
            base_url: API_BASE.into(),
        }
    }

    #[cfg(test)]
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[async_trait]
impl SentimentProvider for GoogleSentiment {
    fn id(&self) -> &'static str {
        "google"
    }

    fn name(&self) -> &'static str {
        "Google Natural Language"
    }

    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    async fn analyze(&self, text: &str) -> Result<Sentiment> {
        let api_key = self
            .api_key
            .as_ref()
            .ok_or_else(|| anyhow!("Google Natural Language API key not configured"))?;

        let url = format!(
            "{}/v1/documents:analyzeSentiment?key={}",
            self.base_url,
            api_key.expose_secret()
        );

        let body = AnalyzeSentimentRequest {
            document: Document {
                doc_type: "PLAIN_TEXT".into(),
                content: text.into(),
            },
            encoding_type: "UTF8".into(),
        };

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .context("failed to send Google sentiment request")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow!(
                "Google sentiment request failed: {} - {}",
                status,
                body
            ));
        }

        let analysis: AnalyzeSentimentResponse = response
            .json()
            .await
            .context("failed to parse Google sentiment response")?;

        Ok(Sentiment {
            score: analysis.document_sentiment.score,
            magnitude: analysis.document_sentiment.magnitude,
        })
    }
}

// ── API Types ──────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AnalyzeSentimentRequest {
    document: Document,
    encoding_type: String,
}

#[derive(Debug, Serialize)]
struct Document {
    #[serde(rename = "type")]
    doc_type: String,
    content: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AnalyzeSentimentResponse {
    document_sentiment: DocumentSentiment,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
struct DocumentSentiment {
    score: f32,
    magnitude: f32,
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    fn provider(api_key: &str) -> GoogleSentiment {
        GoogleSentiment::new(&SentimentConfig {
            api_key: Some(Secret::new(api_key.into())),
        })
    }

    #[test]
    fn test_provider_metadata() {
        let configured = provider("test-key");
        assert_eq!(configured.id(), "google");
        assert_eq!(configured.name(), "Google Natural Language");
        assert!(configured.is_configured());
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let provider = provider("super-secret-key");
        let debug_output = format!("{provider:?}");
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("super-secret-key"));
    }

    #[test]
    fn test_response_parsing() {
        let json = r#"{
            "documentSentiment": {"score": 0.8, "magnitude": 1.9},
            "language": "en",
            "sentences": []
        }"#;

        let response: AnalyzeSentimentResponse = serde_json::from_str(json).unwrap();
        assert!((response.document_sentiment.score - 0.8).abs() < f32::EPSILON);
        assert!((response.document_sentiment.magnitude - 1.9).abs() < f32::EPSILON);
    }

    // ── Integration Tests with Mock Server ─────────────────────────────────

    mod integration {
        use {
            super::*,
            wiremock::{
                Mock, MockServer, ResponseTemplate,
                matchers::{body_partial_json, method, path, query_param},
            },
        };

        #[tokio::test]
        async fn test_analyze_success() {
            let mock_server = MockServer::start().await;

            Mock::given(method("POST"))
                .and(path("/v1/documents:analyzeSentiment"))
                .and(query_param("key", "test-api-key"))
                .and(body_partial_json(serde_json::json!({
                    "document": { "type": "PLAIN_TEXT", "content": "I love this!" }
                })))
                .respond_with(ResponseTemplate::new(200).set_body_string(
                    r#"{"documentSentiment": {"score": 0.9, "magnitude": 0.9}}"#,
                ))
                .mount(&mock_server)
                .await;

            let provider = provider("test-api-key").with_base_url(mock_server.uri());

            let sentiment = provider.analyze("I love this!").await.unwrap();
            assert!((sentiment.score - 0.9).abs() < f32::EPSILON);
            assert_eq!(sentiment.label(), crate::SentimentLabel::Positive);
        }

        #[tokio::test]
        async fn test_analyze_api_error() {
            let mock_server = MockServer::start().await;

            Mock::given(method("POST"))
                .and(path("/v1/documents:analyzeSentiment"))
                .respond_with(
                    ResponseTemplate::new(401)
                        .set_body_string(r#"{"error": {"message": "unauthorized"}}"#),
                )
                .mount(&mock_server)
                .await;

            let provider = provider("bad-key").with_base_url(mock_server.uri());

            let result = provider.analyze("some text").await;
            assert!(result.is_err());
            assert!(result.unwrap_err().to_string().contains("401"));
        }

        #[tokio::test]
        async fn test_analyze_without_api_key() {
            let provider = GoogleSentiment {
                client: Client::new(),
                api_key: None,
                base_url: API_BASE.into(),
            };

            let result = provider.analyze("text").await;
            assert!(result.is_err());
            assert!(result.unwrap_err().to_string().contains("not configured"));
        }
    }
}
