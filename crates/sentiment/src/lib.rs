//! Sentiment classification for parlo.
//!
//! A provider-agnostic trait for document-level sentiment analysis, a Google
//! Natural Language REST implementation, and the coarse score-to-label
//! mapping used everywhere a sentiment is displayed or persisted.

pub mod config;
mod google;

pub use {config::SentimentConfig, google::GoogleSentiment};

use {
    anyhow::Result,
    async_trait::async_trait,
    serde::{Deserialize, Serialize},
};

/// Document-level sentiment returned by a provider.
///
/// Score is roughly in [-1, 1]; magnitude is ≥ 0 and grows with the amount
/// of emotional content. Only the derived label is ever persisted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sentiment {
    pub score: f32,
    pub magnitude: f32,
}

/// Coarse sentiment label derived from the score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SentimentLabel {
    Positive,
    Neutral,
    Negative,
}

impl SentimentLabel {
    /// Threshold mapping: score > 0.2 is positive, score < -0.2 is negative,
    /// anything else (boundaries included) is neutral.
    #[must_use]
    pub fn from_score(score: f32) -> Self {
        if score > 0.2 {
            Self::Positive
        } else if score < -0.2 {
            Self::Negative
        } else {
            Self::Neutral
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Positive => "Positive",
            Self::Neutral => "Neutral",
            Self::Negative => "Negative",
        }
    }
}

impl std::fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Sentiment {
    /// Label for this sentiment's score.
    #[must_use]
    pub fn label(&self) -> SentimentLabel {
        SentimentLabel::from_score(self.score)
    }
}

/// Sentiment provider trait.
///
/// Implementations classify plain-text documents using an external service.
#[async_trait]
pub trait SentimentProvider: Send + Sync {
    /// Provider identifier (e.g., "google").
    fn id(&self) -> &'static str;

    /// Human-readable provider name.
    fn name(&self) -> &'static str;

    /// Check if the provider is configured and ready.
    fn is_configured(&self) -> bool;

    /// Analyze the sentiment of a plain-text document.
    async fn analyze(&self, text: &str) -> Result<Sentiment>;
}
