//! Speech-to-Text provider abstraction and implementations.

mod google;

pub use google::GoogleStt;

use {
    anyhow::Result,
    async_trait::async_trait,
    bytes::Bytes,
    serde::{Deserialize, Serialize},
};

use crate::tts::AudioFormat;

/// Request to transcribe audio to text.
#[derive(Debug, Clone)]
pub struct TranscribeRequest {
    /// Raw audio data.
    pub audio: Bytes,
    /// Audio format.
    pub format: AudioFormat,
    /// Language hint (BCP-47 code, e.g., "en-US").
    pub language: Option<String>,
    /// Channel-count hint for the recognizer.
    pub channels: Option<u32>,
}

/// Transcription result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transcript {
    /// Transcribed text. When the service returns several result segments,
    /// this is their concatenation in result order.
    pub text: String,
    /// Detected language, if reported.
    pub language: Option<String>,
    /// Confidence score (0.0 - 1.0) of the first segment.
    pub confidence: Option<f32>,
}

/// Speech-to-Text provider trait.
///
/// Implementations provide audio transcription using an external service.
#[async_trait]
pub trait SttProvider: Send + Sync {
    /// Provider identifier (e.g., "google").
    fn id(&self) -> &'static str;

    /// Human-readable provider name.
    fn name(&self) -> &'static str;

    /// Check if the provider is configured and ready.
    fn is_configured(&self) -> bool;

    /// Transcribe audio to text.
    async fn transcribe(&self, request: TranscribeRequest) -> Result<Transcript>;
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_transcript_serialization() {
        let transcript = Transcript {
            text: "Hello world".into(),
            language: Some("en-US".into()),
            confidence: Some(0.95),
        };

        let json = serde_json::to_string(&transcript).unwrap();
        assert!(json.contains("\"text\":\"Hello world\""));

        let parsed: Transcript = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.text, "Hello world");
        assert_eq!(parsed.confidence, Some(0.95));
    }

    #[test]
    fn test_transcribe_request() {
        let request = TranscribeRequest {
            audio: Bytes::from_static(b"fake audio data"),
            format: AudioFormat::Wav,
            language: Some("en-US".into()),
            channels: Some(1),
        };

        assert_eq!(request.format, AudioFormat::Wav);
        assert_eq!(request.language.as_deref(), Some("en-US"));
        assert_eq!(request.channels, Some(1));
    }
}
