//! Google Cloud Speech-to-Text provider implementation.
//!
//! Uses the synchronous `speech:recognize` REST endpoint with API key
//! authentication. Audio is sent inline as base64.

use {
    anyhow::{Context, Result, anyhow},
    async_trait::async_trait,
    base64::Engine,
    reqwest::Client,
    secrecy::{ExposeSecret, Secret},
    serde::{Deserialize, Serialize},
};

use {
    super::{SttProvider, TranscribeRequest, Transcript},
    crate::{config::SttConfig, tts::AudioFormat},
};

/// Google Cloud Speech API base URL.
const API_BASE: &str = "https://speech.googleapis.com";

/// Google Cloud STT provider.
#[derive(Clone)]
pub struct GoogleStt {
    client: Client,
    api_key: Option<Secret<String>>,
    language: Option<String>,
    base_url: String,
}

impl std::fmt::Debug for GoogleStt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoogleStt")
            .field("api_key", &"[REDACTED]")
            .field("language", &self.language)
            .finish()
    }
}

impl GoogleStt {
    /// Create a new Google STT provider from config.
    #[must_use]
    pub fn new(config: &SttConfig) -> Self {
        let api_key = config
            .api_key
            .clone()
            .or_else(|| std::env::var("GOOGLE_API_KEY").ok().map(Secret::new));

        Self {
            client: Client::new(),
            api_key,
            language: config.language.clone(),
            base_url: API_BASE.into(),
        }
    }

    #[cfg(test)]
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Get the API key, returning an error if not configured.
    fn get_api_key(&self) -> Result<&Secret<String>> {
        self.api_key
            .as_ref()
            .ok_or_else(|| anyhow!("Google Cloud API key not configured"))
    }

    /// Map our AudioFormat to Google's encoding enum.
    fn encoding(format: AudioFormat) -> &'static str {
        match format {
            AudioFormat::Wav => "LINEAR16",
            AudioFormat::Mp3 => "MP3",
        }
    }
}

#[async_trait]
impl SttProvider for GoogleStt {
    fn id(&self) -> &'static str {
        "google"
    }

    fn name(&self) -> &'static str {
        "Google Cloud Speech"
    }

    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    async fn transcribe(&self, request: TranscribeRequest) -> Result<Transcript> {
        let api_key = self.get_api_key()?;

        let url = format!(
            "{}/v1/speech:recognize?key={}",
            self.base_url,
            api_key.expose_secret()
        );

        let audio_content = base64::engine::general_purpose::STANDARD.encode(&request.audio);

        let language_code = request
            .language
            .clone()
            .or_else(|| self.language.clone())
            .unwrap_or_else(|| "en-US".to_string());

        let body = GoogleRequest {
            config: GoogleRecognitionConfig {
                encoding: Self::encoding(request.format).to_string(),
                language_code,
                audio_channel_count: request.channels,
            },
            audio: GoogleAudio {
                content: audio_content,
            },
        };

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .context("failed to send Google transcription request")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow!(
                "Google transcription request failed: {} - {}",
                status,
                body
            ));
        }

        let google_response: GoogleResponse = response
            .json()
            .await
            .context("failed to parse Google response")?;

        Ok(collect_transcript(google_response))
    }
}

/// Concatenate every result segment's top alternative, in result order, with
/// no separator. Language and confidence come from the first segment.
fn collect_transcript(response: GoogleResponse) -> Transcript {
    let language = response
        .results
        .first()
        .and_then(|r| r.language_code.clone());
    let confidence = response
        .results
        .first()
        .and_then(|r| r.alternatives.first())
        .and_then(|a| a.confidence);

    let text: String = response
        .results
        .into_iter()
        .filter_map(|r| r.alternatives.into_iter().next())
        .map(|a| a.transcript)
        .collect();

    Transcript {
        text,
        language,
        confidence,
    }
}

// ── API Types ──────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct GoogleRequest {
    config: GoogleRecognitionConfig,
    audio: GoogleAudio,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GoogleRecognitionConfig {
    encoding: String,
    language_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    audio_channel_count: Option<u32>,
}

#[derive(Debug, Serialize)]
struct GoogleAudio {
    content: String,
}

#[derive(Debug, Deserialize, Default)]
struct GoogleResponse {
    #[serde(default)]
    results: Vec<GoogleResult>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GoogleResult {
    #[serde(default)]
    alternatives: Vec<GoogleAlternative>,
    #[serde(default)]
    language_code: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GoogleAlternative {
    transcript: String,
    #[serde(default)]
    confidence: Option<f32>,
}
