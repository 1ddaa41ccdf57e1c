//! Google Cloud Text-to-Speech provider.

use {
    anyhow::{Context, Result, anyhow},
    async_trait::async_trait,
    base64::Engine,
    bytes::Bytes,
    reqwest::Client,
    secrecy::{ExposeSecret, Secret},
    serde::{Deserialize, Serialize},
};

use {
    super::{AudioFormat, AudioOutput, SynthesizeRequest, TtsProvider},
    crate::config::TtsConfig,
};

/// Google Cloud Text-to-Speech API base URL.
const API_BASE: &str = "https://texttospeech.googleapis.com";

/// Google Cloud Text-to-Speech provider.
pub struct GoogleTts {
    client: Client,
    api_key: Option<Secret<String>>,
    language_code: String,
    voice: Option<String>,
    base_url: String,
}

impl std::fmt::Debug for GoogleTts {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoogleTts")
            .field("api_key", &"[REDACTED]")
            .field("language_code", &self.language_code)
            .field("voice", &self.voice)
            .finish()
    }
}

impl GoogleTts {
    /// Create a new Google Cloud TTS provider from config.
    #[must_use]
    pub fn new(config: &TtsConfig) -> Self {
        let api_key = config
            .api_key
            .clone()
            .or_else(|| std::env::var("GOOGLE_API_KEY").ok().map(Secret::new));

        Self {
            client: Client::new(),
            api_key,
            language_code: config
                .language_code
                .clone()
                .unwrap_or_else(|| "en-US".into()),
            voice: config.voice.clone(),
            base_url: API_BASE.into(),
        }
    }

    #[cfg(test)]
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
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
impl TtsProvider for GoogleTts {
    fn id(&self) -> &'static str {
        "google"
    }

    fn name(&self) -> &'static str {
        "Google Cloud TTS"
    }

    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    async fn synthesize(&self, request: SynthesizeRequest) -> Result<AudioOutput> {
        let api_key = self
            .api_key
            .as_ref()
            .ok_or_else(|| anyhow!("Google Cloud TTS API key not configured"))?;

        // A named voice wins; otherwise the service picks a neutral-gender
        // voice for the language.
        let voice_name = request.voice.clone().or_else(|| self.voice.clone());

        let req_body = SynthesizeRequestBody {
            input: SynthesisInput { text: request.text },
            voice: VoiceSelectionParams {
                language_code: self.language_code.clone(),
                name: voice_name,
                ssml_gender: Some("NEUTRAL".into()),
            },
            audio_config: AudioConfig {
                audio_encoding: Self::encoding(request.output_format).into(),
            },
        };

        let url = format!(
            "{}/v1/text:synthesize?key={}",
            self.base_url,
            api_key.expose_secret()
        );

        let resp = self
            .client
            .post(&url)
            .json(&req_body)
            .send()
            .await
            .context("failed to send Google synthesis request")?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(anyhow!("Google Cloud TTS API error {}: {}", status, body));
        }

        let synth_resp: SynthesizeResponse = resp
            .json()
            .await
            .context("failed to parse Google synthesis response")?;

        let audio_data = base64::engine::general_purpose::STANDARD
            .decode(&synth_resp.audio_content)
            .context("failed to decode synthesized audio")?;

        Ok(AudioOutput {
            data: Bytes::from(audio_data),
            format: request.output_format,
        })
    }
}

// ── API request/response types ─────────────────────────────────────────────

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SynthesizeRequestBody {
    input: SynthesisInput,
    voice: VoiceSelectionParams,
    audio_config: AudioConfig,
}

#[derive(Serialize)]
struct SynthesisInput {
    text: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct VoiceSelectionParams {
    language_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    ssml_gender: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AudioConfig {
    audio_encoding: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SynthesizeResponse {
    audio_content: String,
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn provider(api_key: &str) -> GoogleTts {
        GoogleTts::new(&TtsConfig {
            api_key: Some(Secret::new(api_key.into())),
            language_code: None,
            voice: None,
        })
    }

    #[test]
    fn test_google_tts_id_and_name() {
        let tts = provider("key");
        assert_eq!(tts.id(), "google");
        assert_eq!(tts.name(), "Google Cloud TTS");
        assert!(tts.is_configured());
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let tts = provider("very-secret");
        let debug_output = format!("{tts:?}");
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("very-secret"));
    }

    #[test]
    fn test_default_language_code() {
        let tts = provider("key");
        assert_eq!(tts.language_code, "en-US");
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
        async fn test_synthesize_success() {
            let mock_server = MockServer::start().await;

            let audio = base64::engine::general_purpose::STANDARD.encode(b"RIFF fake wav data");
            let response_body = serde_json::json!({ "audioContent": audio });

            Mock::given(method("POST"))
                .and(path("/v1/text:synthesize"))
                .and(query_param("key", "test-api-key"))
                .and(body_partial_json(serde_json::json!({
                    "input": { "text": "I love this!" },
                    "voice": { "languageCode": "en-US", "ssmlGender": "NEUTRAL" },
                    "audioConfig": { "audioEncoding": "LINEAR16" }
                })))
                .respond_with(ResponseTemplate::new(200).set_body_json(response_body))
                .mount(&mock_server)
                .await;

            let tts = provider("test-api-key").with_base_url(mock_server.uri());

            let request = SynthesizeRequest {
                text: "I love this!".into(),
                voice: None,
                output_format: AudioFormat::Wav,
            };

            let output = tts.synthesize(request).await.unwrap();
            assert_eq!(&output.data[..], b"RIFF fake wav data");
            assert_eq!(output.format, AudioFormat::Wav);
        }

        #[tokio::test]
        async fn test_synthesize_api_error() {
            let mock_server = MockServer::start().await;

            Mock::given(method("POST"))
                .and(path("/v1/text:synthesize"))
                .respond_with(
                    ResponseTemplate::new(429)
                        .set_body_string(r#"{"error": {"message": "quota exceeded"}}"#),
                )
                .mount(&mock_server)
                .await;

            let tts = provider("key").with_base_url(mock_server.uri());

            let request = SynthesizeRequest {
                text: "hello".into(),
                voice: None,
                output_format: AudioFormat::Wav,
            };

            let result = tts.synthesize(request).await;
            assert!(result.is_err());
            assert!(result.unwrap_err().to_string().contains("429"));
        }

        #[tokio::test]
        async fn test_synthesize_without_api_key() {
            let tts = GoogleTts {
                client: Client::new(),
                api_key: None,
                language_code: "en-US".into(),
                voice: None,
                base_url: API_BASE.into(),
            };

            let request = SynthesizeRequest {
                text: "hello".into(),
                voice: None,
                output_format: AudioFormat::Wav,
            };

            let result = tts.synthesize(request).await;
            assert!(result.is_err());
            assert!(result.unwrap_err().to_string().contains("not configured"));
        }
    }
}
