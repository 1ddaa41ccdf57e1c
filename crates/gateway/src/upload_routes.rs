//! The two submission endpoints: recorded audio and typed text.
//!
//! Both are sequential glue: persist, call out, persist, redirect. User-input
//! problems flash a notice and write nothing; external-service failures
//! propagate as a generic server error with no cleanup of files already
//! written in the request.

use {
    axum::{
        Form,
        extract::{Multipart, State},
        response::Redirect,
    },
    axum_extra::extract::cookie::CookieJar,
    serde::Deserialize,
    tracing::debug,
};

use parlo_voice::{AudioFormat, SynthesizeRequest, TranscribeRequest};

use crate::{error::GatewayError, flash::set_flash, state::AppState};

/// `POST /upload`
///
/// Multipart form with an `audio_data` attachment.
///
/// Saves the recording under a stamped `.wav` name, transcribes it (en-US,
/// mono), classifies the concatenated transcript, writes the sidecar, and
/// redirects home.
pub async fn upload_audio(
    State(state): State<AppState>,
    jar: CookieJar,
    mut multipart: Multipart,
) -> Result<(CookieJar, Redirect), GatewayError> {
    let mut audio = None;
    while let Some(field) = multipart.next_field().await? {
        if field.name() == Some("audio_data") {
            let file_name = field.file_name().unwrap_or_default().to_owned();
            let data = field.bytes().await?;
            audio = Some((file_name, data));
            break;
        }
    }

    let Some((file_name, data)) = audio else {
        return Ok((set_flash(jar, "No audio data"), Redirect::to("/")));
    };
    if file_name.is_empty() {
        return Ok((set_flash(jar, "No selected file"), Redirect::to("/")));
    }

    let filename = state.store.save_recording(&data).await?;
    debug!(%filename, "recording uploaded");

    let transcript = state
        .stt
        .transcribe(TranscribeRequest {
            audio: data,
            format: AudioFormat::Wav,
            language: Some("en-US".into()),
            channels: Some(1),
        })
        .await?;

    let sentiment = state.sentiment.analyze(&transcript.text).await?;
    state
        .store
        .write_recording_transcript(&filename, &transcript.text, sentiment.label().as_str())
        .await?;

    Ok((jar, Redirect::to("/")))
}

#[derive(Debug, Deserialize)]
pub struct TextForm {
    #[serde(default)]
    pub text: String,
}

/// `POST /upload_text`
///
/// Urlencoded form with a `text` field.
///
/// Classifies the text, writes it with its label under a stamped `.txt`
/// name, synthesizes speech (en-US, neutral voice, linear PCM), writes the
/// sibling `.wav`, and redirects home.
pub async fn upload_text(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<TextForm>,
) -> Result<(CookieJar, Redirect), GatewayError> {
    if form.text.trim().is_empty() {
        return Ok((set_flash(jar, "Text input is empty"), Redirect::to("/")));
    }

    let sentiment = state.sentiment.analyze(&form.text).await?;
    let text_name = state
        .store
        .save_synthesis_text(&form.text, sentiment.label().as_str())
        .await?;
    debug!(%text_name, "synthesis requested");

    let output = state
        .tts
        .synthesize(SynthesizeRequest {
            text: form.text,
            voice: None,
            output_format: AudioFormat::Wav,
        })
        .await?;

    state
        .store
        .write_synthesis_audio(&text_name, &output.data)
        .await?;

    Ok((jar, Redirect::to("/")))
}
