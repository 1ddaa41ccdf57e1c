//! Shared app state handed to every handler.

use std::{path::PathBuf, sync::Arc};

use {
    parlo_media::MediaStore,
    parlo_sentiment::SentimentProvider,
    parlo_voice::{SttProvider, TtsProvider},
};

/// Everything a handler needs: the file store, the three external-service
/// capabilities, and the static script path. Built once at startup and
/// cloned per request.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<MediaStore>,
    pub stt: Arc<dyn SttProvider>,
    pub tts: Arc<dyn TtsProvider>,
    pub sentiment: Arc<dyn SentimentProvider>,
    pub script_path: PathBuf,
}
