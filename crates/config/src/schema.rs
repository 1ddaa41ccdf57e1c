//! Config schema types (server, storage, voice, sentiment).

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Top-level parlo configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ParloConfig {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub voice: parlo_voice::VoiceConfig,
    pub sentiment: parlo_sentiment::SentimentConfig,
}

/// HTTP server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind to.
    pub bind: String,
    /// Port to listen on.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1".into(),
            port: 5000,
        }
    }
}

/// File storage settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory holding accepted uploads.
    pub uploads_dir: PathBuf,
    /// Directory holding synthesis output.
    pub tts_dir: PathBuf,
    /// Path of the static recorder script.
    pub script: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            uploads_dir: "uploads".into(),
            tts_dir: "tts".into(),
            script: "script.js".into(),
        }
    }
}
