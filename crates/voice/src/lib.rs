//! Voice capabilities for parlo: Text-to-Speech (TTS) and Speech-to-Text (STT).
//!
//! This crate provides provider-agnostic abstractions for the two speech
//! services, with Google Cloud REST implementations.

pub mod config;
pub mod stt;
pub mod tts;

pub use {
    config::{SttConfig, TtsConfig, VoiceConfig},
    stt::{GoogleStt, SttProvider, TranscribeRequest, Transcript},
    tts::{AudioFormat, AudioOutput, GoogleTts, SynthesizeRequest, TtsProvider},
};
