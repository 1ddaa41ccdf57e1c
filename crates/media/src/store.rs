//! The flat-file store backing the upload and synthesis listings.
//!
//! Two directories, timestamp-derived filenames, sidecar text files. Names
//! are unique only at second granularity of the local clock: two writes in
//! the same second target the same path and the last writer wins. The
//! listings rely on descending lexicographic order standing in for recency.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{Error, Result};

/// Extensions that appear in listings. Sidecar `.txt` files stay on disk but
/// are never listed.
pub const ALLOWED_EXTENSIONS: &[&str] = &["wav"];

/// Local-time stamp, 12-hour clock with AM/PM suffix, second resolution.
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d-%I%M%S%p";

/// Flat-file store over the uploads and tts directories.
#[derive(Debug, Clone)]
pub struct MediaStore {
    uploads_dir: PathBuf,
    tts_dir: PathBuf,
    uploads_name: String,
    tts_name: String,
}

impl MediaStore {
    /// Create a store over the two directories. Call [`MediaStore::init`]
    /// before first use.
    #[must_use]
    pub fn new(uploads_dir: impl Into<PathBuf>, tts_dir: impl Into<PathBuf>) -> Self {
        let uploads_dir = uploads_dir.into();
        let tts_dir = tts_dir.into();
        let uploads_name = dir_name(&uploads_dir);
        let tts_name = dir_name(&tts_dir);
        Self {
            uploads_dir,
            tts_dir,
            uploads_name,
            tts_name,
        }
    }

    /// Create both directories if absent.
    pub async fn init(&self) -> Result<()> {
        for dir in [&self.uploads_dir, &self.tts_dir] {
            tokio::fs::create_dir_all(dir)
                .await
                .map_err(|e| Error::external(format!("failed to create {}", dir.display()), e))?;
        }
        Ok(())
    }

    /// Folder name used in listing links for recordings.
    #[must_use]
    pub fn uploads_name(&self) -> &str {
        &self.uploads_name
    }

    /// Folder name used in listing links for syntheses.
    #[must_use]
    pub fn tts_name(&self) -> &str {
        &self.tts_name
    }

    /// Resolve a request folder name against the two configured directories.
    /// Anything else is refused.
    #[must_use]
    pub fn resolve_folder(&self, name: &str) -> Option<&Path> {
        if name == self.uploads_name {
            Some(&self.uploads_dir)
        } else if name == self.tts_name {
            Some(&self.tts_dir)
        } else {
            None
        }
    }

    /// Persist an uploaded recording; returns the stamped `.wav` filename.
    pub async fn save_recording(&self, audio: &[u8]) -> Result<String> {
        let filename = format!("{}.wav", stamped_stem());
        let path = self.uploads_dir.join(&filename);
        tokio::fs::write(&path, audio)
            .await
            .map_err(|e| Error::external(format!("failed to write {}", path.display()), e))?;
        debug!(%filename, "saved recording");
        Ok(filename)
    }

    /// Write the transcript sidecar next to a recording. The sidecar shares
    /// the recording's full name plus a `.txt` suffix.
    pub async fn write_recording_transcript(
        &self,
        recording_name: &str,
        transcript: &str,
        label: &str,
    ) -> Result<String> {
        let filename = format!("{recording_name}.txt");
        let path = self.uploads_dir.join(&filename);
        let body = format!("Transcription: {transcript}\nSentiment: {label}");
        tokio::fs::write(&path, body)
            .await
            .map_err(|e| Error::external(format!("failed to write {}", path.display()), e))?;
        Ok(filename)
    }

    /// Write the input text and sentiment label for a synthesis; returns the
    /// stamped `.txt` filename whose stem the audio file shares.
    pub async fn save_synthesis_text(&self, text: &str, label: &str) -> Result<String> {
        let filename = format!("{}.txt", stamped_stem());
        let path = self.tts_dir.join(&filename);
        let body = format!("Input Text: {text}\nSentiment: {label}");
        tokio::fs::write(&path, body)
            .await
            .map_err(|e| Error::external(format!("failed to write {}", path.display()), e))?;
        debug!(%filename, "saved synthesis text");
        Ok(filename)
    }

    /// Write synthesized audio as the `.wav` sibling of a synthesis text file.
    pub async fn write_synthesis_audio(&self, text_name: &str, audio: &[u8]) -> Result<String> {
        let stem = text_name
            .strip_suffix(".txt")
            .ok_or_else(|| Error::invalid_input(format!("not a synthesis text name: {text_name}")))?;
        let filename = format!("{stem}.wav");
        let path = self.tts_dir.join(&filename);
        tokio::fs::write(&path, audio)
            .await
            .map_err(|e| Error::external(format!("failed to write {}", path.display()), e))?;
        Ok(filename)
    }

    /// Recordings listing: `.wav` names, newest first.
    pub async fn list_recordings(&self) -> Result<Vec<String>> {
        list_dir(&self.uploads_dir).await
    }

    /// Syntheses listing: `.wav` names, newest first.
    pub async fn list_syntheses(&self) -> Result<Vec<String>> {
        list_dir(&self.tts_dir).await
    }
}

/// Stamped filename stem for the current local time.
fn stamped_stem() -> String {
    chrono::Local::now().format(TIMESTAMP_FORMAT).to_string()
}

fn dir_name(dir: &Path) -> String {
    dir.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| dir.to_string_lossy().into_owned())
}

/// Whether a filename carries one of the listed extensions.
fn allowed_file(filename: &str) -> bool {
    filename.rsplit_once('.').is_some_and(|(_, ext)| {
        ALLOWED_EXTENSIONS
            .iter()
            .any(|allowed| ext.eq_ignore_ascii_case(allowed))
    })
}

/// Filenames in `dir` with an allowed extension, descending lexicographic
/// (timestamp-prefixed names, so newest first).
async fn list_dir(dir: &Path) -> Result<Vec<String>> {
    let mut entries = tokio::fs::read_dir(dir)
        .await
        .map_err(|e| Error::external(format!("failed to read {}", dir.display()), e))?;

    let mut files = Vec::new();
    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|e| Error::external(format!("failed to read {}", dir.display()), e))?
    {
        let name = entry.file_name().to_string_lossy().into_owned();
        if allowed_file(&name) {
            files.push(name);
        }
    }

    files.sort_by(|a, b| b.cmp(a));
    Ok(files)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn test_store(dir: &Path) -> MediaStore {
        MediaStore::new(dir.join("uploads"), dir.join("tts"))
    }

    #[test]
    fn test_allowed_file() {
        assert!(allowed_file("20240101-010101AM.wav"));
        assert!(allowed_file("clip.WAV"));
        assert!(!allowed_file("20240101-010101AM.wav.txt"));
        assert!(!allowed_file("notes.txt"));
        assert!(!allowed_file("no-extension"));
    }

    #[test]
    fn test_stamped_stem_shape() {
        let stem = stamped_stem();
        assert_eq!(stem.len(), "YYYYMMDD-IIMMSSPP".len());
        assert!(stem.ends_with("AM") || stem.ends_with("PM"));
        assert_eq!(stem.as_bytes()[8], b'-');
    }

    #[tokio::test]
    async fn test_init_creates_directories() {
        let tmp = tempfile::tempdir().unwrap();
        let store = test_store(tmp.path());
        store.init().await.unwrap();
        assert!(tmp.path().join("uploads").is_dir());
        assert!(tmp.path().join("tts").is_dir());
    }

    #[tokio::test]
    async fn test_save_recording_and_sidecar() {
        let tmp = tempfile::tempdir().unwrap();
        let store = test_store(tmp.path());
        store.init().await.unwrap();

        let name = store.save_recording(b"RIFF fake").await.unwrap();
        assert!(name.ends_with(".wav"));
        assert_eq!(
            tokio::fs::read(tmp.path().join("uploads").join(&name))
                .await
                .unwrap(),
            b"RIFF fake"
        );

        let sidecar = store
            .write_recording_transcript(&name, "hello world", "Positive")
            .await
            .unwrap();
        assert_eq!(sidecar, format!("{name}.txt"));
        let body = tokio::fs::read_to_string(tmp.path().join("uploads").join(&sidecar))
            .await
            .unwrap();
        assert_eq!(body, "Transcription: hello world\nSentiment: Positive");
    }

    #[tokio::test]
    async fn test_synthesis_text_and_audio_share_stem() {
        let tmp = tempfile::tempdir().unwrap();
        let store = test_store(tmp.path());
        store.init().await.unwrap();

        let text_name = store
            .save_synthesis_text("I love this!", "Positive")
            .await
            .unwrap();
        assert!(text_name.ends_with(".txt"));
        let body = tokio::fs::read_to_string(tmp.path().join("tts").join(&text_name))
            .await
            .unwrap();
        assert_eq!(body, "Input Text: I love this!\nSentiment: Positive");

        let audio_name = store
            .write_synthesis_audio(&text_name, b"RIFF synth")
            .await
            .unwrap();
        assert_eq!(
            audio_name.strip_suffix(".wav").unwrap(),
            text_name.strip_suffix(".txt").unwrap()
        );
    }

    #[tokio::test]
    async fn test_write_synthesis_audio_rejects_non_text_name() {
        let tmp = tempfile::tempdir().unwrap();
        let store = test_store(tmp.path());
        store.init().await.unwrap();

        let result = store.write_synthesis_audio("clip.wav", b"data").await;
        assert!(matches!(result, Err(Error::InvalidInput { .. })));
    }

    #[tokio::test]
    async fn test_listing_filters_sidecars_and_sorts_descending() {
        let tmp = tempfile::tempdir().unwrap();
        let store = test_store(tmp.path());
        store.init().await.unwrap();

        let uploads = tmp.path().join("uploads");
        for name in [
            "20240101-010101AM.wav",
            "20250601-103000PM.wav",
            "20240101-010101AM.wav.txt",
            "stray.log",
        ] {
            tokio::fs::write(uploads.join(name), b"x").await.unwrap();
        }

        let listed = store.list_recordings().await.unwrap();
        assert_eq!(
            listed,
            vec![
                "20250601-103000PM.wav".to_string(),
                "20240101-010101AM.wav".to_string()
            ]
        );
    }

    #[tokio::test]
    async fn test_resolve_folder_whitelist() {
        let tmp = tempfile::tempdir().unwrap();
        let store = test_store(tmp.path());

        assert!(store.resolve_folder("uploads").is_some());
        assert!(store.resolve_folder("tts").is_some());
        assert!(store.resolve_folder("etc").is_none());
        assert!(store.resolve_folder("").is_none());
        assert!(store.resolve_folder("uploads/../etc").is_none());
    }
}
