use std::path::{Path, PathBuf};

use crate::audio_library::AudioLibrary;
use crate::timing_store::JsonTimingStore;

/// Default language hint passed to the transcriber.
pub const DEFAULT_LANGUAGE: &str = "en";

/// Default audio file extension for chapter recordings.
pub const DEFAULT_AUDIO_EXTENSION: &str = "mp3";

/// Where a batch run reads text and audio from, and where it writes timings.
///
/// This struct represents *library-level configuration*, not CLI flags directly.
/// The CLI is responsible for mapping user input into this type so that other
/// frontends (tests, services) can construct it programmatically.
///
/// The alignment core never reads configuration; only the batch driver and the
/// transcriber setup do.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// The `bible.json` document holding book/chapter/verse text.
    pub bible_json: PathBuf,

    /// Root of the chapter audio tree (`<audio_dir>/<book>/<chapter>.<ext>`).
    pub audio_dir: PathBuf,

    /// Extension of chapter audio files, without the dot.
    pub audio_extension: String,

    /// Root of the output tree (`<timing_dir>/<book>/<chapter>.json`).
    pub timing_dir: PathBuf,

    /// whisper.cpp model file (ggml).
    pub model_path: PathBuf,

    /// Language hint for transcription; `None` lets the engine auto-detect.
    pub language: Option<String>,
}

impl Config {
    /// Default layout of a site checkout rooted at `root`.
    pub fn from_project_root(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        let data = root.join("site").join("src").join("data");

        Self {
            bible_json: data.join("bible.json"),
            audio_dir: root.join("site").join("public").join("audio"),
            audio_extension: DEFAULT_AUDIO_EXTENSION.to_owned(),
            timing_dir: data.join("timing"),
            model_path: root.join("models").join("ggml-base.bin"),
            language: Some(DEFAULT_LANGUAGE.to_owned()),
        }
    }

    pub fn audio_library(&self) -> AudioLibrary {
        AudioLibrary::new(&self.audio_dir, &self.audio_extension)
    }

    pub fn timing_store(&self) -> JsonTimingStore {
        JsonTimingStore::new(&self.timing_dir)
    }
}
