use std::path::Path;

use anyhow::Context;
use tracing::debug;
use whisper_rs::WhisperContext;

use crate::Result;
use crate::transcriber::Transcriber;
use crate::words::RecognizedWord;

mod audio;
mod ctx;
mod words;

pub use audio::{WHISPER_SAMPLE_RATE, load_mono_16k};

/// Built-in transcriber powered by `whisper-rs` / `whisper.cpp`.
///
/// The model is loaded once and reused for every chapter.
pub struct WhisperTranscriber {
    ctx: WhisperContext,
}

impl WhisperTranscriber {
    /// Load a ggml Whisper model (e.g. `models/ggml-base.bin`).
    pub fn new(model_path: impl AsRef<Path>) -> Result<Self> {
        let ctx = ctx::load_context(model_path.as_ref())?;
        Ok(Self { ctx })
    }

    /// Transcribe already-decoded mono 16 kHz samples.
    pub fn transcribe_samples(
        &self,
        samples: &[f32],
        language: Option<&str>,
    ) -> Result<Vec<RecognizedWord>> {
        if samples.is_empty() {
            return Ok(Vec::new());
        }
        Ok(words::recognize_words(&self.ctx, language, samples)?)
    }
}

impl Transcriber for WhisperTranscriber {
    fn transcribe(&mut self, audio: &Path, language: Option<&str>) -> Result<Vec<RecognizedWord>> {
        let samples = load_mono_16k(audio)
            .with_context(|| format!("failed to decode '{}'", audio.display()))?;
        debug!(
            audio = %audio.display(),
            seconds = samples.len() as f64 / WHISPER_SAMPLE_RATE as f64,
            "decoded audio"
        );

        let words = self.transcribe_samples(&samples, language)?;
        debug!(audio = %audio.display(), words = words.len(), "transcribed audio");
        Ok(words)
    }
}
