use std::path::Path;

use crate::Result;
use crate::words::RecognizedWord;

/// Pluggable speech-recognition backend used by [`crate::batch::Batch`].
///
/// A transcriber turns an audio asset into an ordered sequence of [`RecognizedWord`]s. The
/// aligner depends only on that output, so any engine (or a canned transcript in tests) can
/// stand in here.
///
/// Implementations should:
/// - return words in temporal order
/// - drop blank words (see [`crate::words::collect_words`])
pub trait Transcriber {
    /// Transcribe the audio at `audio`, using `language` as a hint when provided
    /// (e.g. `"en"`). `None` lets the engine auto-detect.
    fn transcribe(&mut self, audio: &Path, language: Option<&str>) -> Result<Vec<RecognizedWord>>;
}

impl<T: Transcriber + ?Sized> Transcriber for &mut T {
    fn transcribe(&mut self, audio: &Path, language: Option<&str>) -> Result<Vec<RecognizedWord>> {
        (**self).transcribe(audio, language)
    }
}

impl<T: Transcriber + ?Sized> Transcriber for Box<T> {
    fn transcribe(&mut self, audio: &Path, language: Option<&str>) -> Result<Vec<RecognizedWord>> {
        (**self).transcribe(audio, language)
    }
}
