use serde::{Deserialize, Serialize};

/// A single word emitted by a transcriber, with its time span.
///
/// Words are expected in temporal order with non-decreasing timestamps. That ordering is a
/// property of the upstream transcript and is not validated here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecognizedWord {
    /// Word text, trimmed and never empty.
    pub text: String,
    /// Start time in seconds.
    pub start_seconds: f64,
    /// End time in seconds.
    pub end_seconds: f64,
}

impl RecognizedWord {
    /// Build a word from raw transcriber output.
    ///
    /// Returns `None` when the text is empty after trimming; such words carry no position in
    /// the transcript and are never handed to the aligner.
    pub fn from_raw(text: &str, start_seconds: f64, end_seconds: f64) -> Option<Self> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        Some(Self {
            text: text.to_owned(),
            start_seconds,
            end_seconds,
        })
    }
}

/// Collect raw `(text, start, end)` transcriber output into recognized words, keeping order
/// and dropping blank entries.
pub fn collect_words<I, S>(raw: I) -> Vec<RecognizedWord>
where
    I: IntoIterator<Item = (S, f64, f64)>,
    S: AsRef<str>,
{
    raw.into_iter()
        .filter_map(|(text, start, end)| RecognizedWord::from_raw(text.as_ref(), start, end))
        .collect()
}

/// Convert a whisper centisecond timestamp into seconds.
///
/// whisper uses `-1` for "unknown"; negative values clamp to `0.0`.
#[cfg_attr(not(feature = "whisper"), allow(dead_code))]
pub(crate) fn centiseconds_to_seconds(value: i64) -> f64 {
    if value < 0 { 0.0 } else { value as f64 / 100.0 }
}
