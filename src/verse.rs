use serde::{Deserialize, Serialize};

/// The smallest numbered unit of text within a chapter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verse {
    pub number: u32,
    pub text: String,
}

impl Verse {
    pub fn new(number: u32, text: impl Into<String>) -> Self {
        Self {
            number,
            text: text.into(),
        }
    }
}

/// Start/end timing for one verse, in seconds at 2-decimal precision.
///
/// Serializes as `{ "verse": 1, "start": 0.0, "end": 0.9 }`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VerseTiming {
    pub verse: u32,
    pub start: f64,
    pub end: f64,
}

impl VerseTiming {
    /// Build a timing record, rounding both times to hundredths of a second.
    pub fn rounded(verse: u32, start_seconds: f64, end_seconds: f64) -> Self {
        Self {
            verse,
            start: round_hundredths(start_seconds),
            end: round_hundredths(end_seconds),
        }
    }
}

/// Round seconds to 2 decimal places.
///
/// Rounds the exact decimal value of `seconds`, ties to even, so `2.675` (stored as
/// `2.67499...`) becomes `2.67`. Scaling by 100 first would round the product instead.
pub fn round_hundredths(seconds: f64) -> f64 {
    format!("{seconds:.2}").parse().unwrap_or(seconds)
}
