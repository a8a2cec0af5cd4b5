//! Verse alignment: map a timestamped word stream onto a chapter's verses.
//!
//! This is a proportional partition, not a content match. Each verse claims a contiguous run
//! of recognized words sized by its own normalized word count, starting where the previous
//! verse's run ended. Transcription noise shows up as drift in later boundaries, never as a
//! failure.
//!
//! Guarantees:
//! - the word cursor never moves backwards, so start times are non-decreasing
//! - the cursor is clamped to the last word; once it gets there, the remaining verses collapse
//!   onto that final word
//! - verses whose text normalizes to no words produce no record
//! - no input ever makes alignment fail, and the same input always yields the same output

use crate::normalize::word_count;
use crate::verse::{Verse, VerseTiming};
use crate::words::RecognizedWord;

/// Alignment output plus the verses that were dropped or degraded on the way.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AlignReport {
    /// One record per aligned verse, in verse order.
    pub timings: Vec<VerseTiming>,

    /// Verse numbers dropped because their text normalized to zero words.
    pub skipped_empty: Vec<u32>,

    /// Verse numbers that started on the final word after an earlier verse had already
    /// reached it. Their timings are degenerate: they all repeat the final word's span.
    pub collapsed: Vec<u32>,
}

impl AlignReport {
    /// Whether any emitted timing is degenerate (see [`AlignReport::collapsed`]).
    pub fn is_saturated(&self) -> bool {
        !self.collapsed.is_empty()
    }
}

/// Align `verses` to `words`, returning one timing per verse that could be placed.
///
/// Returns an empty `Vec` when either input is empty.
pub fn align(verses: &[Verse], words: &[RecognizedWord]) -> Vec<VerseTiming> {
    align_with_report(verses, words).timings
}

/// Like [`align`], but also reports skipped and collapsed verses.
pub fn align_with_report(verses: &[Verse], words: &[RecognizedWord]) -> AlignReport {
    let mut report = AlignReport::default();
    if verses.is_empty() || words.is_empty() {
        return report;
    }

    let last_idx = words.len() - 1;
    let mut word_idx = 0usize;

    for verse in verses {
        let verse_words = word_count(&verse.text);
        if verse_words == 0 {
            report.skipped_empty.push(verse.number);
            continue;
        }

        let verse_start_idx = word_idx;
        word_idx = word_idx.saturating_add(verse_words).min(last_idx);

        let Some(first) = words.get(verse_start_idx) else {
            continue;
        };
        let last = &words[word_idx];

        if verse_start_idx == last_idx && !report.timings.is_empty() {
            report.collapsed.push(verse.number);
        }

        report.timings.push(VerseTiming::rounded(
            verse.number,
            first.start_seconds,
            last.end_seconds,
        ));
    }

    report
}
