//! Batch driver: chapter → book → whole-text alignment runs.
//!
//! `Batch` wires the collaborators together:
//! presence check → verse lookup → transcription → alignment → persistence.
//!
//! Policy:
//! - missing audio or missing verse data skips the chapter with a warning
//! - an alignment that yields no timings is not written
//! - a chapter that fails (e.g. the transcriber errors) is logged and counted; the rest of the
//!   book still runs

use std::path::PathBuf;

use tracing::{debug, error, info, warn};

use crate::align::{AlignReport, align_with_report};
use crate::audio_library::AudioCatalog;
use crate::bible::VerseSource;
use crate::timing_store::TimingStore;
use crate::transcriber::Transcriber;
use crate::verse::VerseTiming;
use crate::{Error, Result};

/// Why a chapter was skipped before alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// No audio asset exists for the chapter.
    NoAudio,
    /// The text source has no verses for the chapter.
    NoVerses,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::NoAudio => f.write_str("no audio file"),
            SkipReason::NoVerses => f.write_str("no verse data"),
        }
    }
}

/// Result of aligning a single chapter (without persisting it).
#[derive(Debug, Clone, PartialEq)]
pub enum ChapterOutcome {
    Skipped(SkipReason),
    Aligned(AlignReport),
}

/// A chapter whose timings were written by the [`TimingStore`].
#[derive(Debug, Clone, PartialEq)]
pub struct SavedChapter {
    pub path: PathBuf,
    pub timings: Vec<VerseTiming>,
}

/// Final status of one chapter in a batch run.
#[derive(Debug, Clone, PartialEq)]
pub enum ChapterStatus {
    Saved(SavedChapter),
    /// Alignment produced no timings, so nothing was written.
    Empty,
    Skipped(SkipReason),
    /// The chapter failed; the message is the rendered error.
    Failed(String),
}

/// Per-book tallies.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookSummary {
    pub book_id: String,
    pub saved: usize,
    pub empty: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl BookSummary {
    fn new(book_id: &str) -> Self {
        Self {
            book_id: book_id.to_owned(),
            ..Self::default()
        }
    }

    fn record(&mut self, status: &ChapterStatus) {
        match status {
            ChapterStatus::Saved(_) => self.saved += 1,
            ChapterStatus::Empty => self.empty += 1,
            ChapterStatus::Skipped(_) => self.skipped += 1,
            ChapterStatus::Failed(_) => self.failed += 1,
        }
    }

    /// Total chapters visited.
    pub fn chapters(&self) -> usize {
        self.saved + self.empty + self.skipped + self.failed
    }
}

/// Observer for long batch runs (progress bars, dashboards).
///
/// Every method has a no-op default.
pub trait Progress {
    fn book_started(&mut self, _book_id: &str, _chapters: usize) {}
    fn chapter_finished(&mut self, _book_id: &str, _chapter: u32, _status: &ChapterStatus) {}
    fn book_finished(&mut self, _summary: &BookSummary) {}
}

/// A `Progress` that ignores every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl Progress for NoProgress {}

/// Drives alignment over chapters, books, or the whole text.
pub struct Batch<T, S, A, P> {
    transcriber: T,
    source: S,
    audio: A,
    store: P,
    language: Option<String>,
}

impl<T, S, A, P> Batch<T, S, A, P>
where
    T: Transcriber,
    S: VerseSource,
    A: AudioCatalog,
    P: TimingStore,
{
    pub fn new(transcriber: T, source: S, audio: A, store: P) -> Self {
        Self {
            transcriber,
            source,
            audio,
            store,
            language: None,
        }
    }

    /// Set the language hint passed to the transcriber.
    pub fn with_language(mut self, language: Option<String>) -> Self {
        self.language = language;
        self
    }

    /// Transcribe and align one chapter without writing anything.
    ///
    /// Audio presence is checked before verse data, so a chapter lacking both reports
    /// [`SkipReason::NoAudio`].
    pub fn process_chapter(&mut self, book_id: &str, chapter: u32) -> Result<ChapterOutcome> {
        let Some(audio_path) = self.audio.locate(book_id, chapter) else {
            warn!(book = book_id, chapter, "skipping chapter: no audio file");
            return Ok(ChapterOutcome::Skipped(SkipReason::NoAudio));
        };

        let Some(verses) = self.source.verses(book_id, chapter) else {
            warn!(book = book_id, chapter, "skipping chapter: no verse data");
            return Ok(ChapterOutcome::Skipped(SkipReason::NoVerses));
        };

        info!(book = book_id, chapter, audio = %audio_path.display(), "processing chapter");

        let words = self
            .transcriber
            .transcribe(&audio_path, self.language.as_deref())
            .map_err(|err| {
                Error::context(format!("failed to transcribe {book_id} {chapter}"), err)
            })?;

        let report = align_with_report(&verses, &words);
        debug!(
            book = book_id,
            chapter,
            verses = verses.len(),
            words = words.len(),
            timings = report.timings.len(),
            skipped_empty = report.skipped_empty.len(),
            "aligned chapter"
        );
        if report.is_saturated() {
            warn!(
                book = book_id,
                chapter,
                collapsed = ?report.collapsed,
                "transcript ran out of words; trailing verses share the final word's timing"
            );
        }

        Ok(ChapterOutcome::Aligned(report))
    }

    /// Align one chapter and persist its timings when there are any.
    pub fn save_chapter(&mut self, book_id: &str, chapter: u32) -> Result<ChapterStatus> {
        let report = match self.process_chapter(book_id, chapter)? {
            ChapterOutcome::Skipped(reason) => return Ok(ChapterStatus::Skipped(reason)),
            ChapterOutcome::Aligned(report) => report,
        };

        if report.timings.is_empty() {
            warn!(book = book_id, chapter, "alignment produced no timings; nothing saved");
            return Ok(ChapterStatus::Empty);
        }

        let path = self.store.save(book_id, chapter, &report.timings)?;
        info!(book = book_id, chapter, path = %path.display(), "saved timings");

        Ok(ChapterStatus::Saved(SavedChapter {
            path,
            timings: report.timings,
        }))
    }

    /// Like [`Batch::save_chapter`], but a failure is logged and reported as
    /// [`ChapterStatus::Failed`] instead of returned.
    pub fn run_chapter(&mut self, book_id: &str, chapter: u32) -> ChapterStatus {
        self.save_chapter(book_id, chapter).unwrap_or_else(|err| {
            error!(book = book_id, chapter, error = %err, "chapter failed");
            ChapterStatus::Failed(err.to_string())
        })
    }

    /// Run every chapter of a book, in order.
    ///
    /// Returns `None` when the book is unknown.
    pub fn process_book(&mut self, book_id: &str) -> Option<BookSummary> {
        self.process_book_with(book_id, &mut NoProgress)
    }

    /// Like [`Batch::process_book`], reporting each chapter to `progress`.
    pub fn process_book_with(
        &mut self,
        book_id: &str,
        progress: &mut dyn Progress,
    ) -> Option<BookSummary> {
        let Some(chapters) = self.source.chapters(book_id) else {
            warn!(book = book_id, "book not found");
            return None;
        };

        info!(book = book_id, chapters = chapters.len(), "processing book");
        progress.book_started(book_id, chapters.len());

        let mut summary = BookSummary::new(book_id);
        for chapter in chapters {
            let status = self.run_chapter(book_id, chapter);
            summary.record(&status);
            progress.chapter_finished(book_id, chapter, &status);
        }

        progress.book_finished(&summary);
        Some(summary)
    }

    /// Run every book of the text, in order.
    pub fn process_all(&mut self, progress: &mut dyn Progress) -> Vec<BookSummary> {
        let books = self.source.book_ids();
        self.process_books(&books, progress)
    }

    /// Run the books at positions `start..end` of the text's book order.
    ///
    /// The range is clamped to the number of books; an empty or inverted range runs nothing.
    pub fn process_range(
        &mut self,
        start: usize,
        end: usize,
        progress: &mut dyn Progress,
    ) -> Vec<BookSummary> {
        let books = self.source.book_ids();
        let end = end.min(books.len());
        let start = start.min(end);

        info!(start, end, books = end - start, "processing book range");
        self.process_books(&books[start..end], progress)
    }

    fn process_books(&mut self, books: &[String], progress: &mut dyn Progress) -> Vec<BookSummary> {
        books
            .iter()
            .filter_map(|book_id| self.process_book_with(book_id, progress))
            .collect()
    }

    /// Access the configured transcriber.
    pub fn transcriber(&self) -> &T {
        &self.transcriber
    }
}
