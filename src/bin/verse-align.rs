// Generate per-verse timing data from chapter audio.
//
//   verse-align genesis 1          # align one chapter
//   verse-align genesis            # align every chapter of a book
//   verse-align --all              # align every book
//   verse-align --range 0 5        # align books 0..5 (by position)

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};

use verse_align::audio_library::AudioLibrary;
use verse_align::backends::whisper::WhisperTranscriber;
use verse_align::batch::{Batch, BookSummary, ChapterStatus, Progress};
use verse_align::bible::Bible;
use verse_align::config::Config;
use verse_align::logging;
use verse_align::timing_store::JsonTimingStore;

type WhisperBatch = Batch<WhisperTranscriber, Bible, AudioLibrary, JsonTimingStore>;

/// How many timings to echo after aligning a single chapter.
const PREVIEW_TIMINGS: usize = 5;

#[derive(Parser, Debug)]
#[command(name = "verse-align")]
#[command(about = "Generate per-verse timing data from chapter audio using Whisper")]
struct Params {
    /// Book id (e.g. `genesis`). Case-insensitive.
    #[arg(required_unless_present_any = ["all", "range"])]
    book: Option<String>,

    /// Chapter number. When omitted, every chapter of the book is aligned.
    #[arg(requires = "book")]
    chapter: Option<u32>,

    /// Align every book.
    #[arg(long, conflicts_with_all = ["book", "range"])]
    all: bool,

    /// Align the books at positions START..END (END exclusive).
    #[arg(long, num_args = 2, value_names = ["START", "END"], conflicts_with = "book")]
    range: Option<Vec<usize>>,

    /// Project root holding `site/` (used to derive default paths).
    #[arg(long, default_value = ".")]
    root: PathBuf,

    /// Path to a whisper.cpp model file (default: `<root>/models/ggml-base.bin`).
    #[arg(short = 'm', long = "model")]
    model_path: Option<PathBuf>,

    /// Language hint for transcription, or `auto` to let Whisper detect it.
    #[arg(short = 'l', long, default_value = "en")]
    language: String,

    /// Override the `bible.json` location.
    #[arg(long)]
    bible: Option<PathBuf>,

    /// Override the chapter audio directory.
    #[arg(long)]
    audio_dir: Option<PathBuf>,

    /// Override the timing output directory.
    #[arg(long)]
    timing_dir: Option<PathBuf>,
}

enum Mode {
    Chapter(String, u32),
    Book(String),
    All,
    Range(usize, usize),
}

impl Params {
    fn mode(&self) -> Result<Mode> {
        if self.all {
            return Ok(Mode::All);
        }
        if let Some(range) = &self.range {
            let [start, end] = range.as_slice() else {
                bail!("--range expects exactly two values: START END");
            };
            return Ok(Mode::Range(*start, *end));
        }

        let Some(book) = &self.book else {
            bail!("a book id, --all, or --range is required");
        };
        let book = book.to_lowercase();
        Ok(match self.chapter {
            Some(chapter) => Mode::Chapter(book, chapter),
            None => Mode::Book(book),
        })
    }

    fn config(&self) -> Config {
        let mut config = Config::from_project_root(&self.root);
        if let Some(path) = &self.bible {
            config.bible_json = path.clone();
        }
        if let Some(dir) = &self.audio_dir {
            config.audio_dir = dir.clone();
        }
        if let Some(dir) = &self.timing_dir {
            config.timing_dir = dir.clone();
        }
        if let Some(path) = &self.model_path {
            config.model_path = path.clone();
        }
        config.language = match self.language.as_str() {
            "auto" => None,
            lang => Some(lang.to_owned()),
        };
        config
    }
}

fn main() -> Result<()> {
    logging::init();

    let params = Params::parse();
    let mode = params.mode()?;
    let config = params.config();

    let bible = Bible::load(&config.bible_json)
        .with_context(|| format!("failed to load {}", config.bible_json.display()))?;
    let transcriber = WhisperTranscriber::new(&config.model_path)
        .with_context(|| format!("failed to load {}", config.model_path.display()))?;

    let mut batch = Batch::new(
        transcriber,
        bible,
        config.audio_library(),
        config.timing_store(),
    )
    .with_language(config.language.clone());

    let mut progress = BarProgress::default();
    let summaries = match mode {
        Mode::Chapter(book, chapter) => {
            return align_one_chapter(&mut batch, &book, chapter);
        }
        Mode::Book(book) => match batch.process_book_with(&book, &mut progress) {
            Some(summary) => vec![summary],
            None => {
                eprintln!("Book '{book}' not found");
                Vec::new()
            }
        },
        Mode::All => batch.process_all(&mut progress),
        Mode::Range(start, end) => batch.process_range(start, end, &mut progress),
    };

    let failed: usize = summaries.iter().map(|s| s.failed).sum();
    if failed > 0 {
        eprintln!("{failed} chapter(s) failed; see log for details");
    }

    Ok(())
}

fn align_one_chapter(batch: &mut WhisperBatch, book: &str, chapter: u32) -> Result<()> {
    match batch.run_chapter(book, chapter) {
        ChapterStatus::Saved(saved) => {
            println!("Saved {}", saved.path.display());
            let preview = &saved.timings[..saved.timings.len().min(PREVIEW_TIMINGS)];
            println!("{}", serde_json::to_string_pretty(preview)?);
        }
        ChapterStatus::Skipped(reason) => println!("Skipping {book} {chapter}: {reason}"),
        ChapterStatus::Empty => println!("No timings produced for {book} {chapter}"),
        ChapterStatus::Failed(message) => bail!(message),
    }
    Ok(())
}

/// One progress bar per book, ticking once per chapter.
#[derive(Default)]
struct BarProgress {
    bar: Option<ProgressBar>,
}

impl Progress for BarProgress {
    fn book_started(&mut self, book_id: &str, chapters: usize) {
        let bar = ProgressBar::new(chapters as u64);
        if let Ok(style) = ProgressStyle::with_template("{msg:>16} {bar:40.cyan/blue} {pos}/{len}")
        {
            bar.set_style(style.progress_chars("#>-"));
        }
        bar.set_message(book_id.to_owned());
        self.bar = Some(bar);
    }

    fn chapter_finished(&mut self, _book_id: &str, _chapter: u32, _status: &ChapterStatus) {
        if let Some(bar) = &self.bar {
            bar.inc(1);
        }
    }

    fn book_finished(&mut self, summary: &BookSummary) {
        if let Some(bar) = self.bar.take() {
            bar.finish_with_message(format!(
                "{}: {} saved, {} skipped, {} empty, {} failed",
                summary.book_id, summary.saved, summary.skipped, summary.empty, summary.failed
            ));
        }
    }
}
