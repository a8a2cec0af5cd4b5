//! `verse_align` — turn a word-timestamped transcript of a spoken chapter into per-verse
//! start/end timings.
//!
//! This crate provides:
//! - Text normalization of verse text
//! - The verse aligner (proportional word-count partition of the transcript)
//! - Collaborators for batch runs: `bible.json` text source, audio presence check,
//!   JSON timing store, and a pluggable `Transcriber`
//! - A Whisper-backed transcriber (feature `whisper`)
//!
//! The alignment core is pure and infallible: it takes verses and words and nothing else, so
//! chapters can be aligned concurrently without coordination.

// Alignment core (most consumers should start here).
pub mod align;
pub mod normalize;

// Data model.
pub mod verse;
pub mod words;

// Collaborators around the core.
pub mod audio_library;
pub mod bible;
pub mod timing_store;
pub mod transcriber;

// Speech-recognition backends.
pub mod backends;

// Batch driving and configuration.
pub mod batch;
pub mod config;

// Logging configuration and control.
#[cfg(feature = "logging")]
pub mod logging;

mod error;

pub use align::{AlignReport, align, align_with_report};
pub use error::{Error, Result};
pub use normalize::normalize;
pub use verse::{Verse, VerseTiming};
pub use words::RecognizedWord;
