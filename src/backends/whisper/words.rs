use anyhow::{Context, Result};
use whisper_rs::{FullParams, SamplingStrategy, WhisperContext, WhisperSegment};

use crate::words::{RecognizedWord, centiseconds_to_seconds, collect_words};

/// Run whisper over 16 kHz mono samples and return one entry per spoken word.
///
/// Word-level timing comes from whisper.cpp's token timestamps with segments capped at one
/// word (`max_len = 1`, split on word boundaries), so every segment is a single word.
pub(super) fn recognize_words(
    ctx: &WhisperContext,
    language: Option<&str>,
    samples: &[f32],
) -> Result<Vec<RecognizedWord>> {
    let params = build_word_params(language);

    let mut state = ctx
        .create_state()
        .context("failed to create whisper state")?;
    state
        .full(params, samples)
        .context("failed to run whisper full()")?;

    let mut raw = Vec::new();
    for segment in state.as_iter() {
        raw.push(segment_to_raw_word(&segment)?);
    }

    Ok(collect_words(raw))
}

fn segment_to_raw_word(segment: &WhisperSegment) -> Result<(String, f64, f64)> {
    let text = segment
        .to_str()
        .context("failed to get segment text")?
        .to_owned();

    Ok((
        text,
        centiseconds_to_seconds(segment.start_timestamp()),
        centiseconds_to_seconds(segment.end_timestamp()),
    ))
}

fn build_word_params(language: Option<&str>) -> FullParams<'_, '_> {
    let mut params = FullParams::new(SamplingStrategy::BeamSearch {
        beam_size: 5,
        patience: 1.0,
    });

    params.set_n_threads(num_cpus::get() as i32);
    params.set_translate(false);
    params.set_language(language);
    params.set_no_context(true);
    params.set_single_segment(false);

    params.set_print_progress(false);
    params.set_print_special(false);
    params.set_print_realtime(false);
    params.set_print_timestamps(false);

    params.set_token_timestamps(true);
    params.set_split_on_word(true);
    params.set_max_len(1);

    params
}
