//! Decode a chapter recording into the mono 16 kHz `f32` buffer whisper.cpp expects.
//!
//! Steps:
//! - probe the container (mp3, wav, flac, ogg, ...) and pick the first decodable audio track
//! - decode every packet into interleaved `f32`
//! - downmix to mono
//! - resample to 16 kHz when the source rate differs
//!
//! Chapter recordings are transcribed in one pass, so the whole buffer is decoded up front.

use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result, anyhow, bail};
use rubato::{Resampler, SincFixedIn, SincInterpolationParameters, WindowFunction};
use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::{CODEC_TYPE_NULL, DecoderOptions};
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

/// whisper.cpp's required sample rate (Hz).
pub const WHISPER_SAMPLE_RATE: u32 = 16_000;

/// Source frames fed to the resampler per `process()` call.
const RESAMPLE_CHUNK_FRAMES: usize = 2048;

/// Decode the file at `path` into mono 16 kHz samples.
pub fn load_mono_16k(path: &Path) -> Result<Vec<f32>> {
    let (mono, src_rate) = decode_to_mono(path)?;
    if src_rate == WHISPER_SAMPLE_RATE {
        return Ok(mono);
    }
    resample_mono(&mono, src_rate, WHISPER_SAMPLE_RATE)
}

fn decode_to_mono(path: &Path) -> Result<(Vec<f32>, u32)> {
    let file =
        File::open(path).with_context(|| format!("failed to open audio '{}'", path.display()))?;
    let mss = MediaSourceStream::new(Box::new(file), Default::default());

    let mut hint = Hint::new();
    if let Some(ext) = path.extension().and_then(|ext| ext.to_str()) {
        hint.with_extension(ext);
    }

    let probed = symphonia::default::get_probe()
        .format(
            &hint,
            mss,
            &FormatOptions::default(),
            &MetadataOptions::default(),
        )
        .map_err(|e| anyhow!(e))
        .with_context(|| format!("failed to probe audio '{}'", path.display()))?;
    let mut format = probed.format;

    let track = format
        .tracks()
        .iter()
        .find(|t| t.codec_params.codec != CODEC_TYPE_NULL && t.codec_params.sample_rate.is_some())
        .cloned()
        .ok_or_else(|| anyhow!("no audio track found in '{}'", path.display()))?;
    let src_rate = track
        .codec_params
        .sample_rate
        .ok_or_else(|| anyhow!("audio track has no sample rate"))?;

    let mut decoder = symphonia::default::get_codecs()
        .make(&track.codec_params, &DecoderOptions::default())
        .map_err(|e| anyhow!(e))
        .context("failed to create decoder for audio track")?;

    let mut mono = Vec::new();
    let mut sample_buf: Option<SampleBuffer<f32>> = None;

    loop {
        let packet = match format.next_packet() {
            Ok(packet) => packet,
            // End of stream.
            Err(SymphoniaError::IoError(_)) => break,
            Err(e) => return Err(anyhow!(e)).context("failed reading packet"),
        };
        if packet.track_id() != track.id {
            continue;
        }

        let decoded = match decoder.decode(&packet) {
            Ok(decoded) => decoded,
            // Corrupted frame; keep going.
            Err(SymphoniaError::DecodeError(_)) => continue,
            Err(SymphoniaError::IoError(_)) => break,
            Err(e) => return Err(anyhow!(e)).context("decoder failure"),
        };

        let channels = decoded.spec().channels.count();
        if channels == 0 {
            bail!("decoded audio had zero channels");
        }

        let buf = sample_buf.get_or_insert_with(|| {
            SampleBuffer::<f32>::new(decoded.capacity() as u64, *decoded.spec())
        });
        buf.copy_interleaved_ref(decoded);
        mono.extend(downmix_to_mono(buf.samples(), channels));
    }

    Ok((mono, src_rate))
}

/// Downmix interleaved samples into mono by averaging channels.
fn downmix_to_mono(interleaved: &[f32], channels: usize) -> Vec<f32> {
    if channels == 1 {
        return interleaved.to_vec();
    }

    interleaved
        .chunks_exact(channels)
        .map(|frame| frame.iter().sum::<f32>() / channels as f32)
        .collect()
}

/// Resample a complete mono buffer from `src_rate` to `dst_rate`.
///
/// The tail is zero-padded to a full resampler block, then the output is trimmed back to the
/// expected length.
fn resample_mono(mono: &[f32], src_rate: u32, dst_rate: u32) -> Result<Vec<f32>> {
    if mono.is_empty() {
        return Ok(Vec::new());
    }

    let ratio = dst_rate as f64 / src_rate as f64;
    let mut resampler = SincFixedIn::<f32>::new(
        ratio,
        2.0,
        SincInterpolationParameters {
            sinc_len: 256,
            f_cutoff: 0.95,
            interpolation: rubato::SincInterpolationType::Linear,
            oversampling_factor: 256,
            window: WindowFunction::BlackmanHarris2,
        },
        RESAMPLE_CHUNK_FRAMES,
        1,
    )
    .map_err(|e| anyhow!(e))
    .context("failed to init resampler")?;

    let expected_len = (mono.len() as f64 * ratio).round() as usize;
    let mut out = Vec::with_capacity(expected_len + RESAMPLE_CHUNK_FRAMES);

    for block in mono.chunks(RESAMPLE_CHUNK_FRAMES) {
        let mut block = block.to_vec();
        block.resize(RESAMPLE_CHUNK_FRAMES, 0.0);

        let input = vec![block];
        let resampled = resampler
            .process(&input, None)
            .map_err(|e| anyhow!(e))
            .context("resampler process failed")?;
        let Some(channel) = resampled.into_iter().next() else {
            bail!("expected mono output from resampler");
        };
        out.extend(channel);
    }

    out.truncate(expected_len);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn downmix_single_channel_is_identity() {
        let input = vec![0.0, 1.0, -1.0];
        assert_eq!(downmix_to_mono(&input, 1), input);
    }

    #[test]
    fn downmix_averages_channels() {
        // Two stereo frames: (1, 3), (-1, 1) => 2, 0
        assert_eq!(downmix_to_mono(&[1.0, 3.0, -1.0, 1.0], 2), vec![2.0, 0.0]);
    }

    #[test]
    fn resample_empty_is_empty() -> anyhow::Result<()> {
        assert!(resample_mono(&[], 44_100, WHISPER_SAMPLE_RATE)?.is_empty());
        Ok(())
    }

    #[test]
    fn resample_scales_length_by_rate_ratio() -> anyhow::Result<()> {
        let one_second = vec![0.0f32; 8_000];
        let out = resample_mono(&one_second, 8_000, WHISPER_SAMPLE_RATE)?;
        assert_eq!(out.len(), 16_000);
        Ok(())
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = load_mono_16k(Path::new("/no/such/chapter.mp3")).unwrap_err();
        assert!(err.to_string().contains("failed to open audio"));
    }
}
