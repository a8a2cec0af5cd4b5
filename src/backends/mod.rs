/// Built-in transcriber powered by `whisper-rs` / `whisper.cpp`.
#[cfg(feature = "whisper")]
pub mod whisper;
