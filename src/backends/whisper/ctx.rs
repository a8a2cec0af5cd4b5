use std::os::raw::{c_char, c_void};
use std::path::Path;
use std::sync::Once;

use anyhow::{Context, Result, ensure};
use whisper_rs::{WhisperContext, WhisperContextParameters};

/// Swallows whisper.cpp log lines; progress is reported through `tracing` instead.
unsafe extern "C" fn discard_whisper_log(
    _level: u32,
    _msg: *const c_char,
    _user_data: *mut c_void,
) {
}

/// Silence whisper.cpp logging, once per process.
pub(super) fn silence_whisper_logs() {
    static INIT: Once = Once::new();

    INIT.call_once(|| unsafe {
        whisper_rs::set_log_callback(Some(discard_whisper_log), std::ptr::null_mut());
    });
}

/// Load a ggml Whisper model and return an initialized `WhisperContext`.
pub(super) fn load_context(model_path: &Path) -> Result<WhisperContext> {
    silence_whisper_logs();

    ensure!(
        model_path.is_file(),
        "Whisper model not found at '{}'",
        model_path.display()
    );
    let path_str = model_path
        .to_str()
        .with_context(|| format!("model path is not valid UTF-8: {}", model_path.display()))?;

    let ctx = WhisperContext::new_with_params(path_str, WhisperContextParameters::default())
        .with_context(|| format!("failed to load model from path: {path_str}"))?;

    Ok(ctx)
}
