use std::error::Error as StdError;

use thiserror::Error;

/// verse-align's crate-wide result type.
pub type Result<T> = std::result::Result<T, Error>;

/// verse-align's crate-wide error type.
///
/// The alignment core itself never fails; errors only come from the collaborators around it
/// (reading the text source, writing timing files, running a transcriber).
///
/// This is intentionally decoupled from `anyhow` so downstream libraries aren't forced to
/// adopt `anyhow` in their own public APIs.
#[derive(Debug, Error)]
pub enum Error {
    #[error("{0}")]
    Message(String),

    /// An underlying failure with a description of what was being attempted.
    #[error("{message}: {source}")]
    Context {
        message: String,
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },

    #[error(transparent)]
    Other(#[from] Box<dyn StdError + Send + Sync>),
}

impl Error {
    pub(crate) fn msg(message: impl Into<String>) -> Self {
        Self::Message(message.into())
    }

    pub(crate) fn context(
        message: impl Into<String>,
        source: impl Into<Box<dyn StdError + Send + Sync>>,
    ) -> Self {
        Self::Context {
            message: message.into(),
            source: source.into(),
        }
    }
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Self::Message(format!("{err:#}"))
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Other(Box::new(err))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Other(Box::new(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anyhow_errors_keep_their_context_chain() {
        let err = anyhow::anyhow!("disk full").context("failed to save genesis 1");
        let err = Error::from(err);
        assert_eq!(err.to_string(), "failed to save genesis 1: disk full");
    }

    #[test]
    fn io_errors_are_transparent() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "bible.json missing");
        let err = Error::from(io);
        assert_eq!(err.to_string(), "bible.json missing");
    }

    #[test]
    fn context_keeps_the_underlying_error_as_source() {
        let err = Error::context("failed to transcribe genesis 2", Error::msg("decoder exploded"));
        assert_eq!(err.to_string(), "failed to transcribe genesis 2: decoder exploded");

        let source = err.source().expect("source");
        assert_eq!(source.to_string(), "decoder exploded");
        assert!(source.downcast_ref::<Error>().is_some());
    }
}
