use std::path::{Path, PathBuf};

/// Presence check for chapter audio.
///
/// Chapters without audio are skipped before any transcription or alignment happens.
pub trait AudioCatalog {
    /// Path to the audio asset for `book_id`/`chapter`, or `None` if it does not exist.
    fn locate(&self, book_id: &str, chapter: u32) -> Option<PathBuf>;
}

/// Audio files laid out as `<dir>/<book_id>/<chapter>.<extension>`.
#[derive(Debug, Clone)]
pub struct AudioLibrary {
    dir: PathBuf,
    extension: String,
}

impl AudioLibrary {
    pub fn new(dir: impl Into<PathBuf>, extension: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            extension: extension.into(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Where the audio for a chapter is expected, whether or not it exists.
    pub fn path_for(&self, book_id: &str, chapter: u32) -> PathBuf {
        self.dir
            .join(book_id)
            .join(format!("{chapter}.{}", self.extension))
    }
}

impl AudioCatalog for AudioLibrary {
    fn locate(&self, book_id: &str, chapter: u32) -> Option<PathBuf> {
        let path = self.path_for(book_id, chapter);
        path.is_file().then_some(path)
    }
}
