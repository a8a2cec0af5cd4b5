use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::Result;
use crate::verse::VerseTiming;

/// Durable storage for aligned chapter timings.
pub trait TimingStore {
    /// Persist `timings` for one chapter and return where they were written.
    fn save(&mut self, book_id: &str, chapter: u32, timings: &[VerseTiming]) -> Result<PathBuf>;
}

/// A `TimingStore` that writes one pretty-printed JSON array per chapter.
///
/// Layout: `<root>/<book_id>/<chapter>.json`, e.g.
/// ```json
/// [
///   {
///     "verse": 1,
///     "start": 0.0,
///     "end": 4.62
///   }
/// ]
/// ```
#[derive(Debug, Clone)]
pub struct JsonTimingStore {
    root: PathBuf,
}

impl JsonTimingStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path_for(&self, book_id: &str, chapter: u32) -> PathBuf {
        self.root.join(book_id).join(format!("{chapter}.json"))
    }

    /// Read back a previously saved chapter.
    pub fn load(&self, book_id: &str, chapter: u32) -> Result<Vec<VerseTiming>> {
        let file = File::open(self.path_for(book_id, chapter))?;
        Ok(serde_json::from_reader(BufReader::new(file))?)
    }
}

impl TimingStore for JsonTimingStore {
    fn save(&mut self, book_id: &str, chapter: u32, timings: &[VerseTiming]) -> Result<PathBuf> {
        let path = self.path_for(book_id, chapter);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut w = BufWriter::new(File::create(&path)?);
        serde_json::to_writer_pretty(&mut w, timings)?;
        w.flush()?;

        Ok(path)
    }
}
