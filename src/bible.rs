//! The structured text: books, chapters and verses loaded from `bible.json`.
//!
//! Expected document shape (extra fields such as `abbrev` or `testament` are ignored):
//! ```json
//! { "books": [
//!   { "id": "genesis", "name": "Genesis", "chapters": [
//!     { "number": 1, "verses": [ { "number": 1, "text": "In the beginning..." } ] }
//!   ] }
//! ] }
//! ```

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::Deserialize;

use crate::verse::Verse;
use crate::{Error, Result};

/// Source of chapter text for the batch driver.
///
/// Lookup failures are reported as `None` ("no data") rather than as errors.
pub trait VerseSource {
    /// Book ids in canonical order.
    fn book_ids(&self) -> Vec<String>;

    /// Chapter numbers of `book_id` in canonical order, or `None` for an unknown book.
    fn chapters(&self, book_id: &str) -> Option<Vec<u32>>;

    /// Ordered verses of `chapter` in `book_id`, or `None` for an unknown book, an unknown
    /// chapter, or a chapter with no verses.
    fn verses(&self, book_id: &str, chapter: u32) -> Option<Vec<Verse>>;
}

#[derive(Debug, Clone, Deserialize)]
pub struct Bible {
    pub books: Vec<Book>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Book {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub chapters: Vec<Chapter>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Chapter {
    pub number: u32,
    #[serde(default)]
    pub verses: Vec<Verse>,
}

impl Bible {
    /// Load a `bible.json` document from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|err| {
            Error::context(format!("failed to open bible data '{}'", path.display()), err)
        })?;
        Self::from_reader(BufReader::new(file))
    }

    /// Parse a `bible.json` document from any reader.
    pub fn from_reader<R: Read>(r: R) -> Result<Self> {
        Ok(serde_json::from_reader(r)?)
    }

    /// Find a book by its id (e.g. `"genesis"`).
    pub fn book(&self, id: &str) -> Option<&Book> {
        self.books.iter().find(|book| book.id == id)
    }

    /// Ordered verses for one chapter, or `None` when the book or chapter is unknown.
    pub fn chapter_verses(&self, book_id: &str, chapter: u32) -> Option<&[Verse]> {
        self.book(book_id)?
            .chapter(chapter)
            .map(|c| c.verses.as_slice())
    }
}

impl Book {
    pub fn chapter(&self, number: u32) -> Option<&Chapter> {
        self.chapters.iter().find(|c| c.number == number)
    }

    /// Chapter numbers in document order.
    pub fn chapter_numbers(&self) -> impl Iterator<Item = u32> + '_ {
        self.chapters.iter().map(|c| c.number)
    }
}

impl VerseSource for Bible {
    fn book_ids(&self) -> Vec<String> {
        self.books.iter().map(|book| book.id.clone()).collect()
    }

    fn chapters(&self, book_id: &str) -> Option<Vec<u32>> {
        self.book(book_id).map(|book| book.chapter_numbers().collect())
    }

    fn verses(&self, book_id: &str, chapter: u32) -> Option<Vec<Verse>> {
        self.chapter_verses(book_id, chapter)
            .filter(|verses| !verses.is_empty())
            .map(<[Verse]>::to_vec)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = r#"{
        "books": [
            {
                "id": "genesis",
                "name": "Genesis",
                "abbrev": "Gen",
                "testament": "old",
                "chapters": [
                    { "number": 1, "verses": [
                        { "number": 1, "text": "In the beginning God created heaven, and earth." },
                        { "number": 2, "text": "And the earth was void and empty." }
                    ] },
                    { "number": 2, "verses": [] }
                ]
            },
            { "id": "ruth", "name": "Ruth", "chapters": [] }
        ]
    }"#;

    #[test]
    fn parses_and_ignores_unknown_fields() -> anyhow::Result<()> {
        let bible = Bible::from_reader(DOC.as_bytes())?;
        assert_eq!(bible.books.len(), 2);
        assert_eq!(bible.books[0].name, "Genesis");
        Ok(())
    }

    #[test]
    fn chapter_verses_looks_up_in_order() -> anyhow::Result<()> {
        let bible = Bible::from_reader(DOC.as_bytes())?;
        let verses = bible.chapter_verses("genesis", 1).expect("chapter 1");
        let numbers: Vec<u32> = verses.iter().map(|v| v.number).collect();
        assert_eq!(numbers, vec![1, 2]);
        Ok(())
    }

    #[test]
    fn unknown_book_or_chapter_is_no_data() -> anyhow::Result<()> {
        let bible = Bible::from_reader(DOC.as_bytes())?;
        assert!(bible.chapter_verses("exodus", 1).is_none());
        assert!(bible.chapter_verses("genesis", 50).is_none());
        assert!(bible.verses("exodus", 1).is_none());
        Ok(())
    }

    #[test]
    fn empty_chapter_is_no_data_for_the_verse_source() -> anyhow::Result<()> {
        let bible = Bible::from_reader(DOC.as_bytes())?;
        assert_eq!(bible.chapter_verses("genesis", 2).map(<[Verse]>::len), Some(0));
        assert!(bible.verses("genesis", 2).is_none());
        Ok(())
    }

    #[test]
    fn lists_books_and_chapters_in_document_order() -> anyhow::Result<()> {
        let bible = Bible::from_reader(DOC.as_bytes())?;
        assert_eq!(bible.book_ids(), vec!["genesis", "ruth"]);
        assert_eq!(bible.chapters("genesis"), Some(vec![1, 2]));
        assert_eq!(bible.chapters("ruth"), Some(vec![]));
        assert_eq!(bible.chapters("exodus"), None);
        Ok(())
    }

    #[test]
    fn load_reports_missing_file() {
        let err = Bible::load("/definitely/not/here/bible.json").unwrap_err();
        assert!(err.to_string().contains("failed to open bible data"));
        let source = std::error::Error::source(&err).expect("io error kept as source");
        assert!(source.downcast_ref::<std::io::Error>().is_some());
    }
}
