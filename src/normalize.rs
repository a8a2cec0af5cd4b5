//! Text normalization for verse text.
//!
//! Verse text and recognized speech are compared as plain word sequences:
//! - lowercase
//! - punctuation removed (anything that is not a letter, digit or whitespace)
//! - whitespace collapsed
//!
//! Both functions are total: any input, including the empty string, is valid.

/// Canonicalize `text` into a single space-separated, lowercase, punctuation-free string.
///
/// Returns an empty string when nothing survives normalization (e.g. `"..."`).
pub fn clean_text(text: &str) -> String {
    let stripped: String = text
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .collect();

    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Normalize `text` into its word sequence.
///
/// This is [`clean_text`] split on whitespace; text that normalizes to nothing yields an
/// empty `Vec`.
pub fn normalize(text: &str) -> Vec<String> {
    clean_text(text)
        .split_whitespace()
        .map(str::to_owned)
        .collect()
}

/// Number of normalized words in `text`.
///
/// Equivalent to `normalize(text).len()` without building the words.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace()
        .filter(|word| word.chars().any(char::is_alphanumeric))
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases_and_strips_punctuation() {
        assert_eq!(
            normalize("In the beginning God created heaven, and earth."),
            vec!["in", "the", "beginning", "god", "created", "heaven", "and", "earth"]
        );
    }

    #[test]
    fn collapses_whitespace_runs() {
        assert_eq!(clean_text("  And\tGod \n\n said:  "), "and god said");
    }

    #[test]
    fn punctuation_inside_a_word_joins_it() {
        // Apostrophes and hyphens are removed, not turned into separators.
        assert_eq!(normalize("Lord's well-beloved"), vec!["lords", "wellbeloved"]);
    }

    #[test]
    fn quotation_marks_are_removed() {
        assert_eq!(
            normalize("\u{201c}Let there be light\u{201d}"),
            vec!["let", "there", "be", "light"]
        );
    }

    #[test]
    fn punctuation_only_text_is_empty() {
        assert!(normalize("...").is_empty());
        assert!(normalize(" ; -- ! ").is_empty());
        assert_eq!(clean_text("..."), "");
    }

    #[test]
    fn empty_text_is_empty() {
        assert!(normalize("").is_empty());
        assert_eq!(word_count(""), 0);
    }

    #[test]
    fn digits_and_non_ascii_letters_survive() {
        assert_eq!(normalize("Psalm 23: Dóminus"), vec!["psalm", "23", "dóminus"]);
    }

    #[test]
    fn underscores_are_stripped() {
        assert_eq!(normalize("a_b"), vec!["ab"]);
    }

    #[test]
    fn renormalizing_is_a_no_op() {
        let inputs = [
            "In the beginning, God created heaven & earth.",
            "  \"Hello\" -- world!! ",
            "",
            "...",
            "ÁBC déf 12_3",
        ];

        for input in inputs {
            let once = normalize(input);
            let twice = normalize(&once.join(" "));
            assert_eq!(once, twice, "input: {input:?}");
        }
    }

    #[test]
    fn word_count_matches_normalize() {
        let inputs = [
            "In the beginning, God created heaven & earth.",
            "- - -",
            "And God said: Be light made. And light was made.",
            "word , word",
            "",
        ];

        for input in inputs {
            assert_eq!(word_count(input), normalize(input).len(), "input: {input:?}");
        }
    }
}
