//! Default generator parameters and the phonetic text configuration.

use serde::{Deserialize, Serialize};
use std::ops::{Range, RangeInclusive};
use std::time::Duration;

// === Default generators ===

/// Length of a default `String`.
pub const DEFAULT_STRING_LENGTH: Range<usize> = 3..10;

/// Length of a default `Vec<T>`.
pub const DEFAULT_VEC_LENGTH: RangeInclusive<usize> = 1..=5;

/// Upper bound of a default `Duration`.
pub const DEFAULT_DURATION_MAX: Duration = Duration::from_secs(60);

/// How far back a default `SystemTime` may lie.
pub const DEFAULT_TIME_SPAN: Duration = Duration::from_secs(10 * 365 * 24 * 60 * 60);

// === Calendar strategies ===

/// Years drawn by `Strategy::year()` when called with this range.
pub const DEFAULT_YEARS: Range<i32> = 2010..2025;

/// Days drawn by `Strategy::day()` when called with this range.
pub const DEFAULT_DAYS: Range<u32> = 1..28;

/// Month numbers drawn by `Strategy::month()` when called with this range.
pub const DEFAULT_MONTHS: Range<u32> = 1..12;

/// English short month names, January first.
pub const MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

// === Phonetic generator ===

/// Rejected draws tolerated before a word only draws symbols that fit.
pub const MAX_REJECTIONS: usize = 16;

/// Length of a word when none is given.
pub const DEFAULT_WORD_LENGTH: usize = 6;

/// Marks that may end a sentence.
pub const SENTENCE_TERMINATORS: [char; 3] = ['.', '!', '?'];

/// Shape of generated text: how many paragraphs, sentences, words and
/// characters to draw. Every count is a half-open range; an empty range
/// always yields its lower bound.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhoneticConfig {
    /// Paragraphs per text.
    pub paragraphs: Range<usize>,

    /// Sentences per paragraph.
    pub sentences: Range<usize>,

    /// Words per sentence or word list.
    pub words: Range<usize>,

    /// Characters per word.
    pub word_length: Range<usize>,

    /// Uppercase the first letter of a word list.
    /// Sentences are always capitalized.
    pub capitalize_first: bool,
}

impl Default for PhoneticConfig {
    fn default() -> Self {
        Self {
            paragraphs: 1..3,
            sentences: 2..4,
            words: 3..10,
            word_length: 3..10,
            capitalize_first: true,
        }
    }
}

impl PhoneticConfig {
    /// One short sentence per paragraph, one paragraph per text.
    pub fn minimal() -> Self {
        Self {
            paragraphs: 1..2,
            sentences: 1..2,
            words: 2..4,
            word_length: 2..5,
            capitalize_first: true,
        }
    }

    /// Several paragraphs of long sentences.
    pub fn long_form() -> Self {
        Self {
            paragraphs: 3..6,
            sentences: 4..8,
            words: 6..16,
            word_length: 3..10,
            capitalize_first: true,
        }
    }

    // === Builder methods ===

    pub fn with_paragraphs(mut self, range: Range<usize>) -> Self {
        self.paragraphs = range;
        self
    }

    pub fn with_sentences(mut self, range: Range<usize>) -> Self {
        self.sentences = range;
        self
    }

    pub fn with_words(mut self, range: Range<usize>) -> Self {
        self.words = range;
        self
    }

    pub fn with_word_length(mut self, range: Range<usize>) -> Self {
        self.word_length = range;
        self
    }

    pub fn with_capitalize_first(mut self, enabled: bool) -> Self {
        self.capitalize_first = enabled;
        self
    }
}

/// English short name of a month numbered from 1.
pub fn month_name(month: u32) -> Option<&'static str> {
    let index = usize::try_from(month).ok()?.checked_sub(1)?;
    MONTH_NAMES.get(index).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_overrides_defaults() {
        let config = PhoneticConfig::default()
            .with_words(1..2)
            .with_capitalize_first(false);

        assert_eq!(config.words, 1..2);
        assert!(!config.capitalize_first);
        assert_eq!(config.sentences, PhoneticConfig::default().sentences);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: PhoneticConfig =
            serde_json::from_str(r#"{ "word_length": { "start": 4, "end": 5 } }"#).unwrap();

        assert_eq!(config.word_length, 4..5);
        assert_eq!(config.paragraphs, 1..3);
        assert!(config.capitalize_first);
    }

    #[test]
    fn test_month_name() {
        assert_eq!(month_name(1), Some("Jan"));
        assert_eq!(month_name(12), Some("Dec"));
        assert_eq!(month_name(0), None);
        assert_eq!(month_name(13), None);
    }
}
