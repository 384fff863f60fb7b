//! Pronounceable random words and the text built from them.
//!
//! A word is grown symbol by symbol from two pools, consonants and vowels,
//! alternating between them after every accepted symbol. Symbols are one to
//! three characters long, so a draw that would overshoot the target length
//! is rejected and redrawn. Rejections are bounded: with one character left
//! only single-character symbols are drawn, and after [`MAX_REJECTIONS`]
//! consecutive rejections the draw is restricted to symbols that fit.

use rand::seq::IteratorRandom;
use rand::Rng;
use std::ops::Range;
use tracing::{debug, trace};

use crate::config::{PhoneticConfig, MAX_REJECTIONS, SENTENCE_TERMINATORS};
use crate::RandomizableInRange;

/// Consonants and clusters allowed anywhere in a word.
pub const CONSONANTS: &[&str] = &[
    "b", "c", "d", "f", "g", "h", "j", "k", "l", "m", "n", "p", "r", "s", "t", "v", "w", "x", "z",
    "pt", "gl", "gr", "ch", "ph", "ps", "sh", "st", "th", "wh",
];

/// Clusters that cannot start a word. Available once the word is two
/// characters long.
pub const LATE_CONSONANTS: &[&str] = &[
    "ck", "cm", "dr", "ds", "ft", "gh", "gn", "kr", "ks", "ls", "lt", "lr", "mp", "mt", "ms", "ng",
    "ns", "rd", "rg", "rs", "rt", "ss", "ts", "tch",
];

pub const VOWELS: &[&str] = &["a", "e", "i", "o", "u", "y", "ee", "oa", "oo"];

/// Which pool the next symbol is drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundState {
    Consonant,
    Vowel,
}

impl SoundState {
    pub fn flip(self) -> Self {
        match self {
            SoundState::Consonant => SoundState::Vowel,
            SoundState::Vowel => SoundState::Consonant,
        }
    }
}

/// One draw while growing a word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceStep {
    pub state: SoundState,
    pub symbol: &'static str,
    pub accepted: bool,
}

/// Stateless generator for words, sentences, paragraphs and text.
#[derive(Debug, Clone, Copy, Default)]
pub struct PhoneticGenerator;

impl PhoneticGenerator {
    /// A pronounceable word of exactly `length` characters.
    pub fn word<R: Rng + ?Sized>(length: usize, rng: &mut R) -> String {
        grow_word(length, rng, None)
    }

    /// Like [`word`](Self::word), also returning every draw in order.
    pub fn word_traced<R: Rng + ?Sized>(length: usize, rng: &mut R) -> (String, Vec<TraceStep>) {
        let mut trace = Vec::new();
        let word = grow_word(length, rng, Some(&mut trace));
        (word, trace)
    }

    /// Space-separated words. The count is drawn from `config.words` and each
    /// word's length from `config.word_length`.
    pub fn words<R: Rng + ?Sized>(config: &PhoneticConfig, rng: &mut R) -> String {
        let words = word_list(config, 0, rng);
        if config.capitalize_first {
            capitalize(&words)
        } else {
            words
        }
    }

    /// Capitalized words followed by one of `.`, `!` or `?`.
    pub fn sentence<R: Rng + ?Sized>(config: &PhoneticConfig, rng: &mut R) -> String {
        let mut sentence = capitalize(&word_list(config, 1, rng));
        let terminator = SENTENCE_TERMINATORS[rng.gen_range(0..SENTENCE_TERMINATORS.len())];
        sentence.push(terminator);
        sentence
    }

    /// Sentences joined by a space. The count is drawn from `config.sentences`.
    pub fn paragraph<R: Rng + ?Sized>(config: &PhoneticConfig, rng: &mut R) -> String {
        let count = draw_count(&config.sentences, rng);
        (0..count)
            .map(|_| Self::sentence(config, rng))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Paragraphs joined by a newline. The count is drawn from `config.paragraphs`.
    pub fn text<R: Rng + ?Sized>(config: &PhoneticConfig, rng: &mut R) -> String {
        let count = draw_count(&config.paragraphs, rng);
        (0..count)
            .map(|_| Self::paragraph(config, rng))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn grow_word<R: Rng + ?Sized>(
    length: usize,
    rng: &mut R,
    mut trace: Option<&mut Vec<TraceStep>>,
) -> String {
    let mut word = String::with_capacity(length);
    let mut state = if rng.gen_bool(0.5) {
        SoundState::Consonant
    } else {
        SoundState::Vowel
    };
    let mut late_unlocked = false;
    let mut rejections = 0;

    while word.len() < length {
        if !late_unlocked && word.len() >= 2 {
            late_unlocked = true;
        }

        let remaining = length - word.len();
        let (base, late): (&[&'static str], &[&'static str]) = match state {
            SoundState::Consonant if late_unlocked => (CONSONANTS, LATE_CONSONANTS),
            SoundState::Consonant => (CONSONANTS, &[]),
            SoundState::Vowel => (VOWELS, &[]),
        };
        let pool = base.iter().chain(late);

        let bounded = remaining == 1 || rejections >= MAX_REJECTIONS;
        if rejections == MAX_REJECTIONS {
            debug!(length, remaining, "word fitting fell back to symbols that fit");
        }
        let candidate = if bounded {
            pool.filter(|symbol| symbol.len() <= remaining).choose(rng)
        } else {
            pool.choose(rng)
        };

        // Both pools hold single-character symbols, so a fitting draw exists.
        let Some(&symbol) = candidate else {
            break;
        };

        let accepted = symbol.len() <= remaining;
        if let Some(trace) = trace.as_deref_mut() {
            trace.push(TraceStep {
                state,
                symbol,
                accepted,
            });
        }

        if accepted {
            word.push_str(symbol);
            state = state.flip();
            rejections = 0;
        } else {
            rejections += 1;
        }
    }

    trace!(%word, length, "generated word");
    word
}

/// At least `min_words` words, each at least one character long.
fn word_list<R: Rng + ?Sized>(
    config: &PhoneticConfig,
    min_words: usize,
    rng: &mut R,
) -> String {
    let count = draw_count(&config.words, rng).max(min_words);
    (0..count)
        .map(|_| {
            let length = draw_count(&config.word_length, rng).max(1);
            PhoneticGenerator::word(length, rng)
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn draw_count<R: Rng + ?Sized>(range: &Range<usize>, rng: &mut R) -> usize {
    usize::random_in(range.clone(), rng)
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
