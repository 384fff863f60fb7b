//! Phonetic text through the public API.

use rand::rngs::StdRng;
use rand::SeedableRng;
use randomize::phonetic::{SoundState, CONSONANTS, VOWELS};
use randomize::{PhoneticConfig, PhoneticGenerator, Strategy, SENTENCE_TERMINATORS};

#[test]
fn test_six_character_words() {
    let mut rng = StdRng::seed_from_u64(6);
    for _ in 0..500 {
        let word = PhoneticGenerator::word(6, &mut rng);
        assert_eq!(word.chars().count(), 6);
        assert!(word.chars().all(|c| c.is_ascii_lowercase()));
    }
}

#[test]
fn test_first_symbol_matches_start_state() {
    let mut rng = StdRng::seed_from_u64(6);
    let mut starts = Vec::new();
    for _ in 0..100 {
        let (word, trace) = PhoneticGenerator::word_traced(6, &mut rng);
        let first = trace.iter().find(|step| step.accepted).unwrap();
        assert!(word.starts_with(first.symbol));
        match first.state {
            SoundState::Vowel => assert!(VOWELS.contains(&first.symbol)),
            SoundState::Consonant => assert!(CONSONANTS.contains(&first.symbol)),
        }
        starts.push(first.state);
    }
    assert!(starts.contains(&SoundState::Vowel));
    assert!(starts.contains(&SoundState::Consonant));
}

#[test]
fn test_sentences_end_once_and_start_capitalized() {
    let strategy = Strategy::sentence_with(PhoneticConfig::minimal());
    for _ in 0..100 {
        let sentence = strategy.random();
        let terminators = sentence
            .chars()
            .filter(|c| SENTENCE_TERMINATORS.contains(c))
            .count();
        assert_eq!(terminators, 1);
        assert!(sentence.ends_with(SENTENCE_TERMINATORS));
        assert!(sentence.starts_with(|c: char| c.is_uppercase()));
    }
}

#[test]
fn test_text_layout() {
    let config = PhoneticConfig::long_form();
    let mut rng = StdRng::seed_from_u64(9);
    let text = PhoneticGenerator::text(&config, &mut rng);

    let paragraphs: Vec<_> = text.split('\n').collect();
    assert!(config.paragraphs.contains(&paragraphs.len()));
    for paragraph in paragraphs {
        let sentences = paragraph
            .chars()
            .filter(|c| SENTENCE_TERMINATORS.contains(c))
            .count();
        assert!(config.sentences.contains(&sentences));
    }
}
