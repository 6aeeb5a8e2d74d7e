use include_dir::{include_dir, Dir};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::Deserialize;
use serde_json::from_str;
use std::error::Error;

static VOCAB_DIR: Dir = include_dir!("src/vocab");

#[allow(dead_code)]
#[derive(Deserialize, Clone, Debug)]
pub struct Vocabulary {
    pub name: String,
    pub size: u32,
    pub words: Vec<String>,
}

impl Vocabulary {
    pub fn new(file_name: &str) -> Self {
        read_vocabulary_from_file(format!("{file_name}.json")).unwrap()
    }

    /// Build a vocabulary directly from a word list. Mostly useful in tests
    /// and for deterministic scenarios.
    pub fn from_words(name: &str, words: Vec<String>) -> Self {
        Self {
            name: name.to_string(),
            size: words.len() as u32,
            words,
        }
    }
}

fn read_vocabulary_from_file(file_name: String) -> Result<Vocabulary, Box<dyn Error>> {
    let file = VOCAB_DIR
        .get_file(file_name)
        .expect("Vocabulary file not found");

    let file_as_str = file
        .contents_utf8()
        .expect("Unable to interpret file as a string");

    let vocab = from_str(file_as_str).expect("Unable to deserialize vocabulary json");

    Ok(vocab)
}

/// Strategy for drawing the next word to spawn
pub trait WordPicker: Send {
    fn pick(&mut self, vocab: &Vocabulary) -> String;
}

/// Uniform random selection, matching the original game's behavior
pub struct RandomPicker {
    rng: StdRng,
}

impl RandomPicker {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomPicker {
    fn default() -> Self {
        Self::new()
    }
}

impl WordPicker for RandomPicker {
    fn pick(&mut self, vocab: &Vocabulary) -> String {
        vocab
            .words
            .choose(&mut self.rng)
            .cloned()
            .unwrap_or_default()
    }
}

/// Cycles through the vocabulary in order. Deterministic, for tests.
#[derive(Default)]
pub struct SequencePicker {
    next: usize,
}

impl SequencePicker {
    pub fn new() -> Self {
        Self::default()
    }
}

impl WordPicker for SequencePicker {
    fn pick(&mut self, vocab: &Vocabulary) -> String {
        if vocab.words.is_empty() {
            return String::new();
        }
        let word = vocab.words[self.next % vocab.words.len()].clone();
        self.next += 1;
        word
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vocabulary_new_design() {
        let vocab = Vocabulary::new("design");

        assert_eq!(vocab.name, "design");
        assert_eq!(vocab.words.len(), vocab.size as usize);
        assert!(vocab.words.contains(&"deadline".to_string()));
    }

    #[test]
    fn test_vocabulary_new_system() {
        let vocab = Vocabulary::new("system");

        assert_eq!(vocab.name, "system");
        assert!(!vocab.words.is_empty());
    }

    #[test]
    fn test_vocabulary_new_arcade() {
        let vocab = Vocabulary::new("arcade");

        assert_eq!(vocab.name, "arcade");
        assert!(!vocab.words.is_empty());
    }

    #[test]
    fn test_vocabulary_deserialization() {
        let json_data = r#"
        {
            "name": "test",
            "size": 3,
            "words": ["hello", "world", "test"]
        }
        "#;

        let vocab: Vocabulary = from_str(json_data).expect("Failed to deserialize test vocab");

        assert_eq!(vocab.name, "test");
        assert_eq!(vocab.size, 3);
        assert_eq!(vocab.words.len(), 3);
    }

    #[test]
    #[should_panic(expected = "Vocabulary file not found")]
    fn test_read_nonexistent_vocabulary_file() {
        let _result = read_vocabulary_from_file("nonexistent.json".to_string());
    }

    #[test]
    fn test_random_picker_draws_from_vocab() {
        let vocab = Vocabulary::from_words("t", vec!["alpha".into(), "beta".into()]);
        let mut picker = RandomPicker::seeded(7);

        for _ in 0..20 {
            let word = picker.pick(&vocab);
            assert!(vocab.words.contains(&word));
        }
    }

    #[test]
    fn test_random_picker_seeded_is_deterministic() {
        let vocab = Vocabulary::new("design");
        let mut a = RandomPicker::seeded(42);
        let mut b = RandomPicker::seeded(42);

        for _ in 0..10 {
            assert_eq!(a.pick(&vocab), b.pick(&vocab));
        }
    }

    #[test]
    fn test_sequence_picker_cycles_in_order() {
        let vocab = Vocabulary::from_words("t", vec!["a".into(), "b".into()]);
        let mut picker = SequencePicker::new();

        assert_eq!(picker.pick(&vocab), "a");
        assert_eq!(picker.pick(&vocab), "b");
        assert_eq!(picker.pick(&vocab), "a");
    }

    #[test]
    fn test_sequence_picker_empty_vocab() {
        let vocab = Vocabulary::from_words("empty", vec![]);
        let mut picker = SequencePicker::new();

        assert_eq!(picker.pick(&vocab), "");
    }
}
