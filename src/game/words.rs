use std::fs;
use std::path::Path;

use rand::Rng;
use rand::seq::SliceRandom;
use tracing::{info, warn};

const WORDS_BUILTIN: &str = include_str!("../../assets/words.json");

/// Read-only list of drill words. Duplicates are kept, so a word that
/// appears twice is twice as likely to be picked.
#[derive(Clone, Debug)]
pub struct WordList {
    words: Vec<String>,
}

impl WordList {
    pub fn builtin() -> Self {
        let words: Vec<String> = serde_json::from_str(WORDS_BUILTIN).unwrap_or_default();
        Self::from_words(words)
    }

    /// Loads a JSON array of words, falling back to the built-in list when the
    /// file is missing, malformed, or has no usable entries.
    pub fn load(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Self::builtin();
        };

        let parsed = fs::read_to_string(path)
            .map_err(anyhow::Error::from)
            .and_then(|content| Ok(serde_json::from_str::<Vec<String>>(&content)?));

        match parsed {
            Ok(words) => {
                let list = Self::from_words(words);
                if list.is_empty() {
                    warn!(path = %path.display(), "custom word list has no usable words, using built-in list");
                    Self::builtin()
                } else {
                    info!(path = %path.display(), count = list.len(), "loaded custom word list");
                    list
                }
            }
            Err(err) => {
                warn!(path = %path.display(), error = %err, "failed to read word list, using built-in list");
                Self::builtin()
            }
        }
    }

    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words = words
            .into_iter()
            .map(|w| w.as_ref().trim().to_ascii_lowercase())
            .filter(|w| !w.is_empty() && w.chars().all(|c| c.is_ascii_alphabetic()))
            .collect();
        Self { words }
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.iter().any(|w| w == word)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }

    /// Uniform pick with no repeat avoidance.
    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&str> {
        self.words.choose(rng).map(String::as_str)
    }
}

impl Default for WordList {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;
    use std::io::Write;

    #[test]
    fn builtin_list_is_lowercase_letters() {
        let list = WordList::builtin();
        assert_eq!(list.len(), 100);
        assert!(list.iter().all(|w| w.chars().all(|c| c.is_ascii_lowercase())));
        assert!(list.contains("because"));
    }

    #[test]
    fn from_words_normalizes_and_filters() {
        let list = WordList::from_words([" Cat ", "dog!", "", "Sun"]);
        let words: Vec<&str> = list.iter().collect();
        assert_eq!(words, vec!["cat", "sun"]);
    }

    #[test]
    fn pick_returns_member() {
        let list = WordList::builtin();
        let mut rng = SmallRng::seed_from_u64(7);
        for _ in 0..50 {
            let word = list.pick(&mut rng).unwrap();
            assert!(list.contains(word));
        }
    }

    #[test]
    fn pick_on_empty_list_is_none() {
        let list = WordList::from_words(Vec::<String>::new());
        let mut rng = SmallRng::seed_from_u64(1);
        assert!(list.pick(&mut rng).is_none());
    }

    #[test]
    fn load_custom_list() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"["Apple", "kite"]"#).unwrap();
        let list = WordList::load(Some(file.path()));
        assert_eq!(list.iter().collect::<Vec<_>>(), vec!["apple", "kite"]);
    }

    #[test]
    fn load_falls_back_on_garbage() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        let list = WordList::load(Some(file.path()));
        assert_eq!(list.len(), WordList::builtin().len());
    }

    #[test]
    fn load_falls_back_on_missing_file() {
        let list = WordList::load(Some(Path::new("/definitely/not/here.json")));
        assert_eq!(list.len(), WordList::builtin().len());
    }
}
