use std::collections::HashSet;

use indexmap::IndexMap;
use rand::seq::SliceRandom;
use rand::Rng;
use thiserror::Error;
use tracing::{info, warn};

use crate::storage::{to_pretty_json, Storage, StorageError, StorageResult};

pub const DEFAULT_CATEGORIES: [(&str, &[&str]); 6] = [
    ("fruits", &["apple", "banana", "orange", "mango", "grapes", "pineapple"]),
    ("animals", &["tiger", "lion", "elephant", "zebra", "monkey", "giraffe"]),
    ("countries", &["pakistan", "canada", "france", "japan", "brazil", "italy"]),
    ("cities", &["paris", "karachi", "london", "tokyo", "dubai", "newyork"]),
    ("vegetables", &["carrot", "potato", "onion", "tomato", "cabbage", "broccoli"]),
    ("languages", &["python", "java", "english", "urdu", "arabic", "french"]),
];

#[derive(Debug, Error)]
pub enum WordBankError {
    #[error("{0}")]
    Validation(String),
    #[error("'{word}' is not in {category}")]
    NotFound { category: String, word: String },
    #[error("unknown category '{0}'")]
    UnknownCategory(String),
    #[error("category '{0}' has no words")]
    EmptyCategory(String),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Words must be non-empty and made of letters only.
pub fn is_valid_word(word: &str) -> bool {
    !word.is_empty() && word.chars().all(char::is_alphabetic)
}

pub fn normalize_word(word: &str) -> String {
    word.trim().to_lowercase()
}

/// Category name to candidate words. Always backed by a record: every
/// successful edit rewrites it.
pub struct WordBank {
    categories: IndexMap<String, Vec<String>>,
    storage: Box<dyn Storage>,
}

impl WordBank {
    pub fn open(storage: Box<dyn Storage>) -> StorageResult<Self> {
        let categories = match storage.read() {
            Ok(Some(contents)) => {
                let categories: IndexMap<String, Vec<String>> = serde_json::from_str(&contents)
                    .map_err(|e| StorageError::malformed(storage.describe(), e))?;
                Self::check_record(&categories, &storage.describe())?;
                info!(
                    record = %storage.describe(),
                    categories = categories.len(),
                    "loaded word bank"
                );
                categories
            }
            Ok(None) => {
                info!(record = %storage.describe(), "no category record; using built-in words");
                default_categories()
            }
            Err(err) => {
                warn!(error = %err, "category record unreadable; using built-in words");
                default_categories()
            }
        };
        Ok(Self { categories, storage })
    }

    fn check_record(categories: &IndexMap<String, Vec<String>>, path: &str) -> StorageResult<()> {
        for (category, words) in categories {
            if let Some(bad) = words
                .iter()
                .find(|w| !is_valid_word(w) || w.to_lowercase() != **w)
            {
                return Err(StorageError::malformed(
                    path,
                    format!("category '{category}' holds invalid word '{bad}'"),
                ));
            }
            let mut seen: HashSet<&str> = HashSet::with_capacity(words.len());
            for word in words {
                if !seen.insert(word.as_str()) {
                    return Err(StorageError::malformed(
                        path,
                        format!("category '{category}' lists '{word}' more than once"),
                    ));
                }
            }
        }
        Ok(())
    }

    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.categories.keys().map(String::as_str)
    }

    pub fn category_count(&self) -> usize {
        self.categories.len()
    }

    pub fn words(&self, category: &str) -> Option<&[String]> {
        self.categories.get(category).map(Vec::as_slice)
    }

    pub fn random_word<R: Rng + ?Sized>(
        &self,
        category: &str,
        rng: &mut R,
    ) -> Result<(String, String), WordBankError> {
        let words = self
            .categories
            .get(category)
            .ok_or_else(|| WordBankError::UnknownCategory(category.to_string()))?;
        let word = words
            .choose(rng)
            .ok_or_else(|| WordBankError::EmptyCategory(category.to_string()))?;
        Ok((word.clone(), category.to_string()))
    }

    /// Uniform category among the non-empty ones, then a uniform word.
    /// `None` when every category is empty.
    pub fn random_pick<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<(String, String)> {
        let stocked: Vec<&str> = self
            .categories
            .iter()
            .filter(|(_, words)| !words.is_empty())
            .map(|(name, _)| name.as_str())
            .collect();
        let category = stocked.choose(rng)?;
        self.random_word(category, rng).ok()
    }

    pub fn add_word(&mut self, category: &str, word: &str) -> Result<String, WordBankError> {
        let word = normalize_word(word);
        let words = self
            .categories
            .get_mut(category)
            .ok_or_else(|| WordBankError::UnknownCategory(category.to_string()))?;
        if !is_valid_word(&word) {
            return Err(WordBankError::Validation(
                "enter a valid word (letters only)".to_string(),
            ));
        }
        if words.contains(&word) {
            return Err(WordBankError::Validation(format!(
                "'{word}' already exists in {category}"
            )));
        }
        words.push(word.clone());

        if let Err(err) = self.persist() {
            if let Some(words) = self.categories.get_mut(category) {
                words.pop();
            }
            return Err(err.into());
        }
        info!(category, word = %word, "added word");
        Ok(word)
    }

    pub fn remove_word(&mut self, category: &str, word: &str) -> Result<(), WordBankError> {
        let words = self
            .categories
            .get_mut(category)
            .ok_or_else(|| WordBankError::UnknownCategory(category.to_string()))?;
        let idx = words
            .iter()
            .position(|w| w == word)
            .ok_or_else(|| WordBankError::NotFound {
                category: category.to_string(),
                word: word.to_string(),
            })?;
        let removed = words.remove(idx);

        if let Err(err) = self.persist() {
            if let Some(words) = self.categories.get_mut(category) {
                words.insert(idx, removed);
            }
            return Err(err.into());
        }
        info!(category, word, "removed word");
        Ok(())
    }

    fn persist(&mut self) -> StorageResult<()> {
        let json = to_pretty_json(&self.categories)
            .map_err(|e| StorageError::malformed(self.storage.describe(), e))?;
        self.storage.write(&json)
    }
}

fn default_categories() -> IndexMap<String, Vec<String>> {
    DEFAULT_CATEGORIES
        .iter()
        .map(|(name, words)| {
            (
                name.to_string(),
                words.iter().map(|w| w.to_string()).collect(),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn bank() -> (WordBank, MemoryStorage) {
        let handle = MemoryStorage::new();
        (WordBank::open(Box::new(handle.clone())).unwrap(), handle)
    }

    #[test]
    fn test_default_words_are_lowercase_letters() {
        let (bank, _) = bank();
        let names: Vec<&str> = bank.categories().collect();
        assert_eq!(
            names,
            vec!["fruits", "animals", "countries", "cities", "vegetables", "languages"]
        );
        for name in names {
            for word in bank.words(name).unwrap() {
                assert!(is_valid_word(word), "{word} in {name}");
                assert_eq!(word, &word.to_lowercase());
            }
        }
    }

    #[test]
    fn test_defaults_are_not_written_until_an_edit() {
        let (_bank, handle) = bank();
        assert!(handle.contents().is_none());
    }

    #[test]
    fn test_add_word_normalizes_and_persists() {
        let (mut bank, handle) = bank();
        let added = bank.add_word("fruits", "  Kiwi ").unwrap();
        assert_eq!(added, "kiwi");
        assert_eq!(bank.words("fruits").unwrap().last().unwrap(), "kiwi");
        assert!(handle.contents().unwrap().contains("\"kiwi\""));
    }

    #[test]
    fn test_add_duplicate_word_fails() {
        let (mut bank, _) = bank();
        bank.add_word("fruits", "kiwi").unwrap();
        let before = bank.words("fruits").unwrap().len();

        let err = bank.add_word("fruits", "KIWI").unwrap_err();
        assert!(matches!(err, WordBankError::Validation(_)));
        assert_eq!(bank.words("fruits").unwrap().len(), before);
    }

    #[test]
    fn test_add_rejects_empty_and_non_alphabetic() {
        let (mut bank, handle) = bank();
        for bad in ["", "   ", "kiwi2", "new york", "ki-wi"] {
            assert!(matches!(
                bank.add_word("fruits", bad),
                Err(WordBankError::Validation(_))
            ));
        }
        assert_eq!(bank.words("fruits").unwrap().len(), 6);
        assert!(handle.contents().is_none());
    }

    #[test]
    fn test_add_to_unknown_category() {
        let (mut bank, _) = bank();
        assert!(matches!(
            bank.add_word("planets", "mars"),
            Err(WordBankError::UnknownCategory(_))
        ));
    }

    #[test]
    fn test_remove_word() {
        let (mut bank, handle) = bank();
        bank.remove_word("animals", "zebra").unwrap();
        assert!(!bank.words("animals").unwrap().contains(&"zebra".to_string()));
        assert!(!handle.contents().unwrap().contains("zebra"));

        let err = bank.remove_word("animals", "zebra").unwrap_err();
        assert!(matches!(err, WordBankError::NotFound { .. }));
    }

    #[test]
    fn test_failed_persist_rolls_back() {
        let (mut bank, handle) = bank();
        handle.set_fail_writes(true);

        assert!(matches!(
            bank.add_word("fruits", "kiwi"),
            Err(WordBankError::Storage(_))
        ));
        assert_eq!(bank.words("fruits").unwrap().len(), 6);

        assert!(bank.remove_word("fruits", "mango").is_err());
        assert_eq!(bank.words("fruits").unwrap()[3], "mango");
    }

    #[test]
    fn test_persisted_record_overrides_defaults() {
        let (mut bank, handle) = bank();
        bank.add_word("cities", "lahore").unwrap();

        let reopened = WordBank::open(Box::new(handle)).unwrap();
        assert_eq!(reopened.words("cities").unwrap().last().unwrap(), "lahore");
        assert_eq!(reopened.category_count(), 6);
    }

    #[test]
    fn test_record_with_bad_word_is_malformed() {
        let storage = MemoryStorage::with_contents(r#"{ "fruits": ["apple", "b4nana"] }"#);
        assert!(matches!(
            WordBank::open(Box::new(storage)),
            Err(StorageError::Malformed { .. })
        ));
    }

    #[test]
    fn test_record_with_duplicate_word_is_malformed() {
        let storage = MemoryStorage::with_contents(r#"{ "fruits": ["kiwi", "apple", "kiwi"] }"#);
        let err = WordBank::open(Box::new(storage)).err().unwrap();
        assert!(matches!(err, StorageError::Malformed { .. }));
        assert!(err.to_string().contains("kiwi"));
    }

    #[test]
    fn test_unreadable_record_falls_back_to_defaults() {
        let storage = MemoryStorage::with_contents(r#"{ "only": ["solo"] }"#);
        storage.set_fail_reads(true);
        let bank = WordBank::open(Box::new(storage)).unwrap();
        assert_eq!(bank.category_count(), DEFAULT_CATEGORIES.len());
        assert_eq!(bank.words("fruits").unwrap()[0], "apple");
        assert!(bank.words("only").is_none());
    }

    #[test]
    fn test_random_word_comes_from_category() {
        let (bank, _) = bank();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            let (word, category) = bank.random_word("animals", &mut rng).unwrap();
            assert_eq!(category, "animals");
            assert!(bank.words("animals").unwrap().contains(&word));
        }
        assert!(matches!(
            bank.random_word("planets", &mut rng),
            Err(WordBankError::UnknownCategory(_))
        ));
    }

    #[test]
    fn test_random_pick_skips_empty_categories() {
        let storage = MemoryStorage::with_contents(r#"{ "empty": [], "one": ["solo"] }"#);
        let bank = WordBank::open(Box::new(storage)).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..10 {
            assert_eq!(
                bank.random_pick(&mut rng),
                Some(("solo".to_string(), "one".to_string()))
            );
        }
        assert!(matches!(
            bank.random_word("empty", &mut rng),
            Err(WordBankError::EmptyCategory(_))
        ));
    }

    #[test]
    fn test_random_pick_with_no_words() {
        let storage = MemoryStorage::with_contents(r#"{ "empty": [] }"#);
        let bank = WordBank::open(Box::new(storage)).unwrap();
        assert_eq!(bank.random_pick(&mut StdRng::seed_from_u64(1)), None);
    }
}
