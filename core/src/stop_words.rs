use crate::error::{Result, SearchError};
use crate::tokenizer::{is_valid_word, split_into_words};
use std::collections::BTreeSet;

/// Words excluded from both indexing and querying. Matching is exact and
/// case-sensitive; the set never changes after construction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StopWords {
    words: BTreeSet<String>,
}

impl StopWords {
    /// Build from any collection of words. Empty strings are dropped and
    /// duplicates collapse; a word with control characters fails the whole set.
    pub fn new<I, S>(words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = BTreeSet::new();
        for word in words {
            let word = word.as_ref();
            if word.is_empty() {
                continue;
            }
            if !is_valid_word(word) {
                return Err(SearchError::InvalidWord(word.to_string()));
            }
            set.insert(word.to_string());
        }
        Ok(Self { words: set })
    }

    /// Build from space-separated text, e.g. `"in the and"`.
    pub fn from_text(text: &str) -> Result<Self> {
        Self::new(split_into_words(text))
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_text_dedupes_and_skips_empty() {
        let sw = StopWords::from_text("in  the in ").unwrap();
        assert_eq!(sw.len(), 2);
        assert!(sw.contains("in"));
        assert!(sw.contains("the"));
        assert!(!sw.contains("The"));
    }

    #[test]
    fn collection_with_empty_strings() {
        let sw = StopWords::new(["", "and", "and"]).unwrap();
        assert_eq!(sw.iter().collect::<Vec<_>>(), vec!["and"]);
    }

    #[test]
    fn rejects_control_characters() {
        let err = StopWords::new(["in", "th\u{1}e"]).unwrap_err();
        assert_eq!(err, SearchError::InvalidWord("th\u{1}e".into()));
    }
}
