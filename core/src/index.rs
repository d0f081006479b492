use crate::error::{Result, SearchError};
use crate::{DocId, DocumentStatus};
use std::collections::BTreeMap;

/// Per-document metadata kept alongside the postings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocumentData {
    pub rating: i32,
    pub status: DocumentStatus,
}

/// word -> (document id -> term frequency). Document ids iterate in ascending
/// order within each postings map.
pub type Postings = BTreeMap<DocId, f64>;

#[derive(Debug, Default)]
pub struct InvertedIndex {
    word_to_document_freqs: BTreeMap<String, Postings>,
    documents: BTreeMap<DocId, DocumentData>,
    document_ids: Vec<DocId>,
}

impl InvertedIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store one document whose words are already split, validated and free of
    /// stop words. Fails without touching the index when `document_id` is
    /// negative or already present.
    pub fn insert(
        &mut self,
        document_id: DocId,
        words: &[&str],
        status: DocumentStatus,
        ratings: &[i32],
    ) -> Result<()> {
        self.check_new_id(document_id)?;

        if !words.is_empty() {
            let inv_word_count = 1.0 / words.len() as f64;
            for word in words {
                *self
                    .word_to_document_freqs
                    .entry((*word).to_string())
                    .or_default()
                    .entry(document_id)
                    .or_insert(0.0) += inv_word_count;
            }
        }
        self.documents.insert(
            document_id,
            DocumentData { rating: compute_average_rating(ratings), status },
        );
        self.document_ids.push(document_id);
        Ok(())
    }

    /// Reject ids that can never be inserted.
    pub fn check_new_id(&self, document_id: DocId) -> Result<()> {
        if document_id < 0 {
            return Err(SearchError::InvalidDocumentId(document_id));
        }
        if self.documents.contains_key(&document_id) {
            return Err(SearchError::DuplicateDocumentId(document_id));
        }
        Ok(())
    }

    pub fn document_count(&self) -> usize {
        self.document_ids.len()
    }

    /// Id at insertion position `index`.
    pub fn document_id(&self, index: usize) -> Option<DocId> {
        self.document_ids.get(index).copied()
    }

    pub fn document_ids(&self) -> impl Iterator<Item = DocId> + '_ {
        self.document_ids.iter().copied()
    }

    pub fn document(&self, document_id: DocId) -> Option<&DocumentData> {
        self.documents.get(&document_id)
    }

    /// Postings of `word`, or `None` when no document contains it.
    pub fn postings(&self, word: &str) -> Option<&Postings> {
        self.word_to_document_freqs.get(word)
    }

    pub fn contains_word_in(&self, word: &str, document_id: DocId) -> bool {
        self.postings(word)
            .map_or(false, |postings| postings.contains_key(&document_id))
    }

    /// `ln(N / df)` for a word that is known to have postings.
    ///
    /// # Panics
    ///
    /// Panics when `word` has no postings; callers look the word up first.
    pub fn inverse_document_freq(&self, word: &str) -> f64 {
        let postings = self
            .postings(word)
            .unwrap_or_else(|| panic!("inverse document frequency of unindexed word {word:?}"));
        (self.document_count() as f64 / postings.len() as f64).ln()
    }

    pub fn word_count(&self) -> usize {
        self.word_to_document_freqs.len()
    }
}

/// Integer mean of the ratings, truncated toward zero; 0 for no ratings.
pub fn compute_average_rating(ratings: &[i32]) -> i32 {
    if ratings.is_empty() {
        return 0;
    }
    let sum: i64 = ratings.iter().map(|&r| i64::from(r)).sum();
    (sum / ratings.len() as i64) as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accumulates_term_frequencies() {
        let mut index = InvertedIndex::new();
        index
            .insert(1, &["cat", "dog", "cat", "bird"], DocumentStatus::Actual, &[])
            .unwrap();
        let cat = index.postings("cat").unwrap();
        assert_eq!(cat.len(), 1);
        assert!((cat[&1] - 0.5).abs() < 1e-12);
        assert!((index.postings("dog").unwrap()[&1] - 0.25).abs() < 1e-12);
        assert!(index.postings("fish").is_none());
        assert_eq!(index.word_count(), 3);
    }

    #[test]
    fn rejects_negative_and_duplicate_ids() {
        let mut index = InvertedIndex::new();
        assert_eq!(
            index.insert(-1, &["x"], DocumentStatus::Actual, &[]),
            Err(SearchError::InvalidDocumentId(-1))
        );
        index.insert(3, &["x"], DocumentStatus::Actual, &[5]).unwrap();
        assert_eq!(
            index.insert(3, &["y"], DocumentStatus::Banned, &[1]),
            Err(SearchError::DuplicateDocumentId(3))
        );
        assert_eq!(index.document_count(), 1);
        assert!(index.postings("y").is_none());
        assert_eq!(index.document(3).unwrap().rating, 5);
    }

    #[test]
    fn keeps_insertion_order() {
        let mut index = InvertedIndex::new();
        for id in [7, 2, 9] {
            index.insert(id, &["w"], DocumentStatus::Actual, &[]).unwrap();
        }
        assert_eq!(index.document_ids().collect::<Vec<_>>(), vec![7, 2, 9]);
        assert_eq!(index.document_id(1), Some(2));
        assert_eq!(index.document_id(3), None);
    }

    #[test]
    fn document_without_words_is_still_counted() {
        let mut index = InvertedIndex::new();
        index.insert(0, &[], DocumentStatus::Irrelevant, &[]).unwrap();
        assert_eq!(index.document_count(), 1);
        assert_eq!(index.word_count(), 0);
    }

    #[test]
    fn inverse_document_freq() {
        let mut index = InvertedIndex::new();
        index.insert(1, &["cat", "city"], DocumentStatus::Actual, &[]).unwrap();
        index.insert(2, &["cat", "bat"], DocumentStatus::Actual, &[]).unwrap();
        assert_eq!(index.inverse_document_freq("cat"), 0.0);
        assert!((index.inverse_document_freq("city") - 2f64.ln()).abs() < 1e-12);
    }

    #[test]
    fn average_rating_truncates_toward_zero() {
        assert_eq!(compute_average_rating(&[]), 0);
        assert_eq!(compute_average_rating(&[4, 5, 7]), 5);
        assert_eq!(compute_average_rating(&[1, 2]), 1);
        assert_eq!(compute_average_rating(&[-1, -2]), -1);
        assert_eq!(compute_average_rating(&[i32::MAX, i32::MAX]), i32::MAX);
    }
}
