use crate::corpus::InputDocument;
use crate::error::{Result, SearchError};
use crate::filter::DocumentFilter;
use crate::index::InvertedIndex;
use crate::query::{parse_query, Query};
use crate::ranking::{find_all_documents, select_top, MAX_RESULT_DOCUMENT_COUNT};
use crate::stop_words::StopWords;
use crate::tokenizer::{is_valid_word, split_into_words};
use crate::{DocId, Document, DocumentStatus};

/// In-memory TF-IDF search engine: one stop-word set plus one inverted index.
#[derive(Debug, Default)]
pub struct SearchServer {
    stop_words: StopWords,
    index: InvertedIndex,
}

impl SearchServer {
    pub fn new(stop_words: StopWords) -> Self {
        Self { stop_words, index: InvertedIndex::new() }
    }

    /// Engine with stop words given as space-separated text.
    pub fn with_stop_words_text(text: &str) -> Result<Self> {
        Ok(Self::new(StopWords::from_text(text)?))
    }

    pub fn stop_words(&self) -> &StopWords {
        &self.stop_words
    }

    /// Index one document. Either the whole document is stored or, on error,
    /// nothing is.
    pub fn add_document(
        &mut self,
        document_id: DocId,
        text: &str,
        status: DocumentStatus,
        ratings: &[i32],
    ) -> Result<()> {
        self.index.check_new_id(document_id)?;
        let words = self.split_into_words_no_stop(text)?;
        self.index.insert(document_id, &words, status, ratings)?;
        tracing::debug!(document_id, words = words.len(), ?status, "document indexed");
        Ok(())
    }

    /// Index a batch, skipping documents that fail validation. Returns how many
    /// were accepted.
    pub fn add_documents<I>(&mut self, documents: I) -> usize
    where
        I: IntoIterator<Item = InputDocument>,
    {
        let mut accepted = 0;
        for doc in documents {
            match self.add_document(doc.id, &doc.text, doc.status, &doc.ratings) {
                Ok(()) => accepted += 1,
                Err(err) => tracing::warn!(document_id = doc.id, %err, "skipping document"),
            }
        }
        accepted
    }

    /// Top documents for `raw_query` among those the filter accepts.
    pub fn find_top_documents_by<F>(&self, raw_query: &str, filter: F) -> Result<Vec<Document>>
    where
        F: DocumentFilter,
    {
        let query = self.parse_query(raw_query)?;
        let matched = find_all_documents(&self.index, &query, &filter);
        let total = matched.len();
        let top = select_top(matched, MAX_RESULT_DOCUMENT_COUNT);
        tracing::debug!(query = raw_query, total, returned = top.len(), "search");
        Ok(top)
    }

    pub fn find_top_documents_with_status(
        &self,
        raw_query: &str,
        status: DocumentStatus,
    ) -> Result<Vec<Document>> {
        self.find_top_documents_by(raw_query, status)
    }

    /// Top [`DocumentStatus::Actual`] documents.
    pub fn find_top_documents(&self, raw_query: &str) -> Result<Vec<Document>> {
        self.find_top_documents_with_status(raw_query, DocumentStatus::Actual)
    }

    /// Plus words of `raw_query` present in the document, in lexicographic
    /// order, together with its status. Any matching minus word empties the list.
    pub fn match_document(
        &self,
        raw_query: &str,
        document_id: DocId,
    ) -> Result<(Vec<String>, DocumentStatus)> {
        let query = self.parse_query(raw_query)?;
        let status = self
            .index
            .document(document_id)
            .ok_or(SearchError::DocumentNotFound(document_id))?
            .status;

        let vetoed = query
            .minus_words
            .iter()
            .any(|word| self.index.contains_word_in(word, document_id));
        if vetoed {
            return Ok((Vec::new(), status));
        }

        let matched: Vec<String> = query
            .plus_words
            .into_iter()
            .filter(|word| self.index.contains_word_in(word, document_id))
            .collect();
        Ok((matched, status))
    }

    pub fn document_count(&self) -> usize {
        self.index.document_count()
    }

    /// Id of the `index`-th added document.
    pub fn document_id(&self, index: usize) -> Option<DocId> {
        self.index.document_id(index)
    }

    pub fn document_ids(&self) -> impl Iterator<Item = DocId> + '_ {
        self.index.document_ids()
    }

    pub fn parse_query(&self, raw_query: &str) -> Result<Query> {
        parse_query(raw_query, &self.stop_words)
    }

    fn split_into_words_no_stop<'a>(&self, text: &'a str) -> Result<Vec<&'a str>> {
        let mut words = Vec::new();
        for word in split_into_words(text) {
            if !is_valid_word(word) {
                return Err(SearchError::InvalidWord(word.to_string()));
            }
            if !self.stop_words.contains(word) {
                words.push(word);
            }
        }
        Ok(words)
    }
}
