//! TF-IDF scoring and top-k selection.

use crate::filter::DocumentFilter;
use crate::index::{DocumentData, InvertedIndex};
use crate::query::Query;
use crate::{DocId, Document};
use std::collections::BTreeMap;

pub const MAX_RESULT_DOCUMENT_COUNT: usize = 5;

/// Relevances closer than this are treated as equal and ordered by rating.
pub const RELEVANCE_EPSILON: f64 = 1e-6;

/// Score every document reachable from the plus words, keeping those the
/// filter accepts, then drop every document that contains a minus word.
/// Results come back in ascending id order.
///
/// # Panics
///
/// Panics if a posting refers to a document without metadata, which the
/// index never produces.
pub fn find_all_documents<F>(index: &InvertedIndex, query: &Query, filter: &F) -> Vec<Document>
where
    F: DocumentFilter + ?Sized,
{
    let mut document_to_relevance: BTreeMap<DocId, f64> = BTreeMap::new();
    for word in &query.plus_words {
        let Some(postings) = index.postings(word) else { continue };
        let idf = index.inverse_document_freq(word);
        for (&document_id, &term_freq) in postings {
            let data = metadata(index, document_id);
            if filter.matches(document_id, data.status, data.rating) {
                *document_to_relevance.entry(document_id).or_insert(0.0) += term_freq * idf;
            }
        }
    }

    for word in &query.minus_words {
        let Some(postings) = index.postings(word) else { continue };
        for document_id in postings.keys() {
            document_to_relevance.remove(document_id);
        }
    }

    document_to_relevance
        .into_iter()
        .map(|(id, relevance)| Document { id, relevance, rating: metadata(index, id).rating })
        .collect()
}

fn metadata(index: &InvertedIndex, document_id: DocId) -> &DocumentData {
    index
        .document(document_id)
        .unwrap_or_else(|| panic!("posting refers to unknown document {document_id}"))
}

/// `true` when `lhs` ranks ahead of `rhs`: higher relevance first, and higher
/// rating first once relevances are within [`RELEVANCE_EPSILON`].
pub fn ranks_before(lhs: &Document, rhs: &Document) -> bool {
    if (lhs.relevance - rhs.relevance).abs() < RELEVANCE_EPSILON {
        lhs.rating > rhs.rating
    } else {
        lhs.relevance > rhs.relevance
    }
}

/// Keep the best `limit` documents in rank order.
///
/// The epsilon rule is not transitive, so this is a partial selection pass
/// rather than a library sort that expects a total order.
pub fn select_top(mut documents: Vec<Document>, limit: usize) -> Vec<Document> {
    let take = limit.min(documents.len());
    for i in 0..take {
        let mut best = i;
        for j in (i + 1)..documents.len() {
            if ranks_before(&documents[j], &documents[best]) {
                best = j;
            }
        }
        documents.swap(i, best);
    }
    documents.truncate(take);
    documents
}
