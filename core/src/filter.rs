use crate::{DocId, DocumentStatus};

/// Decides whether a scored document may appear in the results.
///
/// Implemented for [`DocumentStatus`] (status equality) and for any
/// `Fn(DocId, DocumentStatus, i32) -> bool`, so callers can pass either a
/// status or a closure over `(id, status, rating)`.
pub trait DocumentFilter {
    fn matches(&self, document_id: DocId, status: DocumentStatus, rating: i32) -> bool;
}

impl DocumentFilter for DocumentStatus {
    fn matches(&self, _document_id: DocId, status: DocumentStatus, _rating: i32) -> bool {
        *self == status
    }
}

impl<F> DocumentFilter for F
where
    F: Fn(DocId, DocumentStatus, i32) -> bool,
{
    fn matches(&self, document_id: DocId, status: DocumentStatus, rating: i32) -> bool {
        self(document_id, status, rating)
    }
}
