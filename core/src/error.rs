use crate::DocId;

pub type Result<T> = std::result::Result<T, SearchError>;

/// Coarse classification of [`SearchError`] for callers that map errors onto
/// their own surface (exit codes, HTTP statuses).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidInput,
    NotFound,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    #[error("invalid document_id: {0}")]
    InvalidDocumentId(DocId),
    #[error("documents contain document with document_id: {0}")]
    DuplicateDocumentId(DocId),
    #[error("word contains invalid characters: {0:?}")]
    InvalidWord(String),
    #[error("malformed query word: {0:?}")]
    MalformedQueryWord(String),
    #[error("document not found: {0}")]
    DocumentNotFound(DocId),
}

impl SearchError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SearchError::DocumentNotFound(_) => ErrorKind::NotFound,
            _ => ErrorKind::InvalidInput,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds() {
        assert_eq!(SearchError::InvalidDocumentId(-1).kind(), ErrorKind::InvalidInput);
        assert_eq!(SearchError::MalformedQueryWord("--x".into()).kind(), ErrorKind::InvalidInput);
        assert_eq!(SearchError::DocumentNotFound(7).kind(), ErrorKind::NotFound);
    }
}
