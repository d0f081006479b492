use crate::error::{Result, SearchError};
use crate::stop_words::StopWords;
use crate::tokenizer::{is_valid_word, split_into_words};
use std::collections::BTreeSet;

/// A parsed query. Plus and minus words are deduplicated and disjoint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    pub plus_words: BTreeSet<String>,
    pub minus_words: BTreeSet<String>,
}

impl Query {
    pub fn is_empty(&self) -> bool {
        self.plus_words.is_empty() && self.minus_words.is_empty()
    }
}

#[derive(Debug, PartialEq, Eq)]
struct QueryWord<'a> {
    data: &'a str,
    is_minus: bool,
}

fn parse_query_word(text: &str) -> Result<QueryWord<'_>> {
    let (data, is_minus) = match text.strip_prefix('-') {
        Some(rest) => (rest, true),
        None => (text, false),
    };
    if data.is_empty() || data.starts_with('-') || !is_valid_word(data) {
        return Err(SearchError::MalformedQueryWord(text.to_string()));
    }
    Ok(QueryWord { data, is_minus })
}

/// Parse raw query text. A word prefixed with a single `-` is a minus word;
/// stop words are dropped whichever set they would have joined. A word given
/// both ways ends up only among the minus words.
pub fn parse_query(text: &str, stop_words: &StopWords) -> Result<Query> {
    let mut query = Query::default();
    for word in split_into_words(text) {
        let word = parse_query_word(word)?;
        if stop_words.contains(word.data) {
            continue;
        }
        if word.is_minus {
            query.plus_words.remove(word.data);
            query.minus_words.insert(word.data.to_string());
        } else if !query.minus_words.contains(word.data) {
            query.plus_words.insert(word.data.to_string());
        }
    }
    Ok(query)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(set: &BTreeSet<String>) -> Vec<&str> {
        set.iter().map(String::as_str).collect()
    }

    #[test]
    fn splits_plus_and_minus_words() {
        let sw = StopWords::from_text("in the").unwrap();
        let q = parse_query("cat in the city -dog cat -dog", &sw).unwrap();
        assert_eq!(words(&q.plus_words), vec!["cat", "city"]);
        assert_eq!(words(&q.minus_words), vec!["dog"]);
    }

    #[test]
    fn stop_words_dropped_from_minus_too() {
        let sw = StopWords::from_text("in the").unwrap();
        let q = parse_query("-the -in", &sw).unwrap();
        assert!(q.is_empty());
    }

    #[test]
    fn minus_wins_over_plus() {
        let sw = StopWords::default();
        let q = parse_query("cat -cat", &sw).unwrap();
        assert!(q.plus_words.is_empty());
        assert_eq!(words(&q.minus_words), vec!["cat"]);

        let q = parse_query("-cat cat", &sw).unwrap();
        assert!(q.plus_words.is_empty());
        assert_eq!(words(&q.minus_words), vec!["cat"]);
    }

    #[test]
    fn malformed_words() {
        let sw = StopWords::default();
        for bad in ["cat -", "--cat", "cat ---", "ca\u{3}t", "-do\u{1f}g"] {
            assert!(
                matches!(parse_query(bad, &sw), Err(SearchError::MalformedQueryWord(_))),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn malformed_stop_word_still_rejected() {
        let sw = StopWords::from_text("in").unwrap();
        assert!(parse_query("--in", &sw).is_err());
    }

    #[test]
    fn inner_dash_is_allowed() {
        let sw = StopWords::default();
        let q = parse_query("well-known -pre-war", &sw).unwrap();
        assert_eq!(words(&q.plus_words), vec!["well-known"]);
        assert_eq!(words(&q.minus_words), vec!["pre-war"]);
    }

    #[test]
    fn parsing_is_idempotent() {
        let sw = StopWords::from_text("a").unwrap();
        let text = "b a -c d b -c";
        assert_eq!(parse_query(text, &sw).unwrap(), parse_query(text, &sw).unwrap());
    }
}
