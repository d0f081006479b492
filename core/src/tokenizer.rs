/// Split text into words on the space character. Consecutive spaces never
/// yield empty words; every other byte, control characters included, stays
/// inside the word so that validation can see it.
pub fn split_into_words(text: &str) -> impl Iterator<Item = &str> {
    text.split(' ').filter(|w| !w.is_empty())
}

/// A word is valid when it carries no control characters (code points below 0x20).
pub fn is_valid_word(word: &str) -> bool {
    !word.chars().any(|c| c < ' ')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_spaces_only() {
        let words: Vec<&str> = split_into_words("  cat in\tthe   city ").collect();
        assert_eq!(words, vec!["cat", "in\tthe", "city"]);
    }

    #[test]
    fn empty_text_has_no_words() {
        assert_eq!(split_into_words("").count(), 0);
        assert_eq!(split_into_words("    ").count(), 0);
    }

    #[test]
    fn control_characters_are_invalid() {
        assert!(is_valid_word("скворец"));
        assert!(is_valid_word("-x"));
        assert!(!is_valid_word("ca\u{12}t"));
        assert!(!is_valid_word("line\n"));
    }
}
