/// A word split around its Optimal Recognition Point
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrpParts {
    pub before: String,
    pub pivot: String,
    pub after: String,
}

impl OrpParts {
    /// Reassemble the original word
    pub fn word(&self) -> String {
        format!("{}{}{}", self.before, self.pivot, self.after)
    }
}

const BYTE_ORDER_MARK: char = '\u{feff}';

/// Split text on runs of whitespace, dropping empty pieces.
///
/// A byte order mark counts as whitespace so text files saved with one don't
/// start with an invisible char glued to the first word.
pub fn split_words(text: &str) -> Vec<String> {
    text.split(|c: char| c.is_whitespace() || c == BYTE_ORDER_MARK)
        .filter(|word| !word.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Index (in chars) of the pivot letter.
///
/// Words up to one char pivot on the first char, two and three char words on
/// the second, anything longer lands ~30% in.
pub fn orp_index(word: &str) -> usize {
    let len = word.chars().count();
    match len {
        0 | 1 => 0,
        2 | 3 => 1,
        // floor(len * 0.3) without going through floats
        _ => len * 3 / 10,
    }
}

pub fn render_word_with_orp(word: &str) -> OrpParts {
    if word.is_empty() {
        return OrpParts::default();
    }

    let pivot_at = orp_index(word);
    let mut chars = word.char_indices().skip(pivot_at);
    let (start, pivot) = match chars.next() {
        Some(entry) => entry,
        None => return OrpParts::default(),
    };
    let end = start + pivot.len_utf8();

    OrpParts {
        before: word[..start].to_string(),
        pivot: pivot.to_string(),
        after: word[end..].to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_words_mixed_whitespace() {
        assert_eq!(
            split_words("  hello   world\tfoo\n"),
            vec!["hello", "world", "foo"]
        );
    }

    #[test]
    fn test_split_words_empty_inputs() {
        assert!(split_words("").is_empty());
        assert!(split_words("   \t\n  ").is_empty());
        assert!(split_words("\u{2003}\u{00a0}").is_empty());
    }

    #[test]
    fn test_split_words_drops_byte_order_mark() {
        let words = split_words("\u{feff}hello world");
        assert_eq!(words, vec!["hello", "world"]);
        assert_eq!(render_word_with_orp(&words[0]).pivot, "e");
        assert_eq!(split_words("one\u{feff}two"), vec!["one", "two"]);
        assert!(split_words("\u{feff}").is_empty());
    }

    #[test]
    fn test_split_words_keeps_punctuation() {
        assert_eq!(
            split_words("Hello, world! It's fine."),
            vec!["Hello,", "world!", "It's", "fine."]
        );
    }

    #[test]
    fn test_orp_index_short_words() {
        assert_eq!(orp_index(""), 0);
        assert_eq!(orp_index("a"), 0);
        assert_eq!(orp_index("hi"), 1);
        assert_eq!(orp_index("the"), 1);
    }

    #[test]
    fn test_orp_index_scaled_words() {
        assert_eq!(orp_index("word"), 1);
        assert_eq!(orp_index("hello"), 1);
        assert_eq!(orp_index("reading"), 2);
        assert_eq!(orp_index("perception"), 3);
        assert_eq!(orp_index("extraordinary"), 3);
        assert_eq!(orp_index("supercalifragilistic"), 6);
    }

    #[test]
    fn test_orp_index_counts_chars_not_bytes() {
        // 4 chars, 8 bytes
        assert_eq!(orp_index("ñañá"), 1);
        assert_eq!(orp_index("日本"), 1);
    }

    #[test]
    fn test_orp_index_within_bounds() {
        let alphabet = "abcdefghijklmnopqrstuvwxyz";
        for n in 0..=alphabet.len() {
            let word = &alphabet[..n];
            let idx = orp_index(word);
            assert!(idx < word.len().max(1), "index {idx} out of range for {word:?}");
        }
    }

    #[test]
    fn test_render_empty_word() {
        assert_eq!(render_word_with_orp(""), OrpParts::default());
    }

    #[test]
    fn test_render_single_char_is_all_pivot() {
        let parts = render_word_with_orp("I");
        assert_eq!(parts.before, "");
        assert_eq!(parts.pivot, "I");
        assert_eq!(parts.after, "");
    }

    #[test]
    fn test_render_splits_at_pivot() {
        let parts = render_word_with_orp("hello");
        assert_eq!(parts.before, "h");
        assert_eq!(parts.pivot, "e");
        assert_eq!(parts.after, "llo");
    }

    #[test]
    fn test_render_reconstructs_word() {
        for word in [
            "testing",
            "don't",
            "—dash—",
            "café",
            "naïveté",
            "日本語のテキスト",
            "e\u{301}t\u{301}e\u{301}",
            "(parenthesised)",
            "🎉party",
        ] {
            let parts = render_word_with_orp(word);
            assert_eq!(parts.word(), word);
            assert_eq!(parts.pivot.chars().count(), 1, "pivot of {word:?}");
        }
    }
}
