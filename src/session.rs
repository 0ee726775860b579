use crate::orp::split_words;
use crate::util::clamp_index;

/// One reading pass: the words in document order and the cursor into them.
///
/// A session is never empty, so `index` always points at a word.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    words: Vec<String>,
    index: usize,
}

#[allow(clippy::len_without_is_empty)]
impl Session {
    /// Build a session from already-split words. Returns `None` if there are none.
    pub fn new(words: Vec<String>) -> Option<Self> {
        if words.is_empty() {
            None
        } else {
            Some(Self { words, index: 0 })
        }
    }

    pub fn from_text(text: &str) -> Option<Self> {
        Self::new(split_words(text))
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn last_index(&self) -> usize {
        self.words.len() - 1
    }

    pub fn current_word(&self) -> &str {
        &self.words[self.index]
    }

    pub fn is_at_end(&self) -> bool {
        self.index == self.last_index()
    }

    pub fn seek(&mut self, index: i64) {
        self.index = clamp_index(index, self.words.len());
    }

    pub fn skip(&mut self, delta: i64) {
        self.seek((self.index as i64).saturating_add(delta));
    }

    pub fn rewind(&mut self) {
        self.index = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(text: &str) -> Session {
        Session::from_text(text).unwrap()
    }

    #[test]
    fn test_empty_text_has_no_session() {
        assert!(Session::from_text("").is_none());
        assert!(Session::from_text(" \n\t ").is_none());
        assert!(Session::new(vec![]).is_none());
    }

    #[test]
    fn test_new_session_starts_at_first_word() {
        let session = words("the quick brown fox");
        assert_eq!(session.len(), 4);
        assert_eq!(session.index(), 0);
        assert_eq!(session.current_word(), "the");
    }

    #[test]
    fn test_seek_clamps() {
        let mut session = words("a b c");
        session.seek(10);
        assert_eq!(session.index(), 2);
        assert!(session.is_at_end());
        session.seek(-1);
        assert_eq!(session.index(), 0);
    }

    #[test]
    fn test_skip_is_relative_and_clamped() {
        let mut session = words("one two three four five");
        session.skip(3);
        assert_eq!(session.current_word(), "four");
        session.skip(-10);
        assert_eq!(session.index(), 0);
        session.skip(i64::MAX);
        assert_eq!(session.index(), 4);
    }
}
