//! Punctuation-aware tokenizer and word counter
//!
//! Splits on whitespace and on a fixed set of bracket/operator characters,
//! stems every piece and drops stop words.

use ahash::AHashSet;

use crate::stem::{stem_uncached, Stemmer};
use crate::vocabulary::Vocabulary;

/// Characters that split tokens in addition to whitespace
pub const SEPARATORS: [char; 8] = ['+', '-', '(', ')', '[', ']', '{', '}'];

/// Default stop words; stemmed before use so they match stemmed tokens
pub const STOP_WORDS: &[&str] = &[
    "a", "about", "after", "all", "also", "an", "and", "any", "are", "as", "at", "be", "been",
    "before", "being", "but", "by", "can", "could", "did", "do", "does", "for", "from", "had",
    "has", "have", "he", "her", "him", "his", "how", "i", "if", "in", "into", "is", "it", "its",
    "may", "me", "might", "my", "no", "not", "of", "on", "or", "our", "she", "should", "so",
    "than", "that", "the", "their", "them", "then", "there", "these", "they", "this", "those",
    "to", "us", "was", "we", "were", "what", "when", "where", "which", "while", "who", "will",
    "with", "would", "you", "your",
];

/// Tokenizer owning the stem cache for one indexing session
#[derive(Debug)]
pub struct Tokenizer {
    stemmer: Stemmer,
    stop_words: AHashSet<String>,
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::with_stop_words(STOP_WORDS.iter().copied())
    }
}

impl Tokenizer {
    /// Tokenizer with the default stop words
    pub fn new() -> Self {
        Self::default()
    }

    /// Tokenizer with a custom stop-word list (pass an empty iterator for none)
    pub fn with_stop_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            stemmer: Stemmer::new(),
            stop_words: words.into_iter().map(|w| stem_uncached(w.as_ref())).collect(),
        }
    }

    /// The session's stemmer
    pub fn stemmer(&self) -> &Stemmer {
        &self.stemmer
    }

    /// Stem one word through the session cache
    pub fn stem(&self, word: &str) -> String {
        self.stemmer.stem(word)
    }

    pub fn is_stop_word(&self, stem: &str) -> bool {
        self.stop_words.contains(stem)
    }

    /// Raw pieces of `text`, separators removed
    pub fn split<'a>(&self, text: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        text.split(|c: char| c.is_whitespace() || SEPARATORS.contains(&c))
            .filter(|piece| !piece.is_empty())
    }

    /// Stemmed tokens of `text` in order, stop words and empty stems removed
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        self.split(text)
            .map(|piece| self.stem(piece))
            .filter(|stem| !stem.is_empty() && !self.is_stop_word(stem))
            .collect()
    }

    /// Distinct stems of `text`, splitting on whitespace only
    pub fn find_words(&self, text: &str) -> Vec<String> {
        let mut words: Vec<String> = text
            .split_whitespace()
            .map(|piece| self.stem(piece))
            .filter(|stem| !stem.is_empty() && !self.is_stop_word(stem))
            .collect();
        words.sort_unstable();
        words.dedup();
        words
    }

    /// Count the tokens of `text`, appending unseen stems to `vocabulary`
    ///
    /// The returned counts are aligned with the extended vocabulary.
    pub fn count_all_words(&self, text: &str, vocabulary: &mut Vocabulary) -> Vec<u32> {
        vocabulary.count_extending(self.tokenize(text))
    }

    /// Count the tokens of `text` against a fixed vocabulary
    ///
    /// Stems missing from `vocabulary` are dropped; the result always has
    /// `vocabulary.len()` entries.
    pub fn count_words(&self, text: &str, vocabulary: &Vocabulary) -> Vec<u32> {
        vocabulary.count_fixed(self.tokenize(text))
    }
}
