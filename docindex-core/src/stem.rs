//! Rule-based suffix stripper
//!
//! A small heuristic stemmer, not Porter's algorithm. Each rule fires at most
//! once, in a fixed order, and every result is remembered in a [`StemCache`]
//! so repeated words are only stemmed once per session.

use ahash::AHashMap;
use std::sync::Mutex;

/// Trailing symbols stripped before the suffix rules run, in this order
const TERMINATORS: [char; 10] = [',', ';', '.', ':', '?', '!', '-', '&', '(', ')'];

/// A trailing `s` survives when preceded by one of these
const KEEP_BEFORE_S: [char; 6] = ['a', 'e', 'i', 'o', 'u', 's'];

/// Raw word -> stem, grown monotonically for the lifetime of a session
#[derive(Debug, Default)]
pub struct StemCache {
    entries: Mutex<AHashMap<String, String>>,
}

impl StemCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up the stem previously computed for `word`
    pub fn get(&self, word: &str) -> Option<String> {
        self.lock().get(word).cloned()
    }

    fn insert(&self, word: &str, stem: &str) {
        self.lock().insert(word.to_string(), stem.to_string());
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, AHashMap<String, String>> {
        // A panic while holding the lock cannot leave a half-written entry
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Cached stemmer, one per indexing session
#[derive(Debug, Default)]
pub struct Stemmer {
    cache: StemCache,
}

impl Stemmer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stem a single word, consulting and filling the cache
    pub fn stem(&self, word: &str) -> String {
        if let Some(stem) = self.cache.get(word) {
            return stem;
        }
        let stem = stem_uncached(word);
        self.cache.insert(word, &stem);
        stem
    }

    /// The cached stem for `word`, if it has been stemmed this session
    pub fn cached(&self, word: &str) -> Option<String> {
        self.cache.get(word)
    }

    /// Number of distinct raw words stemmed so far
    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }
}

/// Apply the suffix rules without touching any cache
pub fn stem_uncached(word: &str) -> String {
    let mut word = word.trim().to_lowercase();

    for terminator in TERMINATORS {
        if word.ends_with(terminator) {
            word.pop();
        }
    }

    if word.ends_with('s') && word.chars().count() > 1 {
        let before = word.chars().rev().nth(1);
        if !before.is_some_and(|c| KEEP_BEFORE_S.contains(&c)) {
            word.pop();
        }
    }

    if word.ends_with("es") {
        word.pop();
    }

    if let Some(prefix) = word.strip_suffix("ing") {
        if prefix != "th" && prefix.chars().count() > 1 {
            let keep = prefix.len();
            word.truncate(keep);
        }
    }

    if word.ends_with("ed") && word.chars().count() > 3 {
        word.truncate(word.len() - 2);
    }

    // Always true: the two negated tests can never both fail, so `eies`/`aies`
    // endings are rewritten too.
    if word.ends_with("ies") && (!word.ends_with("eies") || !word.ends_with("aies")) {
        word.truncate(word.len() - 3);
        word.push('y');
    }

    word
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_stems() {
        let stemmer = Stemmer::new();
        assert_eq!(stemmer.stem("running"), "runn");
        assert_eq!(stemmer.stem("boxes"), "boxe");
        assert_eq!(stemmer.stem("Cats."), "cat");
    }

    #[test]
    fn test_terminators_and_whitespace() {
        assert_eq!(stem_uncached("  Hello,  "), "hello");
        // stacked terminators peel off while walking the list
        assert_eq!(stem_uncached("what!?"), "what");
        assert_eq!(stem_uncached("what?!"), "what?");
        assert_eq!(stem_uncached("."), "");
    }

    #[test]
    fn test_plural_s() {
        assert_eq!(stem_uncached("dogs"), "dog");
        // vowel or double s before the final s keeps it
        assert_eq!(stem_uncached("bus"), "bus");
        assert_eq!(stem_uncached("glass"), "glass");
        assert_eq!(stem_uncached("s"), "s");
    }

    #[test]
    fn test_ing_guard() {
        assert_eq!(stem_uncached("thing"), "thing");
        assert_eq!(stem_uncached("king"), "king");
        assert_eq!(stem_uncached("walking"), "walk");
    }

    #[test]
    fn test_ed_needs_length() {
        assert_eq!(stem_uncached("red"), "red");
        assert_eq!(stem_uncached("jumped"), "jump");
    }

    #[test]
    fn test_ies_becomes_y() {
        // "flies" keeps its s (vowel before it), loses it via the es rule,
        // so the ies rule never sees it
        assert_eq!(stem_uncached("flies"), "flie");
        assert_eq!(stem_uncached("fliesing"), "fly");
        assert_eq!(stem_uncached("aiesing"), "ay");
    }

    #[test]
    fn test_cache_records_raw_word() {
        let stemmer = Stemmer::new();
        assert!(stemmer.cached("Dogs").is_none());
        assert_eq!(stemmer.stem("Dogs"), "dog");
        assert_eq!(stemmer.cached("Dogs").as_deref(), Some("dog"));
        assert!(stemmer.cached("dogs").is_none());

        stemmer.stem("Dogs");
        assert_eq!(stemmer.cache_len(), 1);
    }

    #[test]
    fn test_restem_may_shorten_further() {
        let once = stem_uncached("messes");
        assert_eq!(once, "messe");
        assert_eq!(stem_uncached(&once), "messe");

        let once = stem_uncached("catsing");
        assert_eq!(once, "cats");
        assert_eq!(stem_uncached(&once), "cat");
    }
}
