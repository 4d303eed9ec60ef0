//! Vocabulary and document-term count matrix construction

use ahash::{AHashMap, AHashSet};
use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::matrix::CountMatrix;
use crate::tokenizer::Tokenizer;

/// Ordered set of unique stems; a term's position is its column index
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct Vocabulary {
    terms: Vec<String>,
    positions: AHashMap<String, usize>,
}

impl Vocabulary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Vocabulary from already-normalized terms; repeats keep their first position
    pub fn from_terms<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut vocabulary = Self::new();
        for term in terms {
            vocabulary.insert(term.into());
        }
        vocabulary
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.terms.get(index).map(String::as_str)
    }

    /// Column index of `term`
    pub fn position(&self, term: &str) -> Option<usize> {
        self.positions.get(term).copied()
    }

    pub fn contains(&self, term: &str) -> bool {
        self.positions.contains_key(term)
    }

    /// Append `term` if absent; returns its column index either way
    pub fn insert(&mut self, term: String) -> usize {
        if let Some(&index) = self.positions.get(&term) {
            return index;
        }
        let index = self.terms.len();
        self.positions.insert(term.clone(), index);
        self.terms.push(term);
        index
    }

    /// Count `tokens`, growing the vocabulary with unseen ones
    pub fn count_extending<I>(&mut self, tokens: I) -> Vec<u32>
    where
        I: IntoIterator<Item = String>,
    {
        let mut counts = vec![0u32; self.len()];
        for token in tokens {
            let index = self.insert(token);
            if index == counts.len() {
                counts.push(0);
            }
            counts[index] += 1;
        }
        counts
    }

    /// Count `tokens` that are already known; others are ignored
    pub fn count_fixed<I, S>(&self, tokens: I) -> Vec<u32>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut counts = vec![0u32; self.len()];
        for token in tokens {
            if let Some(index) = self.position(token.as_ref()) {
                counts[index] += 1;
            }
        }
        counts
    }

    /// A new vocabulary of the given columns, in the given order
    pub fn select(&self, columns: &[usize]) -> Self {
        Self::from_terms(columns.iter().map(|&j| self.terms[j].clone()))
    }
}

impl PartialEq for Vocabulary {
    fn eq(&self, other: &Self) -> bool {
        self.terms == other.terms
    }
}

impl Eq for Vocabulary {}

impl From<Vec<String>> for Vocabulary {
    fn from(terms: Vec<String>) -> Self {
        Self::from_terms(terms)
    }
}

impl From<Vocabulary> for Vec<String> {
    fn from(vocabulary: Vocabulary) -> Self {
        vocabulary.terms
    }
}

/// Optional parameters of a matrix build
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildOptions {
    /// Words to seed the vocabulary with, stemmed before use
    pub seed_vocabulary: Option<Vec<String>>,
    /// Terms removed from the finished vocabulary, stemmed before use
    pub stop_words: Option<Vec<String>>,
    /// Keep only the `top_n` most frequent terms; 0 keeps all
    pub top_n: usize,
}

impl BuildOptions {
    /// Parse options from JSON, e.g. `{"top_n": 100, "stop_words": ["foo"]}`
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Folds an ordered document sequence into a vocabulary and count matrix
#[derive(Debug, Clone, Default)]
pub struct VocabularyMatrixBuilder {
    options: BuildOptions,
}

impl VocabularyMatrixBuilder {
    pub fn new(options: BuildOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &BuildOptions {
        &self.options
    }

    /// Build the vocabulary and count matrix for `documents`
    ///
    /// Columns appear in discovery order unless `top_n` is set, in which case
    /// the survivors are ordered by descending total count.
    pub fn build<S: AsRef<str>>(
        &self,
        tokenizer: &Tokenizer,
        documents: &[S],
    ) -> Result<(Vocabulary, CountMatrix)> {
        let mut vocabulary = match &self.options.seed_vocabulary {
            Some(seed) => Vocabulary::from_terms(seed.iter().map(|w| tokenizer.stem(w))),
            None => Vocabulary::new(),
        };
        let mut counts = CountMatrix::zeros(0, vocabulary.len());

        // Tokenizing is independent per document; only the fold below is ordered
        let token_lists: Vec<Vec<String>> = documents
            .iter()
            .map(|doc| tokenizer.tokenize(doc.as_ref()))
            .collect();

        for (i, tokens) in token_lists.into_iter().enumerate() {
            let before = vocabulary.len();
            let row = vocabulary.count_extending(tokens);
            let added = vocabulary.len() - before;
            if added > 0 {
                trace!("document {i} added {added} terms");
            }
            counts.push_zero_columns(added);
            counts.push_row(&row)?;
        }
        debug!(
            "counted {} documents over {} terms",
            counts.rows(),
            vocabulary.len()
        );

        if let Some(stop_words) = &self.options.stop_words {
            let stop: AHashSet<String> = stop_words.iter().map(|w| tokenizer.stem(w)).collect();
            let keep: Vec<usize> = (0..vocabulary.len())
                .filter(|&j| !stop.contains(&vocabulary.terms[j]))
                .collect();
            if keep.len() < vocabulary.len() {
                debug!("dropped {} stop-word columns", vocabulary.len() - keep.len());
                vocabulary = vocabulary.select(&keep);
                counts = counts.select_columns(&keep);
            }
        }

        if self.options.top_n > 0 {
            let totals = counts.column_sums();
            let mut order: Vec<usize> = (0..totals.len()).collect();
            // stable: equal totals keep discovery order
            order.sort_by(|&a, &b| totals[b].cmp(&totals[a]));
            order.truncate(self.options.top_n);
            debug!("kept top {} of {} terms", order.len(), totals.len());
            vocabulary = vocabulary.select(&order);
            counts = counts.select_columns(&order);
        }

        Ok((vocabulary, counts))
    }
}
