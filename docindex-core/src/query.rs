//! Nearest-document queries over a term-importance index

use log::debug;

use crate::distance::{distances_to, rank, Metric};
use crate::error::Result;
use crate::importance::{term_importance, IdfVector};
use crate::matrix::{CountMatrix, TermImportanceMatrix};
use crate::tokenizer::Tokenizer;
use crate::vocabulary::{BuildOptions, Vocabulary, VocabularyMatrixBuilder};

/// A ranked document
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    /// Row of the document in the indexed collection
    pub doc: usize,
    pub distance: f64,
    pub rank: usize,
}

/// Rank the rows of `index` by distance to `text`
///
/// `text` is counted against the fixed `vocabulary` (unknown stems are
/// ignored) and weighted by `idf` before ranking. Nearest document first.
pub fn query_to_index(
    tokenizer: &Tokenizer,
    text: &str,
    idf: &IdfVector,
    vocabulary: &Vocabulary,
    index: &TermImportanceMatrix,
    metric: Option<&dyn Metric>,
) -> Result<Vec<usize>> {
    let distances = query_distances(tokenizer, text, idf, vocabulary, index, metric)?;
    Ok(rank(&distances))
}

fn query_distances(
    tokenizer: &Tokenizer,
    text: &str,
    idf: &IdfVector,
    vocabulary: &Vocabulary,
    index: &TermImportanceMatrix,
    metric: Option<&dyn Metric>,
) -> Result<Vec<f64>> {
    let counts = tokenizer.count_words(text, vocabulary);
    if counts.iter().all(|&c| c == 0) {
        debug!("query has no in-vocabulary terms");
    }
    let weighted = idf.weigh(&counts)?;
    let docs: Vec<&[f64]> = index.iter_rows().collect();
    distances_to(&weighted, &docs, metric)
}

/// An indexed document collection together with the session that built it
#[derive(Debug)]
pub struct QueryEngine {
    tokenizer: Tokenizer,
    vocabulary: Vocabulary,
    counts: CountMatrix,
    idf: IdfVector,
    index: TermImportanceMatrix,
}

impl QueryEngine {
    /// Index `documents` with the default tokenizer
    pub fn build<S: AsRef<str>>(documents: &[S], options: BuildOptions) -> Result<Self> {
        Self::with_tokenizer(Tokenizer::default(), documents, options)
    }

    /// Index `documents` using `tokenizer` (and its stem cache) for the session
    pub fn with_tokenizer<S: AsRef<str>>(
        tokenizer: Tokenizer,
        documents: &[S],
        options: BuildOptions,
    ) -> Result<Self> {
        let (vocabulary, counts) =
            VocabularyMatrixBuilder::new(options).build(&tokenizer, documents)?;
        let (idf, index) = term_importance(&counts);
        debug!(
            "indexed {} documents, {} terms",
            index.rows(),
            vocabulary.len()
        );
        Ok(Self {
            tokenizer,
            vocabulary,
            counts,
            idf,
            index,
        })
    }

    /// Document indices ordered nearest first
    pub fn query(&self, text: &str, metric: Option<&dyn Metric>) -> Result<Vec<usize>> {
        query_to_index(
            &self.tokenizer,
            text,
            &self.idf,
            &self.vocabulary,
            &self.index,
            metric,
        )
    }

    /// The `k` nearest documents with their distances
    pub fn search(
        &self,
        text: &str,
        k: usize,
        metric: Option<&dyn Metric>,
    ) -> Result<Vec<SearchResult>> {
        let distances = query_distances(
            &self.tokenizer,
            text,
            &self.idf,
            &self.vocabulary,
            &self.index,
            metric,
        )?;
        Ok(rank(&distances)
            .into_iter()
            .take(k)
            .enumerate()
            .map(|(rank, doc)| SearchResult {
                doc,
                distance: distances[doc],
                rank,
            })
            .collect())
    }

    pub fn tokenizer(&self) -> &Tokenizer {
        &self.tokenizer
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    pub fn counts(&self) -> &CountMatrix {
        &self.counts
    }

    pub fn idf(&self) -> &IdfVector {
        &self.idf
    }

    pub fn index(&self) -> &TermImportanceMatrix {
        &self.index
    }

    pub fn num_docs(&self) -> usize {
        self.index.rows()
    }
}
