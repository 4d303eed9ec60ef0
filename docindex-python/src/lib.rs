//! Python bindings for DocIndex Rust components

use docindex_core::distance::{self as core_distance, Axis, DistanceMetric};
use docindex_core::stem::stem_uncached;
use docindex_core::{BuildOptions, IndexError, Matrix, QueryEngine, SearchResult as CoreSearchResult};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use std::collections::HashMap;

fn to_py_err(err: IndexError) -> PyErr {
    PyValueError::new_err(err.to_string())
}

fn parse_metric(name: &str) -> PyResult<DistanceMetric> {
    name.parse().map_err(to_py_err)
}

/// Python-exposed search result
#[pyclass]
#[derive(Clone)]
pub struct SearchResult {
    #[pyo3(get)]
    pub doc: usize,
    #[pyo3(get)]
    pub distance: f64,
    #[pyo3(get)]
    pub rank: usize,
}

impl From<CoreSearchResult> for SearchResult {
    fn from(result: CoreSearchResult) -> Self {
        Self {
            doc: result.doc,
            distance: result.distance,
            rank: result.rank,
        }
    }
}

#[pymethods]
impl SearchResult {
    fn __repr__(&self) -> String {
        format!(
            "SearchResult(doc={}, distance={:.4}, rank={})",
            self.doc, self.distance, self.rank
        )
    }

    fn to_dict(&self) -> HashMap<String, PyObject> {
        Python::with_gil(|py| {
            let mut map = HashMap::new();
            map.insert("doc".to_string(), self.doc.to_object(py));
            map.insert("distance".to_string(), self.distance.to_object(py));
            map.insert("rank".to_string(), self.rank.to_object(py));
            map
        })
    }
}

/// Python-exposed document index
#[pyclass]
pub struct DocumentIndex {
    engine: QueryEngine,
}

#[pymethods]
impl DocumentIndex {
    /// Index a list of documents
    ///
    /// Args:
    ///     documents: List of document strings
    ///     n: Keep only the n most frequent terms (default: 0, keep all)
    ///     words: Optional seed vocabulary
    ///     stop_words: Optional terms to drop from the vocabulary
    #[new]
    #[pyo3(signature = (documents, n=0, words=None, stop_words=None))]
    fn new(
        documents: Vec<String>,
        n: usize,
        words: Option<Vec<String>>,
        stop_words: Option<Vec<String>>,
    ) -> PyResult<Self> {
        let options = BuildOptions {
            seed_vocabulary: words,
            stop_words,
            top_n: n,
        };
        let engine = QueryEngine::build(&documents, options).map_err(to_py_err)?;
        Ok(Self { engine })
    }

    /// Build from a JSON options string, e.g. '{"top_n": 50}'
    #[staticmethod]
    fn from_config(documents: Vec<String>, config: &str) -> PyResult<Self> {
        let options = BuildOptions::from_json(config).map_err(to_py_err)?;
        let engine = QueryEngine::build(&documents, options).map_err(to_py_err)?;
        Ok(Self { engine })
    }

    /// Rank all documents against a query
    ///
    /// Returns:
    ///     List of document indices, nearest first
    #[pyo3(signature = (text, metric="cosine"))]
    fn query(&self, text: &str, metric: &str) -> PyResult<Vec<usize>> {
        let metric = parse_metric(metric)?;
        self.engine.query(text, Some(&metric)).map_err(to_py_err)
    }

    /// The k nearest documents
    ///
    /// Returns:
    ///     List of SearchResult objects
    #[pyo3(signature = (text, k=10, metric="cosine"))]
    fn search(&self, text: &str, k: usize, metric: &str) -> PyResult<Vec<SearchResult>> {
        let metric = parse_metric(metric)?;
        Ok(self
            .engine
            .search(text, k, Some(&metric))
            .map_err(to_py_err)?
            .into_iter()
            .map(SearchResult::from)
            .collect())
    }

    #[getter]
    fn vocabulary(&self) -> Vec<String> {
        self.engine.vocabulary().terms().to_vec()
    }

    #[getter]
    fn idf(&self) -> Vec<f64> {
        self.engine.idf().as_slice().to_vec()
    }

    /// Document x term count matrix as nested lists
    fn counts(&self) -> Vec<Vec<u32>> {
        self.engine.counts().to_rows()
    }

    /// IDF-weighted matrix as nested lists
    fn term_importance(&self) -> Vec<Vec<f64>> {
        self.engine.index().to_rows()
    }

    /// Vocabulary, idf and both matrices as a JSON string
    fn to_json(&self) -> PyResult<String> {
        let value = serde_json::json!({
            "vocabulary": self.engine.vocabulary(),
            "idf": self.engine.idf(),
            "counts": self.engine.counts(),
            "term_importance": self.engine.index(),
        });
        serde_json::to_string(&value).map_err(|e| PyValueError::new_err(e.to_string()))
    }

    /// Get index statistics
    ///
    /// Returns:
    ///     Dictionary with num_docs, num_terms, cached_stems
    fn stats(&self) -> HashMap<String, PyObject> {
        Python::with_gil(|py| {
            let mut map = HashMap::new();
            map.insert("num_docs".to_string(), self.engine.num_docs().to_object(py));
            map.insert(
                "num_terms".to_string(),
                self.engine.vocabulary().len().to_object(py),
            );
            map.insert(
                "cached_stems".to_string(),
                self.engine.tokenizer().stemmer().cache_len().to_object(py),
            );
            map
        })
    }

    fn __repr__(&self) -> String {
        format!(
            "DocumentIndex(num_docs={}, num_terms={})",
            self.engine.num_docs(),
            self.engine.vocabulary().len()
        )
    }
}

/// Stem a single word
#[pyfunction]
fn stem(word: &str) -> String {
    stem_uncached(word)
}

/// Indices of candidates sorted by distance to a vector
#[pyfunction]
#[pyo3(signature = (vector, candidates, metric="cosine"))]
fn order_by_distance(
    vector: Vec<f64>,
    candidates: Vec<Vec<f64>>,
    metric: &str,
) -> PyResult<Vec<usize>> {
    let metric = parse_metric(metric)?;
    core_distance::order_by_distance(&vector, &candidates, Some(&metric)).map_err(to_py_err)
}

/// Square matrix of pairwise distances between rows (axis=0) or columns (axis=1)
#[pyfunction]
#[pyo3(signature = (matrix, metric="euclidean", axis=0))]
fn pairwise_distance(
    matrix: Vec<Vec<f64>>,
    metric: &str,
    axis: usize,
) -> PyResult<Vec<Vec<f64>>> {
    let metric = parse_metric(metric)?;
    let axis = Axis::try_from(axis).map_err(to_py_err)?;
    let matrix = Matrix::from_rows(&matrix).map_err(to_py_err)?;
    Ok(core_distance::pairwise_distance(&matrix, &metric, axis).to_rows())
}

/// Python module
#[pymodule]
fn docindex_rust(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<DocumentIndex>()?;
    m.add_class::<SearchResult>()?;
    m.add_function(wrap_pyfunction!(stem, m)?)?;
    m.add_function(wrap_pyfunction!(order_by_distance, m)?)?;
    m.add_function(wrap_pyfunction!(pairwise_distance, m)?)?;
    Ok(())
}
