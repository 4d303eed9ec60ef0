//! DocIndex Core - small document indexing engine
//!
//! Stems and counts documents into a document-term matrix, weights it by
//! inverse document frequency and ranks documents against free-text queries.

pub mod distance;
pub mod error;
pub mod group;
pub mod importance;
pub mod matrix;
pub mod query;
pub mod stem;
pub mod tokenizer;
pub mod vocabulary;

pub use distance::{order_by_distance, pairwise_distance, Axis, DistanceMetric, Metric};
pub use error::{IndexError, Result};
pub use importance::{term_importance, IdfVector};
pub use matrix::{CountMatrix, Matrix, TermImportanceMatrix};
pub use query::{query_to_index, QueryEngine, SearchResult};
pub use stem::{StemCache, Stemmer};
pub use tokenizer::Tokenizer;
pub use vocabulary::{BuildOptions, Vocabulary, VocabularyMatrixBuilder};
