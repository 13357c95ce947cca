//! Shared pieces of the term-frequency indexer and searcher: the normalization
//! pipeline, the record schema, the gzip line store and ranking.

pub mod error;
pub mod persist;
pub mod record;
pub mod search;
pub mod tokenizer;

pub use error::StoreError;
pub use record::{term_frequencies_from_stems, Attributes, Record, LEGACY_VERSION};
pub use search::{format_score, rank, search, SearchHit, SearchResults};
pub use tokenizer::{normalize, NORMALIZATION_VERSION};
