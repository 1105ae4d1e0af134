//! # Freqscope
//!
//! Word and n-gram frequency analysis over user-curated datasets drawn from
//! a full-text index.
//!
//! ## Features
//!
//! - Decoding of the index's term-vector wire format
//! - Fast path over precomputed term frequencies
//! - Token-order reconstruction, n-grams and block segmentation
//! - Inclusion, exclusion and stop lists with n-gram aware matching
//! - Stemming and lemmatisation
//! - Dataset and corpus document frequencies, tf-idf
//!
//! ## Example
//!
//! ```
//! use freqscope::backend::StaticBackend;
//! use freqscope::config::AnalysisConfig;
//! use freqscope::document::Dataset;
//! use freqscope::frequency::FrequencyAnalyzer;
//! use serde_json::json;
//!
//! let backend = StaticBackend::new(
//!     json!({"termVectors": [
//!         "d1", ["uniqueKey", "d1", "fulltext", [
//!             "malaria", ["tf", 2, "positions", ["position", 0, "position", 2], "df", 128],
//!             "fever", ["tf", 1, "positions", ["position", 1], "df", 300]
//!         ]]
//!     ]}),
//!     5000,
//! );
//! let dataset = Dataset::from_ids(["d1"]);
//! let config = AnalysisConfig::builder().build().unwrap();
//!
//! let result = FrequencyAnalyzer::new(&backend)
//!     .analyze(&dataset, &config, None)
//!     .unwrap();
//!
//! assert_eq!(result.word_list, vec!["malaria", "fever"]);
//! assert_eq!(result.df_in_corpus["malaria"], 128);
//! ```

pub mod analysis;
pub mod backend;
pub mod cli;
pub mod config;
pub mod document;
pub mod error;
pub mod frequency;
pub mod term_vector;
pub mod tfidf;

pub mod prelude {
    pub use crate::backend::{DatasetProvider, SearchBackend};
    pub use crate::config::{AnalysisConfig, AnalysisParams, LastBlock, Stemming};
    pub use crate::document::{Dataset, DocumentRef};
    pub use crate::error::{FreqscopeError, Result};
    pub use crate::frequency::{AnalysisResult, AnalysisStrategy, FrequencyAnalyzer};
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
