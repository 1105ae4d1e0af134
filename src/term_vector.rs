//! Per-document term statistics returned by the search backend.
//!
//! The backend answers a term-vector request with a nested payload in which
//! every level is a flat alternating key/value list. [`TermVectorDecoder`]
//! turns that payload into one [`TermVector`] per document: an ordered map
//! from term to [`TermStats`].
//!
//! # Examples
//!
//! ```
//! use freqscope::term_vector::TermVectorDecoder;
//! use serde_json::json;
//!
//! let payload = json!({
//!     "termVectors": [
//!         "uniqueKeyFieldName", "uid",
//!         "doc-1", ["uniqueKey", "doc-1", "fulltext", [
//!             "malaria", ["tf", 2, "positions", ["position", 0, "position", 7], "df", 128],
//!             "ghost", ["tf", 1, "df", 0]
//!         ]]
//!     ]
//! });
//!
//! let decoder = TermVectorDecoder::new();
//! let tv = decoder.decode(&payload, "doc-1");
//! assert_eq!(tv["malaria"].tf, 2);
//! assert_eq!(tv["malaria"].positions, vec![0, 7]);
//! assert!(!tv.contains_key("ghost"));
//!
//! assert!(decoder.decode(&payload, "doc-2").is_empty());
//! ```

pub mod decoder;

use std::collections::BTreeMap;
use std::ops::Range;

use serde::{Deserialize, Serialize};

pub use decoder::TermVectorDecoder;

/// Statistics for one term within one document.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TermStats {
    /// Occurrences of the term in the document.
    pub tf: u64,

    /// Number of documents in the whole corpus containing the term.
    pub df: u64,

    /// Token positions (0-based) of every occurrence.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub positions: Vec<usize>,

    /// Half-open character offsets of every occurrence.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub offsets: Vec<Range<usize>>,

    /// Significance weight as computed by the backend.
    #[serde(default)]
    pub tf_idf: f64,
}

impl TermStats {
    /// Create statistics carrying only term and document frequency.
    pub fn new(tf: u64, df: u64) -> Self {
        TermStats {
            tf,
            df,
            ..Default::default()
        }
    }

    /// Whether positional data was returned for this term.
    pub fn has_positions(&self) -> bool {
        !self.positions.is_empty()
    }
}

/// Mapping from term to its statistics within one document.
///
/// Ordered so that every walk over a term vector is reproducible.
pub type TermVector = BTreeMap<String, TermStats>;

/// Total number of tokens described by a term vector.
pub fn token_count(tv: &TermVector) -> u64 {
    tv.values().map(|stats| stats.tf).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_count() {
        let mut tv = TermVector::new();
        tv.insert("disease".to_string(), TermStats::new(3, 1104));
        tv.insert("malaria".to_string(), TermStats::new(2, 128));

        assert_eq!(token_count(&tv), 5);
        assert_eq!(token_count(&TermVector::new()), 0);
    }

    #[test]
    fn test_has_positions() {
        let mut stats = TermStats::new(2, 10);
        stats.positions = vec![4, 1];
        assert!(stats.has_positions());
        assert!(!TermStats::new(1, 1).has_positions());
    }
}
