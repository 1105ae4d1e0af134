//! Snowball stemmer backed by `rust-stemmers`.

use rust_stemmers::Algorithm;

use crate::analysis::stem::Stemmer;

/// Stemmer applying a Snowball algorithm for one language.
pub struct SnowballStemmer {
    language: &'static str,
    stemmer: rust_stemmers::Stemmer,
}

impl std::fmt::Debug for SnowballStemmer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SnowballStemmer")
            .field("language", &self.language)
            .finish()
    }
}

impl SnowballStemmer {
    /// Create the English (Porter 2) stemmer.
    pub fn english() -> Self {
        SnowballStemmer {
            language: "english",
            stemmer: rust_stemmers::Stemmer::create(Algorithm::English),
        }
    }
}

impl Stemmer for SnowballStemmer {
    fn stem(&self, word: &str) -> String {
        self.stemmer.stem(&word.to_lowercase()).into_owned()
    }

    fn name(&self) -> &'static str {
        "snowball"
    }
}
