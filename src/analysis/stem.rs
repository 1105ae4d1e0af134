//! Stemming and lemmatisation of reconstructed tokens.

use crate::config::Stemming;

// Stemmer implementations
pub mod identity;
pub mod lemma;
pub mod snowball;

// Re-export stemmers
pub use identity::IdentityStemmer;
pub use lemma::DictionaryLemmatizer;
pub use snowball::SnowballStemmer;

/// Trait for algorithms that normalise a word to its base form.
pub trait Stemmer: Send + Sync {
    /// Reduce a word to its base form.
    fn stem(&self, word: &str) -> String;

    /// Get the name of this stemmer.
    fn name(&self) -> &'static str;
}

/// The normaliser used for a stemming mode.
pub fn for_mode(mode: Stemming) -> Box<dyn Stemmer> {
    match mode {
        Stemming::None => Box::new(IdentityStemmer::new()),
        Stemming::Stem => Box::new(SnowballStemmer::english()),
        Stemming::Lemma => Box::new(DictionaryLemmatizer::english()),
    }
}
