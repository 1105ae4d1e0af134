//! Vocabulary ranking and filtering.
//!
//! Candidates are ranked by descending dataset term frequency, ties broken by
//! ascending lexicographic order so that results never depend on map
//! iteration order. [`WordListCuller`] then applies at most one list filter
//! and truncates to `num_words`.
//!
//! Filter precedence: an exclusion list wins over everything, a stop list
//! wins over an inclusion list. For n-grams a unit matches a list when any
//! of its constituent words is on the list. Matching ignores case.

use std::collections::BTreeSet;

use crate::analysis::stem::Stemmer;
use crate::config::AnalysisConfig;
use crate::frequency::result::Counts;

/// Units of `tf` ordered by descending count, then ascending unit.
pub fn rank_by_frequency(tf: &Counts) -> Vec<String> {
    let mut ranked: Vec<(&String, u64)> = tf.iter().map(|(unit, &count)| (unit, count)).collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    ranked.into_iter().map(|(unit, _)| unit.clone()).collect()
}

#[derive(Clone, Debug, PartialEq)]
enum ListFilter {
    Keep,
    Exclude(BTreeSet<String>),
    Include(BTreeSet<String>),
}

/// Applies the configured word lists and word-count limit.
#[derive(Clone, Debug)]
pub struct WordListCuller {
    filter: ListFilter,
    num_words: usize,
    ngram_size: usize,
    separator: String,
}

impl WordListCuller {
    /// Create a culler from the lists in `config`.
    pub fn new(config: &AnalysisConfig) -> Self {
        let filter = if let Some(words) = config.exclusion_list() {
            ListFilter::Exclude(words.clone())
        } else if let Some(words) = config.stop_list() {
            ListFilter::Exclude(words.clone())
        } else if let Some(words) = config.inclusion_list() {
            ListFilter::Include(words.clone())
        } else {
            ListFilter::Keep
        };

        WordListCuller {
            filter,
            num_words: config.num_words(),
            ngram_size: config.ngram_size(),
            separator: config.ngram_separator().to_string(),
        }
    }

    /// Create a culler whose list words are normalised by `stemmer`, so they
    /// match stemmed or lemmatised units.
    pub fn normalized(config: &AnalysisConfig, stemmer: &dyn Stemmer) -> Self {
        let mut culler = Self::new(config);
        let normalize = |words: &BTreeSet<String>| -> BTreeSet<String> {
            words.iter().map(|w| stemmer.stem(w)).collect()
        };

        culler.filter = match &culler.filter {
            ListFilter::Keep => ListFilter::Keep,
            ListFilter::Exclude(words) => ListFilter::Exclude(normalize(words)),
            ListFilter::Include(words) => ListFilter::Include(normalize(words)),
        };
        culler
    }

    /// Whether `unit` passes the list filter.
    pub fn admits(&self, unit: &str) -> bool {
        match &self.filter {
            ListFilter::Keep => true,
            ListFilter::Exclude(words) => !self.mentions(unit, words),
            ListFilter::Include(words) => self.mentions(unit, words),
        }
    }

    fn mentions(&self, unit: &str, words: &BTreeSet<String>) -> bool {
        // List words are lower-cased; units keep the backend's case.
        let listed = |word: &str| {
            words.contains(word)
                || (word.chars().any(char::is_uppercase) && words.contains(&word.to_lowercase()))
        };

        if self.ngram_size > 1 {
            unit.split(self.separator.as_str()).any(listed)
        } else {
            listed(unit)
        }
    }

    /// Filter ranked units, then truncate to `num_words` (0 = no limit).
    /// Relative order is preserved.
    pub fn cull(&self, ranked: &[String]) -> Vec<String> {
        let admitted = ranked.iter().filter(|unit| self.admits(unit)).cloned();

        if self.num_words == 0 {
            admitted.collect()
        } else {
            admitted.take(self.num_words).collect()
        }
    }
}
