//! Analysis configuration.
//!
//! [`AnalysisConfig`] is immutable and can only be obtained through
//! [`AnalysisConfigBuilder::build`] or [`AnalysisConfig::from_params`], both
//! of which validate every field and resolve the cross-field defaults in one
//! place:
//!
//! - `all` forces `num_words` to 0 (no truncation of the word list);
//! - when both `block_size` and `num_blocks` are positive, `block_size` wins
//!   and `num_blocks` is reset to 0;
//! - when neither is set, the analysis uses a single block (`num_blocks = 1`).
//!
//! # Examples
//!
//! ```
//! use freqscope::config::{AnalysisConfig, LastBlock};
//!
//! let config = AnalysisConfig::builder()
//!     .block_size(500)
//!     .num_blocks(10)
//!     .last_block(LastBlock::SmallLast)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.block_size(), 500);
//! assert_eq!(config.num_blocks(), 0);
//!
//! let err = AnalysisConfig::builder().num_words(-5).build().unwrap_err();
//! assert!(err.is_configuration_error());
//! ```

use std::collections::BTreeSet;
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::analysis::stop::{BuiltinStopLists, StopListSource, parse_word_list};
use crate::error::{FreqscopeError, Result};

/// Default separator placed between the words of an n-gram.
pub const DEFAULT_NGRAM_SEPARATOR: &str = " ";

/// Default number of document ids sent to the backend per request.
pub const DEFAULT_FETCH_BATCH_SIZE: usize = 100;

/// Normalisation applied to tokens before counting.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stemming {
    /// Count surface forms.
    #[default]
    None,
    /// Count Snowball stems.
    Stem,
    /// Count dictionary lemmas.
    Lemma,
}

impl FromStr for Stemming {
    type Err = FreqscopeError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" | "" => Ok(Stemming::None),
            "stem" => Ok(Stemming::Stem),
            "lemma" => Ok(Stemming::Lemma),
            other => Err(FreqscopeError::invalid_configuration(
                "stemming",
                format!("must be one of none, stem, lemma (got '{other}')"),
            )),
        }
    }
}

impl fmt::Display for Stemming {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stemming::None => "none",
            Stemming::Stem => "stem",
            Stemming::Lemma => "lemma",
        };
        f.write_str(name)
    }
}

/// What to do with the units left over when a stream does not divide evenly
/// into blocks of `block_size`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LastBlock {
    /// The last block absorbs the leftover units.
    #[default]
    BigLast,
    /// The leftover units form an extra, smaller block.
    SmallLast,
    /// The leftover units are discarded.
    TruncateLast,
    /// Only the first block of each stream is kept.
    TruncateAll,
}

impl LastBlock {
    /// Whether this policy deliberately discards units.
    pub fn truncates(&self) -> bool {
        matches!(self, LastBlock::TruncateLast | LastBlock::TruncateAll)
    }
}

impl FromStr for LastBlock {
    type Err = FreqscopeError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "big_last" => Ok(LastBlock::BigLast),
            "small_last" => Ok(LastBlock::SmallLast),
            "truncate_last" => Ok(LastBlock::TruncateLast),
            "truncate_all" => Ok(LastBlock::TruncateAll),
            other => Err(FreqscopeError::invalid_configuration(
                "last_block",
                format!(
                    "must be one of big_last, small_last, truncate_last, truncate_all (got '{other}')"
                ),
            )),
        }
    }
}

impl fmt::Display for LastBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LastBlock::BigLast => "big_last",
            LastBlock::SmallLast => "small_last",
            LastBlock::TruncateLast => "truncate_last",
            LastBlock::TruncateAll => "truncate_all",
        };
        f.write_str(name)
    }
}

/// Raw, unvalidated analysis parameters as submitted by a user or read from
/// a JSON file.
///
/// Numbers are signed and enums are strings so that every invalid value can
/// be reported as a configuration error naming its field.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisParams {
    pub block_size: i64,
    pub num_blocks: i64,
    pub split_across: bool,
    pub ngram_size: i64,
    pub num_words: i64,
    pub all: bool,
    pub stemming: Option<String>,
    pub last_block: Option<String>,
    /// Whitespace-separated words.
    pub inclusion_list: Option<String>,
    /// Whitespace-separated words.
    pub exclusion_list: Option<String>,
    /// Whitespace-separated words.
    pub stop_list: Option<String>,
    /// Language code of a stop list to fetch from a [`StopListSource`].
    pub stop_list_language: Option<String>,
    pub ngram_separator: Option<String>,
    pub fetch_batch_size: Option<i64>,
}

impl Default for AnalysisParams {
    fn default() -> Self {
        AnalysisParams {
            block_size: 0,
            num_blocks: 0,
            split_across: true,
            ngram_size: 1,
            num_words: 0,
            all: false,
            stemming: None,
            last_block: None,
            inclusion_list: None,
            exclusion_list: None,
            stop_list: None,
            stop_list_language: None,
            ngram_separator: None,
            fetch_batch_size: None,
        }
    }
}

impl AnalysisParams {
    /// Load parameters from a JSON file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }
}

/// Validated, immutable configuration of one frequency analysis.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AnalysisConfig {
    block_size: usize,
    num_blocks: usize,
    split_across: bool,
    ngram_size: usize,
    num_words: usize,
    all: bool,
    stemming: Stemming,
    last_block: LastBlock,
    inclusion_list: Option<BTreeSet<String>>,
    exclusion_list: Option<BTreeSet<String>>,
    stop_list: Option<BTreeSet<String>>,
    ngram_separator: String,
    fetch_batch_size: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        AnalysisConfig {
            block_size: 0,
            num_blocks: 1,
            split_across: true,
            ngram_size: 1,
            num_words: 0,
            all: false,
            stemming: Stemming::None,
            last_block: LastBlock::BigLast,
            inclusion_list: None,
            exclusion_list: None,
            stop_list: None,
            ngram_separator: DEFAULT_NGRAM_SEPARATOR.to_string(),
            fetch_batch_size: DEFAULT_FETCH_BATCH_SIZE,
        }
    }
}

impl AnalysisConfig {
    /// Create a new builder for AnalysisConfig.
    pub fn builder() -> AnalysisConfigBuilder {
        AnalysisConfigBuilder::new()
    }

    /// Validate raw parameters, resolving stop lists through the built-in
    /// lists.
    pub fn from_params(params: AnalysisParams) -> Result<Self> {
        Self::from_params_with(params, &BuiltinStopLists)
    }

    /// Validate raw parameters, resolving stop lists through `stop_lists`.
    pub fn from_params_with(
        params: AnalysisParams,
        stop_lists: &dyn StopListSource,
    ) -> Result<Self> {
        let mut builder = AnalysisConfig::builder()
            .block_size(params.block_size)
            .num_blocks(params.num_blocks)
            .split_across(params.split_across)
            .ngram_size(params.ngram_size)
            .num_words(params.num_words)
            .all(params.all);

        if let Some(stemming) = &params.stemming {
            builder = builder.stemming(stemming.parse()?);
        }
        if let Some(last_block) = &params.last_block {
            builder = builder.last_block(last_block.parse()?);
        }
        if let Some(words) = &params.inclusion_list {
            builder = builder.inclusion_list(words.split_whitespace());
        }
        if let Some(words) = &params.exclusion_list {
            builder = builder.exclusion_list(words.split_whitespace());
        }
        if let Some(words) = &params.stop_list {
            builder = builder.stop_list(words.split_whitespace());
        }
        if let Some(language) = params.stop_list_language {
            builder = builder.stop_list_language(language);
        }
        if let Some(separator) = params.ngram_separator {
            builder = builder.ngram_separator(separator);
        }
        if let Some(batch) = params.fetch_batch_size {
            builder = builder.fetch_batch_size(batch);
        }

        builder.build_with(stop_lists)
    }

    /// Units per block; 0 when the block count drives segmentation.
    pub fn block_size(&self) -> usize {
        self.block_size
    }

    /// Blocks per stream; 0 when the block size drives segmentation.
    pub fn num_blocks(&self) -> usize {
        self.num_blocks
    }

    /// Whether the dataset is analysed as one concatenated stream.
    pub fn split_across(&self) -> bool {
        self.split_across
    }

    /// Number of consecutive tokens forming one unit.
    pub fn ngram_size(&self) -> usize {
        self.ngram_size
    }

    /// Maximum length of the word list; 0 means unbounded.
    pub fn num_words(&self) -> usize {
        self.num_words
    }

    /// Whether every candidate unit was requested.
    pub fn all(&self) -> bool {
        self.all
    }

    pub fn stemming(&self) -> Stemming {
        self.stemming
    }

    pub fn last_block(&self) -> LastBlock {
        self.last_block
    }

    pub fn inclusion_list(&self) -> Option<&BTreeSet<String>> {
        self.inclusion_list.as_ref()
    }

    pub fn exclusion_list(&self) -> Option<&BTreeSet<String>> {
        self.exclusion_list.as_ref()
    }

    pub fn stop_list(&self) -> Option<&BTreeSet<String>> {
        self.stop_list.as_ref()
    }

    /// Separator between the words of an n-gram unit.
    pub fn ngram_separator(&self) -> &str {
        &self.ngram_separator
    }

    /// Number of document ids sent to the backend per request.
    pub fn fetch_batch_size(&self) -> usize {
        self.fetch_batch_size
    }
}

/// Builder for AnalysisConfig.
///
/// Setters accept raw values; nothing is checked until [`build`](Self::build).
#[derive(Clone, Debug)]
pub struct AnalysisConfigBuilder {
    block_size: i64,
    num_blocks: i64,
    split_across: bool,
    ngram_size: i64,
    num_words: i64,
    all: bool,
    stemming: Stemming,
    last_block: LastBlock,
    inclusion_list: Option<BTreeSet<String>>,
    exclusion_list: Option<BTreeSet<String>>,
    stop_list: Option<BTreeSet<String>>,
    stop_list_language: Option<String>,
    ngram_separator: String,
    fetch_batch_size: i64,
}

impl Default for AnalysisConfigBuilder {
    fn default() -> Self {
        AnalysisConfigBuilder {
            block_size: 0,
            num_blocks: 0,
            split_across: true,
            ngram_size: 1,
            num_words: 0,
            all: false,
            stemming: Stemming::None,
            last_block: LastBlock::BigLast,
            inclusion_list: None,
            exclusion_list: None,
            stop_list: None,
            stop_list_language: None,
            ngram_separator: DEFAULT_NGRAM_SEPARATOR.to_string(),
            fetch_batch_size: DEFAULT_FETCH_BATCH_SIZE as i64,
        }
    }
}

impl AnalysisConfigBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn block_size(mut self, block_size: i64) -> Self {
        self.block_size = block_size;
        self
    }

    pub fn num_blocks(mut self, num_blocks: i64) -> Self {
        self.num_blocks = num_blocks;
        self
    }

    pub fn split_across(mut self, split_across: bool) -> Self {
        self.split_across = split_across;
        self
    }

    pub fn ngram_size(mut self, ngram_size: i64) -> Self {
        self.ngram_size = ngram_size;
        self
    }

    pub fn num_words(mut self, num_words: i64) -> Self {
        self.num_words = num_words;
        self
    }

    pub fn all(mut self, all: bool) -> Self {
        self.all = all;
        self
    }

    pub fn stemming(mut self, stemming: Stemming) -> Self {
        self.stemming = stemming;
        self
    }

    pub fn last_block(mut self, last_block: LastBlock) -> Self {
        self.last_block = last_block;
        self
    }

    /// Keep only units containing one of these words.
    pub fn inclusion_list<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.inclusion_list = word_set(words);
        self
    }

    /// Drop units containing any of these words.
    pub fn exclusion_list<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.exclusion_list = word_set(words);
        self
    }

    /// Drop units containing any of these common words.
    pub fn stop_list<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.stop_list = word_set(words);
        self
    }

    /// Use the stop list for a language; an explicit stop list takes
    /// precedence.
    pub fn stop_list_language<S: Into<String>>(mut self, language: S) -> Self {
        self.stop_list_language = Some(language.into());
        self
    }

    pub fn ngram_separator<S: Into<String>>(mut self, separator: S) -> Self {
        self.ngram_separator = separator.into();
        self
    }

    pub fn fetch_batch_size(mut self, batch: i64) -> Self {
        self.fetch_batch_size = batch;
        self
    }

    /// Validate and build, resolving stop lists through the built-in lists.
    pub fn build(self) -> Result<AnalysisConfig> {
        self.build_with(&BuiltinStopLists)
    }

    /// Validate and build, resolving stop lists through `stop_lists`.
    pub fn build_with(self, stop_lists: &dyn StopListSource) -> Result<AnalysisConfig> {
        let block_size = non_negative("block_size", self.block_size)?;
        let mut num_blocks = non_negative("num_blocks", self.num_blocks)?;
        let mut num_words = non_negative("num_words", self.num_words)?;
        let ngram_size = non_negative("ngram_size", self.ngram_size)?;
        let fetch_batch_size = non_negative("fetch_batch_size", self.fetch_batch_size)?;

        if ngram_size == 0 {
            return Err(FreqscopeError::invalid_configuration(
                "ngram_size",
                "must be at least 1",
            ));
        }
        if fetch_batch_size == 0 {
            return Err(FreqscopeError::invalid_configuration(
                "fetch_batch_size",
                "must be at least 1",
            ));
        }
        if self.ngram_separator.is_empty() {
            return Err(FreqscopeError::invalid_configuration(
                "ngram_separator",
                "must not be empty",
            ));
        }

        if self.all {
            num_words = 0;
        }

        if block_size > 0 && num_blocks > 0 {
            debug!("both block_size and num_blocks given; block_size {block_size} wins");
            num_blocks = 0;
        } else if block_size == 0 && num_blocks == 0 {
            num_blocks = 1;
        }

        let stop_list = match (self.stop_list, self.stop_list_language) {
            (Some(words), _) => Some(words),
            (None, Some(language)) => {
                let text = stop_lists.stop_list(&language)?.ok_or_else(|| {
                    FreqscopeError::invalid_configuration(
                        "stop_list",
                        format!("no stop list is available for language '{language}'"),
                    )
                })?;
                Some(parse_word_list(&text)).filter(|words| !words.is_empty())
            }
            (None, None) => None,
        };

        Ok(AnalysisConfig {
            block_size,
            num_blocks,
            split_across: self.split_across,
            ngram_size,
            num_words,
            all: self.all,
            stemming: self.stemming,
            last_block: self.last_block,
            inclusion_list: self.inclusion_list,
            exclusion_list: self.exclusion_list,
            stop_list,
            ngram_separator: self.ngram_separator,
            fetch_batch_size,
        })
    }
}

fn non_negative(field: &str, value: i64) -> Result<usize> {
    usize::try_from(value).map_err(|_| {
        FreqscopeError::invalid_configuration(
            field,
            format!("must be zero or greater (got {value})"),
        )
    })
}

/// Lower-cased set of words; an empty list counts as no list.
fn word_set<I, S>(words: I) -> Option<BTreeSet<String>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let set: BTreeSet<String> = words
        .into_iter()
        .map(|w| w.as_ref().trim().to_lowercase())
        .filter(|w| !w.is_empty())
        .collect();
    Some(set).filter(|set| !set.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NoStopLists;

    impl StopListSource for NoStopLists {
        fn stop_list(&self, _language: &str) -> Result<Option<String>> {
            Ok(None)
        }
    }

    #[test]
    fn test_defaults() {
        let config = AnalysisConfig::builder().build().unwrap();
        assert_eq!(config, AnalysisConfig::default());
        assert_eq!(config.num_blocks(), 1);
        assert_eq!(config.block_size(), 0);
        assert!(config.split_across());
        assert_eq!(config.last_block(), LastBlock::BigLast);
    }

    #[test]
    fn test_block_size_wins_over_num_blocks() {
        let config = AnalysisConfig::builder()
            .block_size(40)
            .num_blocks(3)
            .build()
            .unwrap();
        assert_eq!(config.block_size(), 40);
        assert_eq!(config.num_blocks(), 0);

        let config = AnalysisConfig::builder().num_blocks(3).build().unwrap();
        assert_eq!(config.block_size(), 0);
        assert_eq!(config.num_blocks(), 3);
    }

    #[test]
    fn test_all_forces_unbounded_word_list() {
        let config = AnalysisConfig::builder().num_words(25).all(true).build().unwrap();
        assert_eq!(config.num_words(), 0);
        assert!(config.all());
    }

    #[test]
    fn test_negative_values_rejected() {
        for (field, builder) in [
            ("num_words", AnalysisConfig::builder().num_words(-1)),
            ("block_size", AnalysisConfig::builder().block_size(-10)),
            ("num_blocks", AnalysisConfig::builder().num_blocks(-2)),
        ] {
            match builder.build() {
                Err(FreqscopeError::InvalidConfiguration { field: f, .. }) => assert_eq!(f, field),
                other => panic!("expected configuration error for {field}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_zero_ngram_size_rejected() {
        let err = AnalysisConfig::builder().ngram_size(0).build().unwrap_err();
        assert!(err.to_string().contains("ngram_size"));
    }

    #[test]
    fn test_enum_parsing() {
        assert_eq!("small_last".parse::<LastBlock>().unwrap(), LastBlock::SmallLast);
        assert_eq!("TRUNCATE_ALL".parse::<LastBlock>().unwrap(), LastBlock::TruncateAll);
        assert_eq!("lemma".parse::<Stemming>().unwrap(), Stemming::Lemma);

        let err = "middle_last".parse::<LastBlock>().unwrap_err();
        assert!(err.is_configuration_error());
        assert!(err.to_string().contains("last_block"));
        assert!("porter".parse::<Stemming>().is_err());
    }

    #[test]
    fn test_word_lists_are_normalised() {
        let config = AnalysisConfig::builder()
            .inclusion_list(["Malaria", "FEVER", " "])
            .exclusion_list(Vec::<String>::new())
            .build()
            .unwrap();

        let inclusion = config.inclusion_list().unwrap();
        assert!(inclusion.contains("malaria"));
        assert!(inclusion.contains("fever"));
        assert_eq!(inclusion.len(), 2);
        assert!(config.exclusion_list().is_none());
    }

    #[test]
    fn test_from_params() {
        let params: AnalysisParams = serde_json::from_str(
            r#"{"block_size": 100, "last_block": "truncate_last", "stemming": "stem",
                "inclusion_list": "malaria  fever", "split_across": false}"#,
        )
        .unwrap();
        let config = AnalysisConfig::from_params(params).unwrap();

        assert_eq!(config.block_size(), 100);
        assert_eq!(config.num_blocks(), 0);
        assert_eq!(config.last_block(), LastBlock::TruncateLast);
        assert_eq!(config.stemming(), Stemming::Stem);
        assert!(!config.split_across());
        assert_eq!(config.inclusion_list().unwrap().len(), 2);
    }

    #[test]
    fn test_from_params_invalid_enum() {
        let params = AnalysisParams {
            last_block: Some("sideways".to_string()),
            ..Default::default()
        };
        assert!(AnalysisConfig::from_params(params).unwrap_err().is_configuration_error());
    }

    #[test]
    fn test_stop_list_language() {
        let config = AnalysisConfig::builder()
            .stop_list_language("en")
            .build()
            .unwrap();
        assert!(config.stop_list().unwrap().contains("the"));

        let err = AnalysisConfig::builder()
            .stop_list_language("en")
            .build_with(&NoStopLists)
            .unwrap_err();
        assert!(err.to_string().contains("stop_list"));

        let config = AnalysisConfig::builder()
            .stop_list(["ague"])
            .stop_list_language("en")
            .build_with(&NoStopLists)
            .unwrap();
        assert_eq!(config.stop_list().unwrap().len(), 1);
    }
}
