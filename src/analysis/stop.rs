//! Stop lists.
//!
//! A stop list arrives from its provider as a single whitespace-separated
//! string. [`parse_word_list`] turns such a string into a normalised set and
//! [`StopListSource`] resolves lists by language code. English and Japanese
//! lists are built in.
//!
//! # Examples
//!
//! ```
//! use freqscope::analysis::stop::{BuiltinStopLists, StopListSource, parse_word_list};
//!
//! let words = parse_word_list("The  and\nOF");
//! assert!(words.contains("the") && words.contains("of"));
//!
//! let english = BuiltinStopLists.stop_list("en").unwrap().unwrap();
//! assert!(parse_word_list(&english).contains("with"));
//! ```

use std::collections::{BTreeSet, HashMap};
use std::sync::LazyLock;

use crate::error::Result;

/// Default English stop words.
const DEFAULT_ENGLISH_STOP_WORDS: &[&str] = &[
    "a", "about", "after", "all", "also", "an", "and", "any", "are", "as", "at", "be", "been",
    "but", "by", "can", "could", "did", "do", "does", "for", "from", "had", "has", "have", "he",
    "her", "his", "if", "in", "into", "is", "it", "its", "may", "more", "no", "not", "of", "on",
    "one", "only", "or", "other", "our", "she", "should", "so", "some", "such", "than", "that",
    "the", "their", "them", "then", "there", "these", "they", "this", "those", "to", "up", "was",
    "we", "were", "what", "when", "which", "who", "will", "with", "would", "you",
];

/// Default Japanese stop words.
const DEFAULT_JAPANESE_STOP_WORDS: &[&str] = &[
    "の", "に", "は", "を", "た", "が", "で", "て", "と", "し", "れ", "さ", "ある", "いる", "も",
    "する", "から", "な", "こと", "として", "い", "や", "れる", "など", "なっ", "ない", "この",
    "ため", "その", "あっ", "よう", "また", "もの", "という", "あり", "まで", "られ", "なる",
    "へ", "か", "だ", "これ", "によって", "により", "おり", "より", "による", "ず", "なり",
    "られる", "において", "ば", "なかっ", "なく", "しかし", "について", "せ", "だっ", "できる",
    "それ", "う", "ので", "なお", "のみ", "でき", "き", "つ", "における", "および", "いう",
    "さらに", "でも", "ら", "たり", "に関する", "たち", "ます", "ん", "なら", "に対して",
    "特に", "せる", "及び", "これら", "とき", "では", "にて", "ほか", "ながら", "うち", "そして",
    "とともに", "ただし", "かつて", "それぞれ", "または", "お", "ほど", "ものの", "に対する",
    "ほとんど", "と共に", "といった", "です", "とも", "ところ", "ここ",
];

/// Built-in stop lists keyed by ISO 639-1 code, in provider wire form.
static BUILTIN_STOP_LISTS: LazyLock<HashMap<&'static str, String>> = LazyLock::new(|| {
    let mut lists = HashMap::new();
    lists.insert("en", DEFAULT_ENGLISH_STOP_WORDS.join(" "));
    lists.insert("ja", DEFAULT_JAPANESE_STOP_WORDS.join(" "));
    lists
});

/// Provider of stop lists by language code.
pub trait StopListSource {
    /// The whitespace-separated stop list for `language`, if one exists.
    fn stop_list(&self, language: &str) -> Result<Option<String>>;
}

/// Stop lists compiled into the crate.
#[derive(Clone, Copy, Debug, Default)]
pub struct BuiltinStopLists;

impl StopListSource for BuiltinStopLists {
    fn stop_list(&self, language: &str) -> Result<Option<String>> {
        Ok(BUILTIN_STOP_LISTS
            .get(language.to_ascii_lowercase().as_str())
            .cloned())
    }
}

/// Parse a whitespace-separated word list into a lower-cased set.
pub fn parse_word_list(text: &str) -> BTreeSet<String> {
    text.split_whitespace().map(str::to_lowercase).collect()
}
