//! Token normalisation used while rebuilding token streams.
//!
//! - [`stem`] reduces tokens to stems or lemmas before they are counted.
//! - [`stop`] parses stop lists and resolves them by language code.

pub mod stem;
pub mod stop;
