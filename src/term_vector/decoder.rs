//! Decoder for the backend's term-vector wire format.
//!
//! Every level of the payload is a flat list alternating keys and values:
//!
//! ```text
//! termVectors: [ "uniqueKeyFieldName", "uid",
//!                <doc id>, [ "uniqueKey", <doc id>,
//!                            <field>, [ <term>, [ "tf", 1,
//!                                                 "offsets", ["start", 0, "end", 7],
//!                                                 "positions", ["position", 0],
//!                                                 "df", 128,
//!                                                 "tf-idf", 0.0078 ],
//!                                       ... ] ] ]
//! ```
//!
//! Object-shaped levels (the backend's "map" rendering) are accepted too.

use std::ops::Range;

use log::{debug, trace};
use serde_json::Value;

use crate::term_vector::{TermStats, TermVector};

/// Key naming the unique-key field at the top level of the payload.
const UNIQUE_KEY_FIELD_NAME: &str = "uniqueKeyFieldName";

/// Key carrying the document id inside a document entry.
const UNIQUE_KEY: &str = "uniqueKey";

/// Key under which the backend reports request warnings.
const WARNINGS: &str = "warnings";

/// Decodes term-vector payloads into per-document [`TermVector`]s.
#[derive(Clone, Debug, Default)]
pub struct TermVectorDecoder {
    /// Field whose term vector is decoded; `None` takes the first one present.
    field: Option<String>,
}

impl TermVectorDecoder {
    /// Create a decoder that takes the first field found in each document.
    pub fn new() -> Self {
        TermVectorDecoder { field: None }
    }

    /// Create a decoder restricted to the term vector of `field`.
    pub fn for_field<S: Into<String>>(field: S) -> Self {
        TermVectorDecoder {
            field: Some(field.into()),
        }
    }

    /// Decode the term vector of `doc_id` from `payload`.
    ///
    /// Returns an empty map when the document is not present. Terms whose
    /// corpus document frequency is reported as zero are dropped.
    pub fn decode(&self, payload: &Value, doc_id: &str) -> TermVector {
        let mut tv = TermVector::new();

        let Some(entry) = find_document(payload, doc_id) else {
            debug!("document {doc_id} not present in term-vector payload");
            return tv;
        };

        let Some(terms) = self.find_field(entry) else {
            debug!("document {doc_id} has no term vector for the requested field");
            return tv;
        };

        for (term, raw_stats) in pairs(terms) {
            let (stats, df_reported) = decode_stats(raw_stats);
            if df_reported && stats.df == 0 {
                trace!("dropping '{term}' from {doc_id}: zero document frequency");
                continue;
            }
            tv.insert(term.to_string(), stats);
        }

        tv
    }

    fn find_field<'a>(&self, entry: &'a Value) -> Option<&'a Value> {
        pairs(entry)
            .into_iter()
            .filter(|(key, _)| *key != UNIQUE_KEY && *key != WARNINGS)
            .find(|(key, value)| match &self.field {
                Some(field) => *key == field.as_str(),
                None => value.is_array() || value.is_object(),
            })
            .map(|(_, value)| value)
    }
}

/// Locate the entry for `doc_id` in a payload.
fn find_document<'a>(payload: &'a Value, doc_id: &str) -> Option<&'a Value> {
    let root = payload.get("termVectors").unwrap_or(payload);

    pairs(root)
        .into_iter()
        .filter(|(key, _)| *key != UNIQUE_KEY_FIELD_NAME && *key != WARNINGS)
        .find(|(key, entry)| {
            *key == doc_id
                || pairs(entry)
                    .iter()
                    .any(|(k, v)| *k == UNIQUE_KEY && v.as_str() == Some(doc_id))
        })
        .map(|(_, entry)| entry)
}

/// Decode one term's statistics, reporting whether `df` was present.
fn decode_stats(raw: &Value) -> (TermStats, bool) {
    let mut stats = TermStats::default();
    let mut df_reported = false;
    let mut tf_reported = false;

    for (key, value) in pairs(raw) {
        match key {
            "tf" => {
                stats.tf = as_count(value);
                tf_reported = true;
            }
            "df" => {
                stats.df = as_count(value);
                df_reported = true;
            }
            "tf-idf" => stats.tf_idf = value.as_f64().unwrap_or_default(),
            "positions" => stats.positions = numbers(value).collect(),
            "offsets" => stats.offsets = offsets(value),
            _ => {}
        }
    }

    if !tf_reported {
        stats.tf = stats.positions.len() as u64;
    }

    (stats, df_reported)
}

/// View a flat alternating list or an object as `(key, value)` pairs.
///
/// Entries whose key is not a string are skipped.
fn pairs(value: &Value) -> Vec<(&str, &Value)> {
    match value {
        Value::Array(items) => items
            .chunks_exact(2)
            .filter_map(|pair| pair[0].as_str().map(|key| (key, &pair[1])))
            .collect(),
        Value::Object(map) => map.iter().map(|(k, v)| (k.as_str(), v)).collect(),
        _ => Vec::new(),
    }
}

/// All non-negative integers in a flat labelled list, in order.
///
/// `["position", 0, "position", 5]`, `[0, 5]` and `{"position": 0}` all work.
fn numbers(value: &Value) -> Box<dyn Iterator<Item = usize> + '_> {
    match value {
        Value::Array(items) => Box::new(items.iter().filter_map(as_index)),
        Value::Object(map) => Box::new(map.values().flat_map(numbers)),
        other => Box::new(as_index(other).into_iter()),
    }
}

/// Character ranges from `["start", 0, "end", 7, ...]`, `{"start": 0, "end": 7}`,
/// a list of such objects, or bare `[0, 7, ...]` bounds.
fn offsets(value: &Value) -> Vec<Range<usize>> {
    match value {
        Value::Object(map) => {
            let start = map.get("start").and_then(as_index);
            let end = map.get("end").and_then(as_index);
            start.zip(end).map(|(start, end)| start..end).into_iter().collect()
        }
        Value::Array(items) if items.iter().all(Value::is_object) => {
            items.iter().flat_map(offsets).collect()
        }
        Value::Array(items) if items.first().is_some_and(Value::is_string) => {
            let mut ranges = Vec::new();
            let mut start = None;
            for (key, bound) in pairs(value) {
                match key {
                    "start" => start = as_index(bound),
                    "end" => {
                        if let (Some(s), Some(e)) = (start.take(), as_index(bound)) {
                            ranges.push(s..e);
                        }
                    }
                    _ => {}
                }
            }
            ranges
        }
        other => {
            let bounds: Vec<usize> = numbers(other).collect();
            bounds.chunks_exact(2).map(|pair| pair[0]..pair[1]).collect()
        }
    }
}

fn as_index(value: &Value) -> Option<usize> {
    value
        .as_u64()
        .map(|n| n as usize)
        .or_else(|| value.as_f64().filter(|f| *f >= 0.0).map(|f| f as usize))
}

fn as_count(value: &Value) -> u64 {
    value
        .as_u64()
        .or_else(|| value.as_f64().filter(|f| *f >= 0.0).map(|f| f.round() as u64))
        .unwrap_or_default()
}
