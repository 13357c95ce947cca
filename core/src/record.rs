use crate::tokenizer::NORMALIZATION_VERSION;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Version assumed for lines with no `v` field. Those come from the older
/// NLTK-based tools, whose Porter stemmer disagrees with ours on many words.
pub const LEGACY_VERSION: u32 = 0;

fn legacy_version() -> u32 { LEGACY_VERSION }

/// Filesystem facts captured at index time. Both fields are absent when the
/// file could not be stat'ed, which serializes as `{}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Attributes {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    /// RFC 3339 timestamp. Stored verbatim, never interpreted by the searcher.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified_date: Option<String>,
}

impl Attributes {
    pub fn is_empty(&self) -> bool { self.size.is_none() && self.modified_date.is_none() }
}

/// One indexed file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Normalization version the keys below were produced with. Lines written
    /// without it predate the marker and read as [`LEGACY_VERSION`].
    #[serde(default = "legacy_version")]
    pub v: u32,
    pub path: String,
    pub term_frequencies: BTreeMap<String, f64>,
    #[serde(default)]
    pub attributes: Attributes,
}

impl Record {
    pub fn new(path: impl Into<String>, term_frequencies: BTreeMap<String, f64>, attributes: Attributes) -> Self {
        Self { v: NORMALIZATION_VERSION, path: path.into(), term_frequencies, attributes }
    }

    /// Sum of this record's frequency for every query stem. Repeated stems count
    /// once per occurrence; unknown stems add nothing.
    pub fn score<S: AsRef<str>>(&self, query_stems: &[S]) -> f64 {
        query_stems
            .iter()
            .map(|q| self.term_frequencies.get(q.as_ref()).copied().unwrap_or(0.0))
            .sum()
    }
}

/// Relative frequency of each distinct stem. Empty input gives an empty map.
pub fn term_frequencies_from_stems<S: AsRef<str>>(stems: &[S]) -> BTreeMap<String, f64> {
    let mut counts: BTreeMap<String, u32> = BTreeMap::new();
    for stem in stems {
        *counts.entry(stem.as_ref().to_string()).or_insert(0) += 1;
    }
    let total = stems.len() as f64;
    counts.into_iter().map(|(stem, n)| (stem, n as f64 / total)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::normalize;

    fn record_for(text: &str) -> Record {
        Record::new("doc.txt", term_frequencies_from_stems(&normalize(text)), Attributes::default())
    }

    #[test]
    fn frequencies_sum_to_one() {
        let tf = term_frequencies_from_stems(&normalize("the cat sat on the mat with another cat and a dog"));
        let sum: f64 = tf.values().sum();
        assert!((sum - 1.0).abs() < 1e-9, "sum was {sum}");
        assert_eq!(tf.len(), 5);
        assert_eq!(tf["cat"], 2.0 / 6.0);
    }

    #[test]
    fn no_stems_means_empty_map() {
        assert!(term_frequencies_from_stems::<String>(&[]).is_empty());
        assert!(record_for("the and of 42 !!").term_frequencies.is_empty());
    }

    #[test]
    fn repeated_query_stems_add_linearly() {
        let r = record_for("cats and dogs");
        assert_eq!(r.score(&["cat"]), 0.5);
        assert_eq!(r.score(&["cat", "cat"]), 1.0);
        assert_eq!(r.score(&["cat", "bird"]), 0.5);
        assert_eq!(r.score::<&str>(&[]), 0.0);
    }

    #[test]
    fn extending_the_query_never_lowers_a_score() {
        let r = record_for("alpha beta beta gamma delta");
        let q1 = ["alpha", "gamma"];
        let q2 = ["alpha", "gamma", "beta", "zeta", "alpha"];
        assert!(r.score(&q1) <= r.score(&q2));
    }

    #[test]
    fn empty_attributes_serialize_as_empty_object() {
        let r = Record::new("x", BTreeMap::new(), Attributes::default());
        let json = serde_json::to_value(&r).unwrap();
        assert_eq!(json["attributes"], serde_json::json!({}));
        assert_eq!(json["v"], NORMALIZATION_VERSION);
    }

    #[test]
    fn line_without_marker_reads_as_legacy() {
        let line = r#"{"path": "a.txt", "term_frequencies": {"quick": 0.5, "fox": 0.5}, "attributes": {"size": 19, "modified_date": "2024-03-01T10:00:00.123456"}}"#;
        let r: Record = serde_json::from_str(line).unwrap();
        assert_eq!(r.v, LEGACY_VERSION);
        assert_ne!(r.v, NORMALIZATION_VERSION);
        assert_eq!(r.attributes.size, Some(19));
        assert_eq!(r.score(&["fox"]), 0.5);
    }
}
