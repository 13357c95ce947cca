use crate::tokenizer::normalize;
use crate::Record;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchHit {
    pub path: String,
    pub score: f64,
}

/// Shortest round-trip form with a decimal point on whole numbers ("1.0") and a
/// signed, two-digit exponent on tiny or huge ones ("5e-06", "1e+16").
pub fn format_score(score: f64) -> String {
    // `{:?}` already switches to exponent form below 1e-4 and from 1e16 up.
    let repr = format!("{score:?}");
    match repr.split_once('e') {
        Some((mantissa, exp)) => {
            let (sign, digits) = match exp.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exp),
            };
            format!("{mantissa}e{sign}{digits:0>2}")
        }
        None => repr,
    }
}

impl fmt::Display for SearchHit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Match: {} (Score: {})", self.path, format_score(self.score))
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SearchResults {
    pub query: String,
    /// Records with a positive score, before truncation to top-N.
    pub total_hits: usize,
    pub hits: Vec<SearchHit>,
}

/// Score every record against `query_stems` and keep the best `top_n`.
///
/// Records scoring zero never appear. Equal scores keep the order the records
/// were written to the store in.
pub fn rank<S: AsRef<str>>(records: &[Record], query_stems: &[S], top_n: usize) -> Vec<SearchHit> {
    let (_, hits) = rank_counted(records, query_stems, top_n);
    hits
}

fn rank_counted<S: AsRef<str>>(records: &[Record], query_stems: &[S], top_n: usize) -> (usize, Vec<SearchHit>) {
    let mut scored: Vec<(&Record, f64)> = records
        .iter()
        .map(|r| (r, r.score(query_stems)))
        .filter(|(_, score)| *score > 0.0)
        .collect();
    let total_hits = scored.len();
    // sort_by is stable, which is what makes ties fall back to write order
    scored.sort_by(|a, b| b.1.total_cmp(&a.1));
    scored.truncate(top_n);
    let hits = scored
        .into_iter()
        .map(|(r, score)| SearchHit { path: r.path.clone(), score })
        .collect();
    (total_hits, hits)
}

/// Normalize `query` the same way file contents were normalized, then rank.
pub fn search(records: &[Record], query: &str, top_n: usize) -> SearchResults {
    let stems = normalize(query);
    tracing::debug!(?stems, "normalized query");
    let (total_hits, hits) = rank_counted(records, &stems, top_n);
    SearchResults { query: query.to_string(), total_hits, hits }
}
