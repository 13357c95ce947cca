use anyhow::{Context, Result};
use serde::Serialize;
use std::path::Path;
use std::time::Instant;
use tfcore::persist::load_records;
use tfcore::{search, SearchHit, SearchResults};

pub const NO_MATCHES: &str = "No matches found with a score greater than zero.";

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub took_s: f64,
    pub total_hits: usize,
    pub results: Vec<SearchHit>,
}

/// Load the whole store and run `query` against every record in it.
pub fn search_store(store: &Path, query: &str, top_n: usize) -> Result<SearchResponse> {
    let start = Instant::now();
    let records = load_records(store).with_context(|| format!("failed to load store {}", store.display()))?;
    tracing::debug!(records = records.len(), store = %store.display(), "store loaded");

    let SearchResults { query, total_hits, hits } = search(&records, query, top_n);
    let elapsed = start.elapsed();
    tracing::info!(total_hits, returned = hits.len(), took_ms = elapsed.as_millis() as u64, "search complete");
    Ok(SearchResponse { query, took_s: elapsed.as_secs_f64(), total_hits, results: hits })
}

/// One `Match:` line per hit, or a single line saying nothing matched.
pub fn render_text(response: &SearchResponse) -> String {
    if response.results.is_empty() {
        return format!("{NO_MATCHES}\n");
    }
    let mut out = String::new();
    for hit in &response.results {
        out.push_str(&hit.to_string());
        out.push('\n');
    }
    out
}

pub fn render_json(response: &SearchResponse) -> Result<String> {
    let mut json = serde_json::to_string_pretty(response)?;
    json.push('\n');
    Ok(json)
}
