use anyhow::Result;
use clap::Parser;
use searcher::{render_json, render_text, search_store};
use std::io::{self, Write};
use std::path::PathBuf;
use tfcore::persist::DEFAULT_STORE_PATH;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "searcher")]
#[command(about = "Search a term-frequency store built by the indexer", long_about = None)]
struct Args {
    /// Search terms as a single string
    query: String,
    /// Path to the index store
    #[arg(short = 'i', long = "index-file", env = "TFSEARCH_STORE", default_value = DEFAULT_STORE_PATH)]
    index_file: PathBuf,
    /// Number of top matches to return
    #[arg(short = 'n', long, default_value_t = 10, value_parser = clap::value_parser!(u64).range(1..))]
    top_n: u64,
    /// Print the response as JSON instead of match lines
    #[arg(long, default_value_t = false)]
    json: bool,
}

fn main() -> Result<()> {
    // Warnings about skipped records go to stderr; results alone go to stdout.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt().with_env_filter(filter).with_writer(io::stderr).init();
    let args = Args::parse();

    let top_n = usize::try_from(args.top_n).unwrap_or(usize::MAX);
    let response = search_store(&args.index_file, &args.query, top_n)?;
    let out = if args.json { render_json(&response)? } else { render_text(&response) };
    io::stdout().lock().write_all(out.as_bytes())?;
    Ok(())
}
