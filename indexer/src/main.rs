use anyhow::Result;
use clap::Parser;
use indexer::index_directory;
use std::path::PathBuf;
use tfcore::persist::DEFAULT_STORE_PATH;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "indexer")]
#[command(about = "Index the text files under a directory into a term-frequency store", long_about = None)]
struct Cli {
    /// Directory to index
    directory: PathBuf,
    /// Output store (gzip-compressed JSON lines); replaced when the run completes
    #[arg(short, long, env = "TFSEARCH_STORE", default_value = DEFAULT_STORE_PATH)]
    output: PathBuf,
}

fn main() -> Result<()> {
    // Progress and diagnostics go to stderr; nothing is printed on stdout.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
    let cli = Cli::parse();

    let stats = index_directory(&cli.directory, &cli.output)?;
    if stats.failed > 0 {
        tracing::warn!(failed = stats.failed, "some entries could not be indexed");
    }
    Ok(())
}
