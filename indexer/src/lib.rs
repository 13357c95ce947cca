pub mod detect;

use anyhow::{bail, Context, Result};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tfcore::persist::StoreWriter;
use tfcore::{normalize, term_frequencies_from_stems, Attributes, Record};
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;
use walkdir::WalkDir;

/// Outcome of one indexing run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct IndexStats {
    /// Records written to the store.
    pub indexed: usize,
    /// Files that did not look like text.
    pub skipped: usize,
    /// Entries that could not be read at all.
    pub failed: usize,
}

fn stat(path: &Path) -> io::Result<Attributes> {
    let meta = fs::metadata(path)?;
    let modified = OffsetDateTime::from(meta.modified()?)
        .format(&Rfc3339)
        .map_err(io::Error::other)?;
    Ok(Attributes { size: Some(meta.len()), modified_date: Some(modified) })
}

/// Size and modification time of `path`. A failed stat yields empty attributes.
pub fn file_attributes(path: &Path) -> Attributes {
    stat(path).unwrap_or_else(|e| {
        tracing::warn!(path = %path.display(), error = %e, "cannot stat file");
        Attributes::default()
    })
}

/// Build the record for one file, or `None` when it is not text.
pub fn index_file(path: &Path) -> io::Result<Option<Record>> {
    if !detect::is_text_file(path)? {
        return Ok(None);
    }
    let bytes = fs::read(path)?;
    let stems = normalize(&detect::decode_lossy(&bytes));
    let term_frequencies = term_frequencies_from_stems(&stems);
    Ok(Some(Record::new(path.to_string_lossy(), term_frequencies, file_attributes(path))))
}

/// Regular files and symlinks that resolve to one. Anything else is `Ok(false)`.
fn is_indexable(entry: &walkdir::DirEntry) -> io::Result<bool> {
    let file_type = entry.file_type();
    if file_type.is_file() {
        return Ok(true);
    }
    if file_type.is_symlink() {
        return Ok(fs::metadata(entry.path())?.is_file());
    }
    Ok(false)
}

/// Walk `root` and write one record per text file to a fresh store at
/// `output`, replacing any previous store only once the walk is complete.
///
/// Errors on individual entries are logged and counted; only a bad root or a
/// store that cannot be created or written aborts the run.
pub fn index_directory(root: &Path, output: &Path) -> Result<IndexStats> {
    if !root.is_dir() {
        bail!("{} is not a directory", root.display());
    }
    let mut writer = StoreWriter::create(output)
        .with_context(|| format!("failed to open output store {}", output.display()))?;
    let own_files: Vec<PathBuf> = [writer.path(), writer.temp_path()]
        .into_iter()
        .filter_map(|p| fs::canonicalize(p).ok())
        .collect();

    let mut stats = IndexStats::default();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!(error = %e, "cannot read directory entry");
                stats.failed += 1;
                continue;
            }
        };
        let path = entry.path();
        match is_indexable(&entry) {
            Ok(true) => {}
            Ok(false) => continue,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "cannot resolve entry");
                stats.failed += 1;
                continue;
            }
        }
        if fs::canonicalize(path).is_ok_and(|p| own_files.contains(&p)) {
            continue;
        }

        tracing::info!(path = %path.display(), "indexing");
        match index_file(path) {
            Ok(Some(record)) => {
                writer
                    .append(&record)
                    .with_context(|| format!("failed to write record for {}", path.display()))?;
                stats.indexed += 1;
            }
            Ok(None) => {
                tracing::debug!(path = %path.display(), "skipping non-text file");
                stats.skipped += 1;
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "cannot index file");
                stats.failed += 1;
            }
        }
    }

    writer
        .finish()
        .with_context(|| format!("failed to finish output store {}", output.display()))?;
    tracing::info!(
        indexed = stats.indexed,
        skipped = stats.skipped,
        failed = stats.failed,
        output = %output.display(),
        "index build complete"
    );
    Ok(stats)
}
