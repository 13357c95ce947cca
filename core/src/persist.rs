//! The record store: a gzip stream of JSON lines, one [`Record`] per line.
//!
//! Writers go through a `.tmp` sibling that is renamed over the target once
//! the stream is finished, so readers only ever see a complete store.

use crate::error::{Result, StoreError};
use crate::tokenizer::NORMALIZATION_VERSION;
use crate::Record;
use flate2::read::MultiGzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

/// Store location shared by both command-line tools.
pub const DEFAULT_STORE_PATH: &str = "bayesian_index.jsonl.gz";

/// Path the writer streams into before renaming onto `path`.
pub fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(OsString::from).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

pub struct StoreWriter {
    target: PathBuf,
    tmp: PathBuf,
    encoder: Option<GzEncoder<BufWriter<File>>>,
    written: usize,
}

impl StoreWriter {
    /// Open a fresh store at `path`. The previous store, if any, stays in place
    /// until [`StoreWriter::finish`] succeeds.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let target = path.as_ref().to_path_buf();
        let tmp = temp_path(&target);
        if let Some(parent) = target.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| StoreError::Create { path: target.clone(), source })?;
        }
        let file = File::create(&tmp).map_err(|source| StoreError::Create { path: tmp.clone(), source })?;
        let encoder = GzEncoder::new(BufWriter::new(file), Compression::default());
        Ok(Self { target, tmp, encoder: Some(encoder), written: 0 })
    }

    pub fn path(&self) -> &Path { &self.target }

    pub fn temp_path(&self) -> &Path { &self.tmp }

    pub fn written(&self) -> usize { self.written }

    /// Append one record. The line and its newline go out in a single write
    /// from a fully serialized buffer.
    pub fn append(&mut self, record: &Record) -> Result<()> {
        let mut line = serde_json::to_vec(record)
            .map_err(|source| StoreError::Serialize { record_path: record.path.clone(), source })?;
        line.push(b'\n');
        let encoder = self.encoder.as_mut().expect("encoder is only taken by finish");
        encoder.write_all(&line).map_err(|source| StoreError::Write { path: self.tmp.clone(), source })?;
        self.written += 1;
        Ok(())
    }

    /// Close the gzip stream, sync it and move it over the target path.
    /// Returns the number of records written. On failure the temp file is
    /// removed and any previous store is left untouched.
    pub fn finish(mut self) -> Result<usize> {
        let encoder = self.encoder.take().expect("finish runs once");
        if let Err(e) = commit(encoder, &self.tmp, &self.target) {
            let _ = fs::remove_file(&self.tmp);
            return Err(e);
        }
        tracing::debug!(path = %self.target.display(), records = self.written, "store written");
        Ok(self.written)
    }
}

fn commit(encoder: GzEncoder<BufWriter<File>>, tmp: &Path, target: &Path) -> Result<()> {
    let write_err = |path: &Path, source: std::io::Error| StoreError::Write { path: path.to_path_buf(), source };
    let buffered = encoder.finish().map_err(|e| write_err(tmp, e))?;
    let file = buffered.into_inner().map_err(|e| write_err(tmp, e.into_error()))?;
    file.sync_all().map_err(|e| write_err(tmp, e))?;
    drop(file);
    fs::rename(tmp, target).map_err(|e| write_err(target, e))
}

impl Drop for StoreWriter {
    fn drop(&mut self) {
        // Abandoned run: never leave a half-written temp file behind.
        if self.encoder.take().is_some() {
            let _ = fs::remove_file(&self.tmp);
        }
    }
}

pub fn save_records<P: AsRef<Path>>(path: P, records: &[Record]) -> Result<usize> {
    let mut writer = StoreWriter::create(path)?;
    for record in records {
        writer.append(record)?;
    }
    writer.finish()
}

/// Load every record of the store at `path`, in write order.
///
/// Lines that are not valid UTF-8, do not parse as a record, or carry another
/// normalization version are skipped with a warning.
pub fn load_records<P: AsRef<Path>>(path: P) -> Result<Vec<Record>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| StoreError::Open { path: path.to_path_buf(), source })?;
    read_records(file, path)
}

/// Decode records from any gzip source; `origin` is only used in messages.
pub fn read_records<R: Read>(source: R, origin: &Path) -> Result<Vec<Record>> {
    let mut reader = BufReader::new(MultiGzDecoder::new(source));
    let mut records = Vec::new();
    let mut line = Vec::new();
    let mut line_no = 0usize;
    loop {
        line.clear();
        let n = reader
            .read_until(b'\n', &mut line)
            .map_err(|source| StoreError::Read { path: origin.to_path_buf(), source })?;
        if n == 0 { break; }
        line_no += 1;
        let text = match std::str::from_utf8(&line) {
            Ok(text) => text.trim(),
            Err(e) => {
                tracing::warn!(store = %origin.display(), line = line_no, error = %e, "skipping non-UTF-8 record");
                continue;
            }
        };
        if text.is_empty() { continue; }
        match serde_json::from_str::<Record>(text) {
            Ok(record) if record.v != NORMALIZATION_VERSION => {
                tracing::warn!(
                    store = %origin.display(),
                    line = line_no,
                    found = record.v,
                    expected = NORMALIZATION_VERSION,
                    "skipping record written with another normalization version"
                );
            }
            Ok(record) => records.push(record),
            Err(e) => {
                tracing::warn!(store = %origin.display(), line = line_no, error = %e, "skipping malformed record");
            }
        }
    }
    Ok(records)
}
