//! Cheap text/binary sniffing and lenient decoding.

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

/// How much of a file is inspected before deciding it is text.
pub const SNIFF_LEN: usize = 1024;

/// A file is text when its first [`SNIFF_LEN`] bytes decode as UTF-8.
pub fn is_text_file(path: &Path) -> io::Result<bool> {
    let mut head = Vec::with_capacity(SNIFF_LEN);
    File::open(path)?.take(SNIFF_LEN as u64).read_to_end(&mut head)?;
    Ok(is_text(&head, head.len() < SNIFF_LEN))
}

/// `complete` says whether `head` is the whole file. When it is not, a
/// character split by the sniff boundary still counts as text.
pub fn is_text(head: &[u8], complete: bool) -> bool {
    match std::str::from_utf8(head) {
        Ok(_) => true,
        Err(e) => !complete && e.error_len().is_none(),
    }
}

/// Decode UTF-8, dropping malformed bytes instead of replacing them.
pub fn decode_lossy(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len());
    for chunk in bytes.utf8_chunks() {
        out.push_str(chunk.valid());
    }
    out
}
