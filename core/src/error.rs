//! Errors raised while writing or reading a record store.
//!
//! Only whole-store failures surface here. A single bad line inside an
//! otherwise readable store is logged and skipped by the loader instead.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    /// The output store (or its temporary sibling) could not be created.
    #[error("cannot create store {path}: {source}")]
    Create {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The input store is missing or unreadable.
    #[error("cannot open store {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The compressed stream broke while reading.
    #[error("cannot read store {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot write store {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot serialize record for {record_path}: {source}")]
    Serialize {
        record_path: String,
        #[source]
        source: serde_json::Error,
    },
}

pub type Result<T> = std::result::Result<T, StoreError>;
