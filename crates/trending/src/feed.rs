//! Loading takes from disk.
//!
//! Two layouts are accepted: a single JSON array, or JSONL with one take per
//! line (the format the feed exporter appends to).  Blank JSONL lines are
//! skipped.
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::schema::Take;

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("failed to read feed file {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid take on line {line}")]
    Json {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}

pub fn load_takes(path: impl AsRef<Path>) -> Result<Vec<Take>, FeedError> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path).map_err(|source| FeedError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let takes = parse_takes(&raw)?;
    debug!(path = %path.display(), count = takes.len(), "loaded takes");
    Ok(takes)
}

pub fn parse_takes(raw: &str) -> Result<Vec<Take>, FeedError> {
    if raw.trim_start().starts_with('[') {
        return serde_json::from_str(raw).map_err(|source| FeedError::Json {
            line: source.line(),
            source,
        });
    }

    raw.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(idx, line)| {
            serde_json::from_str(line).map_err(|source| FeedError::Json {
                line: idx + 1,
                source,
            })
        })
        .collect()
}
