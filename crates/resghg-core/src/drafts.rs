//! Draft persistence.
//!
//! Drafts are analysis requests saved before submission. Storage is an
//! append-only JSONL file: one draft per line, newest last. Appending
//! never rewrites earlier lines, so a crash mid-write loses at most the
//! line being written.

use crate::analysis::AnalysisRequest;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::Path;
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DraftStatus {
    Saved,
    Submitted,
}

/// One saved draft.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Draft {
    pub request: AnalysisRequest,
    pub created_at: DateTime<Utc>,
    pub status: DraftStatus,
}

impl Draft {
    pub fn new(request: AnalysisRequest) -> Self {
        Draft {
            request,
            created_at: Utc::now(),
            status: DraftStatus::Saved,
        }
    }

    /// The submitted record appended when the request is actually run.
    /// The saved draft stays in place; the store is append-only.
    pub fn submitted(request: AnalysisRequest) -> Self {
        Draft {
            request,
            created_at: Utc::now(),
            status: DraftStatus::Submitted,
        }
    }
}

#[derive(Debug, Error)]
pub enum DraftStoreError {
    #[error("draft store io: {0}")]
    Io(#[from] std::io::Error),
    #[error("draft encoding: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Append one draft to the store, creating the file if needed.
pub fn append(path: &Path, draft: &Draft) -> Result<(), DraftStoreError> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    let line = serde_json::to_string(draft)?;
    file.write_all(line.as_bytes())?;
    file.write_all(b"\n")?;
    Ok(())
}

/// Load every draft in the store, oldest first.
///
/// Unparseable lines are skipped with a warning rather than failing the
/// whole load; a missing file is an empty store.
pub fn load(path: &Path) -> Result<Vec<Draft>, DraftStoreError> {
    let file = match File::open(path) {
        Ok(f) => f,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e.into()),
    };
    let mut drafts = Vec::new();
    for (idx, line) in BufReader::new(file).lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        match serde_json::from_str(&line) {
            Ok(draft) => drafts.push(draft),
            Err(e) => warn!(line = idx + 1, error = %e, "skipping malformed draft line"),
        }
    }
    Ok(drafts)
}
