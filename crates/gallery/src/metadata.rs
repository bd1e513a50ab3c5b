//! One-shot project metadata fetch.
//!
//! The fetch runs on a background thread and reports back over a channel.
//! The frame loop drains that channel at the start of a tick and applies the
//! result as one batch, so the registry never sees a partial load.

use crossbeam_channel::{bounded, Receiver, TryRecvError};
use engine_core::ProjectRecord;
use serde_json::Value;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MetadataError {
    #[error("could not read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("JSON error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("expected a JSON array of projects, found {0}")]
    NotAnArray(&'static str),
    #[error("metadata fetch ended without a result")]
    Disconnected,
}

pub type FetchResult = Result<Vec<ProjectRecord>, MetadataError>;

/// Where project metadata comes from. Read exactly once per session.
pub trait MetadataSource: Send + 'static {
    fn fetch(&self) -> FetchResult;

    /// For log lines.
    fn describe(&self) -> String;
}

/// JSON file at a fixed path.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl MetadataSource for FileSource {
    fn fetch(&self) -> FetchResult {
        let text = std::fs::read_to_string(&self.path).map_err(|source| MetadataError::Io {
            path: self.path.clone(),
            source,
        })?;
        parse_records(&text)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Parse a JSON array of project objects.
///
/// The document must be an array. Entries that are not objects, or whose
/// known fields have the wrong type, are skipped with a warning rather than
/// failing the whole batch.
pub fn parse_records(text: &str) -> FetchResult {
    let document: Value = serde_json::from_str(text)?;
    let entries = match document {
        Value::Array(entries) => entries,
        Value::Object(_) => return Err(MetadataError::NotAnArray("an object")),
        Value::String(_) => return Err(MetadataError::NotAnArray("a string")),
        Value::Number(_) => return Err(MetadataError::NotAnArray("a number")),
        Value::Bool(_) => return Err(MetadataError::NotAnArray("a boolean")),
        Value::Null => return Err(MetadataError::NotAnArray("null")),
    };

    let mut records = Vec::with_capacity(entries.len());
    for (index, entry) in entries.into_iter().enumerate() {
        match serde_json::from_value::<ProjectRecord>(entry) {
            Ok(record) => records.push(record),
            Err(e) => log::warn!("skipping project entry {}: {}", index, e),
        }
    }
    Ok(records)
}

/// Progress of a [`MetadataTask`].
#[derive(Debug)]
pub enum FetchStatus {
    Pending,
    Ready(FetchResult),
}

/// Handle to an in-flight fetch. Yields its result exactly once.
#[derive(Debug)]
pub struct MetadataTask {
    rx: Receiver<FetchResult>,
}

impl MetadataTask {
    /// Start fetching from `source` on a background thread.
    pub fn spawn<S: MetadataSource>(source: S) -> Self {
        let (tx, rx) = bounded(1);
        let label = source.describe();
        let spawned = std::thread::Builder::new()
            .name("metadata-fetch".into())
            .spawn(move || {
                let result = source.fetch();
                // Receiver may be gone if the session ended first.
                let _ = tx.send(result);
            });
        if let Err(e) = spawned {
            log::warn!("could not start metadata fetch for {}: {}", label, e);
        } else {
            log::info!("fetching project metadata from {}", label);
        }
        Self { rx }
    }

    /// A task that has already finished with `result`.
    pub fn ready(result: FetchResult) -> Self {
        let (tx, rx) = bounded(1);
        let _ = tx.send(result);
        Self { rx }
    }

    /// Non-blocking check. A worker that died without reporting counts as a
    /// failed fetch.
    pub fn poll(&self) -> FetchStatus {
        match self.rx.try_recv() {
            Ok(result) => FetchStatus::Ready(result),
            Err(TryRecvError::Empty) => FetchStatus::Pending,
            Err(TryRecvError::Disconnected) => FetchStatus::Ready(Err(MetadataError::Disconnected)),
        }
    }
}
