//! Persistent index: gateway contract, instance metadata read, SQLite backend.

mod metadata;
mod sqlite;

pub use metadata::{InstanceMeta, read_instance_meta};
pub use sqlite::SqliteIndex;

use crate::Result;
use std::path::Path;

/// One insert call toward the index, as issued by the import coordinator.
#[derive(Clone, Copy, Debug)]
pub struct InsertRequest<'a> {
    /// File to index.
    pub path: &'a Path,
    /// Copy the file into `destination_directory` before indexing it.
    /// Set iff a destination directory was given for the pass.
    pub copy_into_archive: bool,
    /// Extract and store instance metadata (always set by the coordinator).
    pub import_metadata: bool,
    /// Request thumbnail generation from gateways that support it.
    pub generate_thumbnail: bool,
    /// Directory the import pass was started from.
    pub source_directory: &'a Path,
    /// Archive directory for copies, when `copy_into_archive` is set.
    pub destination_directory: Option<&'a Path>,
}

/// Which index entities a successful insert created, reported back for
/// UI/summary aggregation. All false when the gateway skipped the file.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InsertOutcome {
    pub new_patient: bool,
    pub new_study: bool,
    pub new_series: bool,
    pub new_instance: bool,
}

/// Contract toward the persistent index.
///
/// Implementations are expected to be idempotent-safe for re-import of an
/// already-indexed file (upsert semantics) and to isolate ordinary per-file
/// decode/storage problems internally (log, return a zeroed outcome) rather
/// than returning `Err`. An `Err` is treated as fatal by the coordinator:
/// it aborts the remaining import.
pub trait IndexGateway {
    fn insert(&mut self, request: &InsertRequest<'_>) -> Result<InsertOutcome>;
}
