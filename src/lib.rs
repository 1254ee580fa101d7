//! Dicomdex: DICOM archive indexer with catalog-aware directory import

pub mod catalog;
pub mod engine;
pub mod import;
pub mod scanner;
pub mod store;
pub mod types;
pub mod utils;

/// Re-export types for API
pub use types::*;

use std::path::Path;

use import::{EventSink, ImportCoordinator};
use store::SqliteIndex;

/// Result alias used by public dicomdex API
pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, Error>;

/// Single entry point: import everything under `root` into the SQLite index
/// at `index_db`, copying files into `destination` when given.
///
/// Routing follows the scanner: a `DICOMDIR` directly under `root` makes this
/// a catalog import, otherwise a flat recursive one. For progress events or
/// cancellation, build an [`ImportCoordinator`] with an
/// [`EventSink::channel`] instead; this convenience runs unobserved.
pub fn import_dir(
    root: &Path,
    index_db: &Path,
    destination: Option<&Path>,
) -> Result<ImportSummary> {
    let mut index = SqliteIndex::open(index_db)?;
    let coordinator = ImportCoordinator::new(EventSink::none());
    coordinator.import_directory(&mut index, root, destination)
}
