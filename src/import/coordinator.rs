//! Sequential import loop: progress, cancellation, per-file delegation.

use log::debug;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use super::events::EventSink;
use crate::Result;
use crate::scanner::scan_directory;
use crate::store::{IndexGateway, InsertOutcome, InsertRequest};
use crate::types::ImportSummary;

/// Clonable handle for requesting cancellation from another thread
/// (e.g. a Ctrl+C handler). Observed at the next iteration boundary.
#[derive(Clone)]
pub struct CancelHandle(Arc<AtomicBool>);

impl CancelHandle {
    pub fn request(&self) {
        self.0.store(true, Ordering::Relaxed);
    }
}

/// Drives sequential import of a path list into an [`IndexGateway`]:
/// one insert per file, progress events before each insert, cancellation
/// checked only between files.
///
/// One pass at a time: a fresh `import_paths` call resets the cancellation
/// flag, so calls on the same coordinator are expected to be sequential and
/// non-overlapping.
#[derive(Default)]
pub struct ImportCoordinator {
    canceled: Arc<AtomicBool>,
    events: EventSink,
}

impl ImportCoordinator {
    pub fn new(events: EventSink) -> Self {
        Self {
            canceled: Arc::new(AtomicBool::new(false)),
            events,
        }
    }

    /// Handle observed at iteration boundaries of the current (and any
    /// future) pass on this coordinator.
    pub fn cancel_handle(&self) -> CancelHandle {
        CancelHandle(Arc::clone(&self.canceled))
    }

    /// Request cancellation of the running pass. The current file finishes;
    /// paths after it are never processed.
    pub fn request_cancel(&self) {
        self.canceled.store(true, Ordering::Relaxed);
    }

    /// Import everything under `directory`: route through the catalog parser
    /// when a `DICOMDIR` is present, flat-enumerate otherwise, then run the
    /// import pass over the resulting list.
    pub fn import_directory(
        &self,
        gateway: &mut dyn IndexGateway,
        directory: &Path,
        destination: Option<&Path>,
    ) -> Result<ImportSummary> {
        let paths = scan_directory(directory, &self.events)?;
        self.import_paths(gateway, &paths, directory, destination)
    }

    /// Import an explicit path list. Emits `FoundFilesToIndex` for the list
    /// before the pass (the directory scan does this itself).
    pub fn import_files(
        &self,
        gateway: &mut dyn IndexGateway,
        paths: &[PathBuf],
        source: &Path,
        destination: Option<&Path>,
    ) -> Result<ImportSummary> {
        self.events.found_files(paths.len());
        self.import_paths(gateway, paths, source, destination)
    }

    /// Insert a single file, outside any pass: no progress or completion
    /// events, just the `IndexingFilePath` notification and the insert.
    pub fn import_file(
        &self,
        gateway: &mut dyn IndexGateway,
        path: &Path,
        source: &Path,
        destination: Option<&Path>,
    ) -> Result<InsertOutcome> {
        debug!("currently processing {}", path.display());
        self.events.indexing_file(path);
        gateway.insert(&InsertRequest {
            path,
            copy_into_archive: destination.is_some(),
            import_metadata: true,
            generate_thumbnail: true,
            source_directory: source,
            destination_directory: destination,
        })
    }

    /// Run one import pass over `paths`, in order.
    ///
    /// Per file `i`: emit `Progress(100 * i / n)` and `IndexingFilePath`,
    /// invoke the gateway insert, then check the cancellation flag and stop
    /// before file `i + 1` if it was set. Ends with exactly one
    /// `IndexingComplete` whether the list was exhausted or the pass was
    /// cancelled; `ImportSummary::canceled` tells them apart. An `Err` from
    /// the gateway aborts the pass immediately (no completion event).
    pub fn import_paths(
        &self,
        gateway: &mut dyn IndexGateway,
        paths: &[PathBuf],
        source: &Path,
        destination: Option<&Path>,
    ) -> Result<ImportSummary> {
        // A fresh pass always starts cancelable-and-uncancelled.
        self.canceled.store(false, Ordering::Relaxed);

        let mut summary = ImportSummary {
            total: paths.len(),
            ..Default::default()
        };
        if let Some(destination) = destination {
            debug!("destination directory is set to {}", destination.display());
        }

        for (index, path) in paths.iter().enumerate() {
            let percent = (100 * index / paths.len()) as u8;
            self.events.progress(percent);

            let outcome = self.import_file(gateway, path, source, destination)?;
            summary.absorb(outcome);
            summary.processed += 1;

            if self.canceled.load(Ordering::Relaxed) {
                summary.canceled = true;
                break;
            }
        }

        self.events.complete();
        Ok(summary)
    }
}
