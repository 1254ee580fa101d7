//! Observational event stream emitted during scan and import.

use crossbeam_channel::{Receiver, Sender, unbounded};
use std::path::{Path, PathBuf};

/// Events emitted toward observers (progress UI, logging). Ordering per
/// import pass: one `FoundFilesToIndex` after the path list is computed,
/// then per file a `Progress` and an `IndexingFilePath` immediately before
/// its insert, then exactly one `IndexingComplete` when the loop ends,
/// whether it ran to exhaustion or was cancelled.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ImportEvent {
    FoundFilesToIndex(usize),
    /// Integer percent 0–100, `floor(100 * processed / total)`.
    Progress(u8),
    IndexingFilePath(PathBuf),
    IndexingComplete,
}

/// Fire-and-forget sender for [`ImportEvent`]s. Sends never block and a
/// dropped receiver never fails the import.
#[derive(Clone, Default)]
pub struct EventSink {
    tx: Option<Sender<ImportEvent>>,
}

impl EventSink {
    /// A sink that discards every event.
    pub fn none() -> Self {
        Self::default()
    }

    /// A sink paired with a receiver for observers.
    pub fn channel() -> (Self, Receiver<ImportEvent>) {
        let (tx, rx) = unbounded();
        (Self { tx: Some(tx) }, rx)
    }

    fn send(&self, event: ImportEvent) {
        if let Some(tx) = &self.tx {
            let _ = tx.send(event);
        }
    }

    pub fn found_files(&self, count: usize) {
        self.send(ImportEvent::FoundFilesToIndex(count));
    }

    pub fn progress(&self, percent: u8) {
        self.send(ImportEvent::Progress(percent));
    }

    pub fn indexing_file(&self, path: &Path) {
        self.send(ImportEvent::IndexingFilePath(path.to_path_buf()));
    }

    pub fn complete(&self) {
        self.send(ImportEvent::IndexingComplete);
    }
}
