//! Progress bar utilities and the event-consumer thread for the CLI.

use kdam::{Animation, Bar, BarExt};
use log::debug;
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};

use crossbeam_channel::Receiver;

use crate::import::ImportEvent;

// Progress bar type alias
pub type ProgressBar = Arc<Mutex<Bar>>;

/// Create a progress bar; total is updated once `FoundFilesToIndex` arrives.
pub fn create_progress_bar(desc: &'static str) -> ProgressBar {
    Arc::new(Mutex::new(kdam::tqdm!(
        total = 1,
        desc = desc,
        animation = Animation::Classic
    )))
}

/// Update the bar's total (set once the scan reports its count). Refreshes the display.
pub fn set_bar_total(pb: &ProgressBar, total: usize) {
    if let Ok(mut bar) = pb.try_lock() {
        bar.total = total;
        let _ = bar.refresh();
    }
}

/// Update progress bar if available.
/// Uses try_lock to avoid blocking if mutex is contended (non-blocking).
pub fn update_progress_bar(pb: &ProgressBar, n: usize) {
    if let Ok(mut pb) = pb.try_lock() {
        let _ = pb.update(n);
    }
}

/// Consume import events on a helper thread, driving the progress bar.
///
/// The import loop blocks the calling thread, so the bar has to be fed from
/// a second one. Returns when `IndexingComplete` arrives or the sink side is
/// dropped (e.g. the import errored before completing).
pub fn spawn_event_consumer(events: Receiver<ImportEvent>, show_bar: bool) -> JoinHandle<()> {
    thread::spawn(move || {
        let bar = show_bar.then(|| create_progress_bar("Indexing"));
        for event in events {
            match event {
                ImportEvent::FoundFilesToIndex(count) => {
                    debug!("found {count} files to index");
                    if let Some(bar) = &bar {
                        set_bar_total(bar, count);
                    }
                }
                ImportEvent::IndexingFilePath(path) => {
                    debug!("indexing {}", path.display());
                    if let Some(bar) = &bar {
                        update_progress_bar(bar, 1);
                    }
                }
                ImportEvent::Progress(percent) => debug!("progress: {percent}%"),
                ImportEvent::IndexingComplete => break,
            }
        }
    })
}
