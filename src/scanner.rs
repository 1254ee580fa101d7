//! Directory scan: catalog detection and flat file-tree enumeration.

use log::{debug, warn};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::Result;
use crate::catalog::parse_catalog;
use crate::import::EventSink;
use crate::utils::config::CATALOG_FILENAME;

/// Produce the ordered list of candidate files under `root`.
///
/// When `root/DICOMDIR` exists the whole scan is delegated to the catalog
/// parser, never the flat walk, regardless of what else sits next to the
/// catalog; catalog errors propagate (no fallback). Otherwise every
/// regular file under `root` is collected recursively in traversal order;
/// an empty tree yields an empty list. Either way `FoundFilesToIndex` is
/// emitted with the final count before returning.
pub fn scan_directory(root: &Path, events: &EventSink) -> Result<Vec<PathBuf>> {
    if root.join(CATALOG_FILENAME).is_file() {
        debug!("catalog found under {}", root.display());
        return Ok(parse_catalog(root, events)?);
    }

    debug!("iterating subdirs of {}", root.display());
    let mut files = Vec::new();
    for entry in WalkDir::new(root) {
        match entry {
            Ok(entry) => {
                if entry.file_type().is_file() {
                    files.push(entry.into_path());
                }
            }
            Err(err) => warn!("skipping unreadable path during scan: {err}"),
        }
    }
    events.found_files(files.len());
    Ok(files)
}
