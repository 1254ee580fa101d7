//! Application configuration constants.
//! Filenames and archive layout in one place.

use std::sync::OnceLock;

/// Catalog filename the scanner probes for. Must be this exact name, directly
/// under the scanned root, to route the import through the catalog parser.
pub const CATALOG_FILENAME: &str = "DICOMDIR";

/// Extension given to instance files copied into an archive directory.
pub const ARCHIVE_FILE_EXTENSION: &str = "dcm";

// ---- Package / paths (from CARGO_PKG_NAME, cached) ----

/// Package-derived paths: built once from `CARGO_PKG_NAME`, then cached.
pub struct PackagePaths {
    pkg_name: &'static str,
    db_filename: String,
}

static PACKAGE_PATHS: OnceLock<PackagePaths> = OnceLock::new();

impl PackagePaths {
    /// Build and cache paths from `CARGO_PKG_NAME`. Called once on first use.
    pub fn get() -> &'static PackagePaths {
        PACKAGE_PATHS.get_or_init(|| {
            let pkg = env!("CARGO_PKG_NAME");
            PackagePaths {
                pkg_name: pkg,
                db_filename: format!(".{pkg}"),
            }
        })
    }

    pub fn pkg_name(&self) -> &str {
        self.pkg_name
    }

    /// Default index database filename (`.dicomdex`), placed in the imported directory.
    pub fn index_filename(&self) -> &str {
        &self.db_filename
    }
}
