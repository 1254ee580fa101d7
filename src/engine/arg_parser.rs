use clap::Parser;
use std::path::PathBuf;

use crate::utils::config::PackagePaths;

struct DefaultArgs;

impl DefaultArgs {
    pub const DIR: &'static str = ".";
}

/// DICOM archive indexer.
#[derive(Clone, Parser)]
#[command(name = "dicomdex")]
#[command(about = "Import a DICOM directory or DICOMDIR catalog into a local index.")]
pub struct Cli {
    /// Directory to import. A DICOMDIR file directly under it routes the
    /// import through the catalog; otherwise every file is considered.
    #[arg(value_name = "DIR", default_value = DefaultArgs::DIR)]
    pub dir: PathBuf,

    /// Path to the index database. Default: `.dicomdex` in DIR.
    #[arg(long, short)]
    pub db: Option<PathBuf>,

    /// Copy imported files into this archive directory, organized by
    /// study/series/instance UID.
    #[arg(long, value_name = "DIR")]
    pub copy_to: Option<PathBuf>,

    /// Print the import summary as JSON (suppresses the progress bar).
    #[arg(long)]
    pub json: bool,

    /// Verbose output.
    #[arg(long, short = 'v')]
    pub verbose: bool,
}

impl Cli {
    /// Get the database path, defaulting to the package index filename in the
    /// imported directory.
    pub fn db_path(&self) -> PathBuf {
        self.db
            .clone()
            .unwrap_or_else(|| self.dir.join(PackagePaths::get().index_filename()))
    }
}
