//! SQLite-backed reference gateway.

use anyhow::{Context, Result};
use log::{debug, warn};
use rusqlite::{Connection, OptionalExtension};
use std::fs;
use std::path::{Path, PathBuf};

use super::{IndexGateway, InsertOutcome, InsertRequest, InstanceMeta, read_instance_meta};
use crate::utils::config::ARCHIVE_FILE_EXTENSION;

/// WAL tuning pragmas. Use after PRAGMA journal_mode = WAL.
const WAL_PRAGMAS: &str = r#"
        PRAGMA synchronous = NORMAL;
        PRAGMA foreign_keys = ON;
        "#;

/// Schema for the patient/study/series/instance tables.
const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS patients (
    patient_key TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    patient_id TEXT NOT NULL
);
CREATE TABLE IF NOT EXISTS studies (
    study_instance_uid TEXT PRIMARY KEY,
    patient_key TEXT NOT NULL REFERENCES patients(patient_key)
);
CREATE TABLE IF NOT EXISTS series (
    series_instance_uid TEXT PRIMARY KEY,
    study_instance_uid TEXT NOT NULL REFERENCES studies(study_instance_uid)
);
CREATE TABLE IF NOT EXISTS instances (
    sop_instance_uid TEXT PRIMARY KEY,
    series_instance_uid TEXT NOT NULL REFERENCES series(series_instance_uid),
    path TEXT NOT NULL
);
"#;

/// Convert a path to the normalized string stored in the DB (forward slashes).
fn path_to_db_string(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Reference [`IndexGateway`]: a local SQLite index of imported instances,
/// organized by patient, study and series identifiers.
///
/// Re-inserting an already-indexed instance updates its stored path and
/// reports no new entities (upsert). Unreadable or malformed files are
/// logged and skipped; they never fail the import pass.
pub struct SqliteIndex {
    conn: Connection,
}

impl SqliteIndex {
    /// Open or create the index DB at `path` and ensure schema + WAL.
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path).context("open index database")?;
        conn.query_row("PRAGMA journal_mode = WAL", [], |_| Ok(()))
            .context("enable WAL")?;
        conn.execute_batch(WAL_PRAGMAS).context("set WAL pragmas")?;
        conn.execute_batch(SCHEMA).context("create schema")?;
        Ok(Self { conn })
    }

    /// Open an in-memory index with the same schema (no WAL pragmas needed).
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().context("open in-memory index")?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")
            .context("set pragmas")?;
        conn.execute_batch(SCHEMA).context("create schema")?;
        Ok(Self { conn })
    }

    /// Upsert one instance and its owning patient/study/series rows in a
    /// single transaction. Returns which rows are new.
    pub fn record_instance(
        &mut self,
        meta: &InstanceMeta,
        stored_path: &Path,
    ) -> Result<InsertOutcome> {
        let tx = self.conn.transaction().context("begin transaction")?;

        let new_patient = tx
            .execute(
                "INSERT OR IGNORE INTO patients (patient_key, name, patient_id) VALUES (?1, ?2, ?3)",
                (
                    meta.patient_key(),
                    meta.patient_name.as_str(),
                    meta.patient_id.as_str(),
                ),
            )
            .context("insert patient")?
            > 0;
        let new_study = tx
            .execute(
                "INSERT OR IGNORE INTO studies (study_instance_uid, patient_key) VALUES (?1, ?2)",
                (meta.study_instance_uid.as_str(), meta.patient_key()),
            )
            .context("insert study")?
            > 0;
        let new_series = tx
            .execute(
                "INSERT OR IGNORE INTO series (series_instance_uid, study_instance_uid) VALUES (?1, ?2)",
                (
                    meta.series_instance_uid.as_str(),
                    meta.study_instance_uid.as_str(),
                ),
            )
            .context("insert series")?
            > 0;

        let already_indexed = tx
            .query_row(
                "SELECT 1 FROM instances WHERE sop_instance_uid = ?1",
                [meta.sop_instance_uid.as_str()],
                |_| Ok(()),
            )
            .optional()
            .context("look up instance")?
            .is_some();
        tx.execute(
            "INSERT OR REPLACE INTO instances (sop_instance_uid, series_instance_uid, path) VALUES (?1, ?2, ?3)",
            (
                meta.sop_instance_uid.as_str(),
                meta.series_instance_uid.as_str(),
                path_to_db_string(stored_path).as_str(),
            ),
        )
        .context("insert instance")?;

        tx.commit().context("commit transaction")?;
        Ok(InsertOutcome {
            new_patient,
            new_study,
            new_series,
            new_instance: !already_indexed,
        })
    }

    /// Number of indexed instances.
    pub fn instance_count(&self) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM instances", [], |row| row.get(0))
            .context("count instances")?;
        Ok(count.max(0) as usize)
    }

    /// Stored path of an instance, if indexed.
    pub fn instance_path(&self, sop_instance_uid: &str) -> Result<Option<String>> {
        self.conn
            .query_row(
                "SELECT path FROM instances WHERE sop_instance_uid = ?1",
                [sop_instance_uid],
                |row| row.get(0),
            )
            .optional()
            .context("look up instance path")
    }
}

/// Copy `path` under `destination/<study-uid>/<series-uid>/<sop-uid>.dcm`.
fn copy_into_archive(path: &Path, destination: &Path, meta: &InstanceMeta) -> Result<PathBuf> {
    let target_dir = destination
        .join(&meta.study_instance_uid)
        .join(&meta.series_instance_uid);
    fs::create_dir_all(&target_dir).context("create archive directory")?;
    let target = target_dir.join(format!(
        "{}.{ARCHIVE_FILE_EXTENSION}",
        meta.sop_instance_uid
    ));
    debug!(
        "copying {} into the archive: {}",
        path.display(),
        target.display()
    );
    fs::copy(path, &target).context("copy file into archive")?;
    Ok(target)
}

impl IndexGateway for SqliteIndex {
    fn insert(&mut self, request: &InsertRequest<'_>) -> crate::Result<InsertOutcome> {
        let Some(meta) = read_instance_meta(request.path) else {
            return Ok(InsertOutcome::default());
        };

        let stored_path = if request.copy_into_archive
            && let Some(destination) = request.destination_directory
        {
            match copy_into_archive(request.path, destination, &meta) {
                Ok(copied) => copied,
                Err(err) => {
                    warn!("skipping {}: {:#}", request.path.display(), err);
                    return Ok(InsertOutcome::default());
                }
            }
        } else {
            request.path.to_path_buf()
        };

        if !request.import_metadata {
            return Ok(InsertOutcome::default());
        }
        self.record_instance(&meta, &stored_path)
    }
}
