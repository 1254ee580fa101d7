//! Catalog parse: open a DICOMDIR file and extract the referenced file paths.

use dicom::core::Tag;
use dicom::dictionary_std::tags;
use dicom::object::{InMemDicomObject, open_file};
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::records::{RawRecord, RecordKind, build_catalog, referenced_paths};
use crate::import::EventSink;
use crate::utils::config::CATALOG_FILENAME;

/// Catalog-level failures. Partial or malformed *branches* are not errors
/// (they truncate their sibling level); these cover the whole-file cases
/// where no result can be produced at all.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("cannot read catalog {path}: {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: dicom::object::ReadError,
    },
    #[error("catalog {path} has no directory record sequence")]
    MissingRecordSequence { path: PathBuf },
}

fn element_str(record: &InMemDicomObject, tag: Tag) -> Option<String> {
    record
        .element(tag)
        .ok()
        .and_then(|e| e.to_str().ok())
        .map(|s| s.trim_end_matches(['\0', ' ']).to_string())
}

/// Reduce one directory record item to the fields the tree builder uses.
pub fn record_fields(record: &InMemDicomObject) -> RawRecord {
    let kind = element_str(record, tags::DIRECTORY_RECORD_TYPE).map(|t| match t.as_str() {
        "PATIENT" => RecordKind::Patient,
        "STUDY" => RecordKind::Study,
        "SERIES" => RecordKind::Series,
        _ => RecordKind::Leaf,
    });
    RawRecord {
        kind,
        name: element_str(record, tags::PATIENT_NAME),
        study_instance_uid: element_str(record, tags::STUDY_INSTANCE_UID),
        series_instance_uid: element_str(record, tags::SERIES_INSTANCE_UID),
        sop_instance_uids: element_str(record, tags::REFERENCED_SOP_INSTANCE_UID_IN_FILE)
            .map(|s| s.split('\\').map(String::from).collect()),
        referenced_path: element_str(record, tags::REFERENCED_FILE_ID),
    }
}

/// Parse the catalog at `catalog_dir/DICOMDIR` into an ordered list of
/// referenced instance paths, relative references joined against
/// `catalog_dir`.
///
/// Fails when the catalog file cannot be opened or its record sequence is
/// absent; no partial result is attempted in that case. Emits
/// `FoundFilesToIndex` with the collected count before returning.
pub fn parse_catalog(
    catalog_dir: &Path,
    events: &EventSink,
) -> Result<Vec<PathBuf>, CatalogError> {
    let catalog_path = catalog_dir.join(CATALOG_FILENAME);
    let object = open_file(&catalog_path).map_err(|source| CatalogError::Unreadable {
        path: catalog_path.clone(),
        source,
    })?;

    let records = object
        .element(tags::DIRECTORY_RECORD_SEQUENCE)
        .ok()
        .and_then(|e| e.items())
        .ok_or(CatalogError::MissingRecordSequence { path: catalog_path })?;

    let patients = build_catalog(records.iter().map(record_fields));
    let paths = referenced_paths(&patients, catalog_dir);

    events.found_files(paths.len());
    Ok(paths)
}
