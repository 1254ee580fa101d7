//! Catalog record tree: a strict patient → study → series → file hierarchy
//! rebuilt from the catalog's flat directory record sequence.

use log::debug;
use std::path::{Path, PathBuf};

/// Structural role of one raw catalog record. Any non-structural directory
/// record type (IMAGE, RT DOSE, SR DOCUMENT, ...) is a [`RecordKind::Leaf`]:
/// at the fourth level every record is a file candidate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RecordKind {
    Patient,
    Study,
    Series,
    Leaf,
}

/// One item of the directory record sequence, reduced to the fields the
/// importer cares about. A field is `None` when the element is absent or
/// unreadable; a present-but-empty value still counts as resolved.
#[derive(Clone, Debug, Default)]
pub struct RawRecord {
    pub kind: Option<RecordKind>,
    pub name: Option<String>,
    pub study_instance_uid: Option<String>,
    pub series_instance_uid: Option<String>,
    pub sop_instance_uids: Option<Vec<String>>,
    pub referenced_path: Option<String>,
}

#[derive(Clone, Debug, Default)]
pub struct PatientRecord {
    pub name: Option<String>,
    pub studies: Vec<StudyRecord>,
}

#[derive(Clone, Debug, Default)]
pub struct StudyRecord {
    pub study_instance_uid: Option<String>,
    pub series: Vec<SeriesRecord>,
}

#[derive(Clone, Debug, Default)]
pub struct SeriesRecord {
    pub series_instance_uid: Option<String>,
    pub files: Vec<FileRecord>,
}

#[derive(Clone, Debug, Default)]
pub struct FileRecord {
    pub sop_instance_uids: Option<Vec<String>>,
    pub referenced_path: Option<String>,
}

impl PatientRecord {
    /// The identifying name, when it resolved from the record.
    pub fn resolved_name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

impl StudyRecord {
    pub fn resolved_uid(&self) -> Option<&str> {
        self.study_instance_uid.as_deref()
    }
}

impl SeriesRecord {
    pub fn resolved_uid(&self) -> Option<&str> {
        self.series_instance_uid.as_deref()
    }
}

impl FileRecord {
    /// The referenced file path, resolved only when **both** the SOP instance
    /// UID list and the file reference are present.
    pub fn resolved_reference(&self) -> Option<&str> {
        self.sop_instance_uids.as_ref()?;
        self.referenced_path.as_deref()
    }
}

/// Rebuild the 4-level tree from the flat record sequence.
///
/// Catalog writers emit records in hierarchical order, so nesting follows the
/// record type: a PATIENT opens a new patient, a STUDY attaches to the most
/// recent patient, and so on down to leaves. Records with no open parent are
/// dropped.
pub fn build_catalog(records: impl IntoIterator<Item = RawRecord>) -> Vec<PatientRecord> {
    let mut patients: Vec<PatientRecord> = Vec::new();
    for record in records {
        match record.kind {
            Some(RecordKind::Patient) => patients.push(PatientRecord {
                name: record.name,
                studies: Vec::new(),
            }),
            Some(RecordKind::Study) => match patients.last_mut() {
                Some(patient) => patient.studies.push(StudyRecord {
                    study_instance_uid: record.study_instance_uid,
                    series: Vec::new(),
                }),
                None => debug!("dropping study record with no enclosing patient"),
            },
            Some(RecordKind::Series) => {
                match patients.last_mut().and_then(|p| p.studies.last_mut()) {
                    Some(study) => study.series.push(SeriesRecord {
                        series_instance_uid: record.series_instance_uid,
                        files: Vec::new(),
                    }),
                    None => debug!("dropping series record with no enclosing study"),
                }
            }
            Some(RecordKind::Leaf) => {
                let series = patients
                    .last_mut()
                    .and_then(|p| p.studies.last_mut())
                    .and_then(|s| s.series.last_mut());
                match series {
                    Some(series) => series.files.push(FileRecord {
                        sop_instance_uids: record.sop_instance_uids,
                        referenced_path: record.referenced_path,
                    }),
                    None => debug!("dropping file record with no enclosing series"),
                }
            }
            None => debug!("dropping record with no directory record type"),
        }
    }
    patients
}

/// Walk the tree and collect every referenced file path, joined against
/// `catalog_dir` with backslashes normalized to forward slashes.
///
/// A record whose identifier did not resolve stops enumeration of the
/// **remaining siblings at that level** (not just the one bad record), and
/// nothing under it is emitted. Outer levels keep going: a bad study ends
/// that patient's study list, not the patient list.
pub fn referenced_paths(patients: &[PatientRecord], catalog_dir: &Path) -> Vec<PathBuf> {
    let mut paths = Vec::new();
    for patient in patients {
        let Some(name) = patient.resolved_name() else {
            break;
        };
        debug!("reading patient: {name}");
        for study in &patient.studies {
            let Some(study_uid) = study.resolved_uid() else {
                break;
            };
            debug!("reading study: {study_uid}");
            for series in &study.series {
                let Some(series_uid) = series.resolved_uid() else {
                    break;
                };
                debug!("reading series: {series_uid}");
                for file in &series.files {
                    let Some(reference) = file.resolved_reference() else {
                        break;
                    };
                    paths.push(catalog_dir.join(normalize_separators(reference)));
                }
            }
        }
    }
    paths
}

/// Referenced file ids use `\` or `/` as separator; output is always `/`.
pub fn normalize_separators(reference: &str) -> String {
    reference.replace('\\', "/")
}
