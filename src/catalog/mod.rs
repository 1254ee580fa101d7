//! DICOMDIR catalog: record tree, stop-on-invalid emission, file parse.

pub mod parser;
pub mod records;

pub use parser::{CatalogError, parse_catalog, record_fields};
pub use records::{
    FileRecord, PatientRecord, RawRecord, RecordKind, SeriesRecord, StudyRecord, build_catalog,
    normalize_separators, referenced_paths,
};
