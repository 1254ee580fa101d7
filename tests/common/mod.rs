//! Shared test fixtures: generated DICOM instance files and DICOMDIR catalogs.

#![allow(dead_code)]

use dicom::core::value::DataSetSequence;
use dicom::core::{DataElement, PrimitiveValue, VR};
use dicom::dictionary_std::tags;
use dicom::object::{FileMetaTableBuilder, InMemDicomObject};
use std::path::{Path, PathBuf};

/// Media Storage Directory Storage (the DICOMDIR SOP class).
pub const DIRECTORY_STORAGE_UID: &str = "1.2.840.10008.1.3.10";
/// Secondary Capture Image Storage, used for generated instances.
pub const SECONDARY_CAPTURE_UID: &str = "1.2.840.10008.5.1.4.1.1.7";
/// Explicit VR Little Endian.
pub const TRANSFER_SYNTAX_UID: &str = "1.2.840.10008.1.2.1";

/// Per-test fixture directory under `tests/fixtures`, created on demand.
pub fn fixtures_dir(case: &str) -> PathBuf {
    let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(case);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

/// Write a minimal DICOM instance file carrying the identifying attributes.
pub fn write_instance(path: &Path, patient_name: &str, patient_id: &str, study: &str, series: &str, sop: &str) {
    let dataset = InMemDicomObject::from_element_iter([
        DataElement::new(
            tags::SOP_CLASS_UID,
            VR::UI,
            PrimitiveValue::from(SECONDARY_CAPTURE_UID),
        ),
        DataElement::new(tags::SOP_INSTANCE_UID, VR::UI, PrimitiveValue::from(sop)),
        DataElement::new(tags::PATIENT_NAME, VR::PN, PrimitiveValue::from(patient_name)),
        DataElement::new(tags::PATIENT_ID, VR::LO, PrimitiveValue::from(patient_id)),
        DataElement::new(tags::STUDY_INSTANCE_UID, VR::UI, PrimitiveValue::from(study)),
        DataElement::new(
            tags::SERIES_INSTANCE_UID,
            VR::UI,
            PrimitiveValue::from(series),
        ),
    ]);
    dataset
        .with_meta(
            FileMetaTableBuilder::new()
                .media_storage_sop_class_uid(SECONDARY_CAPTURE_UID)
                .media_storage_sop_instance_uid(sop)
                .transfer_syntax(TRANSFER_SYNTAX_UID),
        )
        .unwrap()
        .write_to_file(path)
        .unwrap();
}

/// Write a DICOMDIR file under `dir` whose directory record sequence holds
/// `records` in order.
pub fn write_dicomdir(dir: &Path, records: Vec<InMemDicomObject>) {
    let dataset = InMemDicomObject::from_element_iter([DataElement::new(
        tags::DIRECTORY_RECORD_SEQUENCE,
        VR::SQ,
        DataSetSequence::from(records),
    )]);
    dataset
        .with_meta(
            FileMetaTableBuilder::new()
                .media_storage_sop_class_uid(DIRECTORY_STORAGE_UID)
                .media_storage_sop_instance_uid("2.25.4242")
                .transfer_syntax(TRANSFER_SYNTAX_UID),
        )
        .unwrap()
        .write_to_file(dir.join("DICOMDIR"))
        .unwrap();
}

/// A DICOM file with file meta but no directory record sequence.
pub fn write_dicom_without_record_sequence(dir: &Path) {
    let dataset = InMemDicomObject::from_element_iter([DataElement::new(
        tags::SOP_INSTANCE_UID,
        VR::UI,
        PrimitiveValue::from("2.25.4243"),
    )]);
    dataset
        .with_meta(
            FileMetaTableBuilder::new()
                .media_storage_sop_class_uid(DIRECTORY_STORAGE_UID)
                .media_storage_sop_instance_uid("2.25.4243")
                .transfer_syntax(TRANSFER_SYNTAX_UID),
        )
        .unwrap()
        .write_to_file(dir.join("DICOMDIR"))
        .unwrap();
}

// --- directory record items ---

pub fn patient_item(name: Option<&str>) -> InMemDicomObject {
    let mut elements = vec![DataElement::new(
        tags::DIRECTORY_RECORD_TYPE,
        VR::CS,
        PrimitiveValue::from("PATIENT"),
    )];
    if let Some(name) = name {
        elements.push(DataElement::new(
            tags::PATIENT_NAME,
            VR::PN,
            PrimitiveValue::from(name),
        ));
    }
    InMemDicomObject::from_element_iter(elements)
}

pub fn study_item(uid: Option<&str>) -> InMemDicomObject {
    let mut elements = vec![DataElement::new(
        tags::DIRECTORY_RECORD_TYPE,
        VR::CS,
        PrimitiveValue::from("STUDY"),
    )];
    if let Some(uid) = uid {
        elements.push(DataElement::new(
            tags::STUDY_INSTANCE_UID,
            VR::UI,
            PrimitiveValue::from(uid),
        ));
    }
    InMemDicomObject::from_element_iter(elements)
}

pub fn series_item(uid: Option<&str>) -> InMemDicomObject {
    let mut elements = vec![DataElement::new(
        tags::DIRECTORY_RECORD_TYPE,
        VR::CS,
        PrimitiveValue::from("SERIES"),
    )];
    if let Some(uid) = uid {
        elements.push(DataElement::new(
            tags::SERIES_INSTANCE_UID,
            VR::UI,
            PrimitiveValue::from(uid),
        ));
    }
    InMemDicomObject::from_element_iter(elements)
}

pub fn image_item(sop: Option<&str>, file_id: Option<&str>) -> InMemDicomObject {
    let mut elements = vec![DataElement::new(
        tags::DIRECTORY_RECORD_TYPE,
        VR::CS,
        PrimitiveValue::from("IMAGE"),
    )];
    if let Some(sop) = sop {
        elements.push(DataElement::new(
            tags::REFERENCED_SOP_INSTANCE_UID_IN_FILE,
            VR::UI,
            PrimitiveValue::from(sop),
        ));
    }
    if let Some(file_id) = file_id {
        elements.push(DataElement::new(
            tags::REFERENCED_FILE_ID,
            VR::CS,
            PrimitiveValue::from(file_id),
        ));
    }
    InMemDicomObject::from_element_iter(elements)
}
