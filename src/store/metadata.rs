//! Instance metadata read: the identifying UIDs of a single DICOM file.

use dicom::dictionary_std::tags;
use dicom::object::open_file;
use log::warn;
use std::path::Path;

/// Identifiers extracted from one instance file. The three UIDs are required;
/// patient name and id may be empty (not every modality writes both).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InstanceMeta {
    pub patient_name: String,
    pub patient_id: String,
    pub study_instance_uid: String,
    pub series_instance_uid: String,
    pub sop_instance_uid: String,
}

impl InstanceMeta {
    /// Key under which the patient is stored: the id when present, else the name.
    pub fn patient_key(&self) -> &str {
        if self.patient_id.is_empty() {
            &self.patient_name
        } else {
            &self.patient_id
        }
    }
}

/// Read the identifying metadata of the instance at `path`.
///
/// Returns `None` (after a warn log) for unreadable or non-DICOM files and for
/// files missing any required UID. Malformed individual files never abort an
/// import pass.
pub fn read_instance_meta(path: &Path) -> Option<InstanceMeta> {
    let object = match open_file(path) {
        Ok(object) => object,
        Err(err) => {
            warn!("skipping {}: {}", path.display(), err);
            return None;
        }
    };

    let element_str = |tag: dicom::core::Tag| {
        object
            .element(tag)
            .ok()
            .and_then(|e| e.to_str().ok())
            .map(|s| s.trim_end_matches(['\0', ' ']).to_string())
    };

    let study_instance_uid = element_str(tags::STUDY_INSTANCE_UID);
    let series_instance_uid = element_str(tags::SERIES_INSTANCE_UID);
    let sop_instance_uid = element_str(tags::SOP_INSTANCE_UID);

    let (Some(study_instance_uid), Some(series_instance_uid), Some(sop_instance_uid)) =
        (study_instance_uid, series_instance_uid, sop_instance_uid)
    else {
        warn!(
            "skipping {}: missing study/series/SOP instance UID",
            path.display()
        );
        return None;
    };

    Some(InstanceMeta {
        patient_name: element_str(tags::PATIENT_NAME).unwrap_or_default(),
        patient_id: element_str(tags::PATIENT_ID).unwrap_or_default(),
        study_instance_uid,
        series_instance_uid,
        sop_instance_uid,
    })
}
