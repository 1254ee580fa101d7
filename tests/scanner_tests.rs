//! Scanner tests: flat enumeration and catalog routing.

mod common;

use dicomdex::catalog::CatalogError;
use dicomdex::import::{EventSink, ImportEvent};
use dicomdex::scanner::scan_directory;
use std::fs;

#[test]
fn test_flat_scan_lists_all_regular_files() {
    let dir = common::fixtures_dir("scan_flat");
    fs::write(dir.join("a.dcm"), b"x").unwrap();
    fs::create_dir_all(dir.join("sub/deep")).unwrap();
    fs::write(dir.join("sub/b.dcm"), b"x").unwrap();
    fs::write(dir.join("sub/deep/c"), b"x").unwrap();

    let (events, rx) = EventSink::channel();
    let mut paths = scan_directory(&dir, &events).unwrap();
    paths.sort();
    assert_eq!(
        paths,
        vec![
            dir.join("a.dcm"),
            dir.join("sub/b.dcm"),
            dir.join("sub/deep/c"),
        ]
    );
    assert_eq!(
        rx.try_iter().collect::<Vec<_>>(),
        vec![ImportEvent::FoundFilesToIndex(3)]
    );
}

#[test]
fn test_empty_tree_yields_empty_list() {
    let dir = common::fixtures_dir("scan_empty");
    let (events, rx) = EventSink::channel();
    let paths = scan_directory(&dir, &events).unwrap();
    assert!(paths.is_empty());
    assert_eq!(
        rx.try_iter().collect::<Vec<_>>(),
        vec![ImportEvent::FoundFilesToIndex(0)]
    );
}

#[test]
fn test_catalog_presence_routes_to_parser_not_flat_walk() {
    // Sibling files exist, but the DICOMDIR decides the strategy: the scan
    // returns only what the catalog references, not the directory contents.
    let dir = common::fixtures_dir("scan_routed");
    fs::write(dir.join("unrelated.dcm"), b"x").unwrap();
    common::write_dicomdir(
        &dir,
        vec![
            common::patient_item(Some("A")),
            common::study_item(Some("1.2.1")),
            common::series_item(Some("1.3.1")),
            common::image_item(Some("1.4.1"), Some("IMG00001")),
        ],
    );

    let paths = scan_directory(&dir, &EventSink::none()).unwrap();
    assert_eq!(paths, vec![dir.join("IMG00001")]);
}

#[test]
fn test_unreadable_catalog_propagates_without_fallback() {
    // Once DICOMDIR presence is detected, a broken catalog is an error; the
    // scanner never falls back to flat enumeration of the siblings.
    let dir = common::fixtures_dir("scan_no_fallback");
    fs::write(dir.join("DICOMDIR"), b"garbage").unwrap();
    fs::write(dir.join("sibling.dcm"), b"x").unwrap();

    let err = scan_directory(&dir, &EventSink::none()).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<CatalogError>(),
        Some(CatalogError::Unreadable { .. })
    ));
}
