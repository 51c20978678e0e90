//! File-level entry points through the facade

use std::fs;

use tempfile::TempDir;
use xcpatch::{patch, PatchConfig, PatchOptions, Patcher, SequentialIds, CONFIG_FILE_NAME};

use super::manifest::ManifestBuilder;

#[test]
fn stock_entry_point_registers_default_pair() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("project.pbxproj");
    fs::write(&path, ManifestBuilder::new().build()).unwrap();

    let report = patch(&path).unwrap();

    assert!(report.written);
    let text = fs::read_to_string(&path).unwrap();
    assert!(text.contains("/* AudioProcessorTestView.swift in Sources */"));
    assert!(text.contains("/* AudioProcessorTestViewModel.swift */ = {isa = PBXFileReference;"));
}

#[test]
fn config_file_drives_a_run() {
    let dir = TempDir::new().unwrap();
    let manifest = dir.path().join("project.pbxproj");
    fs::write(&manifest, ManifestBuilder::new().build()).unwrap();
    fs::write(
        dir.path().join(CONFIG_FILE_NAME),
        format!(
            "project = {:?}\nfeature = \"Recorder\"\nbackup = true\n",
            manifest.display().to_string()
        ),
    )
    .unwrap();

    let config = PatchConfig::discover(dir.path()).unwrap();
    let plan = config.to_plan().unwrap();
    let options = PatchOptions {
        dry_run: false,
        backup: config.backup,
    };
    let report = Patcher::new(SequentialIds::new())
        .patch_file(&config.project, &plan, &options)
        .unwrap();

    assert!(report.is_complete());
    assert!(report.backup.unwrap().exists());
    assert!(fs::read_to_string(&manifest)
        .unwrap()
        .contains("RecorderViewModel.swift"));
}

#[test]
fn non_utf8_manifest_is_rejected_untouched() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("project.pbxproj");
    let mut bytes = ManifestBuilder::new().build().into_bytes();
    bytes.push(0xFF);
    fs::write(&path, &bytes).unwrap();

    assert!(patch(&path).is_err());
    assert_eq!(fs::read(&path).unwrap(), bytes);
}
