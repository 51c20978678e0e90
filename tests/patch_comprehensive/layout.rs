//! Output layout follows the surrounding text

use xcpatch::pbxproj::Document;
use xcpatch::PatchPlan;

use super::manifest::{ManifestBuilder, Section, FEATURES_ID, SOURCES_ID};
use super::{members, patch_seq, seq};

#[test]
fn space_indented_lists_keep_their_indent() {
    let src = ManifestBuilder::new()
        .indent("    ")
        .feature_child("C00000000000000000000001")
        .source_file("C00000000000000000000002")
        .build();
    let patched = patch_seq(&src, &PatchPlan::for_feature("Audio"));

    assert!(patched.text.contains(&format!(
        "                C00000000000000000000001 /* Child */,\n                {} /* Audio */,\n",
        seq(5)
    )));
    assert!(patched.text.contains(&format!(
        "                {} /* AudioView.swift in Sources */,\n",
        seq(3)
    )));
}

#[test]
fn empty_lists_get_one_member_per_line() {
    let src = ManifestBuilder::new().build();
    let patched = patch_seq(&src, &PatchPlan::for_feature("Audio"));

    assert!(patched.text.contains(&format!(
        "\t\t\tfiles = (\n\t\t\t\t{} /* AudioView.swift in Sources */,\n\t\t\t\t{} /* AudioViewModel.swift in Sources */,\n\t\t\t);",
        seq(3),
        seq(4)
    )));
}

#[test]
fn compact_list_on_one_line_stays_valid() {
    let src = ManifestBuilder::new().build().replace(
        "\t\t\tchildren = (\n\t\t\t);\n\t\t\tpath = Features;",
        "\t\t\tchildren = (C00000000000000000000001, C00000000000000000000002);\n\t\t\tpath = Features;",
    );
    let patched = patch_seq(&src, &PatchPlan::for_feature("Audio"));

    assert!(patched
        .text
        .contains("(C00000000000000000000001, C00000000000000000000002,\n"));
    let doc = Document::parse(patched.text).unwrap();
    assert_eq!(
        members(&doc, FEATURES_ID, "children"),
        vec![
            "C00000000000000000000001".to_string(),
            "C00000000000000000000002".to_string(),
            seq(5)
        ]
    );
}

#[test]
fn section_order_does_not_matter() {
    let src = ManifestBuilder::new()
        .sections(&[
            Section::SourcesBuildPhase,
            Section::Group,
            Section::NativeTarget,
            Section::FileReference,
            Section::BuildFile,
        ])
        .build();
    let patched = patch_seq(&src, &PatchPlan::for_feature("Audio"));
    assert!(patched.report.is_complete());

    let doc = Document::parse(patched.text).unwrap();
    assert_eq!(members(&doc, SOURCES_ID, "files"), vec![seq(3), seq(4)]);
    assert_eq!(members(&doc, &seq(5), "children"), vec![seq(1), seq(2)]);
}

#[test]
fn non_ascii_names_are_quoted_and_read_back() {
    let src = ManifestBuilder::new().build();
    let patched = patch_seq(&src, &PatchPlan::for_feature("Café"));

    assert!(patched.text.contains("path = \"Café\";"));
    assert!(patched.text.contains("/* CaféView.swift in Sources */"));
    let doc = Document::parse(patched.text).unwrap();
    assert_eq!(doc.object(&seq(5)).unwrap().display_name(), Some("Café"));
    assert_eq!(
        doc.object(&seq(1)).unwrap().get_str("path"),
        Some("CaféView.swift")
    );
}
