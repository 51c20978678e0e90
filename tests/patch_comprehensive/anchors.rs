//! Ambiguous and missing anchors

use xcpatch::pbxproj::Document;
use xcpatch::{Error, Limits, PatchPlan, Patcher, SequentialIds, Step, StepOutcome};

use super::manifest::{ManifestBuilder, Section, FEATURES_ID, SOURCES_ID};
use super::{members, patch_seq, seq};

#[test]
fn first_of_several_parent_groups_is_used() {
    let src = ManifestBuilder::new()
        .group("D00000000000000000000001", "Features")
        .build();
    let patched = patch_seq(&src, &PatchPlan::for_feature("Audio"));
    let doc = Document::parse(patched.text).unwrap();

    assert_eq!(members(&doc, FEATURES_ID, "children"), vec![seq(5)]);
    assert!(members(&doc, "D00000000000000000000001", "children").is_empty());
}

#[test]
fn parent_group_can_be_any_group() {
    let src = ManifestBuilder::new()
        .group("D00000000000000000000001", "Screens")
        .build();
    let plan = PatchPlan::for_feature("Audio").with_parent_group("Screens");
    let patched = patch_seq(&src, &plan);
    let doc = Document::parse(patched.text).unwrap();

    assert_eq!(members(&doc, "D00000000000000000000001", "children"), vec![seq(5)]);
    assert!(members(&doc, FEATURES_ID, "children").is_empty());
}

#[test]
fn each_missing_section_skips_only_its_step() {
    let cases = [
        (Section::BuildFile, Step::BuildFiles),
        (Section::FileReference, Step::FileReferences),
        (Section::Group, Step::GroupRecord),
        (Section::SourcesBuildPhase, Step::SourcesPhase),
    ];
    for (missing, step) in cases {
        let sections: Vec<Section> = [
            Section::BuildFile,
            Section::FileReference,
            Section::Group,
            Section::NativeTarget,
            Section::SourcesBuildPhase,
        ]
        .into_iter()
        .filter(|s| *s != missing)
        .collect();
        let src = ManifestBuilder::new().sections(&sections).build();
        let patched = patch_seq(&src, &PatchPlan::for_feature("Audio"));

        assert!(
            matches!(patched.report.outcome(step), Some(StepOutcome::Skipped { .. })),
            "{:?} should be skipped without {:?}",
            step,
            missing
        );
        // The group section also hosts the parent group
        let expected = if missing == Section::Group { 3 } else { 4 };
        assert_eq!(patched.report.applied_count(), expected, "without {:?}", missing);
        Document::parse(patched.text).unwrap();
    }
}

#[test]
fn sources_phase_without_files_list_is_skipped() {
    let src = ManifestBuilder::new()
        .build()
        .replace("\t\t\tfiles = (\n\t\t\t);\n", "");
    let patched = patch_seq(&src, &PatchPlan::for_feature("Audio"));

    match patched.report.outcome(Step::SourcesPhase) {
        Some(StepOutcome::Skipped { reason }) => assert!(reason.contains(SOURCES_ID)),
        other => panic!("expected skip, got {:?}", other),
    }
}

#[test]
fn target_selection_uses_build_phases() {
    let src = ManifestBuilder::new().build();
    let plan = PatchPlan::for_feature("Audio").with_target(Some("App".to_string()));
    let patched = patch_seq(&src, &plan);
    assert!(patched.report.is_complete());
}

#[test]
fn nesting_limit_is_enforced() {
    let src = ManifestBuilder::new().build();
    // root, objects, record, children list
    let limits = Limits {
        max_nesting_depth: 3,
        ..Limits::default()
    };
    let err = Patcher::with_limits(SequentialIds::new(), limits)
        .patch_text(&src, &PatchPlan::for_feature("Audio"))
        .unwrap_err();
    assert!(matches!(err, Error::LimitExceeded(_)));
}
