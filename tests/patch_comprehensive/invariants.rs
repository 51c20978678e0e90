//! Properties over generated manifests

use proptest::prelude::*;
use xcpatch::pbxproj::Document;
use xcpatch::{ExistingPolicy, PatchPlan, Patcher, SeededIds};

use super::manifest::{ManifestBuilder, FEATURES_ID, SOURCES_ID};
use super::members;

fn child_id(n: usize) -> String {
    format!("C{:023X}", n)
}

fn manifest(children: usize, sources: usize, tabs: bool) -> String {
    let mut builder = ManifestBuilder::new().indent(if tabs { "\t" } else { "  " });
    for n in 0..children {
        builder = builder.feature_child(&child_id(n));
    }
    for n in 0..sources {
        builder = builder.source_file(&child_id(1000 + n));
    }
    builder.build()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    /// Five new records, three list members, nothing else touched
    #[test]
    fn patch_only_adds(
        children in 0usize..6,
        sources in 0usize..6,
        tabs in any::<bool>(),
        seed in any::<u64>(),
    ) {
        let src = manifest(children, sources, tabs);
        let patched = Patcher::new(SeededIds::new(seed))
            .patch_text(&src, &PatchPlan::for_feature("Audio"))
            .unwrap();
        prop_assert!(patched.report.is_complete());

        let before = Document::parse(src.as_str()).unwrap();
        let after = Document::parse(patched.text.as_str()).unwrap();
        prop_assert_eq!(after.objects().count(), before.objects().count() + 5);

        let ids = patched.report.ids.unwrap();
        let mut all: Vec<String> = ids.all().iter().map(|id| id.to_string()).collect();
        all.sort();
        all.dedup();
        prop_assert_eq!(all.len(), 5);

        let features = members(&after, FEATURES_ID, "children");
        prop_assert_eq!(features.len(), children + 1);
        let group = ids.group.to_string();
        prop_assert_eq!(features.last(), Some(&group));

        let files = members(&after, SOURCES_ID, "files");
        prop_assert_eq!(files.len(), sources + 2);
        let new_files = [ids.build_files[0].to_string(), ids.build_files[1].to_string()];
        prop_assert_eq!(&files[sources..], &new_files[..]);

        // The input survives as a subsequence of lines, plus 16 new ones
        let mut expected = src.lines().peekable();
        let mut added = 0;
        for line in patched.text.lines() {
            if expected.peek() == Some(&line) {
                expected.next();
            } else {
                added += 1;
            }
        }
        prop_assert!(expected.peek().is_none());
        prop_assert_eq!(added, 16);
    }

    /// Skip policy is idempotent whatever the starting point
    #[test]
    fn skip_policy_is_idempotent(children in 0usize..4, seed in any::<u64>()) {
        let src = manifest(children, 1, true);
        let plan = PatchPlan::for_feature("Audio").with_policy(ExistingPolicy::Skip);
        let once = Patcher::new(SeededIds::new(seed)).patch_text(&src, &plan).unwrap();
        let twice = Patcher::new(SeededIds::new(seed)).patch_text(&once.text, &plan).unwrap();
        prop_assert!(once.report.changed);
        prop_assert!(!twice.report.changed);
        prop_assert_eq!(once.text, twice.text);
    }
}
