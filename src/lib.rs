//! xcpatch - register source files in Xcode project manifests
//!
//! xcpatch adds a group holding a pair of source files to a
//! `project.pbxproj` without opening the IDE: two file references, two
//! build files, the group itself, its link under a parent group, and the
//! build files' link into a compile-sources phase.
//!
//! # Quick Start
//!
//! ```ignore
//! use xcpatch::{patch, PatchPlan, PatchOptions, Patcher, SeededIds};
//!
//! // Stock invocation: AudioProcessorTest under Features, random ids
//! let report = patch("ReTakeAi.xcodeproj/project.pbxproj")?;
//!
//! // Anything else goes through a plan
//! let plan = PatchPlan::for_feature("Onboarding").with_parent_group("Screens");
//! let report = Patcher::new(SeededIds::new(7))
//!     .patch_file(path, &plan, &PatchOptions { dry_run: true, backup: false })?;
//! ```
//!
//! # Architecture
//!
//! The manifest is parsed into a span-annotated tree, anchors are resolved
//! structurally, and new text is spliced into the original. Bytes outside
//! the insertions never change.

pub use xcpatch_core::{
    Error, IdAllocator, IdGenerator, Limits, ObjectId, RandomIds, Result, SeededIds,
    SequentialIds,
};
pub use xcpatch_engine::*;

/// Manifest parsing and splicing
pub use xcpatch_pbxproj as pbxproj;
