//! Outcome of a patch run

use std::path::PathBuf;

use serde::Serialize;
use xcpatch_core::ObjectId;

/// The independently guarded insertions of a patch run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    /// Two records after `/* Begin PBXBuildFile section */`
    BuildFiles,
    /// Two records after `/* Begin PBXFileReference section */`
    FileReferences,
    /// New group appended to the parent group's `children`
    ParentGroupLink,
    /// Group record after `/* Begin PBXGroup section */`
    GroupRecord,
    /// Build files appended to the sources phase's `files`
    SourcesPhase,
}

impl Step {
    /// Every step, in execution order
    pub const ALL: [Step; 5] = [
        Step::BuildFiles,
        Step::FileReferences,
        Step::ParentGroupLink,
        Step::GroupRecord,
        Step::SourcesPhase,
    ];

    /// Short description for progress output
    pub fn describe(&self) -> &'static str {
        match self {
            Step::BuildFiles => "build-file records",
            Step::FileReferences => "file-reference records",
            Step::ParentGroupLink => "parent group link",
            Step::GroupRecord => "group record",
            Step::SourcesPhase => "sources phase link",
        }
    }
}

/// What happened to one step
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum StepOutcome {
    /// Text was inserted at this byte offset of the original manifest
    Applied {
        /// Insertion offset
        offset: usize,
    },
    /// The step's anchor was not found
    Skipped {
        /// Why
        reason: String,
    },
}

/// One step and its outcome
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepReport {
    /// Which step
    pub step: Step,
    /// What happened
    pub outcome: StepOutcome,
}

impl StepReport {
    /// Whether the step changed the text
    pub fn is_applied(&self) -> bool {
        matches!(self.outcome, StepOutcome::Applied { .. })
    }
}

/// Identifiers generated for the new records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AssignedIds {
    /// File references, in plan order
    pub file_references: [ObjectId; 2],
    /// Build files, in plan order
    pub build_files: [ObjectId; 2],
    /// The new group
    pub group: ObjectId,
}

impl AssignedIds {
    /// All five identifiers
    pub fn all(&self) -> [ObjectId; 5] {
        [
            self.file_references[0],
            self.file_references[1],
            self.build_files[0],
            self.build_files[1],
            self.group,
        ]
    }
}

/// Everything a patch run did
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PatchReport {
    /// Manifest path, when patching a file
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project: Option<PathBuf>,
    /// Group name
    pub group: String,
    /// File names, in plan order
    pub files: [String; 2],
    /// Generated identifiers; None when the run stopped before generating any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ids: Option<AssignedIds>,
    /// One entry per step
    pub steps: Vec<StepReport>,
    /// Whether the text differs from the input
    pub changed: bool,
    /// Whether the file on disk was replaced
    pub written: bool,
    /// Copy of the original, if one was made
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backup: Option<PathBuf>,
}

impl PatchReport {
    /// Outcome of `step`
    pub fn outcome(&self, step: Step) -> Option<&StepOutcome> {
        self.steps
            .iter()
            .find(|s| s.step == step)
            .map(|s| &s.outcome)
    }

    /// Number of steps that changed the text
    pub fn applied_count(&self) -> usize {
        self.steps.iter().filter(|s| s.is_applied()).count()
    }

    /// Steps that were skipped
    pub fn skipped(&self) -> impl Iterator<Item = &StepReport> {
        self.steps.iter().filter(|s| !s.is_applied())
    }

    /// Whether every step was applied
    pub fn is_complete(&self) -> bool {
        self.steps.len() == Step::ALL.len() && self.steps.iter().all(StepReport::is_applied)
    }
}
