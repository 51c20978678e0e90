//! Source-file registration for Xcode projects
//!
//! This crate orchestrates the lower layers:
//! - Plan: which group and which pair of files to register
//! - Patcher: the five guarded insertions, validation of the result
//! - Config: `xcpatch.toml` defaults and overrides
//! - File access: size-checked reads, backups, atomic replacement
//!
//! Parsing and splicing live in `xcpatch-pbxproj`; identifiers and errors
//! in `xcpatch-core`.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod fsio;
pub mod patcher;
pub mod plan;
pub mod report;

pub use config::{PatchConfig, CONFIG_FILE_NAME, DEFAULT_PROJECT};
pub use patcher::{patch, PatchOptions, Patched, Patcher};
pub use plan::{
    ExistingPolicy, PatchPlan, SourceFile, DEFAULT_FEATURE, DEFAULT_PARENT_GROUP,
    SOURCES_PHASE_LABEL,
};
pub use report::{AssignedIds, PatchReport, Step, StepOutcome, StepReport};
