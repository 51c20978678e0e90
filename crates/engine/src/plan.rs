//! What to register: one group holding one pair of source files

use std::fmt;
use std::str::FromStr;

use xcpatch_core::{Error, Result};
use xcpatch_pbxproj::writer::file_type_for;

/// Feature folder registered when nothing else is configured
pub const DEFAULT_FEATURE: &str = "AudioProcessorTest";
/// Group the new feature group is linked under
pub const DEFAULT_PARENT_GROUP: &str = "Features";
/// Label of the compile-sources build phase
pub const SOURCES_PHASE_LABEL: &str = "Sources";

/// What to do when the group to create already exists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExistingPolicy {
    /// Register a second, independent copy
    #[default]
    Duplicate,
    /// Leave the manifest untouched
    Skip,
    /// Fail with `AlreadyRegistered`
    Error,
}

impl ExistingPolicy {
    /// Config/flag spelling
    pub fn as_str(&self) -> &'static str {
        match self {
            ExistingPolicy::Duplicate => "duplicate",
            ExistingPolicy::Skip => "skip",
            ExistingPolicy::Error => "error",
        }
    }
}

impl fmt::Display for ExistingPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExistingPolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "duplicate" => Ok(ExistingPolicy::Duplicate),
            "skip" => Ok(ExistingPolicy::Skip),
            "error" => Ok(ExistingPolicy::Error),
            other => Err(Error::InvalidConfig(format!(
                "unknown on_existing policy '{}'. Expected \"duplicate\", \"skip\" or \"error\".",
                other
            ))),
        }
    }
}

/// A source file to register
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// File name, also used as the relative path
    pub name: String,
    /// `lastKnownFileType`
    pub file_type: String,
}

impl SourceFile {
    /// File type inferred from the extension
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let file_type = file_type_for(&name).to_string();
        Self { name, file_type }
    }
}

/// Everything a patch run needs to know besides the manifest itself
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatchPlan {
    /// Name (and path) of the new group
    pub group: String,
    /// Display name of the existing group to link under
    pub parent_group: String,
    /// The pair of files to register
    pub files: [SourceFile; 2],
    /// Target whose sources phase receives the build files; first phase if None
    pub target: Option<String>,
    /// Behavior when `group` already exists
    pub on_existing: ExistingPolicy,
}

impl PatchPlan {
    /// `<Feature>View.swift` and `<Feature>ViewModel.swift` in group `<Feature>`
    pub fn for_feature(feature: &str) -> Self {
        Self {
            group: feature.to_string(),
            parent_group: DEFAULT_PARENT_GROUP.to_string(),
            files: [
                SourceFile::new(format!("{}View.swift", feature)),
                SourceFile::new(format!("{}ViewModel.swift", feature)),
            ],
            target: None,
            on_existing: ExistingPolicy::default(),
        }
    }

    /// Replace the file pair
    pub fn with_files(mut self, files: [String; 2]) -> Self {
        let [first, second] = files;
        self.files = [SourceFile::new(first), SourceFile::new(second)];
        self
    }

    /// Link under a different parent group
    pub fn with_parent_group(mut self, parent: impl Into<String>) -> Self {
        self.parent_group = parent.into();
        self
    }

    /// Pick the sources phase of a named target
    pub fn with_target(mut self, target: Option<String>) -> Self {
        self.target = target;
        self
    }

    /// Set the already-registered policy
    pub fn with_policy(mut self, policy: ExistingPolicy) -> Self {
        self.on_existing = policy;
        self
    }

    /// File names in order
    pub fn file_names(&self) -> [&str; 2] {
        [self.files[0].name.as_str(), self.files[1].name.as_str()]
    }

    /// Reject names that cannot be registered
    ///
    /// # Errors
    ///
    /// `InvalidConfig` for empty names, names with line breaks, or a pair
    /// naming the same file twice.
    pub fn validate(&self) -> Result<()> {
        check_name("group", &self.group)?;
        check_name("parent group", &self.parent_group)?;
        for file in &self.files {
            check_name("file", &file.name)?;
        }
        if self.files[0].name == self.files[1].name {
            return Err(Error::InvalidConfig(format!(
                "both files are named '{}'",
                self.files[0].name
            )));
        }
        if let Some(target) = &self.target {
            check_name("target", target)?;
        }
        Ok(())
    }
}

impl Default for PatchPlan {
    fn default() -> Self {
        Self::for_feature(DEFAULT_FEATURE)
    }
}

fn check_name(what: &str, name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(Error::InvalidConfig(format!("{} name is empty", what)));
    }
    if name.contains(['\n', '\r']) {
        return Err(Error::InvalidConfig(format!(
            "{} name {:?} contains a line break",
            what, name
        )));
    }
    Ok(())
}
