//! Patch configuration via `xcpatch.toml`
//!
//! Every setting has a default that reproduces the stock invocation, so the
//! file is optional. Command-line flags override file values.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use xcpatch_core::{Error, Result};

use crate::plan::{ExistingPolicy, PatchPlan, DEFAULT_FEATURE, DEFAULT_PARENT_GROUP};

/// Config file name looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "xcpatch.toml";

/// Manifest patched when no project path is given
pub const DEFAULT_PROJECT: &str = "ReTakeAi.xcodeproj/project.pbxproj";

/// Configuration loaded from `xcpatch.toml`.
///
/// # Example
///
/// ```toml
/// project = "App.xcodeproj/project.pbxproj"
/// feature = "Onboarding"
/// parent_group = "Features"
/// on_existing = "skip"
/// ```
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct PatchConfig {
    /// Path to `project.pbxproj`
    #[serde(default = "default_project")]
    pub project: PathBuf,
    /// Feature folder; names the group and, by default, the two files
    #[serde(default = "default_feature")]
    pub feature: String,
    /// Existing group the feature group is linked under
    #[serde(default = "default_parent_group")]
    pub parent_group: String,
    /// Explicit pair of file names instead of `<Feature>View.swift` / `<Feature>ViewModel.swift`
    #[serde(default)]
    pub files: Option<Vec<String>>,
    /// Target whose sources phase compiles the files
    #[serde(default)]
    pub target: Option<String>,
    /// `"duplicate"` (default), `"skip"` or `"error"`
    #[serde(default = "default_on_existing")]
    pub on_existing: String,
    /// Copy the original manifest to `<name>.bak` before writing
    #[serde(default)]
    pub backup: bool,
}

fn default_project() -> PathBuf {
    PathBuf::from(DEFAULT_PROJECT)
}

fn default_feature() -> String {
    DEFAULT_FEATURE.to_string()
}

fn default_parent_group() -> String {
    DEFAULT_PARENT_GROUP.to_string()
}

fn default_on_existing() -> String {
    ExistingPolicy::default().as_str().to_string()
}

impl Default for PatchConfig {
    fn default() -> Self {
        Self {
            project: default_project(),
            feature: default_feature(),
            parent_group: default_parent_group(),
            files: None,
            target: None,
            on_existing: default_on_existing(),
            backup: false,
        }
    }
}

impl PatchConfig {
    /// Parse the `on_existing` string
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` for anything but the three known policies.
    pub fn existing_policy(&self) -> Result<ExistingPolicy> {
        self.on_existing.parse()
    }

    /// The explicit file pair, if one is configured
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` unless `files` holds exactly two names.
    pub fn file_pair(&self) -> Result<Option<[String; 2]>> {
        match self.files.as_deref() {
            None => Ok(None),
            Some([first, second]) => Ok(Some([first.clone(), second.clone()])),
            Some(other) => Err(Error::InvalidConfig(format!(
                "files must list exactly two names, found {}",
                other.len()
            ))),
        }
    }

    /// Build and validate the plan this config describes
    pub fn to_plan(&self) -> Result<PatchPlan> {
        let mut plan = PatchPlan::for_feature(&self.feature)
            .with_parent_group(self.parent_group.clone())
            .with_target(self.target.clone())
            .with_policy(self.existing_policy()?);
        if let Some(files) = self.file_pair()? {
            plan = plan.with_files(files);
        }
        plan.validate()?;
        Ok(plan)
    }

    /// Returns the default config file content with comments.
    pub fn default_toml() -> &'static str {
        r#"# xcpatch configuration
#
# Manifest to patch, relative to the working directory.
project = "ReTakeAi.xcodeproj/project.pbxproj"

# Feature folder. Names the new group and, unless `files` is set,
# the two files: <feature>View.swift and <feature>ViewModel.swift.
feature = "AudioProcessorTest"

# Existing group the new group is linked under.
parent_group = "Features"

# Explicit file pair (exactly two names).
# files = ["AudioProcessorTestView.swift", "AudioProcessorTestViewModel.swift"]

# Target whose "Sources" phase compiles the files.
# Default: the first Sources phase in the manifest.
# target = "ReTakeAi"

# When the group already exists: "duplicate" (default), "skip" or "error".
on_existing = "duplicate"

# Keep a copy of the original manifest as <name>.bak (default: false).
backup = false
"#
    }

    /// Read and parse config from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::file(path, e))?;
        let config: PatchConfig = toml::from_str(&content).map_err(|e| {
            Error::InvalidConfig(format!(
                "Failed to parse config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        // Validate the policy and file pair eagerly
        config.existing_policy()?;
        config.file_pair()?;
        Ok(config)
    }

    /// Load `dir/xcpatch.toml` if present, defaults otherwise
    pub fn discover(dir: &Path) -> Result<Self> {
        let path = dir.join(CONFIG_FILE_NAME);
        if path.is_file() {
            tracing::debug!(path = %path.display(), "loading config");
            Self::from_file(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Write the default config file if it does not already exist.
    ///
    /// Returns `true` when the file was created.
    pub fn write_default_if_missing(path: &Path) -> Result<bool> {
        if path.exists() {
            return Ok(false);
        }
        std::fs::write(path, Self::default_toml()).map_err(|e| Error::file(path, e))?;
        Ok(true)
    }
}
