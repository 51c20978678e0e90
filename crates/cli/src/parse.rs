//! ArgMatches → CliAction conversion.
//!
//! Precedence for every setting: flag, then config file, then default.

use std::path::{Path, PathBuf};

use clap::ArgMatches;
use xcpatch_engine::{PatchConfig, PatchOptions, CONFIG_FILE_NAME};

/// The result of parsing the command line.
#[derive(Debug)]
pub enum CliAction {
    /// Patch a manifest.
    Patch(PatchRequest),
    /// Write a default config file.
    Init { path: PathBuf, force: bool },
}

/// Everything needed for one patch run.
#[derive(Debug)]
pub struct PatchRequest {
    pub config: PatchConfig,
    pub options: PatchOptions,
    pub seed: Option<u64>,
}

/// Convert clap ArgMatches into a CliAction.
///
/// `cwd` is where `xcpatch.toml` is looked up when `--config` is absent.
pub fn matches_to_action(matches: &ArgMatches, cwd: &Path) -> Result<CliAction, String> {
    if let Some(("init", sub)) = matches.subcommand() {
        let path = sub
            .get_one::<String>("path")
            .map(PathBuf::from)
            .unwrap_or_else(|| cwd.join(CONFIG_FILE_NAME));
        return Ok(CliAction::Init {
            path,
            force: sub.get_flag("force"),
        });
    }

    let config = match matches.get_one::<String>("config") {
        Some(path) => PatchConfig::from_file(Path::new(path)),
        None => PatchConfig::discover(cwd),
    }
    .map_err(|e| e.to_string())?;

    parse_patch(matches, config).map(CliAction::Patch)
}

/// Apply flag overrides on top of a loaded config.
pub fn parse_patch(matches: &ArgMatches, mut config: PatchConfig) -> Result<PatchRequest, String> {
    if let Some(project) = matches.get_one::<String>("project") {
        config.project = PathBuf::from(project);
    }
    if let Some(feature) = matches.get_one::<String>("feature") {
        config.feature = feature.clone();
        // A new feature implies its own file pair unless --files says otherwise
        config.files = None;
    }
    if let Some(parent) = matches.get_one::<String>("parent-group") {
        config.parent_group = parent.clone();
    }
    if let Some(mut files) = matches.get_many::<String>("files") {
        match (files.next(), files.next()) {
            (Some(first), Some(second)) => {
                config.files = Some(vec![first.clone(), second.clone()]);
            }
            _ => return Err("--files takes exactly two names".to_string()),
        }
    }
    if let Some(target) = matches.get_one::<String>("target") {
        config.target = Some(target.clone());
    }
    if let Some(policy) = matches.get_one::<String>("on-existing") {
        config.on_existing = policy.clone();
    }
    if matches.get_flag("backup") {
        config.backup = true;
    }

    // Surface bad names and policies before touching the manifest
    config.to_plan().map_err(|e| e.to_string())?;

    Ok(PatchRequest {
        options: PatchOptions {
            dry_run: matches.get_flag("dry-run"),
            backup: config.backup,
        },
        seed: matches.get_one::<u64>("seed").copied(),
        config,
    })
}
