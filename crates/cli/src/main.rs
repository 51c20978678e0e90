//! xcpatch: register source files in an Xcode project from the command line.
//!
//! `xcpatch [PROJECT] [flags]` patches one manifest and exits.
//! `xcpatch init` writes a default `xcpatch.toml`.

mod commands;
mod format;
mod parse;

use std::path::{Path, PathBuf};
use std::process;

use tracing_subscriber::EnvFilter;
use xcpatch_core::{Error, IdGenerator, RandomIds, SeededIds};
use xcpatch_engine::{PatchConfig, Patcher};

use commands::build_cli;
use format::{format_error, format_init, format_message_error, format_report, OutputMode};
use parse::{matches_to_action, CliAction, PatchRequest};

fn main() {
    let matches = build_cli().get_matches();

    let output_mode = if matches.get_flag("json") {
        OutputMode::Json
    } else if matches.get_flag("raw") {
        OutputMode::Raw
    } else {
        OutputMode::Human
    };

    init_tracing(matches.get_flag("verbose"), matches.get_flag("quiet"));

    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let exit_code = match matches_to_action(&matches, &cwd) {
        Ok(CliAction::Patch(request)) => run_patch(request, output_mode),
        Ok(CliAction::Init { path, force }) => run_init(&path, force, output_mode),
        Err(e) => {
            eprintln!("{}", format_message_error(&e, output_mode));
            1
        }
    };
    process::exit(exit_code);
}

/// Logs go to stderr so stdout stays parseable in `--json`/`--raw` modes.
/// `RUST_LOG` wins over the flags when set.
fn init_tracing(verbose: bool, quiet: bool) {
    let level = if verbose {
        "debug"
    } else if quiet {
        "error"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn run_patch(request: PatchRequest, mode: OutputMode) -> i32 {
    let ids: Box<dyn IdGenerator> = match request.seed {
        Some(seed) => Box::new(SeededIds::new(seed)),
        None => Box::new(RandomIds),
    };

    tracing::debug!(
        project = %request.config.project.display(),
        seed = ?request.seed,
        dry_run = request.options.dry_run,
        "starting patch run"
    );
    let result = request.config.to_plan().and_then(|plan| {
        Patcher::new(ids).patch_file(&request.config.project, &plan, &request.options)
    });

    match result {
        Ok(report) => {
            let formatted = format_report(&report, mode);
            if !formatted.is_empty() {
                println!("{}", formatted);
            }
            0
        }
        Err(e) => {
            eprintln!("{}", format_error(&e, mode));
            1
        }
    }
}

fn run_init(path: &Path, force: bool, mode: OutputMode) -> i32 {
    let result = if force {
        std::fs::write(path, PatchConfig::default_toml())
            .map(|_| true)
            .map_err(|e| Error::file(path, e))
    } else {
        PatchConfig::write_default_if_missing(path)
    };

    match result {
        Ok(created) => {
            println!("{}", format_init(path, created, mode));
            0
        }
        Err(e) => {
            eprintln!("{}", format_error(&e, mode));
            1
        }
    }
}
