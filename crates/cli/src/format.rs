//! PatchReport → human/json/raw string formatting.
//!
//! Three modes:
//! - **Human** (default): one line per generated identifier, then a
//!   confirmation or a list of skipped steps
//! - **JSON** (`--json`): `serde_json::to_string_pretty` of the report
//! - **Raw** (`--raw`): bare identifiers, one per line

use std::path::Path;

use xcpatch_core::Error;
use xcpatch_engine::{PatchReport, StepOutcome};

/// Output formatting mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Human,
    Json,
    Raw,
}

/// Format a finished patch run.
pub fn format_report(report: &PatchReport, mode: OutputMode) -> String {
    match mode {
        OutputMode::Json => serde_json::to_string_pretty(report)
            .unwrap_or_else(|e| format!("{{\"error\": \"{}\"}}", e)),
        OutputMode::Raw => format_raw(report),
        OutputMode::Human => format_human(report),
    }
}

/// Format an error.
pub fn format_error(err: &Error, mode: OutputMode) -> String {
    format_message_error(&err.to_string(), mode)
}

/// Format an error that never reached the engine (bad flags, bad config).
pub fn format_message_error(message: &str, mode: OutputMode) -> String {
    match mode {
        OutputMode::Json => serde_json::to_string_pretty(&serde_json::json!({
            "error": message
        }))
        .unwrap_or_else(|_| format!("{{\"error\": \"{}\"}}", message)),
        OutputMode::Raw => message.to_string(),
        OutputMode::Human => format!("(error) {}", message),
    }
}

/// Format the result of `xcpatch init`.
pub fn format_init(path: &Path, created: bool, mode: OutputMode) -> String {
    match mode {
        OutputMode::Json => serde_json::to_string_pretty(&serde_json::json!({
            "path": path.display().to_string(),
            "created": created
        }))
        .unwrap_or_default(),
        OutputMode::Raw => path.display().to_string(),
        OutputMode::Human if created => format!("Wrote {}", path.display()),
        OutputMode::Human => format!("{} already exists (use --force to overwrite)", path.display()),
    }
}

fn format_raw(report: &PatchReport) -> String {
    report
        .ids
        .map(|ids| {
            ids.all()
                .iter()
                .map(|id| id.to_string())
                .collect::<Vec<_>>()
                .join("\n")
        })
        .unwrap_or_default()
}

fn format_human(report: &PatchReport) -> String {
    let mut lines = Vec::new();

    if let Some(ids) = &report.ids {
        let [first, second] = &report.files;
        lines.push(format!("{} file ref: {}", first, ids.file_references[0]));
        lines.push(format!("{} file ref: {}", second, ids.file_references[1]));
        lines.push(format!("{} build file: {}", first, ids.build_files[0]));
        lines.push(format!("{} build file: {}", second, ids.build_files[1]));
        lines.push(format!("{} group: {}", report.group, ids.group));
    }

    for step in report.skipped() {
        if let StepOutcome::Skipped { reason } = &step.outcome {
            lines.push(format!("(skipped) {}: {}", step.step.describe(), reason));
        }
    }

    let status = if !report.changed {
        "Nothing to change.".to_string()
    } else if !report.written {
        "Dry run: manifest not written.".to_string()
    } else if report.is_complete() {
        "✅ Files added to Xcode project successfully!".to_string()
    } else {
        format!(
            "Files partially added to Xcode project ({} of {} steps).",
            report.applied_count(),
            report.steps.len()
        )
    };
    lines.push(status);

    if let Some(backup) = &report.backup {
        lines.push(format!("Backup: {}", backup.display()));
    }

    lines.join("\n")
}
