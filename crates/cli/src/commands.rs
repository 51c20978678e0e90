//! Clap command tree definition.

use clap::{Arg, ArgAction, Command};

/// Build the complete CLI command tree.
pub fn build_cli() -> Command {
    Command::new("xcpatch")
        .about("Register a pair of source files in an Xcode project manifest")
        .version(env!("CARGO_PKG_VERSION"))
        .args_conflicts_with_subcommands(true)
        .arg(
            Arg::new("project")
                .value_name("PROJECT")
                .help("Path to project.pbxproj (default: ReTakeAi.xcodeproj/project.pbxproj)"),
        )
        .arg(
            Arg::new("feature")
                .long("feature")
                .short('f')
                .value_name("NAME")
                .help("Feature folder; names the group and the <NAME>View/<NAME>ViewModel pair"),
        )
        .arg(
            Arg::new("parent-group")
                .long("parent-group")
                .short('p')
                .value_name("GROUP")
                .help("Existing group to link the new group under (default: Features)"),
        )
        .arg(
            Arg::new("files")
                .long("files")
                .num_args(2)
                .value_names(["FIRST", "SECOND"])
                .help("Explicit file names instead of the feature-derived pair"),
        )
        .arg(
            Arg::new("target")
                .long("target")
                .short('t')
                .value_name("TARGET")
                .help("Target whose Sources phase compiles the files (default: first phase)"),
        )
        .arg(
            Arg::new("on-existing")
                .long("on-existing")
                .value_name("POLICY")
                .value_parser(["duplicate", "skip", "error"])
                .help("What to do when the group already exists (default: duplicate)"),
        )
        .arg(
            Arg::new("seed")
                .long("seed")
                .value_name("N")
                .value_parser(clap::value_parser!(u64))
                .help("Derive identifiers from a seed instead of randomly"),
        )
        .arg(
            Arg::new("dry-run")
                .long("dry-run")
                .short('n')
                .action(ArgAction::SetTrue)
                .help("Compute and report, but do not write the manifest"),
        )
        .arg(
            Arg::new("backup")
                .long("backup")
                .short('b')
                .action(ArgAction::SetTrue)
                .help("Keep a copy of the original as <name>.bak"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .value_name("PATH")
                .help("Config file (default: ./xcpatch.toml if present)"),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .help("JSON output mode")
                .action(ArgAction::SetTrue)
                .conflicts_with("raw")
                .global(true),
        )
        .arg(
            Arg::new("raw")
                .long("raw")
                .help("Raw output mode (identifiers only)")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Log anchor resolution to stderr")
                .action(ArgAction::SetTrue)
                .conflicts_with("quiet")
                .global(true),
        )
        .arg(
            Arg::new("quiet")
                .long("quiet")
                .short('q')
                .help("Only log errors")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand(build_init())
}

fn build_init() -> Command {
    Command::new("init")
        .about("Write a default xcpatch.toml")
        .arg(
            Arg::new("path")
                .value_name("PATH")
                .help("Where to write it (default: ./xcpatch.toml)"),
        )
        .arg(
            Arg::new("force")
                .long("force")
                .action(ArgAction::SetTrue)
                .help("Overwrite an existing file"),
        )
}
