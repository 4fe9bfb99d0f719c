//! Manage the project version stored in a build metadata file.

use clap::Parser;
use smsfilter_tools::version::{self, Outcome, VersionFlags};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;

#[derive(Parser, Debug)]
#[command(name = "manage-version")]
#[command(about = "Manage project version", long_about = None)]
struct Cli {
    /// Path to the metadata file (e.g. pyproject.toml)
    file: PathBuf,

    /// Print the current version
    #[arg(long)]
    get: bool,

    /// Strip -SNAPSHOT from the version
    #[arg(long)]
    strip_snapshot: bool,

    /// Bump the patch version
    #[arg(long)]
    bump_patch: bool,

    /// Bump the patch version (once) and add -SNAPSHOT
    #[arg(long)]
    next_snapshot: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    smsfilter_tools::init_logging(cli.verbose);

    if !cli.file.exists() {
        println!("File {} not found", cli.file.display());
        return Ok(ExitCode::from(1));
    }

    let flags = VersionFlags {
        strip_snapshot: cli.strip_snapshot,
        bump_patch: cli.bump_patch,
        next_snapshot: cli.next_snapshot,
    };
    debug!(file = %cli.file.display(), ?flags, "applying version flags");

    match version::apply(&cli.file, cli.get, flags)? {
        Outcome::Current(current) => println!("{}", current),
        Outcome::Updated(new_version) => println!("Updated version to {}", new_version),
        Outcome::Unchanged(_) => println!("Version unchanged"),
    }

    Ok(ExitCode::SUCCESS)
}
