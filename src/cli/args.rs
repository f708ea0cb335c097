//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `check`: Audit catalogs against the glossary and report suggestions
//! - `fix`: Apply the suggested corrections to the catalogs
//! - `init`: Initialize a configuration file

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }

    /// Get the verbose flag from the command's common args.
    pub fn verbose(&self) -> bool {
        match &self.command {
            Some(Command::Check(cmd)) => cmd.args.common.verbose,
            Some(Command::Fix(cmd)) => cmd.args.common.verbose,
            Some(Command::Init) | None => false,
        }
    }
}

/// Common arguments shared by `check` and `fix`.
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Catalog files to check (default: scan the source root)
    pub files: Vec<PathBuf>,

    /// Glossary file (overrides config file)
    #[arg(long)]
    pub glossary: Option<PathBuf>,

    /// Source root directory (overrides config file)
    #[arg(long)]
    pub source_root: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

/// Pull request the suggestions will be posted to.
#[derive(Debug, Clone, Args)]
pub struct ReviewArgs {
    /// Repository in `owner/name` form
    #[arg(long, env = "GITHUB_REPOSITORY")]
    pub repository: Option<String>,

    /// Pull request number
    #[arg(long, env = "PR_NUMBER")]
    pub pull_request: Option<u64>,

    /// Commit the suggestions refer to
    #[arg(long, env = "COMMIT_ID")]
    pub commit_id: Option<String>,
}

#[derive(Debug, Parser)]
pub struct CheckArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Spans already reported, as a JSON array of {path, line} records
    #[arg(long)]
    pub flagged: Option<PathBuf>,

    /// Only report translations on lines added by this unified diff
    #[arg(long)]
    pub diff: Option<PathBuf>,

    /// Write suggestions to this JSON file
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub review: ReviewArgs,

    /// Append `has_suggestions=true|false` to this file
    #[arg(long, env = "GITHUB_OUTPUT")]
    pub github_output: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct CheckCommand {
    #[command(flatten)]
    pub args: CheckArgs,
}

#[derive(Debug, Parser)]
pub struct FixArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Actually rewrite the catalogs (default is dry-run)
    #[arg(long)]
    pub apply: bool,
}

#[derive(Debug, Args)]
pub struct FixCommand {
    #[command(flatten)]
    pub args: FixArgs,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Check catalogs for translations that violate the glossary
    Check(CheckCommand),
    /// Replace glossary violations with the suggested translations
    Fix(FixCommand),
    /// Initialize a new .glosscheckrc.json configuration file
    Init,
}
