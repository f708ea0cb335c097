use std::{collections::BTreeSet, path::PathBuf};

use super::super::{actions::ActionStats, exit_status::ExitStatus};
use crate::{core::Suggestion, issues::Issue};

#[derive(Debug)]
pub enum CommandSummary {
    Check(CheckSummary),
    Fix(FixSummary),
    Init(InitSummary),
}

#[derive(Debug, Default)]
pub struct CheckSummary {
    pub suggestion_count: usize,
    /// Violations dropped because they were already reported.
    pub suppressed: usize,
    /// Where the suggestion JSON was written, if requested.
    pub output: Option<PathBuf>,
}

#[derive(Debug)]
pub struct FixSummary {
    pub suggestions: Vec<Suggestion>,
    pub is_apply: bool,
    /// Zeroed in dry-run mode.
    pub stats: ActionStats,
}

impl FixSummary {
    /// Number of distinct catalogs touched by the suggestions.
    pub fn file_count(&self) -> usize {
        self.suggestions
            .iter()
            .map(|s| s.file_path.as_str())
            .collect::<BTreeSet<_>>()
            .len()
    }
}

#[derive(Debug)]
pub struct InitSummary {
    pub created: bool,
}

/// Result of running glosscheck commands
#[derive(Debug)]
pub struct CommandResult {
    pub summary: CommandSummary,
    pub error_count: usize,
    pub warning_count: usize,
    /// If true, exit code 1 should be returned when error_count > 0.
    /// If false, always exit 0 (used for commands that report work to do).
    pub exit_on_errors: bool,
    /// Issues in report order.
    pub issues: Vec<Issue>,
    /// Number of catalogs that were read and scanned.
    pub catalogs_checked: usize,
}

impl CommandResult {
    pub fn exit_status(&self) -> ExitStatus {
        if self.exit_on_errors && self.error_count > 0 {
            ExitStatus::Failure
        } else {
            ExitStatus::Success
        }
    }
}
