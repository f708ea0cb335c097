use super::{CommandResult, CommandSummary};
use crate::issues::{Issue, Severity};

/// Assemble a command result. Issue order is kept as given.
pub fn finish(
    summary: CommandSummary,
    issues: Vec<Issue>,
    catalogs_checked: usize,
    exit_on_errors: bool,
) -> CommandResult {
    let error_count = issues
        .iter()
        .filter(|i| i.severity() == Severity::Error)
        .count();
    let warning_count = issues.len() - error_count;

    CommandResult {
        summary,
        error_count,
        warning_count,
        exit_on_errors,
        issues,
        catalogs_checked,
    }
}
