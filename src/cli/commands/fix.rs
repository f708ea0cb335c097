//! Fix command - replace glossary violations with their corrections.
//!
//! Use `--apply` to rewrite the catalogs (default is dry-run mode, which
//! previews every replacement).

use anyhow::Result;
use tracing::warn;

use super::super::{
    actions::{Action, ActionStats, ApplySuggestion},
    args::FixCommand,
};
use super::{
    helper::finish,
    {CommandResult, CommandSummary, FixSummary},
};
use crate::{
    core::{CheckContext, ScanFilter, Suggestion},
    issues::{Issue, ParseErrorIssue},
};

pub fn fix(cmd: FixCommand) -> Result<CommandResult> {
    let args = &cmd.args;
    let ctx = CheckContext::new(&args.common)?;

    // previously reported spans still need fixing
    let outcome = ctx.scan(&ScanFilter::default());
    for failure in &outcome.failures {
        warn!(file = %failure.file_path, error = %failure.error, "skipping catalog");
    }

    let stats = if args.apply && !outcome.suggestions.is_empty() {
        let on_disk: Vec<Suggestion> = outcome
            .suggestions
            .iter()
            .map(|s| Suggestion {
                file_path: ctx.disk_path(&s.file_path),
                ..s.clone()
            })
            .collect();
        ApplySuggestion::run(&on_disk)?
    } else {
        ActionStats::default()
    };

    let issues: Vec<Issue> = outcome
        .failures
        .into_iter()
        .map(|f| ParseErrorIssue::from(f).into())
        .collect();

    let summary = FixSummary {
        suggestions: outcome.suggestions,
        is_apply: args.apply,
        stats,
    };

    Ok(finish(
        CommandSummary::Fix(summary),
        issues,
        outcome.catalogs_checked,
        false,
    ))
}
