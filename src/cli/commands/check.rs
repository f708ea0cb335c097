//! Check command - audit catalogs against the glossary.
//!
//! Reports every glossary violation with its correction. Optionally writes
//! the suggestions as JSON for the review pipeline and sets the
//! `has_suggestions` step output. With `--diff`, only translations touched
//! by the change are reported.

use anyhow::Result;
use tracing::{info, warn};

use super::super::{
    args::CheckCommand,
    output::{ReviewContext, write_github_output, write_suggestions},
};
use super::{
    helper::finish,
    {CheckSummary, CommandResult, CommandSummary},
};
use crate::{
    core::{CheckContext, ScanFilter},
    issues::{GlossaryIssue, Issue, ParseErrorIssue},
};

pub fn check(cmd: CheckCommand) -> Result<CommandResult> {
    let args = &cmd.args;
    let ctx = CheckContext::new(&args.common)?;
    let filter = ScanFilter::new(
        ctx.flagged_spans(args.flagged.as_deref())?,
        ctx.changed_lines(args.diff.as_deref())?,
    );

    let outcome = ctx.scan(&filter);
    for failure in &outcome.failures {
        warn!(file = %failure.file_path, error = %failure.error, "skipping catalog");
    }
    info!(
        catalogs = outcome.catalogs_checked,
        suggestions = outcome.suggestions.len(),
        suppressed = outcome.suppressed,
        "scan finished"
    );

    let review = ReviewContext::from(&args.review);
    if let Some(path) = &args.output {
        write_suggestions(path, &outcome.suggestions, &review)?;
    }
    if let Some(path) = &args.github_output {
        write_github_output(path, !outcome.suggestions.is_empty())?;
    }

    let summary = CheckSummary {
        suggestion_count: outcome.suggestions.len(),
        suppressed: outcome.suppressed,
        output: args.output.clone(),
    };

    let mut issues: Vec<Issue> = outcome
        .suggestions
        .into_iter()
        .map(|s| GlossaryIssue::from(s).into())
        .collect();
    issues.extend(
        outcome
            .failures
            .into_iter()
            .map(|f| ParseErrorIssue::from(f).into()),
    );

    Ok(finish(
        CommandSummary::Check(summary),
        issues,
        outcome.catalogs_checked,
        true,
    ))
}
