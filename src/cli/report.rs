//! Report formatting and printing utilities.
//!
//! This module provides functions to display issues in cargo-style format.
//! Separate from core logic to allow glosscheck to be used as a library.

use std::io::{self, Write};

use colored::Colorize;
use unicode_width::UnicodeWidthStr;

use super::{
    actions::{Action, ApplySuggestion},
    commands::{CheckSummary, CommandResult, CommandSummary, FixSummary, InitSummary},
};
use crate::config::CONFIG_FILE_NAME;
use crate::core::escape_po_string;
use crate::issues::{Issue, Report, ReportLocation, Severity};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

/// Print issues in cargo-style format, in the order given.
pub fn report_to<W: Write>(issues: &[Issue], writer: &mut W) {
    if issues.is_empty() {
        return;
    }

    let max_line_width = calculate_max_line_width(issues);

    for issue in issues {
        print_issue(issue, writer, max_line_width);
    }

    print_summary(issues, writer);
}

/// Print a success message when no issues are found.
pub fn print_success_to<W: Write>(catalogs: usize, writer: &mut W) {
    let _ = writeln!(
        writer,
        "{} {}",
        SUCCESS_MARK.green(),
        format!(
            "Checked {} catalog {} - no issues found",
            catalogs,
            if catalogs == 1 { "file" } else { "files" }
        )
        .green()
    );
}

// ============================================================
// Internal Functions
// ============================================================

fn print_issue<W: Write>(issue: &Issue, writer: &mut W, max_line_width: usize) {
    let severity = issue.report_severity();
    let severity_str = match severity {
        Severity::Error => "error".bold().red(),
        Severity::Warning => "warning".bold().yellow(),
    };

    let _ = writeln!(
        writer,
        "{}: \"{}\"  {}",
        severity_str,
        issue.message(),
        issue.report_rule().to_string().dimmed().cyan()
    );

    match issue.location() {
        ReportLocation::Span {
            path,
            range,
            lines,
            highlight,
        } => {
            let _ = writeln!(
                writer,
                "  {} {}:{}",
                "-->".blue(),
                path,
                range.start_line
            );
            let _ = writeln!(writer, "{:>width$} {}", "", "|".blue(), width = max_line_width);

            let underline = locate_highlight(lines, highlight);
            for (i, line) in lines.iter().enumerate() {
                let _ = writeln!(
                    writer,
                    "{:>width$} {} {}",
                    (range.start_line + i).to_string().blue(),
                    "|".blue(),
                    line,
                    width = max_line_width
                );
                if let Some((idx, padding, len)) = underline
                    && idx == i
                {
                    let carets = "^".repeat(len.max(1));
                    let carets = match severity {
                        Severity::Error => carets.red(),
                        Severity::Warning => carets.yellow(),
                    };
                    let _ = writeln!(
                        writer,
                        "{:>width$} {} {:>padding$}{}",
                        "",
                        "|".blue(),
                        "",
                        carets,
                        width = max_line_width,
                        padding = padding
                    );
                }
            }
        }
        ReportLocation::File { path } => {
            let _ = writeln!(writer, "  {} {}", "-->".blue(), path);
        }
    }

    if let Some(details) = issue.details() {
        let _ = writeln!(
            writer,
            "{:>width$} {} {} {}",
            "",
            "=".blue(),
            "note:".bold(),
            details,
            width = max_line_width
        );
    }

    if let Some(replacement) = issue.replacement() {
        let _ = writeln!(
            writer,
            "{:>width$} {} {}",
            "",
            "=".blue(),
            "suggestion:".bold().cyan(),
            width = max_line_width
        );
        for line in replacement.split('\n') {
            let _ = writeln!(
                writer,
                "{:>width$} {} {}",
                "",
                "+".green(),
                line.green(),
                width = max_line_width
            );
        }
    }

    let _ = writeln!(writer);
}

/// Find the offending text within the displayed lines.
///
/// Returns the line index, the display column and the display width of the
/// underline. Text spanning several fragments is underlined on its first one.
fn locate_highlight(lines: &[String], highlight: &str) -> Option<(usize, usize, usize)> {
    let escaped = escape_po_string(highlight);
    let needle = escaped.split('\n').find(|s| !s.is_empty())?;

    lines.iter().enumerate().find_map(|(i, line)| {
        line.find(needle).map(|pos| {
            let padding = UnicodeWidthStr::width(&line[..pos]);
            let len = UnicodeWidthStr::width(needle);
            (i, padding, len)
        })
    })
}

fn print_summary<W: Write>(issues: &[Issue], writer: &mut W) {
    let total_errors = issues
        .iter()
        .filter(|i| i.report_severity() == Severity::Error)
        .count();
    let total_warnings = issues
        .iter()
        .filter(|i| i.report_severity() == Severity::Warning)
        .count();
    let total_problems = total_errors + total_warnings;

    if total_problems > 0 {
        let _ = writeln!(
            writer,
            "{} {} {} ({} {}, {} {})",
            FAILURE_MARK.red(),
            total_problems,
            if total_problems == 1 { "problem" } else { "problems" },
            total_errors,
            if total_errors == 1 { "error" } else { "errors" }.red(),
            total_warnings,
            if total_warnings == 1 {
                "warning"
            } else {
                "warnings"
            }
            .yellow()
        );
    }
}

fn calculate_max_line_width(issues: &[Issue]) -> usize {
    issues
        .iter()
        .filter_map(|i| match i.location() {
            ReportLocation::Span { range, .. } => Some(range.end_line),
            ReportLocation::File { .. } => None,
        })
        .max()
        .map(|n| n.to_string().len())
        .unwrap_or(1)
}

pub fn print(result: &CommandResult) {
    print_to(result, &mut io::stdout().lock());
}

pub fn print_to<W: Write>(result: &CommandResult, writer: &mut W) {
    match &result.summary {
        CommandSummary::Check(summary) => {
            report_to(&result.issues, writer);
            print_check(summary, writer);
            if result.issues.is_empty() {
                print_success_to(result.catalogs_checked, writer);
            }
        }
        CommandSummary::Fix(summary) => {
            print_fix(summary, writer);
            report_to(&result.issues, writer);
            if result.issues.is_empty() && summary.suggestions.is_empty() {
                print_success_to(result.catalogs_checked, writer);
            }
        }
        CommandSummary::Init(summary) => print_init(summary, writer),
    }
}

fn print_check<W: Write>(summary: &CheckSummary, writer: &mut W) {
    if summary.suppressed > 0 {
        let _ = writeln!(
            writer,
            "{} {} violation(s) already reported, skipped",
            "note:".bold(),
            summary.suppressed
        );
    }
    if let Some(path) = &summary.output {
        let _ = writeln!(
            writer,
            "Wrote {} suggestion(s) to {}",
            summary.suggestion_count,
            path.display()
        );
    }
}

fn print_fix<W: Write>(summary: &FixSummary, writer: &mut W) {
    if summary.suggestions.is_empty() {
        return;
    }

    if summary.is_apply {
        let _ = writeln!(
            writer,
            "{} {} translation(s) in {} file(s).",
            "Replaced".green().bold(),
            summary.stats.changes_applied,
            summary.stats.files_modified
        );
        if summary.stats.skipped > 0 {
            let _ = writeln!(
                writer,
                "  - skipped: {} span(s) changed since the scan",
                summary.stats.skipped
            );
        }
    } else {
        ApplySuggestion::preview(&summary.suggestions, writer);
        let _ = writeln!(
            writer,
            "{} {} translation(s) in {} file(s).",
            "Would replace".yellow().bold(),
            summary.suggestions.len(),
            summary.file_count()
        );
        let _ = writeln!(writer, "Run with {} to apply these changes.", "--apply".cyan());
    }
}

fn print_init<W: Write>(summary: &InitSummary, writer: &mut W) {
    if summary.created {
        let _ = writeln!(
            writer,
            "{} {}",
            SUCCESS_MARK.green(),
            format!("Created {}", CONFIG_FILE_NAME).green()
        );
    }
}

// ============================================================
// Tests
// ============================================================
