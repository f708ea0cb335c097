//! Low-level file operations produced by actions.

use std::{fs, io::Write};

use anyhow::{Context, Result};
use colored::Colorize;

use crate::core::LineRange;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    /// Replace the physical lines of `range` with `replacement`.
    ReplaceLines {
        file_path: String,
        range: LineRange,
        /// Lines expected at `range`; the edit is skipped if the file differs.
        original: Vec<String>,
        /// New text, lines joined by `\n`.
        replacement: String,
    },
}

/// One pending edit within a file.
#[derive(Debug, Clone, Copy)]
pub struct LineEdit<'a> {
    pub range: LineRange,
    pub original: &'a [String],
    pub replacement: &'a str,
}

impl Operation {
    pub fn file_path(&self) -> &str {
        match self {
            Operation::ReplaceLines { file_path, .. } => file_path,
        }
    }

    pub fn preview_to<W: Write>(&self, writer: &mut W) {
        match self {
            Operation::ReplaceLines {
                file_path,
                range,
                original,
                replacement,
            } => {
                let _ = writeln!(writer, "  {} {}:{}", "-->".blue(), file_path, range);
                for line in original {
                    let _ = writeln!(writer, "  {} {}", "-".red(), line.red());
                }
                for line in replacement.split('\n') {
                    let _ = writeln!(writer, "  {} {}", "+".green(), line.green());
                }
                let _ = writeln!(writer);
            }
        }
    }

    fn as_edit(&self) -> LineEdit<'_> {
        match self {
            Operation::ReplaceLines {
                range,
                original,
                replacement,
                ..
            } => LineEdit {
                range: *range,
                original,
                replacement,
            },
        }
    }

    /// Apply all operations targeting one file. Returns the number applied.
    pub fn apply_to_file(file_path: &str, ops: &[&Operation]) -> Result<usize> {
        let content = fs::read_to_string(file_path)
            .with_context(|| format!("Failed to read {}", file_path))?;
        let edits: Vec<LineEdit> = ops.iter().map(|op| op.as_edit()).collect();

        let (updated, applied) = replace_spans(&content, &edits);
        if applied > 0 {
            fs::write(file_path, updated)
                .with_context(|| format!("Failed to write {}", file_path))?;
        }
        Ok(applied)
    }
}

/// Apply line edits to `content`.
///
/// Edits are applied bottom-up so earlier line numbers stay valid. An edit is
/// skipped when it overlaps one already applied or when the lines at its
/// range no longer match `original`. Line endings and a trailing newline are
/// preserved.
pub fn replace_spans(content: &str, edits: &[LineEdit]) -> (String, usize) {
    let newline = if content.contains("\r\n") { "\r\n" } else { "\n" };
    let trailing_newline = content.ends_with('\n');
    let mut lines: Vec<String> = content.lines().map(str::to_string).collect();

    let mut ordered: Vec<&LineEdit> = edits.iter().collect();
    ordered.sort_by(|a, b| b.range.cmp(&a.range));

    let mut applied = 0;
    let mut lowest_start = usize::MAX;

    for edit in ordered {
        let LineRange {
            start_line,
            end_line,
        } = edit.range;
        if start_line == 0 || end_line >= lowest_start || end_line > lines.len() {
            continue;
        }
        if lines[start_line - 1..end_line] != *edit.original {
            continue;
        }
        lines.splice(
            start_line - 1..end_line,
            edit.replacement.split('\n').map(str::to_string),
        );
        lowest_start = start_line;
        applied += 1;
    }

    let mut result = lines.join(newline);
    if trailing_newline {
        result.push_str(newline);
    }
    (result, applied)
}
