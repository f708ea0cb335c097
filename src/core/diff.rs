//! Lines added by a change, read from a unified diff.
//!
//! Feed the output of `git diff --relative --unified=0 <base>` run from the
//! source root, so file names line up with the catalog paths in reports.
//! Only added lines are recorded, numbered in the new version of each file.

use std::{
    collections::{BTreeSet, HashMap},
    fs, io,
    path::Path,
    sync::LazyLock,
};

use regex::Regex;
use thiserror::Error;

use super::{dedup::normalize_path, line_range::LineRange};

static HUNK_HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^@@ -\d+(?:,\d+)? \+(\d+)(?:,\d+)? @@").unwrap());

#[derive(Debug, Error)]
pub enum DiffError {
    #[error("failed to read diff")]
    Read(#[from] io::Error),
    #[error("line {line}: malformed hunk header `{content}`")]
    HunkHeader { line: usize, content: String },
}

/// Added line numbers per file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangedLines {
    files: HashMap<String, BTreeSet<usize>>,
}

impl ChangedLines {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load(path: &Path) -> Result<Self, DiffError> {
        let content = fs::read_to_string(path)?;
        Self::from_unified_diff(&content)
    }

    pub fn from_unified_diff(content: &str) -> Result<Self, DiffError> {
        let mut changed = Self::new();
        let mut file: Option<String> = None;
        let mut next_line: Option<usize> = None;

        for (idx, line) in content.lines().enumerate() {
            if let Some(target) = line.strip_prefix("+++ ") {
                file = new_file_name(target);
                next_line = None;
                continue;
            }
            if line.starts_with("diff ") {
                file = None;
                next_line = None;
                continue;
            }
            if line.starts_with("@@") {
                let Some(start) = HUNK_HEADER
                    .captures(line)
                    .and_then(|caps| caps[1].parse::<usize>().ok())
                else {
                    return Err(DiffError::HunkHeader {
                        line: idx + 1,
                        content: line.to_string(),
                    });
                };
                next_line = Some(start);
                continue;
            }

            let (Some(name), Some(current)) = (&file, next_line) else {
                continue;
            };
            match line.chars().next() {
                Some('+') => {
                    changed.insert(name, current);
                    next_line = Some(current + 1);
                }
                // tools that strip trailing whitespace leave blank context lines empty
                Some(' ') | None => next_line = Some(current + 1),
                // removed lines and "\ No newline at end of file"
                _ => {}
            }
        }

        Ok(changed)
    }

    pub fn insert(&mut self, file_path: &str, line: usize) {
        self.files
            .entry(normalize_path(file_path))
            .or_default()
            .insert(line);
    }

    /// Whether any line of `range` was added in `file_path`.
    pub fn touches(&self, file_path: &str, range: LineRange) -> bool {
        self.files
            .get(&normalize_path(file_path))
            .is_some_and(|lines| lines.range(range.start_line..=range.end_line).next().is_some())
    }

    /// Number of files with added lines.
    pub fn file_count(&self) -> usize {
        self.files.len()
    }
}

/// `b/locales/zh.po` names `locales/zh.po`; `/dev/null` names a deleted file.
fn new_file_name(target: &str) -> Option<String> {
    let target = target.split('\t').next().unwrap_or(target).trim();
    if target == "/dev/null" {
        return None;
    }
    Some(target.strip_prefix("b/").unwrap_or(target).to_string())
}
