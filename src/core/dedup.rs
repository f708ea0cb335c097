//! Suppression of spans already reported in a previous pass.
//!
//! The reporting side keeps track of `(file, line)` pairs it has already
//! commented on and hands them back as a JSON array:
//!
//! ```json
//! [{ "path": "locales/zh_TW.po", "line": 12 }]
//! ```
//!
//! `filePath` / `endLine` are accepted as well, so the `suggestions.json`
//! written by a previous run can be fed back unchanged.

use std::{collections::HashSet, fs, io, path::Path};

use serde::Deserialize;
use thiserror::Error;

use super::line_range::LineRange;

#[derive(Debug, Error)]
pub enum FlaggedStateError {
    #[error("failed to read flagged state")]
    Read(#[from] io::Error),
    #[error("invalid flagged state")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Deserialize)]
struct FlaggedRecord {
    #[serde(alias = "filePath")]
    path: String,
    #[serde(alias = "endLine")]
    line: usize,
}

/// Set of previously flagged `(file, line)` pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlaggedSpans {
    spans: HashSet<(String, usize)>,
}

impl FlaggedSpans {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(content: &str) -> Result<Self, FlaggedStateError> {
        let records: Vec<FlaggedRecord> = serde_json::from_str(content)?;
        Ok(records.into_iter().map(|r| (r.path, r.line)).collect())
    }

    pub fn load(path: &Path) -> Result<Self, FlaggedStateError> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn insert(&mut self, file_path: &str, line: usize) {
        self.spans.insert((normalize_path(file_path), line));
    }

    pub fn contains(&self, file_path: &str, line: usize) -> bool {
        self.spans.contains(&(normalize_path(file_path), line))
    }

    /// A span is anchored on its last line.
    pub fn is_flagged(&self, file_path: &str, range: LineRange) -> bool {
        self.contains(file_path, range.end_line)
    }

    pub fn len(&self) -> usize {
        self.spans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }
}

impl<S: AsRef<str>> FromIterator<(S, usize)> for FlaggedSpans {
    fn from_iter<I: IntoIterator<Item = (S, usize)>>(iter: I) -> Self {
        let mut spans = Self::new();
        for (path, line) in iter {
            spans.insert(path.as_ref(), line);
        }
        spans
    }
}

/// `./locales\zh.po` and `locales/zh.po` name the same file.
pub fn normalize_path(path: &str) -> String {
    let path = path.replace('\\', "/");
    path.trim_start_matches("./").to_string()
}
