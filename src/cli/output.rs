//! Machine-readable output for the review pipeline.
//!
//! `suggestions.json` holds one record per suggestion, ready to be posted as
//! a review comment:
//!
//! ```json
//! [{
//!   "filePath": "locales/zh_TW.po",
//!   "startLine": 12,
//!   "endLine": 12,
//!   "replacementBlock": "msgstr \"拉取請求\"",
//!   "message": "...",
//!   "body": "...\n```suggestion\nmsgstr \"拉取請求\"\n```",
//!   "commitId": "abc123"
//! }]
//! ```

use std::{fs, io::Write, path::Path};

use anyhow::{Context, Result};
use serde::Serialize;

use super::args::ReviewArgs;
use crate::core::{Suggestion, dedup::normalize_path};

/// Where the suggestions will be posted. Built once from CLI flags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReviewContext {
    pub repository: Option<String>,
    pub pull_request: Option<u64>,
    pub commit_id: Option<String>,
}

impl From<&ReviewArgs> for ReviewContext {
    fn from(args: &ReviewArgs) -> Self {
        Self {
            repository: args.repository.clone(),
            pull_request: args.pull_request,
            commit_id: args.commit_id.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionRecord<'a> {
    pub file_path: String,
    pub start_line: usize,
    pub end_line: usize,
    pub replacement_block: &'a str,
    pub message: &'a str,
    pub rule: String,
    pub body: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repository: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pull_request: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commit_id: Option<&'a str>,
}

impl<'a> SuggestionRecord<'a> {
    pub fn new(suggestion: &'a Suggestion, review: &'a ReviewContext) -> Self {
        Self {
            file_path: normalize_path(&suggestion.file_path),
            start_line: suggestion.range.start_line,
            end_line: suggestion.range.end_line,
            replacement_block: &suggestion.replacement_block,
            message: &suggestion.message,
            rule: suggestion.kind.to_string(),
            body: comment_body(suggestion),
            repository: review.repository.as_deref(),
            pull_request: review.pull_request,
            commit_id: review.commit_id.as_deref(),
        }
    }
}

/// Review comment text: the rationale followed by a suggestion block.
pub fn comment_body(suggestion: &Suggestion) -> String {
    format!(
        "{}\n```suggestion\n{}\n```",
        suggestion.message, suggestion.replacement_block
    )
}

pub fn suggestions_json(suggestions: &[Suggestion], review: &ReviewContext) -> Result<String> {
    let records: Vec<SuggestionRecord> = suggestions
        .iter()
        .map(|s| SuggestionRecord::new(s, review))
        .collect();
    serde_json::to_string_pretty(&records).context("Failed to serialize suggestions")
}

pub fn write_suggestions(
    path: &Path,
    suggestions: &[Suggestion],
    review: &ReviewContext,
) -> Result<()> {
    let mut json = suggestions_json(suggestions, review)?;
    json.push('\n');
    fs::write(path, json)
        .with_context(|| format!("Failed to write suggestions: {}", path.display()))
}

/// Append the `has_suggestions` step output.
pub fn write_github_output(path: &Path, has_suggestions: bool) -> Result<()> {
    let mut file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open step output file: {}", path.display()))?;
    writeln!(file, "has_suggestions={}", has_suggestions)
        .with_context(|| format!("Failed to write step output file: {}", path.display()))
}
