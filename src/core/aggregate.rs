//! Suggestion assembly across catalog files.
//!
//! Each file is scanned independently; files run in parallel but results are
//! collected in input order, so the output is identical to a sequential pass:
//! file order as given, entry order as parsed.
//!
//! Catalog paths are relative to the source root; the same paths show up in
//! suggestions, failures and the flagged-span lookup.

use std::path::Path;

use rayon::prelude::*;
use tracing::debug;

use super::{
    catalog::{Catalog, CatalogEntry, read_catalog},
    classify::{MatchKind, MatchReason, MatchResult, classify},
    dedup::FlaggedSpans,
    diff::ChangedLines,
    glossary::GlossaryIndex,
    line_range::{LineRange, resolve_line_range},
    patch::{format_translation, leading_whitespace},
};

/// A ready-to-apply correction for one `msgstr` field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
    pub file_path: String,
    pub range: LineRange,
    /// Literal text replacing the lines of `range`, joined by `\n`.
    pub replacement_block: String,
    /// Rationale shown to reviewers.
    pub message: String,
    pub kind: MatchKind,
    pub reason: MatchReason,
    /// msgid of the flagged entry.
    pub msgid: String,
    /// Text being replaced, as it appears in the translation.
    pub offending: String,
    /// The physical lines currently occupying `range`.
    pub original_lines: Vec<String>,
}

/// A catalog that could not be read or parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogFailure {
    pub file_path: String,
    pub error: String,
}

/// Suggestions for a single catalog.
#[derive(Debug, Default)]
pub struct FileScan {
    pub suggestions: Vec<Suggestion>,
    /// Violations skipped because they were already reported.
    pub suppressed: usize,
}

/// Result of scanning all catalogs.
#[derive(Debug, Default)]
pub struct ScanOutcome {
    pub suggestions: Vec<Suggestion>,
    pub failures: Vec<CatalogFailure>,
    pub catalogs_checked: usize,
    pub suppressed: usize,
}

/// Which violations are worth reporting.
#[derive(Debug, Clone, Default)]
pub struct ScanFilter {
    /// Spans already reported in a previous pass.
    pub flagged: FlaggedSpans,
    /// When set, only spans touching an added line are kept.
    pub changed: Option<ChangedLines>,
}

impl ScanFilter {
    pub fn new(flagged: FlaggedSpans, changed: Option<ChangedLines>) -> Self {
        Self { flagged, changed }
    }
}

/// Build the suggestion for a classified entry.
///
/// Returns `None` when the entry's `msgstr` span cannot be located.
pub fn build_suggestion(
    catalog: &Catalog,
    entry: &CatalogEntry,
    result: MatchResult,
) -> Option<Suggestion> {
    let Some(range) = resolve_line_range(&catalog.lines, entry.start_line) else {
        debug!(
            file = %catalog.path,
            line = entry.start_line,
            "cannot locate msgstr, skipping entry"
        );
        return None;
    };

    let original_lines = catalog.lines[range.start_line - 1..range.end_line].to_vec();
    let indent = leading_whitespace(&original_lines[0]);
    let replacement_block = format_translation(&result.corrected_translation, indent);

    Some(Suggestion {
        file_path: catalog.path.clone(),
        range,
        replacement_block,
        message: result.message(),
        kind: result.kind,
        reason: result.reason,
        msgid: entry.id.clone(),
        offending: result.offending,
        original_lines,
    })
}

/// Scan one parsed catalog.
pub fn scan_catalog(catalog: &Catalog, glossary: &GlossaryIndex, filter: &ScanFilter) -> FileScan {
    let mut scan = FileScan::default();

    for entry in catalog.entries.iter().filter(|e| e.is_checkable()) {
        let Some(result) = classify(entry, glossary) else {
            continue;
        };
        let Some(suggestion) = build_suggestion(catalog, entry, result) else {
            continue;
        };
        if let Some(changed) = &filter.changed
            && !changed.touches(&suggestion.file_path, suggestion.range)
        {
            debug!(
                file = %suggestion.file_path,
                line = suggestion.range.start_line,
                "outside the diff, skipping"
            );
            continue;
        }
        if filter.flagged.is_flagged(&suggestion.file_path, suggestion.range) {
            debug!(
                file = %suggestion.file_path,
                line = suggestion.range.end_line,
                "already reported, skipping"
            );
            scan.suppressed += 1;
            continue;
        }
        scan.suggestions.push(suggestion);
    }

    scan
}

/// Read, parse and scan every catalog in `files`, relative to `root`.
///
/// Unreadable or unparsable catalogs are reported as failures and skipped.
pub fn collect_suggestions(
    root: &Path,
    files: &[String],
    glossary: &GlossaryIndex,
    filter: &ScanFilter,
) -> ScanOutcome {
    let results: Vec<Result<FileScan, CatalogFailure>> = files
        .par_iter()
        .map(|file_path| {
            let catalog = read_catalog(root, file_path).map_err(|e| {
                debug!(file = %file_path, error = %e, "skipping unparsable catalog");
                CatalogFailure {
                    file_path: file_path.clone(),
                    error: e.to_string(),
                }
            })?;
            Ok(scan_catalog(&catalog, glossary, filter))
        })
        .collect();

    let mut outcome = ScanOutcome::default();
    for result in results {
        match result {
            Ok(scan) => {
                outcome.catalogs_checked += 1;
                outcome.suppressed += scan.suppressed;
                outcome.suggestions.extend(scan.suggestions);
            }
            Err(failure) => outcome.failures.push(failure),
        }
    }
    outcome
}
