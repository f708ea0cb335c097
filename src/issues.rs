//! Issue types for glossary audit results.
//!
//! Each issue is self-contained with all information needed by:
//! - Reporter: to display the issue to users
//! - Action: to apply the proposed correction

use std::fmt;

use enum_dispatch::enum_dispatch;

use crate::core::{CatalogFailure, LineRange, MatchKind, Suggestion};

// ============================================================
// Severity and Rule
// ============================================================

/// Severity level of an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// Rule identifier for each issue type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Rule {
    ExactMismatch,
    SentenceError,
    ParseError,
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rule::ExactMismatch => write!(f, "exact-mismatch"),
            Rule::SentenceError => write!(f, "sentence-error"),
            Rule::ParseError => write!(f, "parse-error"),
        }
    }
}

impl From<MatchKind> for Rule {
    fn from(kind: MatchKind) -> Self {
        match kind {
            MatchKind::ExactMismatch => Rule::ExactMismatch,
            MatchKind::SentenceError => Rule::SentenceError,
        }
    }
}

// ============================================================
// Issue Types
// ============================================================

/// A translation that violates the glossary, with its correction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlossaryIssue {
    pub suggestion: Suggestion,
}

impl GlossaryIssue {
    pub fn severity() -> Severity {
        Severity::Error
    }
}

impl From<Suggestion> for GlossaryIssue {
    fn from(suggestion: Suggestion) -> Self {
        Self { suggestion }
    }
}

/// Catalog could not be read or parsed. The file is skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseErrorIssue {
    pub file_path: String,
    pub error: String,
}

impl ParseErrorIssue {
    pub fn severity() -> Severity {
        Severity::Warning
    }

    pub fn rule() -> Rule {
        Rule::ParseError
    }
}

impl From<CatalogFailure> for ParseErrorIssue {
    fn from(failure: CatalogFailure) -> Self {
        Self {
            file_path: failure.file_path,
            error: failure.error,
        }
    }
}

// ============================================================
// Issue Enum
// ============================================================

#[enum_dispatch(Report)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Issue {
    Glossary(GlossaryIssue),
    ParseError(ParseErrorIssue),
}

impl Issue {
    pub fn severity(&self) -> Severity {
        self.report_severity()
    }
}

// ============================================================
// Report Trait (for CLI output)
// ============================================================

/// Location information for report output.
pub enum ReportLocation<'a> {
    /// A `msgstr` span, with the lines it currently occupies.
    Span {
        path: &'a str,
        range: LineRange,
        lines: &'a [String],
        /// Text to underline within the span.
        highlight: &'a str,
    },
    /// File-level only (for ParseError - no line context).
    File { path: &'a str },
}

/// Trait for types that can be reported to CLI.
#[enum_dispatch]
pub trait Report {
    fn location(&self) -> ReportLocation<'_>;

    /// Primary message to display.
    fn message(&self) -> String;

    fn report_severity(&self) -> Severity;

    fn report_rule(&self) -> Rule;

    /// Optional details for the "= note:" line.
    fn details(&self) -> Option<String> {
        None
    }

    /// Replacement lines for the "= suggestion:" block.
    fn replacement(&self) -> Option<&str> {
        None
    }
}

impl Report for GlossaryIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Span {
            path: &self.suggestion.file_path,
            range: self.suggestion.range,
            lines: &self.suggestion.original_lines,
            highlight: &self.suggestion.offending,
        }
    }

    fn message(&self) -> String {
        self.suggestion.msgid.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        self.suggestion.kind.into()
    }

    fn details(&self) -> Option<String> {
        Some(self.suggestion.message.clone())
    }

    fn replacement(&self) -> Option<&str> {
        Some(&self.suggestion.replacement_block)
    }
}

impl Report for ParseErrorIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::File {
            path: &self.file_path,
        }
    }

    fn message(&self) -> String {
        self.error.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }
}
