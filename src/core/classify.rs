//! Per-entry glossary classification.
//!
//! Two strategies are applied in order:
//!
//! 1. **Exact match**: the whole msgid is a glossary source. The msgstr must
//!    equal the canonical target byte for byte.
//! 2. **Embedded term**: a glossary source occurs in the msgid as a whole
//!    word. If the msgstr lacks the target but contains a known error, the
//!    first occurrence of that error is replaced by the target.
//!
//! The first violation wins; an entry yields at most one result so a field
//! never receives conflicting edits. An embedded term whose translation
//! contains neither the target nor a known error is left alone, since it
//! cannot be corrected mechanically.

use std::{fmt, ops::Range};

use super::{catalog::CatalogEntry, glossary::GlossaryIndex};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MatchKind {
    /// msgid is a glossary term and msgstr differs from its target.
    ExactMismatch,
    /// msgid embeds a glossary term and msgstr uses a known error for it.
    SentenceError,
}

impl fmt::Display for MatchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchKind::ExactMismatch => write!(f, "exact-mismatch"),
            MatchKind::SentenceError => write!(f, "sentence-error"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MatchReason {
    /// The offending text is listed in the term's known errors.
    KnownError,
    /// The text differs from the target but is not a listed error.
    PolicyDeviation,
}

impl fmt::Display for MatchReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchReason::KnownError => write!(f, "known error"),
            MatchReason::PolicyDeviation => write!(f, "policy deviation"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchResult {
    pub kind: MatchKind,
    pub reason: MatchReason,
    pub corrected_translation: String,
    /// Glossary source of the violated term.
    pub term_source: String,
    /// Glossary target of the violated term.
    pub term_target: String,
    /// Text being replaced, as it appears in the translation.
    pub offending: String,
}

impl MatchResult {
    /// Human-readable rationale.
    pub fn message(&self) -> String {
        match (self.kind, self.reason) {
            (MatchKind::ExactMismatch, MatchReason::KnownError) => format!(
                "\"{}\" is a known mistranslation of \"{}\"; the glossary requires \"{}\"",
                self.offending, self.term_source, self.term_target
            ),
            (MatchKind::ExactMismatch, MatchReason::PolicyDeviation) => format!(
                "\"{}\" does not follow the glossary translation of \"{}\"; expected \"{}\"",
                self.offending, self.term_source, self.term_target
            ),
            (MatchKind::SentenceError, _) => format!(
                "term \"{}\" is translated as \"{}\", a known mistranslation; use \"{}\"",
                self.term_source, self.offending, self.term_target
            ),
        }
    }
}

/// Classify one entry. Returns `None` when the entry passes or carries
/// nothing to check.
pub fn classify(entry: &CatalogEntry, glossary: &GlossaryIndex) -> Option<MatchResult> {
    if !entry.is_checkable() {
        return None;
    }

    if let Some(term) = glossary.lookup(&entry.id) {
        if entry.translation == term.target {
            return None;
        }
        let reason = if term.is_known_error(&entry.translation) {
            MatchReason::KnownError
        } else {
            MatchReason::PolicyDeviation
        };
        return Some(MatchResult {
            kind: MatchKind::ExactMismatch,
            reason,
            corrected_translation: term.target.clone(),
            term_source: term.source.clone(),
            term_target: term.target.clone(),
            offending: entry.translation.clone(),
        });
    }

    for (term, matcher) in glossary.ordered() {
        if !matcher.source.is_match(&entry.id) {
            continue;
        }
        if matcher.target.is_match(&entry.translation) {
            continue;
        }

        let found = matcher
            .known_errors
            .iter()
            .find_map(|pattern| pattern.find(&entry.translation));

        if let Some(m) = found {
            let corrected = replace_range(&entry.translation, m.range(), &term.target);
            return Some(MatchResult {
                kind: MatchKind::SentenceError,
                reason: MatchReason::KnownError,
                corrected_translation: corrected,
                term_source: term.source.clone(),
                term_target: term.target.clone(),
                offending: m.as_str().to_string(),
            });
        }
    }

    None
}

fn replace_range(text: &str, range: Range<usize>, replacement: &str) -> String {
    let mut result = String::with_capacity(text.len() + replacement.len());
    result.push_str(&text[..range.start]);
    result.push_str(replacement);
    result.push_str(&text[range.end..]);
    result
}
