//! Terminology glossary loading and indexing.
//!
//! A glossary file is a JSON array of term records:
//!
//! ```json
//! [
//!   { "source": "Pull Request", "target": "拉取請求", "commonErrors": ["合併請求"] }
//! ]
//! ```
//!
//! Records are validated one by one. A glossary with any malformed record is
//! rejected as a whole, listing every offending record, so a run never works
//! from a partially loaded glossary.

use std::{collections::HashMap, fmt, fs, io, path::Path, sync::LazyLock};

use regex::Regex;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

/// A canonical term with its required translation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlossaryTerm {
    /// Canonical source-language phrase (unique key).
    pub source: String,
    /// The single correct translation.
    pub target: String,
    /// Translations known to be wrong for this term, in glossary order.
    pub known_errors: Vec<String>,
}

impl GlossaryTerm {
    pub fn new(
        source: impl Into<String>,
        target: impl Into<String>,
        known_errors: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        let mut errors: Vec<String> = Vec::new();
        for error in known_errors {
            let error = error.into();
            if !error.is_empty() && !errors.contains(&error) {
                errors.push(error);
            }
        }
        Self {
            source: source.into(),
            target: target.into(),
            known_errors: errors,
        }
    }

    pub fn is_known_error(&self, translation: &str) -> bool {
        self.known_errors.iter().any(|e| e == translation)
    }
}

/// Pre-compiled patterns used by embedded-term matching.
#[derive(Debug)]
pub struct TermMatcher {
    /// Case-insensitive whole-word match of the term source.
    pub source: Regex,
    /// Case-insensitive substring match of the canonical target.
    pub target: Regex,
    /// One case-insensitive substring pattern per known error, same order
    /// as `GlossaryTerm::known_errors`.
    pub known_errors: Vec<Regex>,
}

impl TermMatcher {
    fn compile(term: &GlossaryTerm) -> Result<Self, regex::Error> {
        Ok(Self {
            source: whole_word_pattern(&term.source)?,
            target: substring_pattern(&term.target)?,
            known_errors: term
                .known_errors
                .iter()
                .map(|e| substring_pattern(e))
                .collect::<Result<_, _>>()?,
        })
    }
}

/// Indexed glossary, built once per run and shared read-only.
#[derive(Debug)]
pub struct GlossaryIndex {
    terms: Vec<GlossaryTerm>,
    matchers: Vec<TermMatcher>,
    by_source: HashMap<String, usize>,
}

impl GlossaryIndex {
    /// Build an index from already validated terms.
    ///
    /// Fails if a term has an empty source or target, or if a source appears
    /// twice.
    pub fn new(terms: Vec<GlossaryTerm>) -> Result<Self, GlossaryError> {
        let mut malformed = Vec::new();
        let mut by_source = HashMap::with_capacity(terms.len());

        for (index, term) in terms.iter().enumerate() {
            if let Some(reason) = check_term(term, &by_source) {
                malformed.push(MalformedRecord { index, reason });
                continue;
            }
            by_source.insert(term.source.clone(), index);
        }

        if !malformed.is_empty() {
            return Err(GlossaryError::Malformed(MalformedRecords(malformed)));
        }

        let matchers = terms
            .iter()
            .map(TermMatcher::compile)
            .collect::<Result<_, _>>()?;

        Ok(Self {
            terms,
            matchers,
            by_source,
        })
    }

    /// Parse glossary JSON text.
    pub fn from_json(content: &str) -> Result<Self, GlossaryError> {
        let value: Value = serde_json::from_str(content)?;
        let Value::Array(records) = value else {
            return Err(GlossaryError::NotAnArray);
        };

        let mut terms = Vec::with_capacity(records.len());
        let mut malformed = Vec::new();
        let mut seen: HashMap<String, usize> = HashMap::new();

        for (index, record) in records.into_iter().enumerate() {
            let record = match GlossaryRecord::deserialize(record) {
                Ok(record) => record,
                Err(e) => {
                    malformed.push(MalformedRecord {
                        index,
                        reason: MalformedReason::InvalidRecord(e.to_string()),
                    });
                    continue;
                }
            };

            let term = GlossaryTerm::new(
                record.source.unwrap_or_default(),
                record.target.unwrap_or_default(),
                record.common_errors.unwrap_or_default(),
            );
            if let Some(reason) = check_term(&term, &seen) {
                malformed.push(MalformedRecord { index, reason });
                continue;
            }
            seen.insert(term.source.clone(), index);
            terms.push(term);
        }

        if !malformed.is_empty() {
            return Err(GlossaryError::Malformed(MalformedRecords(malformed)));
        }

        Self::new(terms)
    }

    /// Load and index a glossary file.
    pub fn load(path: &Path) -> Result<Self, GlossaryError> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Exact lookup by full source text.
    pub fn lookup(&self, source: &str) -> Option<&GlossaryTerm> {
        self.by_source.get(source).map(|&i| &self.terms[i])
    }

    /// Terms in glossary order, paired with their compiled matchers.
    pub fn ordered(&self) -> impl Iterator<Item = (&GlossaryTerm, &TermMatcher)> {
        self.terms.iter().zip(self.matchers.iter())
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GlossaryRecord {
    #[serde(alias = "term")]
    source: Option<String>,
    #[serde(alias = "correct")]
    target: Option<String>,
    #[serde(
        alias = "common_errors",
        alias = "incorrect",
        alias = "knownErrors",
        alias = "errors",
        alias = "mistakes"
    )]
    common_errors: Option<Vec<String>>,
}

fn check_term(term: &GlossaryTerm, seen: &HashMap<String, usize>) -> Option<MalformedReason> {
    if term.source.trim().is_empty() {
        Some(MalformedReason::MissingSource)
    } else if term.target.trim().is_empty() {
        Some(MalformedReason::MissingTarget)
    } else {
        seen.get(&term.source)
            .map(|&first| MalformedReason::DuplicateSource {
                source: term.source.clone(),
                first,
            })
    }
}

/// Same Unicode `\w` class that `\b` is defined over.
static STARTS_WITH_WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\w").unwrap());
static ENDS_WITH_WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\w$").unwrap());

/// Boundaries are only required on the sides where the term itself starts or
/// ends with a word character, so terms like `C++` still match.
fn whole_word_pattern(term: &str) -> Result<Regex, regex::Error> {
    let mut pattern = String::from("(?i)");
    if STARTS_WITH_WORD.is_match(term) {
        pattern.push_str(r"\b");
    }
    pattern.push_str(&regex::escape(term));
    if ENDS_WITH_WORD.is_match(term) {
        pattern.push_str(r"\b");
    }
    Regex::new(&pattern)
}

fn substring_pattern(text: &str) -> Result<Regex, regex::Error> {
    Regex::new(&format!("(?i){}", regex::escape(text)))
}

// ============================================================
// Errors
// ============================================================

/// Why a glossary record was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MalformedReason {
    /// Not an object, or a field has the wrong type.
    InvalidRecord(String),
    MissingSource,
    MissingTarget,
    /// `first` is the index of the record that already defined this source.
    DuplicateSource { source: String, first: usize },
}

impl fmt::Display for MalformedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MalformedReason::InvalidRecord(e) => write!(f, "invalid record ({})", e),
            MalformedReason::MissingSource => write!(f, "missing or empty `source`"),
            MalformedReason::MissingTarget => write!(f, "missing or empty `target`"),
            MalformedReason::DuplicateSource { source, first } => {
                write!(f, "duplicate source \"{}\" (first defined at #{})", source, first)
            }
        }
    }
}

/// A rejected record and its position in the glossary array (0-based).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedRecord {
    pub index: usize,
    pub reason: MalformedReason,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedRecords(pub Vec<MalformedRecord>);

impl fmt::Display for MalformedRecords {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .0
            .iter()
            .map(|r| format!("#{}: {}", r.index, r.reason))
            .collect();
        write!(
            f,
            "{} malformed record(s): {}",
            self.0.len(),
            parts.join("; ")
        )
    }
}

/// Glossary failures. All of them abort the run.
#[derive(Debug, Error)]
pub enum GlossaryError {
    #[error("failed to read glossary")]
    Read(#[from] io::Error),
    #[error("glossary is not valid JSON")]
    Parse(#[from] serde_json::Error),
    #[error("glossary must be a JSON array of term records")]
    NotAnArray,
    #[error("glossary rejected, {0}")]
    Malformed(MalformedRecords),
    #[error("failed to compile term pattern")]
    Pattern(#[from] regex::Error),
}

impl GlossaryError {
    /// Records rejected by validation, if that is why loading failed.
    pub fn malformed_records(&self) -> &[MalformedRecord] {
        match self {
            GlossaryError::Malformed(records) => &records.0,
            _ => &[],
        }
    }
}
