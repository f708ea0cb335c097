//! Terminology audit engine.
//!
//! ```text
//! catalog files ──► catalog ──► classify ──► line_range ──► patch ──► diff/dedup ──► aggregate
//!                                  ▲
//!                 glossary ────────┘
//! ```
//!
//! Everything here is deterministic and free of output side effects; the
//! `cli` layer decides what to print, write or apply.

pub mod aggregate;
pub mod catalog;
pub mod classify;
pub mod context;
pub mod dedup;
pub mod diff;
pub mod file_scanner;
pub mod glossary;
pub mod line_range;
pub mod patch;

pub use aggregate::{
    CatalogFailure, ScanFilter, ScanOutcome, Suggestion, collect_suggestions, scan_catalog,
};
pub use catalog::{Catalog, CatalogEntry, CatalogParseError, parse_catalog, read_catalog};
pub use classify::{MatchKind, MatchReason, MatchResult, classify};
pub use context::CheckContext;
pub use dedup::{FlaggedSpans, FlaggedStateError};
pub use diff::{ChangedLines, DiffError};
pub use glossary::{GlossaryError, GlossaryIndex, GlossaryTerm};
pub use line_range::{LineRange, resolve_line_range};
pub use patch::{escape_po_string, format_translation};
