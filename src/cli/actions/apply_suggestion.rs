//! ApplySuggestion action.
//!
//! Replaces flagged `msgstr` spans with their corrected blocks.
//! Used by `glosscheck fix`.

use super::{operation::Operation, traits::Action};
use crate::core::Suggestion;

pub struct ApplySuggestion;

impl Action<Suggestion> for ApplySuggestion {
    fn to_operations(issues: &[Suggestion]) -> Vec<Operation> {
        issues
            .iter()
            .map(|s| Operation::ReplaceLines {
                file_path: s.file_path.clone(),
                range: s.range,
                original: s.original_lines.clone(),
                replacement: s.replacement_block.clone(),
            })
            .collect()
    }
}
