//! Actions for processing audit results.
//!
//! ```text
//! Suggestion (violation with its correction)
//!     ↓
//! Action (Suggestion → Operation conversion)
//!     ↓
//! Operation (low-level file operation)
//!     ↓
//! execute (file modification)
//! ```

mod apply_suggestion;
mod operation;
mod traits;

pub use apply_suggestion::ApplySuggestion;
pub use operation::{LineEdit, Operation, replace_spans};
pub use traits::{Action, ActionStats};
