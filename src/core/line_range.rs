use std::fmt;

/// Keyword that opens the translated-text field of an entry.
pub const TRANSLATION_FIELD: &str = "msgstr";

/// Inclusive physical line span of a `msgstr` literal (1-based).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LineRange {
    pub start_line: usize,
    pub end_line: usize,
}

impl LineRange {
    pub fn new(start_line: usize, end_line: usize) -> Self {
        debug_assert!(end_line >= start_line);
        Self {
            start_line,
            end_line,
        }
    }

    /// Number of physical lines covered.
    pub fn len(&self) -> usize {
        self.end_line - self.start_line + 1
    }

    pub fn is_single_line(&self) -> bool {
        self.start_line == self.end_line
    }
}

impl fmt::Display for LineRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_single_line() {
            write!(f, "{}", self.start_line)
        } else {
            write!(f, "{}-{}", self.start_line, self.end_line)
        }
    }
}

/// Locate the `msgstr` field of the entry starting at `start_line`.
///
/// Scans forward for the first line opening the field, then extends over
/// the quoted continuation fragments that follow it. Returns `None` when no
/// field marker exists before the end of the file.
pub fn resolve_line_range<S: AsRef<str>>(lines: &[S], start_line: usize) -> Option<LineRange> {
    let first = start_line.saturating_sub(1);

    let start_idx = lines
        .iter()
        .enumerate()
        .skip(first)
        .find(|(_, line)| line.as_ref().trim().starts_with(TRANSLATION_FIELD))
        .map(|(idx, _)| idx)?;

    let continuation_count = lines[start_idx + 1..]
        .iter()
        .take_while(|line| is_continuation(line.as_ref()))
        .count();

    Some(LineRange::new(
        start_idx + 1,
        start_idx + 1 + continuation_count,
    ))
}

/// A line holding only a quoted fragment, e.g. `"more text\n"`.
pub fn is_continuation(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.len() >= 2 && trimmed.starts_with('"') && trimmed.ends_with('"')
}
