//! Serialization of corrected values back into `.po` literal text.
//!
//! Text containing line breaks is wrapped the way gettext tools wrap it: an
//! empty opening literal followed by one quoted fragment per line, each but
//! the last ending in an escaped `\n`.

use super::line_range::TRANSLATION_FIELD;

/// Escape backslashes, then double quotes.
pub fn escape_po_string(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Leading whitespace of a physical line.
pub fn leading_whitespace(line: &str) -> &str {
    &line[..line.len() - line.trim_start().len()]
}

/// Format `field` with `text` as its value, every line prefixed by `indent`.
///
/// Lines of the returned block are separated by `\n`, without a trailing
/// newline.
pub fn format_field(field: &str, text: &str, indent: &str) -> String {
    let escaped = escape_po_string(text);

    if !escaped.contains('\n') {
        return format!("{}{} \"{}\"", indent, field, escaped);
    }

    let segments: Vec<&str> = escaped.split('\n').collect();
    let last = segments.len() - 1;

    let mut block = vec![format!("{}{} \"\"", indent, field)];
    for (i, segment) in segments.iter().enumerate() {
        if i < last {
            block.push(format!("{}\"{}\\n\"", indent, segment));
        } else {
            block.push(format!("{}\"{}\"", indent, segment));
        }
    }
    block.join("\n")
}

/// Format a replacement `msgstr` block for `text`.
pub fn format_translation(text: &str, indent: &str) -> String {
    format_field(TRANSLATION_FIELD, text, indent)
}
