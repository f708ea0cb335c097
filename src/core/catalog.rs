//! Gettext `.po` catalog parsing.
//!
//! Produces logical entries (msgid, msgstr, starting line, obsolete flag)
//! together with the raw physical lines, which are needed later to locate
//! and replace the `msgstr` field of an entry.

use std::{fs, io, path::Path};

use thiserror::Error;

/// One logical catalog entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    /// Source text (msgid).
    pub id: String,
    /// Current translation (msgstr). Empty for plural entries.
    pub translation: String,
    /// 1-based line of the entry's first keyword (`msgctxt` or `msgid`).
    pub start_line: usize,
    /// Entry is commented out with `#~`.
    pub obsolete: bool,
}

impl CatalogEntry {
    pub fn new(
        id: impl Into<String>,
        translation: impl Into<String>,
        start_line: usize,
        obsolete: bool,
    ) -> Self {
        Self {
            id: id.into(),
            translation: translation.into(),
            start_line,
            obsolete,
        }
    }

    /// Obsolete entries, the header and untranslated entries carry nothing
    /// to check.
    pub fn is_checkable(&self) -> bool {
        !self.obsolete && !self.id.is_empty() && !self.translation.is_empty()
    }
}

/// A parsed catalog file.
#[derive(Debug, Clone)]
pub struct Catalog {
    pub path: String,
    /// Physical lines without line terminators.
    pub lines: Vec<String>,
    pub entries: Vec<CatalogEntry>,
}

#[derive(Debug, Error)]
pub enum CatalogParseError {
    #[error("failed to read catalog: {0}")]
    Read(#[from] io::Error),
    #[error("line {line}: malformed string literal")]
    MalformedString { line: usize },
    #[error("line {line}: string continuation outside of a field")]
    OrphanContinuation { line: usize },
    #[error("line {line}: unexpected content `{content}`")]
    UnexpectedLine { line: usize, content: String },
}

/// Read and parse the catalog at `file_path` under `root`.
///
/// The catalog keeps `file_path` as its name, so reports stay relative to
/// the source root.
pub fn read_catalog(root: &Path, file_path: &str) -> Result<Catalog, CatalogParseError> {
    let content = fs::read_to_string(root.join(file_path))?;
    parse_catalog(file_path, &content)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Context,
    Id,
    IdPlural,
    Str,
    StrPlural,
}

#[derive(Debug, Default)]
struct PendingEntry {
    start_line: Option<usize>,
    id: Option<String>,
    translation: String,
    plural: bool,
    has_msgstr: bool,
    obsolete: bool,
}

impl PendingEntry {
    fn finish(&mut self, entries: &mut Vec<CatalogEntry>) {
        let pending = std::mem::take(self);
        if let (Some(id), Some(start_line)) = (pending.id, pending.start_line) {
            entries.push(CatalogEntry {
                id,
                translation: if pending.plural {
                    String::new()
                } else {
                    pending.translation
                },
                start_line,
                obsolete: pending.obsolete,
            });
        }
    }
}

/// Parse catalog text.
pub fn parse_catalog(
    path: impl Into<String>,
    content: &str,
) -> Result<Catalog, CatalogParseError> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let lines: Vec<String> = content.lines().map(str::to_string).collect();
    let mut entries = Vec::new();
    let mut pending = PendingEntry::default();
    let mut field: Option<Field> = None;

    for (idx, raw) in lines.iter().enumerate() {
        let line_no = idx + 1;
        let mut line = raw.trim();
        let mut obsolete = false;

        if let Some(rest) = line.strip_prefix("#~") {
            // `#~|` marks the previous msgid of an obsolete entry
            if rest.starts_with('|') {
                continue;
            }
            line = rest.trim_start();
            obsolete = true;
        }

        if line.is_empty() {
            if !obsolete {
                pending.finish(&mut entries);
                field = None;
            }
            continue;
        }

        if line.starts_with('#') {
            if pending.has_msgstr {
                pending.finish(&mut entries);
            }
            field = None;
            continue;
        }

        if line.starts_with('"') {
            let Some(fragment) = parse_quoted(line) else {
                return Err(CatalogParseError::MalformedString { line: line_no });
            };
            match field {
                Some(Field::Id) => {
                    if let Some(id) = pending.id.as_mut() {
                        id.push_str(&fragment);
                    }
                }
                Some(Field::Str) => pending.translation.push_str(&fragment),
                Some(Field::Context | Field::IdPlural | Field::StrPlural) => {}
                None => return Err(CatalogParseError::OrphanContinuation { line: line_no }),
            }
            continue;
        }

        let Some((keyword, rest)) = split_keyword(line) else {
            return Err(CatalogParseError::UnexpectedLine {
                line: line_no,
                content: line.to_string(),
            });
        };
        let next_field = match keyword {
            "msgctxt" => Field::Context,
            "msgid" => Field::Id,
            "msgid_plural" => Field::IdPlural,
            "msgstr" => Field::Str,
            k if k.starts_with("msgstr[") && k.ends_with(']') => Field::StrPlural,
            _ => {
                return Err(CatalogParseError::UnexpectedLine {
                    line: line_no,
                    content: line.to_string(),
                });
            }
        };
        let Some(value) = parse_quoted(rest) else {
            return Err(CatalogParseError::MalformedString { line: line_no });
        };

        match next_field {
            Field::Context | Field::Id => {
                // a new msgctxt/msgid after a msgstr starts the next entry
                if pending.has_msgstr || (next_field == Field::Id && pending.id.is_some()) {
                    pending.finish(&mut entries);
                }
                if pending.start_line.is_none() {
                    pending.start_line = Some(line_no);
                }
                if next_field == Field::Id {
                    pending.id = Some(value);
                }
            }
            Field::IdPlural => pending.plural = true,
            Field::Str => {
                pending.translation = value;
                pending.has_msgstr = true;
            }
            Field::StrPlural => pending.has_msgstr = true,
        }
        pending.obsolete |= obsolete;
        field = Some(next_field);
    }

    pending.finish(&mut entries);

    Ok(Catalog {
        path: path.into(),
        lines,
        entries,
    })
}

fn split_keyword(line: &str) -> Option<(&str, &str)> {
    let end = line.find(|c: char| c.is_whitespace())?;
    Some((&line[..end], line[end..].trim_start()))
}

/// Parse a complete quoted literal, resolving escapes.
///
/// Returns `None` unless `s` is exactly one terminated string literal
/// (trailing whitespace allowed).
fn parse_quoted(s: &str) -> Option<String> {
    let inner = s.strip_prefix('"')?;
    let mut result = String::with_capacity(inner.len());
    let mut chars = inner.char_indices();

    while let Some((i, c)) = chars.next() {
        match c {
            '\\' => match chars.next()?.1 {
                'n' => result.push('\n'),
                't' => result.push('\t'),
                'r' => result.push('\r'),
                '"' => result.push('"'),
                '\\' => result.push('\\'),
                other => {
                    result.push('\\');
                    result.push(other);
                }
            },
            '"' => {
                return inner[i + 1..].trim().is_empty().then_some(result);
            }
            _ => result.push(c),
        }
    }

    None
}
