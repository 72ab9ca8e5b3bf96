// SPDX-License-Identifier: PMPL-1.0-or-later

//! Minimal PO-file reader and writer.
//!
//! Handles the subset of gettext PO that skin string files actually use:
//! an optional header entry (empty msgid), then blocks of
//!
//! ```text
//! msgctxt "#31000"
//! msgid "Some text"
//! msgstr ""
//! ```
//!
//! Comment lines (`#.`, `#:`, plain `#`) and blank lines separate blocks
//! and are not preserved; the serializer emits a canonical minimal form.
//! Plural forms and obsolete (`#~`) entries are out of scope for skin
//! files and are skipped.

use crate::error::LocalizeError;
use crate::types::Entry;

/// A parsed PO document: the raw header block (verbatim, if present)
/// plus the ordered entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PoDocument {
    /// Header msgstr content (the `msgid ""` entry), if the file had one.
    pub header: Option<String>,
    /// Entries in file order.
    pub entries: Vec<Entry>,
}

/// Which multiline string field a parser block is currently appending to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    None,
    Msgctxt,
    Msgid,
    Msgstr,
}

/// One in-progress entry block during parsing.
#[derive(Debug, Default)]
struct Block {
    msgctxt: Option<String>,
    msgid: Option<String>,
    msgstr: Option<String>,
}

impl Block {
    fn is_empty(&self) -> bool {
        self.msgctxt.is_none() && self.msgid.is_none() && self.msgstr.is_none()
    }
}

/// Parse PO text into a document.
///
/// Tolerant of comments, blank lines, and continuation strings. Fails only
/// on a structurally broken string literal (unterminated quote), since a
/// file in that state cannot be trusted for round-tripping.
pub fn parse(source_desc: &str, text: &str) -> Result<PoDocument, LocalizeError> {
    let mut doc = PoDocument::default();
    let mut block = Block::default();
    let mut field = Field::None;

    for (lineno, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            // Blank line or comment ends the current block.
            if !block.is_empty() {
                flush(&mut doc, std::mem::take(&mut block));
                field = Field::None;
            }
            continue;
        }

        let (next_field, rest) = if let Some(r) = line.strip_prefix("msgctxt") {
            // A new msgctxt after any prior content starts a new block,
            // even without a separating blank line.
            if block.msgctxt.is_some() || block.msgstr.is_some() {
                flush(&mut doc, std::mem::take(&mut block));
            }
            (Field::Msgctxt, r)
        } else if let Some(r) = line.strip_prefix("msgid_plural") {
            // Plural source: skin files never use these; treat as msgid
            // continuation sink so the block still terminates cleanly.
            (Field::None, r)
        } else if let Some(r) = line.strip_prefix("msgid") {
            // A new msgid after a completed msgstr starts a new block.
            if block.msgstr.is_some() {
                flush(&mut doc, std::mem::take(&mut block));
            }
            (Field::Msgid, r)
        } else if let Some(r) = line.strip_prefix("msgstr") {
            (Field::Msgstr, r)
        } else if line.starts_with('"') {
            // Continuation of the previous field.
            (field, line)
        } else {
            // Unknown keyword; skip the line.
            continue;
        };

        let literal = unquote(rest.trim()).ok_or_else(|| {
            LocalizeError::load_failed(
                source_desc,
                format!("malformed string literal at line {}", lineno + 1),
            )
        })?;

        field = next_field;
        let slot = match field {
            Field::Msgctxt => &mut block.msgctxt,
            Field::Msgid => &mut block.msgid,
            Field::Msgstr => &mut block.msgstr,
            Field::None => continue,
        };
        match slot {
            Some(existing) => existing.push_str(&literal),
            None => *slot = Some(literal),
        }
    }

    if !block.is_empty() {
        flush(&mut doc, block);
    }
    Ok(doc)
}

/// Fold a finished block into the document.
fn flush(doc: &mut PoDocument, block: Block) {
    let msgid = block.msgid.unwrap_or_default();
    if msgid.is_empty() && block.msgctxt.is_none() {
        // Header entry.
        if doc.header.is_none() {
            doc.header = block.msgstr;
        }
        return;
    }
    let Some(key) = block.msgctxt else {
        // Entries without a context key carry no id and cannot take part
        // in id resolution; skip them.
        return;
    };
    doc.entries.push(Entry { key, text: msgid });
}

/// Render a document back to PO text.
pub fn serialize(doc: &PoDocument) -> String {
    let mut out = String::new();
    if let Some(header) = &doc.header {
        out.push_str("msgid \"\"\n");
        out.push_str(&format!("msgstr {}\n\n", quote(header)));
    }
    for entry in &doc.entries {
        out.push_str(&format!("msgctxt {}\n", quote(&entry.key)));
        out.push_str(&format!("msgid {}\n", quote(&entry.text)));
        out.push_str("msgstr \"\"\n\n");
    }
    out
}

/// Strip surrounding quotes and decode PO escapes. Returns `None` for a
/// literal that is not a single well-formed quoted string.
fn unquote(s: &str) -> Option<String> {
    let inner = s.strip_prefix('"')?.strip_suffix('"')?;
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next()? {
            'n' => out.push('\n'),
            't' => out.push('\t'),
            'r' => out.push('\r'),
            '"' => out.push('"'),
            '\\' => out.push('\\'),
            other => {
                // Unknown escape: keep it verbatim rather than guessing.
                out.push('\\');
                out.push(other);
            }
        }
    }
    Some(out)
}

/// Encode a string as a single-line PO literal.
fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            other => out.push(other),
        }
    }
    out.push('"');
    out
}
