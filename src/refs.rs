// SPDX-License-Identifier: PMPL-1.0-or-later

//! Reference and definition search across the skin's markup corpus.
//!
//! Walks the directory of the file being edited, scanning every `.xml`
//! file line by line for a target word. Matching is case-insensitive
//! substring search, the way skin engines treat names, with an optional
//! custom matcher for definition-site lookups ($EXP/$VAR expressions,
//! includes, fonts).

use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// One located occurrence of a word.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WordHit {
    /// File containing the hit.
    pub file: PathBuf,
    /// 1-based line number.
    pub line: usize,
    /// 0-based column of the first character of the word.
    pub column: usize,
}

/// Definition-site shapes a skin name can have.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefinitionKind {
    /// `$EXP[name]` usage, defined as `<expression name="...">`.
    Expression,
    /// `$VAR[name]` usage, defined as `<variable name="...">`.
    Variable,
    /// `<include>name</include>` usage, defined as `<include name="...">`.
    Include,
    /// Font references, defined as `<name>...</name>` in Font.xml.
    Font,
}

impl DefinitionKind {
    /// Pick the definition kind from the usage line, mirroring how the
    /// reference is written at the call site.
    pub fn classify(word: &str, line: &str) -> Option<Self> {
        let line = line.to_lowercase();
        let word = word.to_lowercase();
        if line.contains(&format!("$exp[{word}")) {
            Some(DefinitionKind::Expression)
        } else if line.contains(&format!("$var[{word}")) {
            Some(DefinitionKind::Variable)
        } else if line.contains("include") {
            Some(DefinitionKind::Include)
        } else if line.contains("font") {
            Some(DefinitionKind::Font)
        } else {
            None
        }
    }

    /// The markup substring that marks the definition site for `word`.
    pub fn matcher(&self, word: &str) -> String {
        match self {
            DefinitionKind::Expression => format!("<expression name=\"{word}\""),
            DefinitionKind::Variable => format!("<variable name=\"{word}\""),
            DefinitionKind::Include => format!("<include name=\"{word}\""),
            DefinitionKind::Font => format!("<name>{word}</name>"),
        }
    }
}

/// Search all `.xml` files under `directory` for `word`.
///
/// `matcher` narrows the hit test to lines containing that substring
/// instead (definition search); the reported column still locates
/// `word` itself. `first_only` stops at the first hit.
pub fn find_word_in_files(
    directory: &Path,
    word: &str,
    matcher: Option<&str>,
    first_only: bool,
) -> Vec<WordHit> {
    let word = word.to_lowercase();
    let needle = matcher.map(str::to_lowercase);
    let needle = needle.as_deref().unwrap_or(&word);
    let mut hits = Vec::new();

    for entry in WalkDir::new(directory)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter(|e| {
            e.path()
                .extension()
                .and_then(|x| x.to_str())
                .map(|x| x.eq_ignore_ascii_case("xml"))
                .unwrap_or(false)
        })
    {
        let Ok(content) = fs::read_to_string(entry.path()) else {
            // Unreadable or non-UTF-8 files are skipped, not fatal.
            continue;
        };
        for (idx, line) in content.lines().enumerate() {
            let lower = line.to_lowercase();
            if !lower.contains(needle) {
                continue;
            }
            // Column of the word itself; a matcher line that does not
            // literally contain the word anchors at its start.
            let column = lower.find(&word).unwrap_or(0);
            hits.push(WordHit {
                file: entry.path().to_path_buf(),
                line: idx + 1,
                column,
            });
            if first_only {
                return hits;
            }
        }
    }
    hits
}

/// Locate the definition site of `word`, given the usage line.
///
/// Returns `None` when the usage line matches no known definition shape
/// or no definition exists in the corpus.
pub fn find_definition(directory: &Path, word: &str, usage_line: &str) -> Option<WordHit> {
    let kind = DefinitionKind::classify(word, usage_line)?;
    let matcher = kind.matcher(&word.to_lowercase());
    find_word_in_files(directory, word, Some(&matcher), true)
        .into_iter()
        .next()
}
