// SPDX-License-Identifier: PMPL-1.0-or-later

//! Inline annotation text for skin markup.
//!
//! For each line, extracts candidate ids and resolves them against the
//! session's catalogs; every hit contributes a ` • <text>` segment to
//! the annotation rendered at the end of the line. Misses are silent.

use crate::extract;
use crate::session::Session;
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Separator prefixed to each resolved segment.
const BULLET: &str = " • ";

/// One annotated line of a file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineAnnotation {
    /// 1-based line number.
    pub line: usize,
    /// The annotation text, bullet-separated.
    pub text: String,
}

/// Produce the annotation for a single line, if any id on it resolves.
///
/// Duplicate ids on one line each contribute their own segment, matching
/// per-occurrence annotation in the editor view.
pub fn annotate_line(line: &str, session: &Session) -> Option<String> {
    let mut out = String::new();
    for raw_id in extract::extract(line) {
        if let Some(text) = session.resolve_id(&raw_id) {
            out.push_str(BULLET);
            out.push_str(&text);
        }
    }
    if out.is_empty() {
        None
    } else {
        Some(out)
    }
}

/// Annotate every line of a file.
///
/// # Errors
/// Propagates the file read error; catalog misses are not errors.
pub fn annotate_file(path: &Path, session: &Session) -> anyhow::Result<Vec<LineAnnotation>> {
    let content = fs::read_to_string(path)?;
    Ok(content
        .lines()
        .enumerate()
        .filter_map(|(idx, line)| {
            annotate_line(line, session).map(|text| LineAnnotation {
                line: idx + 1,
                text,
            })
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::session::{Session, DEFAULT_COUNTRY_CODE};
    use crate::types::{Entry, ReservedRange};
    use tempfile::TempDir;

    fn session_with(local: &[(u32, &str)], shared: &[(u32, &str)]) -> (TempDir, Session) {
        let dir = TempDir::new().unwrap();
        let lang_dir = dir
            .path()
            .join("language")
            .join(format!("resource.language.{DEFAULT_COUNTRY_CODE}"));
        std::fs::create_dir_all(&lang_dir).unwrap();
        let local_cat =
            Catalog::from_entries(local.iter().map(|&(id, t)| Entry::new(id, t)).collect());
        std::fs::write(lang_dir.join("strings.po"), local_cat.serialize()).unwrap();
        let shared_cat =
            Catalog::from_entries(shared.iter().map(|&(id, t)| Entry::new(id, t)).collect());
        let session = Session::open(
            dir.path(),
            DEFAULT_COUNTRY_CODE,
            shared_cat,
            ReservedRange::default(),
        )
        .unwrap();
        (dir, session)
    }

    #[test]
    fn local_id_annotates_from_local_catalog() {
        let (_dir, session) = session_with(&[(31000, "Settings")], &[]);
        assert_eq!(
            annotate_line("$LOCALIZE[31000]", &session).as_deref(),
            Some(" • Settings")
        );
    }

    #[test]
    fn shared_id_annotates_from_shared_catalog() {
        let (_dir, session) = session_with(&[], &[(60000, "OK")]);
        assert_eq!(
            annotate_line("<label>60000</label>", &session).as_deref(),
            Some(" • OK")
        );
    }

    #[test]
    fn property_wrapped_number_produces_no_annotation() {
        let (_dir, session) = session_with(&[], &[(313, "Settings")]);
        assert_eq!(annotate_line("$INFO[Window.Property(313)]", &session), None);
    }

    #[test]
    fn misses_are_silent() {
        let (_dir, session) = session_with(&[], &[]);
        assert_eq!(annotate_line("$LOCALIZE[999]", &session), None);
        assert_eq!(annotate_line("no ids here", &session), None);
    }

    #[test]
    fn multiple_ids_join_in_line_order() {
        let (_dir, session) = session_with(&[(31000, "Local")], &[(313, "Settings")]);
        assert_eq!(
            annotate_line("$LOCALIZE[313] <label>31000</label>", &session).as_deref(),
            Some(" • Settings • Local")
        );
    }

    #[test]
    fn annotate_file_reports_line_numbers() {
        let (dir, session) = session_with(&[(31000, "Local")], &[]);
        let file = dir.path().join("home.xml");
        std::fs::write(&file, "<window>\n<label>31000</label>\n</window>\n").unwrap();
        let annotations = annotate_file(&file, &session).unwrap();
        assert_eq!(
            annotations,
            vec![LineAnnotation {
                line: 2,
                text: " • Local".to_string()
            }]
        );
    }
}
