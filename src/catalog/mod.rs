// SPDX-License-Identifier: PMPL-1.0-or-later

//! Catalog store: the in-memory representation of one translation
//! catalog, with backup-then-overwrite persistence.
//!
//! Two instances exist per session: the shared catalog (remote-sourced,
//! read-mostly, no on-disk path) and the local skin catalog (workspace
//! file, read-write). Mutation is insert-only; entries are never updated
//! in place once written.

pub mod po;

use crate::error::LocalizeError;
use crate::types::Entry;
use chrono::Utc;
use std::fs;
use std::path::{Path, PathBuf};

/// One translation catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    /// PO header block carried through load/persist untouched.
    header: Option<String>,
    /// Entries, unique by context key. Insert keeps these sorted
    /// lexicographically by key (see [`Catalog::insert`]).
    entries: Vec<Entry>,
    /// On-disk location; `None` for the remote shared catalog.
    path: Option<PathBuf>,
}

impl Catalog {
    /// Load a catalog from a local PO file.
    ///
    /// # Errors
    /// `CatalogLoadFailed` if the file is unreadable or unparseable. The
    /// caller surfaces this to the user and aborts the operation.
    pub fn load(path: &Path) -> Result<Self, LocalizeError> {
        let desc = path.display().to_string();
        let text = fs::read_to_string(path).map_err(|e| LocalizeError::load_failed(&desc, e))?;
        let mut catalog = Self::parse(&desc, &text)?;
        catalog.path = Some(path.to_path_buf());
        Ok(catalog)
    }

    /// Parse catalog text fetched from an arbitrary source (no on-disk
    /// path is associated, so the result cannot be persisted).
    ///
    /// # Errors
    /// `CatalogLoadFailed` on structurally broken PO text.
    pub fn parse(source_desc: &str, text: &str) -> Result<Self, LocalizeError> {
        let doc = po::parse(source_desc, text)?;
        Ok(Catalog {
            header: doc.header,
            entries: doc.entries,
            path: None,
        })
    }

    /// Build a catalog directly from entries. Test and tooling helper.
    pub fn from_entries(entries: Vec<Entry>) -> Self {
        Catalog {
            header: None,
            entries,
            path: None,
        }
    }

    /// The catalog's on-disk location, if it has one.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Attach an on-disk location (used when creating a fresh local
    /// catalog that has not been written yet).
    pub fn set_path(&mut self, path: PathBuf) {
        self.path = Some(path);
    }

    /// All entries in current order.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Find the entry whose source text matches exactly.
    pub fn find_by_text(&self, text: &str) -> Option<&Entry> {
        self.entries.iter().find(|e| e.text == text)
    }

    /// Find the entry with the given context key (`#NNN` form).
    pub fn find_by_key(&self, key: &str) -> Option<&Entry> {
        self.entries.iter().find(|e| e.key == key)
    }

    /// Find the entry for a numeric id.
    pub fn find_by_id(&self, id: u32) -> Option<&Entry> {
        self.find_by_key(&format!("#{id}"))
    }

    /// Append an entry and re-sort by context key.
    ///
    /// The sort is lexicographic on the full key string, not numeric.
    /// That matches the on-disk ordering skin projects already have
    /// (keys of different digit lengths interleave non-numerically);
    /// downstream tooling may depend on it, so it stays.
    pub fn insert(&mut self, entry: Entry) {
        self.entries.push(entry);
        self.entries.sort_by(|a, b| a.key.cmp(&b.key));
    }

    /// Render the catalog to its full PO serialization.
    pub fn serialize(&self) -> String {
        po::serialize(&po::PoDocument {
            header: self.header.clone(),
            entries: self.entries.clone(),
        })
    }

    /// Persist the catalog: back up the current on-disk file into
    /// `backup_dir` under a timestamp name, then overwrite the primary
    /// file with the full serialization.
    ///
    /// A missing primary file skips the backup step (first-ever persist
    /// of a fresh catalog). There is no transactional guarantee across
    /// the two steps; a crash in between leaves the backup as the
    /// recovery point.
    ///
    /// # Errors
    /// `PersistenceFailed` naming the step that failed. By policy the
    /// caller logs this and continues; the in-memory catalog remains
    /// authoritative for the session.
    pub fn persist(&self, backup_dir: &Path) -> Result<(), LocalizeError> {
        let Some(path) = &self.path else {
            return Err(LocalizeError::PersistenceFailed {
                stage: "write",
                path: PathBuf::from("<unbound>"),
                reason: "catalog has no on-disk location".to_string(),
            });
        };

        if path.exists() {
            fs::create_dir_all(backup_dir).map_err(|e| LocalizeError::PersistenceFailed {
                stage: "backup",
                path: backup_dir.to_path_buf(),
                reason: e.to_string(),
            })?;
            let backup_file = backup_dir.join(backup_file_name());
            fs::copy(path, &backup_file).map_err(|e| LocalizeError::PersistenceFailed {
                stage: "backup",
                path: backup_file,
                reason: e.to_string(),
            })?;
        }

        fs::write(path, self.serialize()).map_err(|e| LocalizeError::PersistenceFailed {
            stage: "write",
            path: path.clone(),
            reason: e.to_string(),
        })
    }
}

/// Backup filename: the ISO-8601 UTC timestamp with colons stripped
/// (colons are not portable in filenames), plus the catalog extension.
fn backup_file_name() -> String {
    let stamp = Utc::now().to_rfc3339().replace(':', "");
    format!("{stamp}.po")
}
