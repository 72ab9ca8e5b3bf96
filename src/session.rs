// SPDX-License-Identifier: PMPL-1.0-or-later

//! Session state: one object owning both catalogs and the workspace
//! layout, passed explicitly into every operation.
//!
//! The local catalog is cheap to reload and is re-read on demand to
//! tolerate manual edits made outside the tool; the shared catalog is
//! loaded once per session (it is large and changes rarely).

use crate::catalog::Catalog;
use crate::error::LocalizeError;
use crate::resolve;
use crate::swap;
use crate::types::{OutputMode, ReservedRange, SwapOutcome};
use std::path::{Path, PathBuf};

/// Default locale directory variant for skin string files.
pub const DEFAULT_COUNTRY_CODE: &str = "en_gb";

/// Workspace layout for a skin project rooted at `root`.
#[derive(Debug, Clone)]
pub struct SkinPaths {
    /// The skin's `strings.po`.
    pub catalog_file: PathBuf,
    /// Sibling backup directory, created on first persist.
    pub backup_dir: PathBuf,
}

impl SkinPaths {
    /// Derive the fixed relative layout:
    /// `<root>/language/resource.language.<country_code>/strings.po`
    /// with `backup/` alongside it.
    pub fn derive(root: &Path, country_code: &str) -> Self {
        let language_dir = root
            .join("language")
            .join(format!("resource.language.{country_code}"));
        SkinPaths {
            catalog_file: language_dir.join("strings.po"),
            backup_dir: language_dir.join("backup"),
        }
    }
}

/// Catalog state for one editing session.
#[derive(Debug)]
pub struct Session {
    shared: Catalog,
    local: Catalog,
    paths: SkinPaths,
    range: ReservedRange,
}

impl Session {
    /// Open a session over a skin workspace, loading the local catalog
    /// from disk. The shared catalog is supplied by the caller (fetched
    /// remotely or loaded from a cached file, see [`crate::fetch`]).
    ///
    /// # Errors
    /// `CatalogLoadFailed` if the local strings file is missing or
    /// unparseable.
    pub fn open(
        root: &Path,
        country_code: &str,
        shared: Catalog,
        range: ReservedRange,
    ) -> Result<Self, LocalizeError> {
        let paths = SkinPaths::derive(root, country_code);
        let local = Catalog::load(&paths.catalog_file)?;
        Ok(Session {
            shared,
            local,
            paths,
            range,
        })
    }

    /// Re-read the local catalog from disk, discarding in-memory state.
    /// Called on editor focus changes so external manual edits win.
    ///
    /// # Errors
    /// `CatalogLoadFailed`; the previous in-memory catalog is kept
    /// untouched when the reload fails.
    pub fn reload_local(&mut self) -> Result<(), LocalizeError> {
        self.local = Catalog::load(&self.paths.catalog_file)?;
        Ok(())
    }

    /// The local skin catalog.
    pub fn local(&self) -> &Catalog {
        &self.local
    }

    /// The shared application catalog.
    pub fn shared(&self) -> &Catalog {
        &self.shared
    }

    /// The reserved-range configuration in force.
    pub fn range(&self) -> ReservedRange {
        self.range
    }

    /// Workspace layout.
    pub fn paths(&self) -> &SkinPaths {
        &self.paths
    }

    /// Resolve a raw id against the right catalog (range dispatch).
    pub fn resolve_id(&self, raw_id: &str) -> Option<String> {
        resolve::resolve(raw_id, &self.local, &self.shared, self.range)
    }

    /// Run the substitution engine on a selection within a line.
    ///
    /// Persist failures on the allocation path are logged to stderr and
    /// do not fail the command; the in-memory catalog stays authoritative.
    ///
    /// # Errors
    /// `AllocationExhausted` when free text needs a new entry and the
    /// reserved range is full.
    pub fn localize(
        &mut self,
        selection: &str,
        line: &str,
        mode: OutputMode,
    ) -> Result<SwapOutcome, LocalizeError> {
        swap::swap(
            selection,
            line,
            &mut self.local,
            &self.shared,
            self.range,
            &self.paths.backup_dir,
            mode,
            |err| eprintln!("warning: {err}"),
        )
    }
}
