// SPDX-License-Identifier: PMPL-1.0-or-later

//! Failure taxonomy for catalog operations.
//!
//! Only three things can actually go wrong in this tool: a catalog fails to
//! load, the reserved id range fills up, or a persist step fails. Lookup
//! misses and empty selections are ordinary control flow (`Option::None` /
//! `SwapAction::NoOp`), never errors.

use std::path::PathBuf;

/// Errors surfaced by catalog load, allocation, and persistence.
#[derive(Debug, thiserror::Error)]
pub enum LocalizeError {
    /// A catalog (local file or remote source) could not be loaded or
    /// parsed. Aborts the triggering command; any previously loaded
    /// in-memory catalog is left untouched.
    #[error("unable to load catalog from {source_desc}: {reason}")]
    CatalogLoadFailed {
        /// Human-readable description of the source (path or URL).
        source_desc: String,
        /// Underlying cause.
        reason: String,
    },

    /// Every identifier in the reserved range is already occupied. Blocks
    /// all future "create new string" operations until the project owner
    /// frees ids or extends the range, so this must reach the user intact.
    #[error("reserved id range #{floor}-#{ceiling} is fully occupied; no free id for a new string")]
    AllocationExhausted {
        /// Inclusive lower bound of the reserved range.
        floor: u32,
        /// Inclusive upper bound of the reserved range.
        ceiling: u32,
    },

    /// The backup copy or the primary write failed. Non-fatal by policy:
    /// callers log it and keep the in-memory catalog as the source of
    /// truth for the rest of the session.
    #[error("catalog persistence failed during {stage} for {path}: {reason}")]
    PersistenceFailed {
        /// Which step failed: "backup" or "write".
        stage: &'static str,
        /// File the step was operating on.
        path: PathBuf,
        /// Underlying cause.
        reason: String,
    },
}

impl LocalizeError {
    /// Build a `CatalogLoadFailed` from any displayable cause.
    pub fn load_failed(source_desc: impl Into<String>, reason: impl ToString) -> Self {
        LocalizeError::CatalogLoadFailed {
            source_desc: source_desc.into(),
            reason: reason.to_string(),
        }
    }
}
