// SPDX-License-Identifier: PMPL-1.0-or-later

//! skin-localize — localization assistance for media-center skin
//! development.
//!
//! Skins reference user-visible strings by numeric id, resolved at
//! runtime against two translation catalogs: the application's large
//! shared vocabulary and the skin's own local strings file. This crate
//! implements the resolution and reconciliation engine behind the
//! editor tooling:
//!
//! 1. **Extraction**: find plausible localization ids on a markup line
//!    while filtering runtime-value false positives.
//! 2. **Resolution**: route each id to the owning catalog by numeric
//!    range and look up its text.
//! 3. **Substitution**: bidirectional swap between bare ids, wrapped
//!    `$LOCALIZE[..]` references, and free text — creating new local
//!    entries when no catalog knows the text.
//! 4. **Persistence**: full-file catalog writes preceded by timestamped
//!    backups.

pub mod allocate;
pub mod annotate;
pub mod catalog;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod refs;
pub mod resolve;
pub mod session;
pub mod swap;
pub mod types;
