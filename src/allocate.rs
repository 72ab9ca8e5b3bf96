// SPDX-License-Identifier: PMPL-1.0-or-later

//! Identifier allocation in the reserved local range.
//!
//! A linear ascending scan for the first free id. The range holds on the
//! order of a thousand values and allocation is a rare user-initiated
//! event, so no free-list bookkeeping is warranted.

use crate::catalog::Catalog;
use crate::error::LocalizeError;
use crate::types::{Entry, ReservedRange};

/// Allocate the lowest free id in `range` for `text`, insert the new
/// entry into the local catalog, and persist it with a backup.
///
/// Persistence failure is deliberately non-fatal: the error is reported
/// through `on_persist_error` and the in-memory catalog keeps the new
/// entry as the authoritative state — a later successful persist will
/// still carry it.
///
/// # Errors
/// `AllocationExhausted` when every id in the range is occupied; the
/// catalog is left unmodified in that case.
pub fn allocate(
    text: &str,
    local: &mut Catalog,
    range: ReservedRange,
    backup_dir: &std::path::Path,
    on_persist_error: impl FnOnce(&LocalizeError),
) -> Result<u32, LocalizeError> {
    let id = first_free_id(local, range).ok_or(LocalizeError::AllocationExhausted {
        floor: range.floor,
        ceiling: range.ceiling,
    })?;

    local.insert(Entry::new(id, text));
    if let Err(err) = local.persist(backup_dir) {
        on_persist_error(&err);
    }
    Ok(id)
}

/// The lowest unoccupied id in the range, if any.
pub fn first_free_id(local: &Catalog, range: ReservedRange) -> Option<u32> {
    range.iter().find(|&id| local.find_by_id(id).is_none())
}
