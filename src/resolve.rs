// SPDX-License-Identifier: PMPL-1.0-or-later

//! Identifier resolution across the two-catalog namespace.
//!
//! The numeric value of an id is the sole dispatch key: ids inside the
//! reserved range belong to the local skin catalog, everything else to
//! the shared application catalog. This is the one routing point reused
//! by annotation, explicit lookups, and allocation.

use crate::catalog::Catalog;
use crate::types::ReservedRange;

/// Resolve a raw identifier to its source text.
///
/// Routes to the local catalog when the id falls inside `range`,
/// otherwise to the shared catalog. A miss — or a raw identifier that is
/// not a non-negative integer — is `None`, never an error: callers in
/// the annotation path silently skip unresolved ids.
pub fn resolve(
    raw_id: &str,
    local: &Catalog,
    shared: &Catalog,
    range: ReservedRange,
) -> Option<String> {
    let id: u32 = raw_id.parse().ok()?;
    let catalog = if range.contains(id) { local } else { shared };
    catalog.find_by_id(id).map(|e| e.text.clone())
}
