// SPDX-License-Identifier: PMPL-1.0-or-later

//! Bidirectional substitution engine.
//!
//! A small state machine driven by the shape of the user selection and
//! the line it sits on. Classification is a pure function so each branch
//! is testable on its own; the transforms are separate, with only the
//! resolve-or-create branch touching catalog state.

use crate::allocate;
use crate::catalog::Catalog;
use crate::error::LocalizeError;
use crate::types::{OutputMode, ReservedRange, SpanAdjust, SwapAction, SwapOutcome};
use regex::Regex;
use std::path::Path;
use std::sync::OnceLock;

/// Width of the `$LOCALIZE[` prefix consumed when unwrapping.
const WRAPPER_PREFIX_LEN: u32 = 10;

fn wrapped_ref_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)\$LOCALIZE\[\d+\]").unwrap())
}

fn numeric_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[0-9]+$").unwrap())
}

fn full_wrapped_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)^\$LOCALIZE\[([0-9]+)\]$").unwrap())
}

/// Decide which transformation applies. Pure: no catalog access.
///
/// Priority order matters — a numeric selection on a line that carries a
/// wrapped reference means the user is pointing inside the wrapper, so
/// unwrap wins over wrap. A selection covering the whole wrapped
/// reference is also an unwrap, with no span widening needed.
pub fn classify(selection: &str, line: &str) -> SwapAction {
    if selection.is_empty() {
        return SwapAction::NoOp;
    }
    if full_wrapped_regex().is_match(selection) {
        return SwapAction::Unwrap;
    }
    if numeric_regex().is_match(selection) {
        if wrapped_ref_regex().is_match(line) {
            return SwapAction::Unwrap;
        }
        return SwapAction::Wrap;
    }
    SwapAction::ResolveOrCreate
}

/// Unwrap transform: the bare digits replace the whole wrapped
/// reference. When the selection covers only the digits, the caller
/// widens the span over `$LOCALIZE[` and `]`; a selection that already
/// covers the full wrapper is replaced in place.
pub fn unwrap_transform(selection: &str) -> SwapOutcome {
    if let Some(caps) = full_wrapped_regex().captures(selection) {
        return SwapOutcome {
            action: SwapAction::Unwrap,
            replacement: Some(caps[1].to_string()),
            span_adjust: SpanAdjust::default(),
            new_id: None,
        };
    }
    SwapOutcome {
        action: SwapAction::Unwrap,
        replacement: Some(selection.to_string()),
        span_adjust: SpanAdjust {
            left: WRAPPER_PREFIX_LEN,
            right: 1,
        },
        new_id: None,
    }
}

/// Wrap transform: embed the bare id in the wrapper syntax.
pub fn wrap_transform(selection: &str) -> SwapOutcome {
    SwapOutcome {
        action: SwapAction::Wrap,
        replacement: Some(format!("$LOCALIZE[{selection}]")),
        span_adjust: SpanAdjust::default(),
        new_id: None,
    }
}

/// Resolve-or-create transform: look the text up in the shared catalog,
/// then the local one, allocating a new local entry on a double miss.
///
/// The returned outcome always reflects the catalog state after any
/// mutation — the freshly allocated entry is re-resolved from the same
/// `local` reference handed back to the caller.
///
/// # Errors
/// `AllocationExhausted` when a new entry is needed but the reserved
/// range is full. Persist failures during allocation are reported via
/// `on_persist_error` and do not fail the substitution.
pub fn resolve_or_create(
    selection: &str,
    local: &mut Catalog,
    shared: &Catalog,
    range: ReservedRange,
    backup_dir: &Path,
    mode: OutputMode,
    on_persist_error: impl FnOnce(&LocalizeError),
) -> Result<SwapOutcome, LocalizeError> {
    let existing = shared
        .find_by_text(selection)
        .or_else(|| local.find_by_text(selection))
        .and_then(|e| e.id());

    let (id, new_id) = match existing {
        Some(id) => (id, None),
        None => {
            let id = allocate::allocate(selection, local, range, backup_dir, on_persist_error)?;
            (id, Some(id))
        }
    };

    Ok(SwapOutcome {
        action: SwapAction::ResolveOrCreate,
        replacement: Some(mode.render(id)),
        span_adjust: SpanAdjust::default(),
        new_id,
    })
}

/// Run the full engine: classify, then apply the matching transform.
///
/// # Errors
/// Only the resolve-or-create branch can fail, with
/// `AllocationExhausted`.
pub fn swap(
    selection: &str,
    line: &str,
    local: &mut Catalog,
    shared: &Catalog,
    range: ReservedRange,
    backup_dir: &Path,
    mode: OutputMode,
    on_persist_error: impl FnOnce(&LocalizeError),
) -> Result<SwapOutcome, LocalizeError> {
    match classify(selection, line) {
        SwapAction::NoOp => Ok(SwapOutcome::noop()),
        SwapAction::Unwrap => Ok(unwrap_transform(selection)),
        SwapAction::Wrap => Ok(wrap_transform(selection)),
        SwapAction::ResolveOrCreate => resolve_or_create(
            selection,
            local,
            shared,
            range,
            backup_dir,
            mode,
            on_persist_error,
        ),
    }
}
