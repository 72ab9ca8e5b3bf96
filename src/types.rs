// SPDX-License-Identifier: PMPL-1.0-or-later

//! Core type definitions for skin-localize.
//!
//! Shared by the catalog store, resolver, allocator, substitution engine,
//! and the CLI. Kept serde-friendly so the CLI can emit machine-readable
//! output for editor integrations.

use serde::{Deserialize, Serialize};

/// One identifier-to-text mapping inside a catalog.
///
/// `key` carries the numeric identifier in the catalog's native form,
/// a pound sign followed by digits (`#31005`). `text` is the source
/// string content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// Context key in `#<digits>` form.
    pub key: String,
    /// Localized source text.
    pub text: String,
}

impl Entry {
    /// Build an entry from a numeric id and its text.
    pub fn new(id: u32, text: impl Into<String>) -> Self {
        Entry {
            key: format!("#{id}"),
            text: text.into(),
        }
    }

    /// Numeric portion of the context key, if well-formed.
    pub fn id(&self) -> Option<u32> {
        self.key.strip_prefix('#').and_then(|d| d.parse().ok())
    }
}

/// The contiguous block of identifier values set aside for local-catalog
/// allocation. Everything outside this closed interval belongs to the
/// shared catalog.
///
/// This is the single named configuration value behind every range check
/// in the crate: extraction annotation, explicit lookups, and allocation
/// all route through [`ReservedRange::contains`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservedRange {
    /// Inclusive lower bound.
    pub floor: u32,
    /// Inclusive upper bound.
    pub ceiling: u32,
}

impl ReservedRange {
    /// Build a range. `floor` must not exceed `ceiling`; a degenerate
    /// single-value range is allowed.
    pub fn new(floor: u32, ceiling: u32) -> Self {
        debug_assert!(floor <= ceiling);
        ReservedRange { floor, ceiling }
    }

    /// Whether an id falls in the local reserved block.
    pub fn contains(&self, id: u32) -> bool {
        id >= self.floor && id <= self.ceiling
    }

    /// Ascending iterator over every id in the range.
    pub fn iter(&self) -> impl Iterator<Item = u32> {
        self.floor..=self.ceiling
    }
}

impl Default for ReservedRange {
    /// The observed skin convention: ids 31000-31999 belong to the skin.
    fn default() -> Self {
        ReservedRange {
            floor: 31000,
            ceiling: 31999,
        }
    }
}

/// How a resolve-or-create substitution renders its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    /// Full wrapped reference: `$LOCALIZE[31005]`.
    Full,
    /// Bare identifier: `31005`.
    IdOnly,
}

impl OutputMode {
    /// Render an id in this mode.
    pub fn render(&self, id: u32) -> String {
        match self {
            OutputMode::Full => format!("$LOCALIZE[{id}]"),
            OutputMode::IdOnly => id.to_string(),
        }
    }
}

/// Which transformation applies to a user selection, decided purely from
/// the selection text and the line it sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SwapAction {
    /// Selection is a numeric id inside a wrapped reference: widen the
    /// span over the wrapper and replace with the bare id.
    Unwrap,
    /// Selection is a bare numeric id: replace with the wrapped form.
    Wrap,
    /// Selection is free text: look it up in both catalogs, allocating a
    /// new local entry on a double miss.
    ResolveOrCreate,
    /// Empty or malformed selection: nothing to do.
    NoOp,
}

/// How many characters the caller must widen the replacement span on each
/// side of the original selection before applying [`SwapOutcome::replacement`].
///
/// Only the unwrap transformation widens: 10 characters left (the
/// `$LOCALIZE[` prefix) and 1 right (the closing bracket).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpanAdjust {
    /// Characters to extend leftward from the selection start.
    pub left: u32,
    /// Characters to extend rightward from the selection end.
    pub right: u32,
}

/// Result of one substitution-engine invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapOutcome {
    /// Which branch of the engine fired.
    pub action: SwapAction,
    /// Replacement text for the (possibly widened) span. `None` for NoOp.
    pub replacement: Option<String>,
    /// Span widening the caller must apply before replacing.
    pub span_adjust: SpanAdjust,
    /// Id freshly minted by the allocator, if the resolve-or-create
    /// branch had to create one.
    pub new_id: Option<u32>,
}

impl SwapOutcome {
    /// The no-op outcome: unchanged text, unchanged catalogs.
    pub fn noop() -> Self {
        SwapOutcome {
            action: SwapAction::NoOp,
            replacement: None,
            span_adjust: SpanAdjust::default(),
            new_id: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_id_parses_key() {
        assert_eq!(Entry::new(31000, "x").id(), Some(31000));
        let bad = Entry {
            key: "31000".to_string(),
            text: String::new(),
        };
        assert_eq!(bad.id(), None);
    }

    #[test]
    fn default_range_is_skin_block() {
        let r = ReservedRange::default();
        assert!(r.contains(31000));
        assert!(r.contains(31999));
        assert!(!r.contains(30999));
        assert!(!r.contains(32000));
    }

    #[test]
    fn output_mode_rendering() {
        assert_eq!(OutputMode::Full.render(313), "$LOCALIZE[313]");
        assert_eq!(OutputMode::IdOnly.render(313), "313");
    }
}
