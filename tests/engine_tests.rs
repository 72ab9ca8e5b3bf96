// SPDX-License-Identifier: PMPL-1.0-or-later

//! End-to-end tests for the substitution engine and catalog plumbing,
//! driven through the public `Session` API the way the CLI uses it.

use skin_localize::catalog::Catalog;
use skin_localize::error::LocalizeError;
use skin_localize::session::{Session, SkinPaths, DEFAULT_COUNTRY_CODE};
use skin_localize::types::{Entry, OutputMode, ReservedRange, SwapAction};
use std::fs;
use tempfile::TempDir;

/// Build a skin workspace with the given local entries on disk and
/// open a session over it.
fn open_session(
    local: &[(u32, &str)],
    shared: &[(u32, &str)],
    range: ReservedRange,
) -> (TempDir, Session) {
    let dir = TempDir::new().unwrap();
    let paths = SkinPaths::derive(dir.path(), DEFAULT_COUNTRY_CODE);
    fs::create_dir_all(paths.catalog_file.parent().unwrap()).unwrap();
    let local_cat = Catalog::from_entries(local.iter().map(|&(id, t)| Entry::new(id, t)).collect());
    fs::write(&paths.catalog_file, local_cat.serialize()).unwrap();
    let shared_cat =
        Catalog::from_entries(shared.iter().map(|&(id, t)| Entry::new(id, t)).collect());
    let session = Session::open(dir.path(), DEFAULT_COUNTRY_CODE, shared_cat, range).unwrap();
    (dir, session)
}

#[test]
fn range_boundaries_route_to_the_right_catalog() {
    let range = ReservedRange::default();
    let (_dir, session) = open_session(
        &[(31000, "local floor"), (31999, "local ceiling")],
        &[(30999, "shared below"), (32000, "shared above")],
        range,
    );

    assert_eq!(session.resolve_id("31000").as_deref(), Some("local floor"));
    assert_eq!(session.resolve_id("31999").as_deref(), Some("local ceiling"));
    assert_eq!(session.resolve_id("30999").as_deref(), Some("shared below"));
    assert_eq!(session.resolve_id("32000").as_deref(), Some("shared above"));
}

#[test]
fn allocate_then_resolve_round_trips() {
    let (_dir, mut session) = open_session(&[], &[], ReservedRange::default());

    let outcome = session
        .localize("Weather panel", "<label>Weather panel</label>", OutputMode::Full)
        .unwrap();
    assert_eq!(outcome.action, SwapAction::ResolveOrCreate);
    let id = outcome.new_id.expect("a fresh id should be minted");
    assert_eq!(
        session.resolve_id(&id.to_string()).as_deref(),
        Some("Weather panel")
    );
}

#[test]
fn existing_shared_text_is_reused_not_reallocated() {
    let (_dir, mut session) = open_session(&[], &[(222, "OK")], ReservedRange::default());

    let outcome = session
        .localize("OK", "<label>OK</label>", OutputMode::Full)
        .unwrap();
    assert_eq!(outcome.replacement.as_deref(), Some("$LOCALIZE[222]"));
    assert_eq!(outcome.new_id, None);
    assert!(session.local().entries().is_empty());
}

#[test]
fn existing_local_text_is_reused_in_id_only_mode() {
    let (_dir, mut session) =
        open_session(&[(31005, "My view")], &[], ReservedRange::default());

    let outcome = session
        .localize("My view", "<label>My view</label>", OutputMode::IdOnly)
        .unwrap();
    assert_eq!(outcome.replacement.as_deref(), Some("31005"));
    assert_eq!(outcome.new_id, None);
}

#[test]
fn exhausted_range_is_a_distinct_error_and_mutates_nothing() {
    let range = ReservedRange::new(31000, 31002);
    let full: Vec<(u32, &str)> = vec![(31000, "a"), (31001, "b"), (31002, "c")];
    let (_dir, mut session) = open_session(&full, &[], range);

    let err = session
        .localize("No room", "<label>No room</label>", OutputMode::Full)
        .unwrap_err();
    assert!(matches!(
        err,
        LocalizeError::AllocationExhausted {
            floor: 31000,
            ceiling: 31002
        }
    ));
    assert_eq!(session.local().entries().len(), 3);

    // Disk state is untouched too.
    session.reload_local().unwrap();
    assert_eq!(session.local().entries().len(), 3);
}

#[test]
fn allocation_persists_backup_of_pre_mutation_state() {
    let (dir, mut session) = open_session(&[(31000, "seed")], &[], ReservedRange::default());
    let paths = SkinPaths::derive(dir.path(), DEFAULT_COUNTRY_CODE);
    let before = fs::read_to_string(&paths.catalog_file).unwrap();

    session
        .localize("Second string", "x", OutputMode::Full)
        .unwrap();

    let backups: Vec<_> = fs::read_dir(&paths.backup_dir)
        .unwrap()
        .map(|e| e.unwrap().path())
        .collect();
    assert_eq!(backups.len(), 1, "exactly one new backup file");
    assert_eq!(
        fs::read_to_string(&backups[0]).unwrap(),
        before,
        "backup holds the pre-mutation serialization"
    );
    assert_eq!(
        fs::read_to_string(&paths.catalog_file).unwrap(),
        session.local().serialize(),
        "primary holds the post-mutation serialization"
    );
}

#[test]
fn numeric_selection_never_touches_catalogs() {
    let (_dir, mut session) = open_session(&[], &[], ReservedRange::default());

    let wrapped = session
        .localize("313", "<label>313</label>", OutputMode::Full)
        .unwrap();
    assert_eq!(wrapped.action, SwapAction::Wrap);
    assert_eq!(wrapped.replacement.as_deref(), Some("$LOCALIZE[313]"));

    let unwrapped = session
        .localize("313", "<label>$LOCALIZE[313]</label>", OutputMode::Full)
        .unwrap();
    assert_eq!(unwrapped.action, SwapAction::Unwrap);
    assert_eq!(unwrapped.replacement.as_deref(), Some("313"));
    assert_eq!(unwrapped.span_adjust.left, 10);
    assert_eq!(unwrapped.span_adjust.right, 1);

    assert!(session.local().entries().is_empty());
}

#[test]
fn custom_range_moves_the_routing_boundary() {
    // A variant skin extending the reserved block upward.
    let range = ReservedRange::new(31000, 33999);
    let (_dir, session) = open_session(&[(33500, "extended local")], &[(33500, "impostor")], range);
    assert_eq!(
        session.resolve_id("33500").as_deref(),
        Some("extended local")
    );
}
