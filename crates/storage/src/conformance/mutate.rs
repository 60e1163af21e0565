use prospector_core::Status;

use super::{ids, make_contact, TestResult};
use crate::{ContactStore, StorageError};

pub(super) fn run_mutate_tests<S, F>(factory: &F) -> Vec<TestResult>
where
    S: ContactStore,
    F: Fn() -> S,
{
    vec![
        TestResult::from_result(
            "mutate",
            "replace_returns_previous_and_stores_new",
            replace_returns_previous_and_stores_new(factory),
        ),
        TestResult::from_result(
            "mutate",
            "replace_keeps_position",
            replace_keeps_position(factory),
        ),
        TestResult::from_result(
            "mutate",
            "replace_unknown_returns_not_found",
            replace_unknown_returns_not_found(factory),
        ),
        TestResult::from_result(
            "mutate",
            "remove_returns_contact",
            remove_returns_contact(factory),
        ),
        TestResult::from_result(
            "mutate",
            "remove_unknown_returns_not_found",
            remove_unknown_returns_not_found(factory),
        ),
        TestResult::from_result(
            "mutate",
            "remove_many_skips_unknown_ids",
            remove_many_skips_unknown_ids(factory),
        ),
    ]
}

fn seeded<S, F>(factory: &F, count: usize) -> Result<S, String>
where
    S: ContactStore,
    F: Fn() -> S,
{
    let mut s = factory();
    for n in 1..=count {
        let id = format!("c-{}", n);
        s.insert(make_contact(&id, &format!("{}@example.com", id)))
            .map_err(|e| format!("insert {} failed: {}", id, e))?;
    }
    Ok(s)
}

// ── 1. replace swaps the record ───────────────────────────────────────────────

fn replace_returns_previous_and_stores_new<S, F>(factory: &F) -> Result<(), String>
where
    S: ContactStore,
    F: Fn() -> S,
{
    let mut s = seeded(factory, 1)?;
    let mut next = make_contact("c-1", "c-1@example.com");
    next.latest_decision = Status::Buy;
    let previous = s
        .replace(next)
        .map_err(|e| format!("replace failed: {}", e))?;
    if previous.latest_decision != Status::Research {
        return Err(format!(
            "expected previous status Research, got {}",
            previous.latest_decision
        ));
    }
    let stored = s.get("c-1").map_err(|e| format!("get failed: {}", e))?;
    if stored.latest_decision != Status::Buy {
        return Err(format!(
            "stored status should be Buy, got {}",
            stored.latest_decision
        ));
    }
    Ok(())
}

// ── 2. replace does not move the record ───────────────────────────────────────

fn replace_keeps_position<S, F>(factory: &F) -> Result<(), String>
where
    S: ContactStore,
    F: Fn() -> S,
{
    let mut s = seeded(factory, 3)?;
    s.replace(make_contact("c-2", "new@example.com"))
        .map_err(|e| format!("replace failed: {}", e))?;
    let listed = ids(&s);
    if listed != ["c-1", "c-2", "c-3"] {
        return Err(format!("replace reordered contacts: {:?}", listed));
    }
    Ok(())
}

// ── 3. replace on a missing id ────────────────────────────────────────────────

fn replace_unknown_returns_not_found<S, F>(factory: &F) -> Result<(), String>
where
    S: ContactStore,
    F: Fn() -> S,
{
    let mut s = seeded(factory, 1)?;
    match s.replace(make_contact("c-9", "x@example.com")) {
        Err(StorageError::ContactNotFound { id }) if id == "c-9" => {}
        other => return Err(format!("expected ContactNotFound, got {:?}", other)),
    }
    if s.len() != 1 {
        return Err("replace of unknown id inserted a record".to_string());
    }
    Ok(())
}

// ── 4. remove hands back the record ───────────────────────────────────────────

fn remove_returns_contact<S, F>(factory: &F) -> Result<(), String>
where
    S: ContactStore,
    F: Fn() -> S,
{
    let mut s = seeded(factory, 2)?;
    let removed = s
        .remove("c-1")
        .map_err(|e| format!("remove failed: {}", e))?;
    if removed.id != "c-1" {
        return Err(format!("removed wrong contact {}", removed.id));
    }
    if s.contains("c-1") || ids(&s) != ["c-2"] {
        return Err(format!("unexpected contents after remove: {:?}", ids(&s)));
    }
    Ok(())
}

// ── 5. remove on a missing id ─────────────────────────────────────────────────

fn remove_unknown_returns_not_found<S, F>(factory: &F) -> Result<(), String>
where
    S: ContactStore,
    F: Fn() -> S,
{
    let mut s = factory();
    match s.remove("c-1") {
        Err(StorageError::ContactNotFound { .. }) => Ok(()),
        other => Err(format!("expected ContactNotFound, got {:?}", other)),
    }
}

// ── 6. Bulk removal counts only present ids ───────────────────────────────────

fn remove_many_skips_unknown_ids<S, F>(factory: &F) -> Result<(), String>
where
    S: ContactStore,
    F: Fn() -> S,
{
    let mut s = seeded(factory, 4)?;
    let removed = s.remove_many(&["c-2".to_string(), "c-9".to_string(), "c-4".to_string()]);
    if removed != 2 {
        return Err(format!("expected 2 removals, got {}", removed));
    }
    if ids(&s) != ["c-1", "c-3"] {
        return Err(format!("unexpected contents: {:?}", ids(&s)));
    }
    Ok(())
}
