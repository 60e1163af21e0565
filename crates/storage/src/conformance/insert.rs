use super::{ids, make_contact, TestResult};
use crate::{ContactStore, StorageError};

pub(super) fn run_insert_tests<S, F>(factory: &F) -> Vec<TestResult>
where
    S: ContactStore,
    F: Fn() -> S,
{
    vec![
        TestResult::from_result(
            "insert",
            "empty_store_has_no_contacts",
            empty_store_has_no_contacts(factory),
        ),
        TestResult::from_result(
            "insert",
            "insert_makes_contact_readable",
            insert_makes_contact_readable(factory),
        ),
        TestResult::from_result(
            "insert",
            "insert_preserves_order",
            insert_preserves_order(factory),
        ),
        TestResult::from_result(
            "insert",
            "duplicate_id_is_rejected",
            duplicate_id_is_rejected(factory),
        ),
        TestResult::from_result(
            "insert",
            "rejected_duplicate_leaves_original",
            rejected_duplicate_leaves_original(factory),
        ),
    ]
}

// ── 1. A fresh store is empty ─────────────────────────────────────────────────

fn empty_store_has_no_contacts<S, F>(factory: &F) -> Result<(), String>
where
    S: ContactStore,
    F: Fn() -> S,
{
    let s = factory();
    if !s.is_empty() || s.len() != 0 || !s.list().is_empty() {
        return Err(format!("expected empty store, found {} contacts", s.len()));
    }
    Ok(())
}

// ── 2. Inserted contacts can be read back ─────────────────────────────────────

fn insert_makes_contact_readable<S, F>(factory: &F) -> Result<(), String>
where
    S: ContactStore,
    F: Fn() -> S,
{
    let mut s = factory();
    s.insert(make_contact("c-1", "one@example.com"))
        .map_err(|e| format!("insert failed: {}", e))?;
    let got = s.get("c-1").map_err(|e| format!("get failed: {}", e))?;
    if got.email != "one@example.com" {
        return Err(format!("expected email one@example.com, got {}", got.email));
    }
    if s.len() != 1 || !s.contains("c-1") {
        return Err("store does not report the inserted contact".to_string());
    }
    Ok(())
}

// ── 3. Listing follows insertion order ────────────────────────────────────────

fn insert_preserves_order<S, F>(factory: &F) -> Result<(), String>
where
    S: ContactStore,
    F: Fn() -> S,
{
    let mut s = factory();
    for id in ["c-3", "c-1", "c-2"] {
        s.insert(make_contact(id, &format!("{}@example.com", id)))
            .map_err(|e| format!("insert {} failed: {}", id, e))?;
    }
    let listed = ids(&s);
    if listed != ["c-3", "c-1", "c-2"] {
        return Err(format!("expected insertion order, got {:?}", listed));
    }
    Ok(())
}

// ── 4. Duplicate ids fail with DuplicateId ────────────────────────────────────

fn duplicate_id_is_rejected<S, F>(factory: &F) -> Result<(), String>
where
    S: ContactStore,
    F: Fn() -> S,
{
    let mut s = factory();
    s.insert(make_contact("c-1", "a@example.com"))
        .map_err(|e| format!("first insert failed: {}", e))?;
    match s.insert(make_contact("c-1", "b@example.com")) {
        Err(StorageError::DuplicateId { id }) if id == "c-1" => Ok(()),
        other => Err(format!("expected DuplicateId(c-1), got {:?}", other)),
    }
}

// ── 5. A rejected duplicate does not overwrite ────────────────────────────────

fn rejected_duplicate_leaves_original<S, F>(factory: &F) -> Result<(), String>
where
    S: ContactStore,
    F: Fn() -> S,
{
    let mut s = factory();
    s.insert(make_contact("c-1", "a@example.com"))
        .map_err(|e| format!("first insert failed: {}", e))?;
    let _ = s.insert(make_contact("c-1", "b@example.com"));
    let got = s.get("c-1").map_err(|e| format!("get failed: {}", e))?;
    if got.email != "a@example.com" || s.len() != 1 {
        return Err(format!(
            "duplicate insert modified store: email={}, len={}",
            got.email,
            s.len()
        ));
    }
    Ok(())
}
