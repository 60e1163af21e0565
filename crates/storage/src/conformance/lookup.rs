use super::{make_contact, TestResult};
use crate::{ContactStore, StorageError};

pub(super) fn run_lookup_tests<S, F>(factory: &F) -> Vec<TestResult>
where
    S: ContactStore,
    F: Fn() -> S,
{
    vec![
        TestResult::from_result(
            "lookup",
            "get_unknown_id_returns_not_found",
            get_unknown_id_returns_not_found(factory),
        ),
        TestResult::from_result(
            "lookup",
            "find_by_email_ignores_case_and_whitespace",
            find_by_email_ignores_case_and_whitespace(factory),
        ),
        TestResult::from_result(
            "lookup",
            "find_by_email_misses_unknown",
            find_by_email_misses_unknown(factory),
        ),
    ]
}

// ── 1. get on a missing id ────────────────────────────────────────────────────

fn get_unknown_id_returns_not_found<S, F>(factory: &F) -> Result<(), String>
where
    S: ContactStore,
    F: Fn() -> S,
{
    let s = factory();
    match s.get("contact-999") {
        Err(StorageError::ContactNotFound { id }) if id == "contact-999" => Ok(()),
        other => Err(format!("expected ContactNotFound, got {:?}", other)),
    }
}

// ── 2. Email lookup is case-insensitive ───────────────────────────────────────

fn find_by_email_ignores_case_and_whitespace<S, F>(factory: &F) -> Result<(), String>
where
    S: ContactStore,
    F: Fn() -> S,
{
    let mut s = factory();
    s.insert(make_contact("c-1", "Sarah@Example.com"))
        .map_err(|e| format!("insert failed: {}", e))?;
    match s.find_by_email("  sarah@example.COM ") {
        Some(c) if c.id == "c-1" => Ok(()),
        other => Err(format!("expected c-1, got {:?}", other.map(|c| &c.id))),
    }
}

// ── 3. Email lookup misses ────────────────────────────────────────────────────

fn find_by_email_misses_unknown<S, F>(factory: &F) -> Result<(), String>
where
    S: ContactStore,
    F: Fn() -> S,
{
    let mut s = factory();
    s.insert(make_contact("c-1", "a@example.com"))
        .map_err(|e| format!("insert failed: {}", e))?;
    match s.find_by_email("b@example.com") {
        None => Ok(()),
        Some(c) => Err(format!("expected no match, got {}", c.id)),
    }
}
