//! Conformance test suite for `ContactStore` implementations.
//!
//! This module provides a backend-agnostic test suite that any
//! `ContactStore` implementation can run to verify correctness. The suite
//! covers:
//!
//! - **Insertion**: appending contacts, duplicate id detection, ordering
//! - **Lookup**: reads by id, case-insensitive email lookup
//! - **Mutation**: replacement by id, single and bulk removal
//!
//! # Usage
//!
//! Backend crates call [`run_conformance_suite`] with a factory function
//! that creates a fresh, empty store for each test:
//!
//! ```ignore
//! use prospector_storage::conformance::run_conformance_suite;
//!
//! #[test]
//! fn my_store_conformance() {
//!     let report = run_conformance_suite(MyStore::new);
//!     assert!(report.failed == 0, "{report}");
//! }
//! ```

mod insert;
mod lookup;
mod mutate;

use std::fmt;

use prospector_core::{Contact, Relationship, Source};
use time::macros::datetime;

use crate::ContactStore;

/// Result of a single conformance test.
#[derive(Debug, Clone)]
pub struct TestResult {
    /// Test category (e.g. "insert", "lookup", "mutate").
    pub category: String,
    /// Test name (e.g. "insert_preserves_order").
    pub name: String,
    /// Whether the test passed.
    pub passed: bool,
    /// Error message if the test failed.
    pub message: Option<String>,
}

impl TestResult {
    fn pass(category: &str, name: &str) -> Self {
        Self {
            category: category.to_string(),
            name: name.to_string(),
            passed: true,
            message: None,
        }
    }

    fn fail(category: &str, name: &str, msg: String) -> Self {
        Self {
            category: category.to_string(),
            name: name.to_string(),
            passed: false,
            message: Some(msg),
        }
    }

    fn from_result(category: &str, name: &str, result: Result<(), String>) -> Self {
        match result {
            Ok(()) => Self::pass(category, name),
            Err(msg) => Self::fail(category, name, msg),
        }
    }
}

/// Aggregated report from a full conformance suite run.
#[derive(Debug, Clone)]
pub struct ConformanceReport {
    pub results: Vec<TestResult>,
    pub passed: usize,
    pub failed: usize,
    pub total: usize,
}

impl fmt::Display for ConformanceReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Conformance: {}/{} passed ({} failed)",
            self.passed, self.total, self.failed
        )?;
        for r in &self.results {
            if !r.passed {
                writeln!(
                    f,
                    "  FAIL [{}/{}]: {}",
                    r.category,
                    r.name,
                    r.message.as_deref().unwrap_or("(no message)")
                )?;
            }
        }
        Ok(())
    }
}

/// Run the full conformance suite against a store implementation.
///
/// The `factory` function is called once per test to create a fresh, empty
/// store, ensuring test isolation.
pub fn run_conformance_suite<S, F>(factory: F) -> ConformanceReport
where
    S: ContactStore,
    F: Fn() -> S,
{
    let mut results = Vec::new();

    results.extend(insert::run_insert_tests(&factory));
    results.extend(lookup::run_lookup_tests(&factory));
    results.extend(mutate::run_mutate_tests(&factory));

    let passed = results.iter().filter(|r| r.passed).count();
    let total = results.len();

    ConformanceReport {
        results,
        passed,
        failed: total - passed,
        total,
    }
}

// ── Helpers ──────────────────────────────────────────────────────────────────

fn make_contact(id: &str, email: &str) -> Contact {
    Contact::new(
        id,
        format!("Contact {}", id),
        "Test Co",
        email,
        Source::LinkedIn,
        Relationship::Prospect,
        datetime!(2025-01-01 00:00 UTC),
    )
}

fn ids<S: ContactStore>(store: &S) -> Vec<String> {
    store.list().iter().map(|c| c.id.clone()).collect()
}
