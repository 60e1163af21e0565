//! Bulk contact import.
//!
//! Rows arrive already parsed (the CSV reader is a separate concern). Each
//! row is validated on its own; a bad row is reported and skipped, never
//! aborting the batch.

use std::collections::HashSet;
use std::str::FromStr;

use prospector_core::{Clock, Contact, ParseEnumError, Relationship, Source, Status};
use prospector_storage::ContactStore;
use serde::{Deserialize, Serialize};

/// One candidate row. Header spellings from the CSV template are accepted
/// as aliases.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportCandidate {
    #[serde(alias = "Name")]
    pub name: String,
    #[serde(alias = "Company")]
    pub company: String,
    #[serde(alias = "Email")]
    pub email: String,
    #[serde(alias = "Title")]
    pub title: String,
    #[serde(alias = "Phone", skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(alias = "Source", skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(alias = "Relationship", skip_serializing_if = "Option::is_none")]
    pub relationship: Option<String>,
    #[serde(alias = "Status", skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(alias = "LinkedIn", skip_serializing_if = "Option::is_none")]
    pub linkedin_profile: Option<String>,
    #[serde(alias = "Notes", skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub is_dream_100: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportRowError {
    /// 1-based, header excluded.
    pub row: usize,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportReport {
    pub total: usize,
    pub successful: usize,
    pub errors: Vec<ImportRowError>,
    pub imported_ids: Vec<String>,
}

impl ImportReport {
    pub fn failed(&self) -> usize {
        self.errors.len()
    }
}

/// `local@domain.tld`: no whitespace, exactly one `@`, and a domain with a
/// dot that has text on both sides.
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}

fn optional_enum<T>(raw: Option<&str>, default: T) -> Result<T, String>
where
    T: FromStr<Err = ParseEnumError>,
{
    match raw.map(str::trim) {
        None | Some("") => Ok(default),
        Some(value) => value
            .parse()
            .map_err(|e: ParseEnumError| format!("Invalid {}: {}", e.kind, e.value)),
    }
}

fn optional_text(raw: &Option<String>) -> Option<String> {
    raw.as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Validate one row against the store and the emails accepted earlier in
/// the batch. Returns the first problem found.
fn validate_row(
    candidate: &ImportCandidate,
    store: &(impl ContactStore + ?Sized),
    batch_emails: &HashSet<String>,
) -> Result<(Source, Relationship, Status), String> {
    for (label, value) in [
        ("Name", &candidate.name),
        ("Company", &candidate.company),
        ("Email", &candidate.email),
    ] {
        if value.trim().is_empty() {
            return Err(format!("Missing required field: {}", label));
        }
    }

    let email = candidate.email.trim();
    if !is_valid_email(email) {
        return Err(format!("Invalid email format: {}", email));
    }
    if store.find_by_email(email).is_some() || batch_emails.contains(&email.to_lowercase()) {
        return Err(format!("Duplicate email: {} already exists", email));
    }

    let source = optional_enum(candidate.source.as_deref(), Source::EmailList)?;
    let relationship = optional_enum(candidate.relationship.as_deref(), Relationship::Prospect)?;
    let status = optional_enum(candidate.status.as_deref(), Status::Research)?;
    if !status.is_settable() {
        return Err(format!("Invalid status: {}", status));
    }
    Ok((source, relationship, status))
}

fn next_free_id<S: ContactStore + ?Sized>(store: &S, counter: &mut usize) -> String {
    loop {
        *counter += 1;
        let id = format!("contact-{}", counter);
        if !store.contains(&id) {
            return id;
        }
    }
}

/// Validate and insert a batch of candidate rows.
pub fn import_batch<S: ContactStore + ?Sized>(
    store: &mut S,
    clock: &dyn Clock,
    candidates: &[ImportCandidate],
) -> ImportReport {
    let mut report = ImportReport {
        total: candidates.len(),
        ..ImportReport::default()
    };
    let mut batch_emails = HashSet::new();
    let mut counter = store.len();
    let now = clock.now();

    for (index, candidate) in candidates.iter().enumerate() {
        let row = index + 1;
        let (source, relationship, status) = match validate_row(candidate, &*store, &batch_emails) {
            Ok(parsed) => parsed,
            Err(message) => {
                tracing::debug!(row, %message, "import row rejected");
                report.errors.push(ImportRowError { row, message });
                continue;
            }
        };

        let id = next_free_id(&*store, &mut counter);
        let email = candidate.email.trim().to_string();
        let mut contact = Contact::new(
            id.clone(),
            candidate.name.trim(),
            candidate.company.trim(),
            email.clone(),
            source,
            relationship,
            now,
        );
        contact.title = candidate.title.trim().to_string();
        contact.phone = optional_text(&candidate.phone);
        contact.linkedin_profile = optional_text(&candidate.linkedin_profile);
        contact.notes = optional_text(&candidate.notes);
        contact.latest_decision = status;
        contact.is_dream_100 = candidate.is_dream_100;

        if let Err(e) = store.insert(contact) {
            report.errors.push(ImportRowError {
                row,
                message: e.to_string(),
            });
            continue;
        }
        batch_emails.insert(email.to_lowercase());
        report.successful += 1;
        report.imported_ids.push(id);
    }

    tracing::info!(
        total = report.total,
        successful = report.successful,
        failed = report.failed(),
        "import finished"
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use prospector_core::ManualClock;
    use prospector_storage::MemoryContactStore;
    use time::macros::datetime;

    fn row(name: &str, company: &str, email: &str) -> ImportCandidate {
        ImportCandidate {
            name: name.into(),
            company: company.into(),
            email: email.into(),
            ..ImportCandidate::default()
        }
    }

    fn clock() -> ManualClock {
        ManualClock::new(datetime!(2025-08-06 10:00 UTC))
    }

    fn seeded() -> MemoryContactStore {
        let c = Contact::new(
            "contact-1",
            "Sarah Johnson",
            "TechFlow",
            "sarah@example.com",
            Source::LinkedIn,
            Relationship::Prospect,
            datetime!(2025-07-01 10:00 UTC),
        );
        MemoryContactStore::from_contacts(vec![c]).unwrap()
    }

    #[test]
    fn email_shapes() {
        assert!(is_valid_email("a@b.co"));
        assert!(is_valid_email("first.last@mail.example.org"));
        assert!(!is_valid_email("john.doe@"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("no-at.example.com"));
        assert!(!is_valid_email("a@localhost"));
        assert!(!is_valid_email("a@.com"));
        assert!(!is_valid_email("a@com."));
        assert!(!is_valid_email("a b@example.com"));
        assert!(!is_valid_email("a@b@c.com"));
    }

    #[test]
    fn accepted_rows_become_research_contacts() {
        let mut store = seeded();
        let report = import_batch(
            &mut store,
            &clock(),
            &[row("Mike Chen", "DataCorp", "mike@datacorp.com")],
        );
        assert_eq!(report.total, 1);
        assert_eq!(report.successful, 1);
        assert_eq!(report.imported_ids, ["contact-2"]);
        let c = store.get("contact-2").unwrap();
        assert_eq!(c.latest_decision, Status::Research);
        assert_eq!(c.source, Source::EmailList);
        assert_eq!(c.interaction_count, 0);
        assert_eq!(c.created_at, datetime!(2025-08-06 10:00 UTC));
    }

    #[test]
    fn bad_rows_are_reported_and_skipped() {
        let mut store = seeded();
        let rows = vec![
            row("Ann", "Acme", "ann@acme.com"),
            row("Bob", "", "bob@acme.com"),
            row("Cy", "Acme", "john.doe@"),
            row("Di", "Acme", "SARAH@example.com"),
            row("Ed", "Acme", "ann@acme.com"),
            row("", "", ""),
        ];
        let report = import_batch(&mut store, &clock(), &rows);
        assert_eq!(report.total, 6);
        assert_eq!(report.successful, 1);
        let messages: Vec<(usize, &str)> = report
            .errors
            .iter()
            .map(|e| (e.row, e.message.as_str()))
            .collect();
        assert_eq!(
            messages,
            [
                (2, "Missing required field: Company"),
                (3, "Invalid email format: john.doe@"),
                (4, "Duplicate email: SARAH@example.com already exists"),
                (5, "Duplicate email: ann@acme.com already exists"),
                (6, "Missing required field: Name"),
            ]
        );
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn optional_enum_columns_are_validated() {
        let mut store = MemoryContactStore::new();
        let mut good = row("Ann", "Acme", "ann@acme.com");
        good.source = Some("linkedin".into());
        good.status = Some("Reached Out".into());
        let mut bad = row("Bob", "Acme", "bob@acme.com");
        bad.source = Some("Fax".into());
        let mut undecided = row("Cy", "Acme", "cy@acme.com");
        undecided.status = Some("No Decision".into());

        let report = import_batch(&mut store, &clock(), &[good, bad, undecided]);
        assert_eq!(report.successful, 1);
        assert_eq!(report.errors[0].message, "Invalid source: Fax");
        assert_eq!(report.errors[1].message, "Invalid status: No Decision");
        let c = store.get("contact-1").unwrap();
        assert_eq!(c.source, Source::LinkedIn);
        assert_eq!(c.latest_decision, Status::ReachedOut);
    }

    #[test]
    fn generated_ids_skip_taken_ones() {
        let mut store = seeded();
        let c = Contact::new(
            "contact-2",
            "Taken",
            "X",
            "taken@x.com",
            Source::Referral,
            Relationship::Client,
            datetime!(2025-07-01 10:00 UTC),
        );
        store.insert(c).unwrap();
        let report = import_batch(&mut store, &clock(), &[row("N", "C", "n@c.com")]);
        assert_eq!(report.imported_ids, ["contact-3"]);
    }

    #[test]
    fn csv_header_aliases_deserialize() {
        let json = r#"[{"Name": "Ann", "Company": "Acme", "Email": "ann@acme.com", "Source": "YouTube"}]"#;
        let rows: Vec<ImportCandidate> = serde_json::from_str(json).unwrap();
        assert_eq!(rows[0].name, "Ann");
        assert_eq!(rows[0].source.as_deref(), Some("YouTube"));
    }

    #[test]
    fn empty_batch() {
        let mut store = MemoryContactStore::new();
        let report = import_batch(&mut store, &clock(), &[]);
        assert_eq!(report, ImportReport::default());
    }
}
