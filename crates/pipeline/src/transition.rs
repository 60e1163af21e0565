//! Status transition engine.
//!
//! Status changes are unconstrained: any settable status may follow any
//! other. Execution follows:
//! 1. Target check (only settable statuses)
//! 2. Contact lookup
//! 3. Effect (decision + `updated_at` refresh)
//! 4. Conversion detection (non-Buy -> Buy emits one `ConversionEvent`)

use prospector_core::{Clock, Contact, ParseEnumError, Status};
use prospector_storage::ContactStore;
use serde::Serialize;
use time::{Duration, OffsetDateTime};

use crate::error::PipelineError;

// ──────────────────────────────────────────────
// Transition types
// ──────────────────────────────────────────────

/// Emitted when a contact moves into `Buy` from any other status.
///
/// Consumed by the client-portal collaborator (portal creation, welcome
/// email, milestone generation). The pipeline only produces it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConversionEvent {
    pub contact: Contact,
    pub previous: Status,
    #[serde(with = "time::serde::rfc3339")]
    pub converted_at: OffsetDateTime,
}

/// Result of a successful status change.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusChange {
    /// The contact after the change.
    pub contact: Contact,
    pub previous: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conversion: Option<ConversionEvent>,
}

impl StatusChange {
    pub fn is_conversion(&self) -> bool {
        self.conversion.is_some()
    }
}

/// A stamp strictly later than `prior`.
///
/// Uses `now` when the clock has moved past `prior`; otherwise one
/// nanosecond after `prior`, so two changes within a single clock tick (or
/// a clock behind seeded data) still order correctly.
pub(crate) fn next_stamp(prior: OffsetDateTime, now: OffsetDateTime) -> OffsetDateTime {
    if now > prior {
        now
    } else {
        prior + Duration::nanoseconds(1)
    }
}

fn ensure_settable(status: Status) -> Result<(), PipelineError> {
    if status.is_settable() {
        Ok(())
    } else {
        Err(ParseEnumError::new("status", status.as_str()).into())
    }
}

// ──────────────────────────────────────────────
// Execution
// ──────────────────────────────────────────────

/// Move a contact to `new_status`.
///
/// Refreshes `updated_at` and reports a [`ConversionEvent`] when the
/// contact enters `Buy` from a different status. `Buy -> Buy` and any move
/// out of `Buy` produce no event.
pub fn apply_status_change<S: ContactStore + ?Sized>(
    store: &mut S,
    clock: &dyn Clock,
    contact_id: &str,
    new_status: Status,
) -> Result<StatusChange, PipelineError> {
    ensure_settable(new_status)?;

    let mut contact = store
        .get(contact_id)
        .map_err(|_| PipelineError::contact_not_found(contact_id))?
        .clone();

    let previous = contact.latest_decision;
    let now = clock.now();
    contact.latest_decision = new_status;
    contact.updated_at = next_stamp(contact.updated_at, now);

    let conversion = if new_status == Status::Buy && previous != Status::Buy {
        Some(ConversionEvent {
            contact: contact.clone(),
            previous,
            converted_at: contact.updated_at,
        })
    } else {
        None
    };

    store.replace(contact.clone())?;

    tracing::info!(
        contact = %contact.id,
        from = %previous,
        to = %new_status,
        "status changed"
    );
    if conversion.is_some() {
        tracing::info!(contact = %contact.id, "contact converted");
    }

    Ok(StatusChange {
        contact,
        previous,
        conversion,
    })
}

/// Parse `raw` at the boundary, then apply it.
pub fn apply_status_change_str<S: ContactStore + ?Sized>(
    store: &mut S,
    clock: &dyn Clock,
    contact_id: &str,
    raw: &str,
) -> Result<StatusChange, PipelineError> {
    let status = Status::parse_settable(raw)?;
    apply_status_change(store, clock, contact_id, status)
}

/// Apply one status to several contacts.
///
/// All ids are checked before anything changes: one unknown id fails the
/// whole batch and leaves the store untouched.
pub fn apply_bulk_status<S: ContactStore + ?Sized>(
    store: &mut S,
    clock: &dyn Clock,
    contact_ids: &[String],
    new_status: Status,
) -> Result<Vec<StatusChange>, PipelineError> {
    ensure_settable(new_status)?;
    if let Some(missing) = contact_ids.iter().find(|id| !store.contains(id.as_str())) {
        return Err(PipelineError::contact_not_found(missing));
    }
    contact_ids
        .iter()
        .map(|id| apply_status_change(store, clock, id, new_status))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use prospector_core::{ManualClock, Relationship, Source};
    use prospector_storage::MemoryContactStore;
    use time::macros::datetime;

    fn contact(id: &str, status: Status) -> Contact {
        let mut c = Contact::new(
            id,
            format!("Name {}", id),
            "Acme Corp",
            format!("{}@acme.com", id),
            Source::LinkedIn,
            Relationship::Prospect,
            datetime!(2025-08-01 09:00 UTC),
        );
        c.latest_decision = status;
        c
    }

    fn setup(statuses: &[Status]) -> (MemoryContactStore, ManualClock) {
        let contacts = statuses
            .iter()
            .enumerate()
            .map(|(i, s)| contact(&format!("contact-{}", i + 1), *s))
            .collect();
        (
            MemoryContactStore::from_contacts(contacts).unwrap(),
            ManualClock::new(datetime!(2025-08-06 12:00 UTC)),
        )
    }

    #[test]
    fn change_sets_status_and_refreshes_updated_at() {
        let (mut store, clock) = setup(&[Status::Research]);
        let before = store.get("contact-1").unwrap().updated_at;
        let change =
            apply_status_change(&mut store, &clock, "contact-1", Status::ReachedOut).unwrap();
        assert_eq!(change.previous, Status::Research);
        assert_eq!(change.contact.latest_decision, Status::ReachedOut);
        assert!(change.contact.updated_at > before);
        assert_eq!(store.get("contact-1").unwrap(), &change.contact);
    }

    #[test]
    fn updated_at_strictly_increases_within_one_tick() {
        let (mut store, clock) = setup(&[Status::Research]);
        let a = apply_status_change(&mut store, &clock, "contact-1", Status::Postpone).unwrap();
        let b = apply_status_change(&mut store, &clock, "contact-1", Status::Referral).unwrap();
        assert!(b.contact.updated_at > a.contact.updated_at);
    }

    #[test]
    fn updated_at_advances_past_clock_behind_seed() {
        let (mut store, clock) = setup(&[Status::Research]);
        clock.set(datetime!(2020-01-01 00:00 UTC));
        let before = store.get("contact-1").unwrap().updated_at;
        let change = apply_status_change(&mut store, &clock, "contact-1", Status::Buy).unwrap();
        assert!(change.contact.updated_at > before);
    }

    #[test]
    fn entering_buy_emits_one_conversion() {
        let (mut store, clock) = setup(&[Status::SecondMeeting]);
        let change = apply_status_change(&mut store, &clock, "contact-1", Status::Buy).unwrap();
        let event = change.conversion.expect("conversion event");
        assert_eq!(event.previous, Status::SecondMeeting);
        assert_eq!(event.contact.latest_decision, Status::Buy);
        assert_eq!(event.converted_at, change.contact.updated_at);
    }

    #[test]
    fn buy_to_buy_and_leaving_buy_emit_nothing() {
        let (mut store, clock) = setup(&[Status::Buy]);
        let again = apply_status_change(&mut store, &clock, "contact-1", Status::Buy).unwrap();
        assert!(!again.is_conversion());
        let away = apply_status_change(&mut store, &clock, "contact-1", Status::DontBuy).unwrap();
        assert!(!away.is_conversion());
        let back = apply_status_change(&mut store, &clock, "contact-1", Status::Buy).unwrap();
        assert!(back.is_conversion());
    }

    #[test]
    fn every_settable_pair_is_allowed() {
        for from in Status::ALL {
            for to in Status::SETTABLE {
                let (mut store, clock) = setup(&[from]);
                let change = apply_status_change(&mut store, &clock, "contact-1", to).unwrap();
                assert_eq!(change.contact.latest_decision, to);
                assert_eq!(
                    change.is_conversion(),
                    to == Status::Buy && from != Status::Buy,
                    "{} -> {}",
                    from,
                    to
                );
            }
        }
    }

    #[test]
    fn unknown_contact_is_not_found() {
        let (mut store, clock) = setup(&[Status::Research]);
        let err = apply_status_change(&mut store, &clock, "contact-9", Status::Buy).unwrap_err();
        assert_eq!(
            err,
            PipelineError::NotFound {
                kind: "contact",
                id: "contact-9".into()
            }
        );
    }

    #[test]
    fn no_decision_is_rejected_without_mutation() {
        let (mut store, clock) = setup(&[Status::Research]);
        let before = store.get("contact-1").unwrap().clone();
        let err =
            apply_status_change(&mut store, &clock, "contact-1", Status::NoDecision).unwrap_err();
        assert!(matches!(err, PipelineError::InvalidEnum(_)));
        assert_eq!(store.get("contact-1").unwrap(), &before);
    }

    #[test]
    fn string_boundary_rejects_unknown_status() {
        let (mut store, clock) = setup(&[Status::Research]);
        let err = apply_status_change_str(&mut store, &clock, "contact-1", "Maybe").unwrap_err();
        assert_eq!(err.to_string(), "invalid status: 'Maybe'");
        let ok = apply_status_change_str(&mut store, &clock, "contact-1", "in-conversation");
        assert_eq!(ok.unwrap().contact.latest_decision, Status::InConversation);
    }

    #[test]
    fn bulk_change_is_all_or_nothing() {
        let (mut store, clock) = setup(&[Status::Research, Status::Research]);
        let ids = vec!["contact-1".to_string(), "contact-7".to_string()];
        assert!(apply_bulk_status(&mut store, &clock, &ids, Status::Buy).is_err());
        assert_eq!(
            store.get("contact-1").unwrap().latest_decision,
            Status::Research
        );

        let ids = vec!["contact-1".to_string(), "contact-2".to_string()];
        let changes = apply_bulk_status(&mut store, &clock, &ids, Status::Buy).unwrap();
        assert_eq!(changes.iter().filter(|c| c.is_conversion()).count(), 2);
    }
}
