//! Aggregation over a contact set: status counts, due-date buckets,
//! response rate and the grouped Dream 100 summary.
//!
//! All comparisons are on calendar dates; time of day never matters.

use std::collections::BTreeMap;

use prospector_core::{Contact, Status};
use serde::{Deserialize, Serialize};
use time::{Date, Duration};

/// `round(100 * part / whole)`, rounding halves up; 0 when `whole` is 0.
pub fn percent(part: usize, whole: usize) -> u8 {
    if whole == 0 {
        return 0;
    }
    let part = part.min(whole) as u64;
    let whole = whole as u64;
    ((200 * part + whole) / (2 * whole)) as u8
}

// ──────────────────────────────────────────────
// Week window
// ──────────────────────────────────────────────

/// Forward window used for the "this week" bucket.
///
/// With the defaults the window is `(reference, reference + 7 days]`:
/// today's contacts live in the due-today bucket, not here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeekWindow {
    pub days: u32,
    pub include_today: bool,
}

impl Default for WeekWindow {
    fn default() -> Self {
        WeekWindow {
            days: 7,
            include_today: false,
        }
    }
}

impl WeekWindow {
    pub fn contains(&self, reference: Date, date: Date) -> bool {
        let Some(end) = reference.checked_add(Duration::days(i64::from(self.days))) else {
            return date > reference;
        };
        let after_start = if self.include_today {
            date >= reference
        } else {
            date > reference
        };
        after_start && date <= end
    }
}

// ──────────────────────────────────────────────
// Per-contact classification
// ──────────────────────────────────────────────

/// Which due-date buckets a single contact falls into.
///
/// Buckets overlap: a contact due yesterday is both overdue (unless it is
/// at `Buy`) and, without an interaction logged yesterday, missed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DueFlags {
    pub overdue: bool,
    pub due_today: bool,
    pub missed_yesterday: bool,
    pub this_week: bool,
}

pub fn classify(contact: &Contact, reference: Date, window: WeekWindow) -> DueFlags {
    let Some(next) = contact.next_contact_date else {
        return DueFlags::default();
    };
    let yesterday = reference.previous_day();
    DueFlags {
        overdue: next < reference && contact.latest_decision != Status::Buy,
        due_today: next == reference,
        missed_yesterday: Some(next) == yesterday && contact.last_interaction != yesterday,
        this_week: window.contains(reference, next),
    }
}

/// Signed whole days from `reference` to the next contact date.
pub fn days_until_contact(contact: &Contact, reference: Date) -> Option<i64> {
    contact
        .next_contact_date
        .map(|next| (next - reference).whole_days())
}

/// What the list view shows in the "next action" column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "date", rename_all = "snake_case")]
pub enum NextAction {
    /// Decision is final (Buy / Don't Buy); nothing to schedule.
    Closed,
    #[serde(with = "prospector_core::dates::required")]
    Scheduled(Date),
    /// Open decision with no date yet.
    Unscheduled,
}

pub fn next_action(contact: &Contact) -> NextAction {
    if contact.latest_decision.is_closed() {
        return NextAction::Closed;
    }
    match contact.next_contact_date {
        Some(date) => NextAction::Scheduled(date),
        None => NextAction::Unscheduled,
    }
}

// ──────────────────────────────────────────────
// Aggregates
// ──────────────────────────────────────────────

/// Count per status. Every variant is present, zero or not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct StatusCounts(BTreeMap<Status, usize>);

impl Default for StatusCounts {
    fn default() -> Self {
        StatusCounts(Status::ALL.iter().map(|s| (*s, 0)).collect())
    }
}

impl StatusCounts {
    pub fn get(&self, status: Status) -> usize {
        self.0.get(&status).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.0.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Status, usize)> + '_ {
        self.0.iter().map(|(s, n)| (*s, *n))
    }

    fn bump(&mut self, status: Status) {
        *self.0.entry(status).or_insert(0) += 1;
    }
}

/// Contact ids per due-date bucket, in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DueBuckets {
    pub overdue: Vec<String>,
    pub due_today: Vec<String>,
    pub missed_yesterday: Vec<String>,
    pub this_week: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PipelineStats {
    pub total: usize,
    pub status_counts: StatusCounts,
    pub due: DueBuckets,
    /// Percent of contacted prospects that interacted more than once.
    pub response_rate: u8,
}

/// Aggregate a (usually already filtered) contact set.
pub fn aggregate<'a, I>(contacts: I, reference: Date, window: WeekWindow) -> PipelineStats
where
    I: IntoIterator<Item = &'a Contact>,
{
    let mut total = 0;
    let mut status_counts = StatusCounts::default();
    let mut due = DueBuckets::default();
    let mut responded = 0;
    let mut contacted = 0;

    for contact in contacts {
        total += 1;
        status_counts.bump(contact.latest_decision);

        let flags = classify(contact, reference, window);
        if flags.overdue {
            due.overdue.push(contact.id.clone());
        }
        if flags.due_today {
            due.due_today.push(contact.id.clone());
        }
        if flags.missed_yesterday {
            due.missed_yesterday.push(contact.id.clone());
        }
        if flags.this_week {
            due.this_week.push(contact.id.clone());
        }

        if contact.interaction_count > 0 {
            contacted += 1;
        }
        if contact.interaction_count > 1 {
            responded += 1;
        }
    }

    PipelineStats {
        total,
        status_counts,
        due,
        response_rate: percent(responded, contacted),
    }
}

/// Response rate alone, for callers that do not need the full aggregate.
pub fn response_rate<'a, I>(contacts: I) -> u8
where
    I: IntoIterator<Item = &'a Contact>,
{
    let (responded, contacted) = contacts.into_iter().fold((0, 0), |(r, c), contact| {
        (
            r + usize::from(contact.interaction_count > 1),
            c + usize::from(contact.interaction_count > 0),
        )
    });
    percent(responded, contacted)
}

/// The compact Dream 100 widget: statuses folded into pipeline stages
/// plus today's activity counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PipelineSummary {
    pub dream_100_total: usize,
    pub research: usize,
    /// Reached Out.
    pub contacted: usize,
    /// In Conversation + 2nd Meeting.
    pub meeting: usize,
    pub buy: usize,
    pub dont_buy: usize,
    pub due_today: usize,
    pub missed_yesterday: usize,
    pub overdue: usize,
    pub response_rate: u8,
}

pub fn summarize<'a, I>(contacts: I, reference: Date) -> PipelineSummary
where
    I: IntoIterator<Item = &'a Contact>,
{
    let contacts: Vec<&Contact> = contacts.into_iter().collect();
    let stats = aggregate(contacts.iter().copied(), reference, WeekWindow::default());
    let counts = &stats.status_counts;
    PipelineSummary {
        dream_100_total: contacts.iter().filter(|c| c.is_dream_100).count(),
        research: counts.get(Status::Research),
        contacted: counts.get(Status::ReachedOut),
        meeting: counts.get(Status::InConversation) + counts.get(Status::SecondMeeting),
        buy: counts.get(Status::Buy),
        dont_buy: counts.get(Status::DontBuy),
        due_today: stats.due.due_today.len(),
        missed_yesterday: stats.due.missed_yesterday.len(),
        overdue: stats.due.overdue.len(),
        response_rate: stats.response_rate,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prospector_core::{Relationship, Source};
    use time::macros::{date, datetime};

    const TODAY: Date = date!(2025 - 08 - 06);

    fn contact(id: &str, status: Status) -> Contact {
        let mut c = Contact::new(
            id,
            id,
            "Co",
            format!("{}@co.com", id),
            Source::Referral,
            Relationship::Prospect,
            datetime!(2025-07-01 09:00 UTC),
        );
        c.latest_decision = status;
        c
    }

    fn due(id: &str, status: Status, next: Option<Date>, last: Option<Date>) -> Contact {
        let mut c = contact(id, status);
        c.next_contact_date = next;
        c.last_interaction = last;
        c
    }

    #[test]
    fn percent_rounds_half_up_and_guards_zero() {
        assert_eq!(percent(0, 0), 0);
        assert_eq!(percent(1, 2), 50);
        assert_eq!(percent(2, 3), 67);
        assert_eq!(percent(1, 3), 33);
        assert_eq!(percent(1, 8), 13);
        assert_eq!(percent(12, 15), 80);
        assert_eq!(percent(15, 15), 100);
    }

    #[test]
    fn status_counts_cover_every_variant() {
        let contacts = vec![
            contact("a", Status::Research),
            contact("b", Status::Buy),
            contact("c", Status::ReachedOut),
        ];
        let stats = aggregate(&contacts, TODAY, WeekWindow::default());
        assert_eq!(stats.status_counts.get(Status::Research), 1);
        assert_eq!(stats.status_counts.get(Status::Buy), 1);
        assert_eq!(stats.status_counts.get(Status::ReachedOut), 1);
        for s in [
            Status::InConversation,
            Status::SecondMeeting,
            Status::DontBuy,
            Status::Postpone,
            Status::Referral,
            Status::NoDecision,
        ] {
            assert_eq!(stats.status_counts.get(s), 0, "{}", s);
        }
        assert_eq!(stats.status_counts.iter().count(), Status::ALL.len());
        assert_eq!(stats.status_counts.total(), stats.total);
    }

    #[test]
    fn missed_yesterday_without_interaction() {
        let c = due("a", Status::ReachedOut, Some(date!(2025 - 08 - 05)), None);
        let flags = classify(&c, TODAY, WeekWindow::default());
        assert!(flags.missed_yesterday);
        assert!(flags.overdue);
        assert!(!flags.due_today);
    }

    #[test]
    fn interaction_yesterday_clears_missed() {
        let y = date!(2025 - 08 - 05);
        let c = due("a", Status::ReachedOut, Some(y), Some(y));
        assert!(!classify(&c, TODAY, WeekWindow::default()).missed_yesterday);
    }

    #[test]
    fn buy_is_never_overdue() {
        let c = due("a", Status::Buy, Some(date!(2025 - 07 - 01)), None);
        assert!(!classify(&c, TODAY, WeekWindow::default()).overdue);
        let c = due("b", Status::DontBuy, Some(date!(2025 - 07 - 01)), None);
        assert!(classify(&c, TODAY, WeekWindow::default()).overdue);
    }

    #[test]
    fn due_today_is_not_overdue() {
        let c = due("a", Status::Research, Some(TODAY), None);
        let flags = classify(&c, TODAY, WeekWindow::default());
        assert!(flags.due_today);
        assert!(!flags.overdue);
        assert!(!flags.this_week);
    }

    #[test]
    fn week_window_boundaries() {
        let w = WeekWindow::default();
        assert!(!w.contains(TODAY, TODAY));
        assert!(w.contains(TODAY, date!(2025 - 08 - 07)));
        assert!(w.contains(TODAY, date!(2025 - 08 - 13)));
        assert!(!w.contains(TODAY, date!(2025 - 08 - 14)));
        assert!(!w.contains(TODAY, date!(2025 - 08 - 05)));

        let inclusive = WeekWindow {
            days: 7,
            include_today: true,
        };
        assert!(inclusive.contains(TODAY, TODAY));
    }

    #[test]
    fn no_next_date_means_no_buckets() {
        let c = due("a", Status::Research, None, None);
        let flags = classify(&c, TODAY, WeekWindow::default());
        assert_eq!(flags, DueFlags::default());
        assert_eq!(days_until_contact(&c, TODAY), None);
    }

    #[test]
    fn response_rate_counts_repeat_interactions() {
        let mut a = contact("a", Status::Research);
        a.interaction_count = 3;
        let mut b = contact("b", Status::Research);
        b.interaction_count = 1;
        let c = contact("c", Status::Research);
        let contacts = vec![a, b, c];
        assert_eq!(response_rate(&contacts), 50);
        assert_eq!(
            aggregate(&contacts, TODAY, WeekWindow::default()).response_rate,
            50
        );
    }

    #[test]
    fn response_rate_with_no_contacted_is_zero() {
        let contacts = vec![contact("a", Status::Research)];
        assert_eq!(response_rate(&contacts), 0);
        assert_eq!(response_rate(std::iter::empty::<&Contact>()), 0);
    }

    #[test]
    fn buckets_collect_ids_in_order() {
        let contacts = vec![
            due("a", Status::Research, Some(date!(2025 - 08 - 08)), None),
            due("b", Status::Research, Some(TODAY), None),
            due("c", Status::Postpone, Some(date!(2025 - 08 - 01)), None),
            due("d", Status::Research, Some(date!(2025 - 08 - 10)), None),
        ];
        let stats = aggregate(&contacts, TODAY, WeekWindow::default());
        assert_eq!(stats.due.this_week, ["a", "d"]);
        assert_eq!(stats.due.due_today, ["b"]);
        assert_eq!(stats.due.overdue, ["c"]);
        assert!(stats.due.missed_yesterday.is_empty());
    }

    #[test]
    fn next_action_and_days_until() {
        let next = date!(2025 - 08 - 09);
        let open = due("a", Status::Research, Some(next), None);
        assert_eq!(next_action(&open), NextAction::Scheduled(next));
        assert_eq!(days_until_contact(&open, TODAY), Some(3));
        let late = due("b", Status::Research, Some(date!(2025 - 08 - 04)), None);
        assert_eq!(days_until_contact(&late, TODAY), Some(-2));
        let closed = due("c", Status::DontBuy, Some(TODAY), None);
        assert_eq!(next_action(&closed), NextAction::Closed);
        let unscheduled = due("d", Status::Postpone, None, None);
        assert_eq!(next_action(&unscheduled), NextAction::Unscheduled);
    }

    #[test]
    fn summary_groups_meeting_stages() {
        let mut a = contact("a", Status::InConversation);
        a.is_dream_100 = true;
        let b = contact("b", Status::SecondMeeting);
        let mut c = contact("c", Status::ReachedOut);
        c.is_dream_100 = true;
        let contacts = vec![a, b, c];
        let s = summarize(&contacts, TODAY);
        assert_eq!(s.dream_100_total, 2);
        assert_eq!(s.meeting, 2);
        assert_eq!(s.contacted, 1);
        assert_eq!(s.buy, 0);
    }

    #[test]
    fn status_counts_serialize_with_labels() {
        let contacts = vec![contact("a", Status::DontBuy)];
        let stats = aggregate(&contacts, TODAY, WeekWindow::default());
        let json = serde_json::to_value(&stats.status_counts).unwrap();
        assert_eq!(json["Don't Buy"], 1);
        assert_eq!(json["Research"], 0);
    }
}
