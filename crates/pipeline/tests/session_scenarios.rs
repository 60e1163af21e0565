//! End-to-end behaviour of a dashboard session seeded from the demo fixture.

use std::path::Path;

use prospector_core::{ManualClock, Status, TaskBucket};
use prospector_pipeline::{
    ContactFilter, Dashboard, ImportCandidate, MilestoneStatus, NextAction, PipelineError,
    PortalSequence, PortalStage, RecordingNavigator, SessionSeed, StageDelays,
};
use time::macros::{date, datetime};
use time::Duration;

fn fixture(name: &str) -> String {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("../../fixtures")
        .join(name);
    std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read {}: {}", path.display(), e))
}

fn session() -> (Dashboard, ManualClock) {
    let seed = SessionSeed::from_json_str(&fixture("demo-session.json")).unwrap();
    let clock = ManualClock::new(datetime!(2025-08-06 12:00 UTC));
    let dashboard = Dashboard::from_seed(seed, Box::new(clock.clone())).unwrap();
    (dashboard, clock)
}

#[test]
fn demo_session_stats() {
    let (d, _) = session();
    let stats = d.stats();
    assert_eq!(stats.total, 12);
    assert_eq!(stats.status_counts.total(), 12);
    assert_eq!(stats.status_counts.get(Status::Research), 2);
    assert_eq!(stats.status_counts.get(Status::ReachedOut), 2);
    assert_eq!(stats.status_counts.get(Status::Buy), 2);
    assert_eq!(stats.status_counts.get(Status::NoDecision), 1);
    assert_eq!(stats.due.due_today, ["contact-3", "contact-11"]);
    assert_eq!(stats.due.missed_yesterday, ["contact-1"]);
    assert_eq!(stats.due.overdue, ["contact-1", "contact-5", "contact-10"]);
    assert_eq!(stats.due.this_week, ["contact-4", "contact-7"]);
    assert_eq!(stats.response_rate, 70);

    let summary = d.summary();
    assert_eq!(summary.dream_100_total, 8);
    assert_eq!(summary.meeting, 2);
    assert_eq!(summary.contacted, 2);
}

#[test]
fn filtered_stats_sum_to_projection() {
    let (mut d, _) = session();
    d.set_filter(ContactFilter::parse("acme", "all", "", "").unwrap());
    let visible: Vec<String> = d.visible().iter().map(|c| c.id.clone()).collect();
    assert_eq!(visible, ["contact-2", "contact-8"]);
    assert_eq!(d.stats().status_counts.total(), visible.len());
}

#[test]
fn conversion_then_portal() {
    let (mut d, clock) = session();
    let before = d.contact("contact-5").unwrap().updated_at;
    clock.advance(Duration::minutes(1));
    let change = d.set_status("contact-5", Status::Buy).unwrap();
    assert!(change.contact.updated_at > before);
    let events = d.drain_conversions();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].previous, Status::SecondMeeting);

    let client = d.portal_client("contact-5").unwrap();
    let route = prospector_pipeline::portal_route("/client-portal", &client.id);

    let nav = RecordingNavigator::new();
    let mut seq = PortalSequence::new();
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .unwrap();
    assert!(rt.block_on(seq.run(&StageDelays::zero(), &nav, &route)));
    assert_eq!(seq.stage(), PortalStage::Done);
    assert_eq!(nav.routes(), ["/client-portal/contact-5"]);
}

#[test]
fn closed_contacts_have_no_next_action() {
    let (d, _) = session();
    assert_eq!(
        prospector_pipeline::next_action(d.contact("contact-8").unwrap()),
        NextAction::Closed
    );
    assert_eq!(
        prospector_pipeline::next_action(d.contact("contact-9").unwrap()),
        NextAction::Unscheduled
    );
    let soon = d.contact("contact-4").unwrap();
    assert_eq!(
        prospector_pipeline::days_until_contact(soon, d.reference_date()),
        Some(2)
    );
}

#[test]
fn import_sample_rows() {
    let (mut d, _) = session();
    let rows: Vec<ImportCandidate> = serde_json::from_str(&fixture("import-rows.json")).unwrap();
    let report = d.import(&rows);
    assert_eq!(report.total, 5);
    assert_eq!(report.successful, 2);
    assert_eq!(report.imported_ids, ["contact-13", "contact-14"]);
    let rows_failed: Vec<usize> = report.errors.iter().map(|e| e.row).collect();
    assert_eq!(rows_failed, [2, 3, 4]);
    assert_eq!(
        d.contact("contact-14").unwrap().latest_decision,
        Status::ReachedOut
    );
}

#[test]
fn daily_submission_flow() {
    let (mut d, _) = session();
    assert_eq!(d.daily().overall_completion(), 60);
    let err = d.submit_day().unwrap_err();
    assert_eq!(err, PipelineError::IncompleteSubmission { remaining: 6 });

    let open: Vec<(TaskBucket, String)> = d
        .daily()
        .buckets()
        .flat_map(|(b, tasks)| {
            tasks
                .iter()
                .filter(|t| !t.completed)
                .map(move |t| (b, t.id.clone()))
        })
        .collect();
    for (bucket, id) in &open {
        d.toggle_task(*bucket, id).unwrap();
    }
    let submission = d.submit_day().unwrap();
    assert!(submission.newly_submitted);
    assert_eq!(d.daily().overall_completion(), 100);

    d.toggle_task(TaskBucket::Box2, "box2_1").unwrap();
    assert!(d.daily().is_submitted());
}

#[test]
fn acquisition_tasks_and_milestones() {
    let (mut d, _) = session();
    let acquisition = d.acquisition().unwrap();
    assert_eq!(acquisition.bucket_completion(TaskBucket::Invite), 40);
    d.toggle_task(TaskBucket::Identify, "identify-2").unwrap();
    let acquisition = d.acquisition().unwrap();
    assert_eq!(acquisition.bucket_completion(TaskBucket::Identify), 40);

    let week3 = "milestone-week-3";
    let m = d.plan().get(week3).unwrap();
    assert_eq!(m.steps_progress(), 60);
    assert_eq!(m.display_name(), "Development Phase 2");
    d.toggle_milestone_step(week3, "step-4").unwrap();
    let m = d.toggle_milestone_step(week3, "step-5").unwrap();
    assert_eq!(m.effective_status(), MilestoneStatus::Completed);
    assert_eq!(d.plan().overall_progress(), 60);
}

#[test]
fn reference_date_comes_from_clock() {
    let (d, clock) = session();
    assert_eq!(d.reference_date(), date!(2025 - 08 - 06));
    clock.advance(Duration::days(1));
    assert_eq!(d.reference_date(), date!(2025 - 08 - 07));
    assert_eq!(d.stats().due.due_today, Vec::<String>::new());
}
