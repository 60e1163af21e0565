//! prospector-pipeline: the consultant pipeline engine.
//!
//! Layers, leaves first:
//! - [`transition`]: status changes and conversion detection
//! - [`projection`]: filter/search over the contact list
//! - [`stats`]: status counts, due-date buckets, response rate
//! - [`checklist`]: daily task tracker and day submission
//! - [`performance`]: streak, week/month completion, compliance rating
//! - [`import`]: per-row validated bulk import
//! - [`milestone`]: client-service project plan
//! - [`portal`]: client-portal loading sequence
//! - [`dashboard`]: the session controller tying them together
//!
//! Projections are pure functions over borrowed contacts. Mutations go
//! through a [`ContactStore`](prospector_storage::ContactStore) and a
//! [`Clock`](prospector_core::Clock), and fail with [`PipelineError`].

pub mod checklist;
pub mod dashboard;
mod error;
pub mod import;
pub mod milestone;
pub mod performance;
pub mod portal;
pub mod projection;
pub mod seed;
pub mod stats;
pub mod transition;

pub use checklist::{completion_percentage, BucketProgress, Checklist, Submission};
pub use dashboard::Dashboard;
pub use error::PipelineError;
pub use import::{import_batch, ImportCandidate, ImportReport, ImportRowError};
pub use milestone::{Milestone, MilestoneStatus, MilestoneStep, ProjectPlan};
pub use performance::{performance, Compliance, DayPerformance, PerformanceHistory};
pub use portal::{
    portal_route, Navigator, PortalSequence, PortalStage, RecordingNavigator, StageDelays,
};
pub use projection::{project, ContactFilter};
pub use seed::SessionSeed;
pub use stats::{
    aggregate, classify, days_until_contact, next_action, percent, response_rate, summarize,
    DueBuckets, DueFlags, NextAction, PipelineStats, PipelineSummary, StatusCounts, WeekWindow,
};
pub use transition::{
    apply_bulk_status, apply_status_change, apply_status_change_str, ConversionEvent,
    StatusChange,
};
