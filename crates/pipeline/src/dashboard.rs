//! The session controller.
//!
//! `Dashboard` owns the contact store, both checklists, the project plan
//! and the UI-facing selection/filter state. Every user action goes
//! through one of its methods; projections are recomputed from the store
//! on each call.

use std::collections::{BTreeMap, BTreeSet};
use std::iter;

use prospector_core::{Clock, Contact, Status, Task, TaskBucket, UserContext};
use prospector_storage::{ContactStore, MemoryContactStore};
use time::Date;

use crate::checklist::{Checklist, Submission};
use crate::error::PipelineError;
use crate::import::{import_batch, ImportCandidate, ImportReport};
use crate::milestone::{Milestone, ProjectPlan};
use crate::performance::{performance, PerformanceHistory};
use crate::portal::PortalSequence;
use crate::projection::{project, ContactFilter};
use crate::seed::SessionSeed;
use crate::stats::{aggregate, summarize, PipelineStats, PipelineSummary, WeekWindow};
use crate::transition::{apply_bulk_status, apply_status_change, ConversionEvent, StatusChange};

pub struct Dashboard<S = MemoryContactStore> {
    store: S,
    clock: Box<dyn Clock>,
    user: Option<UserContext>,
    daily: Checklist,
    history: Vec<Checklist>,
    acquisition: Option<Checklist>,
    plan: ProjectPlan,
    portals: BTreeMap<String, PortalSequence>,
    filter: ContactFilter,
    selection: BTreeSet<String>,
    conversions: Vec<ConversionEvent>,
    week: WeekWindow,
    reference_date: Option<Date>,
}

impl Dashboard<MemoryContactStore> {
    /// Start a session from a validated seed.
    pub fn from_seed(seed: SessionSeed, clock: Box<dyn Clock>) -> Result<Self, PipelineError> {
        seed.validate()?;
        let store = MemoryContactStore::from_contacts(seed.contacts)?;
        let mut dashboard = Dashboard::new(store, seed.daily, clock);
        dashboard.user = seed.user;
        dashboard.history = seed.history;
        dashboard.acquisition = seed.acquisition;
        dashboard.plan = seed.milestones;
        tracing::debug!(contacts = dashboard.store.len(), "session loaded");
        Ok(dashboard)
    }
}

impl<S: ContactStore> Dashboard<S> {
    pub fn new(store: S, daily: Checklist, clock: Box<dyn Clock>) -> Self {
        Dashboard {
            store,
            clock,
            user: None,
            daily,
            history: Vec::new(),
            acquisition: None,
            plan: ProjectPlan::default(),
            portals: BTreeMap::new(),
            filter: ContactFilter::default(),
            selection: BTreeSet::new(),
            conversions: Vec::new(),
            week: WeekWindow::default(),
            reference_date: None,
        }
    }

    pub fn with_week_window(mut self, week: WeekWindow) -> Self {
        self.week = week;
        self
    }

    /// Pin the date stats are computed against instead of the clock's today.
    pub fn with_reference_date(mut self, date: Date) -> Self {
        self.reference_date = Some(date);
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn user(&self) -> Option<&UserContext> {
        self.user.as_ref()
    }

    pub fn reference_date(&self) -> Date {
        self.reference_date.unwrap_or_else(|| self.clock.today())
    }

    pub fn week_window(&self) -> WeekWindow {
        self.week
    }

    pub fn contact(&self, id: &str) -> Result<&Contact, PipelineError> {
        self.store
            .get(id)
            .map_err(|_| PipelineError::contact_not_found(id))
    }

    // ── Filters and projections ───────────────

    pub fn filter(&self) -> &ContactFilter {
        &self.filter
    }

    pub fn set_filter(&mut self, filter: ContactFilter) {
        self.filter = filter;
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.filter.search = search.into();
    }

    /// Contacts passing the current filter, in store order.
    pub fn visible(&self) -> Vec<&Contact> {
        project(self.store.list(), &self.filter)
    }

    /// Stats over the visible contacts.
    pub fn stats(&self) -> PipelineStats {
        aggregate(self.visible(), self.reference_date(), self.week)
    }

    /// Dream 100 widget over every contact, ignoring the filter.
    pub fn summary(&self) -> PipelineSummary {
        summarize(self.store.list(), self.reference_date())
    }

    // ── Status changes ────────────────────────

    pub fn set_status(
        &mut self,
        contact_id: &str,
        status: Status,
    ) -> Result<StatusChange, PipelineError> {
        let change = apply_status_change(&mut self.store, &*self.clock, contact_id, status)?;
        self.conversions.extend(change.conversion.clone());
        Ok(change)
    }

    pub fn set_status_str(
        &mut self,
        contact_id: &str,
        raw: &str,
    ) -> Result<StatusChange, PipelineError> {
        let status = Status::parse_settable(raw)?;
        self.set_status(contact_id, status)
    }

    /// Conversion events raised since the last drain, oldest first.
    pub fn drain_conversions(&mut self) -> Vec<ConversionEvent> {
        std::mem::take(&mut self.conversions)
    }

    pub fn pending_conversions(&self) -> &[ConversionEvent] {
        &self.conversions
    }

    // ── Selection and bulk actions ────────────

    /// Add or drop one contact from the selection. Returns whether it is
    /// selected afterwards.
    pub fn toggle_selection(&mut self, contact_id: &str) -> Result<bool, PipelineError> {
        if !self.store.contains(contact_id) {
            return Err(PipelineError::contact_not_found(contact_id));
        }
        if self.selection.remove(contact_id) {
            Ok(false)
        } else {
            self.selection.insert(contact_id.to_string());
            Ok(true)
        }
    }

    /// Replace the selection with every visible contact.
    pub fn select_all_visible(&mut self) -> usize {
        let visible: BTreeSet<String> = self.visible().iter().map(|c| c.id.clone()).collect();
        self.selection = visible;
        self.selection.len()
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    pub fn selected(&self) -> impl Iterator<Item = &str> + '_ {
        self.selection.iter().map(String::as_str)
    }

    pub fn remove_contacts(&mut self, ids: &[String]) -> usize {
        let removed = self.store.remove_many(ids);
        for id in ids {
            self.selection.remove(id);
        }
        tracing::info!(requested = ids.len(), removed, "contacts removed");
        removed
    }

    pub fn remove_selected(&mut self) -> usize {
        let ids: Vec<String> = std::mem::take(&mut self.selection).into_iter().collect();
        self.remove_contacts(&ids)
    }

    /// Apply one status to the whole selection, all or nothing.
    pub fn set_status_for_selected(
        &mut self,
        status: Status,
    ) -> Result<Vec<StatusChange>, PipelineError> {
        let ids: Vec<String> = self.selection.iter().cloned().collect();
        let changes = apply_bulk_status(&mut self.store, &*self.clock, &ids, status)?;
        self.conversions
            .extend(changes.iter().filter_map(|c| c.conversion.clone()));
        Ok(changes)
    }

    // ── Import ────────────────────────────────

    pub fn import(&mut self, candidates: &[ImportCandidate]) -> ImportReport {
        import_batch(&mut self.store, &*self.clock, candidates)
    }

    // ── Checklists ────────────────────────────

    pub fn daily(&self) -> &Checklist {
        &self.daily
    }

    pub fn acquisition(&self) -> Option<&Checklist> {
        self.acquisition.as_ref()
    }

    /// Toggle a task in whichever checklist holds `bucket`.
    pub fn toggle_task(
        &mut self,
        bucket: TaskBucket,
        task_id: &str,
    ) -> Result<&[Task], PipelineError> {
        let now = self.clock.now();
        let checklist = if self.daily.has_bucket(bucket) {
            &mut self.daily
        } else {
            match self.acquisition.as_mut() {
                Some(list) if list.has_bucket(bucket) => list,
                _ => {
                    return Err(PipelineError::NotFound {
                        kind: "task",
                        id: format!("{}/{}", bucket, task_id),
                    })
                }
            }
        };
        checklist.toggle(bucket, task_id, now)
    }

    pub fn submit_day(&mut self) -> Result<Submission, PipelineError> {
        let now = self.clock.now();
        self.daily.submit(now)
    }

    /// Past daily checklists, as seeded.
    pub fn history(&self) -> &[Checklist] {
        &self.history
    }

    /// Streak and completion over the history plus today's checklist.
    pub fn performance(&self) -> PerformanceHistory {
        performance(
            self.history.iter().chain(iter::once(&self.daily)),
            self.reference_date(),
        )
    }

    // ── Client service ────────────────────────

    pub fn plan(&self) -> &ProjectPlan {
        &self.plan
    }

    pub fn toggle_milestone_step(
        &mut self,
        milestone_id: &str,
        step_id: &str,
    ) -> Result<&Milestone, PipelineError> {
        self.plan.toggle_step(milestone_id, step_id)
    }

    /// The contact a client portal may be opened for: it must exist and
    /// have converted.
    pub fn portal_client(&self, contact_id: &str) -> Result<&Contact, PipelineError> {
        let contact = self.contact(contact_id)?;
        if contact.latest_decision != Status::Buy {
            return Err(PipelineError::Validation(format!(
                "contact {} is at '{}', portal needs 'Buy'",
                contact_id, contact.latest_decision
            )));
        }
        Ok(contact)
    }

    /// The portal sequence kept for one converted contact. A sequence that
    /// has already run stays `Done`, so running it again is a no-op.
    pub fn portal_sequence(
        &mut self,
        contact_id: &str,
    ) -> Result<&mut PortalSequence, PipelineError> {
        self.portal_client(contact_id)?;
        Ok(self.portals.entry(contact_id.to_string()).or_default())
    }
}
