//! Task checklist tracker.
//!
//! A checklist is an ordered map of bucket to tasks for one calendar day.
//! Tasks only change through [`Checklist::toggle`]; the day is closed with
//! [`Checklist::submit`], which requires every task to be complete and can
//! never be undone.

use std::collections::{BTreeMap, HashSet};

use prospector_core::{Task, TaskBucket};
use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

use crate::error::PipelineError;
use crate::stats::percent;

/// Percent of `tasks` that are complete, rounded; 0 for an empty list.
pub fn completion_percentage(tasks: &[Task]) -> u8 {
    percent(tasks.iter().filter(|t| t.completed).count(), tasks.len())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Checklist {
    #[serde(with = "prospector_core::dates::required")]
    date: Date,
    buckets: BTreeMap<TaskBucket, Vec<Task>>,
    #[serde(default)]
    submitted: bool,
    #[serde(
        default,
        with = "time::serde::rfc3339::option",
        skip_serializing_if = "Option::is_none"
    )]
    submitted_at: Option<OffsetDateTime>,
}

/// Outcome of a successful [`Checklist::submit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Submission {
    #[serde(with = "time::serde::rfc3339")]
    pub submitted_at: OffsetDateTime,
    /// False when the day had already been submitted.
    pub newly_submitted: bool,
}

/// Completion of one bucket, for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BucketProgress {
    pub bucket: TaskBucket,
    pub completed: usize,
    pub total: usize,
    pub percent: u8,
}

impl Checklist {
    pub fn new<I>(date: Date, buckets: I) -> Self
    where
        I: IntoIterator<Item = (TaskBucket, Vec<Task>)>,
    {
        Checklist {
            date,
            buckets: buckets.into_iter().collect(),
            submitted: false,
            submitted_at: None,
        }
    }

    /// Task ids must be unique across the whole checklist, and a submitted
    /// checklist must carry its submission time.
    pub fn validate(&self) -> Result<(), PipelineError> {
        let mut seen = HashSet::new();
        for task in self.buckets.values().flatten() {
            if !seen.insert(task.id.as_str()) {
                return Err(PipelineError::Validation(format!(
                    "duplicate task id '{}' in checklist for {}",
                    task.id,
                    prospector_core::dates::format_date(self.date)
                )));
            }
        }
        if self.submitted != self.submitted_at.is_some() {
            return Err(PipelineError::Validation(
                "submitted and submitted_at disagree".to_string(),
            ));
        }
        Ok(())
    }

    pub fn date(&self) -> Date {
        self.date
    }

    pub fn is_submitted(&self) -> bool {
        self.submitted
    }

    pub fn submitted_at(&self) -> Option<OffsetDateTime> {
        self.submitted_at
    }

    /// Tasks of one bucket; empty if the bucket is not part of this list.
    pub fn tasks(&self, bucket: TaskBucket) -> &[Task] {
        self.buckets.get(&bucket).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn buckets(&self) -> impl Iterator<Item = (TaskBucket, &[Task])> + '_ {
        self.buckets.iter().map(|(b, tasks)| (*b, tasks.as_slice()))
    }

    pub fn has_bucket(&self, bucket: TaskBucket) -> bool {
        self.buckets.contains_key(&bucket)
    }

    /// Flip one task and return the bucket's tasks after the change.
    pub fn toggle(
        &mut self,
        bucket: TaskBucket,
        task_id: &str,
        now: OffsetDateTime,
    ) -> Result<&[Task], PipelineError> {
        let tasks = self
            .buckets
            .get_mut(&bucket)
            .ok_or_else(|| task_not_found(bucket, task_id))?;
        let task = tasks
            .iter_mut()
            .find(|t| t.id == task_id)
            .ok_or_else(|| task_not_found(bucket, task_id))?;
        let completed = task.toggle(now);
        tracing::debug!(%bucket, task = task_id, completed, "task toggled");
        Ok(tasks.as_slice())
    }

    pub fn bucket_completion(&self, bucket: TaskBucket) -> u8 {
        completion_percentage(self.tasks(bucket))
    }

    pub fn overall_completion(&self) -> u8 {
        let (done, total) = self.counts();
        percent(done, total)
    }

    /// Incomplete tasks across every bucket.
    pub fn remaining(&self) -> usize {
        let (done, total) = self.counts();
        total - done
    }

    pub fn progress(&self) -> Vec<BucketProgress> {
        self.buckets
            .iter()
            .map(|(bucket, tasks)| {
                let completed = tasks.iter().filter(|t| t.completed).count();
                BucketProgress {
                    bucket: *bucket,
                    completed,
                    total: tasks.len(),
                    percent: percent(completed, tasks.len()),
                }
            })
            .collect()
    }

    /// Close the day.
    ///
    /// Fails with `IncompleteSubmission` while any task is open, leaving
    /// the checklist untouched. A second submit keeps the first timestamp.
    pub fn submit(&mut self, now: OffsetDateTime) -> Result<Submission, PipelineError> {
        if let Some(submitted_at) = self.submitted_at {
            return Ok(Submission {
                submitted_at,
                newly_submitted: false,
            });
        }
        let remaining = self.remaining();
        if remaining > 0 {
            tracing::debug!(remaining, "submission refused");
            return Err(PipelineError::IncompleteSubmission { remaining });
        }
        self.submitted = true;
        self.submitted_at = Some(now);
        tracing::info!(date = %prospector_core::dates::format_date(self.date), "day submitted");
        Ok(Submission {
            submitted_at: now,
            newly_submitted: true,
        })
    }

    /// `(completed, total)` across every bucket.
    pub fn counts(&self) -> (usize, usize) {
        self.buckets
            .values()
            .flatten()
            .fold((0, 0), |(done, total), t| {
                (done + usize::from(t.completed), total + 1)
            })
    }
}

fn task_not_found(bucket: TaskBucket, task_id: &str) -> PipelineError {
    PipelineError::NotFound {
        kind: "task",
        id: format!("{}/{}", bucket, task_id),
    }
}
