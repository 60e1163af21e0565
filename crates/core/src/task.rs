//! Checklist tasks and the buckets they belong to.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::error::ParseEnumError;
use crate::label::parse_label;

/// Named group of checklist tasks.
///
/// The client-acquisition board uses identify / invite / converse; the
/// daily tracker calls the same three boxes box2 / box3 / box4.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskBucket {
    Identify,
    Invite,
    Converse,
    Box2,
    Box3,
    Box4,
}

impl TaskBucket {
    pub const ALL: [TaskBucket; 6] = [
        TaskBucket::Identify,
        TaskBucket::Invite,
        TaskBucket::Converse,
        TaskBucket::Box2,
        TaskBucket::Box3,
        TaskBucket::Box4,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TaskBucket::Identify => "identify",
            TaskBucket::Invite => "invite",
            TaskBucket::Converse => "converse",
            TaskBucket::Box2 => "box2",
            TaskBucket::Box3 => "box3",
            TaskBucket::Box4 => "box4",
        }
    }
}

impl fmt::Display for TaskBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for TaskBucket {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Seed files key the daily boxes as `box2_tasks` etc.
        let trimmed = s.trim();
        let base = trimmed.strip_suffix("_tasks").unwrap_or(trimmed);
        parse_label("task bucket", base, &TaskBucket::ALL, TaskBucket::as_str)
            .map_err(|_| ParseEnumError::new("task bucket", s))
    }
}

/// A single checklist item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(
        default,
        with = "time::serde::rfc3339::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub completed_at: Option<OffsetDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Task {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Task {
            id: id.into(),
            title: title.into(),
            completed: false,
            completed_at: None,
            notes: None,
        }
    }

    /// Flip completion. `completed_at` is set to `now` on completion and
    /// cleared on un-completion. Returns the new `completed` value.
    pub fn toggle(&mut self, now: OffsetDateTime) -> bool {
        self.completed = !self.completed;
        self.completed_at = if self.completed { Some(now) } else { None };
        self.completed
    }
}
