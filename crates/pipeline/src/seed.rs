//! Session seed: the fixture a dashboard session starts from.

use std::collections::HashSet;

use prospector_core::dates::format_date;
use prospector_core::{Contact, TaskBucket, UserContext};
use serde::{Deserialize, Serialize};

use crate::checklist::Checklist;
use crate::error::PipelineError;
use crate::milestone::ProjectPlan;

const DAILY_BUCKETS: [TaskBucket; 3] = [TaskBucket::Box2, TaskBucket::Box3, TaskBucket::Box4];
const ACQUISITION_BUCKETS: [TaskBucket; 3] = [
    TaskBucket::Identify,
    TaskBucket::Invite,
    TaskBucket::Converse,
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSeed {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<UserContext>,
    pub contacts: Vec<Contact>,
    pub daily: Checklist,
    /// Earlier daily checklists, for streak and completion history.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub history: Vec<Checklist>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub acquisition: Option<Checklist>,
    #[serde(default)]
    pub milestones: ProjectPlan,
}

impl SessionSeed {
    /// Parse and validate a seed document.
    pub fn from_json_str(json: &str) -> Result<Self, PipelineError> {
        let seed: SessionSeed = serde_json::from_str(json)
            .map_err(|e| PipelineError::Validation(format!("invalid session seed: {}", e)))?;
        seed.validate()?;
        Ok(seed)
    }

    /// Record-level checks serde cannot express.
    pub fn validate(&self) -> Result<(), PipelineError> {
        let mut ids = HashSet::new();
        for contact in &self.contacts {
            contact.validate()?;
            if !ids.insert(contact.id.as_str()) {
                return Err(PipelineError::Validation(format!(
                    "duplicate contact id '{}'",
                    contact.id
                )));
            }
        }
        check_buckets("daily", &self.daily, &DAILY_BUCKETS)?;
        let mut dates = HashSet::new();
        for past in &self.history {
            check_buckets("history", past, &DAILY_BUCKETS)?;
            let date = format_date(past.date());
            if past.date() >= self.daily.date() {
                return Err(PipelineError::Validation(format!(
                    "history checklist for {} is not before the current day",
                    date
                )));
            }
            if !dates.insert(past.date()) {
                return Err(PipelineError::Validation(format!(
                    "duplicate history checklist for {}",
                    date
                )));
            }
        }
        if let Some(acquisition) = &self.acquisition {
            check_buckets("acquisition", acquisition, &ACQUISITION_BUCKETS)?;
        }
        Ok(())
    }
}

fn check_buckets(
    name: &str,
    checklist: &Checklist,
    allowed: &[TaskBucket],
) -> Result<(), PipelineError> {
    checklist.validate()?;
    if let Some((bucket, _)) = checklist.buckets().find(|(b, _)| !allowed.contains(b)) {
        return Err(PipelineError::Validation(format!(
            "{} checklist cannot hold bucket '{}'",
            name, bucket
        )));
    }
    Ok(())
}
