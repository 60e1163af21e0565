//! Client-service project plan: milestones with checkable steps.

use std::fmt;
use std::str::FromStr;

use prospector_core::ParseEnumError;
use serde::{Deserialize, Serialize};
use time::Date;

use crate::error::PipelineError;
use crate::stats::percent;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MilestoneStatus {
    #[default]
    Upcoming,
    InProgress,
    Completed,
    Overdue,
}

impl MilestoneStatus {
    pub const ALL: [MilestoneStatus; 4] = [
        MilestoneStatus::Upcoming,
        MilestoneStatus::InProgress,
        MilestoneStatus::Completed,
        MilestoneStatus::Overdue,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            MilestoneStatus::Upcoming => "upcoming",
            MilestoneStatus::InProgress => "in_progress",
            MilestoneStatus::Completed => "completed",
            MilestoneStatus::Overdue => "overdue",
        }
    }
}

impl fmt::Display for MilestoneStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for MilestoneStatus {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['-', ' '], "_");
        MilestoneStatus::ALL
            .into_iter()
            .find(|m| m.as_str() == normalized)
            .ok_or_else(|| ParseEnumError::new("milestone status", s))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MilestoneStep {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub completed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Milestone {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(
        default,
        with = "prospector_core::dates::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub due_date: Option<Date>,
    /// Status as declared by the consultant; see [`Milestone::effective_status`].
    #[serde(default)]
    pub status: MilestoneStatus,
    #[serde(default)]
    pub steps: Vec<MilestoneStep>,
}

impl Milestone {
    /// Rounded percent of completed steps; 0 with no steps.
    pub fn steps_progress(&self) -> u8 {
        percent(
            self.steps.iter().filter(|s| s.completed).count(),
            self.steps.len(),
        )
    }

    /// Status derived from step completion.
    ///
    /// Without steps the declared status stands. All steps done means
    /// completed, some done means in progress, none done falls back to the
    /// declared status.
    pub fn effective_status(&self) -> MilestoneStatus {
        if self.steps.is_empty() {
            return self.status;
        }
        match self.steps_progress() {
            100 => MilestoneStatus::Completed,
            0 => self.status,
            _ => MilestoneStatus::InProgress,
        }
    }

    /// Title without a leading `Week N:` prefix.
    pub fn display_name(&self) -> &str {
        strip_week_prefix(&self.title)
    }
}

fn strip_week_prefix(title: &str) -> &str {
    let Some(rest) = title.strip_prefix("Week ") else {
        return title;
    };
    let digits = rest.len() - rest.trim_start_matches(|c: char| c.is_ascii_digit()).len();
    if digits == 0 {
        return title;
    }
    match rest[digits..].strip_prefix(':') {
        Some(name) => name.trim_start(),
        None => title,
    }
}

/// Ordered milestones of one client engagement.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectPlan {
    milestones: Vec<Milestone>,
}

impl ProjectPlan {
    pub fn new(milestones: Vec<Milestone>) -> Self {
        ProjectPlan { milestones }
    }

    pub fn milestones(&self) -> &[Milestone] {
        &self.milestones
    }

    pub fn get(&self, milestone_id: &str) -> Option<&Milestone> {
        self.milestones.iter().find(|m| m.id == milestone_id)
    }

    /// Flip one step and return the milestone after the change.
    pub fn toggle_step(
        &mut self,
        milestone_id: &str,
        step_id: &str,
    ) -> Result<&Milestone, PipelineError> {
        let milestone = self
            .milestones
            .iter_mut()
            .find(|m| m.id == milestone_id)
            .ok_or_else(|| PipelineError::NotFound {
                kind: "milestone",
                id: milestone_id.to_string(),
            })?;
        let step = milestone
            .steps
            .iter_mut()
            .find(|s| s.id == step_id)
            .ok_or_else(|| PipelineError::NotFound {
                kind: "step",
                id: format!("{}/{}", milestone_id, step_id),
            })?;
        step.completed = !step.completed;
        tracing::debug!(
            milestone = milestone_id,
            step = step_id,
            completed = step.completed,
            "milestone step toggled"
        );
        Ok(milestone)
    }

    /// Percent of milestones whose effective status is completed.
    pub fn overall_progress(&self) -> u8 {
        let done = self
            .milestones
            .iter()
            .filter(|m| m.effective_status() == MilestoneStatus::Completed)
            .count();
        percent(done, self.milestones.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn milestone(status: MilestoneStatus, done: &[bool]) -> Milestone {
        Milestone {
            id: "milestone-week-3".into(),
            title: "Week 3: Lead Generation Setup".into(),
            description: String::new(),
            due_date: None,
            status,
            steps: done
                .iter()
                .enumerate()
                .map(|(i, d)| MilestoneStep {
                    id: format!("step-{}", i + 1),
                    title: format!("Step {}", i + 1),
                    completed: *d,
                })
                .collect(),
        }
    }

    #[test]
    fn progress_rounds() {
        let m = milestone(MilestoneStatus::Upcoming, &[true, true, true, false, false]);
        assert_eq!(m.steps_progress(), 60);
        let empty = milestone(MilestoneStatus::Upcoming, &[]);
        assert_eq!(empty.steps_progress(), 0);
        assert_eq!(
            milestone(MilestoneStatus::Upcoming, &[true, false, false]).steps_progress(),
            33
        );
    }

    #[test]
    fn effective_status_follows_steps() {
        assert_eq!(
            milestone(MilestoneStatus::Overdue, &[]).effective_status(),
            MilestoneStatus::Overdue
        );
        assert_eq!(
            milestone(MilestoneStatus::Upcoming, &[true, true]).effective_status(),
            MilestoneStatus::Completed
        );
        assert_eq!(
            milestone(MilestoneStatus::Upcoming, &[true, false]).effective_status(),
            MilestoneStatus::InProgress
        );
        assert_eq!(
            milestone(MilestoneStatus::Overdue, &[false, false]).effective_status(),
            MilestoneStatus::Overdue
        );
    }

    #[test]
    fn display_name_strips_week_prefix() {
        let m = milestone(MilestoneStatus::Upcoming, &[]);
        assert_eq!(m.display_name(), "Lead Generation Setup");
        assert_eq!(strip_week_prefix("Week 12:Launch"), "Launch");
        assert_eq!(strip_week_prefix("Weekly review"), "Weekly review");
        assert_eq!(strip_week_prefix("Week two: Kickoff"), "Week two: Kickoff");
        assert_eq!(strip_week_prefix("Week 4 Kickoff"), "Week 4 Kickoff");
    }

    #[test]
    fn toggle_step_updates_status() {
        let mut plan = ProjectPlan::new(vec![milestone(
            MilestoneStatus::Upcoming,
            &[true, true, true, true, false],
        )]);
        let m = plan.toggle_step("milestone-week-3", "step-5").unwrap();
        assert_eq!(m.effective_status(), MilestoneStatus::Completed);
        assert_eq!(plan.overall_progress(), 100);

        let err = plan.toggle_step("milestone-week-3", "step-9").unwrap_err();
        assert_eq!(err.to_string(), "step not found: milestone-week-3/step-9");
        let err = plan.toggle_step("nope", "step-1").unwrap_err();
        assert!(matches!(err, PipelineError::NotFound { kind: "milestone", .. }));
    }

    #[test]
    fn status_parses_loosely() {
        assert_eq!(
            "in-progress".parse::<MilestoneStatus>(),
            Ok(MilestoneStatus::InProgress)
        );
        assert_eq!(
            "Completed".parse::<MilestoneStatus>(),
            Ok(MilestoneStatus::Completed)
        );
        assert!("done".parse::<MilestoneStatus>().is_err());
    }
}
