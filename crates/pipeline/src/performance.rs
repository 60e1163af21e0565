//! Daily-tracker performance over past checklists.
//!
//! A day counts toward the streak once it has been submitted. Today's
//! unsubmitted list does not break the streak; the count then starts at
//! yesterday. Week and month completion pool task counts across the days on
//! record, so a missing day adds nothing rather than counting as zero.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use time::{Date, Duration};

use crate::checklist::Checklist;
use crate::stats::percent;

/// Days in the rolling week, today included.
pub const WEEK_DAYS: i64 = 7;

/// Traffic-light rating of a completion percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Compliance {
    Green,
    Yellow,
    Red,
}

impl Compliance {
    /// 90 and up is green, 70 and up is yellow, anything lower is red.
    pub fn from_percent(completion: u8) -> Self {
        if completion >= 90 {
            Compliance::Green
        } else if completion >= 70 {
            Compliance::Yellow
        } else {
            Compliance::Red
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Compliance::Green => "green",
            Compliance::Yellow => "yellow",
            Compliance::Red => "red",
        }
    }
}

impl fmt::Display for Compliance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// One day's row in the weekly breakdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DayPerformance {
    #[serde(with = "prospector_core::dates::required")]
    pub date: Date,
    pub tasks_completed: usize,
    pub total_tasks: usize,
    pub completion: u8,
    pub submitted: bool,
    pub status: Compliance,
}

impl DayPerformance {
    pub fn of(checklist: &Checklist) -> Self {
        let (tasks_completed, total_tasks) = checklist.counts();
        let completion = percent(tasks_completed, total_tasks);
        DayPerformance {
            date: checklist.date(),
            tasks_completed,
            total_tasks,
            completion,
            submitted: checklist.is_submitted(),
            status: Compliance::from_percent(completion),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PerformanceHistory {
    pub current_streak: u32,
    pub week_completion: u8,
    pub month_completion: u8,
    /// Rating of `week_completion`.
    pub compliance: Compliance,
    /// Days on record in the rolling week, oldest first.
    pub week: Vec<DayPerformance>,
}

/// Roll up `days` as of `reference`.
///
/// Later checklists replace earlier ones with the same date; checklists
/// dated after `reference` are ignored.
pub fn performance<'a, I>(days: I, reference: Date) -> PerformanceHistory
where
    I: IntoIterator<Item = &'a Checklist>,
{
    let by_date: BTreeMap<Date, DayPerformance> = days
        .into_iter()
        .filter(|c| c.date() <= reference)
        .map(|c| (c.date(), DayPerformance::of(c)))
        .collect();

    let week_start = reference - Duration::days(WEEK_DAYS - 1);
    let month_start = reference - Duration::days(i64::from(reference.day()) - 1);
    let week: Vec<DayPerformance> = by_date
        .range(week_start..=reference)
        .map(|(_, day)| *day)
        .collect();
    let week_completion = pooled(week.iter());
    let month_completion = pooled(by_date.range(month_start..=reference).map(|(_, day)| day));

    PerformanceHistory {
        current_streak: streak(&by_date, reference),
        week_completion,
        month_completion,
        compliance: Compliance::from_percent(week_completion),
        week,
    }
}

fn pooled<'a>(days: impl Iterator<Item = &'a DayPerformance>) -> u8 {
    let (done, total) = days.fold((0, 0), |(done, total), day| {
        (done + day.tasks_completed, total + day.total_tasks)
    });
    percent(done, total)
}

fn streak(by_date: &BTreeMap<Date, DayPerformance>, reference: Date) -> u32 {
    let mut cursor = match by_date.get(&reference) {
        Some(today) if today.submitted => Some(reference),
        _ => reference.previous_day(),
    };
    let mut count = 0;
    while let Some(date) = cursor {
        match by_date.get(&date) {
            Some(day) if day.submitted => {
                count += 1;
                cursor = date.previous_day();
            }
            _ => break,
        }
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;
    use prospector_core::{Task, TaskBucket};
    use time::macros::{date, datetime};

    fn day(date: Date, done: usize, submitted: bool) -> Checklist {
        let now = datetime!(2025-08-01 18:00 UTC);
        let tasks: Vec<Task> = (1..=5)
            .map(|n| {
                let mut task = Task::new(format!("box2_{}", n), format!("Task {}", n));
                if n <= done {
                    task.toggle(now);
                }
                task
            })
            .collect();
        let mut list = Checklist::new(date, [(TaskBucket::Box2, tasks)]);
        if submitted {
            list.submit(now).unwrap();
        }
        list
    }

    #[test]
    fn compliance_thresholds() {
        assert_eq!(Compliance::from_percent(100), Compliance::Green);
        assert_eq!(Compliance::from_percent(90), Compliance::Green);
        assert_eq!(Compliance::from_percent(89), Compliance::Yellow);
        assert_eq!(Compliance::from_percent(70), Compliance::Yellow);
        assert_eq!(Compliance::from_percent(69), Compliance::Red);
        assert_eq!(Compliance::from_percent(0), Compliance::Red);
    }

    #[test]
    fn streak_counts_back_from_yesterday_while_today_is_open() {
        let days = [
            day(date!(2025 - 08 - 03), 5, true),
            day(date!(2025 - 08 - 04), 5, true),
            day(date!(2025 - 08 - 05), 5, true),
            day(date!(2025 - 08 - 06), 2, false),
        ];
        let history = performance(&days, date!(2025 - 08 - 06));
        assert_eq!(history.current_streak, 3);
    }

    #[test]
    fn submitted_today_extends_the_streak() {
        let days = [
            day(date!(2025 - 08 - 05), 5, true),
            day(date!(2025 - 08 - 06), 5, true),
        ];
        assert_eq!(performance(&days, date!(2025 - 08 - 06)).current_streak, 2);
    }

    #[test]
    fn unsubmitted_or_missing_day_breaks_the_streak() {
        let gap = [
            day(date!(2025 - 08 - 02), 5, true),
            day(date!(2025 - 08 - 03), 5, true),
            day(date!(2025 - 08 - 05), 5, true),
        ];
        assert_eq!(performance(&gap, date!(2025 - 08 - 06)).current_streak, 1);

        let open = [
            day(date!(2025 - 08 - 04), 5, true),
            day(date!(2025 - 08 - 05), 4, false),
        ];
        assert_eq!(performance(&open, date!(2025 - 08 - 06)).current_streak, 0);
    }

    #[test]
    fn week_and_month_pool_task_counts() {
        let days = [
            day(date!(2025 - 07 - 30), 0, false),
            day(date!(2025 - 07 - 31), 5, true),
            day(date!(2025 - 08 - 01), 5, true),
            day(date!(2025 - 08 - 02), 3, false),
        ];
        let history = performance(&days, date!(2025 - 08 - 02));
        // 13 of 20 over the week, 8 of 10 in August.
        assert_eq!(history.week_completion, 65);
        assert_eq!(history.month_completion, 80);
        assert_eq!(history.compliance, Compliance::Red);
        assert_eq!(history.week.len(), 4);
        assert_eq!(history.week[1].status, Compliance::Green);
        assert_eq!(history.week[3].status, Compliance::Red);
    }

    #[test]
    fn days_outside_the_window_are_ignored() {
        let days = [
            day(date!(2025 - 07 - 20), 0, false),
            day(date!(2025 - 08 - 06), 5, true),
            day(date!(2025 - 08 - 07), 0, false),
        ];
        let history = performance(&days, date!(2025 - 08 - 06));
        assert_eq!(history.week.len(), 1);
        assert_eq!(history.week_completion, 100);
        assert_eq!(history.compliance, Compliance::Green);
    }

    #[test]
    fn later_entry_wins_for_the_same_date() {
        let days = [
            day(date!(2025 - 08 - 06), 1, false),
            day(date!(2025 - 08 - 06), 5, true),
        ];
        let history = performance(&days, date!(2025 - 08 - 06));
        assert_eq!(history.week.len(), 1);
        assert_eq!(history.week[0].tasks_completed, 5);
    }

    #[test]
    fn no_history_is_red_with_zero_streak() {
        let history = performance(std::iter::empty::<&Checklist>(), date!(2025 - 08 - 06));
        assert_eq!(history.current_streak, 0);
        assert_eq!(history.week_completion, 0);
        assert_eq!(history.compliance, Compliance::Red);
        assert!(history.week.is_empty());
    }
}
