use prospector_core::dates::format_date;
use prospector_core::{Task, TaskBucket};
use prospector_pipeline::{Checklist, Dashboard, PerformanceHistory};

use super::print_json;
use crate::OutputFormat;

pub(crate) fn cmd_tasks(
    dashboard: &Dashboard,
    output: OutputFormat,
    quiet: bool,
) -> Result<(), String> {
    let performance = dashboard.performance();
    match output {
        OutputFormat::Json => print_json(&serde_json::json!({
            "daily": checklist_json(dashboard.daily()),
            "acquisition": dashboard.acquisition().map(checklist_json),
            "performance": performance,
        })),
        OutputFormat::Text => {
            print_checklist("Daily tasks", dashboard.daily(), quiet);
            print_performance(&performance, quiet);
            if let Some(acquisition) = dashboard.acquisition() {
                println!();
                print_checklist("Client acquisition", acquisition, quiet);
            }
        }
    }
    Ok(())
}

pub(crate) fn cmd_toggle(
    dashboard: &mut Dashboard,
    bucket: &str,
    task_id: &str,
    output: OutputFormat,
    quiet: bool,
) -> Result<(), String> {
    let bucket: TaskBucket = bucket
        .parse()
        .map_err(|e: prospector_core::ParseEnumError| e.to_string())?;
    let tasks = dashboard
        .toggle_task(bucket, task_id)
        .map_err(|e| e.to_string())?;
    let task = tasks
        .iter()
        .find(|t| t.id == task_id)
        .cloned()
        .ok_or_else(|| format!("task not found: {}/{}", bucket, task_id))?;
    let percent = prospector_pipeline::completion_percentage(tasks);
    match output {
        OutputFormat::Json => print_json(&serde_json::json!({
            "bucket": bucket,
            "task": task,
            "bucket_completion": percent,
        })),
        OutputFormat::Text => {
            println!("{} {}", checkbox(&task), task.title);
            if !quiet {
                println!("{} is {}% complete", bucket, percent);
            }
        }
    }
    Ok(())
}

pub(crate) fn cmd_submit(
    dashboard: &mut Dashboard,
    output: OutputFormat,
    quiet: bool,
) -> Result<(), String> {
    let submission = dashboard.submit_day().map_err(|e| e.to_string())?;
    match output {
        OutputFormat::Json => print_json(&submission),
        OutputFormat::Text => {
            if !quiet {
                if submission.newly_submitted {
                    println!("day submitted");
                } else {
                    println!("day already submitted");
                }
            }
        }
    }
    Ok(())
}

fn checklist_json(checklist: &Checklist) -> serde_json::Value {
    serde_json::json!({
        "date": format_date(checklist.date()),
        "overall_completion": checklist.overall_completion(),
        "remaining": checklist.remaining(),
        "submitted": checklist.is_submitted(),
        "buckets": checklist.progress(),
        "tasks": checklist,
    })
}

fn print_checklist(title: &str, checklist: &Checklist, quiet: bool) {
    let suffix = if checklist.is_submitted() {
        " (submitted)"
    } else {
        ""
    };
    println!(
        "{} for {}: {}% complete{}",
        title,
        format_date(checklist.date()),
        checklist.overall_completion(),
        suffix
    );
    for progress in checklist.progress() {
        println!(
            "  {} {}/{} ({}%)",
            progress.bucket, progress.completed, progress.total, progress.percent
        );
        if quiet {
            continue;
        }
        for task in checklist.tasks(progress.bucket) {
            println!("    {} {:<12} {}", checkbox(task), task.id, task.title);
        }
    }
}

fn print_performance(history: &PerformanceHistory, quiet: bool) {
    println!(
        "Streak: {} days, week {}%, month {}%, compliance {}",
        history.current_streak,
        history.week_completion,
        history.month_completion,
        history.compliance
    );
    if quiet {
        return;
    }
    for day in &history.week {
        println!(
            "  {} {:>3}% {:<6}{}",
            format_date(day.date),
            day.completion,
            day.status,
            if day.submitted { " submitted" } else { "" }
        );
    }
}

fn checkbox(task: &Task) -> &'static str {
    if task.completed {
        "[x]"
    } else {
        "[ ]"
    }
}
