use prospector_core::dates::format_date;
use prospector_pipeline::{Dashboard, Milestone};

use super::print_json;
use crate::OutputFormat;

pub(crate) fn cmd_plan(
    dashboard: &Dashboard,
    output: OutputFormat,
    quiet: bool,
) -> Result<(), String> {
    let plan = dashboard.plan();
    match output {
        OutputFormat::Json => {
            let milestones: Vec<serde_json::Value> =
                plan.milestones().iter().map(milestone_json).collect();
            print_json(&serde_json::json!({
                "overall_progress": plan.overall_progress(),
                "milestones": milestones,
            }))
        }
        OutputFormat::Text => {
            if plan.milestones().is_empty() {
                if !quiet {
                    println!("no milestones");
                }
                return Ok(());
            }
            println!("Project plan: {}% complete", plan.overall_progress());
            for (index, milestone) in plan.milestones().iter().enumerate() {
                print_milestone(index + 1, milestone, quiet);
            }
        }
    }
    Ok(())
}

pub(crate) fn milestone_json(milestone: &Milestone) -> serde_json::Value {
    serde_json::json!({
        "id": milestone.id,
        "name": milestone.display_name(),
        "status": milestone.effective_status(),
        "steps_progress": milestone.steps_progress(),
        "due_date": milestone.due_date.map(format_date),
        "steps": milestone.steps,
    })
}

pub(crate) fn print_milestone(number: usize, milestone: &Milestone, quiet: bool) {
    let due = milestone
        .due_date
        .map(format_date)
        .unwrap_or_else(|| "-".to_string());
    println!(
        "  {}. {:<28} {:<12} due {}",
        number,
        milestone.display_name(),
        milestone.effective_status(),
        due
    );
    if quiet || milestone.steps.is_empty() {
        return;
    }
    println!("     steps {}%", milestone.steps_progress());
    for step in &milestone.steps {
        println!(
            "     {} {:<8} {}",
            if step.completed { "[x]" } else { "[ ]" },
            step.id,
            step.title
        );
    }
}
