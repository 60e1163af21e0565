use prospector_pipeline::{Dashboard, StatusChange};

use super::print_json;
use crate::OutputFormat;

pub(crate) fn cmd_set_status(
    dashboard: &mut Dashboard,
    id: &str,
    status: &str,
    output: OutputFormat,
    quiet: bool,
) -> Result<(), String> {
    let change = dashboard
        .set_status_str(id, status)
        .map_err(|e| e.to_string())?;
    show_change(&change, output, quiet);
    Ok(())
}

pub(crate) fn show_change(change: &StatusChange, output: OutputFormat, quiet: bool) {
    match output {
        OutputFormat::Json => print_json(change),
        OutputFormat::Text => {
            println!(
                "{}: {} -> {}",
                change.contact.id, change.previous, change.contact.latest_decision
            );
            if let Some(event) = &change.conversion {
                if !quiet {
                    println!(
                        "converted: {} ({}), ready for client portal",
                        event.contact.name, event.contact.company
                    );
                }
            }
        }
    }
}

pub(crate) fn cmd_remove(
    dashboard: &mut Dashboard,
    ids: &[String],
    output: OutputFormat,
    quiet: bool,
) -> Result<(), String> {
    let removed = dashboard.remove_contacts(ids);
    show_removed(removed, ids.len(), output, quiet);
    Ok(())
}

pub(crate) fn show_removed(removed: usize, requested: usize, output: OutputFormat, quiet: bool) {
    match output {
        OutputFormat::Json => print_json(&serde_json::json!({
            "requested": requested,
            "removed": removed,
        })),
        OutputFormat::Text => {
            if !quiet {
                println!("removed {} of {} contacts", removed, requested);
            }
        }
    }
}
