use prospector_core::dates::format_date;
use prospector_core::Contact;
use prospector_pipeline::{next_action, Dashboard, NextAction};
use prospector_storage::ContactStore;

use super::{print_json, FilterArgs};
use crate::OutputFormat;

pub(crate) fn cmd_contacts(
    dashboard: &mut Dashboard,
    filter: &FilterArgs,
    output: OutputFormat,
    quiet: bool,
) -> Result<(), String> {
    dashboard.set_filter(filter.to_filter()?);
    show_contacts(dashboard, output, quiet);
    Ok(())
}

/// Print the contacts visible under the dashboard's current filter.
pub(crate) fn show_contacts(dashboard: &Dashboard, output: OutputFormat, quiet: bool) {
    let visible = dashboard.visible();
    match output {
        OutputFormat::Json => print_json(&visible),
        OutputFormat::Text => {
            if visible.is_empty() {
                if !quiet {
                    println!("no contacts match");
                }
                return;
            }
            for contact in &visible {
                println!("{}", contact_line(contact));
            }
            if !quiet && dashboard.filter().is_active() {
                println!("{} of {} contacts", visible.len(), dashboard.store().len());
            }
        }
    }
}

pub(crate) fn next_action_label(contact: &Contact) -> String {
    match next_action(contact) {
        NextAction::Closed => "-".to_string(),
        NextAction::Scheduled(date) => format_date(date),
        NextAction::Unscheduled => "Schedule".to_string(),
    }
}

fn contact_line(contact: &Contact) -> String {
    format!(
        "{:<12} {:<2}{:<3} {:<20} {:<24} {} {:<16} {}",
        contact.id,
        if contact.is_dream_100 { "*" } else { "" },
        contact.initials(),
        contact.name,
        contact.company,
        contact.latest_decision.icon(),
        contact.latest_decision,
        next_action_label(contact),
    )
}
