//! Interactive session: one in-memory dashboard driven line by line.

use std::io::{self, BufRead, Write};
use std::path::Path;

use prospector_pipeline::{ContactFilter, Dashboard};

use crate::commands::{contacts, import, plan, portal, stats, status, tasks};
use crate::config::Config;
use crate::{report_error, OutputFormat};

pub(crate) fn run_shell(dashboard: &mut Dashboard, config: &Config, output: OutputFormat) {
    let stdin = io::stdin();
    run_lines(dashboard, config, output, stdin.lock());
}

fn run_lines<R: BufRead>(
    dashboard: &mut Dashboard,
    config: &Config,
    output: OutputFormat,
    mut reader: R,
) {
    if output == OutputFormat::Text {
        if let Some(user) = dashboard.user() {
            println!("Signed in as {}", user.email);
        }
        println!("Type 'help' for available commands.");
    }

    let mut line = String::new();
    loop {
        print!("prospector> ");
        if io::stdout().flush().is_err() {
            break;
        }

        line.clear();
        match reader.read_line(&mut line) {
            Ok(0) => {
                println!();
                break;
            }
            Ok(_) => {}
            Err(e) => {
                eprintln!("error reading input: {}", e);
                break;
            }
        }

        let trimmed = line.trim();
        let mut words = trimmed.split_whitespace();
        let Some(word) = words.next() else {
            continue;
        };
        let cmd = word.to_lowercase();
        let args: Vec<&str> = words.collect();
        let rest = trimmed[word.len()..].trim_start();

        let result = match cmd.as_str() {
            "help" => {
                print_help();
                Ok(())
            }
            "contacts" | "ls" => {
                contacts::show_contacts(dashboard, output, false);
                Ok(())
            }
            "search" => {
                dashboard.set_search(rest);
                contacts::show_contacts(dashboard, output, false);
                Ok(())
            }
            "filter" => apply_filter(dashboard, &args).map(|()| {
                contacts::show_contacts(dashboard, output, false);
            }),
            "stats" => {
                stats::show_stats(dashboard, dashboard.reference_date(), output, false);
                Ok(())
            }
            "set" => {
                if args.len() < 2 {
                    eprintln!("usage: set <contact_id> <status>");
                    continue;
                }
                let target = args[1..].join(" ");
                status::cmd_set_status(dashboard, args[0], &target, output, false)
            }
            "select" => {
                let [id] = args.as_slice() else {
                    eprintln!("usage: select <contact_id>");
                    continue;
                };
                dashboard
                    .toggle_selection(id)
                    .map(|on| {
                        let verb = if on { "selected" } else { "deselected" };
                        println!("  {} {}", verb, id);
                    })
                    .map_err(|e| e.to_string())
            }
            "select-all" => {
                let count = dashboard.select_all_visible();
                println!("  {} contacts selected", count);
                Ok(())
            }
            "clear" => {
                dashboard.clear_selection();
                println!("  selection cleared");
                Ok(())
            }
            "selected" => {
                let ids: Vec<&str> = dashboard.selected().collect();
                if ids.is_empty() {
                    println!("  nothing selected");
                } else {
                    println!("  {}", ids.join(", "));
                }
                Ok(())
            }
            "remove-selected" => {
                let requested = dashboard.selected().count();
                let removed = dashboard.remove_selected();
                status::show_removed(removed, requested, output, false);
                Ok(())
            }
            "bulk" => {
                if args.is_empty() {
                    eprintln!("usage: bulk <status>");
                    continue;
                }
                bulk_status(dashboard, &args.join(" "), output)
            }
            "import" => {
                if rest.is_empty() {
                    eprintln!("usage: import <rows.json>");
                    continue;
                }
                import::cmd_import(dashboard, Path::new(rest), output, false)
            }
            "tasks" => tasks::cmd_tasks(dashboard, output, false),
            "toggle" => {
                let [bucket, task_id] = args.as_slice() else {
                    eprintln!("usage: toggle <bucket> <task_id>");
                    continue;
                };
                tasks::cmd_toggle(dashboard, bucket, task_id, output, false)
            }
            "submit" => tasks::cmd_submit(dashboard, output, false),
            "plan" => plan::cmd_plan(dashboard, output, false),
            "step" => {
                let [milestone_id, step_id] = args.as_slice() else {
                    eprintln!("usage: step <milestone_id> <step_id>");
                    continue;
                };
                dashboard
                    .toggle_milestone_step(milestone_id, step_id)
                    .map(|milestone| plan::print_milestone(1, milestone, false))
                    .map_err(|e| e.to_string())
            }
            "portal" => {
                let [id] = args.as_slice() else {
                    eprintln!("usage: portal <contact_id>");
                    continue;
                };
                portal::cmd_portal(dashboard, id, config, output, false)
            }
            "conversions" => {
                let events = dashboard.drain_conversions();
                if events.is_empty() {
                    println!("  no new conversions");
                }
                for event in &events {
                    println!(
                        "  {} ({}) from {}",
                        event.contact.name, event.contact.company, event.previous
                    );
                }
                Ok(())
            }
            "quit" | "exit" => break,
            _ => {
                eprintln!(
                    "unknown command: {}. Type 'help' for available commands.",
                    cmd
                );
                continue;
            }
        };

        if let Err(msg) = result {
            report_error(&msg, output, false);
        }
    }
}

/// `filter <status|source|relationship> <value>` or `filter clear`. `args`
/// excludes the command word; a multi-word value is rejoined.
fn apply_filter(dashboard: &mut Dashboard, args: &[&str]) -> Result<(), String> {
    let (field, value) = match args {
        [field] if field.eq_ignore_ascii_case("clear") => {
            dashboard.set_filter(ContactFilter::default());
            return Ok(());
        }
        [field, value @ ..] if !value.is_empty() => (field.to_lowercase(), value.join(" ")),
        _ => return Err("usage: filter <status|source|relationship> <value>".to_string()),
    };
    let value = value.as_str();
    let mut filter = dashboard.filter().clone();
    match field.as_str() {
        "status" => {
            filter.status = ContactFilter::parse("", value, "", "")
                .map_err(|e| e.to_string())?
                .status
        }
        "source" => {
            filter.source = ContactFilter::parse("", "", value, "")
                .map_err(|e| e.to_string())?
                .source
        }
        "relationship" => {
            filter.relationship = ContactFilter::parse("", "", "", value)
                .map_err(|e| e.to_string())?
                .relationship
        }
        other => return Err(format!("unknown filter: {}", other)),
    }
    dashboard.set_filter(filter);
    Ok(())
}

fn bulk_status(dashboard: &mut Dashboard, raw: &str, output: OutputFormat) -> Result<(), String> {
    let target = prospector_core::Status::parse_settable(raw).map_err(|e| e.to_string())?;
    let changes = dashboard
        .set_status_for_selected(target)
        .map_err(|e| e.to_string())?;
    if changes.is_empty() {
        println!("  nothing selected");
    }
    for change in &changes {
        status::show_change(change, output, false);
    }
    Ok(())
}

fn print_help() {
    println!();
    println!("  help                          Show this help");
    println!("  contacts                      List contacts under the current filter");
    println!("  search <text>                 Set the search text (empty clears it)");
    println!("  filter <field> <value>        Filter by status, source or relationship");
    println!("  filter clear                  Drop every filter");
    println!("  stats                         Status counts, due dates, response rate");
    println!("  set <id> <status>             Move one contact to a new status");
    println!("  select <id>                   Toggle a contact in the selection");
    println!("  select-all                    Select every visible contact");
    println!("  clear                         Empty the selection");
    println!("  selected                      Show the selection");
    println!("  remove-selected               Remove every selected contact");
    println!("  bulk <status>                 Set one status on the whole selection");
    println!("  import <rows.json>            Import candidate rows");
    println!("  tasks                         Show today's checklists");
    println!("  toggle <bucket> <task_id>     Toggle a checklist task");
    println!("  submit                        Submit the day");
    println!("  plan                          Show the project plan");
    println!("  step <milestone> <step>       Toggle a milestone step");
    println!("  portal <id>                   Open the client portal for a converted contact");
    println!("  conversions                   Show conversions since the last check");
    println!("  quit                          Exit the shell");
    println!();
}
