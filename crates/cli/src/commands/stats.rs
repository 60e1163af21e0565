use prospector_core::dates::{format_date, parse_date};
use prospector_pipeline::{aggregate, summarize, Dashboard, PipelineStats, PipelineSummary};
use prospector_storage::ContactStore;
use time::Date;

use super::{print_json, FilterArgs};
use crate::OutputFormat;

pub(crate) fn cmd_stats(
    dashboard: &mut Dashboard,
    filter: &FilterArgs,
    date: Option<&str>,
    output: OutputFormat,
    quiet: bool,
) -> Result<(), String> {
    dashboard.set_filter(filter.to_filter()?);
    let reference = match date {
        Some(raw) => parse_date(raw).map_err(|e| format!("invalid date '{}': {}", raw, e))?,
        None => dashboard.reference_date(),
    };
    show_stats(dashboard, reference, output, quiet);
    Ok(())
}

/// Stats over the visible contacts plus the unfiltered Dream 100 summary.
pub(crate) fn show_stats(
    dashboard: &Dashboard,
    reference: Date,
    output: OutputFormat,
    quiet: bool,
) {
    let stats = aggregate(dashboard.visible(), reference, dashboard.week_window());
    let summary = summarize(dashboard.store().list(), reference);
    match output {
        OutputFormat::Json => print_json(&serde_json::json!({
            "reference_date": format_date(reference),
            "stats": stats,
            "summary": summary,
        })),
        OutputFormat::Text => print_text(&stats, &summary, reference, quiet),
    }
}

fn print_text(stats: &PipelineStats, summary: &PipelineSummary, reference: Date, quiet: bool) {
    if !quiet {
        println!(
            "Pipeline: {} contacts as of {}",
            stats.total,
            format_date(reference)
        );
    }
    for (status, count) in stats.status_counts.iter() {
        println!("  {} {:<16} {}", status.icon(), status, count);
    }
    println!();
    println!("Due today:        {}", id_list(&stats.due.due_today));
    println!("Missed yesterday: {}", id_list(&stats.due.missed_yesterday));
    println!("Overdue:          {}", id_list(&stats.due.overdue));
    println!("This week:        {}", id_list(&stats.due.this_week));
    println!("Response rate:    {}%", stats.response_rate);
    println!(
        "Dream 100:        {} (research {}, contacted {}, meeting {}, buy {}, don't buy {})",
        summary.dream_100_total,
        summary.research,
        summary.contacted,
        summary.meeting,
        summary.buy,
        summary.dont_buy
    );
}

fn id_list(ids: &[String]) -> String {
    if ids.is_empty() {
        "-".to_string()
    } else {
        ids.join(", ")
    }
}
