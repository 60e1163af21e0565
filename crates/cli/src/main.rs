mod commands;
mod config;
mod logging;
mod session;
mod shell;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand, ValueEnum};

use commands::FilterArgs;

/// Output format for CLI responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    Text,
    Json,
}

/// Prospector consultant pipeline dashboard.
#[derive(Parser)]
#[command(
    name = "prospector",
    version,
    about = "Prospector consultant pipeline dashboard"
)]
struct Cli {
    /// Output format (text or json)
    #[arg(long, global = true, default_value = "text", value_enum)]
    output: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    quiet: bool,

    /// Path to the TOML config file (default: ./prospector.toml if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Session seed JSON, overriding [session] data from the config
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List contacts matching the search and filters
    Contacts {
        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Status counts, due-date buckets and response rate
    Stats {
        #[command(flatten)]
        filter: FilterArgs,
        /// Reference date (YYYY-MM-DD); defaults to config, then today
        #[arg(long)]
        date: Option<String>,
    },

    /// Move a contact to a new pipeline status
    SetStatus {
        /// Contact id
        id: String,
        /// Target status, e.g. "Reached Out" or buy
        status: String,
    },

    /// Validate and import candidate rows from a JSON file
    Import {
        /// JSON array of rows (Name, Company, Email, ...)
        rows: PathBuf,
    },

    /// Remove contacts by id
    Remove {
        /// Contact ids
        #[arg(required = true)]
        ids: Vec<String>,
    },

    /// Show today's checklists with completion
    Tasks,

    /// Toggle one checklist task
    Toggle {
        /// Bucket (box2, box3, box4, identify, invite, converse)
        bucket: String,
        /// Task id
        task_id: String,
    },

    /// Submit the day once every task is complete
    Submit,

    /// Show the client project plan
    Plan,

    /// Run the client-portal loading sequence for a converted contact
    Portal {
        /// Contact id (must be at Buy)
        contact_id: String,
    },

    /// Interactive session against one in-memory dashboard
    Shell,
}

fn main() {
    let cli = Cli::parse();

    let config = match config::load_config(cli.config.as_deref()) {
        Ok(c) => c,
        Err(msg) => {
            report_error(&msg, cli.output, cli.quiet);
            process::exit(1);
        }
    };
    logging::init(config.logging.filter.as_deref());

    let data = cli
        .data
        .clone()
        .unwrap_or_else(|| config.session.data.clone());
    let mut dashboard = match session::open(&data, &config) {
        Ok(d) => d,
        Err(msg) => {
            report_error(&msg, cli.output, cli.quiet);
            process::exit(1);
        }
    };

    let (output, quiet) = (cli.output, cli.quiet);
    let result = match cli.command {
        Commands::Contacts { filter } => {
            commands::contacts::cmd_contacts(&mut dashboard, &filter, output, quiet)
        }
        Commands::Stats { filter, date } => {
            commands::stats::cmd_stats(&mut dashboard, &filter, date.as_deref(), output, quiet)
        }
        Commands::SetStatus { id, status } => {
            commands::status::cmd_set_status(&mut dashboard, &id, &status, output, quiet)
        }
        Commands::Import { rows } => {
            commands::import::cmd_import(&mut dashboard, &rows, output, quiet)
        }
        Commands::Remove { ids } => {
            commands::status::cmd_remove(&mut dashboard, &ids, output, quiet)
        }
        Commands::Tasks => commands::tasks::cmd_tasks(&dashboard, output, quiet),
        Commands::Toggle { bucket, task_id } => {
            commands::tasks::cmd_toggle(&mut dashboard, &bucket, &task_id, output, quiet)
        }
        Commands::Submit => commands::tasks::cmd_submit(&mut dashboard, output, quiet),
        Commands::Plan => commands::plan::cmd_plan(&dashboard, output, quiet),
        Commands::Portal { contact_id } => {
            commands::portal::cmd_portal(&mut dashboard, &contact_id, &config, output, quiet)
        }
        Commands::Shell => {
            shell::run_shell(&mut dashboard, &config, output);
            Ok(())
        }
    };

    if let Err(msg) = result {
        report_error(&msg, output, quiet);
        process::exit(1);
    }
}

pub(crate) fn report_error(msg: &str, output: OutputFormat, quiet: bool) {
    if quiet {
        return;
    }
    match output {
        OutputFormat::Text => eprintln!("{}", msg),
        OutputFormat::Json => {
            eprintln!("{}", serde_json::json!({ "error": msg }));
        }
    }
}
