pub(crate) mod contacts;
pub(crate) mod import;
pub(crate) mod plan;
pub(crate) mod portal;
pub(crate) mod stats;
pub(crate) mod status;
pub(crate) mod tasks;

use clap::Args;
use prospector_pipeline::ContactFilter;
use serde::Serialize;

/// Search and filter flags shared by `contacts` and `stats`.
#[derive(Debug, Clone, Default, Args)]
pub(crate) struct FilterArgs {
    /// Case-insensitive match on name, company or email
    #[arg(long)]
    pub search: Option<String>,
    /// Pipeline status, or "all"
    #[arg(long)]
    pub status: Option<String>,
    /// LinkedIn, "Email List", YouTube, Referral, or "all"
    #[arg(long)]
    pub source: Option<String>,
    /// Prospect, Client, Vendor, "Promotional Partner", or "all"
    #[arg(long)]
    pub relationship: Option<String>,
}

impl FilterArgs {
    pub fn to_filter(&self) -> Result<ContactFilter, String> {
        ContactFilter::parse(
            self.search.as_deref().unwrap_or(""),
            self.status.as_deref().unwrap_or(""),
            self.source.as_deref().unwrap_or(""),
            self.relationship.as_deref().unwrap_or(""),
        )
        .map_err(|e| e.to_string())
    }
}

pub(crate) fn print_json<T: Serialize + ?Sized>(value: &T) {
    let pretty = serde_json::to_string_pretty(value)
        .unwrap_or_else(|e| format!("serialization error: {}", e));
    println!("{}", pretty);
}
