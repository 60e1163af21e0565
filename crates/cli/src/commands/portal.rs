use async_trait::async_trait;
use prospector_pipeline::{portal_route, Dashboard, Navigator, PortalStage};

use super::print_json;
use crate::config::Config;
use crate::OutputFormat;

/// Terminal stand-in for page navigation: the route is printed.
struct TerminalNavigator {
    echo: bool,
}

#[async_trait]
impl Navigator for TerminalNavigator {
    async fn navigate(&self, route: &str) {
        if self.echo {
            println!("-> {}", route);
        }
    }
}

/// Runs the reveal for a converted contact. The sequence lives on the
/// dashboard, so a second run for the same contact only reports the route.
pub(crate) fn cmd_portal(
    dashboard: &mut Dashboard,
    contact_id: &str,
    config: &Config,
    output: OutputFormat,
    quiet: bool,
) -> Result<(), String> {
    let route = portal_route(&config.portal.route, contact_id);
    let delays = config.stage_delays();
    let sequence = dashboard
        .portal_sequence(contact_id)
        .map_err(|e| e.to_string())?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .map_err(|e| format!("failed to start runtime: {}", e))?;

    let text = output == OutputFormat::Text;
    let navigator = TerminalNavigator { echo: text };
    let opened = runtime.block_on(sequence.run_observed(&delays, &navigator, &route, |stage| {
        if text && !quiet && stage != PortalStage::Idle {
            println!("{}", stage.message());
        }
    }));

    match output {
        OutputFormat::Json => print_json(&serde_json::json!({
            "contact": contact_id,
            "route": route,
            "stage": sequence.stage(),
            "opened": opened,
        })),
        OutputFormat::Text => {
            if !opened {
                println!("portal for {} already opened: {}", contact_id, route);
            }
        }
    }
    Ok(())
}
