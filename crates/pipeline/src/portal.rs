//! Client-portal loading sequence.
//!
//! A forward-only state machine `Idle -> Preparing -> Sending -> Opening
//! -> Done`, advanced by a timer and finished by one navigation call. It
//! never reads or writes contact or task state.

use std::fmt;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;

// ──────────────────────────────────────────────
// Stages
// ──────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PortalStage {
    #[default]
    Idle,
    Preparing,
    Sending,
    Opening,
    Done,
}

impl PortalStage {
    /// Progress line shown while the stage is active.
    pub fn message(self) -> &'static str {
        match self {
            PortalStage::Idle => "Ready",
            PortalStage::Preparing => "Preparing client portal...",
            PortalStage::Sending => "Sending welcome email...",
            PortalStage::Opening => "Opening client portal...",
            PortalStage::Done => "Client portal ready",
        }
    }

    fn next(self) -> PortalStage {
        match self {
            PortalStage::Idle => PortalStage::Idle,
            PortalStage::Preparing => PortalStage::Sending,
            PortalStage::Sending => PortalStage::Opening,
            PortalStage::Opening | PortalStage::Done => PortalStage::Done,
        }
    }
}

impl fmt::Display for PortalStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Pure transition state. Timing lives in [`PortalSequence::run`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PortalSequence {
    stage: PortalStage,
}

impl PortalSequence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stage(&self) -> PortalStage {
        self.stage
    }

    /// Leave `Idle`. Returns false, changing nothing, from any other stage.
    pub fn start(&mut self) -> bool {
        if self.stage != PortalStage::Idle {
            return false;
        }
        self.stage = PortalStage::Preparing;
        true
    }

    /// Step forward once. No-op at `Idle` (use `start`) and at `Done`.
    pub fn advance(&mut self) -> PortalStage {
        self.stage = self.stage.next();
        self.stage
    }

    /// Drive the whole sequence with timer delays, then navigate once.
    ///
    /// Returns false without waiting or navigating if the sequence was not
    /// idle.
    pub async fn run(
        &mut self,
        delays: &StageDelays,
        navigator: &dyn Navigator,
        route: &str,
    ) -> bool {
        self.run_observed(delays, navigator, route, |_| {}).await
    }

    /// Like [`run`](Self::run), reporting each stage as it is entered.
    pub async fn run_observed(
        &mut self,
        delays: &StageDelays,
        navigator: &dyn Navigator,
        route: &str,
        mut on_stage: impl FnMut(PortalStage) + Send,
    ) -> bool {
        if !self.start() {
            tracing::debug!(stage = ?self.stage, "portal sequence already started");
            return false;
        }
        on_stage(self.stage);
        for delay in delays.0 {
            tokio::time::sleep(delay).await;
            if self.stage == PortalStage::Done {
                break;
            }
            let stage = self.advance();
            tracing::debug!(?stage, "portal stage");
            on_stage(stage);
        }
        navigator.navigate(route).await;
        tracing::info!(route, "portal opened");
        true
    }
}

/// The four waits: preparing, sending, opening, and the pause before
/// navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageDelays(pub [Duration; 4]);

impl StageDelays {
    pub fn from_millis(ms: [u64; 4]) -> Self {
        StageDelays(ms.map(Duration::from_millis))
    }

    pub fn zero() -> Self {
        StageDelays([Duration::ZERO; 4])
    }
}

impl Default for StageDelays {
    fn default() -> Self {
        StageDelays::from_millis([800, 800, 800, 600])
    }
}

/// Portal route for one client: `{base}/{contact_id}`.
pub fn portal_route(base: &str, contact_id: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), contact_id)
}

// ──────────────────────────────────────────────
// Navigation
// ──────────────────────────────────────────────

/// One-way navigation collaborator. Routes are not validated.
#[async_trait]
pub trait Navigator: Send + Sync {
    async fn navigate(&self, route: &str);
}

/// Records every route it is asked to open.
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    routes: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn routes(&self) -> Vec<String> {
        self.routes
            .lock()
            .map(|routes| routes.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl Navigator for RecordingNavigator {
    async fn navigate(&self, route: &str) {
        if let Ok(mut routes) = self.routes.lock() {
            routes.push(route.to_string());
        }
    }
}
