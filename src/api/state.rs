use tokio::sync::mpsc;

use crate::core::AppConfig;
use crate::oauth::FlowOutcome;

pub struct AppState {
    pub config: AppConfig,
    /// Set when a `connect` run is waiting on the outcome of the flow
    /// pages. Page handlers report through it; standalone `serve` runs
    /// leave it empty.
    pub flow: Option<mpsc::Sender<FlowOutcome>>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        Self { config, flow: None }
    }

    pub fn with_flow(config: AppConfig, flow: mpsc::Sender<FlowOutcome>) -> Self {
        Self {
            config,
            flow: Some(flow),
        }
    }
}
