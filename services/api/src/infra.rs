use clap::ValueEnum;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// How CLI commands print a calculation result.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    #[default]
    Table,
    Json,
    Csv,
}

/// Highest enhancement budget the CLI accepts.
pub(crate) const MAX_BASE_ENHANCEMENT: u32 = 10;

pub(crate) fn parse_advisor_mode(raw: &str) -> Result<disc_scorer::advisor::AdvisorMode, String> {
    raw.trim()
        .to_ascii_uppercase()
        .replace('-', "_")
        .parse()
        .map_err(|err: disc_scorer::advisor::AdvisorError| err.to_string())
}
