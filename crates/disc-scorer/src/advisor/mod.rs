//! Static build advisor.
//!
//! Looks characters up in a bundled build library and answers with canned
//! priorities, main-stat suggestions and explanations after a simulated
//! latency. It can seed a scoring request but shares no logic with the engine.

pub mod domain;
mod library;
mod matcher;
mod responses;

pub use domain::{
    AdvisorMode, AdvisorRequest, AdvisorResponse, MainStatHints, MainStatSuggestion,
    StatBreakdown, MAX_ADVISOR_DELAY_MS,
};
pub use library::{BuildLibrary, CharacterBuild};

use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Latency used when neither the request nor the configuration set one.
pub const DEFAULT_ADVISOR_DELAY_MS: u64 = 150;

const DEFAULT_CHARACTER: &str = "Generic";

#[derive(Debug, thiserror::Error)]
pub enum AdvisorError {
    #[error("invalid advisor mode: {0}")]
    UnknownMode(String),
    #[error("invalid advisor request: {0}")]
    InvalidRequest(#[source] serde_json::Error),
    #[error("advisor delay {0}ms is outside 0..=5000ms")]
    DelayOutOfRange(u64),
    #[error("advisor delay {0} is not a non-negative number of milliseconds")]
    InvalidDelay(f64),
    #[error("failed to read build library: {0}")]
    LibraryIo(#[source] std::io::Error),
    #[error("invalid build library: {0}")]
    InvalidLibrary(#[source] serde_json::Error),
}

impl AdvisorError {
    /// Whether the caller sent something the advisor cannot answer.
    pub fn is_request_error(&self) -> bool {
        matches!(
            self,
            AdvisorError::UnknownMode(_)
                | AdvisorError::InvalidRequest(_)
                | AdvisorError::DelayOutOfRange(_)
                | AdvisorError::InvalidDelay(_)
        )
    }
}

/// Answers one advisor request per call.
#[derive(Debug, Clone)]
pub struct Advisor {
    library: Arc<BuildLibrary>,
    default_delay: Duration,
}

impl Advisor {
    pub fn new(library: Arc<BuildLibrary>, default_delay: Duration) -> Self {
        Self {
            library,
            default_delay,
        }
    }

    pub fn library(&self) -> &BuildLibrary {
        &self.library
    }

    /// Validates an untyped request and answers it.
    pub async fn handle(&self, raw: serde_json::Value) -> Result<AdvisorResponse, AdvisorError> {
        let request = AdvisorRequest::from_value(raw)?;
        self.respond(request).await
    }

    pub async fn respond(&self, request: AdvisorRequest) -> Result<AdvisorResponse, AdvisorError> {
        request.check_delay()?;

        let delay = request
            .delay_ms
            .map(Duration::from_millis)
            .unwrap_or(self.default_delay);
        tokio::time::sleep(delay).await;

        let character = request.character.as_deref().unwrap_or(DEFAULT_CHARACTER);
        let build = self.library.find(Some(character));
        debug!(mode = %request.mode, character, build = %build.id, "advisor request resolved");

        let response = match request.mode {
            AdvisorMode::Advisor => responses::advise(build),
            AdvisorMode::AutoOptimize => {
                responses::auto_optimize(build, character, request.target.as_deref())
            }
            AdvisorMode::ExplainResult => responses::explain_result(build, &request),
        };
        Ok(response)
    }
}
