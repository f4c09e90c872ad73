//! Deterministic disc scoring.
//!
//! [`stats`] resolves stat names against an ordered alias catalog,
//! [`scoring`] turns a [`scoring::CalculationRequest`] into per-disc and total
//! scores, and [`advisor`] serves canned build suggestions that can seed a
//! request.

pub mod advisor;
pub mod config;
pub mod error;
pub mod export;
pub mod router;
pub mod scoring;
pub mod stats;
pub mod telemetry;

pub use router::{scorer_router, ScorerState};

use advisor::{Advisor, BuildLibrary};
use config::AppConfig;
use error::AppError;
use scoring::ScoringEngine;
use stats::StatCatalog;
use std::sync::Arc;

/// Loads the catalog and build library named by the configuration, falling
/// back to the bundled data when no override is set.
pub fn load_state(config: &AppConfig) -> Result<ScorerState, AppError> {
    let catalog = match &config.catalog.stats_path {
        Some(path) => StatCatalog::from_path(path)?,
        None => StatCatalog::bundled().clone(),
    };
    let library = match &config.catalog.builds_path {
        Some(path) => BuildLibrary::from_path(path)?,
        None => BuildLibrary::bundled()?,
    };

    Ok(ScorerState {
        engine: ScoringEngine::new(Arc::new(catalog)),
        advisor: Advisor::new(Arc::new(library), config.advisor.default_delay()),
    })
}
