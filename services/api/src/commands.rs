use crate::infra::{parse_advisor_mode, OutputFormat, MAX_BASE_ENHANCEMENT};
use clap::Args;
use disc_scorer::advisor::{AdvisorMode, AdvisorRequest, AdvisorResponse};
use disc_scorer::config::AppConfig;
use disc_scorer::error::AppError;
use disc_scorer::export::{self, ExportError};
use disc_scorer::scoring::{CalculationRequest, CalculationResponse, SlotMainOverrides};
use disc_scorer::stats::CatalogView;
use disc_scorer::{load_state, ScorerState};
use std::io::Write;

const DEFAULT_PRIORITIES: [&str; 4] = ["ATK%", "CR", "CD", "AP"];

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// Priority stat, most important first (repeatable). Defaults to ATK%, CR, CD, AP.
    #[arg(long = "priority")]
    pub(crate) priority: Vec<String>,
    /// Enhancement budget added to every disc with at least one match (0-10)
    #[arg(long, default_value_t = 5, value_parser = clap::value_parser!(u32).range(0..=MAX_BASE_ENHANCEMENT as i64))]
    pub(crate) base: u32,
    /// Main stat for slot 4
    #[arg(long)]
    pub(crate) slot4: Option<String>,
    /// Main stat for slot 5
    #[arg(long)]
    pub(crate) slot5: Option<String>,
    /// Main stat for slot 6
    #[arg(long)]
    pub(crate) slot6: Option<String>,
    /// Output format for the result
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub(crate) format: OutputFormat,
}

#[derive(Args, Debug)]
pub(crate) struct AdviseArgs {
    /// ADVISOR, AUTO_OPTIMIZE or EXPLAIN_RESULT
    #[arg(long, value_parser = parse_advisor_mode)]
    pub(crate) mode: AdvisorMode,
    /// Character name; fuzzy matched against the build library
    #[arg(long)]
    pub(crate) character: Option<String>,
    /// Optimization target named in AUTO_OPTIMIZE notes
    #[arg(long)]
    pub(crate) target: Option<String>,
    /// Total score to explain (EXPLAIN_RESULT)
    #[arg(long)]
    pub(crate) score: Option<f64>,
    /// Priorities to compare against the recommended build (repeatable)
    #[arg(long = "priority")]
    pub(crate) priority: Vec<String>,
    /// Simulated latency in milliseconds (0-5000)
    #[arg(long)]
    pub(crate) delay: Option<u64>,
}

#[derive(Args, Debug)]
pub(crate) struct OptimizeArgs {
    /// Character name; fuzzy matched against the build library
    #[arg(long)]
    pub(crate) character: Option<String>,
    /// Optimization target named in the advisor notes
    #[arg(long)]
    pub(crate) target: Option<String>,
    /// Enhancement budget (0-10)
    #[arg(long, default_value_t = 5, value_parser = clap::value_parser!(u32).range(0..=MAX_BASE_ENHANCEMENT as i64))]
    pub(crate) base: u32,
    /// Output format for the result
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub(crate) format: OutputFormat,
}

#[derive(Args, Debug)]
pub(crate) struct NormalizeArgs {
    /// Stat names to resolve
    #[arg(required = true)]
    pub(crate) stats: Vec<String>,
}

fn load_cli_state() -> Result<ScorerState, AppError> {
    let config = AppConfig::load()?;
    load_state(&config)
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let ScoreArgs {
        priority,
        base,
        slot4,
        slot5,
        slot6,
        format,
    } = args;

    let state = load_cli_state()?;
    let priorities = if priority.is_empty() {
        DEFAULT_PRIORITIES.map(String::from).to_vec()
    } else {
        priority
    };
    let overrides = SlotMainOverrides {
        slot4,
        slot5,
        slot6,
    };

    let request = CalculationRequest::standard(priorities, base, &overrides);
    let response = state.engine.score(&request);
    print_response(&response, format)
}

pub(crate) async fn run_advise(args: AdviseArgs) -> Result<(), AppError> {
    let AdviseArgs {
        mode,
        character,
        target,
        score,
        priority,
        delay,
    } = args;

    let state = load_cli_state()?;
    let mut request = AdvisorRequest::new(mode);
    request.character = character;
    request.target = target;
    request.score = score;
    if !priority.is_empty() {
        request.priorities = Some(priority);
    }
    request.delay_ms = delay;

    let response = state.advisor.respond(request).await?;
    print_advisor_response(&response)
}

pub(crate) async fn run_optimize(args: OptimizeArgs) -> Result<(), AppError> {
    let OptimizeArgs {
        character,
        target,
        base,
        format,
    } = args;

    let state = load_cli_state()?;
    let mut request = AdvisorRequest::new(AdvisorMode::AutoOptimize);
    request.character = character;
    request.target = target;
    let suggestion = state.advisor.respond(request).await?;

    let calculation = seeded_request(&suggestion, base);
    if let Some(notes) = &suggestion.notes {
        println!("{notes}");
    }
    let response = state.engine.score(&calculation);
    print_response(&response, format)
}

/// Builds the full-set request an optimizer suggestion implies.
pub(crate) fn seeded_request(suggestion: &AdvisorResponse, base: u32) -> CalculationRequest {
    let priorities = suggestion
        .priorities
        .clone()
        .unwrap_or_else(|| DEFAULT_PRIORITIES.map(String::from).to_vec());
    let overrides = suggestion
        .main_stats
        .as_ref()
        .map(|mains| mains.to_overrides())
        .unwrap_or_default();

    let mut request = CalculationRequest::standard(priorities, base, &overrides);
    request.auto_fill_source = Some("advisor".to_string());
    request
}

pub(crate) fn run_normalize(args: NormalizeArgs) -> Result<(), AppError> {
    let state = load_cli_state()?;
    let catalog = state.engine.catalog();
    for raw in &args.stats {
        println!("{raw} -> {}", catalog.normalize_label(raw));
    }
    Ok(())
}

pub(crate) fn run_catalog() -> Result<(), AppError> {
    let state = load_cli_state()?;
    let view = CatalogView::from_catalog(state.engine.catalog());
    let mut stdout = std::io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, &view).map_err(ExportError::from)?;
    writeln!(stdout)?;
    Ok(())
}

fn print_response(response: &CalculationResponse, format: OutputFormat) -> Result<(), AppError> {
    let mut stdout = std::io::stdout().lock();
    match format {
        OutputFormat::Table => write!(stdout, "{}", export::render_table(response))?,
        OutputFormat::Json => {
            export::write_json(response, &mut stdout)?;
            writeln!(stdout)?;
        }
        OutputFormat::Csv => export::write_csv(response, &mut stdout)?,
    }
    Ok(())
}

fn print_advisor_response(response: &AdvisorResponse) -> Result<(), AppError> {
    let mut stdout = std::io::stdout().lock();
    if let Some(text) = &response.text {
        writeln!(stdout, "{text}\n")?;
    }
    serde_json::to_writer_pretty(&mut stdout, response).map_err(ExportError::from)?;
    writeln!(stdout)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use disc_scorer::advisor::MainStatSuggestion;
    use disc_scorer::scoring::calculate_score;

    #[test]
    fn seeded_request_uses_suggested_mains() {
        let suggestion = AdvisorResponse {
            priorities: Some(vec!["Impact".into(), "CR".into(), "ATK%".into(), "ER".into()]),
            main_stats: Some(MainStatSuggestion {
                slot4: "CR".to_string(),
                slot5: "DMG Bonus".to_string(),
                slot6: "Impact".to_string(),
            }),
            ..AdvisorResponse::default()
        };

        let request = seeded_request(&suggestion, 3);
        assert_eq!(request.auto_fill_source.as_deref(), Some("advisor"));
        assert_eq!(request.discs[5].main.as_deref(), Some("Impact"));

        let response = calculate_score(&request);
        assert_eq!(response.auto_fill_source_used, "advisor");
        assert_eq!(response.discs[5].main.as_str(), "Impact");
        // Impact and ER are not substats, so slot 6 fills CR, ATK% then catalog stats.
        assert_eq!(response.discs[5].matches_count, 2);
        assert_eq!(response.discs[5].score, 5);
    }

    #[test]
    fn seeded_request_without_suggestion_uses_defaults() {
        let request = seeded_request(&AdvisorResponse::default(), 5);
        assert_eq!(request.priorities, DEFAULT_PRIORITIES.map(String::from).to_vec());
        assert!(request.discs.iter().all(|disc| disc.main.is_none()));
    }
}
