//! Serializers for calculation results: pretty JSON, CSV and a plain-text table.

use crate::scoring::{CalculationResponse, CalculationResultDisc};
use crate::stats::StatId;
use serde::Serialize;
use std::fmt::Write as _;
use std::io::Write;

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("failed to write JSON export: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to write CSV export: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to flush export: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Serialize)]
struct DiscRow<'a> {
    slot: u8,
    main: &'a str,
    substats: String,
    matches: String,
    matches_count: usize,
    base: u32,
    score: u32,
}

impl<'a> From<&'a CalculationResultDisc> for DiscRow<'a> {
    fn from(disc: &'a CalculationResultDisc) -> Self {
        Self {
            slot: disc.slot,
            main: disc.main.as_str(),
            substats: join_stats(&disc.substats),
            matches: join_stats(&disc.matches),
            matches_count: disc.matches_count,
            base: disc.base,
            score: disc.score,
        }
    }
}

fn join_stats(stats: &[StatId]) -> String {
    stats
        .iter()
        .map(StatId::as_str)
        .collect::<Vec<_>>()
        .join("/")
}

pub fn write_json<W: Write>(response: &CalculationResponse, writer: W) -> Result<(), ExportError> {
    serde_json::to_writer_pretty(writer, response)?;
    Ok(())
}

/// One row per disc. The total is not written; it is the sum of `score`.
pub fn write_csv<W: Write>(response: &CalculationResponse, writer: W) -> Result<(), ExportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for disc in &response.discs {
        csv_writer.serialize(DiscRow::from(disc))?;
    }
    csv_writer.flush()?;
    Ok(())
}

pub fn render_table(response: &CalculationResponse) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<5} {:<10} {:<24} {:<7} {:>5}",
        "SLOT", "MAIN", "SUBSTATS", "MATCHES", "SCORE"
    );
    for disc in &response.discs {
        let _ = writeln!(
            out,
            "{:<5} {:<10} {:<24} {:<7} {:>5}",
            disc.slot,
            disc.main.as_str(),
            join_stats(&disc.substats),
            disc.matches_count,
            disc.score
        );
    }
    let _ = writeln!(
        out,
        "total score: {} (auto-fill: {})",
        response.total_score, response.auto_fill_source_used
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::{calculate_score, CalculationRequest, SlotMainOverrides};

    fn sample() -> CalculationResponse {
        let priorities = ["ATK%", "CR", "CD", "AP"].map(String::from).to_vec();
        calculate_score(&CalculationRequest::standard(
            priorities,
            5,
            &SlotMainOverrides::default(),
        ))
    }

    #[test]
    fn csv_has_header_and_one_row_per_disc() {
        let mut buffer = Vec::new();
        write_csv(&sample(), &mut buffer).expect("csv export");
        let text = String::from_utf8(buffer).expect("utf8");
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 7);
        assert_eq!(lines[0], "slot,main,substats,matches,matches_count,base,score");
        assert_eq!(lines[4], "4,?,ATK%/CR/CD/AP,ATK%/CR/CD/AP,4,5,9");
    }

    #[test]
    fn json_export_round_trips_total() {
        let mut buffer = Vec::new();
        write_json(&sample(), &mut buffer).expect("json export");
        let value: serde_json::Value = serde_json::from_slice(&buffer).expect("valid json");
        assert_eq!(value["total_score"], sample().total_score);
        assert_eq!(value["discs"][3]["main"], "?");
    }

    #[test]
    fn table_ends_with_total() {
        let table = render_table(&sample());
        assert!(table.starts_with("SLOT"));
        assert!(table.trim_end().ends_with("(auto-fill: default)"));
    }
}
