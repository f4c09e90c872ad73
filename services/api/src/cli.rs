use crate::commands::{
    run_advise, run_catalog, run_normalize, run_optimize, run_score, AdviseArgs, NormalizeArgs,
    OptimizeArgs, ScoreArgs,
};
use crate::server;
use clap::{Args, Parser, Subcommand};
use disc_scorer::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Disc Scorer",
    about = "Score disc substats against a stat priority list from the command line or over HTTP",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Score a full disc set against a priority list
    Score(ScoreArgs),
    /// Ask the build advisor for suggestions or an explanation
    Advise(AdviseArgs),
    /// Seed priorities and main stats from the advisor, then score the set
    Optimize(OptimizeArgs),
    /// Resolve stat names to their canonical ids
    Normalize(NormalizeArgs),
    /// Print the stat catalog and slot rules as JSON
    Catalog,
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Score(args) => run_score(args),
        Command::Advise(args) => run_advise(args).await,
        Command::Optimize(args) => run_optimize(args).await,
        Command::Normalize(args) => run_normalize(args),
        Command::Catalog => run_catalog(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_subcommand_defaults_to_serve() {
        let cli = Cli::try_parse_from(["disc-scorer-api"]).expect("parses");
        assert!(cli.command.is_none());
    }

    #[test]
    fn score_accepts_repeated_priorities() {
        let cli = Cli::try_parse_from([
            "disc-scorer-api",
            "score",
            "--priority",
            "ATK%",
            "--priority",
            "CR",
            "--base",
            "5",
            "--slot4",
            "CR",
        ])
        .expect("parses");
        let Some(Command::Score(args)) = cli.command else {
            panic!("expected score command");
        };
        assert_eq!(args.priority, vec!["ATK%", "CR"]);
        assert_eq!(args.base, 5);
        assert_eq!(args.slot4.as_deref(), Some("CR"));
    }

    #[test]
    fn base_enhancement_is_range_checked() {
        let result = Cli::try_parse_from(["disc-scorer-api", "score", "--base", "11"]);
        assert!(result.is_err());
    }
}
