use crate::report::{run_criteria, run_rank, RankArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use scholarship_saw::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Scholarship Selection",
    about = "Rank scholarship candidates with Simple Additive Weighting",
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
    /// Rank a roster file (or the default roster) and print the results
    Rank(RankArgs),
    /// Print the criteria catalog with weights and rubrics
    Criteria,
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
        Command::Rank(args) => run_rank(args),
        Command::Criteria => run_criteria(),
    }
}
