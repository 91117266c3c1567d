//! Command implementations for the AWP CLI.
//!
//! Provides subcommands for one-shot analysis, listing the parameter
//! catalog and serving the HTTP API.

use clap::Subcommand;

pub mod analyze;
pub mod cors;
pub mod parameters;
pub mod server;

#[derive(Subcommand)]
pub enum Command {
    /// Estimate adverse weather probabilities for a location
    Analyze(analyze::AnalyzeArgs),

    /// Print the catalog of available observation parameters as JSON
    Parameters(parameters::ParametersArgs),

    /// Serve the analysis HTTP API
    Serve(server::ServeArgs),
}

pub async fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Analyze(args) => analyze::run_analyze(&args),
        Command::Parameters(args) => parameters::run_parameters(&args),
        Command::Serve(args) => server::run_serve(args).await,
    }
}
