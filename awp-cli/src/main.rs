//! AWP CLI - estimate adverse weather probabilities and serve the analysis API.

use clap::Parser;
use log::debug;

#[derive(Parser)]
#[command(
    name = "awp-cli",
    version,
    about = "Adverse weather probability toolkit"
)]
struct Cli {
    #[command(subcommand)]
    command: awp_cmd::Command,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    debug!("Starting awp-cli {}", env!("CARGO_PKG_VERSION"));
    awp_cmd::run(cli.command).await
}
