mod app;
mod config;
mod detector;
mod email;
mod fetcher;
mod logger;

use anyhow::Result;
use clap::Parser;

#[derive(Parser)]
#[command(name = "gregory")]
#[command(about = "Discount page monitor")]
struct Cli {
    /// Run a single check and exit instead of looping
    #[arg(long)]
    once: bool,

    /// Skip email notifications (detections are still logged)
    #[arg(long)]
    no_email: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    app::run_monitor(cli.once, cli.no_email).await
}
