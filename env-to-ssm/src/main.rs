use std::process::ExitCode;

use clap::Parser;
use env_to_ssm::{app, cli::Cli};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    app::start(cli).await
}
