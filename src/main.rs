use clap::Parser;

use vitalstats::adapter::inbound::cli::command::Cli;
use vitalstats::adapter::inbound::cli::{dispatch, output};

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();

    let args = Cli::parse();
    if let Err(e) = dispatch::execute(args).await {
        output::error(&e.to_string());
        std::process::exit(1);
    }
}
