use clap::Parser;
use goodbye_detector::cli::{self, Cli, Command};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Interactive => cli::interactive::run().await,
        Command::Classify(args) => cli::classify::run(args).await,
        Command::Warm => cli::warm::run().await,
    }
}
