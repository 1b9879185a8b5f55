use clap::{Parser, Subcommand};

mod commands;

use commands::CommonArgs;

#[derive(Parser)]
#[command(name = "confluence")]
#[command(about = "Crypto signal confluence engine", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create database tables if they do not exist
    Setup(CommonArgs),
    /// Collect market, sentiment, and on-chain data
    Collect(CommonArgs),
    /// Score tracked assets and emit BUY signals
    Generate(CommonArgs),
    /// Evaluate stored signals against subsequent price action
    Backtest(CommonArgs),
    /// Run the full cycle: setup, collect, generate, backtest
    Run(CommonArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Setup(args) => commands::setup::run(args).await,
        Commands::Collect(args) => commands::collect::run(args).await,
        Commands::Generate(args) => commands::generate::run(args).await,
        Commands::Backtest(args) => commands::backtest::run(args).await,
        Commands::Run(args) => commands::run::run(args).await,
    }
}
