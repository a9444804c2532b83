use anyhow::Result;
use clap::Parser;
use edge_server::{load_config, run_migrate, run_server, Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { bind } => run_server(load_config(bind)?).await,
        Commands::Migrate => run_migrate(load_config(None)?).await,
    }
}
