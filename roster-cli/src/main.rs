mod cli;
mod config;
mod export;
mod fetch;
mod filter;
mod ingest;
mod metrics;
mod overrides;
mod pipeline;
mod types;

use anyhow::Result;
use clap::Parser;
use colored::*;

use cli::{Cli, Commands, OverrideCommands};
use cli::commands::{self, Ctx};

#[tokio::main]
async fn main() {
    env_logger::init();

    if let Err(err) = run().await {
        eprintln!("{} {:#}", "Hata:".red().bold(), err);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    let ctx = Ctx::build(&cli).await?;

    match &cli.command {
        Commands::Load => commands::load::handle(&ctx).await,
        Commands::Export(args) => commands::export::handle(&ctx, args).await,
        Commands::Override(action) => match action {
            OverrideCommands::Set {
                domain,
                identity,
                fields,
            } => commands::overrides::handle_set(&ctx, domain, identity, fields).await,
            OverrideCommands::Clear { yes } => commands::overrides::handle_clear(&ctx, *yes).await,
        },
        Commands::Departures => commands::departures::handle(&ctx).await,
    }
}
