use anyhow::{Context, Result};
use clap::Parser;
use image_labeler::{cli, commands, config, pipeline, renamer};
use cli::{Cli, Commands};
use config::{ConfigStore, API_KEY_VAR};
use pipeline::RunOptions;
use renamer::WriteMode;
use std::time::Duration;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    if let Err(e) = run(cli).await {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn init_logger(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    let store = ConfigStore::default_location()?;
    let env_key = std::env::var(API_KEY_VAR).ok();

    match cli.command {
        Commands::Config { api_key } => {
            commands::run_config(&store, api_key).context("failed to update config")?;
        }

        Commands::Rename { path, dry_run, webp, delay_ms } => {
            let options = RunOptions {
                dry_run,
                verbose: cli.verbose,
                mode: WriteMode::from_webp_flag(webp),
                delay: Duration::from_millis(delay_ms),
            };
            commands::run_rename(&store, env_key, &path, &cli.model, options).await?;
        }

        Commands::Single { file, dry_run, webp } => {
            let options = RunOptions {
                dry_run,
                verbose: cli.verbose,
                mode: WriteMode::from_webp_flag(webp),
                ..Default::default()
            };
            commands::run_single(&store, env_key, &file, &cli.model, options).await?;
        }
    }

    Ok(())
}
