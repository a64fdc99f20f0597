//! Raavan CLI entry point.

use anyhow::Result;
use clap::Parser;
use raavan::cli::{commands, Cli, Commands};
use raavan::config::Settings;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // API keys may live in a .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config_path = cli
        .config
        .as_deref()
        .map(Settings::expand_path)
        .unwrap_or_else(Settings::default_config_path);
    let settings = Settings::load_from(Some(&config_path))?;

    let log_level = match cli.verbose {
        0 => settings.general.log_level.as_str(),
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| format!("raavan={}", log_level)),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    std::fs::create_dir_all(settings.data_dir())?;

    run(cli.command, settings, config_path).await
}

async fn run(command: Commands, settings: Settings, config_path: PathBuf) -> Result<()> {
    match command {
        Commands::Init => commands::run_init(&settings, &config_path),

        Commands::Doctor => commands::run_doctor(&settings, &config_path).await,

        Commands::Ask {
            question,
            model,
            top_k,
        } => commands::run_ask(&question, model, top_k, settings).await,

        Commands::Chat { model } => commands::run_chat(model, settings).await,

        Commands::Horoscope {
            name,
            location,
            date,
            time,
            json,
        } => commands::run_horoscope(
            &name,
            &location,
            date.as_deref(),
            time.as_deref(),
            json,
            settings,
        ),

        Commands::Index { path } => commands::run_index(&path, settings).await,

        Commands::Stats => commands::run_stats(settings).await,

        Commands::Serve { host, port } => commands::run_serve(&host, port, settings).await,

        Commands::Config { action } => commands::run_config(&action, &settings, &config_path),
    }
}
