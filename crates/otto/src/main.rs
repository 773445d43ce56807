mod cli;
mod commands;
mod config;

use clap::Parser;
use cli::{Cli, Commands};
use config::AppConfig;

fn main() -> anyhow::Result<()> {
    // Initialize tracing; stdout carries command output
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let cli = Cli::parse();
    let config = AppConfig::load();

    match cli.command {
        Commands::Date {
            phrase,
            year,
            today,
        } => commands::date::run(&phrase, year, today.as_deref(), &config),
        Commands::Time { phrase } => commands::time::run(&phrase),
        Commands::Schedule {
            title,
            date,
            time,
            strict,
            year,
        } => commands::schedule::run(&title, &date, &time, strict, year, &config),
        Commands::Compress {
            file,
            aggressiveness,
            min_length,
        } => commands::compress::run(file.as_deref(), aggressiveness, min_length, &config),
        Commands::Check => commands::check::run(&config),
        Commands::Console => commands::console::run(&config),
        Commands::Stats => commands::stats::run(&config),
        Commands::Version => commands::version::run(),
    }
}
