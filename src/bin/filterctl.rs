use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;

use clap::{Parser, Subcommand};
use filter_chain::config::{load_config, ConfigWatcher, GatewayConfig};
use filter_chain::observability::logging;

#[derive(Parser)]
#[command(name = "filterctl")]
#[command(about = "Validate and inspect filter chain configuration", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "filters.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse and validate the configuration file
    Check,
    /// Print the filter descriptors as JSON
    Show,
    /// Re-validate the file every time it changes
    Watch,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Check => check(&cli.config),
        Commands::Show => show(&cli.config),
        Commands::Watch => watch(&cli.config).await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn check(path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(path)?;
    println!("{}: OK", path.display());
    print_summary(&config);
    Ok(())
}

fn show(path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(path)?;
    println!("{}", serde_json::to_string_pretty(&config.filters)?);
    Ok(())
}

async fn watch(path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let initial = load_config(path);
    let (level, poll_secs) = match &initial {
        Ok(config) => (
            config.observability.log_level.clone(),
            config.reload.poll_interval_secs,
        ),
        Err(_) => ("info".to_string(), 2),
    };
    logging::init(&level)?;

    match initial {
        Ok(config) => tracing::info!(filters = config.filters.len(), "Initial configuration valid"),
        Err(e) => tracing::error!(error = %e, "Initial configuration invalid"),
    }

    let (watcher, mut updates) = ConfigWatcher::new(path, Duration::from_secs(poll_secs));
    let _watcher = watcher.run()?;

    loop {
        tokio::select! {
            update = updates.recv() => match update {
                Some(config) => {
                    let names: Vec<&str> = config.filters.iter().map(|f| f.name.as_str()).collect();
                    tracing::info!(filters = ?names, policy = ?config.reload.policy, "Configuration valid");
                }
                None => break,
            },
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Interrupted, stopping watch");
                break;
            }
        }
    }

    Ok(())
}

fn print_summary(config: &GatewayConfig) {
    println!(
        "  policy: {:?}, watch: {}, poll interval: {}s",
        config.reload.policy, config.reload.watch, config.reload.poll_interval_secs
    );
    println!("  filters ({}):", config.filters.len());
    for (index, filter) in config.filters.iter().enumerate() {
        println!("    #{} {} ({} options)", index, filter.name, filter.options.len());
    }
}
