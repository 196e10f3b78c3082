// file: src/main.rs
// description: commandline application entry point with command handling
// reference: application bootstrap and orchestration

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{ArgAction, Parser, Subcommand};
use range_harvest::utils::logging::{
    self, format_count, format_error, format_step, format_success, format_warning,
};
use range_harvest::{Config, HarvestError, HarvestPipeline, ProviderConfig};
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "range_harvest")]
#[command(author = "cipher")]
#[command(version = "0.1.0")]
#[command(about = "Fetches published cloud/CDN IP ranges and domains into allow-list files", long_about = None)]
struct Cli {
    #[arg(
        short,
        long,
        value_name = "FILE",
        default_value = "config/default.toml"
    )]
    config: PathBuf,

    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    color: bool,

    #[arg(short, long, action = ArgAction::SetTrue)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch provider lists and write allow-list files
    Fetch {
        /// Providers to harvest; defaults to all configured providers
        #[arg(short, long)]
        provider: Vec<String>,

        #[arg(short, long, value_name = "DIR")]
        output_dir: Option<PathBuf>,
    },

    /// List configured providers and their output files
    Providers,

    /// Show the source list for one provider
    Sources {
        provider: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    logging::init_logger(cli.color, cli.verbose);

    info!("Loading configuration from: {}", cli.config.display());

    let config = if cli.config.exists() {
        Config::load(Some(cli.config.as_path())).context("Failed to load configuration")?
    } else {
        warn!(
            "Config file {} not found, using built-in defaults",
            cli.config.display()
        );
        Config::default_config()
    };

    match cli.command {
        Commands::Fetch {
            provider,
            output_dir,
        } => {
            cmd_fetch(config, provider, output_dir, cli.color).await?;
        }
        Commands::Providers => {
            cmd_providers(&config);
        }
        Commands::Sources { provider } => {
            cmd_sources(&config, &provider)?;
        }
    }

    Ok(())
}

async fn cmd_fetch(
    mut config: Config,
    selected: Vec<String>,
    output_dir: Option<PathBuf>,
    color: bool,
) -> Result<()> {
    if let Some(dir) = output_dir {
        config.output.directory = dir;
    }

    let names: Vec<String> = if selected.is_empty() {
        config.providers.iter().map(|p| p.name.clone()).collect()
    } else {
        selected
    };

    let mut providers: Vec<ProviderConfig> = Vec::new();
    for name in &names {
        match config.provider(name) {
            Some(provider) => providers.push(provider.clone()),
            None => return Err(HarvestError::UnknownProvider(name.clone()).into()),
        }
    }

    let output_directory = config.output.directory.clone();
    let pipeline = HarvestPipeline::with_color(config, color)?;
    let generated_at = Utc::now();
    let total = providers.len();
    let mut failed: Vec<String> = Vec::new();

    for (index, provider) in providers.iter().enumerate() {
        println!(
            "{}",
            format_step(index + 1, total, &format!("Harvesting {}", provider.name))
        );

        match pipeline.run_provider(provider, generated_at).await {
            Ok(run) => {
                for file in &run.files {
                    let breakdown: Vec<String> = file
                        .counts
                        .iter()
                        .filter(|(_, count)| *count > 0)
                        .map(|(kind, count)| format!("{} {}", format_count(*count), kind.label()))
                        .collect();

                    let line = format!(
                        "{} -> {}",
                        file.path.display(),
                        if breakdown.is_empty() {
                            "0 entries".to_string()
                        } else {
                            breakdown.join(", ")
                        }
                    );

                    if file.total() == 0 {
                        println!("{}", format_warning(&line));
                    } else {
                        println!("{}", format_success(&line));
                    }
                }
            }
            Err(e) => {
                println!(
                    "{}",
                    format_error(&format!("{} failed: {}", provider.name, e))
                );
                failed.push(provider.name.clone());
            }
        }
    }

    if !failed.is_empty() {
        anyhow::bail!(
            "{} of {} providers failed: {}",
            failed.len(),
            total,
            failed.join(", ")
        );
    }

    println!("\nAll done! Files are in {}", output_directory.display());
    Ok(())
}

fn cmd_providers(config: &Config) {
    println!("Configured providers:\n");
    for provider in &config.providers {
        let outputs: Vec<&str> = provider
            .outputs
            .iter()
            .map(|o| o.file_name.as_str())
            .collect();
        println!("  {:<12} {}", provider.name, provider.title);
        println!(
            "  {:<12} {} sources, writes {}",
            "",
            provider.sources.len(),
            outputs.join(", ")
        );
    }
}

fn cmd_sources(config: &Config, name: &str) -> Result<()> {
    let provider = config
        .provider(name)
        .ok_or_else(|| HarvestError::UnknownProvider(name.to_string()))?;

    println!("Sources for {}:\n", provider.name);
    for source in &provider.sources {
        let marker = if source.optional { " (optional)" } else { "" };
        println!(
            "  {:<24} {:<5} {}{}",
            source.id,
            source.kind.as_str(),
            source.location.describe(),
            marker
        );
    }

    Ok(())
}
