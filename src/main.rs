mod api;
mod config;
mod fetch;
mod metar;
mod models;
mod stations;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::Read;
use std::path::PathBuf;
use tracing::info;

use api::client::MetarClient;
use config::{AppConfig, FetchMode};
use models::report::{StationResult, TempsResponse};
use stations::StationRegistry;

#[derive(Parser)]
#[command(name = "metar-temps", about = "Current airport temperatures from raw METAR reports")]
struct Cli {
    /// Path to the config file
    #[arg(short, long, global = true, default_value = config::CONFIG_FILE)]
    config: PathBuf,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch current reports and show temperatures for every station
    Temps {
        /// Print the JSON response instead of a table
        #[arg(long)]
        json: bool,
        /// Fetch each station with its own request
        #[arg(long)]
        per_station: bool,
    },
    /// Run the parser on report text from a file ("-" for stdin)
    Parse {
        /// File holding raw METAR lines
        input: String,
        /// Print the JSON response instead of a table
        #[arg(long)]
        json: bool,
    },
    /// List the configured stations
    Stations,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "metar_temps=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    // Load .env if present (override system env vars)
    dotenvy::dotenv_override().ok();

    let cli = Cli::parse();
    let config = AppConfig::load(&cli.config)?;
    let registry = config.registry()?;

    match cli.command {
        Commands::Temps { json, per_station } => {
            let mode = if per_station { FetchMode::PerStation } else { config.fetch.mode };
            let client = MetarClient::new(&config.fetch)?;
            let airports = fetch_temps(&client, &registry, mode).await?;
            print_response(&TempsResponse::new(airports), json)?;
        }
        Commands::Parse { input, json } => {
            let raw = read_input(&input)?;
            let airports = metar::parse_and_assemble(&raw, &registry);
            print_response(&TempsResponse::new(airports), json)?;
        }
        Commands::Stations => {
            println!("\n{:<6} {}", "ID", "Name");
            println!("{}", "-".repeat(30));
            for station in registry.stations() {
                println!("{:<6} {}", station.id, station.display_name);
            }
        }
    }

    Ok(())
}

async fn fetch_temps(
    client: &MetarClient,
    registry: &StationRegistry,
    mode: FetchMode,
) -> Result<Vec<StationResult>> {
    match mode {
        FetchMode::Batch => {
            info!("Fetching reports for {} stations in one request", registry.len());
            let raw = client
                .fetch_raw(&registry.ids_param())
                .await
                .context("Failed to fetch METAR data")?;
            Ok(metar::parse_and_assemble(&raw, registry))
        }
        FetchMode::PerStation => {
            info!("Fetching reports for {} stations individually", registry.len());
            let ids = registry.ids().map(str::to_string).collect();
            let per_station = fetch::fetch_all(ids, |id| {
                let client = client.clone();
                async move { client.fetch_station(&id).await }
            })
            .await;
            Ok(metar::parse_and_assemble_per_station(&per_station, registry))
        }
    }
}

fn read_input(input: &str) -> Result<String> {
    if input == "-" {
        let mut raw = String::new();
        std::io::stdin()
            .read_to_string(&mut raw)
            .context("Failed to read stdin")?;
        Ok(raw)
    } else {
        std::fs::read_to_string(input).with_context(|| format!("Failed to read {}", input))
    }
}

fn print_response(response: &TempsResponse, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(response)?);
        return Ok(());
    }

    println!("\n{:<24} {:>6} {:>6} {:>3}  {}", "Airport", "°C", "°F", "", "Report");
    println!("{}", "-".repeat(100));
    for r in &response.airports {
        println!(
            "{:<24} {:>6} {:>6} {:>3}  {}",
            truncate(&format!("{} {}", r.id, r.display_name), 24),
            r.temperature_c.map(|c| c.to_string()).unwrap_or_else(|| "--".into()),
            r.temperature_f.map(|f| f.to_string()).unwrap_or_else(|| "--".into()),
            r.trend.symbol(),
            truncate(&r.raw_text, 60),
        );
    }

    let with_data = response.airports.iter().filter(|r| r.has_data()).count();
    println!(
        "\n{} of {} stations reporting, updated {}",
        with_data,
        response.airports.len(),
        response.updated.format("%Y-%m-%d %H:%M UTC")
    );
    Ok(())
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max - 3).collect();
        format!("{}...", cut)
    }
}
