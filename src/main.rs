//! crisis-locator - country resolution for crisis resources
//!
//! This is the composition root that wires together all the components.

use clap::{Parser, Subcommand};
use crisis_locator::adapters::outbound::{
    ConfiguredGeolocation, FixedTimezone, ReqwestHttpClient, SqliteKeyValueStore, SystemTimezone,
};
use crisis_locator::{load_config, LocationResolver, TimezoneSource};
use std::sync::Arc;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "crisis-locator", version, about = "Find which country's crisis resources apply")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Detect the country (stored choice, device position, timezone, IP)
    Resolve {
        /// Print every step that was attempted
        #[arg(long)]
        explain: bool,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Store a country the user accepted or picked
    Confirm {
        /// ISO 3166-1 alpha-2 code, e.g. DE
        code: String,
    },
    /// Forget the stored country
    Clear,
    /// List supported countries for manual selection
    Countries,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration from environment
    let cfg = load_config()?;

    // Setup logging (stderr, stdout carries results)
    let log_level = if cfg.debug {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .init();

    // ===== COMPOSITION ROOT =====

    let store = Arc::new(SqliteKeyValueStore::open(&cfg.db_path)?);

    // Backstop only; every step enforces its own, shorter budget.
    let backstop = Duration::from_millis(
        cfg.geocode_timeout_ms.max(cfg.ip_timeout_ms) + 1000,
    );
    let http = Arc::new(ReqwestHttpClient::new(backstop)?);

    let geolocation = Arc::new(ConfiguredGeolocation::new(cfg.position()));

    let timezone: Arc<dyn TimezoneSource> = match &cfg.timezone {
        Some(name) => Arc::new(FixedTimezone::new(name.clone())),
        None => Arc::new(SystemTimezone::new()),
    };

    let resolver = LocationResolver::new(
        cfg.resolver_config(),
        Arc::new(crisis_locator::CountryCatalog::builtin()),
        store,
        geolocation,
        http,
        timezone,
    );

    match cli.command {
        Command::Resolve { explain, json } => {
            let resolution = resolver.resolve_explained().await;

            if json {
                println!("{}", serde_json::to_string(&resolution.result)?);
            } else {
                println!("{}", resolution.result);
            }

            if explain {
                for report in &resolution.trace {
                    match report.error() {
                        None => println!("  {}: ok", report.step),
                        Some(e) => println!("  {}: {}", report.step, e),
                    }
                }
            }

            if !resolution.result.is_resolved() {
                eprintln!("run `crisis-locator countries` and `crisis-locator confirm <CODE>`");
            }
        }
        Command::Confirm { code } => {
            let code = resolver.confirm(&code)?;
            println!("stored {}", code);
        }
        Command::Clear => {
            resolver.clear_preference()?;
            println!("cleared");
        }
        Command::Countries => {
            for entry in resolver.countries() {
                println!("{}  {}", entry.code, entry.name);
            }
        }
    }

    Ok(())
}
