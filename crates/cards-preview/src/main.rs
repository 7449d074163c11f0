//! Card preview
//!
//! Reads a registry snapshot and a card configuration, runs the card
//! pipeline, and prints the resulting view model as JSON on stdout.
//! Logs go to stderr.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use cards_config::{CardConfig, CardTarget};
use cards_core::DefaultActiveState;
use cards_engine::{
    build_device_view, build_integration_view, Classifier, IntegrationDeviceResolver,
    IntegrationRequest, Profile, Resolution, StaticConfigEntries,
};
use cards_registry::Hass;
use clap::Parser;
use serde_json::Value;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Preview what a device or integration card would show.
#[derive(Parser, Debug)]
#[command(name = "card-preview", version, about)]
struct Cli {
    /// Registry snapshot (JSON with devices, entities, states, config_entries)
    #[arg(short, long)]
    snapshot: PathBuf,

    /// Card configuration (YAML, or JSON when the file ends in .json)
    #[arg(short, long)]
    card: PathBuf,

    /// Classify with the PetKit card rules
    #[arg(long)]
    petkit: bool,

    /// Print compact JSON
    #[arg(long)]
    compact: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_tracing(verbose: u8) -> Result<()> {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

/// Parse a card config, picking the format from the file extension
fn parse_card(path: &Path, contents: &str) -> Result<CardConfig> {
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    let config = if is_json {
        CardConfig::from_json_str(contents)?
    } else {
        CardConfig::from_yaml_str(contents)?
    };
    Ok(config)
}

async fn render(hass: &Hass, card: &CardConfig, profile: Profile) -> Result<Value> {
    let classifier = Classifier::new(profile, &DefaultActiveState);

    match card.validate()? {
        CardTarget::Device(device_id) => {
            match build_device_view(hass, device_id, card, &classifier) {
                Some(view) => Ok(serde_json::to_value(view)?),
                None => {
                    warn!(device_id, "Device not found in snapshot");
                    Ok(Value::Null)
                }
            }
        }
        CardTarget::Integration(integration) => {
            let request = IntegrationRequest::from_config(card)
                .with_context(|| format!("invalid integration '{integration}'"))?;
            let resolver =
                IntegrationDeviceResolver::new(StaticConfigEntries::new(hass.config_entries.clone()));

            let resolved = match resolver.refresh(hass, &request).await {
                Resolution::Updated(resolved) => resolved,
                Resolution::Failed(e) => return Err(e.into()),
                Resolution::Unchanged | Resolution::Superseded => {
                    resolver.current().unwrap_or_default()
                }
            };
            info!(devices = resolved.devices.len(), "Resolved integration devices");

            let view = build_integration_view(hass, &resolved, card, &classifier);
            Ok(serde_json::to_value(view)?)
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose)?;

    let snapshot = std::fs::read_to_string(&cli.snapshot)
        .with_context(|| format!("failed to read snapshot {}", cli.snapshot.display()))?;
    let hass = Hass::from_json_str(&snapshot)?;

    let contents = std::fs::read_to_string(&cli.card)
        .with_context(|| format!("failed to read card config {}", cli.card.display()))?;
    let card = parse_card(&cli.card, &contents)?;

    let profile = if cli.petkit {
        Profile::PetKit
    } else {
        Profile::Standard
    };
    let output = render(&hass, &card, profile).await?;

    let json = if cli.compact {
        serde_json::to_string(&output)?
    } else {
        serde_json::to_string_pretty(&output)?
    };
    println!("{json}");

    Ok(())
}
