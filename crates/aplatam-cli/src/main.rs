//! aplatam — Command-line interface for aplatam-core
//!
//! Inspect the city catalog behind the informal settlements map and check
//! what the map view controller does for a given page URL.
//!
//! Usage examples
//! --------------
//!
//! - Show catalog stats
//!   $ aplatam stats
//!
//! - List cities with their map links (default language: es)
//!   $ aplatam cities
//!   $ aplatam --lang en cities
//!
//! - Look up a city by id or name
//!   $ aplatam city sp
//!   $ aplatam city "sao paulo"
//!
//! - Resolve a map URL to its initial viewport
//!   $ aplatam resolve "/es/map?id=sp" --width 1280 --height 800 --navbar 52
//!
//! - Replay a recorded session
//!   $ aplatam replay "?id=ba" --events session.json
//!
//! Data source
//! -----------
//!
//! By default the catalog is read from `APLATAM_DATA_DIR/cities.json`, which
//! falls back to the `data/` directory shipped with `aplatam-core`. Use
//! `--input <path>` for a custom `.json` or `.json.gz` catalog.
//! Set `RUST_LOG=debug` to trace selection and merges on stderr.
mod args;

use crate::args::{CliArgs, Commands};
use anyhow::{bail, Context};
use aplatam_cli::{apply_event, host_for, ReplayEvent};
use aplatam_core::prelude::*;
use clap::Parser;
use std::fs;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(std::io::stderr)
        .init();

    let args = CliArgs::parse();
    let config = MapConfig::from_env();

    let input_path = args.input.unwrap_or_else(|| config.catalog_path());
    let catalog = CityCatalog::load_from_path(&input_path)
        .with_context(|| format!("loading catalog {}", input_path.display()))?;

    let lang = args
        .lang
        .unwrap_or_else(|| config.default_language().to_string());
    if !config.is_supported_language(&lang) {
        bail!("unsupported language `{lang}` (expected one of {:?})", config.languages);
    }

    match args.command {
        Commands::Stats => {
            let stats = catalog.stats();
            println!("Catalog statistics:");
            println!("  Cities: {}", stats.cities);
            println!("  Countries: {}", stats.countries);
            if let Ok(first) = catalog.find_by_id(None) {
                println!("  Default city: {}", first.display_name());
            }
        }

        Commands::Cities => {
            for city in &catalog {
                println!("{} ({}) -> {}", city.display_name(), city.id, city.map_link(&lang));
            }
        }

        Commands::City { query } => {
            let found = catalog
                .records()
                .iter()
                .find(|c| c.id == query)
                .or_else(|| catalog.find_by_name(&query));
            match found {
                Some(city) => {
                    println!("City: {}", city.name);
                    println!("Id: {}", city.id);
                    println!("Country: {}", city.country);
                    println!("Center: {}, {}", city.center.lat, city.center.lon);
                    println!("Zoom: {}", city.zoom);
                    println!("Link: {}", city.map_link(&lang));
                }
                None => {
                    let similar = catalog.find_by_substring(&query);
                    if similar.is_empty() {
                        eprintln!("No city found for: {query}");
                    } else {
                        eprintln!("No exact match for {query}; did you mean:");
                        for city in similar {
                            eprintln!("- {} ({})", city.display_name(), city.id);
                        }
                    }
                }
            }
        }

        Commands::Resolve {
            url,
            width,
            height,
            navbar,
        } => {
            let size = match (width, height) {
                (Some(w), Some(h)) => Some(WindowSize::new(w, h)),
                (None, None) => None,
                _ => bail!("--width and --height must be given together"),
            };
            let host = host_for(&url, size, navbar);
            let mut controller = ViewportController::new(host.clone(), host).with_config(&config);
            let city = controller.start(catalog.records())?;

            println!("City: {} ({})", city.display_name(), city.id);
            println!("State: {:?}", controller.state());
            println!("{}", serde_json::to_string_pretty(&controller.viewport())?);
            controller.stop();
        }

        Commands::Replay { url, events } => {
            let raw = fs::read_to_string(&events)
                .with_context(|| format!("reading events {}", events.display()))?;
            let events: Vec<ReplayEvent> =
                serde_json::from_str(&raw).context("parsing replay events")?;

            let host = host_for(&url, None, None);
            let mut controller = ViewportController::new(host.clone(), host).with_config(&config);
            controller.add_sink(|vp: &Viewport| match serde_json::to_string(vp) {
                Ok(line) => println!("{line}"),
                Err(e) => tracing::error!(error = %e, "viewport not serializable"),
            });
            let city = controller.start(catalog.records())?;
            tracing::info!(city = %city.id, events = events.len(), "replaying session");

            for (index, event) in events.iter().enumerate() {
                let outcome = apply_event(&mut controller, event);
                tracing::debug!(index, ?event, ?outcome, "replayed event");
            }
            eprintln!("Final state: {:?}", controller.state());
        }
    }

    Ok(())
}
