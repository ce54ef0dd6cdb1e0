use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// CLI arguments for aplatam
#[derive(Debug, Parser)]
#[command(
    name = "aplatam",
    version,
    about = "Inspect the city catalog and replay map viewport sessions"
)]
pub struct CliArgs {
    /// Path to the city catalog (.json or .json.gz; default: bundled cities.json)
    #[arg(short = 'i', long = "input", global = true)]
    pub input: Option<PathBuf>,

    /// Language prefix used for map links (default: es)
    #[arg(short = 'l', long = "lang", global = true)]
    pub lang: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show a summary of the catalog
    Stats,

    /// List all cities with their map links
    Cities,

    /// Look up a city by id or name (accent-insensitive)
    City {
        /// City id (e.g. sp) or name (e.g. "sao paulo")
        query: String,
    },

    /// Print the initial viewport a map page URL resolves to
    Resolve {
        /// Page URL or query string (e.g. "/es/map?id=sp" or "?id=sp")
        url: String,

        /// Window width in pixels
        #[arg(long)]
        width: Option<u32>,

        /// Window height in pixels
        #[arg(long)]
        height: Option<u32>,

        /// Rendered navigation bar height in pixels
        #[arg(long)]
        navbar: Option<u32>,
    },

    /// Mount a map for URL, apply a JSON list of events and print every
    /// published viewport
    Replay {
        /// Page URL or query string
        url: String,

        /// JSON file with events: {"resize":{"width":W,"height":H}},
        /// {"change":{...}}, {"navbar":N|null} or "stop"
        #[arg(short = 'e', long = "events")]
        events: PathBuf,
    },
}
