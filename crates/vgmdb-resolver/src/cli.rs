use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::ResolverConfig;

const VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("GIT_SHA"),
    ", ",
    env!("BUILD_DATE"),
    ")"
);

#[derive(Parser, Debug)]
#[command(name = "vgmdb-resolver", version = VERSION)]
pub struct Args {
    #[command(subcommand)]
    pub cmd: Command,

    /// Optional resolver config file (TOML)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Comma-separated language priority, e.g. "en, ja-latn, ja"
    #[arg(long)]
    pub lang_priority: Option<String>,

    /// Distance weight contributed by VGMdb candidates
    #[arg(long)]
    pub source_weight: Option<f64>,

    /// Catalog API base URL
    #[arg(long)]
    pub base_url: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Search for album candidates
    Search {
        /// Album artist (ignored with --various)
        #[arg(long, default_value = "")]
        artist: String,

        /// Album title
        #[arg(long)]
        album: String,

        /// Treat the album as a various-artists compilation
        #[arg(long)]
        various: bool,
    },

    /// Fetch one album by VGMdb id
    Album {
        /// VGMdb album id, e.g. 79
        id: String,
    },
}

impl Args {
    /// Command-line flags take precedence over the config file.
    pub fn apply_overrides(&self, cfg: &mut ResolverConfig) {
        if let Some(langs) = self.lang_priority.as_ref() {
            cfg.lang_priority = Some(langs.clone());
        }
        if let Some(weight) = self.source_weight {
            cfg.source_weight = Some(weight);
        }
        if let Some(url) = self.base_url.as_ref() {
            cfg.base_url = Some(url.clone());
        }
    }
}
