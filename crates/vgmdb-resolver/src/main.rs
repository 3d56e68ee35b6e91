//! vgmdb-resolver: look up VGMdb albums from the command line and print the
//! normalized metadata as JSON.
//!
//! ## Modes
//! - `search`: clean the artist/album query, search, expand up to five hits.
//! - `album`: fetch and normalize a single album id.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use tracing_subscriber::EnvFilter;
use vgmdb_resolver::cli::{Args, Command};
use vgmdb_resolver::{DistanceContribution, NormalizedAlbum, Resolver, ResolverConfig};

#[derive(Serialize)]
struct Candidate<'a> {
    #[serde(flatten)]
    album: &'a NormalizedAlbum,
    distance: Option<DistanceContribution>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new("info,vgmdb_resolver=info")
        }))
        .init();

    let mut cfg = match args.config.as_ref() {
        Some(path) => ResolverConfig::load(path)?,
        None => match default_config_path().filter(|path| path.exists()) {
            Some(path) => {
                tracing::info!(path = %path.display(), "using config next to executable");
                ResolverConfig::load(&path)?
            }
            None => ResolverConfig::default(),
        },
    };
    args.apply_overrides(&mut cfg);
    let resolver = Resolver::from_settings(cfg.into_settings()?);
    let settings = resolver.settings();
    tracing::debug!(
        base_url = %resolver.client().base_url(),
        languages = ?settings.normalize.languages.tags(),
        prefer_performers = settings.normalize.prefer_performers,
        source_weight = settings.source_weight,
        "resolver settings"
    );

    let albums = match &args.cmd {
        Command::Search {
            artist,
            album,
            various,
        } => {
            let albums = resolver.find_candidates(artist, album, *various);
            tracing::info!(count = albums.len(), "vgmdb candidates");
            albums
        }
        Command::Album { id } => match resolver
            .fetch_by_id(id)
            .with_context(|| format!("resolve vgmdb album {id}"))?
        {
            Some(album) => vec![album],
            None => {
                tracing::warn!(album_id = %id, "vgmdb album not found");
                Vec::new()
            }
        },
    };

    let output: Vec<Candidate<'_>> = albums
        .iter()
        .map(|album| Candidate {
            album,
            distance: resolver.album_distance(album),
        })
        .collect();
    let json = serde_json::to_string_pretty(&output).context("serialize albums")?;
    println!("{json}");
    Ok(())
}

fn default_config_path() -> Option<PathBuf> {
    std::env::current_exe()
        .ok()
        .and_then(|path| path.parent().map(|dir| dir.join("config.toml")))
}
