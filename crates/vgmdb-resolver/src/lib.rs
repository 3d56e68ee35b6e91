//! VGMdb album resolution for taggers.
//!
//! Turns a fuzzy artist/album query or a catalog id into [`NormalizedAlbum`]s:
//! the query is cleaned, searched, the top hits are fetched and every record
//! is flattened with names picked by language priority.
//!
//! [`NormalizedAlbum`]: vgmdb_types::NormalizedAlbum

pub mod catalog;
pub mod cli;
pub mod config;
pub mod distance;
pub mod error;
pub mod lang;
pub mod query;
pub mod record;
pub mod service;

pub use catalog::{CatalogClient, JsonFetch, UreqFetch};
pub use config::{ResolverConfig, ResolverSettings};
pub use error::CatalogError;
pub use lang::{LanguagePriority, LocalizedNames};
pub use service::Resolver;
pub use vgmdb_types::{DistanceContribution, NormalizedAlbum, NormalizedTrack};
