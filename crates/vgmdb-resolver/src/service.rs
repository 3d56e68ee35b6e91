//! Candidate search and album lookup against VGMdb.

use vgmdb_types::{DistanceContribution, NormalizedAlbum, NormalizedTrack, VGMDB_SOURCE};

use crate::catalog::{CatalogClient, JsonFetch, UreqFetch};
use crate::config::ResolverSettings;
use crate::distance::score_distance;
use crate::error::CatalogError;
use crate::query;
use crate::record::normalize_album;

/// Maximum number of search hits expanded into full album lookups.
pub const MAX_CANDIDATES: usize = 5;

/// Stateless resolver: immutable settings plus a catalog client.
pub struct Resolver<F = UreqFetch> {
    settings: ResolverSettings,
    client: CatalogClient<F>,
}

impl Resolver<UreqFetch> {
    /// Resolver talking to the configured catalog over HTTP.
    pub fn from_settings(settings: ResolverSettings) -> Self {
        let fetch = UreqFetch::new(&settings.user_agent);
        Self::new(settings, fetch)
    }
}

impl<F: JsonFetch> Resolver<F> {
    pub fn new(settings: ResolverSettings, fetch: F) -> Self {
        let client = CatalogClient::new(&settings.base_url, fetch);
        Self { settings, client }
    }

    pub fn settings(&self) -> &ResolverSettings {
        &self.settings
    }

    pub fn client(&self) -> &CatalogClient<F> {
        &self.client
    }

    /// Search VGMdb and return up to [`MAX_CANDIDATES`] normalized albums.
    ///
    /// Search order is kept. Records that are missing, skipped or malformed
    /// are dropped individually; a failed search yields an empty list.
    pub fn find_candidates(
        &self,
        artist: &str,
        album: &str,
        va_likely: bool,
    ) -> Vec<NormalizedAlbum> {
        let raw_query = if va_likely {
            album.to_string()
        } else {
            format!("{artist} {album}")
        };
        let query = query::normalize(&raw_query);
        tracing::debug!(query = %query, va_likely, "vgmdb candidate search");

        let hits = match self.client.search_albums(&query) {
            Ok(hits) => hits,
            Err(err) => {
                tracing::warn!(error = %err, query = %query, "vgmdb search failed");
                return Vec::new();
            }
        };

        let mut albums = Vec::new();
        for hit in hits.iter().take(MAX_CANDIDATES) {
            let Some(album_id) = hit.album_id() else {
                tracing::warn!(
                    link = %hit.link,
                    catalog = ?hit.catalog,
                    "vgmdb search hit without album id"
                );
                continue;
            };
            tracing::debug!(album_id = %album_id, catalog = ?hit.catalog, "vgmdb search hit");
            match self.fetch_by_id(album_id) {
                Ok(Some(album)) => albums.push(album),
                Ok(None) => {}
                Err(err) => {
                    tracing::warn!(error = %err, album_id = %album_id, "dropping vgmdb candidate");
                }
            }
        }
        tracing::debug!(
            query = %query,
            hits = hits.len(),
            count = albums.len(),
            "vgmdb candidates resolved"
        );
        albums
    }

    /// Fetch and normalize one album by VGMdb id.
    ///
    /// `Ok(None)` covers a missing album, a catalog that could not be reached
    /// or decoded, and records skipped during normalization. A record the
    /// catalog served but that could not be interpreted is returned as
    /// [`CatalogError::MalformedRecord`].
    pub fn fetch_by_id(&self, album_id: &str) -> Result<Option<NormalizedAlbum>, CatalogError> {
        tracing::debug!(album_id = %album_id, "querying vgmdb for release");
        let raw = match self.client.fetch_album(album_id) {
            Ok(raw) => raw,
            Err(err) if err.is_unavailable() => {
                tracing::debug!(error = %err, album_id = %album_id, "vgmdb album unavailable");
                return Ok(None);
            }
            Err(err) => return Err(err),
        };
        normalize_album(&raw, &self.settings.normalize)
    }

    /// Distance contribution for an album candidate.
    pub fn album_distance(&self, album: &NormalizedAlbum) -> Option<DistanceContribution> {
        score_distance(&album.data_source, self.settings.source_weight)
    }

    /// Distance contribution for a track candidate taken from a VGMdb album.
    pub fn track_distance(&self, _track: &NormalizedTrack) -> Option<DistanceContribution> {
        score_distance(VGMDB_SOURCE, self.settings.source_weight)
    }
}
