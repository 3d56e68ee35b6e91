//! Normalization of raw VGMdb album records into [`NormalizedAlbum`].

use vgmdb_types::{NormalizedAlbum, NormalizedTrack, VGMDB_COUNTRY, VGMDB_SOURCE};

use crate::catalog::{ALBUM_LINK_PREFIX_LEN, RawAlbum, RawCredit, RawDisc};
use crate::error::CatalogError;
use crate::lang::LanguagePriority;

/// Length of the `artist/` prefix on artist links.
const ARTIST_LINK_PREFIX_LEN: usize = 7;

const UNKNOWN_LENGTH: &str = "Unknown";

/// Knobs that shape how a record is flattened.
#[derive(Clone, Debug)]
pub struct NormalizeOptions {
    pub languages: LanguagePriority,
    /// Use performer credits for the album artist when the album has any;
    /// otherwise composers are always used.
    pub prefer_performers: bool,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            languages: LanguagePriority::default(),
            prefer_performers: true,
        }
    }
}

/// Convert one raw record into a normalized album.
///
/// Returns `Ok(None)` when the publisher has no name in any priority
/// language: the album is only emitted once its label resolves, and records
/// without such a label are skipped rather than given a fallback label.
pub fn normalize_album(
    raw: &RawAlbum,
    options: &NormalizeOptions,
) -> Result<Option<NormalizedAlbum>, CatalogError> {
    let languages = &options.languages;

    let album = languages.resolve_or(&raw.names, &raw.name).to_string();
    let album_id = raw
        .link
        .get(ALBUM_LINK_PREFIX_LEN..)
        .filter(|id| !id.is_empty())
        .ok_or_else(|| CatalogError::malformed(format!("album link {:?} has no id", raw.link)))?
        .to_string();

    let credits = credit_role(raw, options.prefer_performers);
    let artist = credits
        .iter()
        .find_map(|credit| languages.pick(&credit.names))
        .ok_or_else(|| {
            CatalogError::malformed(format!("album {album_id}: no credit resolves to an artist"))
        })?
        .to_string();
    let artist_id = credits
        .first()
        .and_then(|credit| credit.link.as_deref())
        .and_then(|link| link.get(ARTIST_LINK_PREFIX_LEN..))
        .filter(|id| !id.is_empty())
        .map(str::to_string);

    let tracks = flatten_tracks(&raw.discs, languages)
        .map_err(|err| CatalogError::malformed(format!("album {album_id}: {err}")))?;
    let (year, month, day) = parse_release_date(raw.release_date.as_deref());

    let Some(label) = languages.pick(&raw.publisher.names) else {
        tracing::debug!(
            album_id = %album_id,
            "publisher has no name in a priority language; skipping album"
        );
        return Ok(None);
    };

    Ok(Some(NormalizedAlbum {
        album,
        album_id,
        artist,
        artist_id,
        tracks,
        year,
        month,
        day,
        original_year: year,
        original_month: month,
        original_day: day,
        label: label.to_string(),
        mediums: raw.discs.len() as u32,
        media: raw.media_format.clone(),
        data_source: VGMDB_SOURCE.to_string(),
        data_url: raw.vgmdb_link.clone(),
        country: VGMDB_COUNTRY.to_string(),
        catalognum: raw.catalog.clone(),
        va: false,
    }))
}

fn credit_role(raw: &RawAlbum, prefer_performers: bool) -> &[RawCredit] {
    if prefer_performers && !raw.performers.is_empty() {
        &raw.performers
    } else {
        &raw.composers
    }
}

/// Flatten discs into one track list with a disc-major running index.
fn flatten_tracks(
    discs: &[RawDisc],
    languages: &LanguagePriority,
) -> Result<Vec<NormalizedTrack>, String> {
    let medium_total = discs.len() as u32;
    let mut tracks = Vec::new();
    let mut index = 0u32;
    for (disc_index, disc) in discs.iter().enumerate() {
        for (track_index, track) in disc.tracks.iter().enumerate() {
            index += 1;
            // Some tracks only carry names in languages outside the priority list.
            let Some(first_name) = track.names.first() else {
                return Err(format!("track {index} has no names"));
            };
            let title = languages.resolve_or(&track.names, first_name);
            let length = parse_track_length(&track.track_length)
                .map_err(|err| format!("track {index}: {err}"))?;
            tracks.push(NormalizedTrack {
                title: title.to_string(),
                track_id: index,
                index,
                length,
                medium: disc_index as u32,
                medium_index: track_index as u32,
                medium_total,
            });
        }
    }
    Ok(tracks)
}

/// Parse a `M:SS` track length into seconds. `"Unknown"` is zero.
pub fn parse_track_length(raw: &str) -> Result<f64, String> {
    if raw == UNKNOWN_LENGTH {
        return Ok(0.0);
    }
    let Some((minutes, seconds)) = raw.split_once(':') else {
        return Err(format!("unsupported track length {raw:?}"));
    };
    let minutes = minutes
        .trim()
        .parse::<f64>()
        .map_err(|_| format!("unsupported track length {raw:?}"))?;
    let seconds = seconds
        .trim()
        .parse::<f64>()
        .map_err(|_| format!("unsupported track length {raw:?}"))?;
    Ok(minutes * 60.0 + seconds)
}

/// Split a `YYYY-MM-DD` date into parts; anything missing or unparsable is `0`.
pub fn parse_release_date(raw: Option<&str>) -> (i32, u32, u32) {
    let Some(raw) = raw else {
        return (0, 0, 0);
    };
    let mut parts = raw.split('-').map(str::trim);
    let year = parts.next().and_then(|p| p.parse().ok()).unwrap_or(0);
    let month = parts.next().and_then(|p| p.parse().ok()).unwrap_or(0);
    let day = parts.next().and_then(|p| p.parse().ok()).unwrap_or(0);
    (year, month, day)
}
