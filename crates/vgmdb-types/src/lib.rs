use serde::{Deserialize, Serialize};

/// Data source tag stamped on every album resolved from VGMdb.
pub const VGMDB_SOURCE: &str = "VGMdb";

/// Country code reported for VGMdb releases.
pub const VGMDB_COUNTRY: &str = "JP";

/// One track of a normalized album.
///
/// Disc and position fields are zero-based; `index` is a single one-based
/// counter running across every disc of the album.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct NormalizedTrack {
    /// Title resolved in the preferred language.
    pub title: String,
    /// Track id reported to the tagger (same value as `index`).
    pub track_id: u32,
    /// One-based index across the whole album, disc-major.
    pub index: u32,
    /// Length in seconds (`0.0` when the catalog does not know it).
    pub length: f64,
    /// Zero-based disc number.
    pub medium: u32,
    /// Zero-based position within the disc.
    pub medium_index: u32,
    /// Number of discs in the album.
    pub medium_total: u32,
}

/// Album metadata flattened out of a VGMdb record.
///
/// Date parts are `0` when the catalog has no usable release date.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct NormalizedAlbum {
    /// Album title resolved in the preferred language.
    pub album: String,
    /// VGMdb catalog identifier.
    pub album_id: String,
    /// Primary artist name.
    pub artist: String,
    /// VGMdb artist identifier, when the primary credit links to one.
    pub artist_id: Option<String>,
    /// Tracks in disc-major order.
    pub tracks: Vec<NormalizedTrack>,
    /// Release year.
    pub year: i32,
    /// Release month (1-12).
    pub month: u32,
    /// Release day of month.
    pub day: u32,
    /// Original release year; VGMdb reports one date, so this mirrors `year`.
    pub original_year: i32,
    /// Mirrors `month`.
    pub original_month: u32,
    /// Mirrors `day`.
    pub original_day: u32,
    /// Publisher name resolved in the preferred language.
    pub label: String,
    /// Number of discs.
    pub mediums: u32,
    /// Media format label (for example `CD`).
    pub media: String,
    /// Source tag, always [`VGMDB_SOURCE`] for resolved albums.
    pub data_source: String,
    /// Canonical album page.
    pub data_url: String,
    /// Release country, always [`VGMDB_COUNTRY`].
    pub country: String,
    /// Catalog number printed on the release, e.g. `SSCX-10004`.
    pub catalognum: String,
    /// Various-artists flag. VGMdb albums are never flagged.
    pub va: bool,
}

/// Distance contribution handed to the host matcher.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct DistanceContribution {
    /// Source the penalty is attributed to.
    pub source: String,
    /// Configured weight added to the match distance.
    pub weight: f64,
}
