//! Source-weight contribution to the host matcher's distance.

use vgmdb_types::{DistanceContribution, VGMDB_SOURCE};

/// Weight contributed for a candidate whose data source is `source`.
///
/// Only VGMdb candidates carry the configured weight; anything else
/// contributes nothing.
pub fn score_distance(source: &str, weight: f64) -> Option<DistanceContribution> {
    (source == VGMDB_SOURCE).then(|| DistanceContribution {
        source: VGMDB_SOURCE.to_string(),
        weight,
    })
}
