//! Max-completion reconciliation and matrix averaging.
//!
//! A player may view the same point many times; only the best attempt
//! counts. Averages are computed over the *full* points × players
//! cross-product with unviewed pairs contributing 0. Averaging only
//! observed views would silently inflate completion rates by excluding
//! players who never watched.

use std::collections::HashMap;
use std::hash::Hash;

use serde::Serialize;

use crate::models::{PlayerId, PointId, UnifiedView};

/// Reduce views to one maximum completion value per key.
///
/// Generic over the key so every call site shares one reducer: reports
/// key by `(point_id, player_id)` via [`point_player_key`], per-point
/// groupings key by point alone. Missing completion already reads as 0 in
/// `UnifiedView`, so a record is never skipped. Feeding the same view
/// twice cannot change the result (running max is idempotent).
pub fn max_completion_map<K, F>(views: &[UnifiedView], key_fn: F) -> HashMap<K, f64>
where
    K: Eq + Hash,
    F: Fn(&UnifiedView) -> K,
{
    let mut max_map: HashMap<K, f64> = HashMap::new();
    for view in views {
        let entry = max_map.entry(key_fn(view)).or_insert(0.0);
        if view.completion_percentage > *entry {
            *entry = view.completion_percentage;
        }
    }
    max_map
}

/// The canonical reconciliation key: one entry per (point, player) pair.
pub fn point_player_key(view: &UnifiedView) -> (PointId, PlayerId) {
    (view.point_id.clone(), view.player_id.clone())
}

/// Average completion over the full `point_ids` × `player_ids` matrix.
///
/// Every pair absent from `max_map` counts as 0, and the divisor is
/// always `points × players`, never the number of observed entries.
/// Rounded to 1 decimal (overview-level call sites).
pub fn average_completion(
    max_map: &HashMap<(PointId, PlayerId), f64>,
    point_ids: &[PointId],
    player_ids: &[PlayerId],
) -> f64 {
    let cells = point_ids.len() * player_ids.len();
    if cells == 0 {
        return 0.0;
    }

    let mut sum = 0.0;
    for point_id in point_ids {
        for player_id in player_ids {
            sum += max_map
                .get(&(point_id.clone(), player_id.clone()))
                .copied()
                .unwrap_or(0.0);
        }
    }

    let avg = sum / cells as f64;
    (avg * 10.0).round() / 10.0
}

/// Completion aggregate for a single coaching point.
#[derive(Debug, Clone, Serialize)]
pub struct PointCompletion {
    pub point_id: PointId,
    /// Average max completion across the point's player set, whole number.
    pub avg_completion: f64,
    /// Players with at least one view of this point.
    pub viewers: u32,
}

/// Per-point variant of the matrix average.
///
/// Groups the max map by point and averages within each point's player
/// set, unviewed players contributing 0. Rounded to a whole number; the
/// per-point call sites round coarser than the overview ones on purpose.
/// Output order follows `point_ids`.
pub fn per_point_averages(
    max_map: &HashMap<(PointId, PlayerId), f64>,
    point_ids: &[PointId],
    player_ids: &[PlayerId],
) -> Vec<PointCompletion> {
    point_ids
        .iter()
        .map(|point_id| {
            let mut sum = 0.0;
            let mut viewers = 0u32;
            for player_id in player_ids {
                if let Some(v) = max_map.get(&(point_id.clone(), player_id.clone())) {
                    sum += v;
                    viewers += 1;
                }
            }
            let avg = if player_ids.is_empty() {
                0.0
            } else {
                (sum / player_ids.len() as f64).round()
            };
            PointCompletion {
                point_id: point_id.clone(),
                avg_completion: avg,
                viewers,
            }
        })
        .collect()
}
