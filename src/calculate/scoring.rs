//! Composite engagement scoring.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::models::{PlayerId, PointId};

/// Weights for the composite engagement score.
///
/// 60% acknowledgment, 40% completion is a product decision, not a derived
/// value. It lives here (and in the config file) so no call site ever
/// re-declares the literals.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ScoreWeights {
    pub ack: f64,
    pub completion: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            ack: 0.6,
            completion: 0.4,
        }
    }
}

/// Weighted composite of acknowledgment rate and completion rate.
/// Inputs and output are in [0, 1].
pub fn engagement_score(weights: ScoreWeights, ack_rate: f64, completion_rate: f64) -> f64 {
    weights.ack * ack_rate + weights.completion * completion_rate
}

/// Per-player engagement metrics across a point scope.
#[derive(Debug, Clone, Serialize)]
pub struct PlayerEngagement {
    pub player_id: PlayerId,
    /// Acknowledged points / all points in scope.
    pub ack_rate: f64,
    /// Mean max-completion across ALL scope points (unviewed = 0), 0-1.
    pub completion_rate: f64,
    /// Composite of the two rates above.
    pub score: f64,
    /// Acknowledged points / points the player is tagged on.
    pub tagged_ack_rate: f64,
    /// Completion rate restricted to the tagged point set.
    pub tagged_completion_rate: f64,
    /// Composite over the tagged-only rates.
    pub tagged_score: f64,
}

/// Compute a player's engagement over a point scope.
///
/// `acked_count` is the player's acknowledged-point count, already scoped
/// upstream to acknowledgable points in the reporting window; the same
/// numerator feeds both `ack_rate` and `tagged_ack_rate`. Completion rates
/// use matrix completion: every scope point contributes, 0 when unviewed.
pub fn score_player(
    weights: ScoreWeights,
    player_id: &PlayerId,
    point_ids: &[PointId],
    tagged_point_ids: &[PointId],
    acked_count: u32,
    max_map: &HashMap<(PointId, PlayerId), f64>,
) -> PlayerEngagement {
    let completion_sum = |points: &[PointId]| -> f64 {
        points
            .iter()
            .map(|point_id| {
                max_map
                    .get(&(point_id.clone(), player_id.clone()))
                    .copied()
                    .unwrap_or(0.0)
            })
            .sum()
    };

    let ack_rate = if point_ids.is_empty() {
        0.0
    } else {
        acked_count as f64 / point_ids.len() as f64
    };
    let completion_rate = if point_ids.is_empty() {
        0.0
    } else {
        completion_sum(point_ids) / point_ids.len() as f64 / 100.0
    };

    let tagged_ack_rate = if tagged_point_ids.is_empty() {
        0.0
    } else {
        acked_count as f64 / tagged_point_ids.len() as f64
    };
    let tagged_completion_rate = if tagged_point_ids.is_empty() {
        0.0
    } else {
        completion_sum(tagged_point_ids) / tagged_point_ids.len() as f64 / 100.0
    };

    PlayerEngagement {
        player_id: player_id.clone(),
        ack_rate,
        completion_rate,
        score: engagement_score(weights, ack_rate, completion_rate),
        tagged_ack_rate,
        tagged_completion_rate,
        tagged_score: engagement_score(weights, tagged_ack_rate, tagged_completion_rate),
    }
}

/// Sort engagement rows by score, best first.
///
/// Equal scores keep their incoming order; no product-confirmed tiebreak
/// exists, so callers must not rely on the relative order of ties.
pub fn rank_by_score(mut rows: Vec<PlayerEngagement>) -> Vec<PlayerEngagement> {
    rows.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
    rows
}
