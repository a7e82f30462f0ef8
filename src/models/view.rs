//! View event models.
//!
//! `ViewEvent` is the raw, source-of-truth record: one row per playback
//! attempt, keyed by the *account* that watched. `UnifiedView` is the
//! derived record after attributing each event to the player it represents
//! (directly, or through a guardian for players without accounts).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{EntityId, PlayerId, PointId, UserId, ViewId};

/// One raw video-playback view attempt.
///
/// Multiple events may exist per `(point_id, user_id)`: each attempt is a
/// separate row; only the maximum completion across attempts is meaningful
/// for reporting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewEvent {
    /// Unique identifier (derived from point_id + user_id + timestamp)
    pub id: ViewId,

    /// Coaching point that was watched
    pub point_id: PointId,

    /// Account that watched, either the player or a guardian
    pub user_id: UserId,

    /// Fraction of the commentary played through, 0-100.
    /// Historical rows may carry no value; `None` means 0.
    pub completion_percentage: Option<f64>,

    /// When the playback attempt happened
    pub created_at: DateTime<Utc>,
}

impl ViewEvent {
    /// Create a new ViewEvent with auto-generated ID.
    pub fn new(
        point_id: PointId,
        user_id: UserId,
        completion_percentage: Option<f64>,
        created_at: DateTime<Utc>,
    ) -> Self {
        let id = EntityId::generate(&[
            "view",
            point_id.as_str(),
            user_id.as_str(),
            &created_at.timestamp_millis().to_string(),
        ]);
        Self {
            id,
            point_id,
            user_id,
            completion_percentage,
            created_at,
        }
    }

    /// Completion as a plain number: `None` and non-finite values coerce
    /// to 0, values are clamped to the 0-100 range.
    pub fn effective_completion(&self) -> f64 {
        match self.completion_percentage {
            Some(v) if v.is_finite() => v.clamp(0.0, 100.0),
            _ => 0.0,
        }
    }
}

/// How a view was attributed to a player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewSource {
    /// The player's own linked account watched.
    Direct,
    /// A guardian account watched on the player's behalf.
    Guardian,
}

/// A view event attributed to the player it represents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnifiedView {
    /// Player the view counts for
    pub player_id: PlayerId,

    /// Coaching point that was watched
    pub point_id: PointId,

    /// Completion percentage, already coerced to a finite 0-100 value
    pub completion_percentage: f64,

    /// When the playback attempt happened
    pub created_at: DateTime<Utc>,

    /// Whether the player or a guardian watched
    pub source: ViewSource,

    /// The acting guardian account, set iff `source` is `Guardian`
    pub guardian_id: Option<UserId>,
}
