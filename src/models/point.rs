//! Coaching point and tagged-player models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{EntityId, GameId, PlayerId, PointId, UserId};

/// A timestamped annotation (audio + optional drawings) on a game video.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoachingPoint {
    /// Unique identifier (derived from game_id + author + timestamp)
    pub id: PointId,

    /// Game video this point is attached to
    pub game_id: GameId,

    /// Coach account that authored the point
    pub author_id: UserId,

    /// Short title (e.g., "Defensive shape on the counter")
    pub title: String,

    /// Position in the game video, milliseconds
    pub timestamp_ms: u64,

    /// Length of the recorded commentary, milliseconds
    pub duration_ms: u64,

    /// When this record was created
    pub created_at: DateTime<Utc>,
}

impl CoachingPoint {
    /// Create a new CoachingPoint with auto-generated ID.
    pub fn new(game_id: GameId, author_id: UserId, title: String, timestamp_ms: u64) -> Self {
        let id = EntityId::generate(&[
            "point",
            game_id.as_str(),
            author_id.as_str(),
            &timestamp_ms.to_string(),
        ]);
        Self {
            id,
            game_id,
            author_id,
            title,
            timestamp_ms,
            duration_ms: 0,
            created_at: Utc::now(),
        }
    }

    /// Builder method to set commentary duration.
    pub fn with_duration(mut self, duration_ms: u64) -> Self {
        self.duration_ms = duration_ms;
        self
    }
}

/// Marks a player as required audience for a coaching point.
///
/// The set of tagged players is the denominator for tagged-specific
/// engagement metrics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaggedPlayer {
    /// Unique identifier (derived from point_id + player_id)
    pub id: EntityId,

    /// The coaching point
    pub point_id: PointId,

    /// The required audience member
    pub player_id: PlayerId,

    /// When this record was created
    pub created_at: DateTime<Utc>,
}

impl TaggedPlayer {
    /// Create a new TaggedPlayer with auto-generated ID.
    pub fn new(point_id: PointId, player_id: PlayerId) -> Self {
        let id = EntityId::generate(&["tag", point_id.as_str(), player_id.as_str()]);
        Self {
            id,
            point_id,
            player_id,
            created_at: Utc::now(),
        }
    }
}
