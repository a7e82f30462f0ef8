//! Acknowledgment model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{AckId, EntityId, PlayerId, PointId};

/// A player's acknowledgment of a coaching point.
///
/// Logically one row per `(point_id, player_id)`, upserted rather than
/// appended. The JSONL store is append-only, so readers deduplicate by id
/// and the last physical row wins.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Acknowledgment {
    /// Unique identifier (derived from point_id + player_id)
    pub id: AckId,

    /// The coaching point being acknowledged
    pub point_id: PointId,

    /// The acknowledging player
    pub player_id: PlayerId,

    /// Whether the player has confirmed they reviewed the point
    pub acknowledged: bool,

    /// When the acknowledgment was made
    pub ack_at: Option<DateTime<Utc>>,

    /// Optional player notes
    pub notes: Option<String>,
}

impl Acknowledgment {
    /// Create a new unacknowledged record with auto-generated ID.
    pub fn new(point_id: PointId, player_id: PlayerId) -> Self {
        let id = EntityId::generate(&["ack", point_id.as_str(), player_id.as_str()]);
        Self {
            id,
            point_id,
            player_id,
            acknowledged: false,
            ack_at: None,
            notes: None,
        }
    }

    /// Builder method to mark the point acknowledged.
    pub fn acknowledged_at(mut self, at: DateTime<Utc>) -> Self {
        self.acknowledged = true;
        self.ack_at = Some(at);
        self
    }

    /// Builder method to attach notes.
    pub fn with_notes(mut self, notes: String) -> Self {
        self.notes = Some(notes);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_ack_id_deterministic() {
        let a1 = Acknowledgment::new(EntityId::from("point-1"), EntityId::from("player-1"));
        let a2 = Acknowledgment::new(EntityId::from("point-1"), EntityId::from("player-1"));
        // Same (point, player) always maps to the same id, which is what
        // makes read-time dedup behave like an upsert.
        assert_eq!(a1.id, a2.id);
    }

    #[test]
    fn test_ack_builder() {
        let at = Utc.with_ymd_and_hms(2024, 2, 1, 18, 30, 0).unwrap();
        let ack = Acknowledgment::new(EntityId::from("point-1"), EntityId::from("player-1"))
            .acknowledged_at(at)
            .with_notes("Got it, will work on positioning".to_string());
        assert!(ack.acknowledged);
        assert_eq!(ack.ack_at, Some(at));
        assert!(ack.notes.is_some());
    }

    #[test]
    fn test_ack_default_unacknowledged() {
        let ack = Acknowledgment::new(EntityId::from("point-1"), EntityId::from("player-1"));
        assert!(!ack.acknowledged);
        assert!(ack.ack_at.is_none());
    }

    #[test]
    fn test_ack_serialization() {
        let ack = Acknowledgment::new(EntityId::from("point-1"), EntityId::from("player-1"));
        let json = serde_json::to_string(&ack).unwrap();
        let parsed: Acknowledgment = serde_json::from_str(&json).unwrap();
        assert_eq!(ack.id, parsed.id);
        assert!(!parsed.acknowledged);
    }
}
