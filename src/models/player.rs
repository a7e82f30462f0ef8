//! Player profile and guardian relationship models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{EntityId, PlayerId, TeamId, UserId};

/// A roster player.
///
/// `user_id` is present iff the player has their own login. A profile
/// without one represents a minor/dependent who is viewed on their behalf
/// by linked guardian accounts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerProfile {
    /// Unique identifier (derived from team_id + name)
    pub id: PlayerId,

    /// Team this player belongs to
    pub team_id: TeamId,

    /// Player name
    pub name: String,

    /// Linked user account, if the player has claimed their profile
    pub user_id: Option<UserId>,

    /// When this record was created
    pub created_at: DateTime<Utc>,
}

impl PlayerProfile {
    /// Create a new unlinked PlayerProfile with auto-generated ID.
    pub fn new(team_id: TeamId, name: String) -> Self {
        let id = EntityId::generate(&["player", team_id.as_str(), &name]);
        Self {
            id,
            team_id,
            name,
            user_id: None,
            created_at: Utc::now(),
        }
    }

    /// Builder method to attach a user account.
    pub fn with_user(mut self, user_id: UserId) -> Self {
        self.user_id = Some(user_id);
        self
    }

    /// Whether this player views under their own identity.
    pub fn has_account(&self) -> bool {
        self.user_id.is_some()
    }
}

/// A guardian-to-player edge.
///
/// Many-to-many: a player may have multiple guardians and a guardian may
/// have multiple wards. Only meaningful when the linked player has no
/// `user_id`; links to players with accounts are ignored by the resolver.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuardianLink {
    /// Unique identifier (derived from guardian_user_id + player_id)
    pub id: EntityId,

    /// Guardian's user account
    pub guardian_user_id: UserId,

    /// Player profile being represented
    pub player_id: PlayerId,

    /// When this record was created
    pub created_at: DateTime<Utc>,
}

impl GuardianLink {
    /// Create a new GuardianLink with auto-generated ID.
    pub fn new(guardian_user_id: UserId, player_id: PlayerId) -> Self {
        let id = EntityId::generate(&["guardian", guardian_user_id.as_str(), player_id.as_str()]);
        Self {
            id,
            guardian_user_id,
            player_id,
            created_at: Utc::now(),
        }
    }
}
