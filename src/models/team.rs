//! Team and game models.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::{EntityId, GameId, TeamId};

/// A team roster container. Each team owns one JSONL partition on disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Team {
    /// Unique identifier (derived from name + sport)
    pub id: TeamId,

    /// Team name (e.g., "U14 Thunder")
    pub name: String,

    /// Sport label (e.g., "soccer", "hockey")
    pub sport: String,

    /// When this record was created
    pub created_at: DateTime<Utc>,
}

impl Team {
    /// Create a new Team with auto-generated ID.
    pub fn new(name: String, sport: String) -> Self {
        let id = EntityId::generate(&["team", &name, &sport]);
        Self {
            id,
            name,
            sport,
            created_at: Utc::now(),
        }
    }
}

/// A recorded game with video attached.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Game {
    /// Unique identifier (derived from team_id + opponent + date)
    pub id: GameId,

    /// Team this game belongs to
    pub team_id: TeamId,

    /// Opposing team name
    pub opponent: String,

    /// Game date
    pub date: NaiveDate,

    /// When this record was created
    pub created_at: DateTime<Utc>,
}

impl Game {
    /// Create a new Game with auto-generated ID.
    pub fn new(team_id: TeamId, opponent: String, date: NaiveDate) -> Self {
        let id = EntityId::generate(&["game", team_id.as_str(), &opponent, &date.to_string()]);
        Self {
            id,
            team_id,
            opponent,
            date,
            created_at: Utc::now(),
        }
    }
}
