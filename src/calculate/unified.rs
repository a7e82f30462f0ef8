//! Unified view collection.
//!
//! Raw `ViewEvent` rows are keyed by the account that watched; reports
//! need them keyed by the player they represent. This module attributes
//! each in-scope event either directly (the player's own account) or
//! through a guardian (for players without accounts), and drops events
//! that match neither: a coach previewing their own point counts toward
//! nobody's engagement.

use std::collections::HashSet;

use chrono::{DateTime, Utc};

use crate::models::{
    GuardianLink, PlayerId, PlayerProfile, PointId, UnifiedView, ViewEvent, ViewSource,
};

use super::resolve_guardians;

/// Filter for view collection. All fields are optional and AND-combined.
///
/// Report assemblers resolve their scope (team, game, coach, single point,
/// single player) into explicit id sets once at the boundary; the engine
/// never sees a team or coach directly. A `None` field means "no
/// restriction". Date bounds are inclusive at both ends.
#[derive(Debug, Clone, Default)]
pub struct ViewsQuery {
    /// Restrict to these coaching points (resolved from point/game/coach
    /// filters upstream).
    pub point_ids: Option<HashSet<PointId>>,

    /// Restrict to these players (resolved from team/player filters
    /// upstream).
    pub player_ids: Option<HashSet<PlayerId>>,

    /// Earliest `created_at` to include.
    pub start: Option<DateTime<Utc>>,

    /// Latest `created_at` to include.
    pub end: Option<DateTime<Utc>>,
}

impl ViewsQuery {
    fn matches_event(&self, event: &ViewEvent) -> bool {
        if let Some(ref points) = self.point_ids {
            if !points.contains(&event.point_id) {
                return false;
            }
        }
        if let Some(start) = self.start {
            if event.created_at < start {
                return false;
            }
        }
        if let Some(end) = self.end {
            if event.created_at > end {
                return false;
            }
        }
        true
    }

    fn includes_player(&self, player_id: &PlayerId) -> bool {
        match self.player_ids {
            Some(ref players) => players.contains(player_id),
            None => true,
        }
    }
}

/// Merge raw view events into a canonical player-attributed list.
///
/// For players with a linked account, events from that account attribute
/// directly. For players without one, events from any registered guardian
/// attribute as guardian views with `guardian_id` set to the acting
/// account. Events from accounts that are neither are excluded entirely.
///
/// Output is sorted by `(player_id, point_id, created_at)`; callers that
/// need a different order (e.g. most-recent-first) re-sort explicitly.
pub fn collect_unified_views(
    events: &[ViewEvent],
    profiles: &[PlayerProfile],
    links: &[GuardianLink],
    query: &ViewsQuery,
) -> Vec<UnifiedView> {
    let in_scope: Vec<&ViewEvent> = events.iter().filter(|e| query.matches_event(e)).collect();

    // Zero surviving events: skip the guardian/player work entirely.
    if in_scope.is_empty() {
        return Vec::new();
    }

    let population: Vec<&PlayerProfile> = profiles
        .iter()
        .filter(|p| query.includes_player(&p.id))
        .collect();

    let guardians = resolve_guardians(profiles, links);

    let mut unified = Vec::new();
    for player in &population {
        match player.user_id {
            Some(ref own_account) => {
                for event in in_scope.iter().filter(|e| e.user_id == *own_account) {
                    unified.push(UnifiedView {
                        player_id: player.id.clone(),
                        point_id: event.point_id.clone(),
                        completion_percentage: event.effective_completion(),
                        created_at: event.created_at,
                        source: ViewSource::Direct,
                        guardian_id: None,
                    });
                }
            }
            None => {
                let Some(player_guardians) = guardians.get(&player.id) else {
                    continue;
                };
                for event in in_scope.iter().filter(|e| player_guardians.contains(&e.user_id)) {
                    unified.push(UnifiedView {
                        player_id: player.id.clone(),
                        point_id: event.point_id.clone(),
                        completion_percentage: event.effective_completion(),
                        created_at: event.created_at,
                        source: ViewSource::Guardian,
                        guardian_id: Some(event.user_id.clone()),
                    });
                }
            }
        }
    }

    unified.sort_by(|a, b| {
        a.player_id
            .cmp(&b.player_id)
            .then_with(|| a.point_id.cmp(&b.point_id))
            .then_with(|| a.created_at.cmp(&b.created_at))
    });

    unified
}
