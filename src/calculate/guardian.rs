//! Guardian resolution.

use std::collections::{HashMap, HashSet};

use crate::models::{GuardianLink, PlayerId, PlayerProfile, UserId};

/// Map players lacking a direct account to the guardian accounts
/// authorized to view on their behalf.
///
/// Only profiles with no `user_id` appear as keys. A link that references
/// a player with a direct account is ignored even if present: a player
/// with their own login is viewed under their own identity, never through
/// a guardian. Returns an empty map when every profile has an account.
pub fn resolve_guardians(
    profiles: &[PlayerProfile],
    links: &[GuardianLink],
) -> HashMap<PlayerId, HashSet<UserId>> {
    let unlinked: HashSet<&PlayerId> = profiles
        .iter()
        .filter(|p| p.user_id.is_none())
        .map(|p| &p.id)
        .collect();

    if unlinked.is_empty() {
        return HashMap::new();
    }

    let mut guardians: HashMap<PlayerId, HashSet<UserId>> = HashMap::new();
    for link in links {
        if unlinked.contains(&link.player_id) {
            guardians
                .entry(link.player_id.clone())
                .or_default()
                .insert(link.guardian_user_id.clone());
        }
    }

    guardians
}
