//! Report route handlers.
//!
//! Each handler is a thin assembler: validate the query once, fetch and
//! dedup rows for the teams in scope, resolve the scope into a
//! `ViewsQuery`, and hand everything to the pure `calculate` engine.

pub mod engagement;
pub mod reports;

use std::collections::HashSet;

use chrono::{DateTime, NaiveDate, Utc};

use crate::api::{dedup_by_id, ApiError};
use crate::calculate::{score_player, PlayerEngagement, ScoreWeights};
use crate::models::{
    Acknowledgment, CoachingPoint, Game, GuardianLink, PlayerProfile, PointId, TaggedPlayer,
    ViewEvent,
};
use crate::storage::{self, EntityType, JsonlReader, StorageConfig};

/// One team's full row set, deduplicated by id.
pub(crate) struct TeamData {
    pub team_id: String,
    pub players: Vec<PlayerProfile>,
    pub links: Vec<GuardianLink>,
    pub games: Vec<Game>,
    pub points: Vec<CoachingPoint>,
    pub views: Vec<ViewEvent>,
    pub acks: Vec<Acknowledgment>,
    pub tags: Vec<TaggedPlayer>,
}

/// Load every entity file in a team partition.
///
/// Any read failure propagates and aborts the report; a missing file
/// reads as empty, so a sparse partition is not an error.
pub(crate) fn load_team_data(
    storage: &StorageConfig,
    team_id: &str,
) -> Result<TeamData, ApiError> {
    let players = JsonlReader::<PlayerProfile>::for_entity(storage, EntityType::Player, team_id)
        .read_all()?;
    let links =
        JsonlReader::<GuardianLink>::for_entity(storage, EntityType::GuardianLink, team_id)
            .read_all()?;
    let games = JsonlReader::<Game>::for_entity(storage, EntityType::Game, team_id).read_all()?;
    let points =
        JsonlReader::<CoachingPoint>::for_entity(storage, EntityType::Point, team_id).read_all()?;
    let views = JsonlReader::<ViewEvent>::for_entity(storage, EntityType::View, team_id)
        .read_all()?;
    let acks =
        JsonlReader::<Acknowledgment>::for_entity(storage, EntityType::Acknowledgment, team_id)
            .read_all()?;
    let tags =
        JsonlReader::<TaggedPlayer>::for_entity(storage, EntityType::TaggedPlayer, team_id)
            .read_all()?;

    Ok(TeamData {
        team_id: team_id.to_string(),
        players: dedup_by_id(players, |p| p.id.as_str()),
        links: dedup_by_id(links, |l| l.id.as_str()),
        games: dedup_by_id(games, |g| g.id.as_str()),
        points: dedup_by_id(points, |p| p.id.as_str()),
        views: dedup_by_id(views, |v| v.id.as_str()),
        // Acknowledgments are logically upserted: last row per id wins.
        acks: dedup_by_id(acks, |a| a.id.as_str()),
        tags: dedup_by_id(tags, |t| t.id.as_str()),
    })
}

/// Load all team partitions found on disk.
pub(crate) fn load_all_teams(storage: &StorageConfig) -> Result<Vec<TeamData>, ApiError> {
    let mut teams = Vec::new();
    for team_id in storage::list_team_dirs(storage)? {
        teams.push(load_team_data(storage, &team_id)?);
    }
    Ok(teams)
}

/// Inclusive reporting window resolved from `start`/`end` date params.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct ReportWindow {
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}

impl ReportWindow {
    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        if let Some(start) = self.start {
            if at < start {
                return false;
            }
        }
        if let Some(end) = self.end {
            if at > end {
                return false;
            }
        }
        true
    }
}

/// Parse optional `YYYY-MM-DD` date params into an inclusive UTC window:
/// start-of-day for `start`, end-of-day for `end`.
pub(crate) fn parse_window(
    start: Option<&str>,
    end: Option<&str>,
) -> Result<ReportWindow, ApiError> {
    let parse = |s: &str| {
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map_err(|_| ApiError::BadRequest(format!("Invalid date (expected YYYY-MM-DD): {}", s)))
    };

    let start = match start {
        Some(s) => Some(parse(s)?.and_hms_opt(0, 0, 0).unwrap().and_utc()),
        None => None,
    };
    let end = match end {
        Some(s) => Some(parse(s)?.and_hms_milli_opt(23, 59, 59, 999).unwrap().and_utc()),
        None => None,
    };

    Ok(ReportWindow { start, end })
}

/// Compute engagement rows for every player on a team over a point scope.
///
/// `acked_count` for each player is the number of in-scope points they
/// acknowledged inside the window; the same count feeds both the overall
/// and tagged rates downstream.
pub(crate) fn team_engagement(
    data: &TeamData,
    point_ids: &[PointId],
    max_map: &std::collections::HashMap<(PointId, crate::models::PlayerId), f64>,
    weights: ScoreWeights,
    window: ReportWindow,
) -> Vec<(PlayerProfile, PlayerEngagement)> {
    let scope: HashSet<&PointId> = point_ids.iter().collect();

    data.players
        .iter()
        .map(|player| {
            let tagged: Vec<PointId> = data
                .tags
                .iter()
                .filter(|t| t.player_id == player.id && scope.contains(&t.point_id))
                .map(|t| t.point_id.clone())
                .collect();

            let acked = data
                .acks
                .iter()
                .filter(|a| {
                    a.acknowledged
                        && a.player_id == player.id
                        && scope.contains(&a.point_id)
                        && a.ack_at.is_some_and(|at| window.contains(at))
                })
                .count() as u32;

            let engagement =
                score_player(weights, &player.id, point_ids, &tagged, acked, max_map);
            (player.clone(), engagement)
        })
        .collect()
}

/// Round to one decimal place (overview-level aggregates).
pub(crate) fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}
