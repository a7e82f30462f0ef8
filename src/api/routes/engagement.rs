use std::collections::HashSet;

use axum::extract::{Query, State};
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::api::state::AppState;
use crate::api::ApiError;
use crate::calculate::{
    collect_unified_views, max_completion_map, per_point_averages, point_player_key, score_player,
    view_heatmap, HeatmapCell, PlayerEngagement, ViewsQuery,
};
use crate::models::{PlayerProfile, PointId, UnifiedView, ViewSource};

use super::{load_all_teams, parse_window, round1, TeamData};

const RECENT_VIEW_LIMIT: usize = 10;

// ── Player Report Endpoint ──────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct PlayerReportParams {
    pub player_id: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
}

/// One attributed view in the recent-activity list.
#[derive(Debug, Serialize)]
pub struct RecentView {
    pub point_id: String,
    pub title: String,
    pub completion_percentage: f64,
    pub source: ViewSource,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct PlayerReportResponse {
    pub player_id: String,
    pub name: String,
    pub team_id: String,
    pub has_account: bool,
    pub total_views: u32,
    pub direct_views: u32,
    pub guardian_views: u32,
    pub engagement: PlayerEngagement,
    pub heatmap: Vec<HeatmapCell>,
    pub recent_views: Vec<RecentView>,
}

/// Engagement detail for one player across every point on their team.
pub async fn player_report(
    State(state): State<AppState>,
    Query(params): Query<PlayerReportParams>,
) -> Result<Json<PlayerReportResponse>, ApiError> {
    let player_id = params
        .player_id
        .as_deref()
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ApiError::BadRequest("player_id is required".to_string()))?;
    let window = parse_window(params.start.as_deref(), params.end.as_deref())?;

    let teams = load_all_teams(&state.storage)?;
    let (data, player) = find_player(&teams, player_id)
        .ok_or_else(|| ApiError::NotFound(format!("player {}", player_id)))?;

    let point_ids: Vec<PointId> = data.points.iter().map(|p| p.id.clone()).collect();
    let query = ViewsQuery {
        point_ids: Some(point_ids.iter().cloned().collect()),
        player_ids: Some(std::iter::once(player.id.clone()).collect()),
        start: window.start,
        end: window.end,
    };
    let views = collect_unified_views(&data.views, &data.players, &data.links, &query);
    let max_map = max_completion_map(&views, point_player_key);

    let tagged: Vec<PointId> = data
        .tags
        .iter()
        .filter(|t| t.player_id == player.id)
        .map(|t| t.point_id.clone())
        .collect();
    let acked = data
        .acks
        .iter()
        .filter(|a| {
            a.acknowledged
                && a.player_id == player.id
                && a.ack_at.is_some_and(|at| window.contains(at))
        })
        .count() as u32;
    let engagement = score_player(
        state.weights,
        &player.id,
        &point_ids,
        &tagged,
        acked,
        &max_map,
    );

    tracing::info!(player_id, views = views.len(), "assembled player report");

    let direct_views = views
        .iter()
        .filter(|v| v.source == ViewSource::Direct)
        .count() as u32;

    Ok(Json(PlayerReportResponse {
        player_id: player.id.as_str().to_string(),
        name: player.name.clone(),
        team_id: data.team_id.clone(),
        has_account: player.has_account(),
        total_views: views.len() as u32,
        direct_views,
        guardian_views: views.len() as u32 - direct_views,
        engagement,
        heatmap: view_heatmap(&views),
        recent_views: recent_views(&views, data),
    }))
}

fn find_player<'a>(
    teams: &'a [TeamData],
    player_id: &str,
) -> Option<(&'a TeamData, &'a PlayerProfile)> {
    teams.iter().find_map(|t| {
        t.players
            .iter()
            .find(|p| p.id.as_str() == player_id)
            .map(|p| (t, p))
    })
}

/// Most-recent-first slice of a player's views, joined to point titles.
/// Collection order is (player, point, time), so re-sort explicitly.
fn recent_views(views: &[UnifiedView], data: &TeamData) -> Vec<RecentView> {
    let mut ordered: Vec<&UnifiedView> = views.iter().collect();
    ordered.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    ordered
        .into_iter()
        .take(RECENT_VIEW_LIMIT)
        .map(|v| {
            let title = data
                .points
                .iter()
                .find(|p| p.id == v.point_id)
                .map(|p| p.title.clone())
                .unwrap_or_default();
            RecentView {
                point_id: v.point_id.as_str().to_string(),
                title,
                completion_percentage: v.completion_percentage,
                source: v.source,
                created_at: v.created_at,
            }
        })
        .collect()
}

// ── Point Report Endpoint ───────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct PointReportParams {
    pub point_id: Option<String>,
}

/// One audience member's standing against a single point.
#[derive(Debug, Serialize)]
pub struct AudienceRow {
    pub player_id: String,
    pub name: String,
    pub has_account: bool,
    pub viewed: bool,
    /// Best completion across the player's views of this point, 0 if none.
    pub max_completion: f64,
    pub acknowledged: bool,
    pub ack_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize)]
pub struct PointReportResponse {
    pub point_id: String,
    pub game_id: String,
    pub team_id: String,
    pub title: String,
    pub timestamp_ms: u64,
    pub total_views: u32,
    pub unique_viewers: u32,
    /// Average max-completion over the audience, whole number.
    pub avg_completion: f64,
    pub ack_rate_pct: f64,
    pub audience: Vec<AudienceRow>,
}

/// Per-player breakdown for a single coaching point.
///
/// The audience is the tagged players when tags exist, otherwise the full
/// roster; either way every member contributes to the average, viewed or
/// not.
pub async fn point_report(
    State(state): State<AppState>,
    Query(params): Query<PointReportParams>,
) -> Result<Json<PointReportResponse>, ApiError> {
    let point_id = params
        .point_id
        .as_deref()
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ApiError::BadRequest("point_id is required".to_string()))?;

    let teams = load_all_teams(&state.storage)?;
    let (data, point) = teams
        .iter()
        .find_map(|t| {
            t.points
                .iter()
                .find(|p| p.id.as_str() == point_id)
                .map(|p| (t, p))
        })
        .ok_or_else(|| ApiError::NotFound(format!("point {}", point_id)))?;

    let query = ViewsQuery {
        point_ids: Some(std::iter::once(point.id.clone()).collect()),
        ..ViewsQuery::default()
    };
    let views = collect_unified_views(&data.views, &data.players, &data.links, &query);
    let max_map = max_completion_map(&views, point_player_key);

    tracing::info!(point_id, views = views.len(), "assembled point report");

    let tagged_ids: HashSet<_> = data
        .tags
        .iter()
        .filter(|t| t.point_id == point.id)
        .map(|t| t.player_id.clone())
        .collect();
    let audience_players: Vec<&PlayerProfile> = if tagged_ids.is_empty() {
        data.players.iter().collect()
    } else {
        data.players
            .iter()
            .filter(|p| tagged_ids.contains(&p.id))
            .collect()
    };

    let audience: Vec<AudienceRow> = audience_players
        .iter()
        .map(|player| {
            let max_completion = max_map
                .get(&(point.id.clone(), player.id.clone()))
                .copied()
                .unwrap_or(0.0);
            let ack = data
                .acks
                .iter()
                .find(|a| a.point_id == point.id && a.player_id == player.id);
            AudienceRow {
                player_id: player.id.as_str().to_string(),
                name: player.name.clone(),
                has_account: player.has_account(),
                viewed: max_map.contains_key(&(point.id.clone(), player.id.clone())),
                max_completion,
                acknowledged: ack.is_some_and(|a| a.acknowledged),
                ack_at: ack.and_then(|a| a.ack_at),
            }
        })
        .collect();

    let acked = audience.iter().filter(|r| r.acknowledged).count();
    let ack_rate_pct = if audience.is_empty() {
        0.0
    } else {
        round1(acked as f64 / audience.len() as f64 * 100.0)
    };

    let audience_ids: Vec<_> = audience_players.iter().map(|p| p.id.clone()).collect();
    let per_point = per_point_averages(&max_map, &[point.id.clone()], &audience_ids);
    let avg_completion = per_point.first().map(|pc| pc.avg_completion).unwrap_or(0.0);

    Ok(Json(PointReportResponse {
        point_id: point.id.as_str().to_string(),
        game_id: point.game_id.as_str().to_string(),
        team_id: data.team_id.clone(),
        title: point.title.clone(),
        timestamp_ms: point.timestamp_ms,
        total_views: views.len() as u32,
        unique_viewers: views
            .iter()
            .map(|v| &v.player_id)
            .collect::<HashSet<_>>()
            .len() as u32,
        avg_completion,
        ack_rate_pct,
        audience,
    }))
}
