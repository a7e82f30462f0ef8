use std::collections::{HashMap, HashSet};

use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::state::AppState;
use crate::api::ApiError;
use crate::calculate::{
    average_completion, bucket_views, collect_unified_views, max_completion_map, per_point_averages,
    point_player_key, rank_by_score, Granularity, PlayerEngagement, ViewBucket, ViewsQuery,
};
use crate::models::{PlayerId, PlayerProfile, PointId, ViewSource};

use super::{load_all_teams, load_team_data, parse_window, round1, team_engagement, TeamData};

// ── Shared response pieces ──────────────────────────────────────

/// One ranked player in an engagement table.
#[derive(Debug, Serialize)]
pub struct EngagedPlayer {
    pub player_id: String,
    pub name: String,
    pub score: f64,
    pub tagged_score: f64,
    pub ack_rate: f64,
    pub completion_rate: f64,
}

impl EngagedPlayer {
    fn from_row(player: &PlayerProfile, e: &PlayerEngagement) -> Self {
        Self {
            player_id: player.id.as_str().to_string(),
            name: player.name.clone(),
            score: e.score,
            tagged_score: e.tagged_score,
            ack_rate: e.ack_rate,
            completion_rate: e.completion_rate,
        }
    }
}

/// Acknowledged count / tagged-pair count as a 0-100 percentage.
fn ack_rate_pct(acked: usize, tagged_pairs: usize) -> f64 {
    if tagged_pairs == 0 {
        0.0
    } else {
        round1(acked as f64 / tagged_pairs as f64 * 100.0)
    }
}

// ── Coach Overview Endpoint ─────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct OverviewParams {
    pub coach_id: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct OverviewResponse {
    pub coach_id: String,
    pub total_teams: u32,
    pub total_points: u32,
    pub total_views: u32,
    pub unique_viewers: u32,
    pub guardian_view_pct: f64,
    pub avg_completion: f64,
    pub ack_rate_pct: f64,
    pub view_trend: Vec<ViewBucket>,
    pub top_players: Vec<EngagedPlayer>,
    pub bottom_players: Vec<EngagedPlayer>,
}

/// Coach-wide engagement across every team that has points authored by
/// this coach.
pub async fn coach_overview(
    State(state): State<AppState>,
    Query(params): Query<OverviewParams>,
) -> Result<Json<OverviewResponse>, ApiError> {
    let coach_id = params
        .coach_id
        .as_deref()
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ApiError::BadRequest("coach_id is required".to_string()))?;
    let window = parse_window(params.start.as_deref(), params.end.as_deref())?;

    let teams = load_all_teams(&state.storage)?;

    let mut all_views = Vec::new();
    let mut all_point_ids: Vec<PointId> = Vec::new();
    let mut all_player_ids: Vec<PlayerId> = Vec::new();
    let mut rows: Vec<(PlayerProfile, PlayerEngagement)> = Vec::new();
    let mut acked_total = 0usize;
    let mut tagged_total = 0usize;
    let mut teams_covered = 0u32;

    // First pass per team: scope to the coach's points, attribute views.
    let mut scoped: Vec<(&TeamData, Vec<PointId>)> = Vec::new();
    for team in &teams {
        let point_ids: Vec<PointId> = team
            .points
            .iter()
            .filter(|p| p.author_id.as_str() == coach_id)
            .map(|p| p.id.clone())
            .collect();
        if point_ids.is_empty() {
            continue;
        }
        teams_covered += 1;

        let query = ViewsQuery {
            point_ids: Some(point_ids.iter().cloned().collect()),
            player_ids: None,
            start: window.start,
            end: window.end,
        };
        all_views.extend(collect_unified_views(
            &team.views,
            &team.players,
            &team.links,
            &query,
        ));

        all_point_ids.extend(point_ids.iter().cloned());
        all_player_ids.extend(team.players.iter().map(|p| p.id.clone()));
        scoped.push((team, point_ids));
    }

    let max_map = max_completion_map(&all_views, point_player_key);

    // Second pass: engagement and acknowledgment totals per team. Point
    // ids are content-hashed per team, so one shared max map is safe.
    for (team, point_ids) in &scoped {
        let scope: HashSet<&PointId> = point_ids.iter().collect();
        tagged_total += team
            .tags
            .iter()
            .filter(|t| scope.contains(&t.point_id))
            .count();
        acked_total += team
            .acks
            .iter()
            .filter(|a| {
                a.acknowledged
                    && scope.contains(&a.point_id)
                    && a.ack_at.is_some_and(|at| window.contains(at))
            })
            .count();
        rows.extend(team_engagement(
            team,
            point_ids,
            &max_map,
            state.weights,
            window,
        ));
    }

    tracing::info!(
        coach_id,
        teams = teams_covered,
        points = all_point_ids.len(),
        views = all_views.len(),
        "assembled coach overview"
    );

    let guardian_views = all_views
        .iter()
        .filter(|v| v.source == ViewSource::Guardian)
        .count();
    let guardian_view_pct = if all_views.is_empty() {
        0.0
    } else {
        round1(guardian_views as f64 / all_views.len() as f64 * 100.0)
    };

    let unique_viewers: HashSet<&PlayerId> = all_views.iter().map(|v| &v.player_id).collect();
    let avg_completion = average_completion(&max_map, &all_point_ids, &all_player_ids);
    let view_trend = bucket_views(&all_views, Granularity::Daily);

    let ranked = rank_by_score(rows.iter().map(|(_, e)| e.clone()).collect());
    let by_id: HashMap<&str, &PlayerProfile> = rows
        .iter()
        .map(|(p, _)| (p.id.as_str(), p))
        .collect();
    let to_entry = |e: &PlayerEngagement| {
        by_id
            .get(e.player_id.as_str())
            .map(|p| EngagedPlayer::from_row(p, e))
    };
    let top_players: Vec<EngagedPlayer> = ranked.iter().take(5).filter_map(&to_entry).collect();
    let bottom_players: Vec<EngagedPlayer> =
        ranked.iter().rev().take(5).filter_map(&to_entry).collect();

    Ok(Json(OverviewResponse {
        coach_id: coach_id.to_string(),
        total_teams: teams_covered,
        total_points: all_point_ids.len() as u32,
        total_views: all_views.len() as u32,
        unique_viewers: unique_viewers.len() as u32,
        guardian_view_pct,
        avg_completion,
        ack_rate_pct: ack_rate_pct(acked_total, tagged_total),
        view_trend,
        top_players,
        bottom_players,
    }))
}

// ── Team Report Endpoint ────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct TeamReportParams {
    pub team_id: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TeamReportResponse {
    pub team_id: String,
    pub total_points: u32,
    pub total_views: u32,
    pub unique_viewers: u32,
    pub avg_completion: f64,
    pub ack_rate_pct: f64,
    pub players: Vec<EngagedPlayer>,
    pub view_trend: Vec<ViewBucket>,
}

/// Engagement for one team across all of its coaching points.
pub async fn team_report(
    State(state): State<AppState>,
    Query(params): Query<TeamReportParams>,
) -> Result<Json<TeamReportResponse>, ApiError> {
    let team_id = params
        .team_id
        .as_deref()
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ApiError::BadRequest("team_id is required".to_string()))?;
    let window = parse_window(params.start.as_deref(), params.end.as_deref())?;

    if !state.storage.team_dir(team_id).exists() {
        return Err(ApiError::NotFound(format!("team {}", team_id)));
    }
    let data = load_team_data(&state.storage, team_id)?;

    let point_ids: Vec<PointId> = data.points.iter().map(|p| p.id.clone()).collect();
    let player_ids: Vec<PlayerId> = data.players.iter().map(|p| p.id.clone()).collect();

    let query = ViewsQuery {
        point_ids: Some(point_ids.iter().cloned().collect()),
        player_ids: None,
        start: window.start,
        end: window.end,
    };
    let views = collect_unified_views(&data.views, &data.players, &data.links, &query);
    let max_map = max_completion_map(&views, point_player_key);

    tracing::info!(
        team_id,
        points = point_ids.len(),
        views = views.len(),
        "assembled team report"
    );

    let rows = team_engagement(&data, &point_ids, &max_map, state.weights, window);
    let by_id: HashMap<&str, &PlayerProfile> =
        rows.iter().map(|(p, _)| (p.id.as_str(), p)).collect();
    let ranked = rank_by_score(rows.iter().map(|(_, e)| e.clone()).collect());
    let players: Vec<EngagedPlayer> = ranked
        .iter()
        .filter_map(|e| {
            by_id
                .get(e.player_id.as_str())
                .map(|p| EngagedPlayer::from_row(p, e))
        })
        .collect();

    let scope: HashSet<&PointId> = point_ids.iter().collect();
    let tagged_total = data
        .tags
        .iter()
        .filter(|t| scope.contains(&t.point_id))
        .count();
    let acked_total = data
        .acks
        .iter()
        .filter(|a| {
            a.acknowledged
                && scope.contains(&a.point_id)
                && a.ack_at.is_some_and(|at| window.contains(at))
        })
        .count();

    let unique_viewers: HashSet<&PlayerId> = views.iter().map(|v| &v.player_id).collect();

    Ok(Json(TeamReportResponse {
        team_id: team_id.to_string(),
        total_points: point_ids.len() as u32,
        total_views: views.len() as u32,
        unique_viewers: unique_viewers.len() as u32,
        avg_completion: average_completion(&max_map, &point_ids, &player_ids),
        ack_rate_pct: ack_rate_pct(acked_total, tagged_total),
        players,
        view_trend: bucket_views(&views, Granularity::Daily),
    }))
}

// ── Game Report Endpoint ────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct GameReportParams {
    pub game_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PointSummary {
    pub point_id: String,
    pub title: String,
    pub timestamp_ms: u64,
    /// Average max-completion over the full roster, whole number.
    pub avg_completion: f64,
    pub viewers: u32,
    pub ack_count: u32,
}

#[derive(Debug, Serialize)]
pub struct GameReportResponse {
    pub game_id: String,
    pub team_id: String,
    pub opponent: String,
    pub date: String,
    pub total_points: u32,
    pub total_views: u32,
    pub unique_viewers: u32,
    pub avg_completion: f64,
    pub points: Vec<PointSummary>,
}

/// Per-point engagement breakdown for one game.
pub async fn game_report(
    State(state): State<AppState>,
    Query(params): Query<GameReportParams>,
) -> Result<Json<GameReportResponse>, ApiError> {
    let game_id = params
        .game_id
        .as_deref()
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ApiError::BadRequest("game_id is required".to_string()))?;

    // The game id alone does not name its partition; scan for it.
    let teams = load_all_teams(&state.storage)?;
    let (data, game) = teams
        .iter()
        .find_map(|t| {
            t.games
                .iter()
                .find(|g| g.id.as_str() == game_id)
                .map(|g| (t, g.clone()))
        })
        .ok_or_else(|| ApiError::NotFound(format!("game {}", game_id)))?;

    let game_points: Vec<_> = data
        .points
        .iter()
        .filter(|p| p.game_id == game.id)
        .collect();
    let point_ids: Vec<PointId> = game_points.iter().map(|p| p.id.clone()).collect();
    let player_ids: Vec<PlayerId> = data.players.iter().map(|p| p.id.clone()).collect();

    let query = ViewsQuery {
        point_ids: Some(point_ids.iter().cloned().collect()),
        ..Default::default()
    };
    let views = collect_unified_views(&data.views, &data.players, &data.links, &query);
    let max_map = max_completion_map(&views, point_player_key);

    tracing::info!(
        game_id,
        points = point_ids.len(),
        views = views.len(),
        "assembled game report"
    );

    let per_point = per_point_averages(&max_map, &point_ids, &player_ids);
    let points: Vec<PointSummary> = per_point
        .iter()
        .zip(game_points.iter())
        .map(|(pc, point)| {
            let ack_count = data
                .acks
                .iter()
                .filter(|a| a.acknowledged && a.point_id == point.id)
                .count() as u32;
            PointSummary {
                point_id: point.id.as_str().to_string(),
                title: point.title.clone(),
                timestamp_ms: point.timestamp_ms,
                avg_completion: pc.avg_completion,
                viewers: pc.viewers,
                ack_count,
            }
        })
        .collect();

    let unique_viewers: HashSet<&PlayerId> = views.iter().map(|v| &v.player_id).collect();

    Ok(Json(GameReportResponse {
        game_id: game_id.to_string(),
        team_id: data.team_id.clone(),
        opponent: game.opponent.clone(),
        date: game.date.to_string(),
        total_points: point_ids.len() as u32,
        total_views: views.len() as u32,
        unique_viewers: unique_viewers.len() as u32,
        avg_completion: average_completion(&max_map, &point_ids, &player_ids),
        points,
    }))
}

#[cfg(test)]
mod tests {
    use crate::api::build_router;
    use crate::api::state::AppState;
    use crate::calculate::ScoreWeights;
    use crate::models::{
        Acknowledgment, CoachingPoint, EntityId, Game, GuardianLink, PlayerProfile, TaggedPlayer,
        Team, ViewEvent,
    };
    use crate::storage::{EntityType, JsonlWriter, StorageConfig};
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use chrono::{DateTime, NaiveDate, Utc};
    use serde_json::Value;
    use std::sync::Arc;
    use tower::util::ServiceExt;

    fn setup_state(dir: &std::path::Path) -> AppState {
        AppState {
            storage: Arc::new(StorageConfig::new(dir.to_path_buf())),
            weights: ScoreWeights::default(),
        }
    }

    async fn get_json(app: axum::Router, uri: &str) -> (StatusCode, Value) {
        let resp = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = resp.status();
        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
        (status, json)
    }

    fn at(s: &str) -> DateTime<Utc> {
        s.parse().unwrap()
    }

    /// A team with two players (one direct, one guardian-only), one game
    /// and two coaching points by "coach-1".
    struct Fixture {
        team: Team,
        game: Game,
        direct: PlayerProfile,
        warded: PlayerProfile,
        p1: CoachingPoint,
        p2: CoachingPoint,
    }

    fn write_fixture(storage: &StorageConfig) -> Fixture {
        let team = Team::new("U14 Thunder".to_string(), "soccer".to_string());
        let game = Game::new(
            team.id.clone(),
            "Ridgeview FC".to_string(),
            NaiveDate::from_ymd_opt(2024, 1, 13).unwrap(),
        );
        let direct = PlayerProfile::new(team.id.clone(), "Alex Direct".to_string())
            .with_user(EntityId::from("user-alex"));
        let warded = PlayerProfile::new(team.id.clone(), "Billie Ward".to_string());
        let link = GuardianLink::new(EntityId::from("guardian-1"), warded.id.clone());

        let p1 = CoachingPoint::new(
            game.id.clone(),
            EntityId::from("coach-1"),
            "Defensive shape".to_string(),
            60_000,
        );
        let p2 = CoachingPoint::new(
            game.id.clone(),
            EntityId::from("coach-1"),
            "Press trigger".to_string(),
            240_000,
        );

        let views = vec![
            // Alex watches p1 twice; only the 75 counts.
            ViewEvent::new(
                p1.id.clone(),
                EntityId::from("user-alex"),
                Some(40.0),
                at("2024-01-15T10:00:00Z"),
            ),
            ViewEvent::new(
                p1.id.clone(),
                EntityId::from("user-alex"),
                Some(75.0),
                at("2024-01-15T18:00:00Z"),
            ),
            // Guardian watches p1 for Billie.
            ViewEvent::new(
                p1.id.clone(),
                EntityId::from("guardian-1"),
                Some(50.0),
                at("2024-01-16T09:00:00Z"),
            ),
            // Coach preview: attributed to nobody.
            ViewEvent::new(
                p1.id.clone(),
                EntityId::from("coach-1"),
                Some(100.0),
                at("2024-01-16T10:00:00Z"),
            ),
        ];

        let tags = vec![
            TaggedPlayer::new(p1.id.clone(), direct.id.clone()),
            TaggedPlayer::new(p1.id.clone(), warded.id.clone()),
        ];
        let acks = vec![Acknowledgment::new(p1.id.clone(), direct.id.clone())
            .acknowledged_at(at("2024-01-15T19:00:00Z"))];

        let tid = team.id.as_str();
        JsonlWriter::for_entity(storage, EntityType::Player, tid)
            .write_all(&[direct.clone(), warded.clone()])
            .unwrap();
        JsonlWriter::for_entity(storage, EntityType::GuardianLink, tid)
            .write_all(&[link])
            .unwrap();
        JsonlWriter::for_entity(storage, EntityType::Game, tid)
            .write_all(&[game.clone()])
            .unwrap();
        JsonlWriter::for_entity(storage, EntityType::Point, tid)
            .write_all(&[p1.clone(), p2.clone()])
            .unwrap();
        JsonlWriter::for_entity(storage, EntityType::View, tid)
            .write_all(&views)
            .unwrap();
        JsonlWriter::for_entity(storage, EntityType::TaggedPlayer, tid)
            .write_all(&tags)
            .unwrap();
        JsonlWriter::for_entity(storage, EntityType::Acknowledgment, tid)
            .write_all(&acks)
            .unwrap();

        Fixture {
            team,
            game,
            direct,
            warded,
            p1,
            p2,
        }
    }

    #[tokio::test]
    async fn test_overview_requires_coach_id() {
        let tmp = tempfile::tempdir().unwrap();
        let app = build_router(setup_state(tmp.path()));
        let (status, _) = get_json(app, "/api/reports/overview").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_overview_empty_data_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let app = build_router(setup_state(tmp.path()));
        let (status, json) = get_json(app, "/api/reports/overview?coach_id=coach-1").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["total_teams"], 0);
        assert_eq!(json["total_views"], 0);
        assert_eq!(json["avg_completion"], 0.0);
        assert!(json["top_players"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_overview_counts_and_matrix_average() {
        let tmp = tempfile::tempdir().unwrap();
        let state = setup_state(tmp.path());
        write_fixture(&state.storage);

        let app = build_router(state);
        let (status, json) = get_json(app, "/api/reports/overview?coach_id=coach-1").await;
        assert_eq!(status, StatusCode::OK);

        assert_eq!(json["total_teams"], 1);
        assert_eq!(json["total_points"], 2);
        // Coach preview excluded: 3 attributable views.
        assert_eq!(json["total_views"], 3);
        assert_eq!(json["unique_viewers"], 2);
        // Max map: p1/alex=75, p1/billie=50; matrix is 2 points x 2
        // players: (75+50+0+0)/4 = 31.25 -> 31.3 (not 62.5).
        assert_eq!(json["avg_completion"], 31.3);
        // 1 of 3 views came through a guardian.
        assert_eq!(json["guardian_view_pct"], 33.3);
        // 1 ack over 2 tagged pairs.
        assert_eq!(json["ack_rate_pct"], 50.0);
    }

    #[tokio::test]
    async fn test_overview_ignores_other_coaches() {
        let tmp = tempfile::tempdir().unwrap();
        let state = setup_state(tmp.path());
        write_fixture(&state.storage);

        let app = build_router(state);
        let (status, json) = get_json(app, "/api/reports/overview?coach_id=coach-2").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["total_teams"], 0);
        assert_eq!(json["total_points"], 0);
        assert_eq!(json["total_views"], 0);
    }

    #[tokio::test]
    async fn test_overview_date_window_filters_views() {
        let tmp = tempfile::tempdir().unwrap();
        let state = setup_state(tmp.path());
        write_fixture(&state.storage);

        let app = build_router(state);
        // Window covers only Jan 16: just the guardian view survives.
        let (status, json) = get_json(
            app,
            "/api/reports/overview?coach_id=coach-1&start=2024-01-16&end=2024-01-16",
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["total_views"], 1);
        assert_eq!(json["guardian_view_pct"], 100.0);
        // The ack happened on the 15th, outside the window.
        assert_eq!(json["ack_rate_pct"], 0.0);
    }

    #[tokio::test]
    async fn test_overview_trend_buckets_by_utc_day() {
        let tmp = tempfile::tempdir().unwrap();
        let state = setup_state(tmp.path());
        write_fixture(&state.storage);

        let app = build_router(state);
        let (_, json) = get_json(app, "/api/reports/overview?coach_id=coach-1").await;
        let trend = json["view_trend"].as_array().unwrap();
        assert_eq!(trend.len(), 2);
        assert_eq!(trend[0]["date"], "2024-01-15");
        assert_eq!(trend[0]["views"], 2);
        assert_eq!(trend[1]["date"], "2024-01-16");
        assert_eq!(trend[1]["views"], 1);
    }

    #[tokio::test]
    async fn test_overview_ranks_players() {
        let tmp = tempfile::tempdir().unwrap();
        let state = setup_state(tmp.path());
        let fx = write_fixture(&state.storage);

        let app = build_router(state);
        let (_, json) = get_json(app, "/api/reports/overview?coach_id=coach-1").await;

        let top = json["top_players"].as_array().unwrap();
        assert_eq!(top.len(), 2);
        // Alex acked and watched more: higher score.
        assert_eq!(top[0]["player_id"], fx.direct.id.as_str());
        let bottom = json["bottom_players"].as_array().unwrap();
        assert_eq!(bottom[0]["player_id"], fx.warded.id.as_str());
    }

    #[tokio::test]
    async fn test_team_report_requires_team_id() {
        let tmp = tempfile::tempdir().unwrap();
        let app = build_router(setup_state(tmp.path()));
        let (status, _) = get_json(app, "/api/reports/team").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_team_report_unknown_team_404() {
        let tmp = tempfile::tempdir().unwrap();
        let app = build_router(setup_state(tmp.path()));
        let (status, json) = get_json(app, "/api/reports/team?team_id=nope").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_team_report_aggregates() {
        let tmp = tempfile::tempdir().unwrap();
        let state = setup_state(tmp.path());
        let fx = write_fixture(&state.storage);

        let app = build_router(state);
        let uri = format!("/api/reports/team?team_id={}", fx.team.id);
        let (status, json) = get_json(app, &uri).await;
        assert_eq!(status, StatusCode::OK);

        assert_eq!(json["total_points"], 2);
        assert_eq!(json["total_views"], 3);
        assert_eq!(json["unique_viewers"], 2);
        assert_eq!(json["avg_completion"], 31.3);
        let players = json["players"].as_array().unwrap();
        assert_eq!(players.len(), 2);
        // Ranked by score descending.
        assert_eq!(players[0]["player_id"], fx.direct.id.as_str());
        assert_eq!(players[0]["name"], "Alex Direct");
    }

    #[tokio::test]
    async fn test_team_report_empty_partition() {
        let tmp = tempfile::tempdir().unwrap();
        let state = setup_state(tmp.path());
        std::fs::create_dir_all(state.storage.team_dir("bare-team")).unwrap();

        let app = build_router(state);
        let (status, json) = get_json(app, "/api/reports/team?team_id=bare-team").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["total_points"], 0);
        assert_eq!(json["total_views"], 0);
        assert_eq!(json["avg_completion"], 0.0);
        assert!(json["players"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_game_report_unknown_game_404() {
        let tmp = tempfile::tempdir().unwrap();
        let app = build_router(setup_state(tmp.path()));
        let (status, _) = get_json(app, "/api/reports/game?game_id=nope").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_game_report_per_point_breakdown() {
        let tmp = tempfile::tempdir().unwrap();
        let state = setup_state(tmp.path());
        let fx = write_fixture(&state.storage);

        let app = build_router(state);
        let uri = format!("/api/reports/game?game_id={}", fx.game.id);
        let (status, json) = get_json(app, &uri).await;
        assert_eq!(status, StatusCode::OK);

        assert_eq!(json["opponent"], "Ridgeview FC");
        assert_eq!(json["total_points"], 2);
        let points = json["points"].as_array().unwrap();
        assert_eq!(points.len(), 2);

        let p1 = points
            .iter()
            .find(|p| p["point_id"] == fx.p1.id.as_str())
            .unwrap();
        // p1: alex 75, billie 50 over 2 players -> 62.5 -> 63 whole.
        assert_eq!(p1["avg_completion"], 63.0);
        assert_eq!(p1["viewers"], 2);
        assert_eq!(p1["ack_count"], 1);

        let p2 = points
            .iter()
            .find(|p| p["point_id"] == fx.p2.id.as_str())
            .unwrap();
        assert_eq!(p2["avg_completion"], 0.0);
        assert_eq!(p2["viewers"], 0);
    }
}
