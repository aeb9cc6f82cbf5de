use anyhow::Result;
use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use tracing::{error, warn};

use crate::directory::{parental_rating_levels, CandidateQuery, ItemDirectory};
use crate::playback::{PlaybackGroupInfo, PlaybackHandoff};
use crate::room::{RoomSpec, VotingCoordinator, VotingError};
use crate::user::IdentitySource;
use tower_http::services::ServeDir;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::metrics::{record_room_created, record_vote_cast};
use super::session::Session;
use super::state::ServerState;
use super::{log_requests, ServerConfig};

#[derive(Serialize)]
struct ServerStats {
    pub uptime: String,
    pub version: String,
    pub session_token: Option<String>,
}

fn format_uptime(duration: Duration) -> String {
    let total_seconds = duration.as_secs();

    let days = total_seconds / 86_400;
    let hours = (total_seconds % 86_400) / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    format!("{}d {:02}:{:02}:{:02}", days, hours, minutes, seconds)
}

#[derive(Deserialize, Debug)]
struct CastVoteBody {
    pub room_id: Uuid,
    pub item_id: Uuid,
    pub is_like: bool,
}

#[derive(Deserialize, Debug)]
struct CandidatesParams {
    pub skip: Option<usize>,
    pub limit: Option<usize>,
}

#[derive(Deserialize, Debug)]
struct PermissionsParams {
    pub user_id: Option<Uuid>,
}

#[derive(Deserialize, Debug)]
struct AccessCheckBody {
    #[serde(default)]
    pub collection_ids: Vec<Uuid>,
}

#[derive(Serialize)]
struct AccessCheckResult {
    pub has_access_issues: bool,
    pub message: String,
}

const DEFAULT_CANDIDATES_LIMIT: usize = 20;

fn transition_response(result: Result<(), VotingError>) -> Response {
    match result {
        Ok(()) => StatusCode::OK.into_response(),
        Err(VotingError::NotFound) => StatusCode::NOT_FOUND.into_response(),
        Err(VotingError::PreconditionFailed) => StatusCode::BAD_REQUEST.into_response(),
    }
}

async fn home(session: Option<Session>, State(state): State<ServerState>) -> impl IntoResponse {
    let stats = ServerStats {
        uptime: format_uptime(state.start_time.elapsed()),
        version: env!("CARGO_PKG_VERSION").to_owned(),
        session_token: session.map(|s| s.token),
    };
    Json(stats)
}

async fn serve_metrics() -> String {
    super::metrics::render()
}

async fn create_room(
    session: Session,
    State(state): State<ServerState>,
    Json(spec): Json<RoomSpec>,
) -> Response {
    if !state.coordinator.user_permissions(session.user_id).can_organize {
        return StatusCode::FORBIDDEN.into_response();
    }

    match state.coordinator.create_room(session.user_id, spec) {
        Ok(room) => {
            record_room_created();
            Json(room).into_response()
        }
        Err(err) => {
            error!("Error creating room: {}", err);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

async fn list_rooms(
    _session: Session,
    State(coordinator): State<Arc<VotingCoordinator>>,
) -> Response {
    Json(coordinator.active_rooms()).into_response()
}

async fn get_room(
    _session: Session,
    State(coordinator): State<Arc<VotingCoordinator>>,
    Path(id): Path<Uuid>,
) -> Response {
    match coordinator.get_room(id) {
        Some(room) => Json(room).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn join_room(
    session: Session,
    State(coordinator): State<Arc<VotingCoordinator>>,
    Path(id): Path<Uuid>,
) -> Response {
    transition_response(coordinator.join_room(id, session.user_id))
}

async fn start_voting(
    session: Session,
    State(coordinator): State<Arc<VotingCoordinator>>,
    Path(id): Path<Uuid>,
) -> Response {
    transition_response(coordinator.start_voting(id, session.user_id))
}

async fn cast_vote(
    session: Session,
    State(coordinator): State<Arc<VotingCoordinator>>,
    Json(body): Json<CastVoteBody>,
) -> Response {
    if !coordinator.user_permissions(session.user_id).can_vote {
        return StatusCode::FORBIDDEN.into_response();
    }

    let result = coordinator.cast_vote(body.room_id, session.user_id, body.item_id, body.is_like);
    if result.is_ok() {
        record_vote_cast();
    }
    transition_response(result)
}

async fn get_results(
    _session: Session,
    State(coordinator): State<Arc<VotingCoordinator>>,
    Path(id): Path<Uuid>,
) -> Response {
    Json(coordinator.results(id)).into_response()
}

async fn get_candidates(
    session: Session,
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    Query(params): Query<CandidatesParams>,
) -> Response {
    let room = match state.coordinator.get_room(id) {
        Some(room) => room,
        None => return StatusCode::NOT_FOUND.into_response(),
    };

    let query = CandidateQuery::for_room(&room);
    let page = state.directory.query_candidates(
        &query,
        params.skip.unwrap_or(0),
        params.limit.unwrap_or(DEFAULT_CANDIDATES_LIMIT),
        session.user_id,
    );
    Json(page).into_response()
}

/// Hands the room's current winner over to the playback group. Only the
/// organizer may trigger the handoff, and only for a room that has both a
/// playback group and at least one liked item.
async fn handoff_winner(
    session: Session,
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Response {
    let room = match state.coordinator.get_room(id) {
        Some(room) => room,
        None => return StatusCode::NOT_FOUND.into_response(),
    };

    if room.organizer_id != session.user_id {
        return StatusCode::BAD_REQUEST.into_response();
    }

    let group_ref = match room.playback_group_ref {
        Some(ref group_ref) if !group_ref.is_empty() => group_ref.clone(),
        _ => return StatusCode::BAD_REQUEST.into_response(),
    };

    let winner = match state.coordinator.results(id).winner {
        Some(winner) => winner,
        None => return StatusCode::BAD_REQUEST.into_response(),
    };

    // Fire-and-forget: a failed handoff is the playback side's problem.
    if let Err(err) = state.playback.enqueue(&group_ref, winner.item_id).await {
        warn!(
            "Playback handoff of item {} to group {} failed: {}",
            winner.item_id, group_ref, err
        );
    }

    Json(winner).into_response()
}

async fn get_permissions(
    session: Session,
    State(coordinator): State<Arc<VotingCoordinator>>,
    Query(params): Query<PermissionsParams>,
) -> Response {
    let target = params.user_id.unwrap_or(session.user_id);
    Json(coordinator.user_permissions(target)).into_response()
}

async fn library_collections(
    session: Session,
    State(directory): State<Arc<dyn ItemDirectory>>,
) -> Response {
    Json(directory.collections(session.user_id)).into_response()
}

async fn library_genres(
    session: Session,
    State(directory): State<Arc<dyn ItemDirectory>>,
) -> Response {
    Json(directory.genres(session.user_id)).into_response()
}

async fn parental_ratings(_session: Session) -> Response {
    Json(parental_rating_levels()).into_response()
}

/// Checks whether every member of the caller's room can see the given
/// collections. The answer never names users or collections, only whether
/// an issue exists at all.
async fn access_check(
    session: Session,
    State(state): State<ServerState>,
    Json(body): Json<AccessCheckBody>,
) -> Response {
    let other_members: Vec<Uuid> = state
        .coordinator
        .active_rooms()
        .into_iter()
        .find(|room| room.organizer_id == session.user_id)
        .map(|room| {
            room.members()
                .iter()
                .filter(|m| **m != session.user_id)
                .copied()
                .collect()
        })
        .unwrap_or_default();

    if other_members.is_empty() {
        return Json(AccessCheckResult {
            has_access_issues: false,
            message: "No other members in group".to_owned(),
        })
        .into_response();
    }

    let has_access_issues = body.collection_ids.iter().any(|collection_id| {
        other_members
            .iter()
            .any(|member| !state.directory.is_visible(*collection_id, *member))
    });

    let message = if has_access_issues {
        "Some group members may not have access to all selected content"
    } else {
        "All members have access"
    };

    Json(AccessCheckResult {
        has_access_issues,
        message: message.to_owned(),
    })
    .into_response()
}

async fn playback_info(
    session: Session,
    State(coordinator): State<Arc<VotingCoordinator>>,
) -> Response {
    let info = coordinator
        .active_rooms()
        .into_iter()
        .find(|room| {
            room.is_member(session.user_id)
                && room
                    .playback_group_ref
                    .as_deref()
                    .is_some_and(|g| !g.is_empty())
        })
        .map(|room| {
            let group_ref = room.playback_group_ref.clone();
            PlaybackGroupInfo {
                group_ref,
                is_leader: room.organizer_id == session.user_id,
                member_count: room.members().len(),
                member_user_ids: room.members().to_vec(),
            }
        })
        .unwrap_or_else(PlaybackGroupInfo::none);

    Json(info).into_response()
}

pub fn make_app(
    config: ServerConfig,
    coordinator: Arc<VotingCoordinator>,
    directory: Arc<dyn ItemDirectory>,
    playback: Arc<dyn PlaybackHandoff>,
    identity: Arc<dyn IdentitySource>,
) -> Result<Router> {
    let state = ServerState {
        config: config.clone(),
        start_time: Instant::now(),
        coordinator,
        directory,
        playback,
        identity,
    };

    let room_routes: Router = Router::new()
        .route("/rooms", post(create_room))
        .route("/rooms", get(list_rooms))
        .route("/rooms/{id}", get(get_room))
        .route("/rooms/{id}/join", post(join_room))
        .route("/rooms/{id}/start-voting", post(start_voting))
        .route("/rooms/{id}/results", get(get_results))
        .route("/rooms/{id}/candidates", get(get_candidates))
        .route("/rooms/{id}/handoff", post(handoff_winner))
        .route("/votes", post(cast_vote))
        .route("/permissions", get(get_permissions))
        .with_state(state.clone());

    let library_routes: Router = Router::new()
        .route("/library/collections", get(library_collections))
        .route("/library/genres", get(library_genres))
        .route("/library/parental-ratings", get(parental_ratings))
        .route("/library/access-check", post(access_check))
        .with_state(state.clone());

    let playback_routes: Router = Router::new()
        .route("/playback/info", get(playback_info))
        .with_state(state.clone());

    let home_router: Router = match config.frontend_dir_path {
        Some(frontend_path) => {
            let static_files_service =
                ServeDir::new(frontend_path).append_index_html_on_directories(true);
            Router::new().fallback_service(static_files_service)
        }
        None => Router::new()
            .route("/", get(home))
            .with_state(state.clone()),
    };

    let app: Router = home_router
        .route("/metrics", get(serve_metrics))
        .nest("/v1", room_routes.merge(library_routes).merge(playback_routes))
        .layer(middleware::from_fn_with_state(state.clone(), log_requests));

    Ok(app)
}

pub async fn run_server(
    config: ServerConfig,
    coordinator: Arc<VotingCoordinator>,
    directory: Arc<dyn ItemDirectory>,
    playback: Arc<dyn PlaybackHandoff>,
    identity: Arc<dyn IdentitySource>,
) -> Result<()> {
    let port = config.port;
    let app = make_app(config, coordinator, directory, playback, identity)?;

    let listener = tokio::net::TcpListener::bind(format!("127.0.0.1:{}", port)).await?;

    Ok(axum::serve(listener, app).await?)
}
