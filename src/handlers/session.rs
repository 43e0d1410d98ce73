use axum::{extract::State, Extension, Json};
use chrono::Duration;

use crate::auth::{jwt::create_access_token, middleware::AuthSession};
use crate::dto::{LoginRequest, LoginResponse, MessageResponse, ViewRequest};
use crate::error::AppResult;
use crate::models::user::Username;
use crate::session::{Session, SessionSummary};
use crate::AppState;

/// Open a session for `username`, loading (or starting) their log.
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let username = Username::parse(&body.username)?;
    let log = state.store.load(&username).await?;

    let ttl = Duration::seconds(state.config.jwt_access_ttl_secs);
    let session = Session::new(username.clone(), log, ttl);
    let summary = session.summary();
    let (session_id, _) = state.sessions.open(session).await;
    let access_token = create_access_token(&username, session_id, &state.config)?;

    let live_sessions = state.sessions.len().await;
    tracing::info!(
        username = %username,
        session_id = %session_id,
        entries = summary.entries,
        live_sessions,
        "Session opened"
    );

    Ok(Json(LoginResponse {
        access_token,
        expires_in: state.config.jwt_access_ttl_secs,
        session: summary,
    }))
}

pub async fn current_session(Extension(auth): Extension<AuthSession>) -> Json<SessionSummary> {
    Json(auth.handle.lock().await.summary())
}

pub async fn logout(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthSession>,
) -> Json<MessageResponse> {
    state.sessions.close(auth.id).await;
    tracing::info!(username = %auth.username, session_id = %auth.id, "Session closed");
    Json(MessageResponse {
        message: "Logged out".into(),
    })
}

pub async fn set_view(
    Extension(auth): Extension<AuthSession>,
    Json(body): Json<ViewRequest>,
) -> Json<SessionSummary> {
    let mut session = auth.handle.lock().await;
    session.view = body.view;
    Json(session.summary())
}
