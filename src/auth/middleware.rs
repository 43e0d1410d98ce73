use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::auth::jwt::verify_token;
use crate::error::AppError;
use crate::session::SessionHandle;
use crate::AppState;

/// The live session behind a request's bearer token.
#[derive(Clone)]
pub struct AuthSession {
    pub id: Uuid,
    pub username: String,
    pub handle: SessionHandle,
}

pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(AppError::Unauthorized)?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or(AppError::Unauthorized)?;

    let claims = verify_token(token, &state.config)?.claims;

    // A valid signature is not enough: the session must still be open
    let handle = state.sessions.get(claims.sid).await.ok_or_else(|| {
        tracing::debug!(session_id = %claims.sid, "Token refers to a closed session");
        AppError::Unauthorized
    })?;

    req.extensions_mut().insert(AuthSession {
        id: claims.sid,
        username: claims.sub,
        handle,
    });
    Ok(next.run(req).await)
}
