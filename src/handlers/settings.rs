use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    Extension, Json,
};

use crate::auth::middleware::AuthSession;
use crate::dto::{MessageResponse, ResetRequest};
use crate::error::{AppError, AppResult};
use crate::models::health_log::HealthLog;
use crate::store;
use crate::AppState;

/// Download the whole log in its stored CSV layout.
pub async fn export_log(Extension(auth): Extension<AuthSession>) -> AppResult<Response> {
    let session = auth.handle.lock().await;
    let bytes = store::encode(&session.log)?;
    let disposition = format!(
        "attachment; filename=\"{}_health_data.csv\"",
        session.username
    );

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        bytes,
    )
        .into_response())
}

/// Clear every entry. Requires `confirm: true`.
pub async fn reset_log(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthSession>,
    Json(body): Json<ResetRequest>,
) -> AppResult<Json<MessageResponse>> {
    if !body.confirm {
        return Err(AppError::Validation(
            "Clearing all data must be confirmed".into(),
        ));
    }

    let mut session = auth.handle.lock().await;
    let cleared = HealthLog::default();
    state.store.save(&session.username, &cleared).await?;
    let removed = session.log.len();
    session.log = cleared;

    tracing::info!(username = %session.username, removed, "Health log cleared");

    Ok(Json(MessageResponse {
        message: "All data cleared successfully".into(),
    }))
}
