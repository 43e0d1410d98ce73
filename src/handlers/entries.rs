use axum::{extract::State, http::StatusCode, Extension, Json};
use chrono::Utc;
use validator::Validate;

use crate::auth::middleware::AuthSession;
use crate::dto::CreateEntryResponse;
use crate::error::AppResult;
use crate::models::health_log::{HealthEntry, NewEntryRequest};
use crate::AppState;

pub async fn list_entries(Extension(auth): Extension<AuthSession>) -> Json<Vec<HealthEntry>> {
    let session = auth.handle.lock().await;
    Json(session.log.entries().to_vec())
}

/// Append one entry and rewrite the user's file. The in-memory log only
/// changes once the save succeeded.
pub async fn create_entry(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthSession>,
    Json(body): Json<NewEntryRequest>,
) -> AppResult<(StatusCode, Json<CreateEntryResponse>)> {
    body.validate()?;
    let entry = body.into_entry(Utc::now().date_naive());

    let mut session = auth.handle.lock().await;
    let mut updated = session.log.clone();
    updated.push(entry.clone());
    state.store.save(&session.username, &updated).await?;
    session.log = updated;

    tracing::info!(
        username = %session.username,
        date = ?entry.date,
        entries = session.log.len(),
        "Health entry added"
    );

    Ok((
        StatusCode::CREATED,
        Json(CreateEntryResponse {
            entry,
            entries: session.log.len(),
        }),
    ))
}
