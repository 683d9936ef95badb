use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;

use super::ApiError;
use super::ApiSuccess;
use super::SchoolData;
use crate::inbound::http::router::AppState;

/// 204 with an empty body when there are no schools at all.
pub async fn list_schools(State(state): State<AppState>) -> Result<Response, ApiError> {
    let schools = state.school_service.list_schools().await?;

    if schools.is_empty() {
        return Ok(StatusCode::NO_CONTENT.into_response());
    }

    let data: Vec<SchoolData> = schools.iter().map(SchoolData::from).collect();
    Ok(ApiSuccess::new(StatusCode::OK, data).into_response())
}
