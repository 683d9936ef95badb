use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;

use super::ApiError;
use super::ApiSuccess;
use super::SchoolData;
use crate::inbound::http::router::AppState;
use crate::school::models::SchoolId;

pub async fn get_school(
    State(state): State<AppState>,
    Path((school_id, _)): Path<(i64, String)>,
) -> Result<ApiSuccess<SchoolData>, ApiError> {
    state
        .school_service
        .get_school(SchoolId(school_id))
        .await
        .map_err(ApiError::from)
        .map(|ref school| ApiSuccess::new(StatusCode::OK, school.into()))
}
