use axum::extract::Path;
use axum::extract::State;

use super::ApiError;
use super::ApiSuccess;
use super::SuccessData;
use crate::inbound::http::router::AppState;
use crate::school::models::SchoolId;

pub async fn delete_school(
    State(state): State<AppState>,
    Path((school_id, _)): Path<(i64, String)>,
) -> Result<ApiSuccess<SuccessData>, ApiError> {
    state
        .school_service
        .delete_school(SchoolId(school_id))
        .await
        .map_err(ApiError::from)
        .map(|_| SuccessData::ok())
}
