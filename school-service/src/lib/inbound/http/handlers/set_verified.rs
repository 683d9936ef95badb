use axum::extract::Path;
use axum::extract::State;

use super::ApiError;
use super::ApiSuccess;
use super::SuccessData;
use crate::inbound::http::router::AppState;
use crate::school::models::SchoolId;

pub async fn verify_school(
    State(state): State<AppState>,
    Path((school_id, _)): Path<(i64, String)>,
) -> Result<ApiSuccess<SuccessData>, ApiError> {
    set_verified(state, SchoolId(school_id), true).await
}

pub async fn unverify_school(
    State(state): State<AppState>,
    Path((school_id, _)): Path<(i64, String)>,
) -> Result<ApiSuccess<SuccessData>, ApiError> {
    set_verified(state, SchoolId(school_id), false).await
}

async fn set_verified(
    state: AppState,
    school_id: SchoolId,
    verified: bool,
) -> Result<ApiSuccess<SuccessData>, ApiError> {
    state
        .school_service
        .set_verified(school_id, verified)
        .await
        .map_err(ApiError::from)
        .map(|_| SuccessData::ok())
}
