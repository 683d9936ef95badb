use axum::extract::Path;
use axum::extract::State;

use super::ApiError;
use super::ApiSuccess;
use super::SuccessData;
use crate::inbound::http::router::AppState;
use crate::school::models::EditRequestId;

pub async fn delete_edit_request(
    State(state): State<AppState>,
    Path((edit_request_id, _)): Path<(i64, String)>,
) -> Result<ApiSuccess<SuccessData>, ApiError> {
    state
        .school_service
        .delete_edit_request(EditRequestId(edit_request_id))
        .await
        .map_err(ApiError::from)
        .map(|_| SuccessData::ok())
}
