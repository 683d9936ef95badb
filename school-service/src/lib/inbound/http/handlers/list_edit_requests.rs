use axum::extract::State;
use axum::http::StatusCode;

use super::ApiError;
use super::ApiSuccess;
use super::EditRequestData;
use crate::inbound::http::router::AppState;

pub async fn list_edit_requests(
    State(state): State<AppState>,
) -> Result<ApiSuccess<Vec<EditRequestData>>, ApiError> {
    state
        .school_service
        .list_edit_requests()
        .await
        .map_err(ApiError::from)
        .map(|edit_requests| {
            ApiSuccess::new(
                StatusCode::OK,
                edit_requests.iter().map(EditRequestData::from).collect(),
            )
        })
}
