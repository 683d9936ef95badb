use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use super::ApiError;
use super::ApiSuccess;
use super::SchoolData;
use crate::inbound::http::middleware::AuthenticatedSchool;
use crate::inbound::http::router::AppState;

pub async fn verify_auth(
    State(state): State<AppState>,
    Extension(authenticated): Extension<AuthenticatedSchool>,
) -> Result<ApiSuccess<SchoolData>, ApiError> {
    state
        .school_service
        .get_school(authenticated.school_id)
        .await
        .map_err(ApiError::from)
        .map(|ref school| ApiSuccess::new(StatusCode::OK, school.into()))
}
