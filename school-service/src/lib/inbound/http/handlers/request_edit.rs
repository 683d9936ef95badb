use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::EditRequestData;
use crate::inbound::http::middleware::AuthenticatedSchool;
use crate::inbound::http::router::AppState;
use crate::school::models::RequestEditCommand;
use crate::school::models::SchoolName;

pub async fn request_edit(
    State(state): State<AppState>,
    Extension(authenticated): Extension<AuthenticatedSchool>,
    Json(body): Json<RequestEditBody>,
) -> Result<ApiSuccess<EditRequestData>, ApiError> {
    let command = RequestEditCommand {
        school_id: authenticated.school_id,
        new_name: SchoolName::new(body.new_name)?,
        new_address: body.new_address,
    };

    state
        .school_service
        .request_edit(command)
        .await
        .map_err(ApiError::from)
        .map(|ref edit_request| ApiSuccess::new(StatusCode::OK, edit_request.into()))
}

/// The session token also travels in this body; the session gate has consumed it already.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RequestEditBody {
    new_name: String,
    new_address: String,
}
