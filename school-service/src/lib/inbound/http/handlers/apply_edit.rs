use axum::extract::State;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::SuccessData;
use crate::inbound::http::router::AppState;
use crate::school::errors::SchoolNameError;
use crate::school::models::ApplyEditCommand;
use crate::school::models::EditRequestId;
use crate::school::models::SchoolId;
use crate::school::models::SchoolName;

pub async fn apply_edit(
    State(state): State<AppState>,
    Json(body): Json<ApplyEditRequest>,
) -> Result<ApiSuccess<SuccessData>, ApiError> {
    state
        .school_service
        .apply_edit(body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|_| SuccessData::ok())
}

/// HTTP request body for applying an edit request (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ApplyEditRequest {
    id: i64,
    new_name: String,
    new_address: String,
    editid: i64,
}

impl ApplyEditRequest {
    fn try_into_command(self) -> Result<ApplyEditCommand, SchoolNameError> {
        Ok(ApplyEditCommand {
            school_id: SchoolId(self.id),
            new_name: SchoolName::new(self.new_name)?,
            new_address: self.new_address,
            edit_request_id: EditRequestId(self.editid),
        })
    }
}
