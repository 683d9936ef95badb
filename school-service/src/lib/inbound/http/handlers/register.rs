use axum::extract::State;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::SuccessData;
use crate::inbound::http::router::AppState;
use crate::school::errors::SchoolNameError;
use crate::school::models::RegisterSchoolCommand;
use crate::school::models::SchoolName;

pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> Result<ApiSuccess<SuccessData>, ApiError> {
    state
        .school_service
        .register_school(body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|_| SuccessData::ok())
}

/// HTTP request body for registering a school (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RegisterRequest {
    name: String,
    address: String,
    password: String,
}

impl RegisterRequest {
    fn try_into_command(self) -> Result<RegisterSchoolCommand, SchoolNameError> {
        Ok(RegisterSchoolCommand {
            name: SchoolName::new(self.name)?,
            address: self.address,
            password: self.password,
        })
    }
}
