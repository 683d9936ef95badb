use auth::Rejection;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use crate::school::errors::SchoolError;
use crate::school::errors::SchoolNameError;
use crate::school::models::EditRequest;
use crate::school::models::School;

pub mod apply_edit;
pub mod delete_edit_request;
pub mod delete_school;
pub mod get_school;
pub mod list_edit_requests;
pub mod list_schools;
pub mod liveness;
pub mod login;
pub mod register;
pub mod request_edit;
pub mod set_verified;
pub mod verify_auth;

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<T>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(data))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

/// `{ "success": true }`, the body of every mutation that returns nothing else.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SuccessData {
    pub success: bool,
}

impl SuccessData {
    pub fn ok() -> ApiSuccess<Self> {
        ApiSuccess::new(StatusCode::OK, Self { success: true })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
    BadRequest(String),
    Validation(Vec<FieldErrorData>),
    NotFound(String),
    Unauthorized(String),
    Forbidden(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::InternalServerError(msg) => {
                tracing::error!(error = %msg, "Request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ApiErrorData::new("Internal server error")),
                )
                    .into_response()
            }
            ApiError::Validation(errors) => (
                StatusCode::BAD_REQUEST,
                Json(ApiValidationErrorData {
                    msg: "Validation failed".to_string(),
                    errors,
                }),
            )
                .into_response(),
            ApiError::BadRequest(msg) | ApiError::NotFound(msg) => {
                (StatusCode::BAD_REQUEST, Json(ApiErrorData::new(msg))).into_response()
            }
            ApiError::Unauthorized(msg) => {
                (StatusCode::UNAUTHORIZED, Json(ApiErrorData::new(msg))).into_response()
            }
            ApiError::Forbidden(msg) => {
                (StatusCode::FORBIDDEN, Json(ApiErrorData::new(msg))).into_response()
            }
        }
    }
}

impl From<SchoolError> for ApiError {
    fn from(err: SchoolError) -> Self {
        match err {
            SchoolError::Validation(validation) => ApiError::Validation(
                validation
                    .violations
                    .iter()
                    .map(|violation| FieldErrorData {
                        param: violation.field().to_string(),
                        msg: violation.to_string(),
                    })
                    .collect(),
            ),
            SchoolError::InvalidName(_) | SchoolError::DuplicateName(_) => {
                ApiError::BadRequest(err.to_string())
            }
            SchoolError::WrongPassword => ApiError::Unauthorized(err.to_string()),
            SchoolError::NotFound(_) | SchoolError::EditRequestNotFound(_) => {
                ApiError::NotFound(err.to_string())
            }
            SchoolError::Password(_)
            | SchoolError::Token(_)
            | SchoolError::DatabaseError(_)
            | SchoolError::Unknown(_) => ApiError::InternalServerError(err.to_string()),
        }
    }
}

impl From<SchoolNameError> for ApiError {
    fn from(err: SchoolNameError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

impl From<Rejection> for ApiError {
    fn from(rejection: Rejection) -> Self {
        match rejection {
            Rejection::Forbidden => ApiError::Forbidden("Forbidden".to_string()),
            Rejection::Unauthorized => ApiError::Unauthorized("Wrong server password".to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorData {
    pub msg: String,
}

impl ApiErrorData {
    fn new(msg: impl Into<String>) -> Self {
        Self { msg: msg.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiValidationErrorData {
    pub msg: String,
    pub errors: Vec<FieldErrorData>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldErrorData {
    pub param: String,
    pub msg: String,
}

/// Public view of a school. The password hash never leaves the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SchoolData {
    pub id: i64,
    pub name: String,
    pub address: String,
    pub verified: bool,
    pub created_at: DateTime<Utc>,
}

impl From<&School> for SchoolData {
    fn from(school: &School) -> Self {
        Self {
            id: school.id.0,
            name: school.name.as_str().to_string(),
            address: school.address.clone(),
            verified: school.verified,
            created_at: school.created_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EditRequestData {
    pub id: i64,
    pub school_id: i64,
    pub new_name: String,
    pub new_address: String,
    pub done: bool,
    pub created_at: DateTime<Utc>,
}

impl From<&EditRequest> for EditRequestData {
    fn from(edit_request: &EditRequest) -> Self {
        Self {
            id: edit_request.id.0,
            school_id: edit_request.school_id.0,
            new_name: edit_request.new_name.as_str().to_string(),
            new_address: edit_request.new_address.clone(),
            done: edit_request.done,
            created_at: edit_request.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use auth::CredentialValidator;

    use super::*;
    use crate::school::models::SchoolId;

    #[test]
    fn test_validation_error_lists_fields() {
        let validation = CredentialValidator::new()
            .validate_registration("short")
            .unwrap_err();

        let api_error = ApiError::from(SchoolError::from(validation));

        assert_eq!(
            api_error,
            ApiError::Validation(vec![FieldErrorData {
                param: "password".to_string(),
                msg: "Password length must be at least 8".to_string(),
            }])
        );
    }

    #[test]
    fn test_status_codes() {
        let cases = [
            (SchoolError::DuplicateName("Acme".to_string()), StatusCode::BAD_REQUEST),
            (SchoolError::WrongPassword, StatusCode::UNAUTHORIZED),
            (SchoolError::NotFound(SchoolId(1)), StatusCode::BAD_REQUEST),
            (
                SchoolError::DatabaseError("connection reset".to_string()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, status) in cases {
            assert_eq!(ApiError::from(err).into_response().status(), status);
        }

        assert_eq!(
            ApiError::from(Rejection::Forbidden).into_response().status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            ApiError::from(Rejection::Unauthorized).into_response().status(),
            StatusCode::UNAUTHORIZED
        );
    }

    #[test]
    fn test_token_errors_hide_detail() {
        let api_error = ApiError::from(SchoolError::Token(auth::TokenError::InvalidSignature));
        assert!(matches!(api_error, ApiError::InternalServerError(_)));
    }
}
