use std::collections::HashMap;

use axum::body::Body;
use axum::body::Bytes;
use axum::extract::Path;
use axum::extract::Request;
use axum::extract::State;
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;
use serde::Deserialize;

use super::handlers::ApiError;
use crate::inbound::http::router::AppState;
use crate::school::models::SchoolId;

/// Largest request body the session gate will buffer while looking for a token.
const MAX_SESSION_BODY_BYTES: usize = 64 * 1024;

/// Extension type to store the authenticated school in request extensions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedSchool {
    pub school_id: SchoolId,
}

#[derive(Deserialize)]
struct TokenField {
    token: Option<String>,
}

/// Session gate: reads `token` from the JSON body and adds the school to request extensions.
///
/// The body is buffered and handed on untouched so the handler can still parse it.
/// Every request either proceeds or is answered 403.
pub async fn require_session(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, Response> {
    let (parts, body) = req.into_parts();
    // An oversized or unreadable body is read as empty and so carries no token.
    let bytes = axum::body::to_bytes(body, MAX_SESSION_BODY_BYTES)
        .await
        .unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Failed to read request body");
            Bytes::new()
        });

    // A body that is not JSON, or has no string token, carries no token.
    let token = serde_json::from_slice::<TokenField>(&bytes)
        .ok()
        .and_then(|field| field.token);

    let account_id = state
        .access_gate
        .require_session(token.as_deref())
        .into_session()
        .map_err(|reason| {
            tracing::warn!(reason = %reason, path = %parts.uri.path(), "Session rejected");
            ApiError::from(reason.rejection()).into_response()
        })?;

    let mut req = Request::from_parts(parts, Body::from(bytes));
    req.extensions_mut().insert(AuthenticatedSchool {
        school_id: SchoolId::from(account_id),
    });

    Ok(next.run(req).await)
}

/// Admin gate: compares the `:secret` path segment with the configured admin secret.
pub async fn require_admin_secret(
    State(state): State<AppState>,
    Path(params): Path<HashMap<String, String>>,
    req: Request,
    next: Next,
) -> Result<Response, Response> {
    state
        .access_gate
        .require_admin_secret(params.get("secret").map(String::as_str))
        .into_admin()
        .map_err(|reason| {
            tracing::warn!(reason = %reason, method = %req.method(), "Admin request rejected");
            ApiError::from(reason.rejection()).into_response()
        })?;

    Ok(next.run(req).await)
}
