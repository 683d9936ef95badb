use std::sync::Arc;
use std::time::Duration;

use auth::AccessGate;
use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::delete;
use axum::routing::get;
use axum::routing::patch;
use axum::routing::post;
use axum::Router;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::apply_edit::apply_edit;
use super::handlers::delete_edit_request::delete_edit_request;
use super::handlers::delete_school::delete_school;
use super::handlers::get_school::get_school;
use super::handlers::list_edit_requests::list_edit_requests;
use super::handlers::list_schools::list_schools;
use super::handlers::liveness::liveness;
use super::handlers::login::login;
use super::handlers::register::register;
use super::handlers::request_edit::request_edit;
use super::handlers::set_verified::unverify_school;
use super::handlers::set_verified::verify_school;
use super::handlers::verify_auth::verify_auth;
use super::middleware::require_admin_secret;
use super::middleware::require_session;
use crate::school::ports::SchoolServicePort;

#[derive(Clone)]
pub struct AppState {
    pub school_service: Arc<dyn SchoolServicePort>,
    pub access_gate: Arc<AccessGate>,
}

pub fn create_router(
    school_service: Arc<dyn SchoolServicePort>,
    access_gate: Arc<AccessGate>,
) -> Router {
    let state = AppState {
        school_service,
        access_gate,
    };

    let public_routes = Router::new()
        .route("/", get(liveness))
        .route("/reg", post(register))
        .route("/login", post(login));

    let session_routes = Router::new()
        .route("/request_edit", post(request_edit))
        .route("/verify_auth", post(verify_auth))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_session,
        ));

    let admin_routes = Router::new()
        .route("/school/:school_id/:secret", get(get_school))
        .route("/schools/:secret", get(list_schools))
        .route("/verify/:school_id/:secret", patch(verify_school))
        .route("/unverify/:school_id/:secret", patch(unverify_school))
        .route("/schools/:school_id/:secret", delete(delete_school))
        .route("/edit_requests/:secret", get(list_edit_requests))
        .route("/edit/:secret", patch(apply_edit))
        .route("/edit_request/:editid/:secret", delete(delete_edit_request))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_admin_secret,
        ));

    // Admin paths carry the secret; keep URIs out of spans and events.
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(method = %request.method(), "Request started");
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(session_routes)
        .merge(admin_routes)
        .layer(
            ServiceBuilder::new()
                .layer(trace_layer)
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
