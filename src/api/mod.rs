//! HTTP surface for the hook service: router, middleware, server.

use anyhow::Result;
use axum::{
    body::Body,
    extract::MatchedPath,
    http::{HeaderName, HeaderValue, Request},
    routing::{get, post},
    Extension, Router,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    request_id::PropagateRequestIdLayer, set_header::SetRequestHeaderLayer, trace::TraceLayer,
};
use tracing::{info, info_span, Span};
use ulid::Ulid;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub mod email;
pub mod handlers;
mod openapi;

pub use openapi::ApiDoc;

use crate::api::handlers::hooks::{
    create_challenge, define_challenge, post_confirmation, pre_sign_up, pre_token,
    verify_challenge, HookState,
};

/// Build the hook router with middleware and documentation mounted.
///
/// Exposed separately from [`new`] so tests can drive the full stack without
/// binding a fixed port.
#[must_use]
pub fn router(state: Arc<HookState>) -> Router {
    Router::new()
        .route("/health", get(handlers::health::health))
        .route("/v1/hooks/pre-sign-up", post(pre_sign_up::pre_sign_up))
        .route(
            "/v1/hooks/define-challenge",
            post(define_challenge::define_challenge),
        )
        .route(
            "/v1/hooks/create-challenge",
            post(create_challenge::create_challenge),
        )
        .route(
            "/v1/hooks/verify-challenge",
            post(verify_challenge::verify_challenge),
        )
        .route("/v1/hooks/pre-token", post(pre_token::pre_token))
        .route(
            "/v1/hooks/post-confirmation",
            post(post_confirmation::post_confirmation),
        )
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestHeaderLayer::if_not_present(
                    HeaderName::from_static("x-request-id"),
                    |_req: &_| HeaderValue::from_str(Ulid::new().to_string().as_str()).ok(),
                ))
                .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
                    "x-request-id",
                )))
                .layer(TraceLayer::new_for_http().make_span_with(make_span))
                .layer(Extension(state)),
        )
}

/// Start the server.
///
/// # Errors
/// Returns an error if the listener cannot bind or the server fails.
pub async fn new(port: u16, state: Arc<HookState>) -> Result<()> {
    let listener = TcpListener::bind(format!("::0:{port}")).await?;

    info!("Listening on [::]:{}", port);

    axum::serve(listener, router(state).into_make_service()).await?;

    Ok(())
}

fn make_span(request: &Request<Body>) -> Span {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|val| val.to_str().ok())
        .unwrap_or("none");
    let matched_path = request
        .extensions()
        .get::<MatchedPath>()
        .map_or_else(|| request.uri().path(), MatchedPath::as_str);

    info_span!(
        "http.request",
        http.method = %request.method(),
        http.route = matched_path,
        request_id
    )
}
