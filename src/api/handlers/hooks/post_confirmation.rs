//! Post-confirmation hook: privileged group grants.

use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Json};
use std::sync::Arc;
use tracing::{debug, error, info};

use crate::api::handlers::normalize_email;

use super::state::HookState;
use super::types::PostConfirmationRequest;

/// Grant group membership to freshly confirmed privileged accounts.
///
/// Accounts whose email is on the configured allow-list are added to the
/// admin group through the identity store. A failed grant is logged and the
/// confirmation still succeeds; membership can be fixed up manually, a
/// blocked sign-up cannot.
#[utoipa::path(
    post,
    path = "/v1/hooks/post-confirmation",
    request_body = PostConfirmationRequest,
    responses(
        (status = 204, description = "Confirmation processed"),
        (status = 400, description = "Missing payload", body = String)
    ),
    tag = "hooks"
)]
pub async fn post_confirmation(
    state: Extension<Arc<HookState>>,
    payload: Option<Json<PostConfirmationRequest>>,
) -> impl IntoResponse {
    let request: PostConfirmationRequest = match payload {
        Some(Json(payload)) => payload,
        None => return (StatusCode::BAD_REQUEST, "Missing payload".to_string()).into_response(),
    };

    let email = normalize_email(&request.email);
    if !state.config().is_admin_email(&email) {
        debug!(username = %request.username, "confirmed account is not privileged");
        return StatusCode::NO_CONTENT.into_response();
    }

    let group = state.config().admin_group();
    match state
        .directory()
        .add_user_to_group(&request.username, group)
        .await
    {
        Ok(()) => info!(username = %request.username, group = %group, "granted group membership"),
        Err(err) => {
            error!(username = %request.username, "failed to grant group membership: {err}");
        }
    }

    StatusCode::NO_CONTENT.into_response()
}
