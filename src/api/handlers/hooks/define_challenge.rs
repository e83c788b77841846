//! Challenge decision hook.

use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Json};
use std::sync::Arc;
use tracing::debug;

use crate::auth::challenge::{decide, Decision};

use super::state::HookState;
use super::types::DefineChallengeRequest;

/// Decide the next protocol step for an authentication attempt.
///
/// The platform supplies the full round history on every invocation; the
/// returned decision tells it to open an email code round, issue tokens, or
/// terminally fail the attempt once the retry budget is spent.
#[utoipa::path(
    post,
    path = "/v1/hooks/define-challenge",
    request_body = DefineChallengeRequest,
    responses(
        (status = 200, description = "Next protocol step", body = Decision),
        (status = 400, description = "Missing payload", body = String)
    ),
    tag = "hooks"
)]
pub async fn define_challenge(
    state: Extension<Arc<HookState>>,
    payload: Option<Json<DefineChallengeRequest>>,
) -> impl IntoResponse {
    let request: DefineChallengeRequest = match payload {
        Some(Json(payload)) => payload,
        None => return (StatusCode::BAD_REQUEST, "Missing payload".to_string()).into_response(),
    };

    let decision = decide(
        request.user_exists,
        &request.rounds,
        state.config().retry_budget(),
    );
    debug!(
        rounds = request.rounds.len(),
        issue_tokens = decision.issue_tokens,
        fail_authentication = decision.fail_authentication,
        "challenge decision"
    );

    (StatusCode::OK, Json(decision)).into_response()
}
