//! Challenge answer verification hook.

use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Json};
use std::sync::Arc;
use tracing::debug;

use crate::auth::verify::verify_answer;

use super::state::HookState;
use super::types::{VerifyChallengeRequest, VerifyChallengeResponse};

/// Verify a submitted answer against the round's bound code.
///
/// The result lands in the round's history as SUCCEEDED or FAILED and drives
/// the next challenge decision; a wrong answer is an expected outcome here,
/// never an error.
#[utoipa::path(
    post,
    path = "/v1/hooks/verify-challenge",
    request_body = VerifyChallengeRequest,
    responses(
        (status = 200, description = "Verification result", body = VerifyChallengeResponse),
        (status = 400, description = "Missing payload", body = String)
    ),
    tag = "hooks"
)]
pub async fn verify_challenge(
    _state: Extension<Arc<HookState>>,
    payload: Option<Json<VerifyChallengeRequest>>,
) -> impl IntoResponse {
    let request: VerifyChallengeRequest = match payload {
        Some(Json(payload)) => payload,
        None => return (StatusCode::BAD_REQUEST, "Missing payload".to_string()).into_response(),
    };

    let answer_correct = verify_answer(&request.code, &request.answer);
    debug!(answer_correct, "challenge answer verified");

    (
        StatusCode::OK,
        Json(VerifyChallengeResponse { answer_correct }),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::super::testing::{response_json, state};
    use super::*;
    use anyhow::Result;
    use axum::response::IntoResponse;

    fn request(code: &str, answer: &str) -> Option<Json<VerifyChallengeRequest>> {
        Some(Json(VerifyChallengeRequest {
            code: code.to_string(),
            answer: answer.to_string(),
        }))
    }

    #[tokio::test]
    async fn missing_payload_is_rejected() {
        let response = verify_challenge(state(), None).await.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn correct_answer_verifies() -> Result<()> {
        let value = response_json(
            verify_challenge(state(), request("482913", "482913"))
                .await
                .into_response(),
        )
        .await?;
        assert_eq!(value["answer_correct"], true);
        Ok(())
    }

    #[tokio::test]
    async fn wrong_answer_is_a_result_not_an_error() -> Result<()> {
        let response = verify_challenge(state(), request("482913", "000000"))
            .await
            .into_response();
        assert_eq!(response.status(), StatusCode::OK);

        let value = response_json(response).await?;
        assert_eq!(value["answer_correct"], false);
        Ok(())
    }
}
