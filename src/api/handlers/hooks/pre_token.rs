//! Token claim redaction hook.

use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Json};
use std::sync::Arc;
use tracing::debug;

use crate::auth::claims::redact;

use super::state::HookState;
use super::types::{PreTokenRequest, PreTokenResponse};

/// Redact the candidate claim set before the platform mints tokens.
///
/// Runs for every session. Identifying claims are stripped, the session
/// tracking id and anonymous marker are attached, and only the (possibly
/// synthetic) email survives as an identifier.
#[utoipa::path(
    post,
    path = "/v1/hooks/pre-token",
    request_body = PreTokenRequest,
    responses(
        (status = 200, description = "Redacted claim set", body = PreTokenResponse),
        (status = 400, description = "Missing payload", body = String)
    ),
    tag = "hooks"
)]
pub async fn pre_token(
    _state: Extension<Arc<HookState>>,
    payload: Option<Json<PreTokenRequest>>,
) -> impl IntoResponse {
    let request: PreTokenRequest = match payload {
        Some(Json(payload)) => payload,
        None => return (StatusCode::BAD_REQUEST, "Missing payload".to_string()).into_response(),
    };

    let before = request.claims.len();
    let claims = redact(request.claims);
    debug!(claims_in = before, claims_out = claims.len(), "claims redacted");

    (StatusCode::OK, Json(PreTokenResponse { claims })).into_response()
}

#[cfg(test)]
mod tests {
    use super::super::testing::{response_json, state};
    use super::*;
    use crate::auth::claims::SUPPRESSED_CLAIMS;
    use anyhow::{Context, Result};
    use axum::response::IntoResponse;
    use serde_json::json;

    #[tokio::test]
    async fn missing_payload_is_rejected() {
        let response = pre_token(state(), None).await.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn identifying_claims_are_stripped() -> Result<()> {
        let mut claims = serde_json::Map::new();
        for name in SUPPRESSED_CLAIMS {
            claims.insert(name.to_string(), json!("sensitive"));
        }
        claims.insert("email".to_string(), json!("anon-abc@feide.anonymous"));

        let response = pre_token(state(), Some(Json(PreTokenRequest { claims })))
            .await
            .into_response();
        assert_eq!(response.status(), StatusCode::OK);

        let value = response_json(response).await?;
        let claims = value
            .get("claims")
            .and_then(serde_json::Value::as_object)
            .context("missing claims")?;

        for name in SUPPRESSED_CLAIMS {
            assert!(!claims.contains_key(name), "claim {name} survived");
        }
        assert_eq!(claims.get("email"), Some(&json!("anon-abc@feide.anonymous")));
        assert_eq!(claims.get("anonymous"), Some(&json!("true")));
        assert!(claims.contains_key("session_id"));
        assert_eq!(claims.len(), 3);
        Ok(())
    }
}
