//! Sign-up hook: auto-confirmation and federated identity anonymization.

use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Json};
use std::sync::Arc;
use tracing::{info, warn};

use crate::auth::anonymize;

use super::state::HookState;
use super::types::{PreSignUpRequest, PreSignUpResponse, SignUpOrigin};

/// Decide confirmation for a new sign-up.
///
/// Direct email sign-ups are auto-confirmed for the passwordless flow.
/// Federated sign-ups are anonymized: the provider subject is hashed into a
/// synthetic handle and the account is auto-confirmed under it. A federated
/// payload without a usable provider identity changes nothing; the sign-up
/// falls through to the ordinary email path.
#[utoipa::path(
    post,
    path = "/v1/hooks/pre-sign-up",
    request_body = PreSignUpRequest,
    responses(
        (status = 200, description = "Confirmation decision", body = PreSignUpResponse),
        (status = 400, description = "Missing payload", body = String)
    ),
    tag = "hooks"
)]
pub async fn pre_sign_up(
    state: Extension<Arc<HookState>>,
    payload: Option<Json<PreSignUpRequest>>,
) -> impl IntoResponse {
    let request: PreSignUpRequest = match payload {
        Some(Json(payload)) => payload,
        None => return (StatusCode::BAD_REQUEST, "Missing payload".to_string()).into_response(),
    };

    let response = match request.origin {
        SignUpOrigin::Direct => {
            // Passwordless accounts have nothing to verify besides the email
            // code rounds, so direct sign-ups confirm immediately.
            PreSignUpResponse {
                auto_confirm: true,
                auto_verify_email: true,
                synthetic_email: None,
            }
        }
        SignUpOrigin::ExternalProvider => anonymized_response(&state, &request),
    };

    (StatusCode::OK, Json(response)).into_response()
}

/// Untouched response: the sign-up proceeds through the ordinary email path.
fn pass_through() -> PreSignUpResponse {
    PreSignUpResponse {
        auto_confirm: false,
        auto_verify_email: false,
        synthetic_email: None,
    }
}

fn anonymized_response(state: &HookState, request: &PreSignUpRequest) -> PreSignUpResponse {
    let config = state.config();

    let Some(raw_identities) = request.attributes.get("identities") else {
        return pass_through();
    };

    let identities = match anonymize::parse_identities(raw_identities) {
        Ok(identities) => identities,
        Err(err) => {
            warn!("malformed federated identity payload, skipping anonymization: {err}");
            return pass_through();
        }
    };

    let Some(identity) =
        anonymize::find_provider_identity(&identities, config.external_provider())
    else {
        return pass_through();
    };

    let Some(subject) = anonymize::source_subject(&request.attributes, identity) else {
        warn!(
            provider = %config.external_provider(),
            "federated identity without a usable subject, skipping anonymization"
        );
        return pass_through();
    };

    let anonymized =
        anonymize::anonymize(subject, config.hash_salt(), config.anonymous_domain());

    // The raw subject stays out of the logs; the pseudonym is safe to record.
    info!(
        pseudonym = %anonymized.pseudonym_hash,
        "anonymized federated sign-up"
    );

    PreSignUpResponse {
        auto_confirm: true,
        auto_verify_email: true,
        synthetic_email: Some(anonymized.synthetic_email),
    }
}
