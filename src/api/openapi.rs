//! `OpenAPI` document for the hook API.

use utoipa::OpenApi;

use crate::api::handlers::{health, hooks};
use crate::auth::challenge;

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health,
        hooks::pre_sign_up::pre_sign_up,
        hooks::define_challenge::define_challenge,
        hooks::create_challenge::create_challenge,
        hooks::verify_challenge::verify_challenge,
        hooks::pre_token::pre_token,
        hooks::post_confirmation::post_confirmation,
    ),
    components(schemas(
        challenge::ChallengeKind,
        challenge::ChallengeRound,
        challenge::Decision,
        challenge::RoundResult,
        hooks::types::CreateChallengeRequest,
        hooks::types::CreateChallengeResponse,
        hooks::types::DefineChallengeRequest,
        hooks::types::PostConfirmationRequest,
        hooks::types::PreSignUpRequest,
        hooks::types::PreSignUpResponse,
        hooks::types::PreTokenRequest,
        hooks::types::PreTokenResponse,
        hooks::types::PrivateChallengeParameters,
        hooks::types::PublicChallengeParameters,
        hooks::types::SignUpOrigin,
        hooks::types::VerifyChallengeRequest,
        hooks::types::VerifyChallengeResponse,
    )),
    tags(
        (name = "hooks", description = "Passwordless authentication hooks"),
        (name = "health", description = "Service health")
    )
)]
pub struct ApiDoc;
