//! Request/response types for the hook endpoints.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use utoipa::ToSchema;

use crate::auth::challenge::ChallengeRound;

/// Where a sign-up originated.
#[derive(ToSchema, Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum SignUpOrigin {
    /// Federated sign-up through the configured external provider.
    #[serde(rename = "EXTERNAL_PROVIDER")]
    ExternalProvider,
    /// Ordinary email sign-up.
    #[serde(rename = "DIRECT")]
    Direct,
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct PreSignUpRequest {
    pub origin: SignUpOrigin,
    /// Raw sign-up attributes. Federated sign-ups carry the provider identity
    /// list as a JSON string under `identities`.
    #[serde(default)]
    pub attributes: HashMap<String, String>,
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct PreSignUpResponse {
    pub auto_confirm: bool,
    pub auto_verify_email: bool,
    /// Pseudonymous account handle for anonymized federated sign-ups; the
    /// platform stores the account under this address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub synthetic_email: Option<String>,
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct DefineChallengeRequest {
    pub user_exists: bool,
    #[serde(default)]
    pub rounds: Vec<ChallengeRound>,
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct CreateChallengeRequest {
    /// Destination address for the login code.
    pub email: String,
    /// Preferred template language; unknown values fall back to Norwegian.
    #[serde(default)]
    pub locale: Option<String>,
}

/// Parameters visible to the client. The email code challenge exposes none.
#[derive(ToSchema, Serialize, Deserialize, Debug, Default)]
pub struct PublicChallengeParameters {}

/// Parameters bound to the round, visible only to the platform. Destroyed
/// with the round.
#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct PrivateChallengeParameters {
    pub code: String,
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct CreateChallengeResponse {
    pub public_parameters: PublicChallengeParameters,
    pub private_parameters: PrivateChallengeParameters,
    /// Round marker for the platform's session log. Never carries the code.
    pub challenge_metadata: String,
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct VerifyChallengeRequest {
    /// The code bound to the open round.
    pub code: String,
    /// What the user submitted.
    pub answer: String,
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct VerifyChallengeResponse {
    pub answer_correct: bool,
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct PreTokenRequest {
    /// Full candidate claim set for the token about to be issued.
    #[schema(value_type = Object)]
    pub claims: serde_json::Map<String, serde_json::Value>,
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct PreTokenResponse {
    /// Redacted claim set to attach to the token.
    #[schema(value_type = Object)]
    pub claims: serde_json::Map<String, serde_json::Value>,
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct PostConfirmationRequest {
    /// Account identifier in the identity store.
    pub username: String,
    pub email: String,
}
