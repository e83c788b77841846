//! Challenge protocol state machine.
//!
//! Each authentication attempt is a sequence of rounds. The surrounding
//! identity platform calls [`decide`] once per round trip with the full
//! history; the returned [`Decision`] tells it whether to open a new email
//! code round, issue tokens, or stop the attempt. The machine itself keeps no
//! state between calls and never rewrites history, it only reads it.

use serde::{Deserialize, Serialize};
use tracing::warn;
use utoipa::ToSchema;

/// Failed email code rounds tolerated before the attempt is terminally failed.
pub const DEFAULT_RETRY_BUDGET: u32 = 3;

/// Round kinds as tagged by the identity platform.
///
/// `SRP_A` and `PASSWORD_VERIFIER` are legacy initial factors that can appear
/// at the head of a session when a client starts a password-style flow; they
/// are skipped in favor of the email code round. Tags this service does not
/// know deserialize to `Unknown` so a platform version mismatch degrades to a
/// fresh challenge instead of a rejected request.
#[derive(ToSchema, Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(from = "String")]
pub enum ChallengeKind {
    #[serde(rename = "CUSTOM_CHALLENGE")]
    CustomChallenge,
    #[serde(rename = "SRP_A")]
    SrpA,
    #[serde(rename = "PASSWORD_VERIFIER")]
    PasswordVerifier,
    #[serde(rename = "UNKNOWN")]
    Unknown,
}

impl From<String> for ChallengeKind {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "CUSTOM_CHALLENGE" => Self::CustomChallenge,
            "SRP_A" => Self::SrpA,
            "PASSWORD_VERIFIER" => Self::PasswordVerifier,
            _ => Self::Unknown,
        }
    }
}

/// Outcome of a single round. A round starts `Pending` and settles exactly
/// once; settled results are never rewritten.
#[derive(ToSchema, Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RoundResult {
    #[default]
    #[serde(rename = "PENDING")]
    Pending,
    #[serde(rename = "SUCCEEDED")]
    Succeeded,
    #[serde(rename = "FAILED")]
    Failed,
}

/// One challenge/response exchange within a session, in temporal order.
#[derive(ToSchema, Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChallengeRound {
    pub kind: ChallengeKind,
    #[serde(default)]
    pub result: RoundResult,
}

/// What the platform should do next with this authentication attempt.
#[derive(ToSchema, Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct Decision {
    pub issue_tokens: bool,
    pub fail_authentication: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_challenge: Option<ChallengeKind>,
}

impl Decision {
    fn challenge() -> Self {
        Self {
            issue_tokens: false,
            fail_authentication: false,
            next_challenge: Some(ChallengeKind::CustomChallenge),
        }
    }

    fn tokens() -> Self {
        Self {
            issue_tokens: true,
            fail_authentication: false,
            next_challenge: None,
        }
    }

    fn fail() -> Self {
        Self {
            issue_tokens: false,
            fail_authentication: true,
            next_challenge: None,
        }
    }

    fn defer() -> Self {
        Self {
            issue_tokens: false,
            fail_authentication: false,
            next_challenge: None,
        }
    }
}

/// Decide the next step for an authentication attempt.
///
/// Evaluated once per round trip against the full round history:
///
/// 1. Unknown users are deferred to the sign-up path. Not a failure.
/// 2. An empty history opens round one.
/// 3. Once `retry_budget` email code rounds have failed, the attempt is
///    terminally failed. The budget is checked before the most recent round's
///    own result so a budget-exhausting failure cannot buy one more retry.
/// 4. Otherwise the last round drives the step: a solved code round issues
///    tokens, a failed one opens a new round with a fresh code, and a legacy
///    initial factor is treated as not yet answered.
/// 5. Any other combination opens a fresh round rather than failing, and is
///    logged so operators can spot a platform/state-machine version mismatch.
#[must_use]
pub fn decide(user_exists: bool, rounds: &[ChallengeRound], retry_budget: u32) -> Decision {
    if !user_exists {
        return Decision::defer();
    }

    let Some(last) = rounds.last() else {
        return Decision::challenge();
    };

    let failures = rounds
        .iter()
        .filter(|round| {
            round.kind == ChallengeKind::CustomChallenge && round.result == RoundResult::Failed
        })
        .count();
    if u32::try_from(failures).unwrap_or(u32::MAX) >= retry_budget {
        return Decision::fail();
    }

    match (last.kind, last.result) {
        (ChallengeKind::CustomChallenge, RoundResult::Succeeded) => Decision::tokens(),
        (ChallengeKind::CustomChallenge, RoundResult::Failed) => Decision::challenge(),
        (ChallengeKind::SrpA | ChallengeKind::PasswordVerifier, _) => Decision::challenge(),
        (kind, result) => {
            warn!(
                kind = ?kind,
                result = ?result,
                "unexpected round in session history, issuing a fresh challenge"
            );
            Decision::challenge()
        }
    }
}
