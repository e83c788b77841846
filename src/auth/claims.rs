//! Token claim redaction before issuance.
//!
//! Runs once per session, for every session, immediately before the platform
//! mints tokens. Personally identifying claims are stripped, a fresh opaque
//! session identifier is attached for tracking, and the account's (possibly
//! synthetic) email is the only identifying claim that survives.

use serde_json::{Map, Value};
use uuid::Uuid;

/// Personally identifying claims removed from every issued token.
pub const SUPPRESSED_CLAIMS: [&str; 17] = [
    "name",
    "family_name",
    "given_name",
    "preferred_username",
    "nickname",
    "profile",
    "picture",
    "website",
    "gender",
    "birthdate",
    "zoneinfo",
    "locale",
    "updated_at",
    "identities",
    "phone_number",
    "phone_number_verified",
    "address",
];

/// Claim carrying the per-session tracking identifier.
pub const SESSION_ID_CLAIM: &str = "session_id";

/// Marker claim telling consumers the token is anonymized.
pub const ANONYMOUS_CLAIM: &str = "anonymous";

/// Fresh random 128-bit session identifier, lowercase hex.
#[must_use]
pub fn generate_session_id() -> String {
    Uuid::new_v4().simple().to_string()
}

/// Redact a candidate claim set for token issuance.
///
/// Removes every suppressed claim, then injects the session identifier and
/// the anonymous marker. The email claim passes through untouched. Pure
/// aside from the session-id generation.
#[must_use]
pub fn redact(mut claims: Map<String, Value>) -> Map<String, Value> {
    for name in SUPPRESSED_CLAIMS {
        claims.remove(name);
    }

    claims.insert(
        SESSION_ID_CLAIM.to_string(),
        Value::String(generate_session_id()),
    );
    claims.insert(
        ANONYMOUS_CLAIM.to_string(),
        Value::String("true".to_string()),
    );

    claims
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn full_claim_set() -> Map<String, Value> {
        let mut claims = Map::new();
        for name in SUPPRESSED_CLAIMS {
            claims.insert(name.to_string(), json!("sensitive"));
        }
        claims.insert("email".to_string(), json!("anon-abc123@feide.anonymous"));
        claims
    }

    #[test]
    fn redaction_strips_every_suppressed_claim() {
        let redacted = redact(full_claim_set());
        for name in SUPPRESSED_CLAIMS {
            assert!(!redacted.contains_key(name), "claim {name} survived");
        }
    }

    #[test]
    fn redaction_keeps_exactly_email_session_and_marker() {
        let redacted = redact(full_claim_set());
        let mut keys: Vec<&str> = redacted.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(keys, vec![ANONYMOUS_CLAIM, "email", SESSION_ID_CLAIM]);
        assert_eq!(
            redacted.get("email"),
            Some(&json!("anon-abc123@feide.anonymous"))
        );
        assert_eq!(redacted.get(ANONYMOUS_CLAIM), Some(&json!("true")));
    }

    #[test]
    fn session_id_is_fresh_per_invocation() {
        let first = redact(full_claim_set());
        let second = redact(full_claim_set());
        assert_ne!(first.get(SESSION_ID_CLAIM), second.get(SESSION_ID_CLAIM));
    }

    #[test]
    fn session_id_is_opaque_hex() {
        let session_id = generate_session_id();
        assert_eq!(session_id.len(), 32);
        assert!(session_id.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn empty_claim_set_still_gets_session_claims() {
        let redacted = redact(Map::new());
        assert!(redacted.contains_key(SESSION_ID_CLAIM));
        assert_eq!(redacted.get(ANONYMOUS_CLAIM), Some(&json!("true")));
    }
}
