//! Pseudonymous identities for external-provider sign-ups.
//!
//! Accounts arriving from the federated provider must never land in the
//! identity store under their provider-issued subject. The subject is folded
//! through a salted hash into a stable pseudonym, and the pseudonym becomes
//! an email-shaped handle because the store keys accounts by email. The same
//! subject always maps to the same handle, so a returning user resolves to
//! the existing account without the raw subject ever being stored.

use anyhow::{Context, Result};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use sha2::{Digest, Sha256};
use std::collections::HashMap;

/// Synthetic account handles look like `anon-<hash>@<domain>`.
pub const PSEUDONYM_PREFIX: &str = "anon-";

/// Hex characters of the subject digest kept in the pseudonym.
const PSEUDONYM_HASH_LENGTH: usize = 16;

/// One entry of the platform's federated-identity list. The list arrives as a
/// JSON string attribute, one object per linked provider.
#[derive(Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct FederatedIdentity {
    pub provider_name: String,
    #[serde(default)]
    pub user_id: Option<String>,
}

/// A derived pseudonymous account identity. Carries no reversible personal
/// data; the source subject is consumed during derivation and dropped.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnonymizedIdentity {
    pub pseudonym_hash: String,
    pub synthetic_email: String,
}

/// Parse the raw `identities` attribute into its federated identity list.
///
/// # Errors
/// Returns an error if the attribute is not a JSON identity array.
pub fn parse_identities(raw: &str) -> Result<Vec<FederatedIdentity>> {
    serde_json::from_str(raw).context("failed to parse federated identity list")
}

/// Select the identity issued by the configured external provider, if any.
#[must_use]
pub fn find_provider_identity<'a>(
    identities: &'a [FederatedIdentity],
    provider_name: &str,
) -> Option<&'a FederatedIdentity> {
    identities
        .iter()
        .find(|identity| identity.provider_name == provider_name)
}

/// Pick the provider-issued subject out of the sign-up attributes.
///
/// The provider maps its subject onto the `email` attribute; the identity's
/// own `userId` and the bare `sub` attribute are fallbacks. Empty values are
/// treated as absent.
#[must_use]
pub fn source_subject<'a>(
    attributes: &'a HashMap<String, String>,
    identity: &'a FederatedIdentity,
) -> Option<&'a str> {
    attributes
        .get("email")
        .map(String::as_str)
        .filter(|value| !value.is_empty())
        .or_else(|| identity.user_id.as_deref().filter(|value| !value.is_empty()))
        .or_else(|| {
            attributes
                .get("sub")
                .map(String::as_str)
                .filter(|value| !value.is_empty())
        })
}

/// Derive the stable pseudonymous identity for a provider subject.
///
/// `hash = hex(sha256(subject || salt))[..16]`, handle
/// `anon-<hash>@<domain>`. Deterministic: the same subject and salt always
/// produce the same handle.
#[must_use]
pub fn anonymize(
    source_subject: &str,
    salt: &SecretString,
    anonymous_domain: &str,
) -> AnonymizedIdentity {
    let mut hasher = Sha256::new();
    hasher.update(source_subject.as_bytes());
    hasher.update(salt.expose_secret().as_bytes());
    let digest = hasher.finalize();

    let pseudonym_hash: String = digest
        .iter()
        .take(PSEUDONYM_HASH_LENGTH / 2)
        .map(|byte| format!("{byte:02x}"))
        .collect();
    let synthetic_email = format!("{PSEUDONYM_PREFIX}{pseudonym_hash}@{anonymous_domain}");

    AnonymizedIdentity {
        pseudonym_hash,
        synthetic_email,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;

    const SUBJECT: &str = "76a7a061-3c55-430d-8ee0-6f82ec42501f";

    fn salt() -> SecretString {
        SecretString::from("test-salt".to_string())
    }

    #[test]
    fn anonymize_is_deterministic() {
        let first = anonymize(SUBJECT, &salt(), "feide.anonymous");
        let second = anonymize(SUBJECT, &salt(), "feide.anonymous");
        assert_eq!(first, second);
    }

    #[test]
    fn different_subjects_get_different_handles() {
        let first = anonymize(SUBJECT, &salt(), "feide.anonymous");
        let second = anonymize("other-subject", &salt(), "feide.anonymous");
        assert_ne!(first.synthetic_email, second.synthetic_email);
    }

    #[test]
    fn different_salts_get_different_handles() {
        let first = anonymize(SUBJECT, &salt(), "feide.anonymous");
        let second = anonymize(
            SUBJECT,
            &SecretString::from("another-salt".to_string()),
            "feide.anonymous",
        );
        assert_ne!(first.pseudonym_hash, second.pseudonym_hash);
    }

    #[test]
    fn handle_shape_is_prefix_hash_domain() {
        let identity = anonymize(SUBJECT, &salt(), "feide.anonymous");
        assert_eq!(identity.pseudonym_hash.len(), 16);
        assert!(identity
            .pseudonym_hash
            .chars()
            .all(|c| c.is_ascii_hexdigit()));
        assert_eq!(
            identity.synthetic_email,
            format!("anon-{}@feide.anonymous", identity.pseudonym_hash)
        );
    }

    #[test]
    fn output_does_not_leak_the_subject() {
        let identity = anonymize(SUBJECT, &salt(), "feide.anonymous");
        assert!(!identity.synthetic_email.contains(SUBJECT));

        // No 8-char window of the subject may survive into the handle beyond
        // the fixed prefix/domain literals.
        let derived = identity
            .synthetic_email
            .trim_start_matches(PSEUDONYM_PREFIX)
            .trim_end_matches("@feide.anonymous");
        for window in SUBJECT.as_bytes().windows(8) {
            let window = std::str::from_utf8(window).unwrap_or_default();
            assert!(!derived.contains(window), "leaked subject window {window}");
        }
    }

    #[test]
    fn parse_identities_accepts_provider_list() -> Result<()> {
        let identities = parse_identities(
            r#"[{"providerName":"Feide","userId":"abc-123","providerType":"OIDC"}]"#,
        )?;
        assert_eq!(identities.len(), 1);
        assert_eq!(identities[0].provider_name, "Feide");
        assert_eq!(identities[0].user_id.as_deref(), Some("abc-123"));
        Ok(())
    }

    #[test]
    fn parse_identities_rejects_garbage() {
        assert!(parse_identities("not json").is_err());
        assert!(parse_identities(r#"{"providerName":"Feide"}"#).is_err());
    }

    #[test]
    fn find_provider_identity_matches_exact_name() -> Result<()> {
        let identities = parse_identities(
            r#"[{"providerName":"Google"},{"providerName":"Feide","userId":"u1"}]"#,
        )?;
        let found = find_provider_identity(&identities, "Feide");
        assert_eq!(found.and_then(|id| id.user_id.as_deref()), Some("u1"));
        assert!(find_provider_identity(&identities, "feide").is_none());
        Ok(())
    }

    #[test]
    fn source_subject_prefers_email_then_user_id_then_sub() {
        let identity = FederatedIdentity {
            provider_name: "Feide".to_string(),
            user_id: Some("provider-uid".to_string()),
        };

        let mut attributes = HashMap::new();
        attributes.insert("email".to_string(), SUBJECT.to_string());
        attributes.insert("sub".to_string(), "pool-sub".to_string());
        assert_eq!(source_subject(&attributes, &identity), Some(SUBJECT));

        attributes.insert("email".to_string(), String::new());
        assert_eq!(source_subject(&attributes, &identity), Some("provider-uid"));

        let identity = FederatedIdentity {
            provider_name: "Feide".to_string(),
            user_id: None,
        };
        assert_eq!(source_subject(&attributes, &identity), Some("pool-sub"));

        attributes.remove("sub");
        assert_eq!(source_subject(&attributes, &identity), None);
    }
}
