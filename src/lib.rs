//! # Adgang (Passwordless Authentication Hooks)
//!
//! `adgang` is the authentication hook service behind the passwordless login
//! flow. The surrounding identity platform dispatches one HTTP call per
//! protocol step and this service answers with a decision; it owns no
//! sessions and no storage of its own.
//!
//! ## Challenge protocol
//!
//! Users sign in with a one-time 6-digit code sent to their email address.
//! Each attempt is a sequence of rounds: the platform sends the full round
//! history, the service decides whether to open a new code round, issue
//! tokens, or terminally fail the attempt after three failed rounds. Codes
//! are bound to a single round and never reused.
//!
//! ## Anonymized federated accounts
//!
//! Sign-ups arriving from the external identity provider never reach the
//! identity store under their provider subject. The subject is folded
//! through a salted hash into a stable synthetic handle
//! (`anon-<hash>@<domain>`), so returning users map to the same account
//! while no reversible personal data is kept.
//!
//! ## Token hygiene
//!
//! Before token issuance every candidate claim set is redacted: identifying
//! claims are stripped and only the (possibly synthetic) email survives,
//! alongside a fresh opaque session id and an `anonymous` marker.

pub mod api;
pub mod auth;
pub mod cli;
pub mod directory;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

pub const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);
