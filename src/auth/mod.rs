//! Passwordless authentication core: challenge protocol, code generation,
//! pseudonymous identities, and token claim redaction.
//!
//! Everything in here is pure decision logic; delivery and identity-store
//! side effects live behind the `api` and `directory` modules.

pub mod anonymize;
pub mod challenge;
pub mod claims;
pub mod code;
pub mod verify;
