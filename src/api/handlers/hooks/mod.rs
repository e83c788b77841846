//! Hook endpoints for the surrounding identity platform.
//!
//! Each authentication attempt is driven by the platform's event dispatcher:
//! it POSTs one hook invocation per protocol step and consumes the decision.
//! The handlers are stateless; every request carries whatever history the
//! decision needs, so concurrent sessions never share anything here.

pub(crate) mod create_challenge;
pub(crate) mod define_challenge;
pub(crate) mod post_confirmation;
pub(crate) mod pre_sign_up;
pub(crate) mod pre_token;
mod state;
pub(crate) mod types;
pub(crate) mod verify_challenge;

pub use state::{HookConfig, HookState};

#[cfg(test)]
pub(crate) mod testing {
    use anyhow::Result;
    use axum::extract::Extension;
    use axum::response::Response;
    use secrecy::SecretString;
    use std::sync::Arc;

    use super::state::{HookConfig, HookState};
    use crate::api::email::EmailSender;
    use crate::directory::Directory;

    pub fn state() -> Extension<Arc<HookState>> {
        state_with(EmailSender::Log, Directory::Log)
    }

    pub fn state_with(email: EmailSender, directory: Directory) -> Extension<Arc<HookState>> {
        let config = HookConfig::new(SecretString::from("test-salt".to_string()))
            .with_admin_emails(vec!["admin@fagfilm.no".to_string()]);
        Extension(Arc::new(HookState::new(config, email, directory)))
    }

    pub async fn response_json(response: Response) -> Result<serde_json::Value> {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}
