//! Identity store admin operations.
//!
//! The identity store itself (account records, groups) is owned by the
//! surrounding platform; this client only drives its admin API. Today that
//! is a single operation, the post-confirmation group membership grant.

use anyhow::{bail, Context, Result};
use secrecy::{ExposeSecret, SecretString};
use serde_json::json;
use std::time::Duration;
use tracing::info;
use url::Url;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Identity store admin client.
///
/// `Log` records the grant and succeeds, for local development and tests.
/// `Http` posts the grant to the platform's admin endpoint, optionally with a
/// bearer token.
pub enum Directory {
    Log,
    Http {
        client: reqwest::Client,
        admin_url: Url,
        token: Option<SecretString>,
    },
}

impl Directory {
    /// Build an HTTP admin client.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn http(admin_url: Url, token: Option<SecretString>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(crate::APP_USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("failed to build directory client")?;

        Ok(Self::Http {
            client,
            admin_url,
            token,
        })
    }

    /// Grant an account membership in a group.
    ///
    /// # Errors
    /// Returns an error when the admin endpoint is unreachable or rejects the
    /// grant. Callers in the hook path log this and carry on; a failed grant
    /// must never fail the sign-up.
    pub async fn add_user_to_group(&self, username: &str, group: &str) -> Result<()> {
        match self {
            Self::Log => {
                info!(username = %username, group = %group, "group grant stub");
                Ok(())
            }
            Self::Http {
                client,
                admin_url,
                token,
            } => {
                let mut request = client
                    .post(admin_url.clone())
                    .json(&json!({ "username": username, "group": group }));
                if let Some(token) = token {
                    request = request.bearer_auth(token.expose_secret());
                }

                let response = request
                    .send()
                    .await
                    .context("failed to reach directory admin endpoint")?;

                if !response.status().is_success() {
                    bail!("directory rejected group grant: {}", response.status());
                }

                Ok(())
            }
        }
    }
}
