use crate::api::{
    self,
    email::EmailSender,
    handlers::hooks::{HookConfig, HookState},
};
use crate::cli::actions::Action;
use crate::directory::Directory;
use anyhow::{Context, Result};
use secrecy::SecretString;
use std::sync::Arc;
use url::Url;

#[derive(Debug)]
pub struct Args {
    pub port: u16,
    pub hash_salt: SecretString,
    pub anonymous_domain: String,
    pub external_provider: String,
    pub admin_emails: Vec<String>,
    pub admin_group: String,
    pub from_email: String,
    pub relay_url: Option<String>,
    pub directory_url: Option<String>,
    pub directory_token: Option<SecretString>,
}

/// Handle the server action
/// # Errors
/// Returns an error if an endpoint URL is invalid or the server fails to start.
pub async fn handle(action: Action) -> Result<()> {
    match action {
        Action::Server(args) => {
            let config = HookConfig::new(args.hash_salt)
                .with_anonymous_domain(args.anonymous_domain)
                .with_external_provider(args.external_provider)
                .with_admin_emails(args.admin_emails)
                .with_admin_group(args.admin_group)
                .with_from_email(args.from_email);

            let email = match args.relay_url {
                Some(relay_url) => {
                    let relay_url = Url::parse(&relay_url)
                        .with_context(|| format!("Invalid relay URL: {relay_url}"))?;
                    EmailSender::http(relay_url)?
                }
                None => EmailSender::Log,
            };

            let directory = match args.directory_url {
                Some(directory_url) => {
                    let admin_url = Url::parse(&directory_url)
                        .with_context(|| format!("Invalid directory URL: {directory_url}"))?;
                    Directory::http(admin_url, args.directory_token)?
                }
                None => Directory::Log,
            };

            let state = Arc::new(HookState::new(config, email, directory));

            api::new(args.port, state).await?;
        }
    }

    Ok(())
}
