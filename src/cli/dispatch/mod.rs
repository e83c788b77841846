use crate::cli::actions::{server, Action};
use anyhow::{Context, Result};
use secrecy::SecretString;

/// Map parsed CLI matches onto an action.
///
/// # Errors
/// Returns an error if required arguments are missing.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    let hash_salt = matches
        .get_one::<String>("hash-salt")
        .cloned()
        .map(SecretString::from)
        .context("missing required argument: --hash-salt")?;

    let admin_emails = matches
        .get_one::<String>("admin-emails")
        .map(|list| {
            list.split(',')
                .map(str::trim)
                .filter(|email| !email.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    let get = |name: &str| -> Option<String> { matches.get_one::<String>(name).cloned() };

    Ok(Action::Server(server::Args {
        port: matches.get_one::<u16>("port").copied().unwrap_or(8080),
        hash_salt,
        anonymous_domain: get("anonymous-domain")
            .context("missing argument: --anonymous-domain")?,
        external_provider: get("external-provider")
            .context("missing argument: --external-provider")?,
        admin_emails,
        admin_group: get("admin-group").context("missing argument: --admin-group")?,
        from_email: get("from-email").context("missing argument: --from-email")?,
        relay_url: get("relay-url"),
        directory_url: get("directory-url"),
        directory_token: get("directory-token").map(SecretString::from),
    }))
}
