//! Hook configuration and shared state.

use secrecy::SecretString;

use crate::api::email::EmailSender;
use crate::auth::challenge::DEFAULT_RETRY_BUDGET;
use crate::directory::Directory;

const DEFAULT_ANONYMOUS_DOMAIN: &str = "feide.anonymous";
const DEFAULT_EXTERNAL_PROVIDER: &str = "Feide";
const DEFAULT_ADMIN_GROUP: &str = "admin";
const DEFAULT_FROM_EMAIL: &str = "noreply@fagfilm.no";

/// Configuration injected into the hook handlers.
///
/// Resolved once at startup from the CLI; handlers never read ambient
/// environment state.
#[derive(Clone, Debug)]
pub struct HookConfig {
    hash_salt: SecretString,
    anonymous_domain: String,
    external_provider: String,
    admin_emails: Vec<String>,
    admin_group: String,
    from_email: String,
    retry_budget: u32,
}

impl HookConfig {
    #[must_use]
    pub fn new(hash_salt: SecretString) -> Self {
        Self {
            hash_salt,
            anonymous_domain: DEFAULT_ANONYMOUS_DOMAIN.to_string(),
            external_provider: DEFAULT_EXTERNAL_PROVIDER.to_string(),
            admin_emails: Vec::new(),
            admin_group: DEFAULT_ADMIN_GROUP.to_string(),
            from_email: DEFAULT_FROM_EMAIL.to_string(),
            retry_budget: DEFAULT_RETRY_BUDGET,
        }
    }

    #[must_use]
    pub fn with_anonymous_domain(mut self, domain: String) -> Self {
        self.anonymous_domain = domain;
        self
    }

    #[must_use]
    pub fn with_external_provider(mut self, provider: String) -> Self {
        self.external_provider = provider;
        self
    }

    /// Privileged allow-list; entries are normalized for case-insensitive
    /// matching against confirmed account emails.
    #[must_use]
    pub fn with_admin_emails(mut self, emails: Vec<String>) -> Self {
        self.admin_emails = emails
            .into_iter()
            .map(|email| email.trim().to_lowercase())
            .filter(|email| !email.is_empty())
            .collect();
        self
    }

    #[must_use]
    pub fn with_admin_group(mut self, group: String) -> Self {
        self.admin_group = group;
        self
    }

    #[must_use]
    pub fn with_from_email(mut self, from_email: String) -> Self {
        self.from_email = from_email;
        self
    }

    #[must_use]
    pub fn with_retry_budget(mut self, retry_budget: u32) -> Self {
        self.retry_budget = retry_budget;
        self
    }

    #[must_use]
    pub fn hash_salt(&self) -> &SecretString {
        &self.hash_salt
    }

    #[must_use]
    pub fn anonymous_domain(&self) -> &str {
        &self.anonymous_domain
    }

    #[must_use]
    pub fn external_provider(&self) -> &str {
        &self.external_provider
    }

    #[must_use]
    pub fn admin_group(&self) -> &str {
        &self.admin_group
    }

    #[must_use]
    pub fn from_email(&self) -> &str {
        &self.from_email
    }

    #[must_use]
    pub fn retry_budget(&self) -> u32 {
        self.retry_budget
    }

    /// Whether a normalized email is on the privileged allow-list.
    #[must_use]
    pub fn is_admin_email(&self, email_normalized: &str) -> bool {
        self.admin_emails
            .iter()
            .any(|admin| admin == email_normalized)
    }
}

/// Shared state handed to every hook handler.
pub struct HookState {
    config: HookConfig,
    email: EmailSender,
    directory: Directory,
}

impl HookState {
    #[must_use]
    pub fn new(config: HookConfig, email: EmailSender, directory: Directory) -> Self {
        Self {
            config,
            email,
            directory,
        }
    }

    #[must_use]
    pub fn config(&self) -> &HookConfig {
        &self.config
    }

    #[must_use]
    pub fn email(&self) -> &EmailSender {
        &self.email
    }

    #[must_use]
    pub fn directory(&self) -> &Directory {
        &self.directory
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> HookConfig {
        HookConfig::new(SecretString::from("salt".to_string()))
    }

    #[test]
    fn defaults_match_the_deployment() {
        let config = config();
        assert_eq!(config.anonymous_domain(), "feide.anonymous");
        assert_eq!(config.external_provider(), "Feide");
        assert_eq!(config.admin_group(), "admin");
        assert_eq!(config.from_email(), "noreply@fagfilm.no");
        assert_eq!(config.retry_budget(), DEFAULT_RETRY_BUDGET);
        assert!(!config.is_admin_email("admin@fagfilm.no"));
    }

    #[test]
    fn overrides_apply() {
        let config = config()
            .with_anonymous_domain("anon.example".to_string())
            .with_external_provider("OtherIdp".to_string())
            .with_admin_group("editors".to_string())
            .with_from_email("login@example.com".to_string())
            .with_retry_budget(5);
        assert_eq!(config.anonymous_domain(), "anon.example");
        assert_eq!(config.external_provider(), "OtherIdp");
        assert_eq!(config.admin_group(), "editors");
        assert_eq!(config.from_email(), "login@example.com");
        assert_eq!(config.retry_budget(), 5);
    }

    #[test]
    fn admin_emails_are_normalized() {
        let config = config().with_admin_emails(vec![
            " Admin@Fagfilm.NO ".to_string(),
            String::new(),
            "geirbo@icloud.com".to_string(),
        ]);
        assert!(config.is_admin_email("admin@fagfilm.no"));
        assert!(config.is_admin_email("geirbo@icloud.com"));
        assert!(!config.is_admin_email("someone@else.no"));
    }

    #[test]
    fn state_exposes_parts() {
        let state = HookState::new(config(), EmailSender::Log, crate::directory::Directory::Log);
        assert_eq!(state.config().admin_group(), "admin");
        assert!(matches!(state.email(), EmailSender::Log));
        assert!(matches!(state.directory(), crate::directory::Directory::Log));
    }
}
