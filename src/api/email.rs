//! Login-code email templates and delivery.
//!
//! Delivery is fire-and-forget from the challenge flow's point of view: the
//! caller logs a failed send and proceeds, so the round and its bound code
//! stay valid even when the relay is down. The default sender for local dev
//! logs instead of sending real email.

use anyhow::{bail, Context, Result};
use serde::Serialize;
use std::time::Duration;
use tracing::info;
use url::Url;

use crate::auth::code::CODE_LENGTH;

const SEND_TIMEOUT: Duration = Duration::from_secs(10);

/// One outbound login-code email.
#[derive(Serialize, Clone, Debug)]
pub struct EmailMessage {
    pub from_email: String,
    pub to_email: String,
    pub subject: String,
    pub text_body: String,
    pub html_body: String,
}

/// Email delivery channel.
///
/// `Log` records the destination and succeeds, for local development and
/// tests. `Http` posts the message JSON to the configured relay endpoint.
pub enum EmailSender {
    Log,
    Http { client: reqwest::Client, relay_url: Url },
}

impl EmailSender {
    /// Build an HTTP relay sender.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn http(relay_url: Url) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(crate::APP_USER_AGENT)
            .timeout(SEND_TIMEOUT)
            .build()
            .context("failed to build email relay client")?;

        Ok(Self::Http { client, relay_url })
    }

    /// Deliver one message.
    ///
    /// # Errors
    /// Returns an error when the relay is unreachable or rejects the message.
    pub async fn send(&self, message: &EmailMessage) -> Result<()> {
        match self {
            Self::Log => {
                // Dev stub: never log the body, it carries the login code.
                info!(
                    to_email = %message.to_email,
                    subject = %message.subject,
                    "email send stub"
                );
                Ok(())
            }
            Self::Http { client, relay_url } => {
                let response = client
                    .post(relay_url.clone())
                    .json(message)
                    .send()
                    .await
                    .context("failed to reach email relay")?;

                if !response.status().is_success() {
                    bail!("email relay rejected message: {}", response.status());
                }

                Ok(())
            }
        }
    }
}

/// Build the login-code message for a destination address.
///
/// Templates are fixed, Norwegian first with an English section below, in
/// both plaintext and rich text. A `locale` of `en` swaps the order; anything
/// else falls back to Norwegian first.
#[must_use]
pub fn login_code_message(
    from_email: &str,
    to_email: &str,
    code: &str,
    locale: Option<&str>,
) -> EmailMessage {
    debug_assert_eq!(code.len(), CODE_LENGTH);

    let english_first = locale.is_some_and(|locale| locale.eq_ignore_ascii_case("en"));

    let subject = if english_first {
        "Your login code / Din innloggingskode"
    } else {
        "Din innloggingskode / Your login code"
    };

    let norwegian_text = format!(
        "Din innloggingskode er: {code}\n\n\
         Denne koden er gyldig i 15 minutter.\n\n\
         Hvis du ikke har bedt om denne koden, kan du ignorere denne e-posten."
    );
    let english_text = format!(
        "Your login code is: {code}\n\n\
         The code is valid for 15 minutes.\n\n\
         If you did not request this code, you can ignore this email."
    );
    let text_body = if english_first {
        format!("{english_text}\n\n---\n\n{norwegian_text}")
    } else {
        format!("{norwegian_text}\n\n---\n\n{english_text}")
    };

    let (first_heading, second_heading) = if english_first {
        ("Your login code is:", "Din innloggingskode er:")
    } else {
        ("Din innloggingskode er:", "Your login code is:")
    };
    let html_body = format!(
        r#"<div style="font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto;">
  <p>{first_heading}</p>
  <div style="background-color: #f4f4f4; padding: 20px; text-align: center; margin: 20px 0;">
    <h1 style="font-size: 36px; letter-spacing: 8px; margin: 0;">{code}</h1>
  </div>
  <p>{second_heading} {code}</p>
  <p>Denne koden er gyldig i 15 minutter. / The code is valid for 15 minutes.</p>
  <hr style="border: none; border-top: 1px solid #ddd; margin: 30px 0;">
  <p style="font-size: 12px; color: #666;">Dette er en automatisk generert e-post. Vennligst ikke svar p&aring; denne meldingen.</p>
</div>"#
    );

    EmailMessage {
        from_email: from_email.to_string(),
        to_email: to_email.to_string(),
        subject: subject.to_string(),
        text_body,
        html_body,
    }
}
