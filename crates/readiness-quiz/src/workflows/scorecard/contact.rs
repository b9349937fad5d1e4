use crate::config::ScorecardConfig;
use serde::Serialize;
use url::form_urlencoded::byte_serialize;
use url::Url;

/// Pre-addressed "book a meeting" message offered on the results page.
///
/// Only describes the message; opening a mail composer is left to whoever
/// renders the report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactInvitation {
    recipient: String,
    subject: String,
    mailto: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ContactError {
    #[error("'{0}' is not a usable contact address")]
    InvalidRecipient(String),
    #[error("contact link is not a valid URI: {0}")]
    Uri(#[from] url::ParseError),
}

impl ContactInvitation {
    pub fn new(recipient: &str, subject: &str) -> Result<Self, ContactError> {
        let recipient = recipient.trim();
        match recipient.split_once('@') {
            Some((local, domain))
                if !local.is_empty()
                    && !domain.is_empty()
                    && !recipient.contains(['?', '&', ' ']) => {}
            _ => return Err(ContactError::InvalidRecipient(recipient.to_string())),
        }

        // byte_serialize uses form encoding; mail clients expect %20 for spaces.
        let encoded_subject = byte_serialize(subject.as_bytes())
            .collect::<String>()
            .replace('+', "%20");
        let uri = Url::parse(&format!("mailto:{recipient}?subject={encoded_subject}"))?;

        Ok(Self {
            recipient: recipient.to_string(),
            subject: subject.to_string(),
            mailto: uri.to_string(),
        })
    }

    pub fn from_config(config: &ScorecardConfig) -> Result<Self, ContactError> {
        Self::new(&config.contact_email, &config.contact_subject)
    }

    pub fn recipient(&self) -> &str {
        &self.recipient
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn mailto(&self) -> &str {
        &self.mailto
    }
}
