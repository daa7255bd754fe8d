use serde::Deserialize;

use crate::domain::types::EmailAddress;
use crate::forms::{FormError, present};

pub const SUBSCRIBE_INVALID_EMAIL: &str = "Valid email is required";
pub const EMAIL_REQUIRED: &str = "Email is required";

/// JSON body shared by the subscribe, confirm and unsubscribe endpoints.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct NewsletterForm {
    pub email: Option<String>,
}

impl NewsletterForm {
    /// Validation used by `subscribe`: the address must be well formed.
    pub fn subscription_email(self) -> Result<EmailAddress, FormError> {
        present(self.email)
            .and_then(|email| EmailAddress::new(email.into_inner()).ok())
            .ok_or(FormError::Invalid(SUBSCRIBE_INVALID_EMAIL))
    }

    /// Validation used by `confirm` and `unsubscribe`. An address that cannot
    /// be valid is treated as unknown by the caller.
    pub fn lookup_email(self) -> Result<Option<EmailAddress>, FormError> {
        let email = present(self.email).ok_or(FormError::MissingFields(EMAIL_REQUIRED))?;
        Ok(EmailAddress::new(email.into_inner()).ok())
    }
}
