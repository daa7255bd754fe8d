use serde::Deserialize;
use serde_json::Value;

use crate::domain::contact_message::NewContactMessage;
use crate::domain::types::EmailAddress;
use crate::forms::{FormError, optional, present};

pub const CONTACT_REQUIRED: &str = "Full name, email, and message are required";
pub const CONTACT_INVALID_EMAIL: &str = "Valid email address is required";
pub const TERMS_NOT_ACCEPTED: &str = "You must agree to the terms and conditions";
pub const STATUS_REQUIRED: &str = "Status is required";

/// JSON body of `POST /contact/submit`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ContactForm {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub country_code: Option<String>,
    pub phone_number: Option<String>,
    pub interest_topic: Option<String>,
    pub message: Option<String>,
    /// Only `true` or `"true"` count as consent; absent means consent.
    pub agreed_to_terms: Option<Value>,
}

fn agreed(value: Option<&Value>) -> bool {
    match value {
        None => true,
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => s == "true",
        Some(_) => false,
    }
}

impl TryFrom<ContactForm> for NewContactMessage {
    type Error = FormError;

    fn try_from(form: ContactForm) -> Result<Self, Self::Error> {
        let (Some(full_name), Some(email), Some(message)) = (
            present(form.full_name),
            present(form.email),
            present(form.message),
        ) else {
            return Err(FormError::MissingFields(CONTACT_REQUIRED));
        };

        let email = EmailAddress::new(email.into_inner())
            .map_err(|_| FormError::Invalid(CONTACT_INVALID_EMAIL))?;

        if !agreed(form.agreed_to_terms.as_ref()) {
            return Err(FormError::Invalid(TERMS_NOT_ACCEPTED));
        }

        Ok(NewContactMessage {
            full_name,
            email,
            country_code: optional(form.country_code),
            phone_number: optional(form.phone_number),
            interest_topic: optional(form.interest_topic),
            message,
            agreed_to_terms: true,
        })
    }
}

/// JSON body of `PUT /contact/{id}/status`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ContactStatusForm {
    pub status: Option<String>,
}

impl ContactStatusForm {
    pub fn into_status(self) -> Result<String, FormError> {
        optional(self.status).ok_or(FormError::MissingFields(STATUS_REQUIRED))
    }
}
