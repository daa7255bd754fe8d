use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::contact_message::{
    ContactMessage as DomainContactMessage, NewContactMessage as DomainNewContactMessage,
};

pub const COLUMNS: &str = "id, full_name, email, country_code, phone_number, interest_topic, \
     message, agreed_to_terms, status, created_at";

#[derive(Debug, Clone, Queryable, Selectable, QueryableByName)]
#[diesel(table_name = crate::schema::contact_messages)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ContactMessage {
    pub id: i32,
    pub full_name: String,
    pub email: String,
    pub country_code: Option<String>,
    pub phone_number: Option<String>,
    pub interest_topic: Option<String>,
    pub message: String,
    pub agreed_to_terms: bool,
    pub status: String,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::contact_messages)]
pub struct NewContactMessage<'a> {
    pub full_name: &'a str,
    pub email: &'a str,
    pub country_code: Option<&'a str>,
    pub phone_number: Option<&'a str>,
    pub interest_topic: Option<&'a str>,
    pub message: &'a str,
    pub agreed_to_terms: bool,
}

impl From<ContactMessage> for DomainContactMessage {
    fn from(message: ContactMessage) -> Self {
        Self {
            id: message.id,
            full_name: message.full_name,
            email: message.email,
            country_code: message.country_code,
            phone_number: message.phone_number,
            interest_topic: message.interest_topic,
            message: message.message,
            agreed_to_terms: message.agreed_to_terms,
            status: message.status,
            created_at: message.created_at,
        }
    }
}

impl<'a> From<&'a DomainNewContactMessage> for NewContactMessage<'a> {
    fn from(message: &'a DomainNewContactMessage) -> Self {
        Self {
            full_name: message.full_name.as_str(),
            email: message.email.as_str(),
            country_code: message.country_code.as_deref(),
            phone_number: message.phone_number.as_deref(),
            interest_topic: message.interest_topic.as_deref(),
            message: message.message.as_str(),
            agreed_to_terms: message.agreed_to_terms,
        }
    }
}
