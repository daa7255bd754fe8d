use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::subscriber::Subscriber as DomainSubscriber;

pub const COLUMNS: &str = "id, email, status, created_at";

#[derive(Debug, Clone, Queryable, Selectable, QueryableByName)]
#[diesel(table_name = crate::schema::newsletter_subscribers)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Subscriber {
    pub id: i32,
    pub email: String,
    pub status: String,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::newsletter_subscribers)]
pub struct NewSubscriber<'a> {
    pub email: &'a str,
    pub status: &'a str,
}

impl From<Subscriber> for DomainSubscriber {
    fn from(subscriber: Subscriber) -> Self {
        Self {
            id: subscriber.id,
            email: subscriber.email,
            status: subscriber.status,
            created_at: subscriber.created_at,
        }
    }
}
