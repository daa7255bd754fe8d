use diesel::dsl::count_star;
use diesel::prelude::*;

use crate::domain::subscriber::{
    STATUS_ACTIVE, STATUS_PENDING, STATUS_UNSUBSCRIBED, Subscriber, SubscriberStats,
};
use crate::domain::types::EmailAddress;
use crate::models::subscriber::{self as db, NewSubscriber, Subscriber as DbSubscriber};
use crate::pagination::Page;
use crate::query::{ColumnType, FilterField, FilteredQuery, ListSpec};
use crate::repository::errors::RepositoryResult;
use crate::repository::{
    DieselRepository, ListQuery, SubscriberReader, SubscriberWriter, load_page, tally,
};
use crate::schema::newsletter_subscribers;

const SUBSCRIBER_FILTERS: &[FilterField] = &[
    FilterField::equals("status", ColumnType::Text),
    FilterField::substring("search", &["email"]),
];

pub const SUBSCRIBER_LIST: ListSpec = ListSpec {
    table: "newsletter_subscribers",
    columns: db::COLUMNS,
    scope: None,
    filters: SUBSCRIBER_FILTERS,
    order_by: "created_at DESC, id DESC",
    default_limit: 20,
};

impl SubscriberReader for DieselRepository {
    fn get_subscriber_by_email(
        &self,
        email: &EmailAddress,
    ) -> RepositoryResult<Option<Subscriber>> {
        let mut conn = self.conn()?;
        let subscriber = newsletter_subscribers::table
            .filter(newsletter_subscribers::email.eq(email.as_str()))
            .select(DbSubscriber::as_select())
            .first(&mut conn)
            .optional()?;
        Ok(subscriber.map(Into::into))
    }

    fn list_subscribers(&self, query: &ListQuery) -> RepositoryResult<Page<Subscriber>> {
        let filtered = FilteredQuery::build(&SUBSCRIBER_LIST, query.params())?;
        let mut conn = self.conn()?;
        load_page::<DbSubscriber, Subscriber>(&mut conn, &filtered)
    }

    fn subscriber_stats(&self) -> RepositoryResult<SubscriberStats> {
        let mut conn = self.conn()?;
        let rows = newsletter_subscribers::table
            .group_by(newsletter_subscribers::status)
            .select((newsletter_subscribers::status, count_star()))
            .load::<(String, i64)>(&mut conn)?;

        let (total, by_status) = tally(rows);
        let count = |status: &str| by_status.get(status).copied().unwrap_or_default();

        Ok(SubscriberStats {
            total,
            active: count(STATUS_ACTIVE),
            pending: count(STATUS_PENDING),
            unsubscribed: count(STATUS_UNSUBSCRIBED),
        })
    }
}

impl SubscriberWriter for DieselRepository {
    fn create_subscriber(&self, email: &EmailAddress) -> RepositoryResult<Subscriber> {
        let mut conn = self.conn()?;
        let created = diesel::insert_into(newsletter_subscribers::table)
            .values(NewSubscriber {
                email: email.as_str(),
                status: STATUS_ACTIVE,
            })
            .returning(DbSubscriber::as_returning())
            .get_result(&mut conn)?;
        Ok(created.into())
    }

    fn unsubscribe(&self, email: &EmailAddress) -> RepositoryResult<Option<Subscriber>> {
        let mut conn = self.conn()?;
        let updated = diesel::update(
            newsletter_subscribers::table.filter(newsletter_subscribers::email.eq(email.as_str())),
        )
        .set(newsletter_subscribers::status.eq(STATUS_UNSUBSCRIBED))
        .returning(DbSubscriber::as_returning())
        .get_result(&mut conn)
        .optional()?;
        Ok(updated.map(Into::into))
    }
}
