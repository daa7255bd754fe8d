use diesel::dsl::count_star;
use diesel::prelude::*;
use serde_json::{Map, Value};

use crate::domain::contact_message::{ContactMessage, ContactStats, NewContactMessage};
use crate::domain::types::ContactMessageId;
use crate::models::contact_message::{
    self as db, ContactMessage as DbContactMessage, NewContactMessage as DbNewContactMessage,
};
use crate::pagination::Page;
use crate::query::{
    ColumnType, FilterField, FilteredQuery, ListSpec, SqlValue, UpdatableField, UpdateSpec,
    UpdateStatement,
};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{
    ContactReader, ContactWriter, DieselRepository, ListQuery, load_page, run_update, tally,
};
use crate::schema::contact_messages;

const CONTACT_FILTERS: &[FilterField] = &[
    FilterField::equals("status", ColumnType::Text),
    FilterField::equals("interest_topic", ColumnType::Text),
    FilterField::substring("search", &["full_name", "email"]),
];

pub const CONTACT_LIST: ListSpec = ListSpec {
    table: "contact_messages",
    columns: db::COLUMNS,
    scope: None,
    filters: CONTACT_FILTERS,
    order_by: "created_at DESC, id DESC",
    default_limit: 10,
};

/// Only the workflow status of a submission can change.
pub const CONTACT_UPDATE: UpdateSpec = UpdateSpec {
    table: "contact_messages",
    key_column: "id",
    fields: &[UpdatableField::new("status", ColumnType::Text)],
    touch: None,
    returning: db::COLUMNS,
};

impl ContactReader for DieselRepository {
    fn get_contact_message_by_id(
        &self,
        id: ContactMessageId,
    ) -> RepositoryResult<Option<ContactMessage>> {
        let mut conn = self.conn()?;
        let message = contact_messages::table
            .find(id.get())
            .select(DbContactMessage::as_select())
            .first(&mut conn)
            .optional()?;
        Ok(message.map(Into::into))
    }

    fn list_contact_messages(&self, query: &ListQuery) -> RepositoryResult<Page<ContactMessage>> {
        let filtered = FilteredQuery::build(&CONTACT_LIST, query.params())?;
        let mut conn = self.conn()?;
        load_page::<DbContactMessage, ContactMessage>(&mut conn, &filtered)
    }

    fn contact_stats(&self) -> RepositoryResult<ContactStats> {
        let mut conn = self.conn()?;
        let rows = contact_messages::table
            .group_by(contact_messages::status)
            .select((contact_messages::status, count_star()))
            .load::<(String, i64)>(&mut conn)?;

        let (total, by_status) = tally(rows);
        let count = |status: &str| by_status.get(status).copied().unwrap_or_default();

        Ok(ContactStats {
            total,
            new: count("new"),
            responded: count("responded"),
            resolved: count("resolved"),
        })
    }
}

impl ContactWriter for DieselRepository {
    fn create_contact_message(
        &self,
        message: &NewContactMessage,
    ) -> RepositoryResult<ContactMessage> {
        let mut conn = self.conn()?;
        let created = diesel::insert_into(contact_messages::table)
            .values(DbNewContactMessage::from(message))
            .returning(DbContactMessage::as_returning())
            .get_result(&mut conn)?;
        Ok(created.into())
    }

    fn update_contact_message(
        &self,
        id: ContactMessageId,
        payload: &Map<String, Value>,
    ) -> RepositoryResult<ContactMessage> {
        let statement = UpdateStatement::build(
            &CONTACT_UPDATE,
            payload,
            SqlValue::Integer(Some(i64::from(id.get()))),
        )?;
        let mut conn = self.conn()?;
        run_update::<DbContactMessage, ContactMessage>(&mut conn, &statement)
    }

    fn delete_contact_message(&self, id: ContactMessageId) -> RepositoryResult<ContactMessage> {
        let mut conn = self.conn()?;
        let deleted = diesel::delete(contact_messages::table.find(id.get()))
            .returning(DbContactMessage::as_returning())
            .get_result(&mut conn)
            .optional()?;
        deleted.map(Into::into).ok_or(RepositoryError::NotFound)
    }
}
