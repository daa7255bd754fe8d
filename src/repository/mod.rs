use std::collections::HashMap;

use diesel::prelude::*;
use diesel::query_builder::{BoxedSqlQuery, SqlQuery};
use diesel::sql_types::{BigInt, Bool, Double, Nullable, Text};
use diesel::sqlite::Sqlite;
use serde_json::{Map, Value};

use crate::db::{DbConnection, DbPool};
use crate::domain::blog::{Blog, NewBlog};
use crate::domain::contact_message::{ContactMessage, ContactStats, NewContactMessage};
use crate::domain::course::{Course, NewCourse};
use crate::domain::image::{Image, NewImage};
use crate::domain::subscriber::{Subscriber, SubscriberStats};
use crate::domain::types::{BlogId, ContactMessageId, CourseId, EmailAddress, ImageId, UserId};
use crate::domain::user::{NewUser, User};
use crate::models::RowCount;
use crate::pagination::Page;
use crate::query::{FilteredQuery, SqlValue, UpdateStatement};
use crate::repository::errors::{RepositoryError, RepositoryResult};

pub mod blog;
pub mod contact;
pub mod course;
pub mod errors;
pub mod image;
#[cfg(any(test, feature = "test-mocks"))]
pub mod mock;
pub mod newsletter;
pub mod user;

/// Raw query-string parameters of a list request.
///
/// Only names present in a resource's filter allow-list have any effect;
/// `page` and `limit` drive pagination.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListQuery {
    params: HashMap<String, String>,
}

impl ListQuery {
    pub fn new(params: HashMap<String, String>) -> Self {
        Self { params }
    }

    /// Sets a parameter, replacing any caller-supplied value.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }

    pub fn params(&self) -> &HashMap<String, String> {
        &self.params
    }
}

impl From<HashMap<String, String>> for ListQuery {
    fn from(params: HashMap<String, String>) -> Self {
        Self::new(params)
    }
}

/// Diesel-backed implementation of every repository trait.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool,
}

impl DieselRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(self.pool.get()?)
    }
}

impl HealthCheck for DieselRepository {
    fn ping(&self) -> RepositoryResult<()> {
        let mut conn = self.conn()?;
        diesel::sql_query("SELECT 1").execute(&mut conn)?;
        Ok(())
    }
}

fn bind_values<'f>(
    query: BoxedSqlQuery<'f, Sqlite, SqlQuery>,
    params: &[SqlValue],
) -> BoxedSqlQuery<'f, Sqlite, SqlQuery> {
    params
        .iter()
        .cloned()
        .fold(query, |query, value| match value {
            SqlValue::Text(v) => query.bind::<Nullable<Text>, _>(v),
            SqlValue::Integer(v) => query.bind::<Nullable<BigInt>, _>(v),
            SqlValue::Bool(v) => query.bind::<Nullable<Bool>, _>(v),
            SqlValue::Float(v) => query.bind::<Nullable<Double>, _>(v),
        })
}

/// Runs the count and fetch statements of `query` on one connection.
fn load_page<M, T>(conn: &mut SqliteConnection, query: &FilteredQuery) -> RepositoryResult<Page<T>>
where
    M: QueryableByName<Sqlite> + 'static,
    T: From<M>,
{
    let total = bind_values(
        diesel::sql_query(query.count_sql.as_str()).into_boxed(),
        query.count_params(),
    )
    .get_result::<RowCount>(conn)?
    .count;

    let rows = bind_values(
        diesel::sql_query(query.select_sql.as_str()).into_boxed(),
        &query.select_params(),
    )
    .load::<M>(conn)?;

    Ok(Page::new(
        rows.into_iter().map(T::from).collect(),
        query.page,
        usize::try_from(total).unwrap_or_default(),
    ))
}

/// Executes an `UPDATE ... RETURNING` statement; no returned row means the
/// key did not match.
fn run_update<M, T>(conn: &mut SqliteConnection, statement: &UpdateStatement) -> RepositoryResult<T>
where
    M: QueryableByName<Sqlite> + 'static,
    T: From<M>,
{
    bind_values(
        diesel::sql_query(statement.sql.as_str()).into_boxed(),
        &statement.params,
    )
    .get_result::<M>(conn)
    .optional()?
    .map(T::from)
    .ok_or(RepositoryError::NotFound)
}

/// Folds `(status, count)` rows into a total and a lookup by status.
fn tally(rows: Vec<(String, i64)>) -> (usize, HashMap<String, usize>) {
    let by_status: HashMap<String, usize> = rows
        .into_iter()
        .map(|(status, count)| (status, usize::try_from(count).unwrap_or_default()))
        .collect();
    (by_status.values().sum(), by_status)
}

/// Liveness probe of the backing store.
pub trait HealthCheck {
    /// Round-trips a trivial statement to prove the database is reachable.
    fn ping(&self) -> RepositoryResult<()>;
}

pub trait BlogReader {
    fn get_blog_by_id(&self, id: BlogId) -> RepositoryResult<Option<Blog>>;
    fn get_blog_by_slug(&self, slug: &str) -> RepositoryResult<Option<Blog>>;
    fn list_all_blogs(&self) -> RepositoryResult<Vec<Blog>>;
    fn list_blogs(&self, query: &ListQuery) -> RepositoryResult<Page<Blog>>;
}

pub trait BlogWriter {
    fn create_blog(&self, new_blog: &NewBlog) -> RepositoryResult<Blog>;
    fn update_blog(&self, id: BlogId, payload: &Map<String, Value>) -> RepositoryResult<Blog>;
    fn delete_blog(&self, id: BlogId) -> RepositoryResult<()>;
}

pub trait CourseReader {
    fn get_course_by_id(&self, id: CourseId) -> RepositoryResult<Option<Course>>;
    fn list_all_courses(&self) -> RepositoryResult<Vec<Course>>;
    fn list_courses(&self, query: &ListQuery) -> RepositoryResult<Page<Course>>;
}

pub trait CourseWriter {
    fn create_course(&self, new_course: &NewCourse) -> RepositoryResult<Course>;
    fn update_course(&self, id: CourseId, payload: &Map<String, Value>)
    -> RepositoryResult<Course>;
    fn delete_course(&self, id: CourseId) -> RepositoryResult<()>;
}

pub trait UserReader {
    fn get_user_by_id(&self, id: UserId) -> RepositoryResult<Option<User>>;
    fn get_user_by_email(&self, email: &EmailAddress) -> RepositoryResult<Option<User>>;
    fn list_users(&self, query: &ListQuery) -> RepositoryResult<Page<User>>;
    fn list_instructors(&self, query: &ListQuery) -> RepositoryResult<Page<User>>;
}

pub trait UserWriter {
    fn create_user(&self, new_user: &NewUser) -> RepositoryResult<User>;
    fn update_user(&self, id: UserId, payload: &Map<String, Value>) -> RepositoryResult<User>;
    fn delete_user(&self, id: UserId) -> RepositoryResult<()>;
}

pub trait ContactReader {
    fn get_contact_message_by_id(
        &self,
        id: ContactMessageId,
    ) -> RepositoryResult<Option<ContactMessage>>;
    fn list_contact_messages(&self, query: &ListQuery) -> RepositoryResult<Page<ContactMessage>>;
    fn contact_stats(&self) -> RepositoryResult<ContactStats>;
}

pub trait ContactWriter {
    fn create_contact_message(
        &self,
        message: &NewContactMessage,
    ) -> RepositoryResult<ContactMessage>;
    fn update_contact_message(
        &self,
        id: ContactMessageId,
        payload: &Map<String, Value>,
    ) -> RepositoryResult<ContactMessage>;
    /// Removes the message and returns the deleted record.
    fn delete_contact_message(&self, id: ContactMessageId) -> RepositoryResult<ContactMessage>;
}

pub trait SubscriberReader {
    fn get_subscriber_by_email(&self, email: &EmailAddress)
    -> RepositoryResult<Option<Subscriber>>;
    fn list_subscribers(&self, query: &ListQuery) -> RepositoryResult<Page<Subscriber>>;
    fn subscriber_stats(&self) -> RepositoryResult<SubscriberStats>;
}

pub trait SubscriberWriter {
    /// Inserts an active subscriber; an existing email yields
    /// [`RepositoryError::Duplicate`].
    fn create_subscriber(&self, email: &EmailAddress) -> RepositoryResult<Subscriber>;
    fn unsubscribe(&self, email: &EmailAddress) -> RepositoryResult<Option<Subscriber>>;
}

pub trait ImageReader {
    fn get_image_by_id(&self, id: ImageId) -> RepositoryResult<Option<Image>>;
    fn get_image_by_cloudinary_id(&self, cloudinary_id: &str) -> RepositoryResult<Option<Image>>;
    fn list_images(&self, query: &ListQuery) -> RepositoryResult<Page<Image>>;
}

pub trait ImageWriter {
    fn create_image(&self, new_image: &NewImage) -> RepositoryResult<Image>;
    fn delete_image(&self, id: ImageId) -> RepositoryResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_query_with_overrides_caller_value() {
        let mut params = HashMap::new();
        params.insert("category_id".to_string(), "1".to_string());

        let query = ListQuery::new(params).with("category_id", "7");

        assert_eq!(query.params().get("category_id").map(String::as_str), Some("7"));
    }

    #[test]
    fn tally_sums_all_statuses() {
        let (total, by_status) = tally(vec![("new".into(), 3), ("resolved".into(), 2)]);
        assert_eq!(total, 5);
        assert_eq!(by_status.get("new"), Some(&3));
        assert_eq!(by_status.get("responded"), None);
    }
}
