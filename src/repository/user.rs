use diesel::prelude::*;
use serde_json::{Map, Value};

use crate::domain::types::{EmailAddress, UserId};
use crate::domain::user::{NewUser, User};
use crate::models::user::{self as db, NewUser as DbNewUser, User as DbUser};
use crate::pagination::Page;
use crate::query::{
    ColumnType, FilterField, FilteredQuery, ListSpec, SqlValue, UpdatableField, UpdateSpec,
    UpdateStatement,
};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{DieselRepository, ListQuery, UserReader, UserWriter, load_page, run_update};
use crate::schema::users;

const USER_FILTERS: &[FilterField] = &[
    FilterField::equals("role", ColumnType::Text),
    FilterField::equals("status", ColumnType::Text),
    FilterField::equals("is_instructor", ColumnType::Bool),
    FilterField::substring("search", &["first_name", "last_name", "email"]),
];

pub const USER_LIST: ListSpec = ListSpec {
    table: "users",
    columns: db::COLUMNS,
    scope: None,
    filters: USER_FILTERS,
    order_by: "created_at DESC, id DESC",
    default_limit: 20,
};

pub const INSTRUCTOR_LIST: ListSpec = ListSpec {
    scope: Some("role = 'INSTRUCTOR' OR is_instructor = 1"),
    filters: &[FilterField::equals("status", ColumnType::Text)],
    ..USER_LIST
};

pub const USER_UPDATE: UpdateSpec = UpdateSpec {
    table: "users",
    key_column: "id",
    fields: &[
        UpdatableField::new("first_name", ColumnType::Text),
        UpdatableField::new("last_name", ColumnType::Text),
        UpdatableField::new("title", ColumnType::Text),
        UpdatableField::new("address", ColumnType::Text),
        UpdatableField::new("profile_image_url", ColumnType::Text),
        UpdatableField::new("biography", ColumnType::Text),
        UpdatableField::new("linkedin_url", ColumnType::Text),
        UpdatableField::new("github_url", ColumnType::Text),
        UpdatableField::new("role", ColumnType::Text),
        UpdatableField::new("is_instructor", ColumnType::Bool),
        UpdatableField::new("status", ColumnType::Text),
    ],
    touch: Some("updated_at"),
    returning: db::COLUMNS,
};

impl UserReader for DieselRepository {
    fn get_user_by_id(&self, id: UserId) -> RepositoryResult<Option<User>> {
        let mut conn = self.conn()?;
        let user = users::table
            .find(id.get())
            .select(DbUser::as_select())
            .first(&mut conn)
            .optional()?;
        Ok(user.map(Into::into))
    }

    fn get_user_by_email(&self, email: &EmailAddress) -> RepositoryResult<Option<User>> {
        let mut conn = self.conn()?;
        let user = users::table
            .filter(users::email.eq(email.as_str()))
            .select(DbUser::as_select())
            .first(&mut conn)
            .optional()?;
        Ok(user.map(Into::into))
    }

    fn list_users(&self, query: &ListQuery) -> RepositoryResult<Page<User>> {
        let filtered = FilteredQuery::build(&USER_LIST, query.params())?;
        let mut conn = self.conn()?;
        load_page::<DbUser, User>(&mut conn, &filtered)
    }

    fn list_instructors(&self, query: &ListQuery) -> RepositoryResult<Page<User>> {
        let filtered = FilteredQuery::build(&INSTRUCTOR_LIST, query.params())?;
        let mut conn = self.conn()?;
        load_page::<DbUser, User>(&mut conn, &filtered)
    }
}

impl UserWriter for DieselRepository {
    fn create_user(&self, new_user: &NewUser) -> RepositoryResult<User> {
        let mut conn = self.conn()?;
        let created = diesel::insert_into(users::table)
            .values(DbNewUser::from(new_user))
            .returning(DbUser::as_returning())
            .get_result(&mut conn)?;
        Ok(created.into())
    }

    fn update_user(&self, id: UserId, payload: &Map<String, Value>) -> RepositoryResult<User> {
        let statement = UpdateStatement::build(
            &USER_UPDATE,
            payload,
            SqlValue::Integer(Some(i64::from(id.get()))),
        )?;
        let mut conn = self.conn()?;
        run_update::<DbUser, User>(&mut conn, &statement)
    }

    fn delete_user(&self, id: UserId) -> RepositoryResult<()> {
        let mut conn = self.conn()?;
        let deleted = diesel::delete(users::table.find(id.get())).execute(&mut conn)?;
        if deleted == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
