use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::user::{NewUser as DomainNewUser, User as DomainUser};

/// Public projection of the `users` table; never includes `password_hash`.
pub const COLUMNS: &str = "id, first_name, last_name, title, email, phone, address, \
     profile_image_url, biography, linkedin_url, github_url, role, is_instructor, status, \
     created_at, updated_at";

#[derive(Debug, Clone, Queryable, Selectable, QueryableByName)]
#[diesel(table_name = crate::schema::users)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct User {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub title: Option<String>,
    pub email: String,
    pub phone: String,
    pub address: Option<String>,
    pub profile_image_url: Option<String>,
    pub biography: Option<String>,
    pub linkedin_url: Option<String>,
    pub github_url: Option<String>,
    pub role: String,
    pub is_instructor: bool,
    pub status: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::users)]
pub struct NewUser<'a> {
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub title: Option<&'a str>,
    pub email: &'a str,
    pub phone: &'a str,
    pub password_hash: &'a str,
    pub address: Option<&'a str>,
    pub profile_image_url: Option<&'a str>,
    pub biography: Option<&'a str>,
    pub linkedin_url: Option<&'a str>,
    pub github_url: Option<&'a str>,
    pub role: Option<&'a str>,
    pub is_instructor: Option<bool>,
    pub status: Option<&'a str>,
}

impl From<User> for DomainUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            first_name: user.first_name,
            last_name: user.last_name,
            title: user.title,
            email: user.email,
            phone: user.phone,
            address: user.address,
            profile_image_url: user.profile_image_url,
            biography: user.biography,
            linkedin_url: user.linkedin_url,
            github_url: user.github_url,
            role: user.role,
            is_instructor: user.is_instructor,
            status: user.status,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

impl<'a> From<&'a DomainNewUser> for NewUser<'a> {
    fn from(user: &'a DomainNewUser) -> Self {
        Self {
            first_name: user.first_name.as_str(),
            last_name: user.last_name.as_str(),
            title: user.title.as_deref(),
            email: user.email.as_str(),
            phone: user.phone.as_str(),
            password_hash: &user.password_hash,
            address: user.address.as_deref(),
            profile_image_url: user.profile_image_url.as_deref(),
            biography: user.biography.as_deref(),
            linkedin_url: user.linkedin_url.as_deref(),
            github_url: user.github_url.as_deref(),
            role: user.role.as_deref(),
            is_instructor: user.is_instructor,
            status: user.status.as_deref(),
        }
    }
}
