//! Diesel row structs and their conversions to and from domain records.

use diesel::QueryableByName;
use diesel::sql_types::BigInt;

pub mod blog;
pub mod config;
pub mod contact_message;
pub mod course;
pub mod image;
pub mod subscriber;
pub mod user;

/// Result row of a `SELECT COUNT(*) AS count` statement.
#[derive(Debug, QueryableByName)]
pub struct RowCount {
    #[diesel(sql_type = BigInt)]
    pub count: i64,
}
