//! Plain records exchanged between the repository, services and routes.

pub mod blog;
pub mod contact_message;
pub mod course;
pub mod image;
pub mod subscriber;
pub mod types;
pub mod user;
