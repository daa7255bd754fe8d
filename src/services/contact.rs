//! Contact form intake and back-office message handling.

use serde_json::{Map, Value};

use crate::clients::email::Notifier;
use crate::domain::contact_message::{ContactMessage, ContactStats, NewContactMessage};
use crate::domain::types::ContactMessageId;
use crate::forms::contact::{ContactForm, ContactStatusForm};
use crate::pagination::Page;
use crate::repository::{ContactReader, ContactWriter, ListQuery};
use crate::services::{RepositoryResultExt, ServiceError, ServiceResult, parse_id};

pub const MESSAGE_NOT_FOUND: &str = "Message not found";

/// Stores the submission, then sends the sender confirmation and the admin
/// notification. Email problems do not fail the request.
pub async fn submit_contact<R>(
    repo: &R,
    notifier: &Notifier,
    form: ContactForm,
) -> ServiceResult<ContactMessage>
where
    R: ContactWriter + ?Sized,
{
    let new_message = NewContactMessage::try_from(form)?;
    let message = repo.create_contact_message(&new_message)?;
    log::info!("Received contact message {} from {}", message.id, message.email);

    notifier.contact_received(&message).await;
    Ok(message)
}

pub fn list_contact_messages<R>(repo: &R, query: &ListQuery) -> ServiceResult<Page<ContactMessage>>
where
    R: ContactReader + ?Sized,
{
    repo.list_contact_messages(query).map_err(ServiceError::from)
}

pub fn get_contact_message<R>(repo: &R, id: i32) -> ServiceResult<ContactMessage>
where
    R: ContactReader + ?Sized,
{
    let id: ContactMessageId = parse_id(id, MESSAGE_NOT_FOUND)?;
    repo.get_contact_message_by_id(id)?
        .ok_or_else(|| ServiceError::NotFound(MESSAGE_NOT_FOUND.to_string()))
}

/// Moves a message to another workflow status. Any non-empty status string
/// is accepted.
pub fn update_contact_status<R>(
    repo: &R,
    id: i32,
    form: ContactStatusForm,
) -> ServiceResult<ContactMessage>
where
    R: ContactWriter + ?Sized,
{
    let status = form.into_status()?;
    let id: ContactMessageId = parse_id(id, MESSAGE_NOT_FOUND)?;

    let mut payload = Map::new();
    payload.insert("status".to_string(), Value::from(status));

    repo.update_contact_message(id, &payload)
        .or_not_found(MESSAGE_NOT_FOUND)
}

/// Deletes the message and returns it as it was stored.
pub fn delete_contact_message<R>(repo: &R, id: i32) -> ServiceResult<ContactMessage>
where
    R: ContactWriter + ?Sized,
{
    let id: ContactMessageId = parse_id(id, MESSAGE_NOT_FOUND)?;
    let message = repo
        .delete_contact_message(id)
        .or_not_found(MESSAGE_NOT_FOUND)?;
    log::info!("Deleted contact message {id}");
    Ok(message)
}

pub fn contact_stats<R>(repo: &R) -> ServiceResult<ContactStats>
where
    R: ContactReader + ?Sized,
{
    repo.contact_stats().map_err(ServiceError::from)
}
