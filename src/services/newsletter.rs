//! Newsletter subscription lifecycle.

use crate::clients::email::Notifier;
use crate::domain::subscriber::{Subscriber, SubscriberStats};
use crate::domain::types::EmailAddress;
use crate::forms::newsletter::NewsletterForm;
use crate::pagination::Page;
use crate::repository::{ListQuery, SubscriberReader, SubscriberWriter};
use crate::services::{RepositoryResultExt, ServiceError, ServiceResult};

pub const SUBSCRIBER_NOT_FOUND: &str = "Subscriber not found";
pub const ALREADY_SUBSCRIBED: &str = "This email is already subscribed";

fn not_found() -> ServiceError {
    ServiceError::NotFound(SUBSCRIBER_NOT_FOUND.to_string())
}

/// Adds an active subscriber and sends the welcome email.
pub async fn subscribe<R>(
    repo: &R,
    notifier: &Notifier,
    form: NewsletterForm,
) -> ServiceResult<Subscriber>
where
    R: SubscriberWriter + ?Sized,
{
    let email = form.subscription_email()?;
    let subscriber = repo
        .create_subscriber(&email)
        .or_conflict(ALREADY_SUBSCRIBED)?;
    log::info!("New newsletter subscriber {}", subscriber.id);

    notifier.newsletter_welcome(&subscriber.email).await;
    Ok(subscriber)
}

/// Reports an existing subscription back to the caller.
pub fn confirm<R>(repo: &R, form: NewsletterForm) -> ServiceResult<Subscriber>
where
    R: SubscriberReader + ?Sized,
{
    let email = form.lookup_email()?.ok_or_else(not_found)?;
    repo.get_subscriber_by_email(&email)?.ok_or_else(not_found)
}

/// Marks the subscriber as unsubscribed and sends the goodbye email.
pub async fn unsubscribe<R>(
    repo: &R,
    notifier: &Notifier,
    form: NewsletterForm,
) -> ServiceResult<Subscriber>
where
    R: SubscriberWriter + ?Sized,
{
    let email = form.lookup_email()?.ok_or_else(not_found)?;
    let subscriber = repo.unsubscribe(&email)?.ok_or_else(not_found)?;
    log::info!("Subscriber {} unsubscribed", subscriber.id);

    notifier.newsletter_goodbye(&subscriber.email).await;
    Ok(subscriber)
}

pub fn list_subscribers<R>(repo: &R, query: &ListQuery) -> ServiceResult<Page<Subscriber>>
where
    R: SubscriberReader + ?Sized,
{
    repo.list_subscribers(query).map_err(ServiceError::from)
}

pub fn get_subscriber<R>(repo: &R, email: &str) -> ServiceResult<Subscriber>
where
    R: SubscriberReader + ?Sized,
{
    let email = EmailAddress::new(email).map_err(|_| not_found())?;
    repo.get_subscriber_by_email(&email)?.ok_or_else(not_found)
}

pub fn subscriber_stats<R>(repo: &R) -> ServiceResult<SubscriberStats>
where
    R: SubscriberReader + ?Sized,
{
    repo.subscriber_stats().map_err(ServiceError::from)
}
