//! Transactional email: the [`Mailer`] seam, its Brevo and logging
//! implementations, and the message templates the services send.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;

use crate::clients::{UpstreamError, check_status};
use crate::domain::contact_message::ContactMessage;
use crate::models::config::EmailConfig;

const SERVICE: &str = "Brevo";

/// A fully rendered email ready for delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    pub to: String,
    pub subject: String,
    pub html: String,
    pub text: String,
}

#[cfg_attr(any(test, feature = "test-mocks"), mockall::automock)]
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, message: &EmailMessage) -> Result<(), UpstreamError>;
}

#[derive(Serialize)]
struct Address<'a> {
    email: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BrevoPayload<'a> {
    sender: Address<'a>,
    to: [Address<'a>; 1],
    subject: &'a str,
    html_content: &'a str,
    text_content: &'a str,
}

/// Sends mail through the Brevo transactional email API.
pub struct BrevoMailer {
    http: reqwest::Client,
    api_url: String,
    api_key: String,
    from_email: String,
    from_name: String,
}

impl BrevoMailer {
    pub fn new(
        api_key: String,
        config: &EmailConfig,
        timeout: Duration,
    ) -> Result<Self, UpstreamError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            api_url: config.api_url.clone(),
            api_key,
            from_email: config.from_email.clone(),
            from_name: config.from_name.clone(),
        })
    }
}

#[async_trait]
impl Mailer for BrevoMailer {
    async fn send(&self, message: &EmailMessage) -> Result<(), UpstreamError> {
        let payload = BrevoPayload {
            sender: Address {
                email: &self.from_email,
                name: Some(&self.from_name),
            },
            to: [Address {
                email: &message.to,
                name: None,
            }],
            subject: &message.subject,
            html_content: &message.html,
            text_content: &message.text,
        };

        let response = self
            .http
            .post(&self.api_url)
            .header("api-key", &self.api_key)
            .json(&payload)
            .send()
            .await?;
        check_status(SERVICE, response).await?;

        log::info!("Email '{}' sent to {}", message.subject, message.to);
        Ok(())
    }
}

/// Stand-in used when no API key is configured; only logs.
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, message: &EmailMessage) -> Result<(), UpstreamError> {
        log::info!(
            "Email delivery disabled, dropping '{}' for {}",
            message.subject,
            message.to
        );
        Ok(())
    }
}

/// Picks the Brevo mailer when a key is configured.
pub fn build_mailer(
    config: &EmailConfig,
    timeout: Duration,
) -> Result<Arc<dyn Mailer>, UpstreamError> {
    let key = config
        .brevo_api_key
        .as_deref()
        .filter(|k| !k.trim().is_empty());
    match key {
        Some(key) => Ok(Arc::new(BrevoMailer::new(key.to_string(), config, timeout)?)),
        None => {
            log::warn!("No Brevo API key configured; emails will only be logged");
            Ok(Arc::new(LogMailer))
        }
    }
}

/// Sends the notification emails that accompany successful writes.
///
/// Delivery failures are logged and never propagated.
#[derive(Clone)]
pub struct Notifier {
    mailer: Arc<dyn Mailer>,
    admin_email: String,
    support_email: String,
    support_phone: String,
}

impl Notifier {
    pub fn new(mailer: Arc<dyn Mailer>, config: &EmailConfig) -> Self {
        Self {
            mailer,
            admin_email: config.admin_email.clone(),
            support_email: config.support_email.clone(),
            support_phone: config.support_phone.clone(),
        }
    }

    pub async fn newsletter_welcome(&self, email: &str) {
        self.deliver(welcome_email(email)).await;
    }

    pub async fn newsletter_goodbye(&self, email: &str) {
        self.deliver(unsubscribe_email(email)).await;
    }

    /// Confirms receipt to the sender and alerts the site administrator.
    pub async fn contact_received(&self, message: &ContactMessage) {
        self.deliver(contact_confirmation_email(
            &message.email,
            &message.full_name,
            &self.support_email,
            &self.support_phone,
        ))
        .await;
        self.deliver(contact_admin_email(&self.admin_email, message))
            .await;
    }

    async fn deliver(&self, message: EmailMessage) {
        if let Err(e) = self.mailer.send(&message).await {
            log::warn!("Failed to send '{}' to {}: {e}", message.subject, message.to);
        }
    }
}

fn layout(body: &str, footer: &str) -> String {
    format!(
        r#"<div style="font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto;">
{body}
<hr style="margin: 30px 0;">
<p style="font-size: 12px; color: #666;">{footer}</p>
</div>"#
    )
}

pub fn welcome_email(to: &str) -> EmailMessage {
    let body = "<h2>Welcome to BioMed!</h2>\
        <p>Your email has been confirmed. You're now subscribed to our newsletter.</p>\
        <p>You'll receive:</p>\
        <ul>\
        <li>Latest medical research and insights</li>\
        <li>Educational articles and tutorials</li>\
        <li>Course updates and announcements</li>\
        <li>Exclusive member-only content</li>\
        </ul>\
        <p>Thank you for being part of our community!</p>";
    EmailMessage {
        to: to.to_string(),
        subject: "You're All Set! Welcome to BioMed Newsletter".to_string(),
        html: layout(body, "BioMed Newsletter | Medical Education Platform"),
        text: "Welcome to BioMed! You are now subscribed to our newsletter.".to_string(),
    }
}

pub fn unsubscribe_email(to: &str) -> EmailMessage {
    let body = "<h2>Unsubscribe Confirmation</h2>\
        <p>You have been unsubscribed from the BioMed Newsletter.</p>\
        <p>We're sorry to see you go! If you change your mind, you can resubscribe anytime.</p>";
    EmailMessage {
        to: to.to_string(),
        subject: "You've Been Unsubscribed from BioMed Newsletter".to_string(),
        html: layout(body, "BioMed Newsletter | Medical Education Platform"),
        text: "You have been unsubscribed from the BioMed Newsletter.".to_string(),
    }
}

pub fn contact_confirmation_email(
    to: &str,
    full_name: &str,
    support_email: &str,
    support_phone: &str,
) -> EmailMessage {
    let body = format!(
        "<h2>Thank You for Contacting BioMed!</h2>\
         <p>Dear {name},</p>\
         <p>We have received your message and appreciate you reaching out to us.</p>\
         <p>Our support team will review your inquiry and get back to you as soon as possible.</p>\
         <p>For urgent questions you can reach us at:</p>\
         <p><strong>Email:</strong> {email}<br><strong>Phone:</strong> {phone}</p>",
        name = ammonia::clean_text(full_name),
        email = ammonia::clean_text(support_email),
        phone = ammonia::clean_text(support_phone),
    );
    EmailMessage {
        to: to.to_string(),
        subject: "We Received Your Message - BioMed Support".to_string(),
        html: layout(&body, "BioMed Support Team | Medical Education Platform"),
        text: "Thank you for contacting BioMed!\n\n\
               We have received your message and will get back to you soon.\n\n\
               Support Team"
            .to_string(),
    }
}

pub fn contact_admin_email(admin_email: &str, message: &ContactMessage) -> EmailMessage {
    let phone = format!(
        "{} {}",
        message.country_code.as_deref().unwrap_or_default(),
        message.phone_number.as_deref().unwrap_or("Not provided")
    );
    let topic = message.interest_topic.as_deref().unwrap_or("Not specified");
    let submitted = message.created_at.format("%Y-%m-%d %H:%M:%S UTC");

    let rows = [
        ("Name", ammonia::clean_text(&message.full_name)),
        ("Email", ammonia::clean_text(&message.email)),
        ("Phone", ammonia::clean_text(phone.trim())),
        ("Topic", ammonia::clean_text(topic)),
        ("Message", ammonia::clean_text(&message.message)),
        ("Submitted", submitted.to_string()),
    ]
    .iter()
    .map(|(label, value)| {
        format!(
            "<tr><td style=\"padding: 10px; font-weight: bold;\">{label}:</td>\
             <td style=\"padding: 10px; white-space: pre-wrap;\">{value}</td></tr>"
        )
    })
    .collect::<String>();

    let body = format!(
        "<h2>New Contact Form Submission</h2>\
         <table style=\"width: 100%; border-collapse: collapse;\">{rows}</table>"
    );

    EmailMessage {
        to: admin_email.to_string(),
        subject: format!("New Contact Form Submission from {}", message.full_name),
        html: layout(
            &body,
            "This is an automated notification. Please log into the admin panel to manage this inquiry.",
        ),
        text: format!(
            "New Contact Form Submission\n\nName: {}\nEmail: {}\nPhone: {}\nTopic: {}\nMessage: {}",
            message.full_name,
            message.email,
            phone.trim(),
            topic,
            message.message
        ),
    }
}
