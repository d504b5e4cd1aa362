//! # Order Notification Mail
//!
//! SMTP delivery of plain-text order notifications to the store's own
//! mailbox (never to the buyer). The transport sits behind the `Mailer`
//! trait so tests can swap it out; checkout propagates send failures
//! instead of catching them.

use async_trait::async_trait;
use lettre::{
    message::header::ContentType,
    transport::smtp::{authentication::Credentials, Error as SmtpError},
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use thiserror::Error;

use crate::config::MailConfig;
use shop_core::Order;

/// Errors that can occur when sending mail
#[derive(Debug, Error)]
pub enum MailError {
    /// SMTP transport error
    #[error("SMTP error: {0}")]
    Smtp(#[from] SmtpError),

    /// Failed to build the message
    #[error("Failed to build message: {0}")]
    MessageBuild(#[from] lettre::error::Error),

    /// Invalid email address
    #[error("Invalid email address: {0}")]
    InvalidAddress(String),
}

/// Outgoing-mail seam for the storefront
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Send a plain-text message to the store's notification mailbox
    async fn send(&self, subject: &str, body: &str) -> Result<(), MailError>;
}

/// SMTP-backed mailer
pub struct SmtpMailer {
    mailer: AsyncSmtpTransport<Tokio1Executor>,
    from_address: String,
    notify_address: String,
}

impl SmtpMailer {
    /// Create a mailer from configuration
    pub fn new(config: &MailConfig) -> Result<Self, SmtpError> {
        let credentials = Credentials::new(
            config.smtp_username.clone(),
            config.smtp_password.clone(),
        );

        let mailer = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)?
            .port(config.smtp_port)
            .credentials(credentials)
            .build();

        Ok(Self {
            mailer,
            from_address: config.from_address.clone(),
            notify_address: config.notify_address.clone(),
        })
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, subject: &str, body: &str) -> Result<(), MailError> {
        let email = Message::builder()
            .from(
                self.from_address
                    .parse()
                    .map_err(|_| MailError::InvalidAddress(self.from_address.clone()))?,
            )
            .to(self
                .notify_address
                .parse()
                .map_err(|_| MailError::InvalidAddress(self.notify_address.clone()))?)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body.to_string())?;

        self.mailer.send(email).await?;

        tracing::info!(to = %self.notify_address, subject = %subject, "Order notification sent");
        Ok(())
    }
}

/// One order line as rendered in the notification
#[derive(Debug, Clone)]
pub struct OrderLine {
    pub name: String,
    pub quantity: i64,
    /// Unit price already formatted with its currency label
    pub unit_price: String,
}

/// Subject line for a new-order notification
pub fn notification_subject(order: &Order) -> String {
    format!("New Order #{} from {}", order.id, order.full_name)
}

/// Plain-text body for a new-order notification.
///
/// Lists the buyer's details and every item; intended for the store owner,
/// so nothing here is shown back to the buyer.
pub fn notification_body(order: &Order, lines: &[OrderLine]) -> String {
    let mut items_text = String::new();
    for line in lines {
        items_text.push_str(&format!(
            "{} x {} at {}\n",
            line.quantity, line.name, line.unit_price
        ));
    }

    format!(
        "You have a new order!\n\
         \n\
         Order ID: {}\n\
         Customer Name: {}\n\
         Customer Email: {}\n\
         Customer Address: {}\n\
         \n\
         Order Items:\n\
         {}\n\
         Total: {}\n",
        order.id,
        order.full_name,
        order.email,
        order.address,
        items_text,
        order.total().display("$"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn sample_order() -> Order {
        Order {
            id: 17,
            full_name: "Ash Ketchum".to_string(),
            email: "ash@pallet.town".to_string(),
            address: "1 Pallet Town".to_string(),
            total_cents: 3500,
            paid: false,
            created: Utc::now(),
        }
    }

    #[test]
    fn test_subject() {
        assert_eq!(
            notification_subject(&sample_order()),
            "New Order #17 from Ash Ketchum"
        );
    }

    #[test]
    fn test_body_lists_items_and_total() {
        let lines = vec![
            OrderLine {
                name: "Charizard".to_string(),
                quantity: 2,
                unit_price: "$10.00".to_string(),
            },
            OrderLine {
                name: "Pikachu".to_string(),
                quantity: 3,
                unit_price: "$5.00".to_string(),
            },
        ];

        let body = notification_body(&sample_order(), &lines);

        assert!(body.contains("Order ID: 17"));
        assert!(body.contains("Customer Email: ash@pallet.town"));
        assert!(body.contains("2 x Charizard at $10.00"));
        assert!(body.contains("3 x Pikachu at $5.00"));
        assert!(body.contains("Total: $35.00"));
    }
}
