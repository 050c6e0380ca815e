use crate::domain::ports::Notifier;
use crate::utils::error::{Result, StatsError};
use async_trait::async_trait;
use aws_sdk_sesv2::types::{Body, Content, Destination, EmailContent, Message};
use aws_sdk_sesv2::Client as SesClient;

fn notification_error(context: &str, error: impl std::fmt::Display) -> StatsError {
    StatsError::NotificationError {
        message: format!("{}: {}", context, error),
    }
}

/// Operator notifications over SES, one recipient.
#[derive(Debug, Clone)]
pub struct SesNotifier {
    client: SesClient,
    from: String,
    to: String,
}

impl SesNotifier {
    pub fn new(client: SesClient, from: String, to: String) -> Self {
        Self { client, from, to }
    }
}

#[async_trait]
impl Notifier for SesNotifier {
    async fn notify(&self, subject: &str, body: &str) -> Result<()> {
        let subject = Content::builder()
            .data(subject)
            .charset("UTF-8")
            .build()
            .map_err(|e| notification_error("invalid mail subject", e))?;
        let text = Content::builder()
            .data(body)
            .charset("UTF-8")
            .build()
            .map_err(|e| notification_error("invalid mail body", e))?;
        let message = Message::builder()
            .subject(subject)
            .body(Body::builder().text(text).build())
            .build();

        self.client
            .send_email()
            .from_email_address(&self.from)
            .destination(Destination::builder().to_addresses(&self.to).build())
            .content(EmailContent::builder().simple(message).build())
            .send()
            .await
            .map_err(|e| notification_error("failed to send mail", e))?;

        tracing::debug!(to = %self.to, "notification mail sent");
        Ok(())
    }
}
