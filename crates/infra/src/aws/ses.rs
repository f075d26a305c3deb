//! SES email delivery.

use aws_sdk_ses::error::{DisplayErrorContext, ProvideErrorMetadata};
use aws_sdk_ses::types::{Body, Content, Destination, Message};
use tracing::debug;

use backup_report_core::{DeliveryError, DeliveryReceipt, EmailMessage, NotificationSink};

const CHARSET: &str = "UTF-8";

/// Error codes meaning SES refused the message itself.
const REJECTION_CODES: [&str; 3] = [
    "MessageRejected",
    "MailFromDomainNotVerifiedException",
    "ConfigurationSetDoesNotExist",
];

#[derive(Debug, Clone)]
pub struct SesNotificationSink {
    client: aws_sdk_ses::Client,
}

impl SesNotificationSink {
    pub fn new(client: aws_sdk_ses::Client) -> Self {
        Self { client }
    }
}

/// Classify a send failure by the SES error code.
fn delivery_error(code: Option<&str>, message: String) -> DeliveryError {
    match code {
        Some(code) if REJECTION_CODES.contains(&code) => DeliveryError::Rejected(message),
        _ => DeliveryError::Service(message),
    }
}

fn content(data: &str) -> Result<Content, DeliveryError> {
    Content::builder()
        .data(data)
        .charset(CHARSET)
        .build()
        .map_err(|e| DeliveryError::Rejected(e.to_string()))
}

#[async_trait::async_trait]
impl NotificationSink for SesNotificationSink {
    async fn send(&self, message: EmailMessage) -> Result<DeliveryReceipt, DeliveryError> {
        let destination = Destination::builder()
            .set_to_addresses(Some(message.recipients.clone()))
            .build();
        let body = Body::builder().html(content(&message.html_body)?).build();
        let ses_message = Message::builder()
            .subject(content(&message.subject)?)
            .body(body)
            .build()
            .map_err(|e| DeliveryError::Rejected(e.to_string()))?;

        let output = self
            .client
            .send_email()
            .source(&message.sender)
            .destination(destination)
            .message(ses_message)
            .send()
            .await
            .map_err(|e| {
                let text = e
                    .message()
                    .map(str::to_string)
                    .unwrap_or_else(|| DisplayErrorContext(&e).to_string());
                delivery_error(e.code(), text)
            })?;

        let message_id = output.message_id().to_string();
        debug!(message_id = %message_id, "ses accepted message");
        Ok(DeliveryReceipt { message_id })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn refused_messages_are_rejections() {
        let err = delivery_error(
            Some("MessageRejected"),
            "Email address is not verified.".to_string(),
        );
        assert_eq!(err, DeliveryError::Rejected("Email address is not verified.".to_string()));

        let err = delivery_error(Some("MailFromDomainNotVerifiedException"), "x".to_string());
        assert!(matches!(err, DeliveryError::Rejected(_)));
    }

    #[test]
    fn other_failures_are_service_errors() {
        let err = delivery_error(Some("Throttling"), "Maximum sending rate exceeded.".to_string());
        assert_eq!(err, DeliveryError::Service("Maximum sending rate exceeded.".to_string()));

        let err = delivery_error(None, "timeout".to_string());
        assert!(matches!(err, DeliveryError::Service(_)));
    }

    #[test]
    fn content_carries_utf8_charset() {
        let c = content("EC2 Backup Job Statuses").unwrap();
        assert_eq!(c.data(), "EC2 Backup Job Statuses");
        assert_eq!(c.charset(), Some("UTF-8"));
    }
}
