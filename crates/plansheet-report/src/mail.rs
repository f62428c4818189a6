//! Mail delivery of the finished workbook over implicit-TLS SMTP.

use std::path::Path;
use std::sync::LazyLock;

use lettre::message::header::ContentType;
use lettre::message::{Attachment, Mailbox, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use plansheet_core::MailConfig;

use crate::error::ReportError;

static XLSX_CONTENT_TYPE: LazyLock<ContentType> = LazyLock::new(|| {
    ContentType::parse("application/vnd.openxmlformats-officedocument.spreadsheetml.sheet")
        .expect("valid xlsx content type")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyOutcome {
    Sent { recipients: usize },
    /// Mail is not configured.
    Skipped,
}

fn mailbox(address: &str) -> Result<Mailbox, ReportError> {
    address.parse().map_err(|source| ReportError::Address {
        address: address.to_owned(),
        source,
    })
}

/// Builds the message. `attachment` is `(file name, bytes)`.
///
/// # Errors
///
/// Returns [`ReportError::Address`] for a malformed sender or recipient and
/// [`ReportError::Message`] if the message cannot be assembled.
pub fn build_message(
    config: &MailConfig,
    attachment: Option<(String, Vec<u8>)>,
    subject: &str,
    body: &str,
) -> Result<Message, ReportError> {
    let mut builder = Message::builder()
        .from(mailbox(&config.sender)?)
        .subject(subject);
    for recipient in &config.recipients {
        builder = builder.to(mailbox(recipient)?);
    }

    let text = SinglePart::plain(body.to_owned());
    let message = match attachment {
        Some((file_name, bytes)) => builder.multipart(
            MultiPart::mixed()
                .singlepart(text)
                .singlepart(Attachment::new(file_name).body(bytes, XLSX_CONTENT_TYPE.clone())),
        )?,
        None => builder.singlepart(text)?,
    };
    Ok(message)
}

/// Sends `attachment_path` to every configured recipient.
///
/// A missing or unreadable attachment is logged and the mail goes out
/// without it.
///
/// # Errors
///
/// Returns [`ReportError::Smtp`] if the relay cannot be reached, rejects the
/// credentials, or refuses the message, plus any error from [`build_message`].
pub async fn send_report(
    config: &MailConfig,
    attachment_path: &Path,
    subject: &str,
    body: &str,
) -> Result<NotifyOutcome, ReportError> {
    let attachment = match tokio::fs::read(attachment_path).await {
        Ok(bytes) => {
            let file_name = attachment_path
                .file_name()
                .map_or_else(|| "report.xlsx".to_owned(), |n| n.to_string_lossy().into_owned());
            Some((file_name, bytes))
        }
        Err(e) => {
            tracing::warn!(
                path = %attachment_path.display(),
                error = %e,
                "attachment unreadable; sending mail without it"
            );
            None
        }
    };

    let message = build_message(config, attachment, subject, body)?;

    let mailer = AsyncSmtpTransport::<Tokio1Executor>::relay(&config.smtp_host)?
        .port(config.smtp_port)
        .credentials(Credentials::new(
            config.sender.clone(),
            config.app_password.clone(),
        ))
        .build();
    mailer.send(message).await?;

    tracing::info!(recipients = config.recipients.len(), "report mailed");
    Ok(NotifyOutcome::Sent {
        recipients: config.recipients.len(),
    })
}

/// [`send_report`] when mail is configured, otherwise [`NotifyOutcome::Skipped`].
///
/// # Errors
///
/// Propagates any error from [`send_report`].
pub async fn notify(
    config: Option<&MailConfig>,
    attachment_path: &Path,
    subject: &str,
    body: &str,
) -> Result<NotifyOutcome, ReportError> {
    match config {
        Some(config) => send_report(config, attachment_path, subject, body).await,
        None => {
            tracing::info!("mail not configured (sender, app password and recipients required); skipping");
            Ok(NotifyOutcome::Skipped)
        }
    }
}
