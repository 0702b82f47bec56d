use lettre::message::{Attachment, MultiPart, SinglePart, header::ContentType};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::info;

use crate::config::EmailConfig;
use crate::error::{AppError, AppResult};

/// An e-mail carrying one CSV attachment.
#[derive(Debug, Clone)]
pub struct ExportMail {
    pub to: String,
    pub subject: String,
    pub body: String,
    pub filename: String,
    pub csv: String,
}

pub struct Mailer {
    config: EmailConfig,
}

impl Mailer {
    pub fn new(config: EmailConfig) -> Self {
        Self { config }
    }

    pub fn build_message(&self, mail: &ExportMail) -> AppResult<Message> {
        let csv_type = ContentType::parse("text/csv")
            .map_err(|e| AppError::Email(e.to_string()))?;

        let message = Message::builder()
            .from(self.config.from.parse()?)
            .to(mail.to.parse()?)
            .subject(mail.subject.clone())
            .multipart(
                MultiPart::mixed()
                    .singlepart(SinglePart::plain(mail.body.clone()))
                    .singlepart(
                        Attachment::new(mail.filename.clone()).body(mail.csv.clone(), csv_type),
                    ),
            )?;
        Ok(message)
    }

    pub async fn send(&self, mail: &ExportMail) -> AppResult<()> {
        let message = self.build_message(mail)?;

        if self.config.development_mode {
            self.log_mail(mail);
            return Ok(());
        }

        let mut transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(
            &self.config.smtp_host,
        )?
        .port(self.config.smtp_port);
        if !self.config.smtp_username.is_empty() {
            transport = transport.credentials(Credentials::new(
                self.config.smtp_username.clone(),
                self.config.smtp_password.clone(),
            ));
        }

        transport.build().send(message).await?;

        info!(to = %mail.to, subject = %mail.subject, "Export email sent");
        Ok(())
    }

    fn log_mail(&self, mail: &ExportMail) {
        info!(
            to = %mail.to,
            subject = %mail.subject,
            attachment = %mail.filename,
            attachment_bytes = mail.csv.len(),
            "Email (development mode, not sent)"
        );
        tracing::debug!(csv = %mail.csv, "Export attachment");
    }
}
