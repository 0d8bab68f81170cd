//! SMTP mailer for quotation documents and contact-form inquiries.
//!
//! One `lettre` async transport is built at startup and reused for every
//! send. Relay rejections surface as [`AppError::Mail`]; there is no retry.

use lettre::{
    message::{header::ContentType, Attachment, Mailbox, MultiPart, SinglePart},
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};

use crate::core::config::SmtpConfig;
use crate::core::error::{AppError, Result};

pub struct Mailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    contact_inbox: Mailbox,
}

impl Mailer {
    pub fn new(config: &SmtpConfig) -> Result<Self> {
        let from: Mailbox = config
            .from_address
            .parse()
            .map_err(|e| AppError::Mail(format!("Invalid SMTP_FROM address: {}", e)))?;

        let contact_inbox: Mailbox = config
            .contact_inbox
            .parse()
            .map_err(|e| AppError::Mail(format!("Invalid CONTACT_INBOX address: {}", e)))?;

        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
            .map_err(|e| AppError::Mail(format!("Failed to configure SMTP relay: {}", e)))?
            .port(config.port);

        if let (Some(user), Some(pass)) = (&config.username, &config.password) {
            builder = builder.credentials(Credentials::new(user.clone(), pass.clone()));
        }

        Ok(Self {
            transport: builder.build(),
            from,
            contact_inbox,
        })
    }

    /// Email a quotation PDF to a client. The attachment is named after the
    /// quote number.
    pub async fn send_quotation_document(
        &self,
        to_email: &str,
        quote_number: &str,
        pdf: Vec<u8>,
    ) -> Result<()> {
        let to: Mailbox = to_email
            .parse()
            .map_err(|e| AppError::Validation(format!("Invalid email address: {}", e)))?;

        let body = SinglePart::html(quotation_body_html(quote_number));
        let attachment = Attachment::new(format!("{}.pdf", quote_number))
            .body(pdf, ContentType::parse("application/pdf").map_err(|e| {
                AppError::Mail(format!("Invalid attachment content type: {}", e))
            })?);

        let message = Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(format!("📄 Cotización #{}", quote_number))
            .multipart(MultiPart::mixed().singlepart(body).singlepart(attachment))
            .map_err(|e| AppError::Mail(format!("Failed to build email: {}", e)))?;

        self.transport
            .send(message)
            .await
            .map_err(|e| AppError::Mail(format!("SMTP send failed: {}", e)))?;

        tracing::info!(to = to_email, quote_number = quote_number, "Quotation email sent");
        Ok(())
    }

    /// Deliver a website contact-form inquiry to the business inbox.
    pub async fn send_inquiry(
        &self,
        first_name: &str,
        last_name: &str,
        email: &str,
        phone: Option<&str>,
        message_text: &str,
    ) -> Result<()> {
        let message = Message::builder()
            .from(self.from.clone())
            .to(self.contact_inbox.clone())
            .subject(format!("Nueva consulta de {} {}", first_name, last_name))
            .singlepart(SinglePart::html(inquiry_body_html(
                first_name,
                last_name,
                email,
                phone,
                message_text,
            )))
            .map_err(|e| AppError::Mail(format!("Failed to build email: {}", e)))?;

        self.transport
            .send(message)
            .await
            .map_err(|e| AppError::Mail(format!("SMTP send failed: {}", e)))?;

        tracing::info!(from_email = email, "Inquiry email sent");
        Ok(())
    }
}

fn quotation_body_html(quote_number: &str) -> String {
    format!(
        r#"<div style="font-family: Arial, sans-serif; max-width: 600px; padding: 20px; border: 1px solid #ddd; border-radius: 10px;">
    <h2 style="color: #008cba; text-align: center;">Vidrio al Arte SAS</h2>
    <p>Estimado cliente,</p>
    <p>Adjunto encontrará el archivo correspondiente a la cotización <strong>#{quote_number}</strong>.</p>
    <p>Si tiene alguna pregunta o desea más información, no dude en ponerse en contacto con nosotros.</p>
    <p>Atentamente,</p>
    <p><strong>Vidrio al Arte SAS</strong></p>
    <hr>
    <p style="font-size: 12px; color: #777;">Este es un correo generado automáticamente. Por favor, no responda a este mensaje.</p>
</div>"#
    )
}

fn inquiry_body_html(
    first_name: &str,
    last_name: &str,
    email: &str,
    phone: Option<&str>,
    message: &str,
) -> String {
    format!(
        r#"<div style="font-family: Arial, sans-serif; padding: 20px;">
    <h2 style="color: #008cba;">Nueva pregunta desde el sitio web</h2>
    <p><strong>Nombre:</strong> {first_name} {last_name}</p>
    <p><strong>Correo:</strong> {email}</p>
    <p><strong>Teléfono:</strong> {phone}</p>
    <p><strong>Mensaje:</strong><br>{message}</p>
    <hr />
    <p style="font-size: 12px; color: #777;">Enviado automáticamente desde el formulario de contacto.</p>
</div>"#,
        phone = phone.unwrap_or("-"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quotation_body_substitutes_quote_number() {
        let html = quotation_body_html("COT-0042");
        assert!(html.contains("#COT-0042"));
        assert!(html.contains("Vidrio al Arte"));
    }

    #[test]
    fn inquiry_body_includes_all_fields() {
        let html = inquiry_body_html("Ana", "Gómez", "ana@example.com", Some("3001234567"), "Hola");
        assert!(html.contains("Ana Gómez"));
        assert!(html.contains("ana@example.com"));
        assert!(html.contains("3001234567"));
        assert!(html.contains("Hola"));
    }

    #[test]
    fn inquiry_body_handles_missing_phone() {
        let html = inquiry_body_html("Ana", "Gómez", "ana@example.com", None, "Hola");
        assert!(html.contains("<strong>Teléfono:</strong> -"));
    }

    #[test]
    fn mailer_builds_without_connecting() {
        // Transport construction must not do any network I/O.
        let mailer = Mailer::new(&SmtpConfig {
            host: "smtp.example.com".to_string(),
            port: 587,
            username: Some("user".to_string()),
            password: Some("pass".to_string()),
            from_address: "noreply@vidrioalarte.com".to_string(),
            contact_inbox: "ventas@vidrioalarte.com".to_string(),
        });
        assert!(mailer.is_ok());
    }
}
