//! Templated email delivery.
//!
//! [`Mailer`] is the transport seam used by the user service. The
//! production implementation, [`EmailService`], renders `<template>.html`
//! (and `<template>.txt` when present) from the template directory with
//! minijinja, then hands the message to SMTP through `lettre`.

use std::collections::HashMap;

use anyhow::anyhow;
use async_trait::async_trait;
use lettre::message::{MultiPart, SinglePart, header};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use minijinja::{Environment, ErrorKind, path_loader};
use tracing::{info, instrument};
use vape_config::EmailConfig;
use vape_core::AppError;

/// A message addressed to one user, rendered from a named template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplatedEmail {
    pub to_email: String,
    pub to_name: String,
    pub template: String,
    pub vars: HashMap<String, String>,
}

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send_templated(&self, email: TemplatedEmail) -> Result<(), AppError>;
}

pub struct EmailService {
    config: EmailConfig,
    templates: Environment<'static>,
}

impl EmailService {
    pub fn new(config: EmailConfig) -> Self {
        let mut templates = Environment::new();
        templates.set_loader(path_loader(config.template_dir.clone()));

        Self { config, templates }
    }

    /// Renders the HTML and plain-text bodies of `template`.
    ///
    /// The loader only resolves names inside the template directory. Without
    /// a `.txt` variant the HTML body doubles as the text body.
    fn render(
        &self,
        template: &str,
        vars: &HashMap<String, String>,
    ) -> Result<(String, String), AppError> {
        let render_error = |e: minijinja::Error| {
            AppError::internal(
                anyhow::Error::new(e).context(format!("Failed to render email template {}", template)),
            )
        };

        let html_body = self
            .templates
            .get_template(&format!("{}.html", template))
            .and_then(|tpl| tpl.render(vars))
            .map_err(render_error)?;

        let text_body = match self.templates.get_template(&format!("{}.txt", template)) {
            Ok(tpl) => tpl.render(vars).map_err(render_error)?,
            Err(e) if matches!(e.kind(), ErrorKind::TemplateNotFound) => html_body.clone(),
            Err(e) => return Err(render_error(e)),
        };

        Ok((html_body, text_body))
    }

    #[instrument(skip(self, text_body, html_body))]
    async fn send_email(
        &self,
        to_email: &str,
        to_name: &str,
        subject: &str,
        text_body: String,
        html_body: String,
    ) -> Result<(), AppError> {
        let from = format!("{} <{}>", self.config.from_name, self.config.from_email);
        let to = format!("{} <{}>", to_name, to_email);

        let email = Message::builder()
            .from(
                from.parse()
                    .map_err(|e| AppError::internal(anyhow!("Invalid from email: {}", e)))?,
            )
            .to(to
                .parse()
                .map_err(|e| AppError::internal(anyhow!("Invalid to email: {}", e)))?)
            .subject(subject)
            .multipart(
                MultiPart::alternative()
                    .singlepart(
                        SinglePart::builder()
                            .header(header::ContentType::TEXT_PLAIN)
                            .body(text_body),
                    )
                    .singlepart(
                        SinglePart::builder()
                            .header(header::ContentType::TEXT_HTML)
                            .body(html_body),
                    ),
            )
            .map_err(|e| AppError::internal(anyhow!("Failed to build email: {}", e)))?;

        let mailer = if self.config.smtp_username.is_empty() {
            SmtpTransport::builder_dangerous(&self.config.smtp_host)
                .port(self.config.smtp_port)
                .build()
        } else {
            let creds = Credentials::new(
                self.config.smtp_username.clone(),
                self.config.smtp_password.clone(),
            );

            SmtpTransport::relay(&self.config.smtp_host)
                .map_err(|e| AppError::internal(anyhow!("Failed to create SMTP relay: {}", e)))?
                .port(self.config.smtp_port)
                .credentials(creds)
                .build()
        };

        tokio::task::spawn_blocking(move || mailer.send(&email))
            .await
            .map_err(|e| AppError::internal(anyhow!("Task join error: {}", e)))?
            .map_err(|e| AppError::internal(anyhow!("Failed to send email: {}", e)))?;

        Ok(())
    }
}

#[async_trait]
impl Mailer for EmailService {
    #[instrument(skip(self, email), fields(template = %email.template))]
    async fn send_templated(&self, email: TemplatedEmail) -> Result<(), AppError> {
        let mut vars = email.vars;
        vars.entry("name".to_string())
            .or_insert_with(|| email.to_name.clone());
        vars.entry("email".to_string())
            .or_insert_with(|| email.to_email.clone());

        let subject = vars
            .get("subject")
            .cloned()
            .unwrap_or_else(|| default_subject(&email.template));
        let (html_body, text_body) = self.render(&email.template, &vars)?;

        if !self.config.enabled {
            info!(
                to = %email.to_email,
                subject = %subject,
                "Email delivery disabled, message not sent"
            );
            return Ok(());
        }

        self.send_email(&email.to_email, &email.to_name, &subject, text_body, html_body)
            .await
    }
}

/// "password-reset" becomes "Password reset".
fn default_subject(template: &str) -> String {
    let words = template.replace(['-', '_'], " ");
    let mut chars = words.chars();

    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(any(test, feature = "test-utils"))]
pub use recording::RecordingMailer;

#[cfg(any(test, feature = "test-utils"))]
mod recording {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use tokio::sync::{Mutex, Notify};

    /// A [`Mailer`] that keeps every message instead of sending it.
    #[derive(Default)]
    pub struct RecordingMailer {
        sent: Mutex<Vec<TemplatedEmail>>,
        delivered: Notify,
        failing: AtomicBool,
    }

    impl RecordingMailer {
        pub fn new() -> Self {
            Self::default()
        }

        /// Records messages as usual but reports every send as failed.
        pub fn set_failing(&self, failing: bool) {
            self.failing.store(failing, Ordering::SeqCst);
        }

        pub async fn sent(&self) -> Vec<TemplatedEmail> {
            self.sent.lock().await.clone()
        }

        /// Waits until at least `count` messages have been recorded.
        pub async fn wait_for(&self, count: usize) -> Vec<TemplatedEmail> {
            loop {
                {
                    let sent = self.sent.lock().await;
                    if sent.len() >= count {
                        return sent.clone();
                    }
                }
                self.delivered.notified().await;
            }
        }
    }

    #[async_trait]
    impl Mailer for RecordingMailer {
        async fn send_templated(&self, email: TemplatedEmail) -> Result<(), AppError> {
            self.sent.lock().await.push(email);
            self.delivered.notify_one();

            if self.failing.load(Ordering::SeqCst) {
                return Err(AppError::internal(anyhow!("smtp connection refused")));
            }
            Ok(())
        }
    }
}
