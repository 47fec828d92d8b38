//! SMTP alert delivery.

use async_trait::async_trait;
use lettre::message::{Mailbox, MultiPart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::transport::smtp::client::{Tls, TlsParameters};
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::config::SmtpConfig;
use crate::notify::{message, AlertEpisode, Notifier, NotifyError};

/// Sends alerts as multipart (plain + HTML) email.
pub struct EmailNotifier {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    to: Mailbox,
}

impl EmailNotifier {
    /// Build the notifier. No connection is opened until the first alert.
    pub fn new(config: &SmtpConfig) -> Result<Self, NotifyError> {
        let from = parse_mailbox(&config.from)?;
        let to = parse_mailbox(&config.to)?;

        let tls_parameters = TlsParameters::new(config.host.clone())?;
        let tls = if config.secure {
            Tls::Wrapper(tls_parameters)
        } else {
            Tls::Opportunistic(tls_parameters)
        };

        let transport = AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(config.host.as_str())
            .port(config.port)
            .tls(tls)
            .credentials(Credentials::new(
                config.username.clone(),
                config.password.clone(),
            ))
            .timeout(Some(config.timeout()))
            .build();

        tracing::debug!(
            host = %config.host,
            port = config.port,
            secure = config.secure,
            to = %to,
            "Email notifier configured"
        );

        Ok(Self {
            transport,
            from,
            to,
        })
    }

    /// Assemble the alert email for an episode.
    pub fn build_message(&self, episode: &AlertEpisode) -> Result<Message, NotifyError> {
        let email = Message::builder()
            .from(self.from.clone())
            .to(self.to.clone())
            .subject(message::subject(episode))
            .multipart(MultiPart::alternative_plain_html(
                message::text_body(episode),
                message::html_body(episode),
            ))?;
        Ok(email)
    }
}

#[async_trait]
impl Notifier for EmailNotifier {
    async fn notify(&self, episode: &AlertEpisode) -> Result<(), NotifyError> {
        let email = self.build_message(episode)?;
        self.transport.send(email).await?;
        Ok(())
    }

    fn name(&self) -> &str {
        "email"
    }
}

fn parse_mailbox(raw: &str) -> Result<Mailbox, NotifyError> {
    raw.parse::<Mailbox>()
        .map_err(|e| NotifyError::Address(format!("{}: {}", raw, e)))
}
