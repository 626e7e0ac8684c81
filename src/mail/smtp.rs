use async_trait::async_trait;
use lettre::message::header::{HeaderName, HeaderValue};
use lettre::message::{Mailbox, MultiPart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Address, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use super::{DispatchError, DispatchMode, MailAddress, MailDispatcher, OutboundEmail};
use crate::config::MailConfig;

/// Live delivery over implicit TLS to the configured SMTP relay.
///
/// The transport keeps a connection pool internally; each dispatch is still
/// an independent delivery attempt with no retry.
pub struct SmtpRelayDispatcher {
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpRelayDispatcher {
    pub fn from_config(config: &MailConfig) -> Result<Self, DispatchError> {
        let password = config
            .app_password
            .as_deref()
            .ok_or(DispatchError::MissingCredential)?;

        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(&config.smtp_host)?
            .port(config.smtp_port)
            .credentials(Credentials::new(
                config.username.clone(),
                password.to_owned(),
            ))
            .timeout(Some(config.timeout))
            .build();

        Ok(Self { transport })
    }
}

fn mailbox(address: &MailAddress) -> Result<Mailbox, DispatchError> {
    let parsed: Address = address.email.parse()?;
    Ok(Mailbox::new(address.name.clone(), parsed))
}

#[async_trait]
impl MailDispatcher for SmtpRelayDispatcher {
    fn mode(&self) -> DispatchMode {
        DispatchMode::Live
    }

    async fn dispatch(&self, email: &OutboundEmail) -> Result<(), DispatchError> {
        let mut message = Message::builder()
            .from(mailbox(&email.from)?)
            .to(mailbox(&email.to)?)
            .reply_to(mailbox(&email.reply_to)?)
            .subject(email.subject.clone())
            .multipart(MultiPart::alternative_plain_html(
                email.text_body.clone(),
                email.html_body.clone(),
            ))?;

        for (name, value) in &email.extra_headers {
            let header = HeaderValue::new(HeaderName::new_from_ascii_str(*name), value.clone());
            message.headers_mut().insert_raw(header);
        }

        self.transport.send(message).await?;
        Ok(())
    }
}
