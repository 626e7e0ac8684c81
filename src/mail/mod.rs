//! Outbound email plumbing: the message model, the dispatch strategy seam,
//! and the two dispatcher implementations (SMTP relay and log-only
//! simulation).

mod logging;
mod smtp;

pub use logging::LoggingDispatcher;
pub use smtp::SmtpRelayDispatcher;

use async_trait::async_trait;

use crate::config::AppConfig;

/// Whether a dispatcher actually contacts the mail relay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchMode {
    Simulated,
    Live,
}

impl DispatchMode {
    pub const fn label(self) -> &'static str {
        match self {
            DispatchMode::Simulated => "simulated",
            DispatchMode::Live => "live",
        }
    }
}

/// One side of an email exchange: optional display name plus address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailAddress {
    pub name: Option<String>,
    pub email: String,
}

impl MailAddress {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            email: email.into(),
        }
    }

    pub fn bare(email: impl Into<String>) -> Self {
        Self {
            name: None,
            email: email.into(),
        }
    }
}

/// A fully composed message ready for delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundEmail {
    pub from: MailAddress,
    pub to: MailAddress,
    pub reply_to: MailAddress,
    pub subject: String,
    pub text_body: String,
    pub html_body: String,
    /// Extra RFC 5322 headers appended verbatim (e.g. `List-Unsubscribe`).
    pub extra_headers: Vec<(&'static str, String)>,
}

/// Errors raised while building or delivering a message.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("mail relay credential is not configured")]
    MissingCredential,
    #[error("invalid mail address: {0}")]
    Address(#[from] lettre::address::AddressError),
    #[error("could not assemble mail message: {0}")]
    Message(#[from] lettre::error::Error),
    #[error("mail relay transport error: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),
}

/// Delivery strategy injected into the intake service so the orchestrator is
/// testable without a real mail relay.
#[async_trait]
pub trait MailDispatcher: Send + Sync {
    fn mode(&self) -> DispatchMode;

    async fn dispatch(&self, email: &OutboundEmail) -> Result<(), DispatchError>;
}

/// Dispatcher selected once at startup from the loaded configuration.
pub enum ConfiguredDispatcher {
    Simulated(LoggingDispatcher),
    Live(SmtpRelayDispatcher),
}

impl ConfiguredDispatcher {
    /// Simulated unless the stage is production and a relay credential is
    /// present; a missing credential overrides the stage indicator.
    pub fn from_config(config: &AppConfig) -> Result<Self, DispatchError> {
        if config.live_dispatch() {
            Ok(Self::Live(SmtpRelayDispatcher::from_config(&config.mail)?))
        } else {
            Ok(Self::Simulated(LoggingDispatcher::default()))
        }
    }
}

#[async_trait]
impl MailDispatcher for ConfiguredDispatcher {
    fn mode(&self) -> DispatchMode {
        match self {
            Self::Simulated(inner) => inner.mode(),
            Self::Live(inner) => inner.mode(),
        }
    }

    async fn dispatch(&self, email: &OutboundEmail) -> Result<(), DispatchError> {
        match self {
            Self::Simulated(inner) => inner.dispatch(email).await,
            Self::Live(inner) => inner.dispatch(email).await,
        }
    }
}
