use async_trait::async_trait;
use tracing::info;

use super::{DispatchError, DispatchMode, MailDispatcher, OutboundEmail};

/// Simulated delivery: records the would-be message in the operational log
/// so submissions can be inspected during development and preview.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingDispatcher;

#[async_trait]
impl MailDispatcher for LoggingDispatcher {
    fn mode(&self) -> DispatchMode {
        DispatchMode::Simulated
    }

    async fn dispatch(&self, email: &OutboundEmail) -> Result<(), DispatchError> {
        // The plaintext body carries every submitted field verbatim.
        info!(
            to = %email.to.email,
            reply_to = %email.reply_to.email,
            subject = %email.subject,
            body = %email.text_body,
            "email delivery simulated (preview mode)"
        );
        Ok(())
    }
}
