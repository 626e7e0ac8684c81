//! Submission orchestration: validate, compose, dispatch, acknowledge.
//!
//! Each submission is one independent unit of work. The service holds no
//! state across calls and returns exactly one terminal result per
//! invocation: an acknowledgment, a structured validation rejection, or a
//! generic dispatch failure.

use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use super::compose;
use super::domain::{ContactForm, EnrollmentForm, EnrollmentRequest, Inquiry};
use super::validate::ValidationError;
use crate::config::BusinessProfile;
use crate::mail::{DispatchError, DispatchMode, MailDispatcher, OutboundEmail};

/// Which form produced a submission; drives acknowledgment wording.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormKind {
    Contact,
    Enrollment,
}

impl FormKind {
    pub const fn slug(self) -> &'static str {
        match self {
            Self::Contact => "contact",
            Self::Enrollment => "enrollment",
        }
    }
}

/// Terminal success result for one submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Acknowledgement {
    pub mode: DispatchMode,
    pub message: String,
}

/// Terminal failure result for one submission.
#[derive(Debug, thiserror::Error)]
pub enum IntakeError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Dispatch(#[from] DispatchError),
}

/// Stateless orchestrator behind both website forms.
pub struct IntakeService<M> {
    dispatcher: Arc<M>,
    business: BusinessProfile,
    send_confirmation: bool,
}

impl<M> IntakeService<M>
where
    M: MailDispatcher + 'static,
{
    pub fn new(dispatcher: Arc<M>, business: BusinessProfile, send_confirmation: bool) -> Self {
        Self {
            dispatcher,
            business,
            send_confirmation,
        }
    }

    pub fn mode(&self) -> DispatchMode {
        self.dispatcher.mode()
    }

    /// Handle one contact form submission end to end.
    pub async fn submit_contact(&self, form: ContactForm) -> Result<Acknowledgement, IntakeError> {
        let inquiry = Inquiry::parse(form)?;

        let notification = compose::contact_notification(&self.business, &inquiry);
        self.dispatcher.dispatch(&notification).await?;

        if self.send_confirmation {
            let confirmation =
                compose::contact_confirmation(&self.business, &inquiry, Utc::now());
            self.deliver_confirmation(FormKind::Contact, &confirmation)
                .await;
        }

        info!(
            form = FormKind::Contact.slug(),
            mode = self.dispatcher.mode().label(),
            "submission accepted"
        );
        Ok(self.acknowledge(FormKind::Contact))
    }

    /// Handle one enrollment form submission end to end.
    pub async fn submit_enrollment(
        &self,
        form: EnrollmentForm,
    ) -> Result<Acknowledgement, IntakeError> {
        let request = EnrollmentRequest::parse(form)?;

        let notification = compose::enrollment_notification(&self.business, &request);
        self.dispatcher.dispatch(&notification).await?;

        if self.send_confirmation {
            let confirmation =
                compose::enrollment_confirmation(&self.business, &request, Utc::now());
            self.deliver_confirmation(FormKind::Enrollment, &confirmation)
                .await;
        }

        info!(
            form = FormKind::Enrollment.slug(),
            mode = self.dispatcher.mode().label(),
            "submission accepted"
        );
        Ok(self.acknowledge(FormKind::Enrollment))
    }

    /// Confirmation failure is deliberately non-fatal: the business
    /// notification already went out, so the submission is acknowledged and
    /// the confirmation problem is only logged.
    async fn deliver_confirmation(&self, kind: FormKind, email: &OutboundEmail) {
        if let Err(error) = self.dispatcher.dispatch(email).await {
            warn!(
                form = kind.slug(),
                %error,
                "confirmation email failed after primary notification"
            );
        }
    }

    fn acknowledge(&self, kind: FormKind) -> Acknowledgement {
        let mode = self.dispatcher.mode();
        let message = match (kind, mode) {
            (FormKind::Contact, DispatchMode::Live) => "Your message has been sent successfully!",
            (FormKind::Contact, DispatchMode::Simulated) => {
                "Your message has been submitted successfully! (Preview Mode - Email not sent)"
            }
            (FormKind::Enrollment, DispatchMode::Live) => {
                "Your enrollment request has been submitted successfully!"
            }
            (FormKind::Enrollment, DispatchMode::Simulated) => {
                "Your enrollment request has been submitted successfully! (Preview Mode - Email not sent)"
            }
        };

        Acknowledgement {
            mode,
            message: message.to_string(),
        }
    }
}
