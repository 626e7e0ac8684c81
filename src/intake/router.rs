//! HTTP surface for the two intake forms.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use serde::Serialize;
use tracing::error;

use super::domain::{ContactForm, EnrollmentForm};
use super::service::{Acknowledgement, IntakeError, IntakeService};
use super::validate::FieldError;
use crate::mail::MailDispatcher;

/// Result shape consumed by the website's form components.
#[derive(Debug, Serialize)]
pub struct SubmissionResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<FieldError>>,
}

impl SubmissionResponse {
    fn accepted(ack: Acknowledgement) -> Self {
        Self {
            success: true,
            message: ack.message,
            errors: None,
        }
    }

    fn rejected(errors: Vec<FieldError>) -> Self {
        Self {
            success: false,
            message: "Please check your form inputs.".to_string(),
            errors: Some(errors),
        }
    }

    fn failed(message: &str) -> Self {
        Self {
            success: false,
            message: message.to_string(),
            errors: None,
        }
    }
}

/// Router builder exposing the contact and enrollment intake endpoints.
pub fn intake_router<M>(service: Arc<IntakeService<M>>) -> Router
where
    M: MailDispatcher + 'static,
{
    Router::new()
        .route("/api/v1/intake/contact", post(contact_handler::<M>))
        .route("/api/v1/intake/enrollment", post(enrollment_handler::<M>))
        .with_state(service)
}

pub(crate) async fn contact_handler<M>(
    State(service): State<Arc<IntakeService<M>>>,
    Json(form): Json<ContactForm>,
) -> Response
where
    M: MailDispatcher + 'static,
{
    let outcome = service.submit_contact(form).await;
    respond(
        outcome,
        "Failed to send your message. Please try again later.",
        "contact",
    )
}

pub(crate) async fn enrollment_handler<M>(
    State(service): State<Arc<IntakeService<M>>>,
    Json(form): Json<EnrollmentForm>,
) -> Response
where
    M: MailDispatcher + 'static,
{
    let outcome = service.submit_enrollment(form).await;
    respond(
        outcome,
        "Failed to submit your enrollment request. Please try again later.",
        "enrollment",
    )
}

fn respond(
    outcome: Result<Acknowledgement, IntakeError>,
    failure_message: &str,
    form: &str,
) -> Response {
    match outcome {
        Ok(ack) => (StatusCode::OK, Json(SubmissionResponse::accepted(ack))).into_response(),
        Err(IntakeError::Validation(rejection)) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(SubmissionResponse::rejected(rejection.errors)),
        )
            .into_response(),
        Err(IntakeError::Dispatch(error)) => {
            // Relay internals stay in the server log; the caller only gets a
            // generic retry hint.
            error!(form, %error, "notification dispatch failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(SubmissionResponse::failed(failure_message)),
            )
                .into_response()
        }
    }
}
