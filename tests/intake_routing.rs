//! HTTP-level scenarios: the intake router must expose the
//! `{ success, message, errors? }` contract over both endpoints.

mod common {
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;

    use daycare_intake::config::BusinessProfile;
    use daycare_intake::intake::{intake_router, IntakeService};
    use daycare_intake::mail::{DispatchError, DispatchMode, MailDispatcher, OutboundEmail};

    #[derive(Clone)]
    pub(super) struct StubDispatcher {
        mode: DispatchMode,
        fail: bool,
        sent: Arc<Mutex<Vec<OutboundEmail>>>,
    }

    impl StubDispatcher {
        pub(super) fn live() -> Self {
            Self {
                mode: DispatchMode::Live,
                fail: false,
                sent: Arc::new(Mutex::new(Vec::new())),
            }
        }

        pub(super) fn simulated() -> Self {
            Self {
                mode: DispatchMode::Simulated,
                fail: false,
                sent: Arc::new(Mutex::new(Vec::new())),
            }
        }

        pub(super) fn failing() -> Self {
            Self {
                mode: DispatchMode::Live,
                fail: true,
                sent: Arc::new(Mutex::new(Vec::new())),
            }
        }

        pub(super) fn sent_count(&self) -> usize {
            self.sent.lock().expect("lock").len()
        }
    }

    #[async_trait]
    impl MailDispatcher for StubDispatcher {
        fn mode(&self) -> DispatchMode {
            self.mode
        }

        async fn dispatch(&self, email: &OutboundEmail) -> Result<(), DispatchError> {
            if self.fail {
                return Err(DispatchError::MissingCredential);
            }
            self.sent.lock().expect("lock").push(email.clone());
            Ok(())
        }
    }

    pub(super) fn build_router(dispatcher: StubDispatcher) -> axum::Router {
        let service = Arc::new(IntakeService::new(
            Arc::new(dispatcher),
            BusinessProfile::default(),
            false,
        ));
        intake_router(service)
    }
}

mod routing {
    use super::common::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn post_json(uri: &str, payload: &Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(payload.to_string()))
            .expect("request")
    }

    fn contact_payload() -> Value {
        json!({
            "name": "Jo Lee",
            "email": "jo@example.com",
            "phone": "2066889088",
            "subject": "Tour",
            "message": "Can we visit Saturday?"
        })
    }

    fn enrollment_payload() -> Value {
        json!({
            "parentName": "Dana Kim",
            "email": "dana@example.com",
            "phone": "1-206-688-9088",
            "childName": "Ari Kim",
            "childDob": "2022-03-05",
            "program": "toddlers",
            "schedule": "fulltime",
            "startDate": "2025-09-02"
        })
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("body");
        serde_json::from_slice(&bytes).expect("json")
    }

    #[tokio::test]
    async fn valid_contact_submission_returns_success() {
        let dispatcher = StubDispatcher::live();
        let router = build_router(dispatcher.clone());

        let response = router
            .oneshot(post_json("/api/v1/intake/contact", &contact_payload()))
            .await
            .expect("router dispatch");

        assert_eq!(response.status(), StatusCode::OK);
        let payload = body_json(response).await;
        assert_eq!(payload.get("success"), Some(&json!(true)));
        assert_eq!(
            payload.get("message").and_then(Value::as_str),
            Some("Your message has been sent successfully!")
        );
        assert!(payload.get("errors").is_none());
        assert_eq!(dispatcher.sent_count(), 1);
    }

    #[tokio::test]
    async fn simulated_mode_is_reported_in_the_message() {
        let router = build_router(StubDispatcher::simulated());

        let response = router
            .oneshot(post_json("/api/v1/intake/contact", &contact_payload()))
            .await
            .expect("router dispatch");

        assert_eq!(response.status(), StatusCode::OK);
        let payload = body_json(response).await;
        assert!(payload
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .contains("Preview Mode"));
    }

    #[tokio::test]
    async fn invalid_phone_yields_structured_field_errors() {
        let router = build_router(StubDispatcher::live());

        let mut payload = contact_payload();
        payload["phone"] = json!("123");

        let response = router
            .oneshot(post_json("/api/v1/intake/contact", &payload))
            .await
            .expect("router dispatch");

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let payload = body_json(response).await;
        assert_eq!(payload.get("success"), Some(&json!(false)));

        let errors = payload
            .get("errors")
            .and_then(Value::as_array)
            .expect("errors list");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].get("field"), Some(&json!("phone")));
        assert!(errors[0]
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .contains("valid USA phone number"));
    }

    #[tokio::test]
    async fn absent_fields_are_treated_as_empty_strings() {
        let router = build_router(StubDispatcher::live());

        let response = router
            .oneshot(post_json("/api/v1/intake/enrollment", &json!({})))
            .await
            .expect("router dispatch");

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let payload = body_json(response).await;
        let errors = payload
            .get("errors")
            .and_then(Value::as_array)
            .expect("errors list");
        assert_eq!(errors.len(), 8);
    }

    #[tokio::test]
    async fn valid_enrollment_submission_returns_success() {
        let dispatcher = StubDispatcher::live();
        let router = build_router(dispatcher.clone());

        let response = router
            .oneshot(post_json(
                "/api/v1/intake/enrollment",
                &enrollment_payload(),
            ))
            .await
            .expect("router dispatch");

        assert_eq!(response.status(), StatusCode::OK);
        let payload = body_json(response).await;
        assert_eq!(payload.get("success"), Some(&json!(true)));
        assert_eq!(
            payload.get("message").and_then(Value::as_str),
            Some("Your enrollment request has been submitted successfully!")
        );
        assert_eq!(dispatcher.sent_count(), 1);
    }

    #[tokio::test]
    async fn dispatch_failure_is_generic_to_the_caller() {
        let router = build_router(StubDispatcher::failing());

        let response = router
            .oneshot(post_json("/api/v1/intake/contact", &contact_payload()))
            .await
            .expect("router dispatch");

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let payload = body_json(response).await;
        assert_eq!(payload.get("success"), Some(&json!(false)));
        assert_eq!(
            payload.get("message").and_then(Value::as_str),
            Some("Failed to send your message. Please try again later.")
        );
        // No relay detail leaks into the response.
        assert!(payload.get("errors").is_none());
    }
}
