//! The form-intake workflow: validation, email composition, and the
//! submission orchestrators behind the contact and enrollment forms.

pub mod compose;
pub mod domain;
pub mod router;
pub mod service;
pub mod validate;

pub use domain::{ContactForm, EnrollmentForm, EnrollmentRequest, Inquiry, Program, Schedule};
pub use router::{intake_router, SubmissionResponse};
pub use service::{Acknowledgement, FormKind, IntakeError, IntakeService};
pub use validate::{FieldError, ValidationError};
