//! Typed entities behind the two website forms.
//!
//! Raw form payloads arrive as flat string mappings; absent fields
//! deserialize to empty strings so every rule can report against them.

use chrono::NaiveDate;
use serde::Deserialize;

use super::validate::{RuleSet, ValidationError};

/// Raw contact form payload.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub subject: String,
    pub message: String,
}

/// A validated visitor inquiry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inquiry {
    pub name: String,
    pub email: String,
    /// Preserved exactly as typed; only the digit projection was validated.
    pub phone: String,
    pub subject: String,
    pub message: String,
}

impl Inquiry {
    /// Validate a raw submission, reporting every failing field at once.
    pub fn parse(form: ContactForm) -> Result<Self, ValidationError> {
        let mut rules = RuleSet::new();
        rules
            .min_len("name", &form.name, 2, "Name must be at least 2 characters")
            .email("email", &form.email, "Please enter a valid email address")
            .usa_phone("phone", &form.phone)
            .min_len("subject", &form.subject, 2, "Subject is required")
            .min_len(
                "message",
                &form.message,
                10,
                "Message must be at least 10 characters",
            );
        rules.finish()?;

        Ok(Self {
            name: form.name,
            email: form.email,
            phone: form.phone,
            subject: form.subject,
            message: form.message,
        })
    }
}

/// Raw enrollment form payload.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EnrollmentForm {
    pub parent_name: String,
    pub email: String,
    pub phone: String,
    pub child_name: String,
    pub child_dob: String,
    pub program: String,
    pub schedule: String,
    pub start_date: String,
    pub message: String,
}

/// A validated enrollment request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrollmentRequest {
    pub parent_name: String,
    pub email: String,
    pub phone: String,
    pub child_name: String,
    pub child_dob: String,
    pub program: Program,
    pub schedule: Schedule,
    pub start_date: String,
    /// Optional free text; empty means absent.
    pub message: String,
}

impl EnrollmentRequest {
    pub fn parse(form: EnrollmentForm) -> Result<Self, ValidationError> {
        let mut rules = RuleSet::new();
        rules
            .min_len("parentName", &form.parent_name, 2, "Parent name is required")
            .email("email", &form.email, "Please enter a valid email address")
            .usa_phone("phone", &form.phone)
            .min_len("childName", &form.child_name, 2, "Child's name is required")
            .min_len(
                "childDob",
                &form.child_dob,
                2,
                "Child's date of birth is required",
            )
            .min_len("program", &form.program, 2, "Please select a program")
            .min_len("schedule", &form.schedule, 2, "Please select a schedule")
            .min_len("startDate", &form.start_date, 2, "Start date is required");
        rules.finish()?;

        Ok(Self {
            parent_name: form.parent_name,
            email: form.email,
            phone: form.phone,
            child_name: form.child_name,
            child_dob: form.child_dob,
            program: Program::from_code(&form.program),
            schedule: Schedule::from_code(&form.schedule),
            start_date: form.start_date,
            message: form.message,
        })
    }
}

/// Care programs offered by the daycare. Unrecognized codes map to a
/// fallback label rather than failing validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Program {
    Infants,
    Toddlers,
    Preschool,
    Mixed,
    Unknown,
}

impl Program {
    pub fn from_code(code: &str) -> Self {
        match code.trim().to_ascii_lowercase().as_str() {
            "infants" => Self::Infants,
            "toddlers" => Self::Toddlers,
            "preschool" => Self::Preschool,
            "mixed" => Self::Mixed,
            _ => Self::Unknown,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Infants => "Infant Care (6 months - 18 months)",
            Self::Toddlers => "Toddler Care (18 months - 3 years)",
            Self::Preschool => "Preschooler Care (3 - 6 years)",
            Self::Mixed => "Multiple Age Groups (for siblings)",
            Self::Unknown => "Unknown Program",
        }
    }
}

/// Weekly attendance options, with the same fallback policy as [`Program`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Schedule {
    FullTime,
    PartTime,
    Saturday,
    Unknown,
}

impl Schedule {
    pub fn from_code(code: &str) -> Self {
        match code.trim().to_ascii_lowercase().as_str() {
            "fulltime" | "full-time" => Self::FullTime,
            "parttime" | "part-time" => Self::PartTime,
            "saturday" => Self::Saturday,
            _ => Self::Unknown,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::FullTime => "Full-time (Monday-Friday)",
            Self::PartTime => "Part-time (Select days)",
            Self::Saturday => "Saturday care",
            Self::Unknown => "Unknown Schedule",
        }
    }
}

/// Render a form-supplied `YYYY-MM-DD` date as "Month D, YYYY" (US
/// convention). Unparseable input is shown verbatim rather than rejected.
pub fn long_date(raw: &str) -> String {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map(|date| date.format("%B %-d, %Y").to_string())
        .unwrap_or_else(|_| raw.trim().to_string())
}
