//! Declarative field validation shared by both intake forms.
//!
//! Rules are evaluated in full so the caller receives every failing field,
//! not just the first. Validation is a pure function of the raw input and
//! runs before any side effect.

use serde::Serialize;

/// A single failed rule, addressed to the offending form field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Rejection carrying one entry per failing rule.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("submission rejected: {} field error(s)", .errors.len())]
pub struct ValidationError {
    pub errors: Vec<FieldError>,
}

/// Collects rule outcomes across a whole form before rendering a verdict.
#[derive(Debug, Default)]
pub struct RuleSet {
    errors: Vec<FieldError>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    fn fail(&mut self, field: &str, message: &str) {
        self.errors.push(FieldError {
            field: field.to_string(),
            message: message.to_string(),
        });
    }

    /// Require at least `min` characters.
    pub fn min_len(&mut self, field: &str, value: &str, min: usize, message: &str) -> &mut Self {
        if value.chars().count() < min {
            self.fail(field, message);
        }
        self
    }

    /// Require a plausible email address shape.
    pub fn email(&mut self, field: &str, value: &str, message: &str) -> &mut Self {
        if !is_email(value) {
            self.fail(field, message);
        }
        self
    }

    /// Require a ten digit USA phone number (leading country code tolerated).
    pub fn usa_phone(&mut self, field: &str, value: &str) -> &mut Self {
        if value.is_empty() {
            self.fail(field, "Phone number is required");
        } else if !is_usa_phone(value) {
            self.fail(field, "Please enter a valid USA phone number (10 digits)");
        }
        self
    }

    pub fn finish(self) -> Result<(), ValidationError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationError {
                errors: self.errors,
            })
        }
    }
}

/// Strip every non-digit character and accept exactly ten digits, or eleven
/// with a leading country-code "1". Formatting (dashes, parens, spaces) is
/// ignored; area-code plausibility is not checked.
pub fn is_usa_phone(raw: &str) -> bool {
    let digits: String = raw.chars().filter(|ch| ch.is_ascii_digit()).collect();
    digits.len() == 10 || (digits.len() == 11 && digits.starts_with('1'))
}

/// Structural check matching the website's client-side rule: a single "@"
/// with a dotted domain and no whitespace. Deliverability is not verified.
pub fn is_email(raw: &str) -> bool {
    if raw.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = raw.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain.split('.').count() >= 2
        && domain.split('.').all(|part| !part.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formatted_ten_digit_phone_is_accepted() {
        assert!(is_usa_phone("(206) 688-9088"));
        assert!(is_usa_phone("2066889088"));
        assert!(is_usa_phone("206 688 9088"));
    }

    #[test]
    fn eleven_digits_require_leading_one() {
        assert!(is_usa_phone("1-206-688-9088"));
        assert!(!is_usa_phone("2-206-688-9088"));
    }

    #[test]
    fn wrong_digit_counts_are_rejected() {
        assert!(!is_usa_phone("206-68-908"));
        assert!(!is_usa_phone("123"));
        assert!(!is_usa_phone("120668890881"));
        assert!(!is_usa_phone("no digits here"));
    }

    #[test]
    fn email_shapes() {
        assert!(is_email("jo@example.com"));
        assert!(is_email("jo.lee+tour@mail.example.co"));
        assert!(!is_email(""));
        assert!(!is_email("jo@example"));
        assert!(!is_email("@example.com"));
        assert!(!is_email("jo@exam ple.com"));
        assert!(!is_email("jo@@example.com"));
        assert!(!is_email("jo@example..com"));
    }

    #[test]
    fn ruleset_collects_every_failure() {
        let mut rules = RuleSet::new();
        rules
            .min_len("name", "J", 2, "Name must be at least 2 characters")
            .email("email", "nope", "Please enter a valid email address")
            .usa_phone("phone", "123");

        let rejection = rules.finish().expect_err("three rules fail");
        let fields: Vec<&str> = rejection
            .errors
            .iter()
            .map(|error| error.field.as_str())
            .collect();
        assert_eq!(fields, vec!["name", "email", "phone"]);
    }

    #[test]
    fn empty_phone_gets_required_message() {
        let mut rules = RuleSet::new();
        rules.usa_phone("phone", "");
        let rejection = rules.finish().expect_err("phone missing");
        assert_eq!(rejection.errors[0].message, "Phone number is required");
    }

    #[test]
    fn passing_rules_yield_ok() {
        let mut rules = RuleSet::new();
        rules
            .min_len("name", "Jo Lee", 2, "unused")
            .email("email", "jo@example.com", "unused")
            .usa_phone("phone", "2066889088");
        assert!(rules.finish().is_ok());
    }
}
