//! Form intake and email notification service backing a daycare marketing
//! site.
//!
//! Two stateless request handlers (contact and enrollment) validate the
//! submitted fields, compose templated notification emails, and hand them to
//! a [`mail::MailDispatcher`] that either relays them over SMTP or, outside
//! production, records the would-be delivery in the operational log.

pub mod config;
pub mod error;
pub mod intake;
pub mod mail;
pub mod telemetry;
