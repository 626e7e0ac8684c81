//! Email composition: turns validated submissions into the business
//! notification and the optional submitter confirmation.
//!
//! Composition is pure; it runs only after validation has succeeded and has
//! no failure mode of its own. Address parsing happens later, inside the
//! SMTP dispatcher.

use chrono::{DateTime, Utc};

use super::domain::{long_date, EnrollmentRequest, Inquiry};
use crate::config::BusinessProfile;
use crate::mail::{MailAddress, OutboundEmail};

/// Business notification for a contact inquiry. Reply-to points at the
/// submitter so the business can answer directly.
pub fn contact_notification(business: &BusinessProfile, inquiry: &Inquiry) -> OutboundEmail {
    let html = format!(
        "<h2>New Contact Form Submission</h2>\n\
         <p><strong>Name:</strong> {name}</p>\n\
         <p><strong>Email:</strong> {email}</p>\n\
         <p><strong>Phone:</strong> {phone}</p>\n\
         <p><strong>Subject:</strong> {subject}</p>\n\
         <p><strong>Message:</strong></p>\n\
         <p>{message}</p>",
        name = escape_html(&inquiry.name),
        email = escape_html(&inquiry.email),
        phone = escape_html(&inquiry.phone),
        subject = escape_html(&inquiry.subject),
        message = multiline_html(&inquiry.message),
    );

    let text = format!(
        "New Contact Form Submission\n\n\
         Name: {}\nEmail: {}\nPhone: {}\nSubject: {}\nMessage:\n{}\n",
        inquiry.name, inquiry.email, inquiry.phone, inquiry.subject, inquiry.message
    );

    OutboundEmail {
        from: business_mailbox(business),
        to: business_mailbox(business),
        reply_to: MailAddress::bare(inquiry.email.clone()),
        subject: format!("Website Contact: {}", inquiry.subject),
        text_body: text,
        html_body: html,
        extra_headers: Vec::new(),
    }
}

/// Confirmation sent back to the inquirer when the flag is enabled.
pub fn contact_confirmation(
    business: &BusinessProfile,
    inquiry: &Inquiry,
    submitted_at: DateTime<Utc>,
) -> OutboundEmail {
    let content = format!(
        "<p>Dear {name},</p>\n\
         <p>Thank you for contacting {biz}. We have received your message and will get back to you as soon as possible.</p>\n\
         <div class=\"summary\">\n\
         <p><strong>Your message details:</strong></p>\n\
         <p><strong>Subject:</strong> {subject}</p>\n\
         <p><strong>Message:</strong></p>\n\
         <p>{message}</p>\n\
         </div>\n\
         <p>If you have any immediate questions, please don't hesitate to call us at {phone}.</p>\n\
         <p>Warm regards,</p>\n\
         <p>{biz} Team<br>\n{phone}<br>\n\
         <a href=\"mailto:{email}\">{email}</a></p>",
        name = escape_html(&inquiry.name),
        biz = escape_html(&business.name),
        subject = escape_html(&inquiry.subject),
        message = multiline_html(&inquiry.message),
        phone = escape_html(&business.phone),
        email = escape_html(&business.email),
    );

    let html = branded_shell(
        business,
        "Contact Confirmation",
        "We've Received Your Message",
        &format!("Thank you for reaching out to {}", business.name),
        &content,
    );

    let text = format!(
        "We've Received Your Message\n\n\
         Dear {name},\n\n\
         Thank you for contacting {biz}. We have received your message and will get back to you as soon as possible.\n\n\
         YOUR MESSAGE DETAILS:\n\
         Subject: {subject}\n\
         Message: {message}\n\n\
         If you have any immediate questions, please don't hesitate to call us at {phone}.\n\n\
         Warm regards,\n\
         {biz} Team\n\
         {phone}\n\
         {email}\n\n\
         {street}\n\
         {website}\n",
        name = inquiry.name,
        biz = business.name,
        subject = inquiry.subject,
        message = inquiry.message,
        phone = business.phone,
        email = business.email,
        street = business.street_address,
        website = business.website,
    );

    OutboundEmail {
        from: business_mailbox(business),
        to: MailAddress::new(inquiry.name.clone(), inquiry.email.clone()),
        reply_to: MailAddress::bare(business.email.clone()),
        subject: "Thank you for contacting us".to_string(),
        text_body: text,
        html_body: html,
        extra_headers: courtesy_headers(business, "contact", submitted_at),
    }
}

/// Business notification for an enrollment request, organized into labeled
/// sections. The "Additional Information" section appears only when the
/// optional message is non-empty.
pub fn enrollment_notification(
    business: &BusinessProfile,
    request: &EnrollmentRequest,
) -> OutboundEmail {
    let mut html = format!(
        "<h2>New Enrollment Request</h2>\n\
         <h3>Parent/Guardian Information</h3>\n\
         <p><strong>Name:</strong> {parent}</p>\n\
         <p><strong>Email:</strong> {email}</p>\n\
         <p><strong>Phone:</strong> {phone}</p>\n\
         <h3>Child Information</h3>\n\
         <p><strong>Name:</strong> {child}</p>\n\
         <p><strong>Date of Birth:</strong> {dob}</p>\n\
         <h3>Program Details</h3>\n\
         <p><strong>Program:</strong> {program}</p>\n\
         <p><strong>Schedule:</strong> {schedule}</p>\n\
         <p><strong>Desired Start Date:</strong> {start}</p>",
        parent = escape_html(&request.parent_name),
        email = escape_html(&request.email),
        phone = escape_html(&request.phone),
        child = escape_html(&request.child_name),
        dob = escape_html(&long_date(&request.child_dob)),
        program = request.program.label(),
        schedule = request.schedule.label(),
        start = escape_html(&long_date(&request.start_date)),
    );

    let mut text = format!(
        "New Enrollment Request\n\n\
         PARENT/GUARDIAN INFORMATION\n\
         Name: {parent}\nEmail: {email}\nPhone: {phone}\n\n\
         CHILD INFORMATION\n\
         Name: {child}\nDate of Birth: {dob}\n\n\
         PROGRAM DETAILS\n\
         Program: {program}\nSchedule: {schedule}\nDesired Start Date: {start}\n",
        parent = request.parent_name,
        email = request.email,
        phone = request.phone,
        child = request.child_name,
        dob = long_date(&request.child_dob),
        program = request.program.label(),
        schedule = request.schedule.label(),
        start = long_date(&request.start_date),
    );

    if !request.message.is_empty() {
        html.push_str(&format!(
            "\n<h3>Additional Information</h3>\n<p>{}</p>",
            multiline_html(&request.message)
        ));
        text.push_str(&format!(
            "\nADDITIONAL INFORMATION\n{}\n",
            request.message
        ));
    }

    OutboundEmail {
        from: business_mailbox(business),
        to: business_mailbox(business),
        reply_to: MailAddress::bare(request.email.clone()),
        subject: format!("New Enrollment Request: {}", request.child_name),
        text_body: text,
        html_body: html,
        extra_headers: Vec::new(),
    }
}

/// Confirmation sent back to the parent when the flag is enabled, walking
/// through the next steps of the enrollment process.
pub fn enrollment_confirmation(
    business: &BusinessProfile,
    request: &EnrollmentRequest,
    submitted_at: DateTime<Utc>,
) -> OutboundEmail {
    let program = request.program.label();
    let start = long_date(&request.start_date);

    let content = format!(
        "<p>Dear {parent},</p>\n\
         <p>Thank you for your interest in {biz}! We have received your enrollment request for {child} in our {program} program.</p>\n\
         <p>Here's what happens next:</p>\n\
         <ol>\n\
         <li>We will review your request within 1-2 business days</li>\n\
         <li>Our director will contact you to schedule a tour of our facility</li>\n\
         <li>We'll discuss availability and answer any questions you may have</li>\n\
         <li>If you decide to proceed, we'll provide enrollment paperwork</li>\n\
         </ol>\n\
         <div class=\"summary\">\n\
         <p><strong>Request Summary:</strong></p>\n\
         <p><strong>Child:</strong> {child}</p>\n\
         <p><strong>Program:</strong> {program}</p>\n\
         <p><strong>Desired Start Date:</strong> {start}</p>\n\
         </div>\n\
         <p>If you have any immediate questions, please don't hesitate to call us at {phone}.</p>\n\
         <p>Warm regards,</p>\n\
         <p>{director}<br>\nFounder &amp; Director<br>\n{biz}<br>\n{phone}</p>",
        parent = escape_html(&request.parent_name),
        biz = escape_html(&business.name),
        child = escape_html(&request.child_name),
        program = program,
        start = escape_html(&start),
        phone = escape_html(&business.phone),
        director = escape_html(&business.director),
    );

    let html = branded_shell(
        business,
        "Enrollment Request",
        &format!("Welcome to {}!", business.name),
        "We're excited about your enrollment request",
        &content,
    );

    let text = format!(
        "Welcome to {biz}!\n\n\
         Dear {parent},\n\n\
         Thank you for your interest in {biz}! We have received your enrollment request for {child} in our {program} program.\n\n\
         Here's what happens next:\n\
         1. We will review your request within 1-2 business days\n\
         2. Our director will contact you to schedule a tour of our facility\n\
         3. We'll discuss availability and answer any questions you may have\n\
         4. If you decide to proceed, we'll provide enrollment paperwork\n\n\
         REQUEST SUMMARY:\n\
         Child: {child}\n\
         Program: {program}\n\
         Desired Start Date: {start}\n\n\
         If you have any immediate questions, please don't hesitate to call us at {phone}.\n\n\
         Warm regards,\n\
         {director}\n\
         Founder & Director\n\
         {biz}\n\
         {phone}\n\n\
         {street}\n\
         {website}\n",
        biz = business.name,
        parent = request.parent_name,
        child = request.child_name,
        program = program,
        start = start,
        phone = business.phone,
        director = business.director,
        street = business.street_address,
        website = business.website,
    );

    OutboundEmail {
        from: business_mailbox(business),
        to: MailAddress::new(request.parent_name.clone(), request.email.clone()),
        reply_to: MailAddress::bare(business.email.clone()),
        subject: "Thank you for your enrollment request".to_string(),
        text_body: text,
        html_body: html,
        extra_headers: courtesy_headers(business, "enrollment", submitted_at),
    }
}

fn business_mailbox(business: &BusinessProfile) -> MailAddress {
    MailAddress::new(business.name.clone(), business.email.clone())
}

/// Unsubscribe-by-reply header plus an informational reference tag derived
/// from submission time and form type. The tag is never used for
/// deduplication on our side.
fn courtesy_headers(
    business: &BusinessProfile,
    form_kind: &str,
    submitted_at: DateTime<Utc>,
) -> Vec<(&'static str, String)> {
    vec![
        (
            "List-Unsubscribe",
            format!("<mailto:{}?subject=Unsubscribe>", business.email),
        ),
        (
            "X-Entity-Ref-ID",
            format!("{form_kind}-{}", submitted_at.timestamp_millis()),
        ),
    ]
}

/// Shared branded wrapper for the confirmation emails: header, content
/// slot, and address footer with lightweight inline styling.
fn branded_shell(
    business: &BusinessProfile,
    doc_title: &str,
    heading: &str,
    tagline: &str,
    content: &str,
) -> String {
    format!(
        "<!DOCTYPE html>\n\
         <html lang=\"en\">\n\
         <head>\n\
         <meta charset=\"UTF-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n\
         <title>{biz} - {doc_title}</title>\n\
         <style>\n\
         body {{ font-family: Arial, sans-serif; line-height: 1.6; color: #333333; margin: 0; padding: 0; }}\n\
         .email-container {{ max-width: 600px; margin: 0 auto; padding: 20px; border: 1px solid #FFD166; border-radius: 10px; }}\n\
         .header {{ text-align: center; margin-bottom: 20px; }}\n\
         .header h1 {{ color: #FF9F1C; margin-bottom: 5px; }}\n\
         .content {{ padding: 15px 0; }}\n\
         .summary {{ background-color: #FFF7E8; padding: 15px; border-radius: 8px; margin: 20px 0; }}\n\
         .footer {{ text-align: center; margin-top: 30px; font-size: 12px; color: #666; }}\n\
         .footer a {{ color: #FF9F1C; text-decoration: none; }}\n\
         </style>\n\
         </head>\n\
         <body>\n\
         <div class=\"email-container\">\n\
         <div class=\"header\">\n<h1>{heading}</h1>\n<p>{tagline}</p>\n</div>\n\
         <div class=\"content\">\n{content}\n</div>\n\
         <div class=\"footer\">\n\
         <p>{street}<br>\n\
         <a href=\"https://{website}\" target=\"_blank\">{website}</a></p>\n\
         </div>\n\
         </div>\n\
         </body>\n\
         </html>",
        biz = escape_html(&business.name),
        doc_title = doc_title,
        heading = escape_html(heading),
        tagline = escape_html(tagline),
        content = content,
        street = escape_html(&business.street_address),
        website = escape_html(&business.website),
    )
}

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Escape, then keep line breaks visible in HTML.
fn multiline_html(raw: &str) -> String {
    escape_html(&raw.replace("\r\n", "\n")).replace('\n', "<br>")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intake::domain::{ContactForm, EnrollmentForm};
    use crate::intake::{EnrollmentRequest, Inquiry};

    fn business() -> BusinessProfile {
        BusinessProfile::default()
    }

    fn inquiry() -> Inquiry {
        Inquiry::parse(ContactForm {
            name: "Jo Lee".to_string(),
            email: "jo@example.com".to_string(),
            phone: "(206) 688-9088".to_string(),
            subject: "Tour".to_string(),
            message: "Can we visit Saturday?\nWe have twins.".to_string(),
        })
        .expect("valid inquiry")
    }

    fn enrollment(program: &str, message: &str) -> EnrollmentRequest {
        EnrollmentRequest::parse(EnrollmentForm {
            parent_name: "Dana Kim".to_string(),
            email: "dana@example.com".to_string(),
            phone: "2066889088".to_string(),
            child_name: "Ari Kim".to_string(),
            child_dob: "2022-03-05".to_string(),
            program: program.to_string(),
            schedule: "fulltime".to_string(),
            start_date: "2025-09-02".to_string(),
            message: message.to_string(),
        })
        .expect("valid enrollment request")
    }

    #[test]
    fn contact_notification_lists_every_field() {
        let email = contact_notification(&business(), &inquiry());
        assert_eq!(email.subject, "Website Contact: Tour");
        assert_eq!(email.to.email, business().email);
        assert_eq!(email.reply_to.email, "jo@example.com");
        for field in ["Jo Lee", "jo@example.com", "(206) 688-9088", "Tour"] {
            assert!(email.text_body.contains(field), "missing {field}");
        }
        assert!(email.html_body.contains("Can we visit Saturday?<br>We have twins."));
    }

    #[test]
    fn contact_notification_escapes_markup() {
        let mut raw = inquiry();
        raw.name = "Jo <script>".to_string();
        let email = contact_notification(&business(), &raw);
        assert!(email.html_body.contains("Jo &lt;script&gt;"));
        assert!(!email.html_body.contains("<script>"));
    }

    #[test]
    fn contact_confirmation_addresses_the_submitter() {
        let email = contact_confirmation(&business(), &inquiry(), Utc::now());
        assert_eq!(email.to.email, "jo@example.com");
        assert_eq!(email.reply_to.email, business().email);
        assert_eq!(email.subject, "Thank you for contacting us");
        assert!(email.html_body.contains("We've Received Your Message"));
    }

    #[test]
    fn confirmation_carries_courtesy_headers() {
        let email = contact_confirmation(&business(), &inquiry(), Utc::now());
        let unsubscribe = email
            .extra_headers
            .iter()
            .find(|(name, _)| *name == "List-Unsubscribe")
            .expect("unsubscribe header");
        assert!(unsubscribe.1.contains("mailto:"));

        let reference = email
            .extra_headers
            .iter()
            .find(|(name, _)| *name == "X-Entity-Ref-ID")
            .expect("reference header");
        assert!(reference.1.starts_with("contact-"));
    }

    #[test]
    fn enrollment_notification_translates_codes_and_dates() {
        let email = enrollment_notification(&business(), &enrollment("toddlers", ""));
        assert_eq!(email.subject, "New Enrollment Request: Ari Kim");
        assert!(email.html_body.contains("Toddler Care (18 months - 3 years)"));
        assert!(email.html_body.contains("Full-time (Monday-Friday)"));
        assert!(email.html_body.contains("March 5, 2022"));
        assert!(email.html_body.contains("September 2, 2025"));
    }

    #[test]
    fn unknown_program_falls_back_to_literal_label() {
        let email = enrollment_notification(&business(), &enrollment("unknown-code", ""));
        assert!(email.html_body.contains("Unknown Program"));
    }

    #[test]
    fn additional_information_only_present_with_message() {
        let without = enrollment_notification(&business(), &enrollment("mixed", ""));
        assert!(!without.html_body.contains("Additional Information"));

        let with = enrollment_notification(
            &business(),
            &enrollment("mixed", "Allergic to peanuts.\nNaps at noon."),
        );
        assert!(with.html_body.contains("Additional Information"));
        assert!(with
            .html_body
            .contains("Allergic to peanuts.<br>Naps at noon."));
    }

    #[test]
    fn enrollment_confirmation_summarizes_the_request() {
        let email =
            enrollment_confirmation(&business(), &enrollment("preschool", ""), Utc::now());
        assert_eq!(email.to.email, "dana@example.com");
        assert!(email.html_body.contains("Preschooler Care (3 - 6 years)"));
        assert!(email.text_body.contains("REQUEST SUMMARY:"));
        assert!(email
            .extra_headers
            .iter()
            .any(|(name, value)| *name == "X-Entity-Ref-ID" && value.starts_with("enrollment-")));
    }
}
