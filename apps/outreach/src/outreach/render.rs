//! Placeholder rendering for outreach emails.
//!
//! Recognized tokens (case-insensitive): `{name}`, `{company}`, `{position}`
//! and the legacy `{Hiring Manager Name}` alias for `{name}`. The legacy
//! `{Company}` / `{Position}` spellings are covered by case-insensitivity.
//! All tokens are replaced in a single pass, so contact values that happen to
//! contain a token are never expanded again.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::models::{Contact, Template};

static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\{(name|company|position|hiring manager name)\}")
        .expect("placeholder pattern is valid")
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedEmail {
    pub subject: String,
    pub body: String,
}

/// Replaces every recognized placeholder in `text` with the contact's field.
pub fn render_text(text: &str, contact: &Contact) -> String {
    PLACEHOLDER
        .replace_all(text, |caps: &Captures| {
            match caps[1].to_ascii_lowercase().as_str() {
                "company" => contact.company.clone(),
                "position" => contact.position_or_default().to_string(),
                // "name" and "hiring manager name"
                _ => contact.name.clone(),
            }
        })
        .into_owned()
}

pub fn render(template: &Template, contact: &Contact) -> RenderedEmail {
    RenderedEmail {
        subject: render_text(&template.subject, contact),
        body: render_text(&template.body, contact),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ContactId, ContactStatus};

    fn has_placeholders(text: &str) -> bool {
        PLACEHOLDER.is_match(text)
    }

    fn contact(position: &str) -> Contact {
        Contact {
            id: ContactId::Number(1),
            name: "Ann".to_string(),
            email: "a@x.com".to_string(),
            company: "Acme".to_string(),
            position: position.to_string(),
            status: ContactStatus::Pending,
        }
    }

    fn template(subject: &str, body: &str) -> Template {
        Template {
            id: "default".to_string(),
            name: "Default".to_string(),
            subject: subject.to_string(),
            body: body.to_string(),
            is_default: true,
        }
    }

    #[test]
    fn test_replaces_all_occurrences() {
        let out = render_text("{name} / {name} / {company} / {company}", &contact("CTO"));
        assert_eq!(out, "Ann / Ann / Acme / Acme");
    }

    #[test]
    fn test_tokens_are_case_insensitive() {
        let out = render_text("{NAME} {Company} {PoSiTiOn}", &contact("CTO"));
        assert_eq!(out, "Ann Acme CTO");
    }

    #[test]
    fn test_legacy_aliases() {
        let out = render_text(
            "Dear {Hiring Manager Name}, {Position} at {Company}",
            &contact("Lead"),
        );
        assert_eq!(out, "Dear Ann, Lead at Acme");
    }

    #[test]
    fn test_absent_position_renders_recruiter() {
        let out = render_text("Application for {position} at {company}", &contact(""));
        assert_eq!(out, "Application for Recruiter at Acme");
    }

    #[test]
    fn test_no_placeholder_survives_rendering() {
        let body = "{name}{NAME}{hiring manager name}{company}{COMPANY}{position}{Position}";
        let out = render_text(body, &contact(""));
        assert!(!has_placeholders(&out));
    }

    #[test]
    fn test_unknown_tokens_are_left_alone() {
        let out = render_text("Hi {name}, see {link}", &contact(""));
        assert_eq!(out, "Hi Ann, see {link}");
    }

    #[test]
    fn test_values_are_not_expanded_twice() {
        let mut c = contact("");
        c.name = "{company}".to_string();
        assert_eq!(render_text("{name}", &c), "{company}");
    }

    #[test]
    fn test_render_covers_subject_and_body() {
        let email = render(
            &template("Application for {position} at {company}", "Hi {name},..."),
            &contact(""),
        );
        assert_eq!(email.subject, "Application for Recruiter at Acme");
        assert!(email.body.starts_with("Hi Ann,..."));
    }
}
