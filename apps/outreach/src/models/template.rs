use serde::{Deserialize, Serialize};

pub const DEFAULT_TEMPLATE_ID: &str = "default";
pub const DEFAULT_TEMPLATE_NAME: &str = "Default Job Application Template";
pub const DEFAULT_SUBJECT: &str = "Application for {position} at {company}";
pub const DEFAULT_BODY: &str = "Hi {name},\n\n\
    I came across the {position} opening at {company} and would love to be considered. \
    My resume is attached for your review.\n\n\
    Thank you for your time,";

/// An email template. Subject and body may contain placeholder tokens
/// such as `{name}`, `{company}` and `{position}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Template {
    pub id: String,
    pub name: String,
    pub subject: String,
    pub body: String,
    pub is_default: bool,
}

impl Template {
    /// The built-in default template used until the profile supplies one.
    pub fn builtin_default() -> Self {
        Self {
            id: DEFAULT_TEMPLATE_ID.to_string(),
            name: DEFAULT_TEMPLATE_NAME.to_string(),
            subject: DEFAULT_SUBJECT.to_string(),
            body: DEFAULT_BODY.to_string(),
            is_default: true,
        }
    }
}

/// Fields a user fills in to create a custom template.
#[derive(Debug, Clone, Deserialize)]
pub struct TemplateDraft {
    pub name: String,
    pub subject: String,
    pub body: String,
}

impl TemplateDraft {
    /// Returns the name of the first blank field, if any.
    pub fn blank_field(&self) -> Option<&'static str> {
        [
            ("name", &self.name),
            ("subject", &self.subject),
            ("body", &self.body),
        ]
        .into_iter()
        .find(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| field)
    }
}
