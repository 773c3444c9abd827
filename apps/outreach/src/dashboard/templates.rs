use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::gateway::Gateway;
use crate::models::{Template, TemplateDraft};
use crate::session::Session;

/// The default template plus user-created ones. The default lives outside
/// the custom list, so `delete` can never reach it.
#[derive(Debug, Clone, Serialize)]
pub struct TemplateStore {
    default: Template,
    custom: Vec<Template>,
}

impl Default for TemplateStore {
    fn default() -> Self {
        Self {
            default: Template::builtin_default(),
            custom: Vec::new(),
        }
    }
}

impl TemplateStore {
    pub fn default_template(&self) -> &Template {
        &self.default
    }

    pub fn custom_templates(&self) -> &[Template] {
        &self.custom
    }

    pub fn replace_default(&mut self, mut template: Template) {
        template.is_default = true;
        self.default = template;
    }

    pub fn set_default_body(&mut self, body: String) {
        self.default.body = body;
    }

    /// Appends a non-default template with a fresh id.
    pub fn create(&mut self, draft: TemplateDraft) -> &Template {
        self.custom.push(Template {
            id: Uuid::new_v4().to_string(),
            name: draft.name,
            subject: draft.subject,
            body: draft.body,
            is_default: false,
        });
        &self.custom[self.custom.len() - 1]
    }

    /// Removes a custom template by id. Returns false if no custom template
    /// has that id; the default template is never matched.
    pub fn delete(&mut self, id: &str) -> bool {
        let before = self.custom.len();
        self.custom.retain(|t| t.id != id);
        self.custom.len() != before
    }
}

/// Validates the draft before adding it to the store.
pub fn create_template(
    store: &mut TemplateStore,
    draft: TemplateDraft,
) -> Result<Template, AppError> {
    if let Some(field) = draft.blank_field() {
        return Err(AppError::Validation(format!(
            "Template {field} cannot be empty"
        )));
    }
    Ok(store.create(draft).clone())
}

/// Sends the default body to the gateway and swaps in the rewrite verbatim.
/// On failure the body is left untouched.
pub async fn enhance_default(
    session: &Session,
    gateway: &dyn Gateway,
    token: &str,
) -> Result<String, AppError> {
    let content = session.state.lock().await.templates.default.body.clone();

    let enhanced = gateway
        .enhance_template(token, &content)
        .await
        .map_err(|e| AppError::gateway("Failed to enhance template. Please try again.", e))?;

    session
        .state
        .lock()
        .await
        .templates
        .set_default_body(enhanced.clone());
    info!(chars = enhanced.len(), "Default template enhanced");
    Ok(enhanced)
}
