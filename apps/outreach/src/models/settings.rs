use std::fmt;

use serde::{Deserialize, Serialize};

/// Sender credentials used for every outbound email.
/// Both fields are opaque; they are only checked for presence.
#[derive(Clone, Default, PartialEq, Deserialize)]
pub struct Settings {
    pub professional_email: String,
    pub app_password: String,
}

impl Settings {
    pub fn is_complete(&self) -> bool {
        !self.professional_email.trim().is_empty() && !self.app_password.trim().is_empty()
    }

    pub fn view(&self) -> SettingsView {
        SettingsView {
            professional_email: self.professional_email.clone(),
            app_password_set: !self.app_password.is_empty(),
        }
    }
}

// Keep the app password out of logs.
impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("professional_email", &self.professional_email)
            .field("app_password", &"<redacted>")
            .finish()
    }
}

/// What the dashboard shows of the settings.
#[derive(Debug, Clone, Serialize)]
pub struct SettingsView {
    pub professional_email: String,
    pub app_password_set: bool,
}
