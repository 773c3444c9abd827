use serde::Serialize;

use crate::dashboard::state::{DashboardState, Tab};
use crate::dashboard::templates::TemplateStore;
use crate::models::settings::SettingsView;
use crate::models::{Contact, LogEntry, Stats};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Success,
    Error,
    Info,
}

/// A user-visible notification attached to a response.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }
}

/// Snapshot of the dashboard as rendered to the client.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    pub user_name: String,
    pub initials: String,
    pub active_tab: Tab,
    pub processing: bool,
    pub stats: Stats,
    pub contacts: Vec<Contact>,
    pub uploaded_files: Vec<String>,
    pub settings: SettingsView,
    pub templates: TemplateStore,
    pub logs: Vec<LogEntry>,
}

impl DashboardView {
    pub fn new(state: &DashboardState, processing: bool) -> Self {
        Self {
            user_name: state.user_name.clone(),
            initials: initials(&state.user_name),
            active_tab: state.active_tab,
            processing,
            stats: state.stats,
            contacts: state.contacts.clone(),
            uploaded_files: state.uploaded_files.clone(),
            settings: state.settings.view(),
            templates: state.templates.clone(),
            logs: state.logs.iter().cloned().collect(),
        }
    }
}

/// Every dashboard action answers with the fresh view and an optional notice.
#[derive(Debug, Clone, Serialize)]
pub struct ActionResponse<T: Serialize = ()> {
    pub dashboard: DashboardView,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<Notice>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<T>,
}

/// Up to two uppercase initials from the first letters of each word.
pub fn initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|word| word.chars().next())
        .flat_map(char::to_uppercase)
        .take(2)
        .collect()
}
