//! Dashboard view state and the pure update functions applied to it.
//! Network effects live in the sibling modules; everything here is synchronous.

use serde::{Deserialize, Serialize};

use crate::dashboard::templates::TemplateStore;
use crate::gateway::Profile;
use crate::models::{ActivityLog, Contact, ContactId, ContactStatus, LogEntry, Settings, Stats};

const DEFAULT_USER_NAME: &str = "User";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tab {
    #[default]
    Upload,
    Contacts,
    Settings,
    Templates,
    Logs,
}

#[derive(Debug, Clone)]
pub struct DashboardState {
    pub user_name: String,
    pub active_tab: Tab,
    pub stats: Stats,
    pub contacts: Vec<Contact>,
    pub uploaded_files: Vec<String>,
    pub settings: Settings,
    pub templates: TemplateStore,
    pub logs: ActivityLog,
}

impl Default for DashboardState {
    fn default() -> Self {
        Self::new(None)
    }
}

impl DashboardState {
    pub fn new(user_name: Option<String>) -> Self {
        Self {
            user_name: user_name.unwrap_or_else(|| DEFAULT_USER_NAME.to_string()),
            active_tab: Tab::default(),
            stats: Stats::default(),
            contacts: Vec::new(),
            uploaded_files: Vec::new(),
            settings: Settings::default(),
            templates: TemplateStore::default(),
            logs: ActivityLog::default(),
        }
    }

    /// Applies a profile snapshot. Slices absent from the profile keep their
    /// current value; stats always come from the gateway.
    pub fn hydrate(&mut self, profile: Profile) {
        if let Some(name) = profile.name {
            self.user_name = name;
        }
        self.stats = profile.stats;
        if let Some(contacts) = profile.contacts {
            self.contacts = contacts;
        }
        if let Some(activities) = profile.activities {
            self.logs.replace(activities);
        }
        if let Some(settings) = profile.settings {
            self.settings = settings;
        }
        if let Some(template) = profile.template {
            self.templates.replace_default(template);
        }
    }

    pub fn log(&mut self, message: impl Into<String>) {
        self.logs.push(LogEntry::now(message));
    }

    pub fn clear_logs(&mut self) {
        self.logs.clear();
    }

    pub fn switch_tab(&mut self, tab: Tab) {
        self.active_tab = tab;
    }

    /// Contacts not yet sent, in list order.
    pub fn pending_contacts(&self) -> Vec<Contact> {
        self.contacts.iter().filter(|c| !c.is_sent()).cloned().collect()
    }

    pub fn record_uploaded_files<I>(&mut self, names: I)
    where
        I: IntoIterator<Item = String>,
    {
        self.uploaded_files.extend(names);
    }

    pub fn append_contacts(&mut self, contacts: Vec<Contact>) {
        self.contacts.extend(contacts);
    }

    /// Marks every contact carrying `id` sent after a successful send and
    /// bumps the local counter. Returns false when no contact has that id.
    pub fn apply_send_success(&mut self, id: &ContactId, email: &str) -> bool {
        let mut found = false;
        for contact in self.contacts.iter_mut().filter(|c| &c.id == id) {
            contact.status = ContactStatus::Sent;
            found = true;
        }
        self.stats.emails_sent += 1;
        self.log(format!("SUCCESS: Email sent to {email}"));
        found
    }

    /// A failed send leaves the contact pending.
    pub fn apply_send_failure(&mut self, email: &str) {
        self.log(format!(
            "ERROR: Failed to send to {email}. Check the service logs for details."
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Template;

    fn contact(id: i64, status: ContactStatus) -> Contact {
        Contact {
            id: ContactId::Number(id),
            name: format!("Contact {id}"),
            email: format!("c{id}@x.com"),
            company: "Acme".to_string(),
            position: "Recruiter".to_string(),
            status,
        }
    }

    #[test]
    fn test_new_state_defaults() {
        let state = DashboardState::new(None);
        assert_eq!(state.user_name, "User");
        assert_eq!(state.active_tab, Tab::Upload);
        assert_eq!(state.stats.daily_limit, 20);
        assert!(state.templates.default_template().is_default);
    }

    #[test]
    fn test_pending_contacts_preserve_order_and_skip_sent() {
        let mut state = DashboardState::default();
        state.contacts = vec![
            contact(1, ContactStatus::Pending),
            contact(2, ContactStatus::Sent),
            contact(3, ContactStatus::Pending),
        ];
        let ids: Vec<_> = state.pending_contacts().into_iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![ContactId::Number(1), ContactId::Number(3)]);
    }

    #[test]
    fn test_apply_send_success_marks_and_counts() {
        let mut state = DashboardState::default();
        state.contacts = vec![contact(1, ContactStatus::Pending)];
        assert!(state.apply_send_success(&ContactId::Number(1), "c1@x.com"));
        assert!(state.contacts[0].is_sent());
        assert_eq!(state.stats.emails_sent, 1);
        assert_eq!(
            state.logs.iter().next().unwrap().message,
            "SUCCESS: Email sent to c1@x.com"
        );
    }

    #[test]
    fn test_apply_send_success_marks_every_contact_sharing_the_id() {
        let mut state = DashboardState::default();
        let mut duplicate = contact(7, ContactStatus::Pending);
        duplicate.email = "other@x.com".to_string();
        state.contacts = vec![
            contact(7, ContactStatus::Pending),
            contact(8, ContactStatus::Pending),
            duplicate,
        ];

        assert!(state.apply_send_success(&ContactId::Number(7), "c7@x.com"));

        let statuses: Vec<_> = state.contacts.iter().map(|c| c.status).collect();
        assert_eq!(
            statuses,
            vec![ContactStatus::Sent, ContactStatus::Pending, ContactStatus::Sent]
        );
        assert_eq!(state.stats.emails_sent, 1);
    }

    #[test]
    fn test_apply_send_success_for_unknown_id_still_counts() {
        let mut state = DashboardState::default();
        state.contacts = vec![contact(1, ContactStatus::Pending)];
        assert!(!state.apply_send_success(&ContactId::Number(9), "c9@x.com"));
        assert!(!state.contacts[0].is_sent());
        assert_eq!(state.stats.emails_sent, 1);
    }

    #[test]
    fn test_apply_send_failure_keeps_pending() {
        let mut state = DashboardState::default();
        state.contacts = vec![contact(1, ContactStatus::Pending)];
        state.apply_send_failure("c1@x.com");
        assert!(!state.contacts[0].is_sent());
        assert_eq!(state.stats.emails_sent, 0);
        assert!(state.logs.iter().next().unwrap().message.starts_with("ERROR"));
    }

    #[test]
    fn test_hydrate_replaces_present_slices_only() {
        let mut state = DashboardState::new(Some("Cookie Name".to_string()));
        state.settings = Settings {
            professional_email: "keep@x.com".to_string(),
            app_password: "pw".to_string(),
        };
        state.log("local entry");

        let profile = Profile {
            name: Some("Ann Lee".to_string()),
            stats: Stats {
                pdf_count: 2,
                emails_sent: 9,
                daily_limit: 50,
            },
            contacts: Some(vec![contact(5, ContactStatus::Sent)]),
            activities: None,
            settings: None,
            template: Some(Template {
                id: "t1".to_string(),
                name: "Mine".to_string(),
                subject: "Hi".to_string(),
                body: "Body".to_string(),
                is_default: true,
            }),
        };
        state.hydrate(profile);

        assert_eq!(state.user_name, "Ann Lee");
        assert_eq!(state.stats.emails_sent, 9);
        assert_eq!(state.contacts.len(), 1);
        assert_eq!(state.settings.professional_email, "keep@x.com");
        assert_eq!(state.logs.len(), 1);
        assert_eq!(state.templates.default_template().body, "Body");
    }

    #[test]
    fn test_uploaded_files_accumulate() {
        let mut state = DashboardState::default();
        state.record_uploaded_files(vec!["a.pdf".to_string()]);
        state.record_uploaded_files(vec!["b.pdf".to_string(), "c.pdf".to_string()]);
        assert_eq!(state.uploaded_files, vec!["a.pdf", "b.pdf", "c.pdf"]);
    }
}
