pub mod activity;
pub mod contact;
pub mod settings;
pub mod template;

pub use activity::{ActivityLog, LogEntry, Stats};
pub use contact::{Contact, ContactId, ContactStatus};
pub use settings::Settings;
pub use template::{Template, TemplateDraft};
