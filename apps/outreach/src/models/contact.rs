use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Position used in rendering and normalization when a contact has none.
pub const DEFAULT_POSITION: &str = "Recruiter";

/// Contact identity. The gateway hands out numeric ids for stored contacts,
/// while upload responses may carry strings or nothing at all.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ContactId {
    Number(i64),
    Text(String),
}

impl ContactId {
    /// A locally generated id for records the gateway returned without one.
    pub fn placeholder() -> Self {
        ContactId::Text(format!("local-{}", Uuid::new_v4()))
    }
}

impl fmt::Display for ContactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContactId::Number(n) => write!(f, "{n}"),
            ContactId::Text(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactStatus {
    #[default]
    Pending,
    Sent,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    pub id: ContactId,
    pub name: String,
    pub email: String,
    pub company: String,
    pub position: String,
    pub status: ContactStatus,
}

impl Contact {
    pub fn is_sent(&self) -> bool {
        self.status == ContactStatus::Sent
    }

    /// The position to address the contact by, falling back to `Recruiter`.
    pub fn position_or_default(&self) -> &str {
        if self.position.trim().is_empty() {
            DEFAULT_POSITION
        } else {
            &self.position
        }
    }
}
