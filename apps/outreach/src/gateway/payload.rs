//! Wire shapes returned by the gateway and their normalization into the
//! strict internal types. Nothing outside this module sees a raw payload.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use thiserror::Error;

use crate::models::activity::DEFAULT_DAILY_LIMIT;
use crate::models::contact::DEFAULT_POSITION;
use crate::models::template::{DEFAULT_SUBJECT, DEFAULT_TEMPLATE_ID, DEFAULT_TEMPLATE_NAME};
use crate::models::{Contact, ContactId, ContactStatus, LogEntry, Settings, Stats, Template};

const UNKNOWN: &str = "Unknown";

#[derive(Debug, Error)]
pub enum PayloadError {
    #[error("Gateway response is missing required field '{0}'")]
    MissingField(String),

    #[error("Gateway response could not be decoded: {0}")]
    Malformed(#[from] serde_json::Error),
}

// ────────────────────────────────────────────────────────────────────────────
// Raw records
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ContactRecord {
    pub id: Option<ContactId>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub company_name: Option<String>,
    pub company: Option<String>,
    pub position: Option<String>,
    pub status: Option<String>,
    pub is_sent: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct ActivityRecord {
    pub description: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
pub struct TemplateRecord {
    pub id: Option<String>,
    pub name: Option<String>,
    pub subject: Option<String>,
    pub body: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ProfilePayload {
    pub name: Option<String>,
    pub pdf_upload_count: Option<u32>,
    pub emails_sent: Option<u32>,
    pub daily_limit: Option<u32>,
    pub contacts: Option<Vec<ContactRecord>>,
    pub activities: Option<Vec<ActivityRecord>>,
    pub professional_email: Option<String>,
    pub mail_app_password: Option<String>,
    pub template: Option<TemplateRecord>,
}

/// `/upload` answers with either a bare array or `{ "contacts": [...] }`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum UploadPayload {
    List(Vec<ContactRecord>),
    Wrapped { contacts: Option<Vec<ContactRecord>> },
}

#[derive(Debug, Deserialize)]
pub struct AuthPayload {
    pub token: Option<String>,
    pub user: Option<AuthUser>,
}

#[derive(Debug, Deserialize)]
pub struct AuthUser {
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct EnhancePayload {
    pub body: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ErrorPayload {
    pub message: Option<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Normalized shapes
// ────────────────────────────────────────────────────────────────────────────

/// Profile snapshot after normalization. `None` slices were absent in the
/// payload and leave the corresponding dashboard state untouched.
#[derive(Debug, Clone, Default)]
pub struct Profile {
    pub name: Option<String>,
    pub stats: Stats,
    pub contacts: Option<Vec<Contact>>,
    pub activities: Option<Vec<LogEntry>>,
    pub settings: Option<Settings>,
    pub template: Option<Template>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AuthSession {
    pub token: String,
    pub user_name: Option<String>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn record_status(record: &ContactRecord) -> ContactStatus {
    let sent_flag = record.is_sent.unwrap_or(false);
    let sent_status = record
        .status
        .as_deref()
        .is_some_and(|s| s.eq_ignore_ascii_case("sent"));
    if sent_flag || sent_status {
        ContactStatus::Sent
    } else {
        ContactStatus::Pending
    }
}

/// Shared field mapping; `id` is resolved by the caller because the two
/// sources disagree on whether it is required.
fn contact_from_record(
    record: ContactRecord,
    id: ContactId,
    path: &str,
) -> Result<Contact, PayloadError> {
    let status = record_status(&record);
    let email = non_empty(record.email)
        .ok_or_else(|| PayloadError::MissingField(format!("{path}.email")))?;
    Ok(Contact {
        id,
        name: non_empty(record.name).unwrap_or_else(|| UNKNOWN.to_string()),
        email,
        company: non_empty(record.company_name)
            .or_else(|| non_empty(record.company))
            .unwrap_or_else(|| UNKNOWN.to_string()),
        position: non_empty(record.position).unwrap_or_else(|| DEFAULT_POSITION.to_string()),
        status,
    })
}

/// Contacts extracted from an upload. Missing ids get a local placeholder.
pub fn normalize_upload(payload: UploadPayload) -> Result<Vec<Contact>, PayloadError> {
    let records = match payload {
        UploadPayload::List(records) => records,
        UploadPayload::Wrapped { contacts } => contacts.unwrap_or_default(),
    };

    records
        .into_iter()
        .enumerate()
        .map(|(index, mut record)| {
            let id = record.id.take().unwrap_or_else(ContactId::placeholder);
            contact_from_record(record, id, &format!("contacts[{index}]"))
        })
        .collect()
}

/// Contacts stored by the gateway must carry their id.
fn normalize_stored_contacts(records: Vec<ContactRecord>) -> Result<Vec<Contact>, PayloadError> {
    records
        .into_iter()
        .enumerate()
        .map(|(index, mut record)| {
            let path = format!("contacts[{index}]");
            let id = record
                .id
                .take()
                .ok_or_else(|| PayloadError::MissingField(format!("{path}.id")))?;
            contact_from_record(record, id, &path)
        })
        .collect()
}

fn normalize_activities(records: Vec<ActivityRecord>) -> Result<Vec<LogEntry>, PayloadError> {
    records
        .into_iter()
        .enumerate()
        .map(|(index, record)| {
            let message = record.description.ok_or_else(|| {
                PayloadError::MissingField(format!("activities[{index}].description"))
            })?;
            let timestamp = record.created_at.ok_or_else(|| {
                PayloadError::MissingField(format!("activities[{index}].created_at"))
            })?;
            Ok(LogEntry { timestamp, message })
        })
        .collect()
}

fn normalize_template(record: TemplateRecord) -> Template {
    Template {
        id: non_empty(record.id).unwrap_or_else(|| DEFAULT_TEMPLATE_ID.to_string()),
        name: non_empty(record.name).unwrap_or_else(|| DEFAULT_TEMPLATE_NAME.to_string()),
        subject: non_empty(record.subject).unwrap_or_else(|| DEFAULT_SUBJECT.to_string()),
        body: record.body.unwrap_or_default(),
        is_default: true,
    }
}

pub fn normalize_profile(payload: ProfilePayload) -> Result<Profile, PayloadError> {
    let stats = Stats {
        pdf_count: payload.pdf_upload_count.unwrap_or(0),
        emails_sent: payload.emails_sent.unwrap_or(0),
        // A zero limit is treated as unset.
        daily_limit: payload
            .daily_limit
            .filter(|limit| *limit > 0)
            .unwrap_or(DEFAULT_DAILY_LIMIT),
    };

    let settings = match (payload.professional_email, payload.mail_app_password) {
        (None, None) => None,
        (email, password) => Some(Settings {
            professional_email: email.unwrap_or_default(),
            app_password: password.unwrap_or_default(),
        }),
    };

    Ok(Profile {
        name: non_empty(payload.name),
        stats,
        contacts: payload
            .contacts
            .map(normalize_stored_contacts)
            .transpose()?,
        activities: payload.activities.map(normalize_activities).transpose()?,
        settings,
        template: payload.template.map(normalize_template),
    })
}

pub fn normalize_auth(payload: AuthPayload) -> Result<AuthSession, PayloadError> {
    let token =
        non_empty(payload.token).ok_or_else(|| PayloadError::MissingField("token".to_string()))?;
    Ok(AuthSession {
        token,
        user_name: payload.user.and_then(|u| non_empty(u.name)),
    })
}

pub fn normalize_enhance(payload: EnhancePayload) -> Result<String, PayloadError> {
    payload
        .body
        .ok_or_else(|| PayloadError::MissingField("body".to_string()))
}
