//! Gateway: the only way this service talks to the outreach backend.
//!
//! Every network effect (profile, upload, send, status, settings, enhance,
//! auth) goes through the `Gateway` trait so dashboard logic can run against
//! `FakeGateway` in tests. `HttpGateway` is the production implementation.

use async_trait::async_trait;
use bytes::Bytes;
use serde::Serialize;
use thiserror::Error;

use crate::models::{Contact, ContactId, Settings};

pub mod http;
pub mod payload;

#[cfg(test)]
pub mod fake;

pub use http::HttpGateway;
pub use payload::{AuthSession, PayloadError, Profile};

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Gateway error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error(transparent)]
    Payload(#[from] PayloadError),
}

impl GatewayError {
    /// The message the gateway itself attached to a rejection, if any.
    pub fn api_message(&self) -> Option<&str> {
        match self {
            GatewayError::Api { message, .. } if !message.trim().is_empty() => Some(message),
            _ => None,
        }
    }
}

/// One email as handed to `POST /api/email/send`.
#[derive(Debug, Clone, Serialize)]
pub struct OutboundEmail {
    pub sender_email: String,
    pub sender_password: String,
    pub recipient_email: String,
    pub subject: String,
    pub body: String,
}

/// A file selected for upload.
#[derive(Debug, Clone)]
pub struct UploadFile {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

#[derive(Debug, Clone, Serialize)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[async_trait]
pub trait Gateway: Send + Sync {
    /// GET /api/auth/me
    async fn fetch_profile(&self, token: &str) -> Result<Profile, GatewayError>;

    /// POST /upload: returns the extracted, normalized contacts.
    async fn upload(&self, token: &str, file: &UploadFile) -> Result<Vec<Contact>, GatewayError>;

    /// POST /api/email/send: any 2xx is success.
    async fn send_email(&self, token: &str, email: &OutboundEmail) -> Result<(), GatewayError>;

    /// PATCH /api/contacts/{id} with `{ "is_sent": true }`.
    async fn mark_contact_sent(&self, token: &str, id: &ContactId) -> Result<(), GatewayError>;

    /// PUT /api/auth/email-settings
    async fn save_settings(&self, token: &str, settings: &Settings) -> Result<(), GatewayError>;

    /// POST /api/template/enhance: returns the rewritten body.
    async fn enhance_template(&self, token: &str, content: &str) -> Result<String, GatewayError>;

    async fn signup(&self, request: &SignupRequest) -> Result<AuthSession, GatewayError>;

    async fn login(&self, request: &LoginRequest) -> Result<AuthSession, GatewayError>;
}
