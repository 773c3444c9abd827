//! In-memory `Gateway` used by tests. Records every call and fails on demand.

use std::collections::HashSet;
use std::sync::Mutex;

use async_trait::async_trait;
use tokio::sync::Semaphore;

use super::{
    AuthSession, Gateway, GatewayError, LoginRequest, OutboundEmail, Profile, SignupRequest,
    UploadFile,
};
use crate::models::{Contact, ContactId, Settings};

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    FetchProfile,
    Upload(String),
    SendEmail(OutboundEmailRecord),
    MarkSent(ContactId),
    SaveSettings(String),
    Enhance(String),
    Signup(String),
    Login(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct OutboundEmailRecord {
    pub recipient: String,
    pub subject: String,
    pub body: String,
}

#[derive(Default)]
struct Script {
    profile: Profile,
    profile_fails: bool,
    upload_contacts: Vec<Contact>,
    upload_fails: bool,
    failing_recipients: HashSet<String>,
    mark_sent_fails: bool,
    settings_fail: bool,
    enhanced_body: Option<String>,
    auth_token: Option<String>,
}

pub struct FakeGateway {
    script: Mutex<Script>,
    calls: Mutex<Vec<Call>>,
    send_gate: Option<Semaphore>,
}

fn api_error(status: u16, message: &str) -> GatewayError {
    GatewayError::Api {
        status,
        message: message.to_string(),
    }
}

impl FakeGateway {
    pub fn new() -> Self {
        Self {
            script: Mutex::new(Script {
                auth_token: Some("fake-token".to_string()),
                ..Script::default()
            }),
            calls: Mutex::new(Vec::new()),
            send_gate: None,
        }
    }

    /// Holds every send until `release_sends` is called.
    pub fn with_send_gate(mut self) -> Self {
        self.send_gate = Some(Semaphore::new(0));
        self
    }

    pub fn with_profile(self, profile: Profile) -> Self {
        self.script.lock().unwrap().profile = profile;
        self
    }

    pub fn failing_profile(self) -> Self {
        self.script.lock().unwrap().profile_fails = true;
        self
    }

    pub fn with_upload_contacts(self, contacts: Vec<Contact>) -> Self {
        self.script.lock().unwrap().upload_contacts = contacts;
        self
    }

    pub fn failing_upload(self) -> Self {
        self.script.lock().unwrap().upload_fails = true;
        self
    }

    pub fn failing_recipient(self, email: &str) -> Self {
        self.script
            .lock()
            .unwrap()
            .failing_recipients
            .insert(email.to_string());
        self
    }

    pub fn failing_mark_sent(self) -> Self {
        self.script.lock().unwrap().mark_sent_fails = true;
        self
    }

    pub fn failing_settings(self) -> Self {
        self.script.lock().unwrap().settings_fail = true;
        self
    }

    pub fn with_enhanced_body(self, body: &str) -> Self {
        self.script.lock().unwrap().enhanced_body = Some(body.to_string());
        self
    }

    pub fn without_auth_token(self) -> Self {
        self.script.lock().unwrap().auth_token = None;
        self
    }

    pub fn release_sends(&self) {
        if let Some(gate) = &self.send_gate {
            gate.add_permits(Semaphore::MAX_PERMITS / 2);
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn sent_emails(&self) -> Vec<OutboundEmailRecord> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::SendEmail(record) => Some(record),
                _ => None,
            })
            .collect()
    }

    pub fn send_count(&self) -> usize {
        self.sent_emails().len()
    }

    /// Yields until at least `n` sends have been recorded.
    pub async fn wait_for_sends(&self, n: usize) {
        while self.send_count() < n {
            tokio::task::yield_now().await;
        }
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl Gateway for FakeGateway {
    async fn fetch_profile(&self, _token: &str) -> Result<Profile, GatewayError> {
        self.record(Call::FetchProfile);
        let script = self.script.lock().unwrap();
        if script.profile_fails {
            return Err(api_error(500, "profile unavailable"));
        }
        Ok(script.profile.clone())
    }

    async fn upload(&self, _token: &str, file: &UploadFile) -> Result<Vec<Contact>, GatewayError> {
        self.record(Call::Upload(file.file_name.clone()));
        let script = self.script.lock().unwrap();
        if script.upload_fails {
            return Err(api_error(422, "Upload failed"));
        }
        Ok(script.upload_contacts.clone())
    }

    async fn send_email(&self, _token: &str, email: &OutboundEmail) -> Result<(), GatewayError> {
        self.record(Call::SendEmail(OutboundEmailRecord {
            recipient: email.recipient_email.clone(),
            subject: email.subject.clone(),
            body: email.body.clone(),
        }));
        if let Some(gate) = &self.send_gate {
            if let Ok(permit) = gate.acquire().await {
                permit.forget();
            }
        }
        let fails = self
            .script
            .lock()
            .unwrap()
            .failing_recipients
            .contains(&email.recipient_email);
        if fails {
            return Err(api_error(502, "SMTP rejected"));
        }
        Ok(())
    }

    async fn mark_contact_sent(&self, _token: &str, id: &ContactId) -> Result<(), GatewayError> {
        self.record(Call::MarkSent(id.clone()));
        if self.script.lock().unwrap().mark_sent_fails {
            return Err(api_error(500, "status update failed"));
        }
        Ok(())
    }

    async fn save_settings(&self, _token: &str, settings: &Settings) -> Result<(), GatewayError> {
        self.record(Call::SaveSettings(settings.professional_email.clone()));
        if self.script.lock().unwrap().settings_fail {
            return Err(api_error(400, "Failed to update settings"));
        }
        Ok(())
    }

    async fn enhance_template(&self, _token: &str, content: &str) -> Result<String, GatewayError> {
        self.record(Call::Enhance(content.to_string()));
        self.script
            .lock()
            .unwrap()
            .enhanced_body
            .clone()
            .ok_or_else(|| api_error(503, "Failed to enhance template"))
    }

    async fn signup(&self, request: &SignupRequest) -> Result<AuthSession, GatewayError> {
        self.record(Call::Signup(request.email.clone()));
        let token = self.script.lock().unwrap().auth_token.clone();
        token
            .map(|token| AuthSession {
                token,
                user_name: Some(request.name.clone()),
            })
            .ok_or_else(|| super::PayloadError::MissingField("token".to_string()).into())
    }

    async fn login(&self, request: &LoginRequest) -> Result<AuthSession, GatewayError> {
        self.record(Call::Login(request.email.clone()));
        if request.password == "wrong" {
            return Err(api_error(401, "Invalid credentials"));
        }
        let token = self.script.lock().unwrap().auth_token.clone();
        token
            .map(|token| AuthSession {
                token,
                user_name: Some("Ann Lee".to_string()),
            })
            .ok_or_else(|| super::PayloadError::MissingField("token".to_string()).into())
    }
}
