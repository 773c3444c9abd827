use std::time::Duration;

use async_trait::async_trait;
use reqwest::{multipart, Client, Response};
use serde::Serialize;
use serde_json::json;
use tracing::{debug, warn};

use super::payload::{
    normalize_auth, normalize_enhance, normalize_profile, normalize_upload, AuthPayload,
    EnhancePayload, ErrorPayload, ProfilePayload, UploadPayload,
};
use super::{
    AuthSession, Gateway, GatewayError, LoginRequest, OutboundEmail, Profile, SignupRequest,
    UploadFile,
};
use crate::models::{Contact, ContactId, Settings};

const PROFILE_PATH: &str = "/api/auth/me";
const UPLOAD_PATH: &str = "/upload";
const SEND_EMAIL_PATH: &str = "/api/email/send";
const CONTACTS_PATH: &str = "/api/contacts";
const EMAIL_SETTINGS_PATH: &str = "/api/auth/email-settings";
const ENHANCE_PATH: &str = "/api/template/enhance";
const SIGNUP_PATH: &str = "/api/auth/signup";
const LOGIN_PATH: &str = "/api/auth/login";

#[derive(Serialize)]
struct EmailSettingsBody<'a> {
    professional_email: &'a str,
    mail_app_password: &'a str,
}

/// REST implementation of `Gateway`. One attempt per call: failures are
/// returned to the caller, never retried here.
#[derive(Clone)]
pub struct HttpGateway {
    client: Client,
    base_url: String,
}

impl HttpGateway {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, GatewayError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Turns non-2xx responses into `GatewayError::Api`, keeping the
    /// gateway's `message` when the body carries one.
    async fn ensure_success(response: Response) -> Result<Response, GatewayError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        warn!("Gateway returned {}: {}", status, body);
        let message = serde_json::from_str::<ErrorPayload>(&body)
            .ok()
            .and_then(|e| e.message)
            .unwrap_or(body);
        Err(GatewayError::Api {
            status: status.as_u16(),
            message,
        })
    }

    async fn decode<T: serde::de::DeserializeOwned>(response: Response) -> Result<T, GatewayError> {
        let bytes = response.bytes().await?;
        let payload = serde_json::from_slice(&bytes).map_err(super::PayloadError::from)?;
        Ok(payload)
    }
}

#[async_trait]
impl Gateway for HttpGateway {
    async fn fetch_profile(&self, token: &str) -> Result<Profile, GatewayError> {
        let response = self
            .client
            .get(self.url(PROFILE_PATH))
            .bearer_auth(token)
            .send()
            .await?;
        let payload: ProfilePayload = Self::decode(Self::ensure_success(response).await?).await?;
        Ok(normalize_profile(payload)?)
    }

    async fn upload(&self, token: &str, file: &UploadFile) -> Result<Vec<Contact>, GatewayError> {
        let mut part = multipart::Part::bytes(file.bytes.to_vec()).file_name(file.file_name.clone());
        if let Some(content_type) = &file.content_type {
            part = part.mime_str(content_type)?;
        }
        let form = multipart::Form::new().part("file", part);

        debug!(file = %file.file_name, size = file.bytes.len(), "Uploading file to gateway");

        let response = self
            .client
            .post(self.url(UPLOAD_PATH))
            .bearer_auth(token)
            .multipart(form)
            .send()
            .await?;
        let payload: UploadPayload = Self::decode(Self::ensure_success(response).await?).await?;
        Ok(normalize_upload(payload)?)
    }

    async fn send_email(&self, token: &str, email: &OutboundEmail) -> Result<(), GatewayError> {
        let response = self
            .client
            .post(self.url(SEND_EMAIL_PATH))
            .bearer_auth(token)
            .json(email)
            .send()
            .await?;
        Self::ensure_success(response).await?;
        Ok(())
    }

    async fn mark_contact_sent(&self, token: &str, id: &ContactId) -> Result<(), GatewayError> {
        let response = self
            .client
            .patch(self.url(&format!("{CONTACTS_PATH}/{id}")))
            .bearer_auth(token)
            .json(&json!({ "is_sent": true }))
            .send()
            .await?;
        Self::ensure_success(response).await?;
        Ok(())
    }

    async fn save_settings(&self, token: &str, settings: &Settings) -> Result<(), GatewayError> {
        let response = self
            .client
            .put(self.url(EMAIL_SETTINGS_PATH))
            .bearer_auth(token)
            .json(&EmailSettingsBody {
                professional_email: &settings.professional_email,
                mail_app_password: &settings.app_password,
            })
            .send()
            .await?;
        Self::ensure_success(response).await?;
        Ok(())
    }

    async fn enhance_template(&self, token: &str, content: &str) -> Result<String, GatewayError> {
        let response = self
            .client
            .post(self.url(ENHANCE_PATH))
            .bearer_auth(token)
            .json(&json!({ "content": content }))
            .send()
            .await?;
        let payload: EnhancePayload = Self::decode(Self::ensure_success(response).await?).await?;
        Ok(normalize_enhance(payload)?)
    }

    async fn signup(&self, request: &SignupRequest) -> Result<AuthSession, GatewayError> {
        let response = self
            .client
            .post(self.url(SIGNUP_PATH))
            .json(request)
            .send()
            .await?;
        let payload: AuthPayload = Self::decode(Self::ensure_success(response).await?).await?;
        Ok(normalize_auth(payload)?)
    }

    async fn login(&self, request: &LoginRequest) -> Result<AuthSession, GatewayError> {
        let response = self
            .client
            .post(self.url(LOGIN_PATH))
            .json(request)
            .send()
            .await?;
        let payload: AuthPayload = Self::decode(Self::ensure_success(response).await?).await?;
        Ok(normalize_auth(payload)?)
    }
}
