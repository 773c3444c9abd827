//! Session: bearer token cookies and the per-token dashboard state.
//!
//! Token presence alone is the session: there is no refresh and no expiry
//! check here; the cookie's Max-Age and the gateway decide both.

pub mod cookies;
pub mod handlers;

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use tokio::sync::{Mutex, RwLock};

use crate::dashboard::state::DashboardState;
use crate::errors::AppError;

/// One signed-in user's dashboard. State is locked only for short update
/// sections, never across a gateway call.
pub struct Session {
    pub state: Mutex<DashboardState>,
    processing: AtomicBool,
}

impl Session {
    pub fn new(user_name: Option<String>) -> Self {
        Self {
            state: Mutex::new(DashboardState::new(user_name)),
            processing: AtomicBool::new(false),
        }
    }

    /// Claims the processing flag shared by upload and dispatch.
    /// Returns `None` if another run holds it.
    pub fn try_begin(&self) -> Option<ProcessingGuard<'_>> {
        self.processing
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| ProcessingGuard {
                flag: &self.processing,
            })
    }

    pub fn is_processing(&self) -> bool {
        self.processing.load(Ordering::Acquire)
    }
}

/// Releases the processing flag on drop, including on early return.
pub struct ProcessingGuard<'a> {
    flag: &'a AtomicBool,
}

impl Drop for ProcessingGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

#[derive(Clone, Default)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<String, Arc<Session>>>>,
}

impl SessionStore {
    pub async fn get(&self, token: &str) -> Option<Arc<Session>> {
        self.sessions.read().await.get(token).cloned()
    }

    /// Returns the existing session for `token`, or creates one.
    /// The boolean is true when the session was just created.
    pub async fn get_or_create(
        &self,
        token: &str,
        user_name: Option<String>,
    ) -> (Arc<Session>, bool) {
        if let Some(session) = self.get(token).await {
            return (session, false);
        }
        let mut sessions = self.sessions.write().await;
        match sessions.get(token) {
            Some(session) => (session.clone(), false),
            None => {
                let session = Arc::new(Session::new(user_name));
                sessions.insert(token.to_string(), session.clone());
                (session, true)
            }
        }
    }

    pub async fn remove(&self, token: &str) -> bool {
        self.sessions.write().await.remove(token).is_some()
    }

    #[cfg(test)]
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}

/// The bearer token read from the `token` cookie, plus the mirrored name.
#[derive(Debug, Clone)]
pub struct SessionToken {
    pub token: String,
    pub user_name: Option<String>,
}

#[async_trait]
impl<S> FromRequestParts<S> for SessionToken
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let token = cookies::read(&parts.headers, cookies::TOKEN_COOKIE)
            .filter(|t| !t.is_empty())
            .ok_or(AppError::Unauthorized)?;
        let user_name = cookies::read(&parts.headers, cookies::USER_NAME_COOKIE);
        Ok(SessionToken { token, user_name })
    }
}
