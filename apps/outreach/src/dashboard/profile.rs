use tracing::info;

use crate::errors::AppError;
use crate::gateway::Gateway;
use crate::session::Session;

/// Fetches the profile snapshot and hydrates the session's dashboard state.
///
/// The gateway is the source of truth for counters: whatever `emails_sent`
/// was bumped to locally is overwritten here.
pub async fn load_profile(
    session: &Session,
    gateway: &dyn Gateway,
    token: &str,
) -> Result<(), AppError> {
    let profile = gateway
        .fetch_profile(token)
        .await
        .map_err(|e| AppError::gateway("Failed to load user profile", e))?;

    let contacts = profile.contacts.as_ref().map(Vec::len);
    session.state.lock().await.hydrate(profile);
    info!(contacts = ?contacts, "Profile loaded");
    Ok(())
}
