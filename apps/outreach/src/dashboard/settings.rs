use tracing::info;

use crate::errors::AppError;
use crate::gateway::Gateway;
use crate::models::Settings;
use crate::session::Session;

/// Saves sender credentials at the gateway, then applies them locally.
/// Nothing changes locally when the gateway rejects them.
pub async fn save_settings(
    session: &Session,
    gateway: &dyn Gateway,
    token: &str,
    settings: Settings,
) -> Result<(), AppError> {
    if !settings.is_complete() {
        return Err(AppError::Validation(
            "Professional email and app password are both required".to_string(),
        ));
    }

    gateway
        .save_settings(token, &settings)
        .await
        .map_err(|e| AppError::gateway("Failed to save settings. Please try again.", e))?;

    info!(email = %settings.professional_email, "Email settings saved");
    session.state.lock().await.settings = settings;
    Ok(())
}
