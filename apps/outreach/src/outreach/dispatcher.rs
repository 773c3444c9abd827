//! Outreach dispatcher: sends one email per pending contact, in list order,
//! strictly one at a time.
//!
//! A failed send keeps the contact pending and never aborts the batch. A
//! failed status PATCH after a successful send is logged and otherwise
//! ignored. Nothing is retried; the user re-runs the dispatcher instead.

use serde::Serialize;
use tracing::{debug, error, info, warn};

use crate::dashboard::state::Tab;
use crate::errors::AppError;
use crate::gateway::{Gateway, OutboundEmail};
use crate::models::ContactId;
use crate::outreach::render::render;
use crate::session::Session;

const BODY_PREVIEW_CHARS: usize = 200;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DispatchReport {
    pub attempted: usize,
    pub sent: usize,
    pub failed: Vec<ContactId>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum DispatchOutcome {
    /// Another upload or dispatch holds the processing flag; nothing was done.
    Busy,
    /// Every contact is already sent.
    NothingToDo,
    Completed(DispatchReport),
}

/// Runs the send loop for `session`.
///
/// Guard order: busy, then nothing pending, then missing credentials. The
/// last switches the dashboard to the settings tab and returns
/// `AppError::Configuration` before any request is made.
pub async fn dispatch(
    session: &Session,
    gateway: &dyn Gateway,
    token: &str,
) -> Result<DispatchOutcome, AppError> {
    let Some(_processing) = session.try_begin() else {
        debug!("Dispatch requested while another run is in flight");
        return Ok(DispatchOutcome::Busy);
    };

    let (pending, template, settings) = {
        let mut state = session.state.lock().await;
        let pending = state.pending_contacts();
        if pending.is_empty() {
            return Ok(DispatchOutcome::NothingToDo);
        }
        if !state.settings.is_complete() {
            state.switch_tab(Tab::Settings);
            return Err(AppError::Configuration(
                "Please configure your email settings first.".to_string(),
            ));
        }
        (
            pending,
            state.templates.default_template().clone(),
            state.settings.clone(),
        )
    };

    info!(pending = pending.len(), "Starting outreach dispatch");
    let mut report = DispatchReport::default();

    for contact in pending {
        report.attempted += 1;
        let email = render(&template, &contact);

        {
            let mut state = session.state.lock().await;
            state.log(format!(
                "Preparing email for {} ({})...",
                contact.name, contact.email
            ));
            state.log(format!("Replaced placeholders. Subject: \"{}\"", email.subject));
        }
        debug!(
            recipient = %contact.email,
            subject = %email.subject,
            body_preview = %email.body.chars().take(BODY_PREVIEW_CHARS).collect::<String>(),
            "Rendered outreach email"
        );

        let outbound = OutboundEmail {
            sender_email: settings.professional_email.clone(),
            sender_password: settings.app_password.clone(),
            recipient_email: contact.email.clone(),
            subject: email.subject,
            body: email.body,
        };

        match gateway.send_email(token, &outbound).await {
            Ok(()) => {
                if let Err(e) = gateway.mark_contact_sent(token, &contact.id).await {
                    error!(contact_id = %contact.id, "Failed to update sent status: {e}");
                }
                session
                    .state
                    .lock()
                    .await
                    .apply_send_success(&contact.id, &contact.email);
                report.sent += 1;
            }
            Err(e) => {
                warn!(recipient = %contact.email, "Failed to send email: {e}");
                session.state.lock().await.apply_send_failure(&contact.email);
                report.failed.push(contact.id.clone());
            }
        }
    }

    info!(
        attempted = report.attempted,
        sent = report.sent,
        failed = report.failed.len(),
        "Outreach dispatch finished"
    );
    Ok(DispatchOutcome::Completed(report))
}
