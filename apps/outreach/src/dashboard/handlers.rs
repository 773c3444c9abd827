//! Axum route handlers for the dashboard.
//!
//! Every handler answers with the refreshed `DashboardView` plus an optional
//! notice, so the client re-renders from one response.

use std::sync::Arc;

use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::dashboard::profile::load_profile;
use crate::dashboard::settings::save_settings;
use crate::dashboard::state::Tab;
use crate::dashboard::templates::{create_template, enhance_default};
use crate::dashboard::upload::{upload_files, UploadOutcome};
use crate::dashboard::view::{ActionResponse, DashboardView, Notice};
use crate::errors::AppError;
use crate::gateway::UploadFile;
use crate::models::{Settings, Template, TemplateDraft};
use crate::outreach::dispatcher::{dispatch, DispatchOutcome};
use crate::session::{Session, SessionToken};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct TabRequest {
    pub tab: Tab,
}

/// Looks up the caller's session. A session created here (for example after
/// a restart) is hydrated from the gateway before use.
async fn attach(state: &AppState, caller: &SessionToken) -> Arc<Session> {
    let (session, created) = state
        .sessions
        .get_or_create(&caller.token, caller.user_name.clone())
        .await;
    if created {
        if let Err(e) = load_profile(&session, state.gateway.as_ref(), &caller.token).await {
            warn!("Could not hydrate new session: {e}");
        }
    }
    session
}

async fn respond<T: Serialize>(
    session: &Session,
    notice: Option<Notice>,
    result: Option<T>,
) -> Json<ActionResponse<T>> {
    let dashboard = DashboardView::new(&*session.state.lock().await, session.is_processing());
    Json(ActionResponse {
        dashboard,
        notice,
        result,
    })
}

/// GET /dashboard
///
/// Mount: loads the profile and returns the full view. A failed load is
/// reported as a notice; the dashboard still renders.
pub async fn handle_mount(
    State(state): State<AppState>,
    caller: SessionToken,
) -> Json<ActionResponse> {
    let (session, _) = state
        .sessions
        .get_or_create(&caller.token, caller.user_name.clone())
        .await;
    let notice = match load_profile(&session, state.gateway.as_ref(), &caller.token).await {
        Ok(()) => None,
        Err(e) => Some(Notice::error(e.to_string())),
    };
    respond(&session, notice, None).await
}

/// POST /dashboard/profile/reload
pub async fn handle_reload(
    State(state): State<AppState>,
    caller: SessionToken,
) -> Result<Json<ActionResponse>, AppError> {
    let session = attach(&state, &caller).await;
    load_profile(&session, state.gateway.as_ref(), &caller.token).await?;
    Ok(respond(&session, None, None).await)
}

/// PUT /dashboard/tab
pub async fn handle_switch_tab(
    State(state): State<AppState>,
    caller: SessionToken,
    Json(request): Json<TabRequest>,
) -> Json<ActionResponse> {
    let session = attach(&state, &caller).await;
    session.state.lock().await.switch_tab(request.tab);
    respond(&session, None, None).await
}

/// POST /dashboard/upload (multipart, one or more `file` parts)
pub async fn handle_upload(
    State(state): State<AppState>,
    caller: SessionToken,
    mut multipart: Multipart,
) -> Result<Json<ActionResponse<UploadOutcome>>, AppError> {
    let mut files = Vec::new();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Multipart error: {e}")))?
    {
        let Some(file_name) = field.file_name().map(str::to_string) else {
            continue;
        };
        let content_type = field.content_type().map(str::to_string);
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Failed to read file: {e}")))?;
        files.push(UploadFile {
            file_name,
            content_type,
            bytes,
        });
    }

    let session = attach(&state, &caller).await;
    let outcome = upload_files(&session, state.gateway.as_ref(), &caller.token, files).await?;
    Ok(respond(
        &session,
        Some(Notice::success("Contacts extracted successfully!")),
        Some(outcome),
    )
    .await)
}

/// POST /dashboard/send
///
/// Missing credentials answer 422 with the full view, so the client sees the
/// switch to the settings tab alongside the error notice.
pub async fn handle_send(
    State(state): State<AppState>,
    caller: SessionToken,
) -> Result<Response, AppError> {
    let session = attach(&state, &caller).await;
    let outcome = match dispatch(&session, state.gateway.as_ref(), &caller.token).await {
        Ok(outcome) => outcome,
        Err(AppError::Configuration(message)) => {
            let view = respond::<()>(&session, Some(Notice::error(message)), None).await;
            return Ok((StatusCode::UNPROCESSABLE_ENTITY, view).into_response());
        }
        Err(e) => return Err(e),
    };

    let notice = match &outcome {
        DispatchOutcome::Busy => Some(Notice::info("Emails are already being sent.")),
        DispatchOutcome::NothingToDo => {
            Some(Notice::success("All contacts have already been emailed!"))
        }
        DispatchOutcome::Completed(report) if report.sent > 0 => Some(Notice::success(
            format!("Process completed. Sent {} emails.", report.sent),
        )),
        DispatchOutcome::Completed(_) => None,
    };
    Ok(respond(&session, notice, Some(outcome)).await.into_response())
}

/// PUT /dashboard/settings
pub async fn handle_save_settings(
    State(state): State<AppState>,
    caller: SessionToken,
    Json(settings): Json<Settings>,
) -> Result<Json<ActionResponse>, AppError> {
    let session = attach(&state, &caller).await;
    save_settings(&session, state.gateway.as_ref(), &caller.token, settings).await?;
    Ok(respond(&session, Some(Notice::success("Settings saved successfully!")), None).await)
}

/// POST /dashboard/templates
pub async fn handle_create_template(
    State(state): State<AppState>,
    caller: SessionToken,
    Json(draft): Json<TemplateDraft>,
) -> Result<Json<ActionResponse<Template>>, AppError> {
    let session = attach(&state, &caller).await;
    let template = create_template(&mut session.state.lock().await.templates, draft)?;
    Ok(respond(
        &session,
        Some(Notice::success("Template created successfully!")),
        Some(template),
    )
    .await)
}

/// DELETE /dashboard/templates/:id
pub async fn handle_delete_template(
    State(state): State<AppState>,
    caller: SessionToken,
    Path(id): Path<String>,
) -> Result<Json<ActionResponse>, AppError> {
    let session = attach(&state, &caller).await;
    let removed = session.state.lock().await.templates.delete(&id);
    if !removed {
        return Err(AppError::NotFound(format!("Template {id} not found")));
    }
    Ok(respond(&session, Some(Notice::success("Template deleted successfully!")), None).await)
}

/// POST /dashboard/templates/default/enhance
pub async fn handle_enhance_template(
    State(state): State<AppState>,
    caller: SessionToken,
) -> Result<Json<ActionResponse>, AppError> {
    let session = attach(&state, &caller).await;
    enhance_default(&session, state.gateway.as_ref(), &caller.token).await?;
    Ok(respond(&session, Some(Notice::success("Template enhanced and saved!")), None).await)
}

/// DELETE /dashboard/logs
pub async fn handle_clear_logs(
    State(state): State<AppState>,
    caller: SessionToken,
) -> Json<ActionResponse> {
    let session = attach(&state, &caller).await;
    session.state.lock().await.clear_logs();
    respond(&session, None, None).await
}
