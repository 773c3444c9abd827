//! Upload-and-extract flow.
//!
//! Every selected file is listed locally, but only the first file of a
//! selection is transmitted to the gateway. That mirrors the behavior this
//! service replaces; a warning is logged whenever files are left behind.

use serde::Serialize;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::gateway::{Gateway, UploadFile};
use crate::models::Contact;
use crate::session::Session;

#[derive(Debug, Clone, Serialize)]
pub struct UploadOutcome {
    /// Names of every file in the selection.
    pub listed: Vec<String>,
    /// The file actually sent to the gateway.
    pub transmitted: String,
    pub extracted: Vec<Contact>,
}

pub async fn upload_files(
    session: &Session,
    gateway: &dyn Gateway,
    token: &str,
    files: Vec<UploadFile>,
) -> Result<UploadOutcome, AppError> {
    let Some(first) = files.first() else {
        return Err(AppError::Validation("No file selected".to_string()));
    };
    let Some(_processing) = session.try_begin() else {
        return Err(AppError::Busy(
            "An upload or send is already in progress.".to_string(),
        ));
    };

    let listed: Vec<String> = files.iter().map(|f| f.file_name.clone()).collect();
    session
        .state
        .lock()
        .await
        .record_uploaded_files(listed.iter().cloned());

    if files.len() > 1 {
        warn!(
            selected = files.len(),
            transmitted = %first.file_name,
            "Only the first file of a multi-file selection is sent for extraction"
        );
    }

    let extracted = gateway
        .upload(token, first)
        .await
        .map_err(|e| AppError::gateway("Failed to extract contacts.", e))?;

    info!(
        file = %first.file_name,
        contacts = extracted.len(),
        "Contacts extracted"
    );
    session
        .state
        .lock()
        .await
        .append_contacts(extracted.clone());

    Ok(UploadOutcome {
        listed,
        transmitted: first.file_name.clone(),
        extracted,
    })
}
