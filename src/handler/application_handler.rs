use std::sync::Arc;

use axum::extract::multipart::{Field, MultipartError, MultipartRejection};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::Json;
use bytes::BytesMut;
use serde_json::Value;
use tracing::{debug, error, info};

use crate::dto::application_dto::{StandardSubmission, SubmissionResponse, UploadedFile};
use crate::intake::ATTACHMENTS_FIELD;
use crate::service::application_service::{ApplicationService, ApplicationServiceImpl};
use crate::util::error::HandlerError;

// Handler: Submit express application (public)
pub async fn submit_express_handler(
    State(service): State<Arc<ApplicationServiceImpl>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<SubmissionResponse>, HandlerError> {
    info!("[submit_express_handler] Handler called");
    let Json(payload) = payload.map_err(json_error)?;

    let id = service.submit_express(payload).await?;
    Ok(Json(SubmissionResponse { ok: true, id }))
}

// Handler: Submit standard application with attachments (public)
pub async fn submit_standard_handler(
    State(service): State<Arc<ApplicationServiceImpl>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<SubmissionResponse>, HandlerError> {
    info!("[submit_standard_handler] Handler called");
    let mut multipart = multipart.map_err(|e| {
        error!("[submit_standard_handler] Not a multipart request: {}", e);
        HandlerError::bad_request(format!("Expected multipart/form-data: {}", e.body_text()))
    })?;

    let mut submission = StandardSubmission::default();

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().map(|s| s.to_string()).unwrap_or_default();
        debug!("[submit_standard_handler] Processing field: {}", name);

        if name == ATTACHMENTS_FIELD {
            let file = read_file(field).await?;
            info!(
                "[submit_standard_handler] Received file: {} ({} bytes)",
                file.filename.as_deref().unwrap_or("<unnamed>"),
                file.content.len()
            );
            submission.files.push(file);
        } else if field.file_name().is_some() {
            debug!("[submit_standard_handler] Ignoring file part under field: {}", name);
        } else if !name.is_empty() {
            let text = field.text().await.map_err(multipart_error)?;
            submission.fields.insert(name, Value::String(text));
        }
    }

    let id = service.submit_standard(submission).await?;
    Ok(Json(SubmissionResponse { ok: true, id }))
}

async fn read_file(mut field: Field<'_>) -> Result<UploadedFile, HandlerError> {
    let filename = field.file_name().map(|s| s.to_string());
    let content_type = field.content_type().map(|s| s.to_string());
    let mut buf = BytesMut::new();
    while let Some(chunk) = field.chunk().await.map_err(multipart_error)? {
        buf.extend_from_slice(&chunk);
    }
    Ok(UploadedFile {
        filename,
        content_type,
        content: buf.freeze(),
    })
}

fn json_error(e: JsonRejection) -> HandlerError {
    error!("[submit_express_handler] Invalid JSON body: {}", e);
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        HandlerError::payload_too_large(format!("Request body too large: {}", e.body_text()))
    } else {
        HandlerError::bad_request(format!("Invalid JSON body: {}", e.body_text()))
    }
}

fn multipart_error(e: MultipartError) -> HandlerError {
    error!("[submit_standard_handler] Failed to read multipart body: {}", e);
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        HandlerError::payload_too_large(format!("Request body too large: {}", e.body_text()))
    } else {
        HandlerError::bad_request(format!("Failed to read multipart body: {}", e.body_text()))
    }
}
