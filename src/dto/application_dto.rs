use bytes::Bytes;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use validator::Validate;

use crate::model::application::Applicant;

/// Body of an express submission, after the schema check passed.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ExpressApplicationRequest {
    #[validate(length(min = 1, message = "must not be empty"))]
    pub first_name: String,

    #[validate(length(min = 1, message = "must not be empty"))]
    pub last_name: String,

    // Express intake accepts any email text
    pub email: String,

    pub phone: Option<String>,
    pub desired_role: Option<String>,
    pub work_schedule: Option<String>,
    pub message: Option<String>,
}

/// Text fields of a standard submission, after the schema check passed.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct StandardApplicationRequest {
    #[validate(length(min = 1, message = "must not be empty"))]
    pub first_name: String,

    #[validate(length(min = 1, message = "must not be empty"))]
    pub last_name: String,

    #[validate(email(message = "must be a valid email address"))]
    pub email: String,

    pub phone: Option<String>,
    pub desired_role: Option<String>,
    pub work_schedule: Option<String>,
    pub message: Option<String>,
}

impl From<ExpressApplicationRequest> for Applicant {
    fn from(req: ExpressApplicationRequest) -> Self {
        Applicant {
            first_name: req.first_name,
            last_name: req.last_name,
            email: req.email,
            phone: non_blank(req.phone),
            desired_role: non_blank(req.desired_role),
            work_schedule: non_blank(req.work_schedule),
            message: non_blank(req.message),
        }
    }
}

impl From<StandardApplicationRequest> for Applicant {
    fn from(req: StandardApplicationRequest) -> Self {
        Applicant {
            first_name: req.first_name,
            last_name: req.last_name,
            email: req.email,
            phone: non_blank(req.phone),
            desired_role: non_blank(req.desired_role),
            work_schedule: non_blank(req.work_schedule),
            message: non_blank(req.message),
        }
    }
}

/// Optional text that is blank counts as absent.
fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// A file part received under the `attachments` form field.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub filename: Option<String>,
    pub content_type: Option<String>,
    pub content: Bytes,
}

/// A standard submission as read off the wire: text fields plus files in
/// the order they were received.
#[derive(Debug, Clone, Default)]
pub struct StandardSubmission {
    pub fields: Map<String, Value>,
    pub files: Vec<UploadedFile>,
}

impl StandardSubmission {
    pub fn with_field(mut self, name: &str, value: &str) -> Self {
        self.fields.insert(name.to_string(), Value::String(value.to_string()));
        self
    }

    pub fn with_file(mut self, filename: &str, content_type: Option<&str>, content: impl Into<Bytes>) -> Self {
        self.files.push(UploadedFile {
            filename: Some(filename.to_string()),
            content_type: content_type.map(str::to_string),
            content: content.into(),
        });
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionResponse {
    pub ok: bool,
    pub id: String,
}
