//! Turns raw submissions into [`ApplicationRecord`]s or a structured
//! [`ValidationError`].

pub mod schema;

use std::fmt;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, instrument, warn};
use validator::Validate;

use crate::dto::application_dto::{
    ExpressApplicationRequest, StandardApplicationRequest, StandardSubmission, UploadedFile,
};
use crate::model::application::{Applicant, ApplicationRecord, AttachmentMetadata};
use crate::util::inline::inline_file;
use schema::APPLICATION_SCHEMA;

/// Multipart field name shared by all file parts of a standard submission.
pub const ATTACHMENTS_FIELD: &str = "attachments";

/// Required names are trimmed before the length check.
const NAME_FIELDS: &[&str] = &["firstName", "lastName"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub code: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, code: impl Into<String>, message: impl Into<String>) -> Self {
        FieldError { field: field.into(), code: code.into(), message: message.into() }
    }
}

/// One or more fields of a submission were rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub errors: Vec<FieldError>,
}

impl ValidationError {
    pub fn single(field: &str, code: &str, message: &str) -> Self {
        ValidationError { errors: vec![FieldError::new(field, code, message)] }
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields: Vec<&str> = self.errors.iter().map(|e| e.field.as_str()).collect();
        write!(f, "invalid fields: {}", fields.join(", "))
    }
}

impl std::error::Error for ValidationError {}

impl From<validator::ValidationErrors> for ValidationError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields: Vec<FieldError> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                let field = camel_case(&field);
                errs.iter()
                    .map(|e| {
                        let message = e
                            .message
                            .as_ref()
                            .map(|m| m.to_string())
                            .unwrap_or_else(|| e.code.to_string());
                        FieldError::new(field.clone(), e.code.to_string(), message)
                    })
                    .collect::<Vec<_>>()
            })
            .collect();
        fields.sort_by(|a, b| a.field.cmp(&b.field));
        ValidationError { errors: fields }
    }
}

/// `first_name` -> `firstName`, matching the wire names.
fn camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper = false;
    for c in field.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}

/// Stateless validator for both intake forms.
#[derive(Debug, Clone, Copy, Default)]
pub struct IntakeValidator;

impl IntakeValidator {
    /// Presence and type checks only; the email is not format-checked.
    #[instrument(skip_all)]
    pub fn validate_express(&self, payload: Value) -> Result<ApplicationRecord, ValidationError> {
        let fields = match payload {
            Value::Object(map) => map,
            _ => {
                warn!("Express submission body is not a JSON object");
                return Err(ValidationError::single("body", "type", "expected a JSON object"));
            }
        };

        let request: ExpressApplicationRequest = checked_request(fields, Vec::new())?;
        request.validate()?;

        debug!("Express submission validated");
        Ok(ApplicationRecord::express(Applicant::from(request)))
    }

    /// Full validation including email grammar; files are inlined in receipt order.
    #[instrument(skip_all, fields(files = submission.files.len()))]
    pub fn validate_standard(&self, submission: StandardSubmission) -> Result<ApplicationRecord, ValidationError> {
        let StandardSubmission { fields, files } = submission;

        let mut file_errors = Vec::new();
        let files: Vec<UploadedFile> = files.into_iter().filter(|f| !is_unselected_file(f)).collect();
        for (index, file) in files.iter().enumerate() {
            if file.filename.as_deref().map_or(true, str::is_empty) {
                file_errors.push(FieldError::new(
                    format!("{}[{}]", ATTACHMENTS_FIELD, index),
                    "filename",
                    "file part must carry a filename",
                ));
            }
        }

        let request: StandardApplicationRequest = checked_request(fields, file_errors)?;
        request.validate()?;

        let attachments: Vec<AttachmentMetadata> = files
            .into_iter()
            .map(|file| inline_file(file.filename.unwrap_or_default(), file.content_type, &file.content))
            .collect();

        debug!(attachments = attachments.len(), "Standard submission validated");
        Ok(ApplicationRecord::standard(Applicant::from(request), attachments))
    }
}

/// Run the declarative schema, then deserialize into the typed request.
fn checked_request<T: DeserializeOwned>(
    mut fields: Map<String, Value>,
    mut errors: Vec<FieldError>,
) -> Result<T, ValidationError> {
    let mut schema_errors = schema::check(APPLICATION_SCHEMA, &fields);
    schema_errors.append(&mut errors);
    if !schema_errors.is_empty() {
        warn!(errors = ?schema_errors, "Submission failed schema check");
        return Err(ValidationError { errors: schema_errors });
    }
    for name in NAME_FIELDS {
        if let Some(Value::String(value)) = fields.get_mut(*name) {
            *value = value.trim().to_string();
        }
    }
    serde_json::from_value(Value::Object(fields)).map_err(|e| {
        warn!("Submission could not be decoded: {}", e);
        ValidationError::single("body", "type", &e.to_string())
    })
}

/// Browsers send an empty, unnamed part when no file was chosen.
fn is_unselected_file(file: &UploadedFile) -> bool {
    file.content.is_empty() && file.filename.as_deref().map_or(true, str::is_empty)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::application::SubmissionKind;
    use serde_json::json;

    fn standard_fields(email: &str) -> StandardSubmission {
        StandardSubmission::default()
            .with_field("firstName", "Anna")
            .with_field("lastName", "Muller")
            .with_field("email", email)
    }

    #[test]
    fn test_express_accepts_minimal_payload() {
        let record = IntakeValidator
            .validate_express(json!({
                "firstName": "Anna",
                "lastName": "Muller",
                "email": "anna@example.com"
            }))
            .unwrap();
        assert_eq!(record.submission_kind(), SubmissionKind::Express);
        assert!(record.attachments().is_none());
        assert!(record.phone().is_none());
    }

    #[test]
    fn test_express_does_not_check_email_format() {
        let record = IntakeValidator
            .validate_express(json!({
                "firstName": "Anna",
                "lastName": "Muller",
                "email": "not-an-email",
                "workSchedule": "part-time"
            }))
            .unwrap();
        assert_eq!(record.email(), "not-an-email");
        assert_eq!(record.work_schedule(), Some("part-time"));
    }

    #[test]
    fn test_express_reports_every_bad_field() {
        let err = IntakeValidator
            .validate_express(json!({ "firstName": "Anna", "email": 12 }))
            .unwrap_err();
        assert!(err.has_field("lastName"));
        assert!(err.has_field("email"));
        assert_eq!(err.errors.len(), 2);
    }

    #[test]
    fn test_express_rejects_empty_names() {
        let err = IntakeValidator
            .validate_express(json!({ "firstName": "", "lastName": "Muller", "email": "x" }))
            .unwrap_err();
        assert_eq!(err.errors, vec![FieldError::new("firstName", "length", "must not be empty")]);
    }

    #[test]
    fn test_whitespace_only_names_are_empty() {
        let err = IntakeValidator
            .validate_express(json!({ "firstName": "   ", "lastName": "\t", "email": "x" }))
            .unwrap_err();
        let fields: Vec<_> = err.errors.iter().map(|e| (e.field.as_str(), e.code.as_str())).collect();
        assert_eq!(fields, vec![("firstName", "length"), ("lastName", "length")]);

        let err = IntakeValidator
            .validate_standard(standard_fields("anna@example.com").with_field("lastName", "  "))
            .unwrap_err();
        assert_eq!(err.errors, vec![FieldError::new("lastName", "length", "must not be empty")]);
    }

    #[test]
    fn test_names_are_trimmed() {
        let record = IntakeValidator
            .validate_express(json!({ "firstName": " Anna ", "lastName": "Muller\n", "email": "x" }))
            .unwrap();
        assert_eq!(record.first_name(), "Anna");
        assert_eq!(record.last_name(), "Muller");
    }

    #[test]
    fn test_express_rejects_non_object_body() {
        let err = IntakeValidator.validate_express(json!(["Anna"])).unwrap_err();
        assert!(err.has_field("body"));
    }

    #[test]
    fn test_blank_optional_text_is_absent() {
        let record = IntakeValidator
            .validate_standard(standard_fields("anna@example.com").with_field("phone", "  "))
            .unwrap();
        assert!(record.phone().is_none());
    }

    #[test]
    fn test_standard_rejects_malformed_email() {
        for email in ["not-an-email", "anna@", "@example.com"] {
            let err = IntakeValidator.validate_standard(standard_fields(email)).unwrap_err();
            assert_eq!(err.errors.len(), 1, "email {:?}", email);
            assert_eq!(err.errors[0].field, "email");
            assert_eq!(err.errors[0].code, "email");
        }
    }

    #[test]
    fn test_standard_accepts_mixed_case_domain() {
        let record = IntakeValidator.validate_standard(standard_fields("Anna@Example.COM")).unwrap();
        assert_eq!(record.email(), "Anna@Example.COM");
    }

    #[test]
    fn test_standard_keeps_file_order() {
        let submission = standard_fields("anna@example.com")
            .with_file("cv.pdf", Some("application/pdf"), b"%PDF-1.7".to_vec())
            .with_file("certificate.png", None, vec![0u8; 10]);
        let record = IntakeValidator.validate_standard(submission).unwrap();
        let names: Vec<_> = record.attachments().unwrap().iter().map(|a| a.filename()).collect();
        assert_eq!(names, vec!["cv.pdf", "certificate.png"]);
    }

    #[test]
    fn test_standard_ignores_unselected_file_parts() {
        let mut submission = standard_fields("anna@example.com");
        submission.files.push(UploadedFile {
            filename: Some(String::new()),
            content_type: Some("application/octet-stream".to_string()),
            content: Default::default(),
        });
        let record = IntakeValidator.validate_standard(submission).unwrap();
        assert!(record.attachments().is_none());
    }

    #[test]
    fn test_standard_rejects_file_without_filename() {
        let mut submission = standard_fields("anna@example.com");
        submission.files.push(UploadedFile {
            filename: None,
            content_type: None,
            content: bytes::Bytes::from_static(b"data"),
        });
        let err = IntakeValidator.validate_standard(submission).unwrap_err();
        assert!(err.has_field("attachments[0]"));
    }

    #[test]
    fn test_camel_case() {
        assert_eq!(camel_case("first_name"), "firstName");
        assert_eq!(camel_case("email"), "email");
        assert_eq!(camel_case("lastName"), "lastName");
    }
}
