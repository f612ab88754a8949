use serde::{Deserialize, Serialize};

/// Which intake form produced the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionKind {
    Express,
    Standard,
}

/// Metadata for one uploaded file, optionally carrying its content inline.
///
/// Built only through [`crate::util::inline::inline_file`], which ties the
/// presence of `inline_content` to `size_bytes`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttachmentMetadata {
    filename: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    content_type: Option<String>,
    size_bytes: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    inline_content: Option<String>,
}

impl AttachmentMetadata {
    pub(crate) fn new(
        filename: String,
        content_type: Option<String>,
        size_bytes: u64,
        inline_content: Option<String>,
    ) -> Self {
        AttachmentMetadata { filename, content_type, size_bytes, inline_content }
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    pub fn size_bytes(&self) -> u64 {
        self.size_bytes
    }

    /// Base64 text of the file, present only for files within the inline limit.
    pub fn inline_content(&self) -> Option<&str> {
        self.inline_content.as_deref()
    }
}

/// Applicant-supplied text fields shared by both submission kinds.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Applicant {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub desired_role: Option<String>,
    pub work_schedule: Option<String>,
    pub message: Option<String>,
}

/// A normalized job application, persisted once as a single document.
///
/// Absent optional fields and an empty attachment list are omitted from the
/// serialized form; `null` reads back as absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationRecord {
    submission_kind: SubmissionKind,
    first_name: String,
    last_name: String,
    email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    desired_role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    work_schedule: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    attachments: Option<Vec<AttachmentMetadata>>,
}

impl ApplicationRecord {
    pub fn express(applicant: Applicant) -> Self {
        Self::build(SubmissionKind::Express, applicant, None)
    }

    /// An empty `attachments` list is stored as absent.
    pub fn standard(applicant: Applicant, attachments: Vec<AttachmentMetadata>) -> Self {
        let attachments = if attachments.is_empty() { None } else { Some(attachments) };
        Self::build(SubmissionKind::Standard, applicant, attachments)
    }

    fn build(kind: SubmissionKind, applicant: Applicant, attachments: Option<Vec<AttachmentMetadata>>) -> Self {
        ApplicationRecord {
            submission_kind: kind,
            first_name: applicant.first_name,
            last_name: applicant.last_name,
            email: applicant.email,
            phone: applicant.phone,
            desired_role: applicant.desired_role,
            work_schedule: applicant.work_schedule,
            message: applicant.message,
            attachments,
        }
    }

    pub fn submission_kind(&self) -> SubmissionKind {
        self.submission_kind
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn phone(&self) -> Option<&str> {
        self.phone.as_deref()
    }

    pub fn desired_role(&self) -> Option<&str> {
        self.desired_role.as_deref()
    }

    pub fn work_schedule(&self) -> Option<&str> {
        self.work_schedule.as_deref()
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn attachments(&self) -> Option<&[AttachmentMetadata]> {
        self.attachments.as_deref()
    }
}
