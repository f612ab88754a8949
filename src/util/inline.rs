use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use tracing::debug;

use crate::model::application::AttachmentMetadata;

/// Files up to this many bytes are embedded in the stored document.
pub const INLINE_LIMIT_BYTES: usize = 1_000_000;

/// Base64 text for `content`, or `None` when it exceeds [`INLINE_LIMIT_BYTES`].
pub fn inline_content(content: &[u8]) -> Option<String> {
    if content.len() <= INLINE_LIMIT_BYTES {
        Some(STANDARD.encode(content))
    } else {
        None
    }
}

pub fn decode_inline(encoded: &str) -> Result<Vec<u8>, base64::DecodeError> {
    STANDARD.decode(encoded)
}

/// Record an uploaded file. The size is always the exact byte length; the
/// content is only kept when small enough to inline.
pub fn inline_file(filename: String, content_type: Option<String>, content: &[u8]) -> AttachmentMetadata {
    let inline = inline_content(content);
    debug!(
        filename = %filename,
        size_bytes = content.len(),
        inlined = inline.is_some(),
        "Processed attachment"
    );
    AttachmentMetadata::new(filename, content_type, content.len() as u64, inline)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_file_round_trips() {
        let content: Vec<u8> = (0..=255u8).cycle().take(4096).collect();
        let attachment = inline_file("scan.png".to_string(), Some("image/png".to_string()), &content);
        assert_eq!(attachment.size_bytes(), 4096);
        let decoded = decode_inline(attachment.inline_content().unwrap()).unwrap();
        assert_eq!(decoded, content);
    }

    #[test]
    fn test_empty_file_is_inlined_as_empty_payload() {
        let attachment = inline_file("empty.txt".to_string(), None, &[]);
        assert_eq!(attachment.size_bytes(), 0);
        assert_eq!(attachment.inline_content(), Some(""));
    }

    #[test]
    fn test_limit_is_inclusive() {
        let at_limit = vec![7u8; INLINE_LIMIT_BYTES];
        assert!(inline_content(&at_limit).is_some());

        let over_limit = vec![7u8; INLINE_LIMIT_BYTES + 1];
        assert!(inline_content(&over_limit).is_none());
    }

    #[test]
    fn test_oversized_file_keeps_metadata_only() {
        let content = vec![1u8; 2_000_000];
        let attachment = inline_file("cv.pdf".to_string(), Some("application/pdf".to_string()), &content);
        assert_eq!(attachment.filename(), "cv.pdf");
        assert_eq!(attachment.content_type(), Some("application/pdf"));
        assert_eq!(attachment.size_bytes(), 2_000_000);
        assert!(attachment.inline_content().is_none());
    }
}
