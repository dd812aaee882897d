//! The single optional file staged for submission, and the gate it must pass.

use std::fmt;
use std::path::Path;

use crate::Notice;

/// Largest accepted attachment: 5 MiB.
pub const MAX_ATTACHMENT_BYTES: u64 = 5 * 1024 * 1024;

/// MIME types accepted by [`check`]: PDF, PNG, JPEG, DOC and DOCX.
pub const ALLOWED_MIME_TYPES: [&str; 5] = [
    "application/pdf",
    "image/png",
    "image/jpeg",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
];

const FALLBACK_MIME_TYPE: &str = "application/octet-stream";

#[derive(Debug, thiserror::Error, Notice)]
pub enum AttachmentError {
    #[error("unsupported attachment type {mime_type:?} for {name}")]
    #[notice(Error, "Invalid file type. Use PDF, JPG, PNG, DOC, or DOCX.")]
    UnsupportedType { name: String, mime_type: String },

    #[error("attachment {name} is {size} bytes, limit is {limit}", limit = MAX_ATTACHMENT_BYTES)]
    #[notice(Error, "File too large (max 5MB).")]
    TooLarge { name: String, size: u64 },

    #[error("reading attachment {name}: {source}")]
    #[notice(Error, "Could not read {name}.")]
    Unreadable {
        name: String,
        source: std::io::Error,
    },
}

#[derive(Clone, PartialEq, Eq)]
pub struct Attachment {
    name: String,
    mime_type: String,
    content: Vec<u8>,
}

impl fmt::Debug for Attachment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Attachment")
            .field("name", &self.name)
            .field("mime_type", &self.mime_type)
            .field("size", &self.size())
            .finish()
    }
}

impl Attachment {
    pub fn new(
        name: impl Into<String>,
        mime_type: impl Into<String>,
        content: impl Into<Vec<u8>>,
    ) -> Self {
        Attachment {
            name: name.into(),
            mime_type: mime_type.into(),
            content: content.into(),
        }
    }

    /// Reads a file from disk, deriving the MIME type from its extension.
    ///
    /// The gate runs on the file's metadata first; rejected files are never read.
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self, AttachmentError> {
        let path = path.as_ref();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let mime_type = path
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(mime_type_for_extension)
            .unwrap_or(FALLBACK_MIME_TYPE);

        let unreadable = |source| AttachmentError::Unreadable {
            name: name.clone(),
            source,
        };
        let metadata = tokio::fs::metadata(path).await.map_err(unreadable)?;
        check_descriptor(&name, mime_type, metadata.len())?;

        let content = tokio::fs::read(path).await.map_err(unreadable)?;
        let attachment = Attachment::new(name, mime_type, content);
        // the file may have grown since the metadata was read
        check(&attachment)?;
        Ok(attachment)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn content(&self) -> &[u8] {
        &self.content
    }

    pub fn size(&self) -> u64 {
        self.content.len() as u64
    }

    /// Size in megabytes with two decimals, e.g. `"0.50 MB"`.
    pub fn size_label(&self) -> String {
        format!("{:.2} MB", self.size() as f64 / 1024.0 / 1024.0)
    }
}

/// Maps the file extensions a picker would offer to their MIME types.
pub fn mime_type_for_extension(ext: &str) -> Option<&'static str> {
    match ext.to_ascii_lowercase().as_str() {
        "pdf" => Some("application/pdf"),
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "doc" => Some("application/msword"),
        "docx" => Some(
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        ),
        _ => None,
    }
}

/// Accepts or rejects a candidate attachment. Type is checked before size.
pub fn check(attachment: &Attachment) -> Result<(), AttachmentError> {
    check_descriptor(attachment.name(), attachment.mime_type(), attachment.size())
}

/// The gate applied to a file's description alone, before its bytes are loaded.
pub fn check_descriptor(name: &str, mime_type: &str, size: u64) -> Result<(), AttachmentError> {
    if !ALLOWED_MIME_TYPES.contains(&mime_type) {
        return Err(AttachmentError::UnsupportedType {
            name: name.to_owned(),
            mime_type: mime_type.to_owned(),
        });
    }

    if size > MAX_ATTACHMENT_BYTES {
        return Err(AttachmentError::TooLarge {
            name: name.to_owned(),
            size,
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::NoticeKind;
    use rstest::rstest;

    fn sized(mime_type: &str, size: u64) -> Attachment {
        Attachment::new("file", mime_type, vec![0u8; size as usize])
    }

    #[rstest]
    #[case("application/pdf")]
    #[case("image/png")]
    #[case("image/jpeg")]
    #[case("application/msword")]
    #[case("application/vnd.openxmlformats-officedocument.wordprocessingml.document")]
    fn accepts_allowed_types(#[case] mime_type: &str) {
        assert!(check(&sized(mime_type, 1024)).is_ok());
    }

    #[rstest]
    #[case("image/gif")]
    #[case("text/plain")]
    #[case("application/octet-stream")]
    #[case("")]
    fn rejects_other_types_regardless_of_size(#[case] mime_type: &str) {
        let err = check(&sized(mime_type, 10)).unwrap_err();
        assert!(matches!(err, AttachmentError::UnsupportedType { .. }));
        assert_eq!(
            err.notice_message(),
            "Invalid file type. Use PDF, JPG, PNG, DOC, or DOCX."
        );
        assert_eq!(err.notice_kind(), NoticeKind::Error);
    }

    #[test]
    fn type_is_checked_before_size() {
        let err = check(&sized("image/gif", MAX_ATTACHMENT_BYTES + 1)).unwrap_err();
        assert!(matches!(err, AttachmentError::UnsupportedType { .. }));
    }

    #[test]
    fn size_ceiling_is_inclusive() {
        assert!(check(&sized("application/pdf", MAX_ATTACHMENT_BYTES)).is_ok());

        let err = check(&sized("application/pdf", MAX_ATTACHMENT_BYTES + 1)).unwrap_err();
        assert!(matches!(err, AttachmentError::TooLarge { size, .. } if size == MAX_ATTACHMENT_BYTES + 1));
        assert_eq!(err.notice_message(), "File too large (max 5MB).");
    }

    #[test]
    fn size_label_in_megabytes() {
        assert_eq!(sized("image/png", 512 * 1024).size_label(), "0.50 MB");
        assert_eq!(sized("image/png", 0).size_label(), "0.00 MB");
    }

    #[rstest]
    #[case("PDF", Some("application/pdf"))]
    #[case("jpg", Some("image/jpeg"))]
    #[case("jpeg", Some("image/jpeg"))]
    #[case("gif", None)]
    fn extension_lookup(#[case] ext: &str, #[case] expected: Option<&str>) {
        assert_eq!(mime_type_for_extension(ext), expected);
    }

    #[tokio::test]
    async fn from_path_reads_name_and_type() {
        let path = std::env::temp_dir().join(format!("mailform-{}.docx", uuid::Uuid::new_v4()));
        tokio::fs::write(&path, b"not really a docx").await.unwrap();

        let attachment = Attachment::from_path(&path).await.unwrap();
        tokio::fs::remove_file(&path).await.unwrap();

        assert!(attachment.name().ends_with(".docx"));
        assert_eq!(
            attachment.mime_type(),
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
        );
        assert_eq!(attachment.size(), 17);
    }

    fn temp_path(ext: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("mailform-{}.{}", uuid::Uuid::new_v4(), ext))
    }

    #[tokio::test]
    async fn from_path_rejects_disallowed_type_without_reading() {
        // A directory cannot be read as a file, so any attempt to load it would
        // surface as `Unreadable` instead of a type rejection.
        let path = temp_path("mkv");
        tokio::fs::create_dir(&path).await.unwrap();

        let err = Attachment::from_path(&path).await.unwrap_err();
        tokio::fs::remove_dir(&path).await.unwrap();

        assert!(matches!(err, AttachmentError::UnsupportedType { ref mime_type, .. } if mime_type == "application/octet-stream"));
    }

    #[tokio::test]
    async fn from_path_rejects_large_file_from_metadata() {
        let path = temp_path("mkv");
        let file = tokio::fs::File::create(&path).await.unwrap();
        file.set_len(64 * 1024 * 1024).await.unwrap();
        drop(file);

        let err = Attachment::from_path(&path).await.unwrap_err();
        assert!(matches!(err, AttachmentError::UnsupportedType { .. }));

        let pdf = temp_path("pdf");
        tokio::fs::rename(&path, &pdf).await.unwrap();
        let err = Attachment::from_path(&pdf).await.unwrap_err();
        tokio::fs::remove_file(&pdf).await.unwrap();

        assert!(matches!(err, AttachmentError::TooLarge { size, .. } if size == 64 * 1024 * 1024));
    }

    #[tokio::test]
    async fn from_path_reports_missing_file() {
        let err = Attachment::from_path(temp_path("pdf")).await.unwrap_err();
        assert!(matches!(err, AttachmentError::Unreadable { .. }));
        assert!(err.notice_message().starts_with("Could not read mailform-"));
    }
}
