//! CV document intake rules

use crate::domain::{DomainError, DomainResult};

pub const PDF_CONTENT_TYPE: &str = "application/pdf";

/// Default upload ceiling: 5 MiB
pub const DEFAULT_MAX_CV_BYTES: usize = 5 * 1024 * 1024;

/// An uploaded CV before it reaches storage
#[derive(Debug, Clone)]
pub struct CvDocument {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl CvDocument {
    /// Checks type, emptiness and size. Nothing is stored on failure.
    pub fn validate(&self, max_bytes: usize) -> DomainResult<()> {
        let mime = self
            .content_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim();
        if !mime.eq_ignore_ascii_case(PDF_CONTENT_TYPE) {
            return Err(DomainError::Validation(format!(
                "CV must be a PDF document, got {}",
                if mime.is_empty() { "no content type" } else { mime }
            )));
        }
        if self.bytes.is_empty() {
            return Err(DomainError::Validation("CV file is empty".into()));
        }
        if self.bytes.len() > max_bytes {
            return Err(DomainError::Validation(format!(
                "CV exceeds the {} byte limit",
                max_bytes
            )));
        }
        Ok(())
    }

    /// `<unix_millis>-<guide_id>-<sanitized file name>`
    pub fn storage_key(&self, guide_id: &str, unix_millis: i64) -> String {
        format!(
            "{}-{}-{}",
            unix_millis,
            guide_id,
            sanitize_file_name(&self.file_name)
        )
    }
}

/// Keep ASCII alphanumerics, dots, dashes and underscores; anything else
/// becomes `_`. Path components are dropped.
pub fn sanitize_file_name(name: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or_default();
    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let cleaned = cleaned.trim_start_matches('.');
    if cleaned.is_empty() {
        "cv.pdf".to_string()
    } else {
        cleaned.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(content_type: &str, bytes: &[u8]) -> CvDocument {
        CvDocument {
            file_name: "cv.pdf".into(),
            content_type: content_type.into(),
            bytes: bytes.to_vec(),
        }
    }

    #[test]
    fn pdf_within_limit_is_accepted() {
        assert!(doc("application/pdf", b"%PDF-1.7").validate(1024).is_ok());
        assert!(doc("Application/PDF; name=cv.pdf", b"%PDF").validate(1024).is_ok());
    }

    #[test]
    fn other_content_types_are_rejected() {
        for ct in ["image/png", "application/msword", ""] {
            let err = doc(ct, b"data").validate(1024).unwrap_err();
            assert!(matches!(err, DomainError::Validation(_)), "{ct}");
        }
    }

    #[test]
    fn empty_and_oversize_files_are_rejected() {
        assert!(doc("application/pdf", b"").validate(1024).is_err());
        assert!(doc("application/pdf", &[0u8; 11]).validate(10).is_err());
        assert!(doc("application/pdf", &[0u8; 10]).validate(10).is_ok());
    }

    #[test]
    fn key_embeds_time_owner_and_clean_name() {
        let mut d = doc("application/pdf", b"%PDF");
        d.file_name = "../../etc/Mon CV (final).pdf".into();
        assert_eq!(
            d.storage_key("g-1", 1_700_000_000_000),
            "1700000000000-g-1-Mon_CV__final_.pdf"
        );
    }

    #[test]
    fn hidden_or_blank_names_fall_back() {
        assert_eq!(sanitize_file_name(""), "cv.pdf");
        assert_eq!(sanitize_file_name("..."), "cv.pdf");
        assert_eq!(sanitize_file_name(".profile.pdf"), "profile.pdf");
    }
}
