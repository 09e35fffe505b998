use std::path::PathBuf;

/// One externally requested interaction: prompt text plus ordered image
/// attachment paths.
///
/// Attachment files are owned by the caller. The bridge reads them through
/// the browser's file chooser and never creates, renames, or deletes them;
/// cleanup after the call returns is the caller's job.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InteractionRequest {
    pub text: String,
    pub attachments: Vec<PathBuf>,
}

impl InteractionRequest {
    /// Text-only request.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            attachments: Vec::new(),
        }
    }

    /// Attach image files, preserving order.
    pub fn with_attachments<I, P>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.attachments.extend(paths.into_iter().map(Into::into));
        self
    }

    pub fn has_attachments(&self) -> bool {
        !self.attachments.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_only_request_has_no_attachments() {
        let request = InteractionRequest::text("2+2?");
        assert_eq!(request.text, "2+2?");
        assert!(!request.has_attachments());
    }

    #[test]
    fn test_attachment_order_is_preserved() {
        let request = InteractionRequest::text("describe these")
            .with_attachments(["/tmp/a.png", "/tmp/b.png", "/tmp/c.png"]);
        let paths: Vec<_> = request
            .attachments
            .iter()
            .map(|p| p.to_string_lossy().to_string())
            .collect();
        assert_eq!(paths, ["/tmp/a.png", "/tmp/b.png", "/tmp/c.png"]);
    }
}
