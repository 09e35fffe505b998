//! Staging of inline image payloads.
//!
//! Clients send images as base64 data URLs inside the JSON body; the
//! browser's file chooser wants filesystem paths. The bridge between the
//! two is a set of temp files that live exactly as long as the interaction.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use std::io::Write;
use std::path::PathBuf;
use tempfile::NamedTempFile;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ImageError {
    #[error("image {index} is not valid base64: {reason}")]
    Malformed { index: usize, reason: String },

    #[error("could not stage image {index}: {source}")]
    Io {
        index: usize,
        source: std::io::Error,
    },
}

/// Uploaded images staged as temp files for the file chooser.
///
/// Dropping this deletes the files; the caller drops it once the
/// interaction has returned, success or failure, which is the cleanup
/// contract the core expects from whoever owns the attachment paths.
#[derive(Debug)]
pub struct StagedImages {
    files: Vec<NamedTempFile>,
}

impl StagedImages {
    /// Paths in upload order.
    pub fn paths(&self) -> Vec<PathBuf> {
        self.files.iter().map(|f| f.path().to_path_buf()).collect()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// Decode data-URL payloads into `.png` temp files, preserving order.
///
/// Accepts both full data URLs ("data:image/png;base64,…") and bare
/// base64. Any undecodable payload fails the whole batch before a single
/// byte reaches the browser.
pub fn stage(payloads: &[String]) -> Result<StagedImages, ImageError> {
    let mut files = Vec::with_capacity(payloads.len());

    for (index, payload) in payloads.iter().enumerate() {
        let encoded = payload
            .split_once(',')
            .map(|(_, rest)| rest)
            .unwrap_or(payload.as_str());

        let bytes = STANDARD
            .decode(encoded.trim())
            .map_err(|e| ImageError::Malformed {
                index,
                reason: e.to_string(),
            })?;

        let mut file = tempfile::Builder::new()
            .prefix("augur-upload-")
            .suffix(".png")
            .tempfile()
            .map_err(|source| ImageError::Io { index, source })?;
        file.write_all(&bytes)
            .map_err(|source| ImageError::Io { index, source })?;

        files.push(file);
    }

    Ok(StagedImages { files })
}
