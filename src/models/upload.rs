use std::path::PathBuf;

/// A single file persisted from an upload request.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    /// Filename exactly as the client sent it, before sanitization.
    pub original_name: String,
    /// Absolute path the file was written to.
    pub path: PathBuf,
}
