use std::{path::PathBuf, sync::Arc};

use axum::Router;
use tempfile::TempDir;

use ghostdrop::{
    app,
    services::{file_storage::UploadStore, lifecycle::ShutdownHandle},
    utils::config::AppConfig,
    AppState,
};

pub struct TestApp {
    pub router: Router,
    pub shutdown: ShutdownHandle,
    /// Canonicalized upload root; saved paths in responses start with this.
    pub upload_root: PathBuf,
    // Held so the directory outlives the test.
    #[allow(dead_code)]
    pub upload_dir: TempDir,
}

/// Setup a test application backed by a temporary upload directory.
pub fn setup_test_app() -> TestApp {
    let upload_dir = TempDir::new().expect("failed to create temp dir");

    let config = AppConfig {
        host: "127.0.0.1".to_string(),
        port: 0, // random port when actually bound
        upload_dir: upload_dir.path().display().to_string(),
        request_timeout_seconds: 30,
    };

    let store = UploadStore::new(upload_dir.path()).expect("failed to create upload store");
    let upload_root = store.root().to_path_buf();
    let shutdown = ShutdownHandle::new();

    let state = AppState {
        config: Arc::new(config),
        store: Arc::new(store),
        shutdown: shutdown.clone(),
    };

    TestApp {
        router: app(state),
        shutdown,
        upload_root,
        upload_dir,
    }
}

pub const TEST_BOUNDARY: &str = "ghostdrop-test-boundary";

/// Build a binary-safe multipart/form-data body with one file part per
/// (filename, contents) pair.
pub fn multipart_body(parts: &[(&str, &[u8])], boundary: &str) -> Vec<u8> {
    let mut body = Vec::new();
    for (filename, data) in parts {
        body.extend_from_slice(format!("--{}\r\n", boundary).as_bytes());
        body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"files\"; filename=\"{}\"\r\n",
                filename
            )
            .as_bytes(),
        );
        body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
        body.extend_from_slice(data);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", boundary).as_bytes());
    body
}

/// A multipart body containing a single non-file text field.
pub fn text_field_body(name: &str, value: &str, boundary: &str) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{}\r\n", boundary).as_bytes());
    body.extend_from_slice(
        format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", name).as_bytes(),
    );
    body.extend_from_slice(value.as_bytes());
    body.extend_from_slice(b"\r\n");
    body.extend_from_slice(format!("--{}--\r\n", boundary).as_bytes());
    body
}
