use axum::{
    body::Body,
    extract::{Request, State},
    http::header,
};
use futures_util::TryStreamExt;
use multer::Multipart;

use crate::models::upload::UploadedFile;
use crate::services::lifecycle::SHUTDOWN_DELAY;
use crate::AppState;

/// Handle the one-shot multipart upload.
///
/// Every part with a non-empty filename is written to the upload directory;
/// per-file failures are logged and skipped. The request always succeeds
/// with a plain-text body, and the server is scheduled to shut down whether
/// or not any file was saved.
pub async fn receive_files(State(state): State<AppState>, request: Request<Body>) -> String {
    let saved = match multipart_boundary(&request) {
        Some(boundary) => save_parts(&state, request, boundary).await,
        None => {
            tracing::warn!("upload request without a multipart boundary");
            Vec::new()
        }
    };

    if saved.is_empty() {
        tracing::info!("No valid files received.");
    } else {
        tracing::info!("Files received:");
        for file in &saved {
            tracing::info!("{}", file.path.display());
        }
    }

    state.shutdown.schedule(SHUTDOWN_DELAY);

    response_body(&saved)
}

fn multipart_boundary(request: &Request<Body>) -> Option<String> {
    request
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|ct| ct.to_str().ok())
        .and_then(|ct| multer::parse_boundary(ct).ok())
}

async fn save_parts(state: &AppState, request: Request<Body>, boundary: String) -> Vec<UploadedFile> {
    // Convert the request body to a stream
    let stream = request
        .into_body()
        .into_data_stream()
        .map_err(|err| std::io::Error::new(std::io::ErrorKind::Other, err));

    let mut multipart = Multipart::new(stream, boundary);
    let mut saved = Vec::new();

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => {
                tracing::warn!("stopped reading multipart body: {}", e);
                break;
            }
        };

        let filename = match field.file_name() {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => continue,
        };

        let data = match field.bytes().await {
            Ok(data) => data,
            Err(e) => {
                tracing::warn!("failed to read part {:?}: {}", filename, e);
                continue;
            }
        };

        match state.store.save(&filename, &data).await {
            Ok(file) => saved.push(file),
            Err(e) => tracing::warn!("skipping {:?}: {}", filename, e),
        }
    }

    saved
}

fn response_body(saved: &[UploadedFile]) -> String {
    if saved.is_empty() {
        return "No valid files received. The server will now shut down...\n".to_string();
    }

    let mut body = String::from("File(s) uploaded successfully. The server will now shut down...\n");
    for file in saved {
        body.push_str(&file.path.display().to_string());
        body.push('\n');
    }
    body
}
