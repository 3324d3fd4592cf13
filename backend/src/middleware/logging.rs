use axum::{
    body::{to_bytes, Body, Bytes},
    http::{header::CONTENT_LENGTH, Request, StatusCode},
    middleware::Next,
    response::Response,
    Error as AxumError,
};
use std::time::Instant;

const MAX_BUFFERED_BODY_BYTES: usize = 64 * 1024;
const MAX_LOGGED_BODY_BYTES: usize = 2048;

/// How loudly an error response is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// Client sent a request that failed schema validation.
    Rejected,
    ClientError,
    ServerError,
}

pub fn classify(status: StatusCode, body: &str) -> Option<ErrorSeverity> {
    if status.is_server_error() {
        Some(ErrorSeverity::ServerError)
    } else if status == StatusCode::BAD_REQUEST && body.contains("\"VALIDATION_ERROR\"") {
        Some(ErrorSeverity::Rejected)
    } else if status.is_client_error() {
        Some(ErrorSeverity::ClientError)
    } else {
        None
    }
}

/// Records diagnostics for every 4xx/5xx response. The body is buffered so
/// the same payload is still forwarded to the caller. Validation rejections
/// are ordinary client input problems and only show up at debug level.
pub async fn log_error_responses(req: Request<Body>, next: Next) -> Response {
    let method = req.method().to_string();
    let uri = req.uri().to_string();
    let start = Instant::now();

    let response = next.run(req).await;
    let status = response.status();

    if !(status.is_client_error() || status.is_server_error()) {
        return response;
    }

    let latency_ms = start.elapsed().as_millis() as u64;
    let (mut parts, body) = response.into_parts();
    match buffer_body(body).await {
        Ok((bytes, preview)) => {
            if let Some(severity) = classify(status, &preview) {
                log_error_event(severity, status.as_u16(), &method, &uri, latency_ms, &preview);
            }
            Response::from_parts(parts, Body::from(bytes))
        }
        Err(err) => {
            parts.headers.remove(CONTENT_LENGTH);
            log_body_failure(status.as_u16(), &method, &uri, latency_ms, err);
            Response::from_parts(parts, Body::empty())
        }
    }
}

async fn buffer_body(body: Body) -> Result<(Bytes, String), AxumError> {
    let bytes = to_bytes(body, MAX_BUFFERED_BODY_BYTES).await?;
    let preview = if bytes.len() > MAX_LOGGED_BODY_BYTES {
        let slice = bytes.slice(0..MAX_LOGGED_BODY_BYTES);
        format!(
            "{}... (truncated, {} bytes total)",
            String::from_utf8_lossy(&slice),
            bytes.len()
        )
    } else {
        String::from_utf8_lossy(&bytes).to_string()
    };
    Ok((bytes, preview))
}

fn log_error_event(
    severity: ErrorSeverity,
    status: u16,
    method: &str,
    uri: &str,
    latency_ms: u64,
    body_preview: &str,
) {
    match severity {
        ErrorSeverity::Rejected => tracing::debug!(
            status,
            method,
            uri,
            latency_ms,
            body = body_preview,
            "Request failed validation"
        ),
        ErrorSeverity::ClientError => tracing::warn!(
            status,
            method,
            uri,
            latency_ms,
            body = body_preview,
            "Request completed with error status"
        ),
        ErrorSeverity::ServerError => tracing::error!(
            status,
            method,
            uri,
            latency_ms,
            body = body_preview,
            "Request completed with error status"
        ),
    }
}

fn log_body_failure(status: u16, method: &str, uri: &str, latency_ms: u64, err: AxumError) {
    if status >= 500 {
        tracing::error!(status, method, uri, latency_ms, error = ?err, "Failed to read error response body");
    } else {
        tracing::warn!(status, method, uri, latency_ms, error = ?err, "Failed to read error response body");
    }
}
