//! Middleware for logging requests and responses.

use axum::{
    body::Body,
    extract::Request,
    http::{HeaderMap, HeaderValue, StatusCode, header::AUTHORIZATION},
    middleware::Next,
    response::{IntoResponse, Response},
};

/// Bodies longer than this many bytes are truncated in `info` logs.
pub const LOG_BODY_LENGTH_LIMIT: usize = 64;

/// Log the request and response for each request.
///
/// Both the request and response are logged at the `info` level with the
/// `Authorization` header redacted. If a body is longer than
/// [LOG_BODY_LENGTH_LIMIT] bytes, it is truncated and the full body is logged
/// at the `debug` level.
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let (parts, body) = request.into_parts();
    let Some(body_text) = read_body(body).await else {
        return StatusCode::BAD_REQUEST.into_response();
    };

    log_message(
        &format!(
            "Received request: {} {}\nheaders: {:#?}",
            parts.method,
            parts.uri,
            redact_headers(&parts.headers)
        ),
        "request",
        &body_text,
    );

    let request = Request::from_parts(parts, body_text.into());
    let response = next.run(request).await;

    let (parts, body) = response.into_parts();
    let Some(body_text) = read_body(body).await else {
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    };

    log_message(
        &format!(
            "Sending response: {}\nheaders: {:#?}",
            parts.status, parts.headers
        ),
        "response",
        &body_text,
    );

    Response::from_parts(parts, body_text.into())
}

async fn read_body(body: Body) -> Option<String> {
    match axum::body::to_bytes(body, usize::MAX).await {
        Ok(bytes) => Some(String::from_utf8_lossy(&bytes).to_string()),
        Err(error) => {
            tracing::error!("could not read body for logging: {error}");
            None
        }
    }
}

fn redact_headers(headers: &HeaderMap) -> HeaderMap {
    let mut headers = headers.clone();

    if headers.contains_key(AUTHORIZATION) {
        headers.insert(AUTHORIZATION, HeaderValue::from_static("********"));
    }

    headers
}

fn log_message(head: &str, kind: &str, body: &str) {
    if body.len() > LOG_BODY_LENGTH_LIMIT {
        let cut = (0..=LOG_BODY_LENGTH_LIMIT)
            .rev()
            .find(|&index| body.is_char_boundary(index))
            .unwrap_or(0);

        tracing::info!("{head}\nbody: {}...", &body[..cut]);
        tracing::debug!("Full {kind} body: {body:?}");
    } else {
        tracing::info!("{head}\nbody: {body:?}");
    }
}
