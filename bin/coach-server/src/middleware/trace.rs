use crate::error::ServerError;
use axum::{
    body::{Body, Bytes},
    extract::Request,
    http::{header, HeaderValue},
    middleware::Next,
    response::{IntoResponse, Response},
};
use http_body_util::{BodyExt, LengthLimitError, Limited};
use std::time::Instant;
use tracing::{debug, info, info_span, warn, Instrument};
use uuid::Uuid;

pub static X_TRACE_ID: &str = "x-trace-id";

/// Request bodies above this size are refused before reaching a handler.
pub const MAX_REQUEST_BODY: usize = 2 * 1024 * 1024;

/// Largest JSON body echoed at debug level.
const MAX_LOGGED_BODY: usize = 1024;

pub async fn trace_middleware(req: Request<Body>, next: Next) -> Response {
    let start_time = Instant::now();

    // Reuse a caller-supplied trace id when it is a valid UUID.
    let trace_id = req
        .headers()
        .get(X_TRACE_ID)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| Uuid::parse_str(s).ok())
        .unwrap_or_else(Uuid::new_v4);
    let trace_header = HeaderValue::from_str(&trace_id.to_string()).ok();

    let method = req.method().clone();
    let path = req.uri().path().to_string();

    let span = info_span!(
        "http_request",
        trace_id = %trace_id,
        method = %method,
        path = %path,
    );

    async move {
        info!("→ request started");
        let (parts, body) = req.into_parts();

        let mut response = match Limited::new(body, MAX_REQUEST_BODY).collect().await {
            Ok(collected) => {
                let req_bytes = collected.to_bytes();
                log_body("request", &parts.headers, &req_bytes);
                let mut req = Request::from_parts(parts, Body::from(req_bytes));
                if let Some(value) = &trace_header {
                    req.headers_mut().insert(X_TRACE_ID, value.clone());
                }

                let response = next.run(req).await;

                let (parts, body) = response.into_parts();
                let res_bytes = match body.collect().await {
                    Ok(collected) => collected.to_bytes(),
                    Err(_) => Bytes::new(),
                };
                log_body("response", &parts.headers, &res_bytes);
                Response::from_parts(parts, Body::from(res_bytes))
            }
            Err(e) if e.downcast_ref::<LengthLimitError>().is_some() => {
                warn!(limit = MAX_REQUEST_BODY, "request body too large");
                ServerError::PayloadTooLarge(MAX_REQUEST_BODY).into_response()
            }
            Err(e) => {
                warn!(error = %e, "failed to read request body");
                ServerError::Validation("Failed to read request body.".into()).into_response()
            }
        };

        if let Some(value) = trace_header {
            response.headers_mut().insert(X_TRACE_ID, value);
        }

        info!(
            status = response.status().as_u16(),
            latency_ms = start_time.elapsed().as_millis(),
            "← response finished"
        );

        response
    }
    .instrument(span)
    .await
}

/// Small JSON payloads are echoed at debug level, anything else only by type
/// and size.
fn log_body(direction: &str, headers: &header::HeaderMap, bytes: &Bytes) {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");

    if content_type.contains("application/json") && bytes.len() < MAX_LOGGED_BODY {
        if let Ok(text) = std::str::from_utf8(bytes) {
            debug!(direction, body = text, "http body");
        }
    } else if !bytes.is_empty() {
        debug!(direction, content_type, size = bytes.len(), "http body skipped");
    }
}
