use axum::{
    extract::Request,
    http::{header, Method},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::errors::ApiError;

/// Middleware: reject any non-GET request whose Content-Type is not
/// application/json. GET requests carry no body and pass through.
pub async fn require_json(req: Request, next: Next) -> Response {
    if req.method() != Method::GET {
        let is_json = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.trim_start().starts_with("application/json"))
            .unwrap_or(false);
        if !is_json {
            return ApiError::bad_request("Bad Content-Type").into_response();
        }
    }
    next.run(req).await
}
