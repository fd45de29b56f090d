use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

/// JSON error envelope returned for every failed request: a status code,
/// a short title, and a human-readable detail. Internal causes are logged
/// server-side, never echoed to the client.
#[derive(Debug, Serialize)]
pub struct ApiError {
    pub status: u16,
    pub title: String,
    pub detail: String,
}

impl ApiError {
    pub fn new(status: StatusCode, title: &str, detail: impl Into<String>) -> Self {
        Self { status: status.as_u16(), title: title.to_string(), detail: detail.into() }
    }

    pub fn not_found(uid: u64) -> Self {
        Self::new(
            StatusCode::NOT_FOUND,
            "Not Found",
            format!("No user with UID {uid} exists"),
        )
    }

    pub fn bad_request(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "Bad Request", detail)
    }

    pub fn internal() -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error", "")
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_names_the_uid() {
        let err = ApiError::not_found(9);
        assert_eq!(err.status, 404);
        assert_eq!(err.title, "Not Found");
        assert_eq!(err.detail, "No user with UID 9 exists");
    }

    #[test]
    fn internal_hides_detail() {
        let err = ApiError::internal();
        assert_eq!(err.status, 500);
        assert!(err.detail.is_empty());
    }
}
