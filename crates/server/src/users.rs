use std::sync::Arc;

use axum::{
    extract::rejection::JsonRejection,
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use tracing::error;

use models::{IncompleteUser, User};
use service::UserStore;

use crate::errors::ApiError;

/// GET /user — all users. Order is unspecified.
pub async fn list_users(State(store): State<Arc<UserStore>>) -> Json<Vec<User>> {
    Json(store.list().await)
}

/// GET /user/:uid
pub async fn get_user(
    State(store): State<Arc<UserStore>>,
    Path(raw): Path<String>,
) -> Result<Json<User>, ApiError> {
    let uid = parse_uid(&raw)?;
    match store.get(uid).await {
        Some(user) => Ok(Json(user)),
        None => Err(ApiError::not_found(uid)),
    }
}

/// POST /user
pub async fn create_user(
    State(store): State<Arc<UserStore>>,
    payload: Result<Json<IncompleteUser>, JsonRejection>,
) -> Result<Json<User>, ApiError> {
    let Json(incomplete) = payload.map_err(|e| ApiError::bad_request(e.body_text()))?;
    match store.insert(incomplete).await {
        Ok(user) => Ok(Json(user)),
        Err(e) => {
            error!(error = %e, "creating user failed");
            Err(ApiError::internal())
        }
    }
}

/// PUT /user/:uid — full replace of the record's fields, not a patch.
pub async fn update_user(
    State(store): State<Arc<UserStore>>,
    Path(raw): Path<String>,
    payload: Result<Json<IncompleteUser>, JsonRejection>,
) -> Result<Json<User>, ApiError> {
    let uid = parse_uid(&raw)?;
    let Json(incomplete) = payload.map_err(|e| ApiError::bad_request(e.body_text()))?;
    match store.update(uid, incomplete).await {
        Ok(Some(user)) => Ok(Json(user)),
        Ok(None) => Err(ApiError::not_found(uid)),
        Err(e) => {
            error!(error = %e, uid, "updating user failed");
            Err(ApiError::internal())
        }
    }
}

/// DELETE /user/:uid — deleting an unknown UID still succeeds.
pub async fn delete_user(
    State(store): State<Arc<UserStore>>,
    Path(raw): Path<String>,
) -> Result<StatusCode, ApiError> {
    let uid = parse_uid(&raw)?;
    match store.delete(uid).await {
        Ok(()) => Ok(StatusCode::OK),
        Err(e) => {
            error!(error = %e, uid, "deleting user failed");
            Err(ApiError::internal())
        }
    }
}

// The path segment is parsed by hand so a bad UID produces the JSON error
// envelope rather than axum's default rejection.
fn parse_uid(raw: &str) -> Result<u64, ApiError> {
    raw.parse::<u64>()
        .map_err(|_| ApiError::bad_request(format!("'{raw}' is not a valid UID")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_uid_accepts_u64() {
        assert_eq!(parse_uid("42").expect("valid uid"), 42);
    }

    #[test]
    fn parse_uid_rejects_garbage() {
        let err = parse_uid("abc").expect_err("non-numeric uid");
        assert_eq!(err.status, 400);
        assert_eq!(err.detail, "'abc' is not a valid UID");
    }

    #[test]
    fn parse_uid_rejects_negative_numbers() {
        assert!(parse_uid("-1").is_err());
    }
}
