//! Raw body extractor for import requests.

use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, Request},
    http::StatusCode,
};
use serde::de::DeserializeOwned;

use crate::errors::{AppError, AppResult};

const INVALID_USERS_BODY: &str = "Invalid users data - expected array of users";

/// Buffered request body, decoded only once the caller has been authorized.
///
/// A body over the route's limit is rejected with [`AppError::PayloadTooLarge`].
pub struct ImportBody(pub Bytes);

#[async_trait]
impl<S> FromRequest<S> for ImportBody
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state).await.map_err(|e| {
            if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
                AppError::PayloadTooLarge
            } else {
                tracing::debug!("Could not read import body: {}", e.body_text());
                AppError::BadRequest(INVALID_USERS_BODY.to_string())
            }
        })?;

        Ok(ImportBody(bytes))
    }
}

impl ImportBody {
    /// Decode the body as JSON.
    ///
    /// Malformed JSON and a body without a `users` array get the same answer.
    pub fn parse<T: DeserializeOwned>(&self) -> AppResult<T> {
        serde_json::from_slice(&self.0).map_err(|e| {
            tracing::debug!("Rejected import body: {}", e);
            AppError::BadRequest(INVALID_USERS_BODY.to_string())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::handlers::import_handler::ImportUsersRequest;

    #[test]
    fn users_array_is_decoded() {
        let body = ImportBody(Bytes::from_static(br#"{"users":[{"email":"a@x.io"}]}"#));
        let request: ImportUsersRequest = body.parse().unwrap();
        assert_eq!(request.users.len(), 1);
    }

    #[test]
    fn non_array_users_is_a_bad_request() {
        let body = ImportBody(Bytes::from_static(br#"{"users":"x"}"#));
        match body.parse::<ImportUsersRequest>() {
            Err(AppError::BadRequest(msg)) => assert_eq!(msg, INVALID_USERS_BODY),
            other => panic!("expected bad request, got {:?}", other.map(|r| r.users.len())),
        }
    }
}
