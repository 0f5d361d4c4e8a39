//! Custom axum extractors for Orgauth

use axum::{
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;

use crate::Error;

/// JSON body extractor that reports malformed input through the service
/// error envelope.
///
/// Field-level checks happen in the domain layer so that every missing or
/// invalid field is reported together. This extractor only rejects bodies
/// that cannot be deserialized at all, which map to a 400 client error.
#[derive(Debug)]
pub struct ApiJson<T>(pub T);

impl<T, S> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(reject)?;
        Ok(ApiJson(value))
    }
}

fn reject(rejection: JsonRejection) -> Error {
    tracing::debug!(error = %rejection.body_text(), "Rejected request body");
    Error::BadRequest(crate::error::GENERIC_CLIENT_ERROR.to_string())
}
